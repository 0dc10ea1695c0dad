//! Certificate registry for digital artworks: issuance, one-way revocation,
//! and a bounded custody-claim log per certificate.

use crate::errors::CertificateError;
use crate::state::CertificateRegistryState;
use crate::types::{Certificate, EventLogEntry, TransferRecord};
use near_sdk::json_types::{Base64VecU8, U128};
use near_sdk::{env, near, AccountId, PanicOnDefault};

pub mod errors;
mod events;
pub mod state;
#[cfg(test)]
mod tests;
pub mod types;

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct CertificateRegistry {
    state: CertificateRegistryState,
}

#[near]
impl CertificateRegistry {
    #[init]
    pub fn new() -> Self {
        Self {
            state: CertificateRegistryState::new(),
        }
    }

    // --- Configuration ---

    #[handle_result]
    pub fn set_authority(&mut self, new_authority: AccountId) -> Result<(), CertificateError> {
        self.state
            .set_authority(&env::predecessor_account_id(), new_authority)
    }

    #[handle_result]
    pub fn set_issuance_fee(&mut self, fee: U128) -> Result<(), CertificateError> {
        self.state
            .set_issuance_fee(&env::predecessor_account_id(), fee.0)
    }

    #[handle_result]
    pub fn set_platform_fee_rate(&mut self, rate_bps: u32) -> Result<(), CertificateError> {
        self.state
            .set_platform_fee_rate(&env::predecessor_account_id(), rate_bps)
    }

    #[handle_result]
    pub fn set_max_certs(&mut self, max_certs: u64) -> Result<(), CertificateError> {
        self.state
            .set_max_certs(&env::predecessor_account_id(), max_certs)
    }

    // --- Lifecycle ---

    #[payable]
    #[handle_result]
    pub fn issue_certificate(
        &mut self,
        artwork_hash: Base64VecU8,
        metadata: String,
        cert_uri: String,
    ) -> Result<u64, CertificateError> {
        self.state.issue_certificate(
            &env::predecessor_account_id(),
            artwork_hash.0,
            metadata,
            cert_uri,
        )
    }

    #[handle_result]
    pub fn revoke_certificate(&mut self, cert_id: u64) -> Result<(), CertificateError> {
        self.state
            .revoke_certificate(&env::predecessor_account_id(), cert_id)
    }

    #[handle_result]
    pub fn transfer_certificate(
        &mut self,
        cert_id: u64,
        recipient: AccountId,
    ) -> Result<(), CertificateError> {
        self.state
            .transfer_certificate(&env::predecessor_account_id(), cert_id, recipient)
    }

    // --- Views ---

    #[handle_result]
    pub fn verify_certificate(&self, cert_id: u64) -> Result<bool, CertificateError> {
        self.state.verify_certificate(cert_id)
    }

    pub fn get_certificate(&self, cert_id: u64) -> Option<Certificate> {
        self.state.get_certificate(cert_id)
    }

    pub fn get_certificate_by_hash(&self, artwork_hash: Base64VecU8) -> Option<Certificate> {
        self.state.get_certificate_by_hash(&artwork_hash.0)
    }

    pub fn get_transfer_history(&self, cert_id: u64) -> Vec<TransferRecord> {
        self.state.get_transfer_history(cert_id)
    }

    pub fn get_certificate_count(&self) -> u64 {
        self.state.get_certificate_count()
    }

    pub fn get_authority(&self) -> Option<AccountId> {
        self.state.authority.clone()
    }

    pub fn get_issuance_fee(&self) -> U128 {
        U128(self.state.issuance_fee)
    }

    pub fn get_platform_fee_rate(&self) -> u32 {
        self.state.platform_fee_bps
    }

    pub fn get_max_certs(&self) -> u64 {
        self.state.max_certs
    }

    pub fn get_event(&self, event_id: u64) -> Option<EventLogEntry> {
        self.state.get_event(event_id)
    }

    pub fn get_event_count(&self) -> u64 {
        self.state.get_event_count()
    }
}
