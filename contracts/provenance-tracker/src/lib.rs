//! Provenance tracker for digital artworks: one append-only ownership
//! history per NFT, gated on the current owner of record, with chain
//! verification and explicit administrative pruning.

use crate::errors::ProvenanceError;
use crate::state::ProvenanceTrackerState;
use crate::types::{
    ChainVerification, EventLogEntry, ProvenanceRecord, ProvenanceSummary, TransferType,
};
use near_sdk::json_types::U128;
use near_sdk::{env, near, AccountId, PanicOnDefault};

pub mod errors;
mod events;
pub mod state;
pub mod types;

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct ProvenanceTracker {
    state: ProvenanceTrackerState,
}

#[near]
impl ProvenanceTracker {
    /// The deployer becomes the initial admin.
    #[init]
    pub fn new() -> Self {
        Self {
            state: ProvenanceTrackerState::new(),
        }
    }

    // --- Administration ---

    #[handle_result]
    pub fn transfer_admin(&mut self, new_admin: AccountId) -> Result<(), ProvenanceError> {
        self.state
            .transfer_admin(&env::predecessor_account_id(), new_admin)
    }

    #[handle_result]
    pub fn set_max_history_length(&mut self, max_length: u32) -> Result<(), ProvenanceError> {
        self.state
            .set_max_history_length(&env::predecessor_account_id(), max_length)
    }

    // --- Provenance ---

    #[handle_result]
    pub fn initialize_provenance(
        &mut self,
        nft_id: u64,
        initial_owner: AccountId,
    ) -> Result<u64, ProvenanceError> {
        self.state
            .initialize_provenance(&env::predecessor_account_id(), nft_id, initial_owner)
    }

    #[handle_result]
    pub fn record_transfer(
        &mut self,
        nft_id: u64,
        new_owner: AccountId,
        transfer_type: TransferType,
        price: Option<U128>,
    ) -> Result<(), ProvenanceError> {
        self.state.record_transfer(
            &env::predecessor_account_id(),
            nft_id,
            new_owner,
            transfer_type,
            price,
        )
    }

    #[handle_result]
    pub fn prune_old_history(
        &mut self,
        nft_id: u64,
        keep_last: u32,
    ) -> Result<u32, ProvenanceError> {
        self.state
            .prune_old_history(&env::predecessor_account_id(), nft_id, keep_last)
    }

    // --- Views ---

    #[handle_result]
    pub fn verify_chain(&self, nft_id: u64) -> Result<ChainVerification, ProvenanceError> {
        self.state.verify_chain(nft_id)
    }

    #[handle_result]
    pub fn get_provenance_summary(
        &self,
        nft_id: u64,
    ) -> Result<ProvenanceSummary, ProvenanceError> {
        self.state.get_provenance_summary(nft_id)
    }

    pub fn get_provenance(&self, nft_id: u64) -> Option<ProvenanceRecord> {
        self.state.get_provenance(nft_id)
    }

    pub fn get_current_owner(&self, nft_id: u64) -> Option<AccountId> {
        self.state.get_current_owner(nft_id)
    }

    pub fn get_history_length(&self, nft_id: u64) -> Option<u32> {
        self.state.get_history_length(nft_id)
    }

    pub fn get_admin(&self) -> AccountId {
        self.state.admin.clone()
    }

    pub fn get_max_history_length(&self) -> u32 {
        self.state.max_history_length
    }

    pub fn get_event(&self, event_id: u64) -> Option<EventLogEntry> {
        self.state.get_event(event_id)
    }

    pub fn get_event_count(&self) -> u64 {
        self.state.get_event_count()
    }
}
