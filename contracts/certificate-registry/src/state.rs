use crate::errors::CertificateError;
use crate::events::CertificateEvent;
use crate::types::{
    CertStatus, Certificate, EventLogEntry, TransferRecord, ARTWORK_HASH_LEN, MAX_CERT_URI_LEN,
    MAX_METADATA_LEN, MAX_PLATFORM_FEE_BPS, MAX_TRANSFER_RECORDS,
};
use near_sdk::base64::Engine;
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::json_types::U128;
use near_sdk::store::LookupMap;
use near_sdk::{env, log, AccountId, BorshStorageKey, NearToken, Promise};

const DEFAULT_MAX_CERTS: u64 = 10_000;

#[derive(BorshSerialize, BorshDeserialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
pub enum StorageKey {
    Certs,
    CertByHash,
    Transfers,
    EventLog,
}

#[derive(BorshSerialize, BorshDeserialize, near_sdk_macros::NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct CertificateRegistryState {
    pub version: String,
    /// Platform principal; set exactly once via `set_authority`.
    pub authority: Option<AccountId>,
    /// Charged to the artist on issuance, in yoctoNEAR; forwarded to the authority.
    pub issuance_fee: u128,
    pub platform_fee_bps: u32,
    pub max_certs: u64,
    pub next_cert_id: u64,
    pub certs: LookupMap<u64, Certificate>,
    /// Secondary uniqueness index; one certificate per artwork digest, ever.
    pub cert_by_hash: LookupMap<Vec<u8>, u64>,
    pub transfers: LookupMap<u64, Vec<TransferRecord>>,
    pub event_log: LookupMap<u64, EventLogEntry>,
    pub next_event_id: u64,
}

impl CertificateRegistryState {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            authority: None,
            issuance_fee: 0,
            platform_fee_bps: 0,
            max_certs: DEFAULT_MAX_CERTS,
            next_cert_id: 0,
            certs: LookupMap::new(StorageKey::Certs),
            cert_by_hash: LookupMap::new(StorageKey::CertByHash),
            transfers: LookupMap::new(StorageKey::Transfers),
            event_log: LookupMap::new(StorageKey::EventLog),
            next_event_id: 0,
        }
    }

    // --- Configuration ---

    pub fn set_authority(
        &mut self,
        caller: &AccountId,
        new_authority: AccountId,
    ) -> Result<(), CertificateError> {
        if self.authority.is_some() {
            return Err(CertificateError::InvalidAuthority);
        }
        if !is_valid_authority(&new_authority) {
            return Err(CertificateError::InvalidAuthority);
        }
        log!("Setting registry authority to {}", new_authority);
        self.authority = Some(new_authority.clone());
        self.record_event("authority_set", 0, caller);
        CertificateEvent::AuthoritySet {
            authority: new_authority,
        }
        .emit();
        Ok(())
    }

    pub fn set_issuance_fee(
        &mut self,
        caller: &AccountId,
        fee: u128,
    ) -> Result<(), CertificateError> {
        self.check_authority(caller)?;
        self.issuance_fee = fee;
        self.record_event("issuance_fee_updated", 0, caller);
        CertificateEvent::IssuanceFeeUpdated {
            authority: caller.clone(),
            fee: U128(fee),
        }
        .emit();
        Ok(())
    }

    pub fn set_platform_fee_rate(
        &mut self,
        caller: &AccountId,
        rate_bps: u32,
    ) -> Result<(), CertificateError> {
        self.check_authority(caller)?;
        if rate_bps > MAX_PLATFORM_FEE_BPS {
            return Err(CertificateError::InvalidFee);
        }
        self.platform_fee_bps = rate_bps;
        self.record_event("platform_fee_rate_updated", 0, caller);
        CertificateEvent::PlatformFeeRateUpdated {
            authority: caller.clone(),
            rate_bps,
        }
        .emit();
        Ok(())
    }

    pub fn set_max_certs(
        &mut self,
        caller: &AccountId,
        max_certs: u64,
    ) -> Result<(), CertificateError> {
        self.check_authority(caller)?;
        if max_certs == 0 {
            return Err(CertificateError::MaxCertsExceeded);
        }
        self.max_certs = max_certs;
        self.record_event("max_certs_updated", 0, caller);
        CertificateEvent::MaxCertsUpdated {
            authority: caller.clone(),
            max_certs,
        }
        .emit();
        Ok(())
    }

    // --- Lifecycle ---

    /// Issues a certificate for a new artwork digest. The caller is the
    /// artist of record; the issuance fee is taken from the attached deposit
    /// and forwarded to the authority after all state is written.
    pub fn issue_certificate(
        &mut self,
        caller: &AccountId,
        artwork_hash: Vec<u8>,
        metadata: String,
        cert_uri: String,
    ) -> Result<u64, CertificateError> {
        let authority = self
            .authority
            .clone()
            .ok_or(CertificateError::InvalidAuthority)?;
        if self.next_cert_id >= self.max_certs {
            return Err(CertificateError::MaxCertsExceeded);
        }
        if artwork_hash.len() != ARTWORK_HASH_LEN {
            return Err(CertificateError::InvalidHash);
        }
        if metadata.is_empty() || metadata.len() > MAX_METADATA_LEN {
            return Err(CertificateError::InvalidMetadata);
        }
        if cert_uri.len() > MAX_CERT_URI_LEN {
            return Err(CertificateError::InvalidMetadata);
        }
        if self.cert_by_hash.contains_key(&artwork_hash) {
            return Err(CertificateError::CertAlreadyIssued);
        }
        let deposit = env::attached_deposit().as_yoctonear();
        if deposit < self.issuance_fee {
            return Err(CertificateError::InsufficientBalance);
        }

        let cert_id = self.next_cert_id;
        let issued_at = env::block_height();
        let certificate = Certificate {
            id: cert_id,
            artist: caller.clone(),
            artwork_hash: artwork_hash.clone(),
            metadata,
            issued_at,
            status: CertStatus::Active,
            revoked_at: None,
            cert_uri,
        };
        self.certs.insert(cert_id, certificate);
        self.cert_by_hash.insert(artwork_hash.clone(), cert_id);
        self.transfers.insert(cert_id, Vec::new());
        self.next_cert_id += 1;

        self.record_event("certificate_issued", cert_id, caller);
        CertificateEvent::CertificateIssued {
            cert_id,
            artist: caller.clone(),
            artwork_hash: encode_hash(&artwork_hash),
            fee: U128(self.issuance_fee),
            timestamp: issued_at,
        }
        .emit();

        // Transfers are the final, non-interruptible step; state above is
        // already committed-or-aborted as a unit with them.
        if self.issuance_fee > 0 {
            Promise::new(authority).transfer(NearToken::from_yoctonear(self.issuance_fee));
        }
        let surplus = deposit - self.issuance_fee;
        if surplus > 0 {
            Promise::new(caller.clone()).transfer(NearToken::from_yoctonear(surplus));
        }

        Ok(cert_id)
    }

    /// One-way Active -> Revoked transition, artist only.
    pub fn revoke_certificate(
        &mut self,
        caller: &AccountId,
        cert_id: u64,
    ) -> Result<(), CertificateError> {
        let cert = self
            .certs
            .get_mut(&cert_id)
            .ok_or(CertificateError::CertNotFound)?;
        if &cert.artist != caller {
            return Err(CertificateError::NotAuthorized);
        }
        if cert.status != CertStatus::Active {
            return Err(CertificateError::InvalidStatus);
        }
        let revoked_at = env::block_height();
        cert.status = CertStatus::Revoked;
        cert.revoked_at = Some(revoked_at);

        self.record_event("certificate_revoked", cert_id, caller);
        CertificateEvent::CertificateRevoked {
            cert_id,
            artist: caller.clone(),
            timestamp: revoked_at,
        }
        .emit();
        Ok(())
    }

    /// Appends a custody claim to the certificate's transfer log.
    pub fn transfer_certificate(
        &mut self,
        caller: &AccountId,
        cert_id: u64,
        recipient: AccountId,
    ) -> Result<(), CertificateError> {
        let cert = self
            .certs
            .get(&cert_id)
            .ok_or(CertificateError::CertNotFound)?;
        if cert.status != CertStatus::Active {
            return Err(CertificateError::InvalidStatus);
        }
        if &recipient == caller {
            return Err(CertificateError::NotAuthorized);
        }
        let records = self
            .transfers
            .get_mut(&cert_id)
            .ok_or(CertificateError::CertNotFound)?;
        if records.len() >= MAX_TRANSFER_RECORDS {
            return Err(CertificateError::MaxCertsExceeded);
        }
        let timestamp = env::block_height();
        records.push(TransferRecord {
            from: caller.clone(),
            to: recipient.clone(),
            timestamp,
        });

        self.record_event("certificate_transfer_logged", cert_id, caller);
        CertificateEvent::CertificateTransferLogged {
            cert_id,
            from: caller.clone(),
            to: recipient,
            timestamp,
        }
        .emit();
        Ok(())
    }

    // --- Views ---

    pub fn verify_certificate(&self, cert_id: u64) -> Result<bool, CertificateError> {
        let cert = self
            .certs
            .get(&cert_id)
            .ok_or(CertificateError::CertNotFound)?;
        Ok(cert.status == CertStatus::Active)
    }

    pub fn get_certificate(&self, cert_id: u64) -> Option<Certificate> {
        self.certs.get(&cert_id).cloned()
    }

    pub fn get_certificate_by_hash(&self, artwork_hash: &[u8]) -> Option<Certificate> {
        self.cert_by_hash
            .get(artwork_hash)
            .and_then(|id| self.certs.get(id))
            .cloned()
    }

    pub fn get_transfer_history(&self, cert_id: u64) -> Vec<TransferRecord> {
        self.transfers.get(&cert_id).cloned().unwrap_or_default()
    }

    pub fn get_certificate_count(&self) -> u64 {
        self.next_cert_id
    }

    pub fn get_event(&self, event_id: u64) -> Option<EventLogEntry> {
        self.event_log.get(&event_id).cloned()
    }

    pub fn get_event_count(&self) -> u64 {
        self.next_event_id
    }

    // --- Internal ---

    fn check_authority(&self, caller: &AccountId) -> Result<(), CertificateError> {
        match &self.authority {
            Some(authority) if authority == caller => Ok(()),
            _ => Err(CertificateError::InvalidAuthority),
        }
    }

    fn record_event(&mut self, kind: &str, subject: u64, actor: &AccountId) {
        let id = self.next_event_id;
        self.event_log.insert(
            id,
            EventLogEntry {
                id,
                kind: kind.to_string(),
                subject,
                actor: actor.clone(),
                timestamp: env::block_height(),
            },
        );
        self.next_event_id += 1;
    }
}

impl Default for CertificateRegistryState {
    fn default() -> Self {
        Self::new()
    }
}

/// The system account and the contract itself are burn sinks, not principals.
fn is_valid_authority(account: &AccountId) -> bool {
    account.as_str() != "system" && account != &env::current_account_id()
}

pub(crate) fn encode_hash(hash: &[u8]) -> String {
    near_sdk::base64::engine::general_purpose::STANDARD.encode(hash)
}
