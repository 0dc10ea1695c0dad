use crate::errors::ProvenanceError;
use crate::events::ProvenanceEvent;
use crate::types::{
    ChainVerification, EventLogEntry, ProvenanceEntry, ProvenanceRecord, ProvenanceSummary,
    TransferType, DEFAULT_MAX_HISTORY, MAX_HISTORY_CEILING,
};
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::json_types::U128;
use near_sdk::store::LookupMap;
use near_sdk::{env, log, AccountId, BorshStorageKey};

#[derive(BorshSerialize, BorshDeserialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
pub enum StorageKey {
    Records,
    EventLog,
}

#[derive(BorshSerialize, BorshDeserialize, near_sdk_macros::NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct ProvenanceTrackerState {
    pub version: String,
    /// Single mutable admin principal; seeded with the deployer, transferable.
    pub admin: AccountId,
    pub max_history_length: u32,
    pub records: LookupMap<u64, ProvenanceRecord>,
    pub event_log: LookupMap<u64, EventLogEntry>,
    pub next_event_id: u64,
}

impl ProvenanceTrackerState {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            admin: env::predecessor_account_id(),
            max_history_length: DEFAULT_MAX_HISTORY,
            records: LookupMap::new(StorageKey::Records),
            event_log: LookupMap::new(StorageKey::EventLog),
            next_event_id: 0,
        }
    }

    // --- Administration ---

    pub fn transfer_admin(
        &mut self,
        caller: &AccountId,
        new_admin: AccountId,
    ) -> Result<(), ProvenanceError> {
        self.check_admin(caller)?;
        if new_admin.as_str() == "system" || new_admin == env::current_account_id() {
            return Err(ProvenanceError::InvalidAdmin);
        }
        log!("Transferring admin from {} to {}", caller, new_admin);
        let old_admin = std::mem::replace(&mut self.admin, new_admin.clone());
        self.record_event("admin_transferred", 0, caller);
        ProvenanceEvent::AdminTransferred {
            old_admin,
            new_admin,
            timestamp: env::block_height(),
        }
        .emit();
        Ok(())
    }

    pub fn set_max_history_length(
        &mut self,
        caller: &AccountId,
        max_length: u32,
    ) -> Result<(), ProvenanceError> {
        self.check_admin(caller)?;
        if max_length == 0 || max_length > MAX_HISTORY_CEILING {
            return Err(ProvenanceError::InvalidHistoryLength);
        }
        self.max_history_length = max_length;
        self.record_event("max_history_length_updated", 0, caller);
        ProvenanceEvent::MaxHistoryLengthUpdated {
            admin: caller.clone(),
            max_length,
        }
        .emit();
        Ok(())
    }

    // --- Provenance ---

    /// Creates the record for an NFT with its mint entry. Open to any caller;
    /// keeping `initial_owner` aligned with real token ownership is the
    /// integrator's responsibility.
    pub fn initialize_provenance(
        &mut self,
        caller: &AccountId,
        nft_id: u64,
        initial_owner: AccountId,
    ) -> Result<u64, ProvenanceError> {
        if nft_id == 0 || self.records.contains_key(&nft_id) {
            return Err(ProvenanceError::InvalidNftId);
        }
        let now = env::block_height();
        self.records.insert(
            nft_id,
            ProvenanceRecord {
                current_owner: initial_owner.clone(),
                history: vec![ProvenanceEntry {
                    owner: initial_owner.clone(),
                    timestamp: now,
                    transfer_type: TransferType::Mint,
                    price: None,
                    from_owner: initial_owner.clone(),
                }],
            },
        );

        self.record_event("provenance_initialized", nft_id, caller);
        ProvenanceEvent::ProvenanceInitialized {
            nft_id,
            owner: initial_owner,
            timestamp: now,
        }
        .emit();
        Ok(nft_id)
    }

    /// Appends an ownership transition. Only the current owner of record may
    /// advance provenance.
    pub fn record_transfer(
        &mut self,
        caller: &AccountId,
        nft_id: u64,
        new_owner: AccountId,
        transfer_type: TransferType,
        price: Option<U128>,
    ) -> Result<(), ProvenanceError> {
        if nft_id == 0 {
            return Err(ProvenanceError::InvalidNftId);
        }
        if transfer_type == TransferType::Mint {
            return Err(ProvenanceError::InvalidTransferType);
        }
        if let Some(price) = price {
            if price.0 == 0 {
                return Err(ProvenanceError::InvalidPrice);
            }
        }
        let record = self
            .records
            .get_mut(&nft_id)
            .ok_or(ProvenanceError::ProvenanceNotFound)?;
        if &record.current_owner != caller {
            return Err(ProvenanceError::TransferorNotOwner);
        }
        if record.history.len() >= self.max_history_length as usize {
            return Err(ProvenanceError::HistoryFull);
        }

        let now = env::block_height();
        record.history.push(ProvenanceEntry {
            owner: new_owner.clone(),
            timestamp: now,
            transfer_type,
            price,
            from_owner: caller.clone(),
        });
        record.current_owner = new_owner.clone();

        self.record_event("transfer_recorded", nft_id, caller);
        ProvenanceEvent::TransferRecorded {
            nft_id,
            from: caller.clone(),
            to: new_owner,
            transfer_type: transfer_type_label(transfer_type).to_string(),
            price,
            timestamp: now,
        }
        .emit();
        Ok(())
    }

    /// Folds over the history checking every entry against the current clock
    /// and the price rule. Well-typed transfer kinds are guaranteed by
    /// construction.
    pub fn verify_chain(&self, nft_id: u64) -> Result<ChainVerification, ProvenanceError> {
        let record = self
            .records
            .get(&nft_id)
            .ok_or(ProvenanceError::ProvenanceNotFound)?;
        let now = env::block_height();
        for entry in &record.history {
            if entry.timestamp > now {
                return Err(ProvenanceError::ChainBroken);
            }
            if let Some(price) = entry.price {
                if price.0 == 0 {
                    return Err(ProvenanceError::ChainBroken);
                }
            }
        }
        Ok(ChainVerification {
            valid: true,
            length: record.history.len() as u32,
        })
    }

    pub fn get_provenance_summary(
        &self,
        nft_id: u64,
    ) -> Result<ProvenanceSummary, ProvenanceError> {
        let record = self
            .records
            .get(&nft_id)
            .ok_or(ProvenanceError::ProvenanceNotFound)?;
        // Initialization guarantees a non-empty history; pruning keeps >= 1.
        let first_entry = record.history[0].clone();
        let last_entry = record.history[record.history.len() - 1].clone();
        Ok(ProvenanceSummary {
            current_owner: record.current_owner.clone(),
            total_transfers: record.history.len() as u32 - 1,
            first_entry,
            last_entry,
        })
    }

    /// Admin-only, deliberately lossy archival: drops the oldest entries,
    /// keeping the most recent `keep_last`. May remove the mint entry; no
    /// synthetic mint is reintroduced. Returns how many entries were removed.
    pub fn prune_old_history(
        &mut self,
        caller: &AccountId,
        nft_id: u64,
        keep_last: u32,
    ) -> Result<u32, ProvenanceError> {
        self.check_admin(caller)?;
        if keep_last == 0 || keep_last > self.max_history_length {
            return Err(ProvenanceError::InvalidHistoryLength);
        }
        let record = self
            .records
            .get_mut(&nft_id)
            .ok_or(ProvenanceError::ProvenanceNotFound)?;
        let len = record.history.len();
        if len <= keep_last as usize {
            return Ok(0);
        }
        let removed = len - keep_last as usize;
        record.history.drain(..removed);

        self.record_event("history_pruned", nft_id, caller);
        ProvenanceEvent::HistoryPruned {
            nft_id,
            removed: removed as u32,
            kept: keep_last,
            timestamp: env::block_height(),
        }
        .emit();
        Ok(removed as u32)
    }

    // --- Views ---

    pub fn get_provenance(&self, nft_id: u64) -> Option<ProvenanceRecord> {
        self.records.get(&nft_id).cloned()
    }

    pub fn get_current_owner(&self, nft_id: u64) -> Option<AccountId> {
        self.records.get(&nft_id).map(|r| r.current_owner.clone())
    }

    pub fn get_history_length(&self, nft_id: u64) -> Option<u32> {
        self.records.get(&nft_id).map(|r| r.history.len() as u32)
    }

    pub fn get_event(&self, event_id: u64) -> Option<EventLogEntry> {
        self.event_log.get(&event_id).cloned()
    }

    pub fn get_event_count(&self) -> u64 {
        self.next_event_id
    }

    // --- Internal ---

    fn check_admin(&self, caller: &AccountId) -> Result<(), ProvenanceError> {
        if caller != &self.admin {
            return Err(ProvenanceError::NotAuthorized);
        }
        Ok(())
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

impl Default for ProvenanceTrackerState {
    fn default() -> Self {
        Self::new()
    }
}

fn transfer_type_label(transfer_type: TransferType) -> &'static str {
    match transfer_type {
        TransferType::Mint => "mint",
        TransferType::Sale => "sale",
        TransferType::Gift => "gift",
        TransferType::Auction => "auction",
    }
}
