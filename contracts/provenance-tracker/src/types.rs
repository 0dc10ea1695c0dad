use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

/// Default ownership-history cap per NFT; admin-adjustable.
pub const DEFAULT_MAX_HISTORY: u32 = 100;
/// Absolute ceiling for the admin-adjustable cap.
pub const MAX_HISTORY_CEILING: u32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq)]
#[near(serializers = [json, borsh])]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    Mint,
    Sale,
    Gift,
    Auction,
}

/// One ownership transition. `price` is absent for gifts and the mint entry;
/// when present it is always positive.
#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct ProvenanceEntry {
    pub owner: AccountId,
    pub timestamp: u64,
    pub transfer_type: TransferType,
    pub price: Option<U128>,
    pub from_owner: AccountId,
}

/// Append-only ownership history for one NFT. `current_owner` always equals
/// the owner of the last history entry. After an administrative prune the
/// first entry is not necessarily the mint.
#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct ProvenanceRecord {
    pub current_owner: AccountId,
    pub history: Vec<ProvenanceEntry>,
}

#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct ChainVerification {
    pub valid: bool,
    pub length: u32,
}

#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct ProvenanceSummary {
    pub current_owner: AccountId,
    pub total_transfers: u32,
    pub first_entry: ProvenanceEntry,
    pub last_entry: ProvenanceEntry,
}

/// Immutable audit entry persisted for every state-changing call.
/// Observational only; contract logic never reads these back.
#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct EventLogEntry {
    pub id: u64,
    pub kind: String,
    pub subject: u64,
    pub actor: AccountId,
    pub timestamp: u64,
}
