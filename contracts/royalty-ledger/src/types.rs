use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

/// Full scale for basis-point rates.
pub const MAX_BPS: u32 = 10_000;
/// Platform fee rate ceiling, in basis points.
pub const MAX_PLATFORM_FEE_BPS: u32 = 1_000;
/// Hard cap on distribution records per policy.
pub const MAX_DISTRIBUTIONS: usize = 200;

#[derive(Clone, Debug, PartialEq)]
#[near(serializers = [json, borsh])]
pub enum PolicyStatus {
    Active,
    Inactive,
}

/// Rate/split configuration governing resale royalties for one NFT.
/// At most one policy per nft_id for the lifetime of the ledger.
#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct RoyaltyPolicy {
    pub id: u64,
    pub nft_id: u64,
    pub rate_bps: u32,
    pub platform_share_bps: u32,
    pub artist: AccountId,
    /// Sum of every gross royalty ever distributed; never decreases.
    pub total_collected: U128,
    pub last_updated: u64,
    pub status: PolicyStatus,
}

/// One executed royalty distribution. artist_received + platform_received
/// always equals the gross royalty for the sale.
#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct Distribution {
    pub amount: U128,
    pub timestamp: u64,
    pub buyer: AccountId,
    pub seller: AccountId,
    pub artist_received: U128,
    pub platform_received: U128,
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
