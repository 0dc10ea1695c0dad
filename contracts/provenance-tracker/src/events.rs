use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

#[near(event_json(standard = "nep297"))]
pub enum ProvenanceEvent {
    #[event_version("1.0.0")]
    AdminTransferred {
        old_admin: AccountId,
        new_admin: AccountId,
        timestamp: u64,
    },
    #[event_version("1.0.0")]
    MaxHistoryLengthUpdated { admin: AccountId, max_length: u32 },
    #[event_version("1.0.0")]
    ProvenanceInitialized {
        nft_id: u64,
        owner: AccountId,
        timestamp: u64,
    },
    #[event_version("1.0.0")]
    TransferRecorded {
        nft_id: u64,
        from: AccountId,
        to: AccountId,
        transfer_type: String,
        price: Option<U128>,
        timestamp: u64,
    },
    #[event_version("1.0.0")]
    HistoryPruned {
        nft_id: u64,
        removed: u32,
        kept: u32,
        timestamp: u64,
    },
}
