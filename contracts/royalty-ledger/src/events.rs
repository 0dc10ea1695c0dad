use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

#[near(event_json(standard = "nep297"))]
pub enum RoyaltyEvent {
    #[event_version("1.0.0")]
    AuthoritySet { authority: AccountId },
    #[event_version("1.0.0")]
    PlatformFeeRateUpdated { authority: AccountId, rate_bps: u32 },
    #[event_version("1.0.0")]
    RegistrationFeeUpdated { authority: AccountId, fee: U128 },
    #[event_version("1.0.0")]
    RoyaltySet {
        policy_id: u64,
        nft_id: u64,
        rate_bps: u32,
        platform_share_bps: u32,
        artist: AccountId,
        timestamp: u64,
    },
    #[event_version("1.0.0")]
    RoyaltyUpdated {
        policy_id: u64,
        rate_bps: u32,
        platform_share_bps: u32,
        timestamp: u64,
    },
    #[event_version("1.0.0")]
    RoyaltyDistributed {
        policy_id: u64,
        sale_amount: U128,
        gross_royalty: U128,
        artist_received: U128,
        platform_received: U128,
        buyer: AccountId,
        seller: AccountId,
        timestamp: u64,
    },
    #[event_version("1.0.0")]
    RoyaltyDeactivated { policy_id: u64, timestamp: u64 },
}
