use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

#[near(event_json(standard = "nep297"))]
pub enum CertificateEvent {
    #[event_version("1.0.0")]
    AuthoritySet { authority: AccountId },
    #[event_version("1.0.0")]
    IssuanceFeeUpdated { authority: AccountId, fee: U128 },
    #[event_version("1.0.0")]
    PlatformFeeRateUpdated { authority: AccountId, rate_bps: u32 },
    #[event_version("1.0.0")]
    MaxCertsUpdated { authority: AccountId, max_certs: u64 },
    #[event_version("1.0.0")]
    CertificateIssued {
        cert_id: u64,
        artist: AccountId,
        artwork_hash: String,
        fee: U128,
        timestamp: u64,
    },
    #[event_version("1.0.0")]
    CertificateRevoked {
        cert_id: u64,
        artist: AccountId,
        timestamp: u64,
    },
    #[event_version("1.0.0")]
    CertificateTransferLogged {
        cert_id: u64,
        from: AccountId,
        to: AccountId,
        timestamp: u64,
    },
}
