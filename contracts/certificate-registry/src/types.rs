use near_sdk::{near, AccountId};

/// Exact required length of an artwork content digest.
pub const ARTWORK_HASH_LEN: usize = 32;
/// Metadata must be non-empty and fit in this many characters.
pub const MAX_METADATA_LEN: usize = 512;
pub const MAX_CERT_URI_LEN: usize = 256;
/// Hard cap on custody-claim entries per certificate.
pub const MAX_TRANSFER_RECORDS: usize = 50;
/// Platform fee rate ceiling, in basis points.
pub const MAX_PLATFORM_FEE_BPS: u32 = 1_000;

#[derive(Clone, Debug, PartialEq)]
#[near(serializers = [json, borsh])]
pub enum CertStatus {
    Active,
    Revoked,
}

/// An issued, revocable attestation binding an artist to an artwork digest.
#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct Certificate {
    pub id: u64,
    pub artist: AccountId,
    pub artwork_hash: Vec<u8>,
    pub metadata: String,
    pub issued_at: u64,
    pub status: CertStatus,
    pub revoked_at: Option<u64>,
    pub cert_uri: String,
}

/// A custody claim logged against a certificate. Distinct from on-chain
/// token ownership; this is the artist-facing paper trail.
#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct TransferRecord {
    pub from: AccountId,
    pub to: AccountId,
    pub timestamp: u64,
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
