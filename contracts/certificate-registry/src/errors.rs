use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::{env, FunctionError};
use near_sdk_macros::NearSchema;

#[derive(Debug, PartialEq, NearSchema, BorshSerialize, BorshDeserialize)]
#[abi(borsh)]
pub enum CertificateError {
    InvalidAuthority,
    NotAuthorized,
    InvalidFee,
    InvalidHash,
    InvalidMetadata,
    CertAlreadyIssued,
    CertNotFound,
    InvalidStatus,
    MaxCertsExceeded,
    InsufficientBalance,
}

impl FunctionError for CertificateError {
    fn panic(&self) -> ! {
        env::panic_str(match self {
            CertificateError::InvalidAuthority => "Authority not set or invalid",
            CertificateError::NotAuthorized => "Caller is not authorized",
            CertificateError::InvalidFee => "Invalid fee or rate",
            CertificateError::InvalidHash => "Artwork hash must be exactly 32 bytes",
            CertificateError::InvalidMetadata => "Metadata or URI length out of range",
            CertificateError::CertAlreadyIssued => "Certificate already issued for this hash",
            CertificateError::CertNotFound => "Certificate not found",
            CertificateError::InvalidStatus => "Certificate is not in the required status",
            CertificateError::MaxCertsExceeded => "Capacity limit reached",
            CertificateError::InsufficientBalance => "Attached deposit is insufficient",
        })
    }
}
