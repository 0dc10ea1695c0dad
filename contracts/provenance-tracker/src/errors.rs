use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::{env, FunctionError};
use near_sdk_macros::NearSchema;

#[derive(Debug, PartialEq, NearSchema, BorshSerialize, BorshDeserialize)]
#[abi(borsh)]
pub enum ProvenanceError {
    NotAuthorized,
    InvalidAdmin,
    InvalidNftId,
    InvalidTransferType,
    InvalidPrice,
    ProvenanceNotFound,
    TransferorNotOwner,
    HistoryFull,
    InvalidHistoryLength,
    ChainBroken,
}

impl FunctionError for ProvenanceError {
    fn panic(&self) -> ! {
        env::panic_str(match self {
            ProvenanceError::NotAuthorized => "Caller is not the admin",
            ProvenanceError::InvalidAdmin => "New admin must be a standard account",
            ProvenanceError::InvalidNftId => "NFT id is zero or already initialized",
            ProvenanceError::InvalidTransferType => "Transfer type must be sale, gift, or auction",
            ProvenanceError::InvalidPrice => "Price must be positive when present",
            ProvenanceError::ProvenanceNotFound => "No provenance record for this NFT",
            ProvenanceError::TransferorNotOwner => "Only the current owner may record a transfer",
            ProvenanceError::HistoryFull => "Ownership history is at capacity",
            ProvenanceError::InvalidHistoryLength => "History length out of allowed range",
            ProvenanceError::ChainBroken => "Provenance chain failed verification",
        })
    }
}
