use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::{env, FunctionError};
use near_sdk_macros::NearSchema;

#[derive(Debug, PartialEq, NearSchema, BorshSerialize, BorshDeserialize)]
#[abi(borsh)]
pub enum RoyaltyError {
    InvalidAuthority,
    NotAuthorized,
    InvalidFee,
    InvalidRate,
    RoyaltyAlreadySet,
    NoRoyaltySet,
    UpdateNotAllowed,
    InvalidSaleAmount,
    DistributionsFull,
    MaxPoliciesExceeded,
    InsufficientBalance,
}

impl FunctionError for RoyaltyError {
    fn panic(&self) -> ! {
        env::panic_str(match self {
            RoyaltyError::InvalidAuthority => "Authority not set or invalid",
            RoyaltyError::NotAuthorized => "Caller is not the artist or authority",
            RoyaltyError::InvalidFee => "Invalid fee or rate",
            RoyaltyError::InvalidRate => "Rate must be between 1 and 10000 basis points",
            RoyaltyError::RoyaltyAlreadySet => "A policy already exists for this NFT",
            RoyaltyError::NoRoyaltySet => "No royalty policy found",
            RoyaltyError::UpdateNotAllowed => "Policy is not active",
            RoyaltyError::InvalidSaleAmount => "Sale amount must be positive",
            RoyaltyError::DistributionsFull => "Distribution log is at capacity",
            RoyaltyError::MaxPoliciesExceeded => "Policy limit reached",
            RoyaltyError::InsufficientBalance => "Attached deposit is insufficient",
        })
    }
}
