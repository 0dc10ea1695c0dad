//! Royalty ledger for digital artworks: per-NFT royalty policies with exact
//! basis-point splits between artist and platform on every resale.

use crate::errors::RoyaltyError;
use crate::state::RoyaltyLedgerState;
use crate::types::{Distribution, EventLogEntry, RoyaltyPolicy};
use near_sdk::json_types::U128;
use near_sdk::{env, near, AccountId, PanicOnDefault};

pub mod errors;
mod events;
pub mod state;
pub mod types;

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct RoyaltyLedger {
    state: RoyaltyLedgerState,
}

#[near]
impl RoyaltyLedger {
    #[init]
    pub fn new() -> Self {
        Self {
            state: RoyaltyLedgerState::new(),
        }
    }

    // --- Configuration ---

    #[handle_result]
    pub fn set_authority(&mut self, new_authority: AccountId) -> Result<(), RoyaltyError> {
        self.state
            .set_authority(&env::predecessor_account_id(), new_authority)
    }

    #[handle_result]
    pub fn set_platform_fee_rate(&mut self, rate_bps: u32) -> Result<(), RoyaltyError> {
        self.state
            .set_platform_fee_rate(&env::predecessor_account_id(), rate_bps)
    }

    #[handle_result]
    pub fn set_registration_fee(&mut self, fee: U128) -> Result<(), RoyaltyError> {
        self.state
            .set_registration_fee(&env::predecessor_account_id(), fee.0)
    }

    // --- Policies ---

    #[payable]
    #[handle_result]
    pub fn set_royalty(
        &mut self,
        nft_id: u64,
        rate_bps: u32,
        platform_share_bps: u32,
    ) -> Result<u64, RoyaltyError> {
        self.state.set_royalty(
            &env::predecessor_account_id(),
            nft_id,
            rate_bps,
            platform_share_bps,
        )
    }

    #[handle_result]
    pub fn update_royalty(
        &mut self,
        policy_id: u64,
        new_rate_bps: Option<u32>,
        new_platform_share_bps: Option<u32>,
    ) -> Result<(), RoyaltyError> {
        self.state.update_royalty(
            &env::predecessor_account_id(),
            policy_id,
            new_rate_bps,
            new_platform_share_bps,
        )
    }

    #[payable]
    #[handle_result]
    pub fn distribute_royalty(
        &mut self,
        policy_id: u64,
        sale_amount: U128,
        buyer: AccountId,
        seller: AccountId,
    ) -> Result<U128, RoyaltyError> {
        self.state
            .distribute_royalty(
                &env::predecessor_account_id(),
                policy_id,
                sale_amount.0,
                buyer,
                seller,
            )
            .map(U128)
    }

    #[handle_result]
    pub fn deactivate_royalty(&mut self, policy_id: u64) -> Result<(), RoyaltyError> {
        self.state
            .deactivate_royalty(&env::predecessor_account_id(), policy_id)
    }

    // --- Views ---

    pub fn get_royalty(&self, policy_id: u64) -> Option<RoyaltyPolicy> {
        self.state.get_royalty(policy_id)
    }

    pub fn get_royalty_by_nft(&self, nft_id: u64) -> Option<RoyaltyPolicy> {
        self.state.get_royalty_by_nft(nft_id)
    }

    pub fn royalty_exists(&self, nft_id: u64) -> bool {
        self.state.royalty_exists(nft_id)
    }

    pub fn get_policy_count(&self) -> u64 {
        self.state.get_policy_count()
    }

    pub fn get_total_collected(&self, policy_id: u64) -> Option<U128> {
        self.state.get_total_collected(policy_id)
    }

    pub fn get_distributions(&self, policy_id: u64) -> Vec<Distribution> {
        self.state.get_distributions(policy_id)
    }

    pub fn get_authority(&self) -> Option<AccountId> {
        self.state.authority.clone()
    }

    pub fn get_platform_fee_rate(&self) -> u32 {
        self.state.platform_fee_bps
    }

    pub fn get_registration_fee(&self) -> U128 {
        U128(self.state.registration_fee)
    }

    pub fn get_event(&self, event_id: u64) -> Option<EventLogEntry> {
        self.state.get_event(event_id)
    }

    pub fn get_event_count(&self) -> u64 {
        self.state.get_event_count()
    }
}
