use crate::errors::RoyaltyError;
use crate::events::RoyaltyEvent;
use crate::types::{
    Distribution, EventLogEntry, PolicyStatus, RoyaltyPolicy, MAX_BPS, MAX_DISTRIBUTIONS,
    MAX_PLATFORM_FEE_BPS,
};
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::json_types::U128;
use near_sdk::store::LookupMap;
use near_sdk::{env, log, AccountId, BorshStorageKey, NearToken, Promise};

const DEFAULT_MAX_POLICIES: u64 = 10_000;
/// Charged once when a policy is registered; 0.1 NEAR.
const DEFAULT_REGISTRATION_FEE: u128 = 100_000_000_000_000_000_000_000;

#[derive(BorshSerialize, BorshDeserialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
pub enum StorageKey {
    Policies,
    PolicyByNft,
    Distributions,
    EventLog,
}

#[derive(BorshSerialize, BorshDeserialize, near_sdk_macros::NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct RoyaltyLedgerState {
    pub version: String,
    /// Platform principal; set exactly once via `set_authority`.
    pub authority: Option<AccountId>,
    pub platform_fee_bps: u32,
    /// Charged to the artist at `set_royalty`, in yoctoNEAR.
    pub registration_fee: u128,
    pub max_policies: u64,
    pub next_policy_id: u64,
    pub policies: LookupMap<u64, RoyaltyPolicy>,
    /// nft_id -> policy id. Never cleared, even on deactivation: an nft_id
    /// is claimable exactly once for the lifetime of the ledger.
    pub policy_by_nft: LookupMap<u64, u64>,
    pub distributions: LookupMap<u64, Vec<Distribution>>,
    pub event_log: LookupMap<u64, EventLogEntry>,
    pub next_event_id: u64,
}

impl RoyaltyLedgerState {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            authority: None,
            platform_fee_bps: 0,
            registration_fee: DEFAULT_REGISTRATION_FEE,
            max_policies: DEFAULT_MAX_POLICIES,
            next_policy_id: 0,
            policies: LookupMap::new(StorageKey::Policies),
            policy_by_nft: LookupMap::new(StorageKey::PolicyByNft),
            distributions: LookupMap::new(StorageKey::Distributions),
            event_log: LookupMap::new(StorageKey::EventLog),
            next_event_id: 0,
        }
    }

    // --- Configuration ---

    pub fn set_authority(
        &mut self,
        caller: &AccountId,
        new_authority: AccountId,
    ) -> Result<(), RoyaltyError> {
        if self.authority.is_some() {
            return Err(RoyaltyError::InvalidAuthority);
        }
        if new_authority.as_str() == "system" || new_authority == env::current_account_id() {
            return Err(RoyaltyError::InvalidAuthority);
        }
        log!("Setting ledger authority to {}", new_authority);
        self.authority = Some(new_authority.clone());
        self.record_event("authority_set", 0, caller);
        RoyaltyEvent::AuthoritySet {
            authority: new_authority,
        }
        .emit();
        Ok(())
    }

    pub fn set_platform_fee_rate(
        &mut self,
        caller: &AccountId,
        rate_bps: u32,
    ) -> Result<(), RoyaltyError> {
        self.check_authority(caller)?;
        if rate_bps > MAX_PLATFORM_FEE_BPS {
            return Err(RoyaltyError::InvalidFee);
        }
        self.platform_fee_bps = rate_bps;
        self.record_event("platform_fee_rate_updated", 0, caller);
        RoyaltyEvent::PlatformFeeRateUpdated {
            authority: caller.clone(),
            rate_bps,
        }
        .emit();
        Ok(())
    }

    pub fn set_registration_fee(
        &mut self,
        caller: &AccountId,
        fee: u128,
    ) -> Result<(), RoyaltyError> {
        self.check_authority(caller)?;
        self.registration_fee = fee;
        self.record_event("registration_fee_updated", 0, caller);
        RoyaltyEvent::RegistrationFeeUpdated {
            authority: caller.clone(),
            fee: U128(fee),
        }
        .emit();
        Ok(())
    }

    // --- Policies ---

    /// Registers the royalty policy for an NFT. The caller becomes the
    /// policy's artist and pays the registration fee from the attached
    /// deposit.
    pub fn set_royalty(
        &mut self,
        caller: &AccountId,
        nft_id: u64,
        rate_bps: u32,
        platform_share_bps: u32,
    ) -> Result<u64, RoyaltyError> {
        let authority = self
            .authority
            .clone()
            .ok_or(RoyaltyError::InvalidAuthority)?;
        if self.next_policy_id >= self.max_policies {
            return Err(RoyaltyError::MaxPoliciesExceeded);
        }
        if !valid_bps(rate_bps) || !valid_bps(platform_share_bps) {
            return Err(RoyaltyError::InvalidRate);
        }
        if self.policy_by_nft.contains_key(&nft_id) {
            return Err(RoyaltyError::RoyaltyAlreadySet);
        }
        let deposit = env::attached_deposit().as_yoctonear();
        if deposit < self.registration_fee {
            return Err(RoyaltyError::InsufficientBalance);
        }

        let policy_id = self.next_policy_id;
        let now = env::block_height();
        self.policies.insert(
            policy_id,
            RoyaltyPolicy {
                id: policy_id,
                nft_id,
                rate_bps,
                platform_share_bps,
                artist: caller.clone(),
                total_collected: U128(0),
                last_updated: now,
                status: PolicyStatus::Active,
            },
        );
        self.policy_by_nft.insert(nft_id, policy_id);
        self.distributions.insert(policy_id, Vec::new());
        self.next_policy_id += 1;

        self.record_event("royalty_set", policy_id, caller);
        RoyaltyEvent::RoyaltySet {
            policy_id,
            nft_id,
            rate_bps,
            platform_share_bps,
            artist: caller.clone(),
            timestamp: now,
        }
        .emit();

        if self.registration_fee > 0 {
            Promise::new(authority).transfer(NearToken::from_yoctonear(self.registration_fee));
        }
        let surplus = deposit - self.registration_fee;
        if surplus > 0 {
            Promise::new(caller.clone()).transfer(NearToken::from_yoctonear(surplus));
        }

        Ok(policy_id)
    }

    /// Updates rate and/or split on an active policy. Both fields are
    /// validated before either is written.
    pub fn update_royalty(
        &mut self,
        caller: &AccountId,
        policy_id: u64,
        new_rate_bps: Option<u32>,
        new_platform_share_bps: Option<u32>,
    ) -> Result<(), RoyaltyError> {
        self.check_artist_or_authority(caller, policy_id)?;
        if let Some(rate) = new_rate_bps {
            if !valid_bps(rate) {
                return Err(RoyaltyError::InvalidRate);
            }
        }
        if let Some(share) = new_platform_share_bps {
            if !valid_bps(share) {
                return Err(RoyaltyError::InvalidRate);
            }
        }

        let policy = self
            .policies
            .get_mut(&policy_id)
            .ok_or(RoyaltyError::NoRoyaltySet)?;
        if policy.status != PolicyStatus::Active {
            return Err(RoyaltyError::UpdateNotAllowed);
        }
        if let Some(rate) = new_rate_bps {
            policy.rate_bps = rate;
        }
        if let Some(share) = new_platform_share_bps {
            policy.platform_share_bps = share;
        }
        let now = env::block_height();
        policy.last_updated = now;
        let (rate_bps, platform_share_bps) = (policy.rate_bps, policy.platform_share_bps);

        self.record_event("royalty_updated", policy_id, caller);
        RoyaltyEvent::RoyaltyUpdated {
            policy_id,
            rate_bps,
            platform_share_bps,
            timestamp: now,
        }
        .emit();
        Ok(())
    }

    /// Executes the royalty leg of a sale. The gross royalty is taken from
    /// the attached deposit and split between artist and authority; the
    /// remainder of any basis-point rounding always goes to the artist.
    pub fn distribute_royalty(
        &mut self,
        caller: &AccountId,
        policy_id: u64,
        sale_amount: u128,
        buyer: AccountId,
        seller: AccountId,
    ) -> Result<u128, RoyaltyError> {
        if sale_amount == 0 {
            return Err(RoyaltyError::InvalidSaleAmount);
        }
        let policy = self
            .policies
            .get(&policy_id)
            .ok_or(RoyaltyError::NoRoyaltySet)?
            .clone();

        let gross_royalty = sale_amount
            .checked_mul(policy.rate_bps as u128)
            .ok_or(RoyaltyError::InvalidSaleAmount)?
            / MAX_BPS as u128;
        let platform_received = gross_royalty
            .checked_mul(policy.platform_share_bps as u128)
            .ok_or(RoyaltyError::InvalidSaleAmount)?
            / MAX_BPS as u128;
        let artist_received = gross_royalty - platform_received;

        let records = self
            .distributions
            .get_mut(&policy_id)
            .ok_or(RoyaltyError::NoRoyaltySet)?;
        if records.len() >= MAX_DISTRIBUTIONS {
            return Err(RoyaltyError::DistributionsFull);
        }
        let deposit = env::attached_deposit().as_yoctonear();
        if deposit < gross_royalty {
            return Err(RoyaltyError::InsufficientBalance);
        }

        let now = env::block_height();
        records.push(Distribution {
            amount: U128(sale_amount),
            timestamp: now,
            buyer: buyer.clone(),
            seller: seller.clone(),
            artist_received: U128(artist_received),
            platform_received: U128(platform_received),
        });
        let policy_mut = self
            .policies
            .get_mut(&policy_id)
            .ok_or(RoyaltyError::NoRoyaltySet)?;
        policy_mut.total_collected = U128(policy_mut.total_collected.0 + gross_royalty);

        self.record_event("royalty_distributed", policy_id, caller);
        RoyaltyEvent::RoyaltyDistributed {
            policy_id,
            sale_amount: U128(sale_amount),
            gross_royalty: U128(gross_royalty),
            artist_received: U128(artist_received),
            platform_received: U128(platform_received),
            buyer,
            seller,
            timestamp: now,
        }
        .emit();

        // Payouts last; the authority slot is guaranteed by set_royalty.
        if artist_received > 0 {
            Promise::new(policy.artist).transfer(NearToken::from_yoctonear(artist_received));
        }
        if platform_received > 0 {
            if let Some(authority) = self.authority.clone() {
                Promise::new(authority).transfer(NearToken::from_yoctonear(platform_received));
            }
        }
        let surplus = deposit - gross_royalty;
        if surplus > 0 {
            Promise::new(caller.clone()).transfer(NearToken::from_yoctonear(surplus));
        }

        Ok(gross_royalty)
    }

    /// Marks a policy Inactive. The nft_id index is deliberately left in
    /// place: the NFT can never be re-registered.
    pub fn deactivate_royalty(
        &mut self,
        caller: &AccountId,
        policy_id: u64,
    ) -> Result<(), RoyaltyError> {
        self.check_artist_or_authority(caller, policy_id)?;
        let policy = self
            .policies
            .get_mut(&policy_id)
            .ok_or(RoyaltyError::NoRoyaltySet)?;
        if policy.status != PolicyStatus::Active {
            return Err(RoyaltyError::UpdateNotAllowed);
        }
        let now = env::block_height();
        policy.status = PolicyStatus::Inactive;
        policy.last_updated = now;

        self.record_event("royalty_deactivated", policy_id, caller);
        RoyaltyEvent::RoyaltyDeactivated {
            policy_id,
            timestamp: now,
        }
        .emit();
        Ok(())
    }

    // --- Views ---

    pub fn get_royalty(&self, policy_id: u64) -> Option<RoyaltyPolicy> {
        self.policies.get(&policy_id).cloned()
    }

    pub fn get_royalty_by_nft(&self, nft_id: u64) -> Option<RoyaltyPolicy> {
        self.policy_by_nft
            .get(&nft_id)
            .and_then(|id| self.policies.get(id))
            .cloned()
    }

    pub fn royalty_exists(&self, nft_id: u64) -> bool {
        self.policy_by_nft.contains_key(&nft_id)
    }

    pub fn get_policy_count(&self) -> u64 {
        self.next_policy_id
    }

    pub fn get_total_collected(&self, policy_id: u64) -> Option<U128> {
        self.policies.get(&policy_id).map(|p| p.total_collected)
    }

    pub fn get_distributions(&self, policy_id: u64) -> Vec<Distribution> {
        self.distributions.get(&policy_id).cloned().unwrap_or_default()
    }

    pub fn get_event(&self, event_id: u64) -> Option<EventLogEntry> {
        self.event_log.get(&event_id).cloned()
    }

    pub fn get_event_count(&self) -> u64 {
        self.next_event_id
    }

    // --- Internal ---

    fn check_authority(&self, caller: &AccountId) -> Result<(), RoyaltyError> {
        match &self.authority {
            Some(authority) if authority == caller => Ok(()),
            _ => Err(RoyaltyError::InvalidAuthority),
        }
    }

    fn check_artist_or_authority(
        &self,
        caller: &AccountId,
        policy_id: u64,
    ) -> Result<(), RoyaltyError> {
        let policy = self
            .policies
            .get(&policy_id)
            .ok_or(RoyaltyError::NoRoyaltySet)?;
        let is_authority = self.authority.as_ref() == Some(caller);
        if &policy.artist != caller && !is_authority {
            return Err(RoyaltyError::NotAuthorized);
        }
        Ok(())
    }

    fn record_event(&mut self, kind: &str, subject: u64, actor: &AccountId) {
        let id = self.next_event_id;
        self.event_log.insert(
            id,
            EventLogEntry {
                id,
                kind: kind.to_string(),
                subject,
                actor: actor.clone(),
                timestamp: env::block_height(),
            },
        );
        self.next_event_id += 1;
    }
}

impl Default for RoyaltyLedgerState {
    fn default() -> Self {
        Self::new()
    }
}

fn valid_bps(bps: u32) -> bool {
    (1..=MAX_BPS).contains(&bps)
}
