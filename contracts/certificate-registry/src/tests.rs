use crate::errors::CertificateError;
use crate::state::CertificateRegistryState;
use crate::types::{CertStatus, MAX_TRANSFER_RECORDS};
use near_sdk::test_utils::{accounts, VMContextBuilder};
use near_sdk::{testing_env, AccountId, NearToken};

fn setup_context(predecessor: &AccountId) -> VMContextBuilder {
    let mut context = VMContextBuilder::new();
    context
        .predecessor_account_id(predecessor.clone())
        .current_account_id("certs.testnet".parse().unwrap())
        .block_height(100);
    context
}

fn setup_state() -> CertificateRegistryState {
    testing_env!(setup_context(&accounts(0)).build());
    CertificateRegistryState::new()
}

/// Authority accounts(1), issuance fee 500 yocto, artist accounts(2) with the
/// fee attached.
fn setup_issuing_state() -> (CertificateRegistryState, AccountId, AccountId) {
    let mut state = setup_state();
    let authority = accounts(1);
    let artist = accounts(2);
    state.set_authority(&accounts(0), authority.clone()).unwrap();
    state.set_issuance_fee(&authority, 500).unwrap();
    testing_env!(setup_context(&artist)
        .attached_deposit(NearToken::from_yoctonear(500))
        .build());
    (state, authority, artist)
}

fn hash(byte: u8) -> Vec<u8> {
    vec![byte; 32]
}

#[test]
fn test_set_authority_once() {
    let mut state = setup_state();
    state.set_authority(&accounts(0), accounts(1)).unwrap();
    assert_eq!(state.authority, Some(accounts(1)));

    let result = state.set_authority(&accounts(0), accounts(2));
    assert_eq!(result, Err(CertificateError::InvalidAuthority));
    assert_eq!(state.authority, Some(accounts(1)), "First set must stick");
}

#[test]
fn test_set_authority_rejects_burn_principals() {
    let mut state = setup_state();
    let result = state.set_authority(&accounts(0), "system".parse().unwrap());
    assert_eq!(result, Err(CertificateError::InvalidAuthority));

    let result = state.set_authority(&accounts(0), "certs.testnet".parse().unwrap());
    assert_eq!(result, Err(CertificateError::InvalidAuthority));
    assert_eq!(state.authority, None);
}

#[test]
fn test_config_gated_on_authority() {
    let mut state = setup_state();
    assert_eq!(
        state.set_issuance_fee(&accounts(0), 500),
        Err(CertificateError::InvalidAuthority),
        "Config before set_authority must fail"
    );

    state.set_authority(&accounts(0), accounts(1)).unwrap();
    assert_eq!(
        state.set_issuance_fee(&accounts(2), 500),
        Err(CertificateError::InvalidAuthority),
        "Non-authority caller must fail"
    );
    state.set_issuance_fee(&accounts(1), 500).unwrap();
    assert_eq!(state.issuance_fee, 500);

    assert_eq!(
        state.set_platform_fee_rate(&accounts(1), 1_001),
        Err(CertificateError::InvalidFee)
    );
    state.set_platform_fee_rate(&accounts(1), 250).unwrap();
    assert_eq!(state.platform_fee_bps, 250);

    assert_eq!(
        state.set_max_certs(&accounts(1), 0),
        Err(CertificateError::MaxCertsExceeded)
    );
    state.set_max_certs(&accounts(1), 5).unwrap();
    assert_eq!(state.max_certs, 5);
}

#[test]
fn test_issue_certificate() {
    let (mut state, _, artist) = setup_issuing_state();

    let cert_id = state
        .issue_certificate(&artist, hash(7), "Sunset Over Water".into(), "ipfs://cert/0".into())
        .unwrap();
    assert_eq!(cert_id, 0, "Ids start at zero");

    let cert = state.get_certificate(0).unwrap();
    assert_eq!(cert.artist, artist);
    assert_eq!(cert.status, CertStatus::Active);
    assert_eq!(cert.issued_at, 100);
    assert_eq!(cert.revoked_at, None);
    assert_eq!(state.get_certificate_count(), 1);

    let by_hash = state.get_certificate_by_hash(&hash(7)).unwrap();
    assert_eq!(by_hash.id, 0);
    assert!(state.get_transfer_history(0).is_empty());
    assert!(state.verify_certificate(0).unwrap());
}

#[test]
fn test_issue_requires_authority_set() {
    let mut state = setup_state();
    let result = state.issue_certificate(&accounts(2), hash(1), "art".into(), String::new());
    assert_eq!(result, Err(CertificateError::InvalidAuthority));
}

#[test]
fn test_issue_duplicate_hash_rejected() {
    let (mut state, _, artist) = setup_issuing_state();
    state
        .issue_certificate(&artist, hash(7), "first".into(), String::new())
        .unwrap();

    let result = state.issue_certificate(&artist, hash(7), "second".into(), String::new());
    assert_eq!(result, Err(CertificateError::CertAlreadyIssued));
    assert_eq!(
        state.get_certificate_count(),
        1,
        "Counter must not advance on a failed call"
    );
}

#[test]
fn test_issue_validates_hash_and_metadata() {
    let (mut state, _, artist) = setup_issuing_state();

    let result = state.issue_certificate(&artist, vec![1; 31], "art".into(), String::new());
    assert_eq!(result, Err(CertificateError::InvalidHash));

    let result = state.issue_certificate(&artist, hash(1), String::new(), String::new());
    assert_eq!(result, Err(CertificateError::InvalidMetadata));

    let result = state.issue_certificate(&artist, hash(1), "m".repeat(513), String::new());
    assert_eq!(result, Err(CertificateError::InvalidMetadata));

    let result = state.issue_certificate(&artist, hash(1), "art".into(), "u".repeat(257));
    assert_eq!(result, Err(CertificateError::InvalidMetadata));
    assert_eq!(state.get_certificate_count(), 0);
}

#[test]
fn test_issue_insufficient_deposit() {
    let (mut state, _, artist) = setup_issuing_state();
    testing_env!(setup_context(&artist)
        .attached_deposit(NearToken::from_yoctonear(499))
        .build());

    let result = state.issue_certificate(&artist, hash(7), "art".into(), String::new());
    assert_eq!(result, Err(CertificateError::InsufficientBalance));
    assert_eq!(state.get_certificate_count(), 0);
}

#[test]
fn test_issue_respects_max_certs() {
    let (mut state, authority, artist) = setup_issuing_state();
    testing_env!(setup_context(&authority).build());
    state.set_max_certs(&authority, 1).unwrap();

    testing_env!(setup_context(&artist)
        .attached_deposit(NearToken::from_yoctonear(500))
        .build());
    state
        .issue_certificate(&artist, hash(1), "one".into(), String::new())
        .unwrap();
    let result = state.issue_certificate(&artist, hash(2), "two".into(), String::new());
    assert_eq!(result, Err(CertificateError::MaxCertsExceeded));
}

#[test]
fn test_revoke_certificate_one_way() {
    let (mut state, _, artist) = setup_issuing_state();
    state
        .issue_certificate(&artist, hash(7), "art".into(), String::new())
        .unwrap();

    assert_eq!(
        state.revoke_certificate(&accounts(3), 0),
        Err(CertificateError::NotAuthorized),
        "Only the artist of record may revoke"
    );

    state.revoke_certificate(&artist, 0).unwrap();
    let cert = state.get_certificate(0).unwrap();
    assert_eq!(cert.status, CertStatus::Revoked);
    assert_eq!(cert.revoked_at, Some(100));
    assert!(!state.verify_certificate(0).unwrap());

    assert_eq!(
        state.revoke_certificate(&artist, 0),
        Err(CertificateError::InvalidStatus),
        "Revocation is irreversible and unrepeatable"
    );
}

#[test]
fn test_revoke_missing_certificate() {
    let mut state = setup_state();
    assert_eq!(
        state.revoke_certificate(&accounts(2), 9),
        Err(CertificateError::CertNotFound)
    );
    assert_eq!(
        state.verify_certificate(9),
        Err(CertificateError::CertNotFound)
    );
}

#[test]
fn test_transfer_rejects_self_and_revoked() {
    let (mut state, _, artist) = setup_issuing_state();
    state
        .issue_certificate(&artist, hash(7), "art".into(), String::new())
        .unwrap();

    assert_eq!(
        state.transfer_certificate(&artist, 0, artist.clone()),
        Err(CertificateError::NotAuthorized),
        "Self-transfer is rejected"
    );

    state.transfer_certificate(&artist, 0, accounts(3)).unwrap();
    let history = state.get_transfer_history(0);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].from, artist);
    assert_eq!(history[0].to, accounts(3));
    assert_eq!(history[0].timestamp, 100);

    state.revoke_certificate(&artist, 0).unwrap();
    assert_eq!(
        state.transfer_certificate(&artist, 0, accounts(4)),
        Err(CertificateError::InvalidStatus),
        "Revoked certificates accept no further custody claims"
    );
}

#[test]
fn test_transfer_log_capacity() {
    let (mut state, _, artist) = setup_issuing_state();
    state
        .issue_certificate(&artist, hash(7), "art".into(), String::new())
        .unwrap();

    for _ in 0..MAX_TRANSFER_RECORDS {
        state.transfer_certificate(&artist, 0, accounts(3)).unwrap();
    }
    assert_eq!(state.get_transfer_history(0).len(), MAX_TRANSFER_RECORDS);
    assert_eq!(
        state.transfer_certificate(&artist, 0, accounts(3)),
        Err(CertificateError::MaxCertsExceeded)
    );
}

#[test]
fn test_event_log_appends_per_mutation() {
    let (mut state, _, artist) = setup_issuing_state();
    let before = state.get_event_count();

    state
        .issue_certificate(&artist, hash(7), "art".into(), String::new())
        .unwrap();
    state.revoke_certificate(&artist, 0).unwrap();

    assert_eq!(state.get_event_count(), before + 2);
    let issued = state.get_event(before).unwrap();
    assert_eq!(issued.kind, "certificate_issued");
    assert_eq!(issued.subject, 0);
    assert_eq!(issued.actor, artist);
    assert_eq!(issued.timestamp, 100);
    let revoked = state.get_event(before + 1).unwrap();
    assert_eq!(revoked.kind, "certificate_revoked");
}

#[test]
fn test_issue_emits_nep297_event() {
    let (mut state, _, artist) = setup_issuing_state();
    state
        .issue_certificate(&artist, hash(7), "art".into(), String::new())
        .unwrap();

    let logs = near_sdk::test_utils::get_logs();
    let event_log = logs
        .iter()
        .find(|l| l.starts_with("EVENT_JSON:"))
        .expect("expected an EVENT_JSON log");
    let payload: serde_json::Value =
        serde_json::from_str(event_log.trim_start_matches("EVENT_JSON:")).unwrap();
    assert_eq!(payload["standard"], "nep297");
    assert_eq!(payload["event"], "certificate_issued");
    assert_eq!(payload["data"]["cert_id"], 0);
    assert_eq!(payload["data"]["artist"], artist.to_string());
}

#[test]
fn test_end_to_end_issue_revoke_transfer() {
    // Authority set; artist issues with fee 500 attached; cert id 0 Active;
    // artist revokes; any further transfer fails InvalidStatus.
    let mut state = setup_state();
    let authority: AccountId = "st2auth.testnet".parse().unwrap();
    let artist: AccountId = "st1artist.testnet".parse().unwrap();
    state.set_authority(&accounts(0), authority.clone()).unwrap();
    state.set_issuance_fee(&authority, 500).unwrap();

    testing_env!(setup_context(&artist)
        .attached_deposit(NearToken::from_yoctonear(500))
        .build());
    let cert_id = state
        .issue_certificate(&artist, hash(9), "genesis".into(), "ipfs://cert/9".into())
        .unwrap();
    assert_eq!(cert_id, 0);
    assert_eq!(state.get_certificate(0).unwrap().status, CertStatus::Active);

    state.revoke_certificate(&artist, 0).unwrap();
    assert_eq!(
        state.transfer_certificate(&artist, 0, accounts(5)),
        Err(CertificateError::InvalidStatus)
    );
}
