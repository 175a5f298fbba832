//! End-to-end session scenarios against the in-memory ledger.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use common::{key_material, MockLedger};
use greeter_client::{
    derive_address, GreeterError, GreeterSession, KeyMaterial, SessionState, SessionStep, GREETING_SEED,
};
use parking_lot::Mutex;
use solana_sdk::signature::{Keypair, Signer};

fn copy_keys(payer: &Keypair, program: &Keypair) -> KeyMaterial {
    KeyMaterial::from_keypairs(payer.insecure_clone(), program.insecure_clone())
}

#[tokio::test]
async fn fresh_session_creates_then_greets() {
    let (keys, payer, program) = key_material();
    let ledger = Arc::new(MockLedger::new(program));
    let mut session = GreeterSession::new(ledger.clone(), keys, GREETING_SEED);

    let report = session.run().await.unwrap();

    assert_eq!(report.greeting_address, derive_address(&payer, GREETING_SEED, &program).unwrap());
    assert!(report.provision.created());
    assert_eq!(report.greet.counter, 1);
    assert_eq!(ledger.creations(), 1);
    assert_eq!(ledger.greets(), 1);

    let snap = session.snapshot();
    assert_eq!(snap.state, SessionState::GreetingConfirmed);
    assert_eq!(snap.last_counter, Some(1));
    assert_eq!(snap.last_signature, Some(report.greet.signature));
    assert!(!snap.in_flight);
}

#[tokio::test]
async fn repeat_session_reuses_account() {
    let payer = Keypair::new();
    let program = Keypair::new();
    let ledger = Arc::new(MockLedger::new(program.pubkey()));

    let mut first = GreeterSession::new(ledger.clone(), copy_keys(&payer, &program), GREETING_SEED);
    let one = first.run().await.unwrap();
    assert!(one.provision.created());

    // A new session with the same identities finds the same account.
    let mut second = GreeterSession::new(ledger.clone(), copy_keys(&payer, &program), GREETING_SEED);
    let two = second.run().await.unwrap();

    assert_eq!(one.greeting_address, two.greeting_address);
    assert!(!two.provision.created());
    assert_eq!(ledger.creations(), 1);
    assert_eq!(ledger.greets(), 2);
    assert_ne!(one.greet.counter, two.greet.counter);
    assert_eq!(two.greet.counter, 2);
}

#[tokio::test]
async fn observers_see_every_transition() {
    let (keys, _payer, program) = key_material();
    let ledger = Arc::new(MockLedger::new(program));
    let mut session = GreeterSession::new(ledger, keys, GREETING_SEED);

    let seen: Arc<Mutex<Vec<(String, bool)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    session.on_state_change(move |snap| sink.lock().push((snap.state.label().to_string(), snap.in_flight)));

    session.run().await.unwrap();

    let labels: Vec<String> = seen.lock().iter().map(|(l, _)| l.clone()).collect();
    let mut deduped = labels.clone();
    deduped.dedup();
    assert_eq!(
        deduped,
        vec!["address_known", "account_ready", "greeting_sent", "greeting_confirmed"]
    );
    assert!(seen.lock().iter().any(|(l, in_flight)| l == "greeting_sent" && *in_flight));
    assert_eq!(seen.lock().last().map(|(_, f)| *f), Some(false));
}

#[tokio::test]
async fn steps_require_their_prerequisites() {
    let (keys, _payer, program) = key_material();
    let ledger = Arc::new(MockLedger::new(program));
    let mut session = GreeterSession::new(ledger.clone(), keys, GREETING_SEED);

    assert_matches!(session.greet().await, Err(GreeterError::NotReady(_)));
    assert_matches!(session.ensure_account().await, Err(GreeterError::NotReady(_)));

    session.derive_address().unwrap();
    assert_matches!(session.greet().await, Err(GreeterError::NotReady(_)));
    assert_eq!(ledger.greets(), 0);
}

#[tokio::test]
async fn failed_greet_is_recoverable() {
    let (keys, _payer, program) = key_material();
    let ledger = Arc::new(MockLedger::new(program));
    let mut session = GreeterSession::new(ledger.clone(), keys, GREETING_SEED);
    session.derive_address().unwrap();
    session.ensure_account().await.unwrap();

    ledger.fail_next_send("blockhash not found");
    let err = session.greet().await.unwrap_err();
    assert_matches!(err, GreeterError::Submission(_));
    assert_matches!(session.state(), SessionState::Failed { step: SessionStep::Greet, .. });
    assert!(!session.snapshot().in_flight);

    let receipt = session.greet().await.unwrap();
    assert_eq!(receipt.counter, 1);
    assert_eq!(ledger.creations(), 1);
    assert_eq!(session.state(), &SessionState::GreetingConfirmed);
}

#[tokio::test]
async fn malformed_account_fails_read_without_defaulting() {
    let (keys, payer, program) = key_material();
    let ledger = Arc::new(MockLedger::new(program));
    let address = derive_address(&payer, GREETING_SEED, &program).unwrap();
    ledger.insert_account(address, program, vec![0, 0, 0]);

    let mut session = GreeterSession::new(ledger, keys, GREETING_SEED);
    session.derive_address().unwrap();

    let err = session.ensure_account().await.unwrap_err();
    assert_matches!(err, GreeterError::SchemaMismatch { expected: 4, actual: 3 });

    let err = session.refresh_counter().await.unwrap_err();
    assert_matches!(err, GreeterError::Deserialization(_));
    assert_eq!(session.snapshot().last_counter, None);
}
