//! Tests for key pair provisioning and removal.

#![allow(clippy::expect_used)]

use stackctl::application::services::key_pair::{KeyPairOutcome, ensure, remove};
use stackctl::domain::DeployError;

use crate::helpers::{MemoryKeyStore, MockAws, RecordingReporter, err_output, ok_output};

const NAME: &str = "ml-platform-dev-key";

#[tokio::test]
async fn creates_and_stores_missing_key_pair() {
    let aws = MockAws::healthy();
    let keys = MemoryKeyStore::new();

    let outcome = ensure(&aws, &keys, &RecordingReporter::default(), NAME)
        .await
        .expect("ensure");

    assert!(matches!(outcome, KeyPairOutcome::Created { .. }));
    // Trailing newline is trimmed before writing.
    let pem = keys.pem(NAME).expect("stored");
    assert!(pem.ends_with("-----END RSA PRIVATE KEY-----"));
}

#[tokio::test]
async fn empty_key_material_is_rejected() {
    let aws = MockAws {
        create_key_pair: ok_output(b"\n"),
        ..MockAws::healthy()
    };
    let keys = MemoryKeyStore::new();

    let err = ensure(&aws, &keys, &RecordingReporter::default(), NAME)
        .await
        .expect_err("no material");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::KeyPairCreation { name, .. }) if name == NAME
    ));
    assert!(keys.pem(NAME).is_none());
}

#[tokio::test]
async fn existing_key_pair_reports_local_key() {
    let aws = MockAws::with_existing_key_pair();
    let keys = MemoryKeyStore::with_key(NAME);

    let outcome = ensure(&aws, &keys, &RecordingReporter::default(), NAME)
        .await
        .expect("ensure");

    assert_eq!(aws.calls(), vec!["describe_key_pair"]);
    assert_eq!(
        outcome,
        KeyPairOutcome::Existing {
            local_key: Some("/keys/ml-platform-dev-key.pem".into())
        }
    );
}

#[tokio::test]
async fn remove_deletes_remote_and_local() {
    let aws = MockAws::healthy();
    let keys = MemoryKeyStore::with_key(NAME);

    let removed = remove(&aws, &keys, &RecordingReporter::default(), NAME)
        .await
        .expect("remove");

    assert!(removed);
    assert_eq!(aws.calls(), vec!["delete_key_pair"]);
}

#[tokio::test]
async fn remove_without_local_key_reports_false() {
    let removed = remove(
        &MockAws::healthy(),
        &MemoryKeyStore::new(),
        &RecordingReporter::default(),
        NAME,
    )
    .await
    .expect("remove");
    assert!(!removed);
}

#[tokio::test]
async fn remote_delete_failure_keeps_local_key() {
    let aws = MockAws {
        delete_key_pair: err_output(254, b"UnauthorizedOperation"),
        ..MockAws::healthy()
    };
    let keys = MemoryKeyStore::with_key(NAME);

    let err = remove(&aws, &keys, &RecordingReporter::default(), NAME)
        .await
        .expect_err("denied");

    assert_eq!(
        err.downcast_ref::<DeployError>().map(DeployError::code),
        Some("KEY_PAIR_DELETE_FAILED")
    );
    assert!(keys.pem(NAME).is_some());
}
