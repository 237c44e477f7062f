//! Tests for the `cleanup` application service.

#![allow(clippy::expect_used)]

use stackctl::application::services::cleanup::{CleanupOutcome, cleanup};
use stackctl::domain::{DeployConfig, DeployError, StackError};

use crate::helpers::{MemoryKeyStore, MockAws, RecordingReporter, ScriptedPrompt, err_output};

#[tokio::test]
async fn declined_confirmation_touches_nothing() {
    let aws = MockAws {
        version: None,
        ..MockAws::healthy()
    };
    let prompt = ScriptedPrompt::new(&[false]);

    let outcome = cleanup(
        &aws,
        &MemoryKeyStore::new(),
        &prompt,
        &RecordingReporter::default(),
        &DeployConfig::default(),
    )
    .await
    .expect("cancel is not an error");

    assert_eq!(outcome, CleanupOutcome::Cancelled);
    assert!(aws.calls().is_empty(), "got: {:?}", aws.calls());
    let asked = prompt.asked();
    assert_eq!(asked.len(), 1);
    assert!(asked[0].contains("ml-platform-dev"), "got: {asked:?}");
}

#[tokio::test]
async fn default_answer_is_no() {
    let aws = MockAws::healthy();
    let outcome = cleanup(
        &aws,
        &MemoryKeyStore::new(),
        &ScriptedPrompt::new(&[]),
        &RecordingReporter::default(),
        &DeployConfig::default(),
    )
    .await
    .expect("cleanup");

    assert_eq!(outcome, CleanupOutcome::Cancelled);
    assert!(aws.calls().is_empty());
}

#[tokio::test]
async fn confirmed_cleanup_deletes_and_waits_but_keeps_key_pair() {
    let aws = MockAws::healthy();
    let keys = MemoryKeyStore::with_key("ml-platform-dev-key");
    let reporter = RecordingReporter::default();

    let outcome = cleanup(
        &aws,
        &keys,
        &ScriptedPrompt::new(&[true, false]),
        &reporter,
        &DeployConfig::default(),
    )
    .await
    .expect("cleanup");

    assert_eq!(
        outcome,
        CleanupOutcome::Deleted {
            stack_name: "ml-platform-dev".to_string(),
            key_pair_removed: false,
        }
    );
    assert_eq!(
        aws.calls(),
        vec!["version", "caller_identity", "delete_stack", "wait_stack_deleted"]
    );
    assert!(keys.pem("ml-platform-dev-key").is_some());
    assert!(
        reporter
            .events()
            .contains(&"end_ok: Stack ml-platform-dev deleted".to_string())
    );
}

#[tokio::test]
async fn second_confirmation_removes_key_pair_and_local_key() {
    let aws = MockAws::healthy();
    let keys = MemoryKeyStore::with_key("ml-platform-dev-key");
    let prompt = ScriptedPrompt::new(&[true, true]);

    let outcome = cleanup(
        &aws,
        &keys,
        &prompt,
        &RecordingReporter::default(),
        &DeployConfig::default(),
    )
    .await
    .expect("cleanup");

    assert_eq!(
        outcome,
        CleanupOutcome::Deleted {
            stack_name: "ml-platform-dev".to_string(),
            key_pair_removed: true,
        }
    );
    assert!(aws.called("delete_key_pair"));
    assert!(keys.pem("ml-platform-dev-key").is_none());
    assert!(prompt.asked()[1].contains("ml-platform-dev-key"));
}

#[tokio::test]
async fn rejected_delete_request_is_reported() {
    let aws = MockAws {
        delete_stack: err_output(254, b"AccessDenied"),
        ..MockAws::healthy()
    };

    let err = cleanup(
        &aws,
        &MemoryKeyStore::new(),
        &ScriptedPrompt::new(&[true]),
        &RecordingReporter::default(),
        &DeployConfig::default(),
    )
    .await
    .expect_err("delete failure");

    assert!(matches!(
        err.downcast_ref::<StackError>(),
        Some(StackError::DeleteFailed { .. })
    ));
    assert!(!aws.called("wait_stack_deleted"));
}

#[tokio::test]
async fn failed_wait_is_reported_and_key_pair_is_not_offered() {
    let aws = MockAws {
        wait_deleted: err_output(
            255,
            b"Waiter StackDeleteComplete failed: Waiter encountered a terminal failure state",
        ),
        ..MockAws::healthy()
    };
    let prompt = ScriptedPrompt::new(&[true, true]);
    let reporter = RecordingReporter::default();

    let err = cleanup(
        &aws,
        &MemoryKeyStore::new(),
        &prompt,
        &reporter,
        &DeployConfig::default(),
    )
    .await
    .expect_err("wait failure");

    assert_eq!(
        err.downcast_ref::<StackError>().map(StackError::code),
        Some("STACK_DELETE_FAILED")
    );
    assert_eq!(prompt.asked().len(), 1);
    assert!(!aws.called("delete_key_pair"));
    assert!(reporter.events().iter().any(|e| e.starts_with("end_err: ")));
}

#[tokio::test]
async fn confirmed_cleanup_still_requires_aws_cli() {
    let aws = MockAws {
        version: None,
        ..MockAws::healthy()
    };

    let err = cleanup(
        &aws,
        &MemoryKeyStore::new(),
        &ScriptedPrompt::new(&[true]),
        &RecordingReporter::default(),
        &DeployConfig::default(),
    )
    .await
    .expect_err("missing CLI");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::AwsCliMissing)
    ));
    assert!(!aws.called("delete_stack"));
}
