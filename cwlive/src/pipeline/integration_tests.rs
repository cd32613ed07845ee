//! End-to-end scenarios for the `createCWLUser` resolver.

use crate::core::StepStatus;
use crate::errors::{InvocationError, COGNITO_CREATION_FAILED};
use crate::events::{event_types, CollectingEventSink};
use crate::stages::{CREATE_COGNITO_USER, SEND_WELCOME_EMAIL};
use crate::testing::{
    assert_aborted_with, assert_step_status, cognito_user_record, create_user_arguments,
    CreateUserFixture, RecordingDataSource,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_welcome_email_sent_with_four_fields() {
    let fixture = CreateUserFixture::succeeding();

    let run = fixture
        .resolver
        .resolve(create_user_arguments(Some(json!(true))))
        .await
        .unwrap();

    assert_eq!(
        fixture.cognito.last_payload(),
        Some(json!({
            "userEmail": "a@b.com",
            "userFirstName": "A",
            "userLastName": "B",
            "userRole": "staff",
            "organizationId": "org1",
            "sendWelcomeEmail": true,
        }))
    );
    assert_eq!(fixture.persist.call_count(), 1);
    assert_eq!(fixture.welcome_email.payloads(), vec![cognito_user_record()]);
    assert_eq!(run.result, cognito_user_record());
    assert_step_status(&run, SEND_WELCOME_EMAIL, StepStatus::Completed);
}

#[tokio::test]
async fn test_failed_welcome_email_keeps_persisted_record() {
    let fixture = CreateUserFixture::new(
        RecordingDataSource::returning("createCognitoUserFn", cognito_user_record()),
        RecordingDataSource::new("CWLUserTable"),
        RecordingDataSource::failing("sendWelcomeEmailFn", InvocationError::upstream("Email address is not verified")),
    );

    let run = fixture
        .resolver
        .resolve(create_user_arguments(Some(json!(true))))
        .await
        .unwrap();

    assert_eq!(fixture.welcome_email.call_count(), 1);
    assert_eq!(run.result, cognito_user_record());
    assert_step_status(&run, SEND_WELCOME_EMAIL, StepStatus::Recovered);
}

#[tokio::test]
async fn test_transport_failure_on_email_is_also_swallowed() {
    let fixture = CreateUserFixture::new(
        RecordingDataSource::returning("createCognitoUserFn", cognito_user_record()),
        RecordingDataSource::new("CWLUserTable"),
        RecordingDataSource::failing("sendWelcomeEmailFn", InvocationError::transport("socket hang up")),
    );

    let run = fixture
        .resolver
        .resolve(create_user_arguments(Some(json!(true))))
        .await
        .unwrap();

    assert_eq!(run.result, cognito_user_record());
}

#[tokio::test]
async fn test_email_skipped_when_flag_absent_or_false() {
    for flag in [None, Some(json!(false)), Some(json!("true")), Some(json!(1)), Some(json!("yes"))] {
        let fixture = CreateUserFixture::succeeding();

        let run = fixture
            .resolver
            .resolve(create_user_arguments(flag.clone()))
            .await
            .unwrap();

        assert_eq!(fixture.cognito.call_count(), 1, "flag {flag:?}");
        assert_eq!(fixture.persist.call_count(), 1, "flag {flag:?}");
        assert_eq!(fixture.welcome_email.call_count(), 0, "flag {flag:?}");
        assert_eq!(run.result, cognito_user_record());
        assert_step_status(&run, SEND_WELCOME_EMAIL, StepStatus::Skipped);
    }
}

#[tokio::test]
async fn test_cognito_failure_aborts_before_persistence() {
    let sink = Arc::new(CollectingEventSink::new());
    let mut fixture = CreateUserFixture::new(
        RecordingDataSource::failing(
            "createCognitoUserFn",
            InvocationError::upstream("An account with the given email already exists."),
        ),
        RecordingDataSource::new("CWLUserTable"),
        RecordingDataSource::new("sendWelcomeEmailFn"),
    );
    fixture.resolver = fixture.resolver.with_event_sink(sink.clone());

    let result = fixture
        .resolver
        .resolve(create_user_arguments(Some(json!(true))))
        .await;

    let error = assert_aborted_with(result, CREATE_COGNITO_USER, COGNITO_CREATION_FAILED);
    assert_eq!(error.message, "An account with the given email already exists.");
    assert_eq!(fixture.cognito.call_count(), 1);
    assert_eq!(fixture.persist.call_count(), 0);
    assert_eq!(fixture.welcome_email.call_count(), 0);

    let aborted = sink.events_of_type(event_types::PIPELINE_ABORTED);
    assert_eq!(aborted.len(), 1);
    assert_eq!(aborted[0].step.as_deref(), Some(CREATE_COGNITO_USER));
    assert!(sink.events_of_type(event_types::PIPELINE_COMPLETED).is_empty());
}

#[tokio::test]
async fn test_missing_input_aborts_without_invoking() {
    let fixture = CreateUserFixture::succeeding();

    let result = fixture.resolver.resolve(json!({})).await;

    assert_aborted_with(result, CREATE_COGNITO_USER, crate::errors::VALIDATION_ERROR);
    assert_eq!(fixture.cognito.call_count(), 0);
}

#[tokio::test]
async fn test_event_sequence_for_skipped_email() {
    let sink = Arc::new(CollectingEventSink::new());
    let mut fixture = CreateUserFixture::succeeding();
    fixture.resolver = fixture.resolver.with_event_sink(sink.clone());

    fixture.resolver.resolve(create_user_arguments(None)).await.unwrap();

    let skipped = sink.events_of_type(event_types::STEP_SKIPPED);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].step.as_deref(), Some(SEND_WELCOME_EMAIL));
    assert_eq!(sink.events_of_type(event_types::STEP_INVOKED).len(), 2);
    assert_eq!(sink.events_of_type(event_types::STEP_COMPLETED).len(), 3);
}
