//! Registry tests for the error taxonomy
//!
//! Enumerates every code and every domain variant and checks the
//! uniqueness and stability guarantees clients rely on.

use std::collections::HashSet;

use domain::validation::{Constraint, Violation};
use domain::{DomainError, ErrorCode, ErrorContract, StoreError, ValidationFailure, classify};
use thiserror::Error;

/// One instance of every domain variant
fn catalog(id: &str) -> Vec<DomainError> {
    vec![
        DomainError::UserNotFound(id.to_string()),
        DomainError::EmailAlreadyUsed,
        DomainError::UsernameAlreadyUsed,
        DomainError::TeamNotFound(id.to_string()),
        DomainError::InvitationAlreadySent,
        DomainError::InvitationNotFound(id.to_string()),
        DomainError::ProjectNotFound(id.to_string()),
        DomainError::Unauthorized,
    ]
}

// =============================================================================
// Uniqueness
// =============================================================================

#[test]
fn every_code_string_is_unique() {
    let strings: HashSet<&str> = ErrorCode::ALL.iter().map(|code| code.as_str()).collect();
    assert_eq!(strings.len(), ErrorCode::ALL.len());
}

#[test]
fn every_domain_variant_has_its_own_code() {
    let variants = catalog("abc");
    let codes: HashSet<ErrorCode> = variants.iter().map(DomainError::code).collect();
    assert_eq!(codes.len(), variants.len());
}

#[test]
fn domain_variants_never_reuse_validation_or_unknown_codes() {
    for error in catalog("abc") {
        assert_ne!(error.code(), ErrorCode::ValidationError);
        assert_ne!(error.code(), ErrorCode::UnknownError);
    }
}

#[test]
fn codes_are_upper_snake_case() {
    for code in ErrorCode::ALL {
        assert!(
            code.as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'),
            "{code} is not upper snake case"
        );
    }
}

#[test]
fn serialized_code_matches_as_str() {
    for code in ErrorCode::ALL {
        let value = serde_json::to_value(code).unwrap();
        assert_eq!(value, serde_json::Value::String(code.as_str().to_string()));
    }
}

// =============================================================================
// Stability
// =============================================================================

#[test]
fn status_and_code_ignore_constructor_arguments() {
    for (a, b) in catalog("first").into_iter().zip(catalog("second")) {
        assert_eq!(a.code(), b.code());
        assert_eq!(a.http_status(), b.http_status());
    }
}

#[test]
fn statuses_follow_failure_category() {
    assert_eq!(ErrorCode::ValidationError.http_status(), 400);
    assert_eq!(ErrorCode::Unauthorized.http_status(), 401);
    assert_eq!(ErrorCode::UnknownError.http_status(), 500);

    for error in catalog("abc") {
        let expected = match error {
            DomainError::UserNotFound(_)
            | DomainError::TeamNotFound(_)
            | DomainError::InvitationNotFound(_)
            | DomainError::ProjectNotFound(_) => 404,
            DomainError::EmailAlreadyUsed
            | DomainError::UsernameAlreadyUsed
            | DomainError::InvitationAlreadySent => 409,
            DomainError::Unauthorized => 401,
        };
        assert_eq!(error.http_status(), expected, "{error:?}");
    }
}

#[test]
fn user_not_found_mentions_the_identifier() {
    let error = DomainError::UserNotFound("abc-123".to_string());

    assert_eq!(error.http_status(), 404);
    assert_eq!(error.code().as_str(), "USER_NOT_FOUND");
    assert!(ErrorContract::message(&error).contains("abc-123"));
}

#[test]
fn email_already_used_is_always_the_same_conflict() {
    let first = DomainError::EmailAlreadyUsed;
    let second = DomainError::EmailAlreadyUsed;

    assert_eq!(first.http_status(), 409);
    assert_eq!(first.code().as_str(), "EMAIL_CONFLICT");
    assert_eq!(
        (first.http_status(), first.code()),
        (second.http_status(), second.code())
    );
}

#[test]
fn validation_failure_reports_fixed_contract() {
    let failure = ValidationFailure::single(
        "teamData",
        Violation::new("name", Constraint::TooLong, "too long", None),
    );

    assert_eq!(ErrorContract::code(&failure), ErrorCode::ValidationError);
    assert_eq!(ErrorContract::http_status(&failure), 400);
    assert_eq!(ErrorContract::message(&failure), "Validation failed");
    assert_eq!(failure.violations().len(), 1);
}

// =============================================================================
// Identification
// =============================================================================

#[derive(Error, Debug)]
enum ServiceError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[test]
fn classify_recognizes_bare_domain_errors() {
    let error = DomainError::ProjectNotFound("p-1".to_string());
    let contract = classify(&error).expect("domain error is recognized");
    assert_eq!(contract.code(), ErrorCode::ProjectNotFound);
}

#[test]
fn classify_walks_the_source_chain() {
    let wrapped = ServiceError::from(DomainError::InvitationAlreadySent);
    let contract = classify(&wrapped).expect("wrapped domain error is recognized");
    assert_eq!(contract.code(), ErrorCode::InvitationConflict);

    let wrapped = ServiceError::from(ValidationFailure {
        schema: "register",
        violations: vec![],
    });
    let contract = classify(&wrapped).expect("wrapped validation failure is recognized");
    assert_eq!(contract.code(), ErrorCode::ValidationError);
}

#[test]
fn classify_leaves_foreign_failures_unrecognized() {
    let io = std::io::Error::other("disk on fire");
    assert!(classify(&io).is_none());

    let store = ServiceError::from(StoreError::Unavailable("pool closed".to_string()));
    assert!(classify(&store).is_none());
}

// =============================================================================
// Store conflicts
// =============================================================================

#[test]
fn store_conflicts_resolve_to_their_domain_variant() {
    let pairs = [
        (ErrorCode::EmailConflict, DomainError::EmailAlreadyUsed),
        (ErrorCode::UsernameConflict, DomainError::UsernameAlreadyUsed),
        (ErrorCode::InvitationConflict, DomainError::InvitationAlreadySent),
    ];

    for (code, expected) in pairs {
        let domain = StoreError::Conflict(code).into_domain().unwrap();
        assert_eq!(domain, expected);
        assert_eq!(domain.code(), code);
    }
}

#[test]
fn non_conflict_codes_stay_store_errors() {
    let err = StoreError::Conflict(ErrorCode::TeamNotFound)
        .into_domain()
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(ErrorCode::TeamNotFound)));

    let err = StoreError::Unavailable("pool closed".to_string())
        .into_domain()
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}
