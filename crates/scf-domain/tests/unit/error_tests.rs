//! Unit tests for domain error types

use scf_domain::{Error, RegistrationKind};

#[test]
fn test_duplicate_extension_message() {
    let error = Error::duplicate(RegistrationKind::Extension, "dummy");
    assert_eq!(
        error.to_string(),
        "Extension with alias 'dummy' has already been added"
    );
}

#[test]
fn test_duplicate_compiler_pass_message() {
    let error = Error::duplicate(RegistrationKind::CompilerPass, "app::DummyPass");
    assert_eq!(
        error.to_string(),
        "Compiler pass 'app::DummyPass' has already been added"
    );
}

#[test]
fn test_invalid_target_error() {
    let error = Error::invalid_target("/does/not/exist");
    match &error {
        Error::InvalidTarget { path } => assert_eq!(path.to_str(), Some("/does/not/exist")),
        _ => panic!("Expected InvalidTarget error"),
    }
    assert!(error.to_string().contains("/does/not/exist"));
}

#[test]
fn test_service_not_found_messages() {
    let direct = Error::service_not_found("mailer", None);
    assert_eq!(
        direct.to_string(),
        "You have requested a non-existent service \"mailer\""
    );

    let nested = Error::service_not_found("logger", Some("mailer".to_string()));
    assert_eq!(
        nested.to_string(),
        "The service \"mailer\" has a dependency on a non-existent service \"logger\""
    );
}

#[test]
fn test_circular_reference_message() {
    let error = Error::ServiceCircularReference {
        path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
    };
    let display = error.to_string();
    assert!(display.contains("\"a\""));
    assert!(display.contains("a -> b -> a"));
}

#[test]
fn test_extension_not_found_error() {
    let error = Error::extension_not_found("unknown");
    match error {
        Error::ExtensionNotFound { alias } => assert_eq!(alias, "unknown"),
        _ => panic!("Expected ExtensionNotFound error"),
    }
}

#[test]
fn test_io_error_from_std() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: Error = io.into();
    assert!(matches!(error, Error::IoSimple { .. }));
}

#[test]
fn test_frozen_error() {
    let error = Error::frozen("add a definition");
    assert_eq!(
        error.to_string(),
        "Cannot add a definition on a compiled container"
    );
}
