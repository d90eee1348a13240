//! Unit tests for domain error types

use courtside_domain::Error;

#[test]
fn test_remote_unavailable_error() {
    let error = Error::remote_unavailable("connection refused");
    match &error {
        Error::RemoteUnavailable { message, source } => {
            assert_eq!(message, "connection refused");
            assert!(source.is_none());
        }
        _ => panic!("Expected RemoteUnavailable error"),
    }
    assert!(error.is_remote());
    assert_eq!(error.kind(), "remote_unavailable");
}

#[test]
fn test_remote_protocol_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad reply");
    let error = Error::remote_protocol_with_source("script failed", io);
    assert!(format!("{}", error).contains("script failed"));
    assert!(std::error::Error::source(&error).is_some());
    assert!(error.is_remote());
}

#[test]
fn test_decode_error_is_remote_path() {
    let error = Error::decode("not JSON");
    assert!(error.is_remote());
    assert_eq!(error.kind(), "decode");
}

#[test]
fn test_configuration_error_is_not_remote() {
    let error = Error::configuration("rpm cannot be 0");
    assert!(!error.is_remote());
    assert!(format!("{}", error).contains("rpm cannot be 0"));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_err.into();
    assert_eq!(error.kind(), "json");
}
