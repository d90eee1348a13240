//! Error Extension Tests

use courtside_domain::error::{Error, Result};
use courtside_infrastructure::error_ext::ErrorContext;
use std::io;

#[test]
fn test_io_context() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_config_context() {
    let parse_error = "x".parse::<u32>().expect_err("not a number");
    let result: Result<u32> = Err(parse_error).config_context("invalid port");
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_decode_context_is_remote_side() {
    let json_error = serde_json::from_str::<u32>("{").expect_err("invalid json");
    let err = Err::<u32, _>(json_error)
        .decode_context("cached payload")
        .expect_err("decode error");
    assert_eq!(err.kind(), "decode");
    assert!(err.is_remote());
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u32, io::Error> = Ok(7);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .expect("ok passes through");
    assert_eq!(value, 7);
}
