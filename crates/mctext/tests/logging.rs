#![cfg(feature = "tracing-json")]

//! Global subscriber installation. Lives in its own test binary because it
//! claims the process-wide default.

use mctext::logging::{LogFormat, init};

#[test]
fn init_once_then_rejects() {
    assert!(init(LogFormat::Json).is_ok());
    assert!(init(LogFormat::Pretty).is_err());
    tracing::warn!("logging initialized");
}
