//! Unit tests for log.rs
//!
//! Tests LogSeverity ordering, LogEntry construction and DefaultLogger formatting.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
}

// ============================================================================
// LOG ENTRY / FORMAT TESTS
// ============================================================================

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "prism::Render".to_string(),
        message: "Frame resized".to_string(),
        file,
        line,
    }
}

#[test]
fn test_format_plain_without_location() {
    let text = DefaultLogger::format_plain(&entry(LogSeverity::Info, None, None));
    assert!(text.contains("[INFO ]"));
    assert!(text.contains("[prism::Render]"));
    assert!(text.ends_with("Frame resized"));
}

#[test]
fn test_format_plain_with_location() {
    let text = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("render.rs"), Some(42)));
    assert!(text.contains("[ERROR]"));
    assert!(text.ends_with("(render.rs:42)"));
}

#[test]
fn test_format_plain_ignores_partial_location() {
    let text = DefaultLogger::format_plain(&entry(LogSeverity::Warn, Some("render.rs"), None));
    assert!(!text.contains("render.rs"));
}

#[test]
fn test_default_logger_does_not_panic() {
    let logger = DefaultLogger;
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Error, Some(file!()), Some(line!())));
}

#[test]
fn test_logger_is_object_safe() {
    let logger: Box<dyn Logger> = Box::new(DefaultLogger);
    logger.log(&entry(LogSeverity::Debug, None, None));
}
