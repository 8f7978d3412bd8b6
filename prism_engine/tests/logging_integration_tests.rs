//! Integration tests for the engine logger
//!
//! A capturing logger replaces the console one; entries produced by the
//! macros and by engine components are checked. No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use std::sync::{Arc, Mutex};

use prism_engine::prism::log::{LogEntry, LogSeverity, Logger};
use prism_engine::prism::math::{Camera, Vec3};
use prism_engine::prism::{Engine, Error};
use prism_engine::{engine_debug, engine_err, engine_error, engine_warn};
use serial_test::serial;

// ============================================================================
// CAPTURING LOGGER
// ============================================================================

#[derive(Clone, Default)]
struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    fn install() -> Arc<Mutex<Vec<LogEntry>>> {
        let logger = CaptureLogger::default();
        let entries = logger.entries.clone();
        Engine::set_logger(logger);
        entries
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_macros_reach_custom_logger() {
    let entries = CaptureLogger::install();

    engine_debug!("test::macros", "frame {}", 7);
    engine_warn!("test::macros", "texture '{}' missing", "wood");
    engine_error!("test::macros", "shader '{}' failed", "phong");

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 3);
        assert_eq!(captured[0].severity, LogSeverity::Debug);
        assert_eq!(captured[0].message, "frame 7");
        assert_eq!(captured[1].message, "texture 'wood' missing");
        assert!(captured[1].file.is_none());

        // Errors carry their location
        assert_eq!(captured[2].severity, LogSeverity::Error);
        assert_eq!(captured[2].source, "test::macros");
        assert!(captured[2].file.unwrap().ends_with("logging_integration_tests.rs"));
        assert!(captured[2].line.is_some());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_min_severity_filter() {
    let entries = CaptureLogger::install();
    Engine::set_min_severity(LogSeverity::Warn);
    assert_eq!(Engine::min_severity(), LogSeverity::Warn);

    Engine::log(LogSeverity::Trace, "test", "dropped".to_string());
    Engine::log(LogSeverity::Info, "test", "dropped".to_string());
    Engine::log(LogSeverity::Warn, "test", "kept".to_string());
    Engine::log(LogSeverity::Error, "test", "kept".to_string());

    assert_eq!(entries.lock().unwrap().len(), 2);

    // Reset also clears the filter
    Engine::reset_logger();
    assert_eq!(Engine::min_severity(), LogSeverity::Trace);
}

#[test]
#[serial]
fn test_integration_engine_err_logs_and_builds_error() {
    let entries = CaptureLogger::install();

    let err = engine_err!("test::errors", "bad size {}x{}", 0, 4);

    assert!(matches!(&err, Error::InvalidResource(msg) if msg == "bad size 0x4"));
    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Error);
        assert_eq!(captured[0].message, "bad size 0x4");
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_camera_warns_on_degenerate_up() {
    let entries = CaptureLogger::install();

    let camera = Camera::new(Vec3::zero(), Vec3::new(0.0, 5.0, 0.0), Vec3::Y);

    {
        let captured = entries.lock().unwrap();
        assert!(captured
            .iter()
            .any(|e| e.severity == LogSeverity::Warn && e.source == "prism::Camera"));
    }
    assert!((camera.right().length() - 1.0).abs() < 1e-5);
    assert!(camera.dir().dot(camera.right()).abs() < 1e-5);

    Engine::reset_logger();
}
