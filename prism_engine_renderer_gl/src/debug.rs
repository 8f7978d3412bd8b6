/// OpenGL debug output - driver messages with colored output and statistics
///
/// Installed on debug contexts (`DeviceConfig::enable_debug` or the
/// `gl-debug` feature) when the driver supports `KHR_debug`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use colored::*;
use glow::HasContext;
use rustc_hash::FxHashMap;

use prism_engine::engine_info;

/// Global debug message counters
static DEBUG_STATS: DebugStatsTracker = DebugStatsTracker::new();

/// Occurrences of each message text
static MESSAGE_TRACKER: Mutex<Option<FxHashMap<String, u32>>> = Mutex::new(None);

/// Debug message counters by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlDebugStats {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub notification: u32,
}

impl GlDebugStats {
    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low + self.notification
    }
}

/// Severity classes of `GL_DEBUG_SEVERITY_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DebugLevel {
    High,
    Medium,
    Low,
    Notification,
}

pub(crate) fn classify_severity(severity: u32) -> DebugLevel {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => DebugLevel::High,
        glow::DEBUG_SEVERITY_MEDIUM => DebugLevel::Medium,
        glow::DEBUG_SEVERITY_LOW => DebugLevel::Low,
        _ => DebugLevel::Notification,
    }
}

pub(crate) fn type_name(gl_type: u32) -> &'static str {
    match gl_type {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        _ => "General",
    }
}

struct DebugStatsTracker {
    high: AtomicU32,
    medium: AtomicU32,
    low: AtomicU32,
    notification: AtomicU32,
}

impl DebugStatsTracker {
    const fn new() -> Self {
        Self {
            high: AtomicU32::new(0),
            medium: AtomicU32::new(0),
            low: AtomicU32::new(0),
            notification: AtomicU32::new(0),
        }
    }

    fn increment(&self, level: DebugLevel) {
        let counter = match level {
            DebugLevel::High => &self.high,
            DebugLevel::Medium => &self.medium,
            DebugLevel::Low => &self.low,
            DebugLevel::Notification => &self.notification,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn get_stats(&self) -> GlDebugStats {
        GlDebugStats {
            high: self.high.load(Ordering::Relaxed),
            medium: self.medium.load(Ordering::Relaxed),
            low: self.low.load(Ordering::Relaxed),
            notification: self.notification.load(Ordering::Relaxed),
        }
    }
}

/// Number of times a message has been seen, this one included
fn track_message(message: &str) -> u32 {
    let Ok(mut guard) = MESSAGE_TRACKER.lock() else {
        return 1;
    };
    let count = guard.get_or_insert_with(FxHashMap::default).entry(message.to_string()).or_insert(0);
    *count += 1;
    *count
}

/// Enable synchronous debug output on the current context
pub(crate) fn install(gl: &mut glow::Context) {
    unsafe {
        if !gl.supports_debug() {
            engine_info!("prism::gl::Debug", "Debug output not supported by the driver");
            return;
        }
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(gl_debug_callback);
    }
    engine_info!("prism::gl::Debug", "Debug output enabled");
}

/// Driver message callback
fn gl_debug_callback(_source: u32, gl_type: u32, id: u32, severity: u32, message: &str) {
    let level = classify_severity(severity);
    DEBUG_STATS.increment(level);

    // Notifications are counted only
    if level == DebugLevel::Notification {
        return;
    }

    let occurrences = track_message(message);
    if occurrences > 1 {
        return;
    }

    let severity_colored = match level {
        DebugLevel::High => "HIGH".red().bold(),
        DebugLevel::Medium => "MEDIUM".yellow().bold(),
        DebugLevel::Low => "LOW".cyan(),
        DebugLevel::Notification => "NOTE".bright_black(),
    };
    eprintln!(
        "{} {} [{}]\n  ├─ {}: {}\n  └─ {}",
        "[OPENGL".bright_blue().bold(),
        format!("{}]", severity_colored).bright_blue().bold(),
        type_name(gl_type).bright_black(),
        "Message ID".bright_black(),
        id,
        message.white()
    );
}

/// Current debug message statistics
pub fn get_debug_stats() -> GlDebugStats {
    DEBUG_STATS.get_stats()
}

/// Print the debug message statistics
pub fn print_debug_stats_report() {
    let stats = get_debug_stats();

    if stats.total() == 0 {
        println!("\n{}", "✓ No OpenGL debug messages".green().bold());
        return;
    }

    println!("\n{}", "=== OpenGL Debug Report ===".bright_blue().bold());
    if stats.high > 0 {
        println!("  {} {}", "High:".red().bold(), stats.high);
    }
    if stats.medium > 0 {
        println!("  {} {}", "Medium:".yellow().bold(), stats.medium);
    }
    if stats.low > 0 {
        println!("  {} {}", "Low:".cyan(), stats.low);
    }
    if stats.notification > 0 {
        println!("  {} {}", "Notifications:".bright_black(), stats.notification);
    }
    println!("  {} {}", "Total:".white().bold(), stats.total());

    if let Ok(guard) = MESSAGE_TRACKER.lock() {
        let repeated = guard
            .as_ref()
            .map(|messages| messages.values().filter(|&&count| count > 1).count())
            .unwrap_or(0);
        if repeated > 0 {
            println!("\n  {} {} message(s) repeated", "ℹ".cyan(), repeated);
        }
    }
    println!("{}\n", "===========================".bright_blue().bold());
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
