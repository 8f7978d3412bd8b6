/// Prism Engine - Singleton manager for engine-wide services
///
/// Holds the graphics device plugin registry and the logger in global,
/// lock-protected storage. Per-window state (device, render, units) lives in
/// `Anim`, which is owned by the window runner.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use winit::window::Window;

use crate::error::{Result, Error};
use crate::graphics_device::{DeviceConfig, GraphicsDevice, GraphicsDevicePluginRegistry};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<LoggerState>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Registered graphics device backends
    plugins: RwLock<GraphicsDevicePluginRegistry>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            plugins: RwLock::new(GraphicsDevicePluginRegistry::new()),
        }
    }
}

/// Current logger and its severity filter
struct LoggerState {
    logger: Box<dyn Logger>,
    min_severity: LogSeverity,
}

fn logger_state() -> &'static RwLock<LoggerState> {
    LOGGER.get_or_init(|| {
        RwLock::new(LoggerState {
            logger: Box::new(DefaultLogger),
            min_severity: LogSeverity::Trace,
        })
    })
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// # Example
///
/// ```no_run
/// use prism_engine::prism::Engine;
///
/// Engine::initialize()?;
/// // prism_engine_renderer_gl::register()?;
/// // prism_engine::prism::run(config, |anim| Ok(()))?;
/// Engine::shutdown();
/// # Ok::<(), prism_engine::prism::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!("prism::Engine", "{}", error);
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Engine not initialized. Call Engine::initialize() first.".to_string(),
            ))
        })
    }

    /// Initialize the engine
    ///
    /// Idempotent. Must be called before registering plugins.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// True once `initialize` has been called
    pub fn is_initialized() -> bool {
        ENGINE_STATE.get().is_some()
    }

    /// Shutdown the engine: forget every registered plugin
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut plugins) = state.plugins.write() {
                plugins.clear();
            }
        }
        crate::engine_info!("prism::Engine", "Engine shut down");
    }

    // ===== GRAPHICS DEVICE PLUGINS =====

    /// Register a graphics device backend under a name
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A plugin with the same name already exists
    /// - The registry lock is poisoned
    pub fn register_graphics_device_plugin<F>(name: &str, factory: F) -> Result<()>
    where
        F: Fn(&Window, &DeviceConfig) -> Result<Box<dyn GraphicsDevice>> + Send + Sync + 'static,
    {
        let state = Self::state()?;
        let mut plugins = state.plugins.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Plugin registry lock poisoned".to_string())
            ))?;

        plugins.register_plugin(name, factory).map_err(Self::log_and_return_error)?;

        crate::engine_info!("prism::Engine", "Graphics device plugin '{}' registered", name);
        Ok(())
    }

    /// Remove a graphics device backend
    pub fn unregister_graphics_device_plugin(name: &str) -> Result<bool> {
        let state = Self::state()?;
        let mut plugins = state.plugins.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Plugin registry lock poisoned".to_string())
            ))?;
        Ok(plugins.unregister_plugin(name))
    }

    /// Create a graphics device for a window with a registered backend
    pub fn create_graphics_device(
        plugin_name: &str,
        window: &Window,
        config: &DeviceConfig,
    ) -> Result<Box<dyn GraphicsDevice>> {
        let state = Self::state()?;
        let plugins = state.plugins.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Plugin registry lock poisoned".to_string())
            ))?;

        let device = plugins
            .create_device(plugin_name, window, config)
            .map_err(Self::log_and_return_error)?;

        crate::engine_info!("prism::Engine", "Graphics device created with plugin '{}'", plugin_name);
        Ok(device)
    }

    /// Names of the registered graphics device backends, sorted
    pub fn graphics_device_plugin_names() -> Result<Vec<String>> {
        let state = Self::state()?;
        let plugins = state.plugins.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Plugin registry lock poisoned".to_string())
            ))?;
        Ok(plugins.plugin_names())
    }

    /// True if a backend with this name is registered
    pub fn has_graphics_device_plugin(name: &str) -> bool {
        ENGINE_STATE
            .get()
            .and_then(|state| state.plugins.read().ok().map(|p| p.contains(name)))
            .unwrap_or(false)
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut plugins) = state.plugins.write() {
                plugins.clear();
            }
        }
        Self::reset_logger();
    }

    // ===== LOGGING API =====

    /// Replace the default logger with a custom implementation
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_state().write() {
            lock.logger = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger, no filtering)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_state().write() {
            lock.logger = Box::new(DefaultLogger);
            lock.min_severity = LogSeverity::Trace;
        }
    }

    /// Drop entries below this severity before they reach the logger
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut lock) = logger_state().write() {
            lock.min_severity = severity;
        }
    }

    /// Current severity filter
    pub fn min_severity() -> LogSeverity {
        logger_state()
            .read()
            .map(|lock| lock.min_severity)
            .unwrap_or(LogSeverity::Trace)
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Internal logging method with file:line information (for ERROR logs)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if let Ok(lock) = logger_state().read() {
            if severity < lock.min_severity {
                return;
            }
            lock.logger.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
