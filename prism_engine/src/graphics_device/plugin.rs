/// Plugin registry for graphics device backends
///
/// Backends register a factory under a name (e.g. "opengl"); the window
/// runner asks the engine for a device by that name once the window exists.

use rustc_hash::FxHashMap;
use winit::window::Window;

use crate::error::{Error, Result};
use crate::graphics_device::{DeviceConfig, GraphicsDevice};

/// Graphics device plugin factory function type
pub type GraphicsDevicePluginFactory =
    Box<dyn Fn(&Window, &DeviceConfig) -> Result<Box<dyn GraphicsDevice>> + Send + Sync>;

/// Plugin registry for graphics device backends
#[derive(Default)]
pub struct GraphicsDevicePluginRegistry {
    plugins: FxHashMap<String, GraphicsDevicePluginFactory>,
}

impl GraphicsDevicePluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    ///
    /// # Errors
    ///
    /// Returns an error if a plugin with the same name is already registered
    pub fn register_plugin<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn(&Window, &DeviceConfig) -> Result<Box<dyn GraphicsDevice>> + Send + Sync + 'static,
    {
        if self.plugins.contains_key(name) {
            return Err(Error::InitializationFailed(format!(
                "Graphics device plugin '{}' already registered", name
            )));
        }
        self.plugins.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    /// Remove a plugin, returning true if it existed
    pub fn unregister_plugin(&mut self, name: &str) -> bool {
        self.plugins.remove(name).is_some()
    }

    /// True if a plugin with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered plugin names, sorted
    pub fn plugin_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// True if no plugin is registered
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Remove every plugin
    pub fn clear(&mut self) {
        self.plugins.clear();
    }

    /// Create a device using a registered plugin
    pub fn create_device(
        &self,
        plugin_name: &str,
        window: &Window,
        config: &DeviceConfig,
    ) -> Result<Box<dyn GraphicsDevice>> {
        let factory = self.plugins.get(plugin_name).ok_or_else(|| {
            Error::InitializationFailed(format!("Graphics device plugin '{}' not found", plugin_name))
        })?;
        factory(window, config)
    }
}
