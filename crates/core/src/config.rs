//! Generator configuration.
//!
//! Every option the generator understands is a field on [`ScaffoldConfig`].
//! The file lives at `config/api-scaffold.yaml` in the project root; every
//! field is optional and falls back to the Laravel conventions below.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::artifact::GenerationOptions;
use crate::error::{ScaffoldError, ScaffoldResult};

/// Default location of the configuration file, relative to the project root.
pub const DEFAULT_CONFIG_PATH: &str = "config/api-scaffold.yaml";

/// Preset key whose selection is made artifact by artifact.
pub const CUSTOM_PRESET: &str = "custom";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Root directory for generated service classes
    pub service_path: PathBuf,
    pub namespaces: Namespaces,
    /// Patch the provider with an interface binding
    pub auto_register_bindings: bool,
    pub provider_path: PathBuf,
    /// Copy files to `<file>.backup.<timestamp>` before overwriting or patching
    pub backup_existing: bool,
    /// Endpoints listed in generated documentation
    pub api_methods: Vec<String>,
    pub use_custom_stubs: bool,
    pub custom_stubs_path: PathBuf,
    /// Start the wizard when no generation flags are given
    pub interactive_mode: bool,
    pub presets: Vec<PresetDefinition>,
    pub cache_preferences: bool,
    pub preferences_cache_path: PathBuf,
    pub docs_path: PathBuf,
    pub routes_path: PathBuf,
    pub route_registration: RouteRegistration,
    /// Let `php artisan` create models and migrations when available
    pub delegate_to_artisan: bool,
    pub php_binary: String,
    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    pub log_level: Option<String>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            service_path: PathBuf::from("app/Services"),
            namespaces: Namespaces::default(),
            auto_register_bindings: true,
            provider_path: PathBuf::from("app/Providers/AppServiceProvider.php"),
            backup_existing: true,
            api_methods: ["index", "show", "store", "update", "destroy"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            use_custom_stubs: false,
            custom_stubs_path: PathBuf::from("resources/stubs/vendor/api-scaffold"),
            interactive_mode: true,
            presets: default_presets(),
            cache_preferences: true,
            preferences_cache_path: PathBuf::from("storage/app/api-scaffold-preferences.json"),
            docs_path: PathBuf::from("docs/api"),
            routes_path: PathBuf::from("routes/api.php"),
            route_registration: RouteRegistration::Prompt,
            delegate_to_artisan: true,
            php_binary: "php".to_string(),
            log_level: None,
        }
    }
}

/// PHP namespaces of the generated classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespaces {
    pub service: String,
    pub controller: String,
    pub request: String,
    pub resource: String,
    pub model: String,
    pub nova: String,
    pub filament: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            service: "App\\Services".to_string(),
            controller: "App\\Http\\Controllers".to_string(),
            request: "App\\Http\\Requests".to_string(),
            resource: "App\\Http\\Resources".to_string(),
            model: "App\\Models".to_string(),
            nova: "App\\Nova".to_string(),
            filament: "App\\Filament\\Resources".to_string(),
        }
    }
}

/// A named bundle of generation flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDefinition {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: BTreeMap<String, bool>,
}

impl PresetDefinition {
    fn new(key: &str, name: &str, description: &str, enabled: &[&str]) -> Self {
        let options = ["api", "model", "migration", "controller", "request", "resource", "test"]
            .iter()
            .map(|opt| (opt.to_string(), enabled.contains(opt)))
            .collect();
        Self {
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            options,
        }
    }

    /// Presets without options ask for every artifact individually.
    pub fn is_custom(&self) -> bool {
        self.options.is_empty()
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions::from_map(&self.options)
    }
}

fn default_presets() -> Vec<PresetDefinition> {
    vec![
        PresetDefinition::new("minimal", "Minimal", "Service and Interface only", &[]),
        PresetDefinition::new(
            "api-complete",
            "API Complete",
            "Full API scaffold with all components",
            &["api", "model", "migration", "controller", "request", "resource", "test"],
        ),
        PresetDefinition::new(
            "service-layer",
            "Service Layer",
            "Service, Interface, Model, and Tests",
            &["api", "model", "test"],
        ),
        PresetDefinition {
            key: CUSTOM_PRESET.to_string(),
            name: "Custom".to_string(),
            description: "Choose components individually".to_string(),
            options: BTreeMap::new(),
        },
    ]
}

/// How routes are registered after a controller is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteRegistration {
    /// Ask in interactive mode, skip otherwise
    Prompt,
    /// Append to the central route file
    Append,
    /// Write a dedicated route file and require it from the central file
    File,
    None,
}

impl ScaffoldConfig {
    /// Load configuration for a project.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> ScaffoldResult<Self> {
        let path = match explicit {
            Some(path) => {
                let path = resolve(project_root, path);
                if !path.exists() {
                    return Err(ScaffoldError::ConfigNotFound { path });
                }
                path
            }
            None => {
                let path = project_root.join(DEFAULT_CONFIG_PATH);
                if !path.exists() {
                    debug!("No configuration file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> ScaffoldResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ScaffoldResult<()> {
        let mut seen = std::collections::HashSet::new();
        for preset in &self.presets {
            if preset.key.trim().is_empty() {
                return Err(ScaffoldError::configuration("preset key cannot be empty"));
            }
            if !seen.insert(preset.key.as_str()) {
                return Err(ScaffoldError::configuration(format!(
                    "duplicate preset key: {}",
                    preset.key
                )));
            }
        }
        if self.php_binary.trim().is_empty() {
            return Err(ScaffoldError::configuration("php_binary cannot be empty"));
        }
        Ok(())
    }

    pub fn preset(&self, key: &str) -> Option<&PresetDefinition> {
        self.presets.iter().find(|preset| preset.key == key)
    }
}

/// Resolve a configured path against the project root.
pub fn resolve(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
