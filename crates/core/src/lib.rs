pub mod artifact;
pub mod config;
pub mod error;
pub mod preferences;

pub use artifact::{
    AdminPanel, AdminTarget, Artifact, GenerationOptions, GenerationRequest, OPTION_KEYS,
};
pub use config::{Namespaces, PresetDefinition, RouteRegistration, ScaffoldConfig, CUSTOM_PRESET};
pub use error::{ScaffoldError, ScaffoldResult};
pub use preferences::{Preferences, PreferencesStore};
