use api_scaffold_core::config::resolve;
use api_scaffold_core::{ScaffoldConfig, ScaffoldError, ScaffoldResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stubs shipped with the generator.
static BUNDLED_STUBS: &[(&str, &str)] = &[
    ("service.stub", include_str!("../stubs/service.stub")),
    ("service.api.stub", include_str!("../stubs/service.api.stub")),
    ("interface.stub", include_str!("../stubs/interface.stub")),
    ("interface.api.stub", include_str!("../stubs/interface.api.stub")),
    ("controller.stub", include_str!("../stubs/controller.stub")),
    ("request.stub", include_str!("../stubs/request.stub")),
    ("resource.stub", include_str!("../stubs/resource.stub")),
    ("test.stub", include_str!("../stubs/test.stub")),
    ("model.stub", include_str!("../stubs/model.stub")),
    ("migration.stub", include_str!("../stubs/migration.stub")),
    ("nova.stub", include_str!("../stubs/nova.stub")),
    ("filament.stub", include_str!("../stubs/filament.stub")),
    ("docs.stub", include_str!("../stubs/docs.stub")),
    ("routes.stub", include_str!("../stubs/routes.stub")),
];

/// Replace every `{{ key }}` token with its value.
///
/// Tokens without a value stay in the output untouched.
pub fn replace_placeholders(template: &str, context: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();

    for (key, value) in context {
        let placeholder = format!("{{{{ {} }}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

/// Finds stub text by file name.
///
/// A project-level override directory wins over the bundled stubs when
/// custom stubs are enabled.
#[derive(Debug, Clone, Default)]
pub struct StubLoader {
    custom_dir: Option<PathBuf>,
}

impl StubLoader {
    pub fn new(custom_dir: Option<PathBuf>) -> Self {
        Self { custom_dir }
    }

    pub fn from_config(project_root: &Path, config: &ScaffoldConfig) -> Self {
        let custom_dir = config
            .use_custom_stubs
            .then(|| resolve(project_root, &config.custom_stubs_path));
        Self::new(custom_dir)
    }

    pub fn load(&self, name: &str) -> ScaffoldResult<String> {
        if let Some(dir) = &self.custom_dir {
            let path = dir.join(name);
            if path.is_file() {
                debug!("Using custom stub {}", path.display());
                return Ok(std::fs::read_to_string(path)?);
            }
        }

        BUNDLED_STUBS
            .iter()
            .find(|(stub, _)| *stub == name)
            .map(|(_, content)| content.to_string())
            .ok_or_else(|| ScaffoldError::template_not_found(name))
    }

    pub fn render(&self, name: &str, context: &HashMap<&str, String>) -> ScaffoldResult<String> {
        Ok(replace_placeholders(&self.load(name)?, context))
    }
}
