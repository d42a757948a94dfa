use api_scaffold_core::{ScaffoldConfig, ScaffoldError, ScaffoldResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Runs `php artisan` inside a Laravel project.
#[derive(Debug, Clone)]
pub struct Artisan {
    project_root: PathBuf,
    php_binary: String,
}

impl Artisan {
    pub fn new(project_root: impl Into<PathBuf>, php_binary: impl Into<String>) -> Self {
        Self {
            project_root: project_root.into(),
            php_binary: php_binary.into(),
        }
    }

    /// Available when delegation is enabled and the project ships an `artisan` script.
    pub fn detect(project_root: &Path, config: &ScaffoldConfig) -> Option<Self> {
        if !config.delegate_to_artisan || !project_root.join("artisan").is_file() {
            return None;
        }
        Some(Self::new(project_root, config.php_binary.clone()))
    }

    pub fn run(&self, args: &[&str]) -> ScaffoldResult<()> {
        let command = format!("{} artisan {}", self.php_binary, args.join(" "));
        debug!("Running `{}`", command);

        let output = Command::new(&self.php_binary)
            .arg("artisan")
            .args(args)
            .current_dir(&self.project_root)
            .output()
            .map_err(|e| ScaffoldError::artisan(&command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScaffoldError::artisan(&command, stderr.trim()));
        }
        Ok(())
    }

    pub fn make_model(&self, model: &str) -> ScaffoldResult<()> {
        self.run(&["make:model", model])
    }

    pub fn make_migration(&self, migration: &str) -> ScaffoldResult<()> {
        self.run(&["make:migration", migration])
    }
}

/// First migration in `dir` named `<timestamp>_<migration>.php`.
pub fn find_migration(dir: &Path, migration: &str) -> ScaffoldResult<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let suffix = format!("_{}.php", migration);
    let mut matches = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&suffix))
        {
            matches.push(path);
        }
    }
    matches.sort();
    Ok(matches.into_iter().next())
}
