//! Adds an interface binding to the application's service provider.
//!
//! The provider is patched by text anchors: the `namespace` line receives the
//! `use` imports and the opening brace of `register()` receives the binding.
//! Every anchor is located before the file is touched, so a provider that
//! cannot be patched is left exactly as it was.

use api_scaffold_core::ScaffoldResult;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::writer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Registered { backup: Option<PathBuf> },
    MissingFile,
    AlreadyBound,
    NoNamespace,
    NoRegisterMethod,
}

fn namespace_anchor() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(r"(?m)^namespace\s+[^;]+;").expect("namespace pattern is valid")
    })
}

fn register_anchor() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(r"public\s+function\s+register\(\)\s*(?::\s*void\s*)?\{")
            .expect("register pattern is valid")
    })
}

#[derive(Debug, Clone)]
pub struct ProviderPatcher {
    path: PathBuf,
    backup_existing: bool,
}

impl ProviderPatcher {
    pub fn new(path: impl Into<PathBuf>, backup_existing: bool) -> Self {
        Self {
            path: path.into(),
            backup_existing,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bind `interface` to `service`, both living in `namespace`.
    pub fn register(
        &self,
        namespace: &str,
        interface: &str,
        service: &str,
    ) -> ScaffoldResult<PatchOutcome> {
        if !self.path.is_file() {
            return Ok(PatchOutcome::MissingFile);
        }

        let content = fs::read_to_string(&self.path)?;
        let Some(patched) = patch(&content, namespace, interface, service) else {
            return Ok(diagnose(&content, interface));
        };

        let backup = if self.backup_existing {
            Some(writer::backup(&self.path)?)
        } else {
            None
        };
        fs::write(&self.path, patched)?;
        info!("Bound {} in {}", interface, self.path.display());
        Ok(PatchOutcome::Registered { backup })
    }
}

/// Patched provider text, or `None` when an anchor is missing or the
/// interface already appears.
pub fn patch(content: &str, namespace: &str, interface: &str, service: &str) -> Option<String> {
    if content.contains(interface) {
        return None;
    }
    let namespace_end = namespace_anchor().find(content)?.end();
    let register_end = register_anchor().find(content)?.end();

    let imports = format!(
        "\n\nuse {ns}\\{interface};\nuse {ns}\\{service};",
        ns = namespace,
        interface = interface,
        service = service
    );
    let binding = format!(
        "\n        $this->app->bind({}::class, {}::class);",
        interface, service
    );

    // Insert back to front so the earlier offset stays valid.
    let mut edits = [(namespace_end, imports), (register_end, binding)];
    edits.sort_by(|a, b| b.0.cmp(&a.0));
    let mut patched = content.to_string();
    for (offset, text) in &edits {
        patched.insert_str(*offset, text);
    }
    debug!("Inserted imports at {} and binding at {}", namespace_end, register_end);
    Some(patched)
}

fn diagnose(content: &str, interface: &str) -> PatchOutcome {
    if content.contains(interface) {
        PatchOutcome::AlreadyBound
    } else if !namespace_anchor().is_match(content) {
        PatchOutcome::NoNamespace
    } else {
        PatchOutcome::NoRegisterMethod
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROVIDER: &str = r#"<?php

namespace App\Providers;

use Illuminate\Support\ServiceProvider;

class AppServiceProvider extends ServiceProvider
{
    public function register(): void
    {
        //
    }

    public function boot(): void
    {
        //
    }
}
"#;

    fn write_provider(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("AppServiceProvider.php");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_patch_inserts_imports_and_binding() {
        let patched =
            patch(PROVIDER, "App\\Services\\User", "UserServiceInterface", "UserService").unwrap();

        assert!(patched.contains(concat!(
            "namespace App\\Providers;\n\n",
            "use App\\Services\\User\\UserServiceInterface;\n",
            "use App\\Services\\User\\UserService;",
        )));
        assert!(patched.contains(concat!(
            "public function register(): void\n    {\n",
            "        $this->app->bind(UserServiceInterface::class, UserService::class);",
        )));
        assert!(patched.contains("use Illuminate\\Support\\ServiceProvider;"));
    }

    #[test]
    fn test_untyped_register_signature_is_accepted() {
        let legacy = PROVIDER.replace("register(): void", "register()");
        let patched =
            patch(&legacy, "App\\Services\\Post", "PostServiceInterface", "PostService").unwrap();
        assert!(
            patched.contains("$this->app->bind(PostServiceInterface::class, PostService::class);")
        );
    }

    #[test]
    fn test_register_twice_binds_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_provider(temp_dir.path(), PROVIDER);
        let patcher = ProviderPatcher::new(&path, false);

        let register = || {
            patcher
                .register("App\\Services\\User", "UserServiceInterface", "UserService")
                .unwrap()
        };

        let first = register();
        assert_eq!(first, PatchOutcome::Registered { backup: None });
        let second = register();
        assert_eq!(second, PatchOutcome::AlreadyBound);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("$this->app->bind(").count(), 1);
    }

    #[test]
    fn test_backup_is_taken_before_patching() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_provider(temp_dir.path(), PROVIDER);

        let outcome = ProviderPatcher::new(&path, true)
            .register("App\\Services\\User", "UserServiceInterface", "UserService")
            .unwrap();
        let PatchOutcome::Registered { backup: Some(backup) } = outcome else {
            panic!("expected a backup, got {:?}", outcome);
        };
        assert_eq!(fs::read_to_string(backup).unwrap(), PROVIDER);
    }

    #[test]
    fn test_missing_anchors_leave_file_untouched() {
        let temp_dir = TempDir::new().unwrap();

        let no_register =
            PROVIDER.replace("public function register(): void", "public function boot2(): void");
        let path = write_provider(temp_dir.path(), &no_register);
        let outcome = ProviderPatcher::new(&path, true)
            .register("App\\Services\\User", "UserServiceInterface", "UserService")
            .unwrap();
        assert_eq!(outcome, PatchOutcome::NoRegisterMethod);
        assert_eq!(fs::read_to_string(&path).unwrap(), no_register);

        let no_namespace = PROVIDER.replace("namespace App\\Providers;", "");
        let path = write_provider(temp_dir.path(), &no_namespace);
        let outcome = ProviderPatcher::new(&path, true)
            .register("App\\Services\\User", "UserServiceInterface", "UserService")
            .unwrap();
        assert_eq!(outcome, PatchOutcome::NoNamespace);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_provider() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = ProviderPatcher::new(temp_dir.path().join("nope.php"), true)
            .register("App\\Services\\User", "UserServiceInterface", "UserService")
            .unwrap();
        assert_eq!(outcome, PatchOutcome::MissingFile);
    }
}
