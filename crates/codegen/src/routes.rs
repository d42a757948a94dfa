use api_scaffold_core::ScaffoldResult;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::report::FileStatus;
use crate::templates::StubLoader;
use crate::writer::FileWriter;

/// Where a new `apiResource` route goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    /// Append the route to the central route file
    Append,
    /// Write `routes/api/<route>.php` and require it from the central file
    SeparateFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Appended,
    SeparateFile { path: PathBuf, status: FileStatus },
    AlreadyRegistered,
    MissingRouteFile,
}

/// Registers an API resource route for a generated controller.
#[derive(Debug, Clone)]
pub struct RouteRegistrar {
    routes_path: PathBuf,
}

impl RouteRegistrar {
    pub fn new(routes_path: impl Into<PathBuf>) -> Self {
        Self {
            routes_path: routes_path.into(),
        }
    }

    pub fn routes_path(&self) -> &Path {
        &self.routes_path
    }

    /// Directory that holds per-resource route files.
    pub fn route_dir(&self) -> PathBuf {
        let parent = self.routes_path.parent().unwrap_or_else(|| Path::new(""));
        parent.join("api")
    }

    pub fn register(
        &self,
        mode: RouteMode,
        route: &str,
        controller: &str,
        controller_namespace: &str,
        stubs: &StubLoader,
        writer: &FileWriter,
    ) -> ScaffoldResult<RouteOutcome> {
        if !self.routes_path.is_file() {
            return Ok(RouteOutcome::MissingRouteFile);
        }

        let central = fs::read_to_string(&self.routes_path)?;
        if central.contains(controller) {
            debug!("{} already appears in {}", controller, self.routes_path.display());
            return Ok(RouteOutcome::AlreadyRegistered);
        }

        match mode {
            RouteMode::Append => {
                let line = format!(
                    "Route::apiResource('{}', \\{}\\{}::class);",
                    route, controller_namespace, controller
                );
                append_line(&self.routes_path, &central, &line)?;
                info!("Appended {} route to {}", route, self.routes_path.display());
                Ok(RouteOutcome::Appended)
            }
            RouteMode::SeparateFile => {
                let path = self.route_dir().join(format!("{}.php", route));

                let mut context = HashMap::new();
                context.insert("routeName", route.to_string());
                context.insert("controller", controller.to_string());
                context.insert("controllerNamespace", controller_namespace.to_string());
                let status = writer.write(&path, &stubs.render("routes.stub", &context)?)?;

                let require = format!("require __DIR__.'/api/{}.php';", route);
                if !central.contains(&require) {
                    append_line(&self.routes_path, &central, &require)?;
                    info!("Required {} from {}", path.display(), self.routes_path.display());
                }
                Ok(RouteOutcome::SeparateFile { path, status })
            }
        }
    }
}

fn append_line(path: &Path, current: &str, line: &str) -> ScaffoldResult<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    if !current.is_empty() && !current.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "\n{}", line)?;
    Ok(())
}
