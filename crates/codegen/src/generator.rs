use api_scaffold_core::config::resolve;
use api_scaffold_core::{
    AdminPanel, AdminTarget, Artifact, GenerationRequest, RouteRegistration, ScaffoldConfig,
    ScaffoldError, ScaffoldResult,
};
use chrono::Local;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::admin;
use crate::artisan::{self, Artisan};
use crate::naming::{ucfirst, EntityNames};
use crate::provider::{PatchOutcome, ProviderPatcher};
use crate::report::{FileStatus, GenerationReport};
use crate::routes::{RouteMode, RouteOutcome, RouteRegistrar};
use crate::templates::StubLoader;
use crate::writer::FileWriter;

const CONTROLLER_DIR: &str = "app/Http/Controllers";
const REQUEST_DIR: &str = "app/Http/Requests";
const RESOURCE_DIR: &str = "app/Http/Resources";
const MODEL_DIR: &str = "app/Models";
const MIGRATION_DIR: &str = "database/migrations";
const TEST_DIR: &str = "tests/Feature";
const NOVA_DIR: &str = "app/Nova";
const FILAMENT_DIR: &str = "app/Filament/Resources";

/// Generates the service scaffold for one entity inside a Laravel project.
#[derive(Debug, Clone)]
pub struct ServiceGenerator {
    project_root: PathBuf,
    config: ScaffoldConfig,
    stubs: StubLoader,
    artisan: Option<Artisan>,
}

impl ServiceGenerator {
    pub fn new(project_root: impl Into<PathBuf>, config: ScaffoldConfig) -> Self {
        let project_root = project_root.into();
        Self {
            stubs: StubLoader::from_config(&project_root, &config),
            artisan: Artisan::detect(&project_root, &config),
            project_root,
            config,
        }
    }

    /// Override how models and migrations are delegated.
    pub fn with_artisan(mut self, artisan: Option<Artisan>) -> Self {
        self.artisan = artisan;
        self
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    pub fn generate(
        &self,
        entity: &str,
        request: &GenerationRequest,
    ) -> ScaffoldResult<GenerationReport> {
        let names = entity_names(entity)?;
        info!("Generating {} scaffold", names.model);

        let mut job = EntityGenerator {
            generator: self,
            names,
            writer: FileWriter::new(request.force, self.config.backup_existing),
            api: request.options.api,
            report: GenerationReport::default(),
        };

        job.create_service_directory()?;
        for artifact in request.options.artifacts() {
            debug!("Generating {}", artifact);
            match artifact {
                Artifact::Service => job.generate_service()?,
                Artifact::Interface => job.generate_interface()?,
                Artifact::Model => job.generate_model()?,
                Artifact::Migration => job.generate_migration()?,
                Artifact::Controller => job.generate_controller()?,
                Artifact::Request => job.generate_request()?,
                Artifact::Resource => job.generate_resource()?,
                Artifact::Test => job.generate_test()?,
                Artifact::AdminResource => {
                    if let Some(target) = request.options.admin {
                        job.generate_admin(target)?;
                    }
                }
                Artifact::Documentation => job.generate_docs()?,
            }
        }

        if self.config.auto_register_bindings {
            job.register_binding()?;
        }

        Ok(job.report)
    }

    /// Route mode chosen by configuration alone; `None` when the user has to
    /// be asked or routes are disabled.
    pub fn configured_route_mode(&self) -> Option<RouteMode> {
        match self.config.route_registration {
            RouteRegistration::Append => Some(RouteMode::Append),
            RouteRegistration::File => Some(RouteMode::SeparateFile),
            RouteRegistration::Prompt | RouteRegistration::None => None,
        }
    }

    /// Register an API resource route for a controller written by `report`'s run.
    pub fn register_routes(
        &self,
        entity: &str,
        mode: RouteMode,
        force: bool,
        report: &mut GenerationReport,
    ) -> ScaffoldResult<()> {
        if !report.written(Artifact::Controller) {
            report.info("No controller was generated, skipping route registration");
            return Ok(());
        }

        let names = entity_names(entity)?;
        let controller = names.controller();
        let registrar = RouteRegistrar::new(self.path(&self.config.routes_path));
        let writer = FileWriter::new(force, self.config.backup_existing);

        let outcome = registrar.register(
            mode,
            &names.route,
            &controller,
            &self.config.namespaces.controller,
            &self.stubs,
            &writer,
        )?;

        match outcome {
            RouteOutcome::Appended => {
                report.info(format!("Registered routes in: {}", registrar.routes_path().display()));
            }
            RouteOutcome::SeparateFile { path, status } => {
                if status == FileStatus::Skipped {
                    report.warn(format!("File already exists: {}", path.display()));
                } else {
                    report.info(format!("Created route file: {}", path.display()));
                }
            }
            RouteOutcome::AlreadyRegistered => {
                report.warn(format!(
                    "Routes for {} already exist in {}",
                    controller,
                    registrar.routes_path().display()
                ));
            }
            RouteOutcome::MissingRouteFile => {
                let routes_path = registrar.routes_path().display();
                report.warn(format!("Route file not found at: {}", routes_path));
            }
        }
        Ok(())
    }

    fn path(&self, configured: &Path) -> PathBuf {
        resolve(&self.project_root, configured)
    }
}

/// Canonical names for `entity`, rejecting input that is no PHP class name.
pub fn entity_names(entity: &str) -> ScaffoldResult<EntityNames> {
    let entity = entity.trim();
    if entity.is_empty() {
        return Err(ScaffoldError::validation("Name cannot be empty"));
    }

    let names = EntityNames::new(entity);
    let valid = names.model.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && names.model.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(ScaffoldError::validation(format!(
            "'{}' does not produce a valid class name",
            entity
        )));
    }
    Ok(names)
}

/// State for one `generate` call.
struct EntityGenerator<'a> {
    generator: &'a ServiceGenerator,
    names: EntityNames,
    writer: FileWriter,
    api: bool,
    report: GenerationReport,
}

impl<'a> EntityGenerator<'a> {
    fn config(&self) -> &ScaffoldConfig {
        &self.generator.config
    }

    fn root_path(&self, dir: &str, file: String) -> PathBuf {
        self.generator.project_root.join(dir).join(file)
    }

    fn service_namespace(&self) -> String {
        format!("{}\\{}", self.config().namespaces.service, self.names.model)
    }

    fn service_dir(&self) -> PathBuf {
        self.generator
            .path(&self.config().service_path)
            .join(&self.names.model)
    }

    /// Every placeholder a stub may use; `namespace` and `class` vary per artifact.
    fn context(&self, namespace: &str, class: &str) -> HashMap<&'static str, String> {
        let names = &self.names;
        let namespaces = &self.config().namespaces;

        let mut context = HashMap::new();
        context.insert("namespace", namespace.to_string());
        context.insert("class", class.to_string());
        context.insert("model", names.model.clone());
        context.insert("modelNamespace", namespaces.model.clone());
        context.insert("modelVariable", names.model_variable.clone());
        context.insert("modelVariablePlural", names.model_variable_plural.clone());
        context.insert("tableName", names.table.clone());
        context.insert("routeName", names.route.clone());
        context.insert("methods", String::new());
        context.insert("service", names.service());
        context.insert("interface", names.interface());
        context.insert("serviceInterface", names.interface());
        context.insert("serviceNamespace", self.service_namespace());
        context.insert("serviceVariable", names.service_variable());
        context.insert("controller", names.controller());
        context.insert("controllerNamespace", namespaces.controller.clone());
        context.insert("request", names.request());
        context.insert("requestNamespace", namespaces.request.clone());
        context.insert("resource", names.resource());
        context.insert("resourceNamespace", namespaces.resource.clone());
        context
    }

    fn render(&self, stub: &str, namespace: &str, class: &str) -> ScaffoldResult<String> {
        self.generator.stubs.render(stub, &self.context(namespace, class))
    }

    fn write(&mut self, artifact: Artifact, path: &Path, content: &str) -> ScaffoldResult<()> {
        let status = self.writer.write(path, content)?;
        match &status {
            FileStatus::Created => {
                self.report.info(format!("Created {}: {}", artifact, path.display()));
            }
            FileStatus::Overwritten { backup } => {
                if let Some(backup) = backup {
                    self.report.info(format!("Backed up existing file to: {}", backup.display()));
                }
                self.report.info(format!("Overwrote {}: {}", artifact, path.display()));
            }
            FileStatus::Skipped => {
                self.report.warn(format!(
                    "{} already exists: {}",
                    ucfirst(artifact.label()),
                    path.display()
                ));
            }
        }
        self.report.record(artifact, path, status);
        Ok(())
    }

    fn create_service_directory(&mut self) -> ScaffoldResult<()> {
        let dir = self.service_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
            self.report.info(format!("Created directory: {}", dir.display()));
        }
        Ok(())
    }

    fn generate_service(&mut self) -> ScaffoldResult<()> {
        let class = self.names.service();
        let path = self.service_dir().join(format!("{}.php", class));
        let stub = if self.api { "service.api.stub" } else { "service.stub" };

        let content = self.render(stub, &self.service_namespace(), &class)?;
        self.write(Artifact::Service, &path, &content)
    }

    fn generate_interface(&mut self) -> ScaffoldResult<()> {
        let class = self.names.interface();
        let path = self.service_dir().join(format!("{}.php", class));
        let stub = if self.api { "interface.api.stub" } else { "interface.stub" };

        let content = self.render(stub, &self.service_namespace(), &class)?;
        self.write(Artifact::Interface, &path, &content)
    }

    fn generate_controller(&mut self) -> ScaffoldResult<()> {
        let class = self.names.controller();
        let path = self.root_path(CONTROLLER_DIR, format!("{}.php", class));

        let content = self.render("controller.stub", &self.config().namespaces.controller, &class)?;
        self.write(Artifact::Controller, &path, &content)
    }

    fn generate_request(&mut self) -> ScaffoldResult<()> {
        let class = self.names.request();
        let path = self.root_path(REQUEST_DIR, format!("{}.php", class));

        let content = self.render("request.stub", &self.config().namespaces.request, &class)?;
        self.write(Artifact::Request, &path, &content)
    }

    fn generate_resource(&mut self) -> ScaffoldResult<()> {
        let class = self.names.resource();
        let path = self.root_path(RESOURCE_DIR, format!("{}.php", class));

        let content = self.render("resource.stub", &self.config().namespaces.resource, &class)?;
        self.write(Artifact::Resource, &path, &content)
    }

    fn generate_test(&mut self) -> ScaffoldResult<()> {
        let class = self.names.test();
        let path = self.root_path(TEST_DIR, format!("{}.php", class));

        let content = self.render("test.stub", "Tests\\Feature", &class)?;
        self.write(Artifact::Test, &path, &content)
    }

    fn generate_model(&mut self) -> ScaffoldResult<()> {
        let class = self.names.model.clone();
        let path = self.root_path(MODEL_DIR, format!("{}.php", class));

        if !path.exists() {
            if let Some(artisan) = &self.generator.artisan {
                match artisan.make_model(&class) {
                    Ok(()) => {
                        self.report.info(format!("Created model: {}", path.display()));
                        self.report.record(Artifact::Model, &path, FileStatus::Created);
                        return Ok(());
                    }
                    Err(e) => {
                        self.report.warn(format!("{}; falling back to the model stub", e));
                    }
                }
            }
        }

        let content = self.render("model.stub", &self.config().namespaces.model, &class)?;
        self.write(Artifact::Model, &path, &content)
    }

    fn generate_migration(&mut self) -> ScaffoldResult<()> {
        let migration = self.names.migration();
        let dir = self.generator.project_root.join(MIGRATION_DIR);

        // An earlier migration for the same table counts as the target file.
        if let Some(existing) = artisan::find_migration(&dir, &migration)? {
            let content = self.render("migration.stub", "", &migration)?;
            return self.write(Artifact::Migration, &existing, &content);
        }

        if let Some(artisan) = &self.generator.artisan {
            match artisan.make_migration(&migration) {
                Ok(()) => {
                    let path = artisan::find_migration(&dir, &migration)?
                        .unwrap_or_else(|| dir.join(format!("{}.php", migration)));
                    self.report.info(format!("Created migration for table: {}", self.names.table));
                    self.report.record(Artifact::Migration, &path, FileStatus::Created);
                    return Ok(());
                }
                Err(e) => {
                    self.report.warn(format!("{}; falling back to the migration stub", e));
                }
            }
        }

        let stamp = Local::now().format("%Y_%m_%d_%H%M%S");
        let path = dir.join(format!("{}_{}.php", stamp, migration));
        let content = self.render("migration.stub", "", &migration)?;
        self.write(Artifact::Migration, &path, &content)
    }

    fn generate_admin(&mut self, target: AdminTarget) -> ScaffoldResult<()> {
        let panel = match admin::resolve_panel(&self.generator.project_root, target) {
            Ok(Some(panel)) => panel,
            Ok(None) => {
                self.report.warn(
                    "No admin panel detected (laravel/nova or filament/filament), \
                     skipping admin resource",
                );
                return Ok(());
            }
            Err(e) => {
                self.report.warn(format!("Could not read composer.json: {}", e));
                return Ok(());
            }
        };

        let namespaces = &self.config().namespaces;
        let (dir, namespace, class, stub) = match panel {
            AdminPanel::Nova => (
                NOVA_DIR,
                namespaces.nova.clone(),
                self.names.model.clone(),
                "nova.stub",
            ),
            AdminPanel::Filament => (
                FILAMENT_DIR,
                namespaces.filament.clone(),
                self.names.resource(),
                "filament.stub",
            ),
        };
        let path = self.root_path(dir, format!("{}.php", class));

        let content = self.render(stub, &namespace, &class)?;
        self.write(Artifact::AdminResource, &path, &content)
    }

    fn generate_docs(&mut self) -> ScaffoldResult<()> {
        let path = self
            .generator
            .path(&self.config().docs_path)
            .join(format!("{}.md", self.names.model));

        let mut context = self.context(&self.config().namespaces.service, &self.names.model);
        context.insert("endpoints", endpoint_rows(&self.config().api_methods, &self.names.route));
        let content = self.generator.stubs.render("docs.stub", &context)?;
        self.write(Artifact::Documentation, &path, &content)
    }

    fn register_binding(&mut self) -> ScaffoldResult<()> {
        let patcher = ProviderPatcher::new(
            self.generator.path(&self.config().provider_path),
            self.config().backup_existing,
        );
        let file = patcher.path().display().to_string();

        let outcome = patcher.register(
            &self.service_namespace(),
            &self.names.interface(),
            &self.names.service(),
        )?;
        match outcome {
            PatchOutcome::Registered { backup } => {
                if let Some(backup) = backup {
                    self.report.info(format!("Backed up {} to: {}", file, backup.display()));
                }
                self.report.info(format!("Registered service binding in {}", file));
                self.report.binding_registered = true;
            }
            PatchOutcome::MissingFile => {
                self.report.warn(format!("Service provider not found at: {}", file));
            }
            PatchOutcome::AlreadyBound => {
                self.report.warn(format!("Service binding already exists in {}", file));
            }
            PatchOutcome::NoNamespace => {
                self.report.warn(format!("Could not find namespace declaration in {}", file));
            }
            PatchOutcome::NoRegisterMethod => {
                self.report.warn(format!("Could not find register() method in {}", file));
            }
        }
        Ok(())
    }
}

/// Markdown table rows for the configured controller actions.
fn endpoint_rows(methods: &[String], route: &str) -> String {
    methods
        .iter()
        .filter_map(|method| {
            let (verb, uri) = match method.as_str() {
                "index" => ("GET", format!("/api/{}", route)),
                "store" => ("POST", format!("/api/{}", route)),
                "show" => ("GET", format!("/api/{}/{{id}}", route)),
                "update" => ("PUT/PATCH", format!("/api/{}/{{id}}", route)),
                "destroy" => ("DELETE", format!("/api/{}/{{id}}", route)),
                other => {
                    debug!("No endpoint for action '{}'", other);
                    return None;
                }
            };
            Some(format!("| {} | `{}` | {} |", verb, uri, method))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
