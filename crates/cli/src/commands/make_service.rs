use api_scaffold_codegen::routes::RouteRegistrar;
use api_scaffold_codegen::{
    entity_names, FileStatus, GenerationReport, Notice, RouteMode, ServiceGenerator,
};
use api_scaffold_core::config::resolve;
use api_scaffold_core::{
    AdminPanel, AdminTarget, Artifact, GenerationOptions, GenerationRequest, PreferencesStore,
    RouteRegistration, ScaffoldConfig, ScaffoldResult,
};
use clap::Args;
use std::path::Path;
use tracing::debug;

use crate::interactive::{self, Format, Prompt};

#[derive(Debug, Clone, Args)]
pub struct MakeServiceArgs {
    /// Entity name, e.g. Post or user_profile
    pub name: String,

    /// Generate service with basic API methods
    #[arg(long)]
    pub api: bool,

    /// Generate model
    #[arg(long)]
    pub model: bool,

    /// Generate migration
    #[arg(long)]
    pub migration: bool,

    /// Generate controller
    #[arg(long)]
    pub controller: bool,

    /// Generate form request
    #[arg(long)]
    pub request: bool,

    /// Generate API resource
    #[arg(long)]
    pub resource: bool,

    /// Generate feature test
    #[arg(long)]
    pub test: bool,

    /// Generate a Laravel Nova resource
    #[arg(long)]
    pub nova: bool,

    /// Generate a Filament resource
    #[arg(long)]
    pub filament: bool,

    /// Generate an admin resource for the installed panel
    #[arg(long)]
    pub admin: bool,

    /// Generate Markdown API documentation
    #[arg(long)]
    pub docs: bool,

    /// Generate all related files
    #[arg(long)]
    pub all: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Choose components interactively
    #[arg(long, conflicts_with = "no_interactive")]
    pub interactive: bool,

    /// Never prompt
    #[arg(long)]
    pub no_interactive: bool,
}

impl MakeServiceArgs {
    pub fn has_generation_flags(&self) -> bool {
        self.flag_options().any_selected()
    }

    /// Explicit switches first, then any generation flag, then the configured
    /// default, which only applies when a user is at the terminal.
    pub fn is_interactive(&self, configured: bool, attended: bool) -> bool {
        if self.no_interactive {
            false
        } else if self.interactive {
            true
        } else if self.has_generation_flags() {
            false
        } else {
            configured && attended
        }
    }

    pub fn flag_options(&self) -> GenerationOptions {
        if self.all {
            return GenerationOptions::all();
        }

        let admin = if self.filament {
            Some(AdminTarget::Panel(AdminPanel::Filament))
        } else if self.nova {
            Some(AdminTarget::Panel(AdminPanel::Nova))
        } else if self.admin {
            Some(AdminTarget::Detect)
        } else {
            None
        };

        GenerationOptions {
            api: self.api,
            model: self.model,
            migration: self.migration,
            controller: self.controller,
            request: self.request,
            resource: self.resource,
            test: self.test,
            docs: self.docs,
            admin,
        }
    }
}

pub fn run(
    project_root: &Path,
    config: ScaffoldConfig,
    args: MakeServiceArgs,
) -> ScaffoldResult<()> {
    let names = entity_names(&args.name)?;
    let interactive = args.is_interactive(config.interactive_mode, console::user_attended());
    debug!("Interactive mode: {}", interactive);

    Format::info(&format!("Creating service: {}", names.model));

    let options = if interactive {
        let store = PreferencesStore::new(
            resolve(project_root, &config.preferences_cache_path),
            config.cache_preferences,
        );
        interactive::run_wizard(&names.model, &config, &store)?
    } else {
        args.flag_options()
    };

    let generator = ServiceGenerator::new(project_root, config);
    let request = GenerationRequest::new(options, args.force);
    let mut report = generator.generate(&args.name, &request)?;
    print_notices(&report.notices);

    if report.written(Artifact::Controller) {
        if let Some(mode) = route_mode(&generator, interactive)? {
            let seen = report.notices.len();
            generator.register_routes(&args.name, mode, args.force, &mut report)?;
            print_notices(&report.notices[seen..]);
        }
    }

    print_summary(project_root, &report);
    Ok(())
}

fn route_mode(
    generator: &ServiceGenerator,
    interactive: bool,
) -> ScaffoldResult<Option<RouteMode>> {
    match generator.config().route_registration {
        RouteRegistration::Prompt if interactive => ask_route_mode(&generator.config().routes_path),
        _ => Ok(generator.configured_route_mode()),
    }
}

/// Labels for the route prompt, in menu order.
fn route_choices(routes_path: &Path) -> [(String, Option<RouteMode>); 3] {
    let route_dir = RouteRegistrar::new(routes_path).route_dir();
    [
        (
            format!("Append to {}", routes_path.display()),
            Some(RouteMode::Append),
        ),
        (
            format!("Separate file in {}/", route_dir.display()),
            Some(RouteMode::SeparateFile),
        ),
        ("Skip".to_string(), None),
    ]
}

fn ask_route_mode(routes_path: &Path) -> ScaffoldResult<Option<RouteMode>> {
    let choices = route_choices(routes_path);
    let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();

    let choice = Prompt::select("Register API routes for the new controller?", labels, 0)?;
    Ok(choices
        .iter()
        .find(|(label, _)| label == choice)
        .and_then(|(_, mode)| *mode))
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::Info(message) => Format::info(message),
            Notice::Warning(message) => Format::warning(message),
        }
    }
}

fn display(project_root: &Path, path: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn print_summary(project_root: &Path, report: &GenerationReport) {
    Format::banner("Service Scaffolding Complete!");

    let written: Vec<String> = report
        .files
        .iter()
        .filter(|file| file.was_written())
        .map(|file| match &file.status {
            FileStatus::Overwritten { backup: Some(backup) } => format!(
                "{} (backup: {})",
                display(project_root, &file.path),
                display(project_root, backup)
            ),
            _ => display(project_root, &file.path),
        })
        .collect();

    if written.is_empty() {
        Format::warning("No files were written");
    } else {
        Format::success("Created files:");
        Format::list(&written);
    }

    println!();
    Format::subheader("Next steps:");
    Format::numbered_list(&next_steps(report));
    println!();
}

fn next_steps(report: &GenerationReport) -> Vec<&'static str> {
    let mut steps = Vec::new();
    if report.written(Artifact::Migration) {
        steps.push("Update the migration file with your table schema");
        steps.push("Run: php artisan migrate");
    }
    if report.written(Artifact::Request) {
        steps.push("Add validation rules to your Request class");
    }
    if report.written(Artifact::Resource) {
        steps.push("Customize your Resource class output");
    }
    if report.written(Artifact::Controller) {
        steps.push("Add routes to your routes/api.php file if they were not registered");
    }
    if report.written(Artifact::Test) {
        steps.push("Run tests: php artisan test");
    }
    if steps.is_empty() {
        steps.push("Implement your service methods");
    }
    steps
}
