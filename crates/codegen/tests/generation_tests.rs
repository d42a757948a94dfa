//! End-to-end generation against a throwaway Laravel project tree.

use std::fs;
use std::path::{Path, PathBuf};

use api_scaffold_codegen::{FileStatus, GenerationReport, RouteMode, ServiceGenerator};
use api_scaffold_core::{
    AdminPanel, AdminTarget, Artifact, GenerationOptions, GenerationRequest, ScaffoldConfig,
};
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
}
"#;

const ROUTES: &str = "<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n";

fn laravel_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("app/Providers")).unwrap();
    fs::write(root.join("app/Providers/AppServiceProvider.php"), PROVIDER).unwrap();
    fs::create_dir_all(root.join("routes")).unwrap();
    fs::write(root.join("routes/api.php"), ROUTES).unwrap();
    temp_dir
}

fn generator(root: &Path) -> ServiceGenerator {
    ServiceGenerator::new(root, ScaffoldConfig::default()).with_artisan(None)
}

fn generate(
    root: &Path,
    entity: &str,
    options: GenerationOptions,
    force: bool,
) -> GenerationReport {
    generator(root)
        .generate(entity, &GenerationRequest::new(options, force))
        .unwrap()
}

/// Every regular file under `root`, relative and sorted.
fn tree(root: &Path) -> Vec<(PathBuf, String)> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<(PathBuf, String)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let content = fs::read_to_string(&path).unwrap();
                out.push((path.strip_prefix(root).unwrap().to_path_buf(), content));
            }
        }
    }
    let mut files = Vec::new();
    walk(root, root, &mut files);
    files.sort();
    files
}

fn backup_count(root: &Path) -> usize {
    tree(root)
        .iter()
        .filter(|(path, _)| path.to_string_lossy().contains(".backup."))
        .count()
}

fn api_complete() -> GenerationOptions {
    ScaffoldConfig::default()
        .preset("api-complete")
        .unwrap()
        .generation_options()
}

#[test]
fn test_controller_only_generates_three_files() {
    let project = laravel_project();
    let options = GenerationOptions {
        controller: true,
        ..Default::default()
    };
    let report = generate(project.path(), "Post", options, false);

    let artifacts: Vec<Artifact> = report.files.iter().map(|f| f.artifact).collect();
    assert_eq!(artifacts, vec![Artifact::Service, Artifact::Interface, Artifact::Controller]);

    let root = project.path();
    assert!(root.join("app/Services/Post/PostService.php").exists());
    assert!(root.join("app/Services/Post/PostServiceInterface.php").exists());
    let controller =
        fs::read_to_string(root.join("app/Http/Controllers/PostController.php")).unwrap();
    assert!(controller.contains("public function __construct("));
    assert!(controller.contains("protected PostServiceInterface $postService"));
    assert!(!root.join("app/Models").exists());
    assert!(!root.join("database").exists());
    assert!(!root.join("tests").exists());
}

#[test]
fn test_minimal_preset_generates_service_and_interface() {
    let project = laravel_project();
    let options = ScaffoldConfig::default()
        .preset("minimal")
        .unwrap()
        .generation_options();
    let report = generate(project.path(), "Invoice", options, false);

    assert_eq!(report.files.len(), 2);
    assert!(report.files.iter().all(|f| f.status == FileStatus::Created));
}

#[test]
fn test_api_complete_preset_generates_all_standard_artifacts() {
    let project = laravel_project();
    let report = generate(project.path(), "Category", api_complete(), false);
    let root = project.path();

    for artifact in [
        Artifact::Service,
        Artifact::Interface,
        Artifact::Model,
        Artifact::Migration,
        Artifact::Controller,
        Artifact::Request,
        Artifact::Resource,
        Artifact::Test,
    ] {
        assert!(report.written(artifact), "{artifact} was not written");
    }

    let request = fs::read_to_string(root.join("app/Http/Requests/CategoryRequest.php")).unwrap();
    assert!(request.contains("class CategoryRequest extends FormRequest"));
    assert!(request.contains("public function authorize(): bool"));
    assert!(request.contains("public function rules(): array"));

    let resource =
        fs::read_to_string(root.join("app/Http/Resources/CategoryResource.php")).unwrap();
    assert!(resource.contains("class CategoryResource extends JsonResource"));
    assert!(resource.contains("public function toArray("));

    let test = fs::read_to_string(root.join("tests/Feature/CategoryTest.php")).unwrap();
    assert!(test.contains("test("));
    assert!(test.contains("/api/categories"));

    for (path, content) in tree(root) {
        assert!(!content.contains("{{ "), "{} has an unreplaced placeholder", path.display());
    }
}

#[test]
fn test_second_run_without_force_changes_nothing() {
    let project = laravel_project();
    generate(project.path(), "Category", api_complete(), false);
    let before = tree(project.path());

    let report = generate(project.path(), "Category", api_complete(), false);

    assert_eq!(tree(project.path()), before);
    assert!(report.files.iter().all(|f| f.status == FileStatus::Skipped));
    assert!(report.warnings().any(|w| w.contains("already exists")));
    assert!(!report.binding_registered);
}

#[test]
fn test_force_backs_up_each_overwritten_file() {
    let project = laravel_project();
    let options = GenerationOptions {
        controller: true,
        request: true,
        ..Default::default()
    };
    generate(project.path(), "Post", options.clone(), false);
    let backups_after_first = backup_count(project.path());

    let report = generate(project.path(), "Post", options, true);

    let overwritten = report
        .files
        .iter()
        .filter(|f| matches!(f.status, FileStatus::Overwritten { backup: Some(_) }))
        .count();
    assert_eq!(overwritten, 4);
    assert_eq!(backup_count(project.path()), backups_after_first + 4);
}

#[test]
fn test_migration_is_not_duplicated() {
    let project = laravel_project();
    let options = GenerationOptions {
        migration: true,
        ..Default::default()
    };
    generate(project.path(), "Tag", options.clone(), false);
    let report = generate(project.path(), "Tag", options, false);

    let migrations = fs::read_dir(project.path().join("database/migrations")).unwrap().count();
    assert_eq!(migrations, 1);
    assert_eq!(report.file(Artifact::Migration).unwrap().status, FileStatus::Skipped);
}

#[test]
fn test_provider_binding_is_registered_once() {
    let project = laravel_project();
    let provider = project.path().join("app/Providers/AppServiceProvider.php");

    let first = generate(project.path(), "Order", GenerationOptions::default(), false);
    assert!(first.binding_registered);
    let second = generate(project.path(), "Order", GenerationOptions::default(), true);
    assert!(!second.binding_registered);

    let content = fs::read_to_string(provider).unwrap();
    assert!(content.contains("use App\\Services\\Order\\OrderServiceInterface;"));
    assert!(content.contains("use App\\Services\\Order\\OrderService;"));
    assert_eq!(
        content
            .matches("$this->app->bind(OrderServiceInterface::class, OrderService::class);")
            .count(),
        1
    );
}

#[test]
fn test_binding_disabled_leaves_provider_alone() {
    let project = laravel_project();
    let config = ScaffoldConfig {
        auto_register_bindings: false,
        ..Default::default()
    };
    ServiceGenerator::new(project.path(), config)
        .with_artisan(None)
        .generate("Order", &GenerationRequest::default())
        .unwrap();

    let provider = project.path().join("app/Providers/AppServiceProvider.php");
    let content = fs::read_to_string(provider).unwrap();
    assert_eq!(content, PROVIDER);
}

#[test]
fn test_category_routes_are_appended() {
    let project = laravel_project();
    let options = GenerationOptions {
        controller: true,
        ..Default::default()
    };
    let generator = generator(project.path());
    let mut report = generator
        .generate("Category", &GenerationRequest::new(options, false))
        .unwrap();

    generator
        .register_routes("Category", RouteMode::Append, false, &mut report)
        .unwrap();

    let routes = fs::read_to_string(project.path().join("routes/api.php")).unwrap();
    assert!(routes.contains(
        "Route::apiResource('categories', \\App\\Http\\Controllers\\CategoryController::class);"
    ));
}

#[test]
fn test_routes_need_a_controller_from_this_run() {
    let project = laravel_project();
    let generator = generator(project.path());
    let mut report = generator
        .generate("Category", &GenerationRequest::default())
        .unwrap();

    generator
        .register_routes("Category", RouteMode::Append, false, &mut report)
        .unwrap();

    let routes = fs::read_to_string(project.path().join("routes/api.php")).unwrap();
    assert_eq!(routes, ROUTES);
}

#[test]
fn test_explicit_filament_resource() {
    let project = laravel_project();
    let options = GenerationOptions {
        admin: Some(AdminTarget::Panel(AdminPanel::Filament)),
        ..Default::default()
    };
    generate(project.path(), "Product", options, false);

    let resource = fs::read_to_string(
        project
            .path()
            .join("app/Filament/Resources/ProductResource.php"),
    )
    .unwrap();
    assert!(resource.contains("namespace App\\Filament\\Resources;"));
    assert!(resource.contains("class ProductResource extends Resource"));
}

#[test]
fn test_detected_nova_resource() {
    let project = laravel_project();
    fs::write(
        project.path().join("composer.json"),
        r#"{"require": {"laravel/nova": "^4.0"}}"#,
    )
    .unwrap();
    let options = GenerationOptions {
        admin: Some(AdminTarget::Detect),
        ..Default::default()
    };
    let report = generate(project.path(), "Product", options, false);

    assert!(report.written(Artifact::AdminResource));
    assert!(project.path().join("app/Nova/Product.php").exists());
}

#[test]
fn test_admin_without_panel_is_a_warning() {
    let project = laravel_project();
    let options = GenerationOptions {
        admin: Some(AdminTarget::Detect),
        ..Default::default()
    };
    let report = generate(project.path(), "Product", options, false);

    assert!(report.file(Artifact::AdminResource).is_none());
    assert!(report.warnings().any(|w| w.contains("No admin panel detected")));
}

#[test]
fn test_docs_list_configured_endpoints() {
    let project = laravel_project();
    let options = GenerationOptions {
        docs: true,
        ..Default::default()
    };
    generate(project.path(), "UserProfile", options, false);

    let docs = fs::read_to_string(project.path().join("docs/api/UserProfile.md")).unwrap();
    assert!(docs.starts_with("# UserProfile API"));
    assert!(docs.contains("| GET | `/api/user-profiles` | index |"));
    assert!(docs.contains("| DELETE | `/api/user-profiles/{id}` | destroy |"));
}

#[test]
fn test_custom_stub_overrides_bundled_service() {
    let project = laravel_project();
    let stubs = project.path().join("stubs");
    fs::create_dir_all(&stubs).unwrap();
    fs::write(
        stubs.join("service.stub"),
        "<?php // {{ class }} for {{ model }} {{ unknown }}",
    )
    .unwrap();

    let config = ScaffoldConfig {
        use_custom_stubs: true,
        custom_stubs_path: PathBuf::from("stubs"),
        ..Default::default()
    };
    ServiceGenerator::new(project.path(), config)
        .with_artisan(None)
        .generate("Invoice", &GenerationRequest::default())
        .unwrap();

    let service_path = project.path().join("app/Services/Invoice/InvoiceService.php");
    let service = fs::read_to_string(service_path).unwrap();
    assert_eq!(service, "<?php // InvoiceService for Invoice {{ unknown }}");
}
