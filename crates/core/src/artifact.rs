use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One kind of generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    Service,
    Interface,
    Model,
    Migration,
    Controller,
    Request,
    Resource,
    Test,
    AdminResource,
    Documentation,
}

impl Artifact {
    pub fn label(&self) -> &'static str {
        match self {
            Artifact::Service => "service",
            Artifact::Interface => "interface",
            Artifact::Model => "model",
            Artifact::Migration => "migration",
            Artifact::Controller => "controller",
            Artifact::Request => "request",
            Artifact::Resource => "resource",
            Artifact::Test => "test",
            Artifact::AdminResource => "admin resource",
            Artifact::Documentation => "documentation",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Supported admin panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminPanel {
    Nova,
    Filament,
}

impl AdminPanel {
    /// Composer package that marks the panel as installed.
    pub fn composer_package(&self) -> &'static str {
        match self {
            AdminPanel::Nova => "laravel/nova",
            AdminPanel::Filament => "filament/filament",
        }
    }
}

/// Which admin panel an admin resource targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTarget {
    /// Pick whichever panel the project has installed.
    Detect,
    Panel(AdminPanel),
}

/// Keys used for presets and the preferences cache, in display order.
pub const OPTION_KEYS: [&str; 9] = [
    "api",
    "model",
    "migration",
    "controller",
    "request",
    "resource",
    "test",
    "admin",
    "docs",
];

/// Artifact selection flags. Service and interface are always generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    pub api: bool,
    pub model: bool,
    pub migration: bool,
    pub controller: bool,
    pub request: bool,
    pub resource: bool,
    pub test: bool,
    pub docs: bool,
    pub admin: Option<AdminTarget>,
}

impl GenerationOptions {
    /// Everything `--all` implies.
    pub fn all() -> Self {
        Self {
            api: true,
            model: true,
            migration: true,
            controller: true,
            request: true,
            resource: true,
            test: true,
            docs: true,
            admin: Some(AdminTarget::Detect),
        }
    }

    pub fn from_map(map: &BTreeMap<String, bool>) -> Self {
        let flag = |key: &str| map.get(key).copied().unwrap_or(false);

        if flag("all") {
            return Self::all();
        }

        let admin = if flag("filament") {
            Some(AdminTarget::Panel(AdminPanel::Filament))
        } else if flag("nova") {
            Some(AdminTarget::Panel(AdminPanel::Nova))
        } else if flag("admin") {
            Some(AdminTarget::Detect)
        } else {
            None
        };

        Self {
            api: flag("api"),
            model: flag("model"),
            migration: flag("migration"),
            controller: flag("controller"),
            request: flag("request"),
            resource: flag("resource"),
            test: flag("test"),
            docs: flag("docs"),
            admin,
        }
    }

    pub fn to_map(&self) -> BTreeMap<String, bool> {
        let mut map = BTreeMap::new();
        map.insert("api".to_string(), self.api);
        map.insert("model".to_string(), self.model);
        map.insert("migration".to_string(), self.migration);
        map.insert("controller".to_string(), self.controller);
        map.insert("request".to_string(), self.request);
        map.insert("resource".to_string(), self.resource);
        map.insert("test".to_string(), self.test);
        map.insert("docs".to_string(), self.docs);
        map.insert("admin".to_string(), self.admin.is_some());
        match self.admin {
            Some(AdminTarget::Panel(AdminPanel::Nova)) => {
                map.insert("nova".to_string(), true);
            }
            Some(AdminTarget::Panel(AdminPanel::Filament)) => {
                map.insert("filament".to_string(), true);
            }
            _ => {}
        }
        map
    }

    /// Artifacts this selection produces, in generation order.
    pub fn artifacts(&self) -> Vec<Artifact> {
        let mut artifacts = vec![Artifact::Service, Artifact::Interface];
        let optional = [
            (self.model, Artifact::Model),
            (self.migration, Artifact::Migration),
            (self.controller, Artifact::Controller),
            (self.request, Artifact::Request),
            (self.resource, Artifact::Resource),
            (self.test, Artifact::Test),
            (self.admin.is_some(), Artifact::AdminResource),
            (self.docs, Artifact::Documentation),
        ];
        artifacts.extend(
            optional
                .into_iter()
                .filter(|(enabled, _)| *enabled)
                .map(|(_, artifact)| artifact),
        );
        artifacts
    }

    /// True when at least one optional artifact or the api variant is selected.
    pub fn any_selected(&self) -> bool {
        self.api || self.artifacts().len() > 2
    }
}

/// A fully resolved generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub options: GenerationOptions,
    pub force: bool,
}

impl GenerationRequest {
    pub fn new(options: GenerationOptions, force: bool) -> Self {
        Self { options, force }
    }
}
