use api_scaffold_core::Artifact;
use std::path::{Path, PathBuf};

/// What happened to one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Created,
    Overwritten { backup: Option<PathBuf> },
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub status: FileStatus,
}

impl GeneratedFile {
    pub fn was_written(&self) -> bool {
        !matches!(self.status, FileStatus::Skipped)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

/// Everything a generation run did, in order.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
    pub notices: Vec<Notice>,
    /// Interface was bound in the service provider during this run
    pub binding_registered: bool,
}

impl GenerationReport {
    pub fn record(&mut self, artifact: Artifact, path: &Path, status: FileStatus) {
        self.files.push(GeneratedFile {
            artifact,
            path: path.to_path_buf(),
            status,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::Info(message.into()));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("warning: {}", message);
        self.notices.push(Notice::Warning(message));
    }

    pub fn file(&self, artifact: Artifact) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.artifact == artifact)
    }

    pub fn written(&self, artifact: Artifact) -> bool {
        self.file(artifact).is_some_and(GeneratedFile::was_written)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().filter_map(|notice| match notice {
            Notice::Warning(message) => Some(message.as_str()),
            Notice::Info(_) => None,
        })
    }
}
