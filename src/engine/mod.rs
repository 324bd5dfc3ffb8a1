//! Repository structure inference: walk a tree, tag files by role, and
//! derive an architecture verdict, onboarding guide, and flow diagram.
//!
//! The pipeline is a single synchronous pass:
//! [`walker::walk`] → [`classifier::Classifier::classify`] per file →
//! [`aggregate::aggregate`] → [`architecture::infer`] and the generators in
//! [`guide`]. Every stage produces fresh values; nothing is shared between
//! runs.

pub mod aggregate;
pub mod architecture;
pub mod classifier;
pub mod excerpt;
pub mod guide;
pub mod walker;

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::config::AnalyzerConfig;
use crate::error::EngineError;
use crate::ports::FileSystem;

pub use architecture::ArchitectureVerdict;
pub use guide::OnboardingGuide;
pub use walker::CancelToken;

/// A regular file found by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Path relative to the analyzed root, `/`-separated.
    pub path: String,
    /// Final path component.
    pub name: String,
}

/// Architectural responsibility inferred for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Process entry point (`app.js`, `main.py`, ...).
    EntryPoint,
    /// HTTP route definitions.
    Route,
    /// Business-logic service layer.
    Service,
    /// Data models.
    Model,
    /// Request controllers.
    Controller,
    /// Database access or connection code.
    DbFile,
}

/// Everything the classifier learned about one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Root-relative path of the file.
    pub path: String,
    /// Languages implied by the file's extension.
    pub languages: BTreeSet<String>,
    /// Frameworks found in a manifest's content.
    pub frameworks: BTreeSet<String>,
    /// Roles matched by filename rules. Not exclusive.
    pub roles: BTreeSet<Role>,
    /// Runtime behavior notes, in rule order.
    pub flow_events: Vec<String>,
}

/// Role buckets plus the flow sequence, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    /// Files tagged [`Role::EntryPoint`].
    pub entry_points: Vec<String>,
    /// Files tagged [`Role::Route`].
    pub routes: Vec<String>,
    /// Files tagged [`Role::Service`].
    pub services: Vec<String>,
    /// Files tagged [`Role::Model`].
    pub models: Vec<String>,
    /// Files tagged [`Role::Controller`].
    pub controllers: Vec<String>,
    /// Files tagged [`Role::DbFile`].
    pub db_files: Vec<String>,
    /// Flow events followed by the fixed summary line.
    pub flow: Vec<String>,
}

impl Structure {
    /// Returns the bucket holding files tagged with `role`.
    #[must_use]
    pub fn bucket(&self, role: Role) -> &[String] {
        match role {
            Role::EntryPoint => &self.entry_points,
            Role::Route => &self.routes,
            Role::Service => &self.services,
            Role::Model => &self.models,
            Role::Controller => &self.controllers,
            Role::DbFile => &self.db_files,
        }
    }

    fn bucket_mut(&mut self, role: Role) -> &mut Vec<String> {
        match role {
            Role::EntryPoint => &mut self.entry_points,
            Role::Route => &mut self.routes,
            Role::Service => &mut self.services,
            Role::Model => &mut self.models,
            Role::Controller => &mut self.controllers,
            Role::DbFile => &mut self.db_files,
        }
    }
}

/// Aggregated result of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryModel {
    /// Union of detected languages.
    pub languages: BTreeSet<String>,
    /// Union of detected frameworks.
    pub frameworks: BTreeSet<String>,
    /// Role buckets and flow.
    pub structure: Structure,
}

/// The record handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Architecture verdict label.
    pub architecture: String,
    /// Detected languages, sorted.
    pub languages: Vec<String>,
    /// Detected frameworks, sorted.
    pub frameworks: Vec<String>,
    /// Role buckets and flow.
    pub structure: Structure,
    /// Representative file per role.
    pub onboarding_guide: OnboardingGuide,
    /// Fixed-topology flow diagram.
    pub flow_diagram: String,
    /// Natural-language summary, present only when one was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}

impl AnalysisReport {
    /// Builds the report for a model; the verdict and generators are recomputed here.
    #[must_use]
    pub fn from_model(model: &RepositoryModel) -> Self {
        Self {
            architecture: architecture::infer(model).label().to_string(),
            languages: model.languages.iter().cloned().collect(),
            frameworks: model.frameworks.iter().cloned().collect(),
            structure: model.structure.clone(),
            onboarding_guide: guide::onboarding_guide(model),
            flow_diagram: guide::flow_diagram(model),
            ai_analysis: None,
        }
    }
}

/// Walker output together with the model built from it.
#[derive(Debug, Clone)]
pub struct Scan {
    /// Every file visited, in traversal order.
    pub files: Vec<FileDescriptor>,
    /// The aggregated model.
    pub model: RepositoryModel,
}

/// Runs the analysis pipeline with a given config and content source.
pub struct Analyzer<'a> {
    config: &'a AnalyzerConfig,
    fs: &'a dyn FileSystem,
    cancel: CancelToken,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer that never observes cancellation.
    #[must_use]
    pub fn new(config: &'a AnalyzerConfig, fs: &'a dyn FileSystem) -> Self {
        Self { config, fs, cancel: CancelToken::new() }
    }

    /// Uses `cancel` to abort long traversals.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Walks `root` and classifies every file.
    ///
    /// # Errors
    ///
    /// Fails if the root is missing or unreadable, if the tree contains a
    /// directory cycle, or if the run is cancelled. Unreadable file contents
    /// are not errors.
    pub fn scan(&self, root: &Path) -> Result<Scan, EngineError> {
        let files = walker::walk(root, self.config, &self.cancel)?;
        let classifier = classifier::Classifier::new(root, self.fs);

        let mut classifications = Vec::with_capacity(files.len());
        for descriptor in &files {
            self.cancel.check()?;
            classifications.push(classifier.classify(descriptor));
        }

        let model = aggregate::aggregate(&classifications);
        tracing::info!(
            root = %root.display(),
            files = files.len(),
            entry_points = model.structure.entry_points.len(),
            routes = model.structure.routes.len(),
            services = model.structure.services.len(),
            models = model.structure.models.len(),
            controllers = model.structure.controllers.len(),
            db_files = model.structure.db_files.len(),
            "analysis complete"
        );
        Ok(Scan { files, model })
    }

    /// Walks `root` and returns the aggregated model.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::scan`].
    pub fn analyze(&self, root: &Path) -> Result<RepositoryModel, EngineError> {
        self.scan(root).map(|scan| scan.model)
    }
}

/// Analyzes `root` with the default config, reading contents from disk.
///
/// # Errors
///
/// See [`Analyzer::scan`].
pub fn analyze(root: &Path) -> Result<RepositoryModel, EngineError> {
    let config = AnalyzerConfig::default();
    Analyzer::new(&config, &LiveFileSystem).analyze(root)
}
