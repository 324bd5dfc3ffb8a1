//! Maps populated role buckets to an architecture verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{RepositoryModel, Structure};

/// The closed set of architecture labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchitectureVerdict {
    /// Routes, services and models are all present.
    Layered,
    /// Routes and services, no models.
    LayeredApiWithoutModels,
    /// Routes without a service layer.
    ControllerBased,
    /// Database files without a routing layer.
    MonolithicDirectDb,
    /// None of the above.
    Unknown,
}

impl ArchitectureVerdict {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Layered => "Layered Architecture (Route → Service → Model)",
            Self::LayeredApiWithoutModels => "Layered API (no Model layer)",
            Self::ControllerBased => "Controller-based Architecture",
            Self::MonolithicDirectDb => "Monolithic API with Direct DB Access",
            Self::Unknown => "Basic / Unknown Architecture",
        }
    }
}

impl fmt::Display for ArchitectureVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered decision list; the first matching predicate wins.
const DECISIONS: &[(fn(&Structure) -> bool, ArchitectureVerdict)] = &[
    (has_routes_services_and_models, ArchitectureVerdict::Layered),
    (has_routes_and_services, ArchitectureVerdict::LayeredApiWithoutModels),
    (has_routes, ArchitectureVerdict::ControllerBased),
    (has_db_files, ArchitectureVerdict::MonolithicDirectDb),
];

fn has_routes_services_and_models(s: &Structure) -> bool {
    has_routes_and_services(s) && !s.models.is_empty()
}

fn has_routes_and_services(s: &Structure) -> bool {
    has_routes(s) && !s.services.is_empty()
}

fn has_routes(s: &Structure) -> bool {
    !s.routes.is_empty()
}

fn has_db_files(s: &Structure) -> bool {
    !s.db_files.is_empty()
}

/// Infers the verdict from the model's current buckets.
#[must_use]
pub fn infer(model: &RepositoryModel) -> ArchitectureVerdict {
    DECISIONS
        .iter()
        .find(|(matches, _)| matches(&model.structure))
        .map_or(ArchitectureVerdict::Unknown, |(_, verdict)| *verdict)
}
