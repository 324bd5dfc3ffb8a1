//! Derived artifacts: onboarding guide and flow diagram.

use serde::{Deserialize, Serialize};

use super::RepositoryModel;

/// Fixed-topology diagram of a request's path through a layered backend.
pub const FLOW_DIAGRAM: &str = "Client → Routes → Controllers → Services → Models → Database";

const START_HERE_FALLBACK: &str = "Check root index/app file";
const MODIFY_API_FALLBACK: &str = "Find route files";
const BUSINESS_LOGIC_FALLBACK: &str = "Find service layer";
const DATABASE_FALLBACK: &str = "Find model files";

/// Where a new contributor should look first, one entry per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingGuide {
    /// First entry point, or a hint.
    pub start_here: String,
    /// First route file, or a hint.
    pub modify_api: String,
    /// First service file, or a hint.
    pub business_logic: String,
    /// First database file (model file if there are none), or a hint.
    pub database: String,
}

impl OnboardingGuide {
    /// The guide for a repository where nothing was classified.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            start_here: START_HERE_FALLBACK.to_string(),
            modify_api: MODIFY_API_FALLBACK.to_string(),
            business_logic: BUSINESS_LOGIC_FALLBACK.to_string(),
            database: DATABASE_FALLBACK.to_string(),
        }
    }
}

/// Picks the first path of each tracked bucket.
#[must_use]
pub fn onboarding_guide(model: &RepositoryModel) -> OnboardingGuide {
    let s = &model.structure;
    let database_bucket = if s.db_files.is_empty() { &s.models } else { &s.db_files };
    OnboardingGuide {
        start_here: first_or(&s.entry_points, START_HERE_FALLBACK),
        modify_api: first_or(&s.routes, MODIFY_API_FALLBACK),
        business_logic: first_or(&s.services, BUSINESS_LOGIC_FALLBACK),
        database: first_or(database_bucket, DATABASE_FALLBACK),
    }
}

fn first_or(bucket: &[String], fallback: &str) -> String {
    bucket.first().map_or_else(|| fallback.to_string(), Clone::clone)
}

/// Renders the flow diagram. Detected flow events are reported in the
/// model's `flow` sequence, not interpolated here.
#[must_use]
pub fn flow_diagram(_model: &RepositoryModel) -> String {
    FLOW_DIAGRAM.to_string()
}
