//! Folds per-file classifications into a [`RepositoryModel`].

use super::{Classification, RepositoryModel};

/// Fixed line appended after all flow events.
pub const FLOW_SUMMARY: &str = "Client → Routes → Services → Models → Database";

/// Builds a fresh model from classifications given in traversal order.
///
/// Languages and frameworks are unioned; each role bucket receives the
/// file's path in input order; flow events are concatenated in input order
/// and followed by [`FLOW_SUMMARY`].
#[must_use]
pub fn aggregate(classifications: &[Classification]) -> RepositoryModel {
    let mut model =
        classifications.iter().fold(RepositoryModel::default(), |mut model, classification| {
            model.languages.extend(classification.languages.iter().cloned());
            model.frameworks.extend(classification.frameworks.iter().cloned());
            for role in &classification.roles {
                model.structure.bucket_mut(*role).push(classification.path.clone());
            }
            model.structure.flow.extend(classification.flow_events.iter().cloned());
            model
        });
    model.structure.flow.push(FLOW_SUMMARY.to_string());
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Role;

    fn classified(path: &str, roles: &[Role], events: &[&str]) -> Classification {
        Classification {
            path: path.to_string(),
            roles: roles.iter().copied().collect(),
            flow_events: events.iter().map(|e| (*e).to_string()).collect(),
            ..Classification::default()
        }
    }

    #[test]
    fn buckets_preserve_traversal_order() {
        let model = aggregate(&[
            classified("b/route2.js", &[Role::Route], &[]),
            classified("a/route1.js", &[Role::Route], &[]),
        ]);
        assert_eq!(model.structure.routes, vec!["b/route2.js", "a/route1.js"]);
    }

    #[test]
    fn multi_role_files_land_in_every_bucket() {
        let model = aggregate(&[classified(
            "services/dbService.js",
            &[Role::Service, Role::DbFile],
            &[],
        )]);
        assert_eq!(model.structure.services, vec!["services/dbService.js"]);
        assert_eq!(model.structure.db_files, vec!["services/dbService.js"]);
        assert!(model.structure.models.is_empty());
    }

    #[test]
    fn flow_events_precede_summary_line() {
        let model = aggregate(&[
            classified("app.js", &[], &["server starts in app.js"]),
            classified("r.js", &[], &["route defined in r.js"]),
        ]);
        assert_eq!(
            model.structure.flow,
            vec!["server starts in app.js", "route defined in r.js", FLOW_SUMMARY]
        );
    }

    #[test]
    fn language_and_framework_sets_union() {
        let mut a = classified("a.js", &[], &[]);
        a.languages.insert("JavaScript".into());
        let mut b = classified("b.js", &[], &[]);
        b.languages.insert("JavaScript".into());
        b.frameworks.insert("Express".into());
        let model = aggregate(&[a, b]);
        assert_eq!(model.languages.len(), 1);
        assert!(model.frameworks.contains("Express"));
    }

    #[test]
    fn each_call_starts_from_empty_state() {
        let input = [classified("routes.js", &[Role::Route], &[])];
        let first = aggregate(&input);
        let second = aggregate(&input);
        assert_eq!(first, second);
        assert_eq!(second.structure.routes.len(), 1);
        assert_eq!(second.structure.flow.len(), 1);
    }
}
