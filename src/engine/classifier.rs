//! Rule-table classification of a single file.
//!
//! Every rule is applied independently and the results are unioned, so a
//! file can carry several roles at once. Filename rules never touch the
//! disk. Content rules run only for source files and dependency manifests,
//! and a failed read simply contributes nothing.

use std::path::Path;

use super::{Classification, FileDescriptor, Role};
use crate::ports::FileSystem;

/// File extension → language tag.
const LANGUAGE_RULES: &[(&str, &str)] = &[
    ("js", "JavaScript"),
    ("mjs", "JavaScript"),
    ("cjs", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("py", "Python"),
    ("java", "Java"),
];

const ENTRY_POINT_STEMS: &[&str] = &["index", "app", "server", "main"];
const ENTRY_POINT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "jsx", "tsx", "py", "java"];

/// How a role rule inspects a file's name.
#[derive(Debug, Clone, Copy)]
enum NameMatch {
    /// File name is one of the entry-point stems with a known extension.
    EntryPointName,
    /// Lowercased root-relative path contains the needle.
    PathContains(&'static str),
}

/// A filename predicate paired with the role it assigns.
#[derive(Debug, Clone, Copy)]
struct RoleRule {
    matcher: NameMatch,
    role: Role,
}

const ROLE_RULES: &[RoleRule] = &[
    RoleRule { matcher: NameMatch::EntryPointName, role: Role::EntryPoint },
    RoleRule { matcher: NameMatch::PathContains("route"), role: Role::Route },
    RoleRule { matcher: NameMatch::PathContains("service"), role: Role::Service },
    RoleRule { matcher: NameMatch::PathContains("controller"), role: Role::Controller },
    RoleRule { matcher: NameMatch::PathContains("model"), role: Role::Model },
    RoleRule { matcher: NameMatch::PathContains("db"), role: Role::DbFile },
];

/// A manifest content check. `needle: None` means the manifest's presence
/// alone implies the framework.
#[derive(Debug, Clone, Copy)]
struct FrameworkRule {
    manifests: &'static [&'static str],
    needle: Option<&'static str>,
    framework: &'static str,
}

const PACKAGE_JSON: &[&str] = &["package.json"];
const PYTHON_MANIFESTS: &[&str] = &["requirements.txt"];
const JVM_MANIFESTS: &[&str] = &["pom.xml", "build.gradle", "build.gradle.kts"];

// Plain substring search: "next" also matches unrelated package names.
const FRAMEWORK_RULES: &[FrameworkRule] = &[
    FrameworkRule { manifests: PACKAGE_JSON, needle: Some("express"), framework: "Express" },
    FrameworkRule { manifests: PACKAGE_JSON, needle: Some("react"), framework: "React" },
    FrameworkRule { manifests: PACKAGE_JSON, needle: Some("next"), framework: "Next.js" },
    FrameworkRule { manifests: PACKAGE_JSON, needle: Some("mongoose"), framework: "MongoDB" },
    FrameworkRule { manifests: PYTHON_MANIFESTS, needle: None, framework: "Python Backend" },
    FrameworkRule { manifests: PYTHON_MANIFESTS, needle: Some("django"), framework: "Django" },
    FrameworkRule { manifests: PYTHON_MANIFESTS, needle: Some("flask"), framework: "Flask" },
    FrameworkRule { manifests: PYTHON_MANIFESTS, needle: Some("fastapi"), framework: "FastAPI" },
    FrameworkRule {
        manifests: JVM_MANIFESTS,
        needle: Some("spring-boot"),
        framework: "Spring Boot",
    },
];

/// Runtime behavior signalled by a content idiom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowKind {
    ServerStart,
    RouteDefinition,
}

impl FlowKind {
    fn describe(self, path: &str) -> String {
        match self {
            Self::ServerStart => format!("server starts in {path}"),
            Self::RouteDefinition => format!("route defined in {path}"),
        }
    }
}

const FLOW_RULES: &[(FlowKind, &[&str])] = &[
    (
        FlowKind::ServerStart,
        &[".listen(", "app.run(", "uvicorn.run(", "SpringApplication.run(", "createServer("],
    ),
    (
        FlowKind::RouteDefinition,
        &[
            "router.get(",
            "router.post(",
            "router.put(",
            "router.patch(",
            "router.delete(",
            "app.get(",
            "app.post(",
            "app.put(",
            "app.patch(",
            "app.delete(",
            "@app.route(",
            "@router.",
            "@GetMapping",
            "@PostMapping",
            "@RequestMapping",
        ],
    ),
];

/// Applies the rule tables to files under one root.
pub struct Classifier<'a> {
    root: &'a Path,
    fs: &'a dyn FileSystem,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier reading contents relative to `root` through `fs`.
    #[must_use]
    pub fn new(root: &'a Path, fs: &'a dyn FileSystem) -> Self {
        Self { root, fs }
    }

    /// Classifies one file. Never fails.
    #[must_use]
    pub fn classify(&self, descriptor: &FileDescriptor) -> Classification {
        let mut classification = classify_name(descriptor);

        let is_source = !classification.languages.is_empty();
        let manifest_rules: Vec<&FrameworkRule> = FRAMEWORK_RULES
            .iter()
            .filter(|rule| rule.manifests.iter().any(|m| m.eq_ignore_ascii_case(&descriptor.name)))
            .collect();

        if is_source || !manifest_rules.is_empty() {
            match self.fs.read_to_string(&self.root.join(&descriptor.path)) {
                Ok(content) => {
                    for rule in manifest_rules {
                        let matched = match rule.needle {
                            Some(needle) => content.contains(needle),
                            None => true,
                        };
                        if matched {
                            classification.frameworks.insert(rule.framework.to_string());
                        }
                    }
                    if is_source {
                        classification.flow_events = flow_events(&descriptor.path, &content);
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        path = %descriptor.path,
                        error = %e,
                        "unreadable file, using name rules only"
                    );
                }
            }
        }

        tracing::trace!(path = %descriptor.path, roles = ?classification.roles, "classified");
        classification
    }
}

/// Applies the filename-only rules: language and roles.
fn classify_name(descriptor: &FileDescriptor) -> Classification {
    let extension = extension_of(&descriptor.name);
    let lower_path = descriptor.path.to_ascii_lowercase();

    let languages = extension
        .iter()
        .flat_map(|ext| {
            LANGUAGE_RULES
                .iter()
                .filter(move |(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, language)| (*language).to_string())
        })
        .collect();

    let roles = ROLE_RULES
        .iter()
        .filter(|rule| match rule.matcher {
            NameMatch::EntryPointName => is_entry_point_name(&descriptor.name),
            NameMatch::PathContains(needle) => lower_path.contains(needle),
        })
        .map(|rule| rule.role)
        .collect();

    Classification { path: descriptor.path.clone(), languages, roles, ..Classification::default() }
}

fn extension_of(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|ext| ext.to_str())
}

fn is_entry_point_name(name: &str) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    ENTRY_POINT_STEMS.iter().any(|s| s.eq_ignore_ascii_case(stem))
        && ENTRY_POINT_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

/// Flow events for `content`, at most one per kind, in rule order.
fn flow_events(path: &str, content: &str) -> Vec<String> {
    FLOW_RULES
        .iter()
        .filter(|(_, idioms)| idioms.iter().any(|idiom| content.contains(idiom)))
        .map(|(kind, _)| kind.describe(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::engine::test_support::write_tree;

    /// Filesystem whose reads always fail, like a binary or locked file.
    struct UnreadableFs;

    impl FileSystem for UnreadableFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err(format!("cannot read {}", path.display()).into())
        }

        fn write(
            &self,
            _path: &Path,
            _contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err("read-only".into())
        }
    }

    fn descriptor(path: &str) -> FileDescriptor {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        FileDescriptor { path: path.to_string(), name }
    }

    fn roles_of(path: &str) -> Vec<Role> {
        classify_name(&descriptor(path)).roles.into_iter().collect()
    }

    #[test]
    fn entry_point_names_are_recognized_case_insensitively() {
        for name in ["app.js", "server.js", "index.js", "main.py", "Main.java", "INDEX.TS"] {
            assert!(roles_of(name).contains(&Role::EntryPoint), "{name}");
        }
        for name in ["myindex.js", "app.json", "main", "apps.js"] {
            assert!(!roles_of(name).contains(&Role::EntryPoint), "{name}");
        }
    }

    #[test]
    fn role_substrings_match_path_case_insensitively() {
        assert_eq!(roles_of("routes/userRoutes.js"), vec![Role::Route]);
        assert_eq!(roles_of("src/UserService.ts"), vec![Role::Service]);
        assert_eq!(roles_of("src/userController.js"), vec![Role::Controller]);
        assert_eq!(roles_of("src/userModel.py"), vec![Role::Model]);
        assert_eq!(roles_of("db/connection.js"), vec![Role::DbFile]);
    }

    #[test]
    fn roles_are_additive() {
        assert_eq!(
            roles_of("routes/index.js"),
            vec![Role::EntryPoint, Role::Route]
        );
        assert_eq!(
            roles_of("services/dbService.js"),
            vec![Role::Service, Role::DbFile]
        );
    }

    #[test]
    fn languages_follow_extension() {
        let langs = |p: &str| -> Vec<String> {
            classify_name(&descriptor(p)).languages.into_iter().collect()
        };
        assert_eq!(langs("a.js"), vec!["JavaScript"]);
        assert_eq!(langs("a.tsx"), vec!["TypeScript"]);
        assert_eq!(langs("a.py"), vec!["Python"]);
        assert_eq!(langs("A.java"), vec!["Java"]);
        assert!(langs("README.md").is_empty());
    }

    #[test]
    fn content_idioms_produce_flow_events() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(
            dir.path(),
            &[("app.js", "const app = express();\napp.get('/', h);\napp.listen(3000);\n")],
        );
        let classifier = Classifier::new(dir.path(), &LiveFileSystem);
        let result = classifier.classify(&descriptor("app.js"));
        assert_eq!(result.flow_events, vec!["server starts in app.js", "route defined in app.js"]);
    }

    #[test]
    fn package_json_frameworks_use_substring_search() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(
            dir.path(),
            &[("package.json", r#"{"dependencies":{"express":"4","react":"18"}}"#)],
        );
        let classifier = Classifier::new(dir.path(), &LiveFileSystem);
        let result = classifier.classify(&descriptor("package.json"));
        let frameworks: Vec<String> = result.frameworks.into_iter().collect();
        assert_eq!(frameworks, vec!["Express", "React"]);
        assert!(result.flow_events.is_empty());
    }

    #[test]
    fn requirements_txt_always_implies_python_backend() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), &[("api/requirements.txt", "flask==3.0\n")]);
        let classifier = Classifier::new(dir.path(), &LiveFileSystem);
        let result = classifier.classify(&descriptor("api/requirements.txt"));
        assert!(result.frameworks.contains("Python Backend"));
        assert!(result.frameworks.contains("Flask"));
        assert!(!result.frameworks.contains("Django"));
    }

    #[test]
    fn unreadable_files_keep_name_tags() {
        let classifier = Classifier::new(Path::new("/project"), &UnreadableFs);
        let result = classifier.classify(&descriptor("routes/server.js"));
        assert!(result.roles.contains(&Role::EntryPoint));
        assert!(result.roles.contains(&Role::Route));
        assert!(result.languages.contains("JavaScript"));
        assert!(result.flow_events.is_empty());
    }

    #[test]
    fn non_source_files_are_not_read() {
        let classifier = Classifier::new(Path::new("/project"), &UnreadableFs);
        let result = classifier.classify(&descriptor("models/README.md"));
        assert_eq!(result.roles.into_iter().collect::<Vec<_>>(), vec![Role::Model]);
        assert!(result.languages.is_empty());
    }
}
