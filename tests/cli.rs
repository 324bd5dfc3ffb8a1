//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

fn run_archlens(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_archlens");
    Command::new(bin)
        .args(args)
        .env_remove("ARCHLENS_RECORD")
        .output()
        .expect("failed to run archlens binary")
}

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

fn express_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("package.json", r#"{"dependencies":{"express":"^4.19.0","mongoose":"^8.0.0"}}"#),
            ("app.js", "const app = require('express')();\napp.listen(3000);\n"),
            ("routes/userRoutes.js", "router.get('/users', controller.list);\n"),
            ("services/userService.js", "module.exports = {};\n"),
            ("models/User.js", "module.exports = mongoose.model('User');\n"),
            ("node_modules/express/index.js", "module.exports = {};\n"),
        ],
    );
    dir
}

#[test]
fn analyze_prints_json_report() {
    let repo = express_repo();
    let output = run_archlens(&["analyze", repo.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["architecture"], "Layered Architecture (Route → Service → Model)");
    assert_eq!(report["languages"], serde_json::json!(["JavaScript"]));
    assert_eq!(report["frameworks"], serde_json::json!(["Express", "MongoDB"]));
    assert_eq!(report["structure"]["entryPoints"], serde_json::json!(["app.js"]));
    assert_eq!(report["onboardingGuide"]["modifyApi"], "routes/userRoutes.js");
    assert_eq!(
        report["flowDiagram"],
        "Client → Routes → Controllers → Services → Models → Database"
    );
    assert!(report.get("aiAnalysis").is_none());
}

#[test]
fn analyze_writes_yaml_to_output_file() {
    let repo = express_repo();
    let out = tempfile::tempdir().unwrap();
    let report_path = out.path().join("nested/report.yaml");
    let output = run_archlens(&[
        "analyze",
        repo.path().to_str().unwrap(),
        "--format",
        "yaml",
        "--output",
        report_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let yaml = std::fs::read_to_string(&report_path).unwrap();
    let report: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(
        report["architecture"].as_str(),
        Some("Layered Architecture (Route → Service → Model)")
    );
    assert_eq!(report["onboardingGuide"]["database"].as_str(), Some("models/User.js"));
}

#[test]
fn analyze_missing_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let output = run_archlens(&["analyze", missing.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("path not found"));
}

#[test]
fn analyze_file_path_fails() {
    let repo = express_repo();
    let file = repo.path().join("app.js");
    let output = run_archlens(&["analyze", file.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a directory"));
}

#[test]
fn excerpt_lists_files_in_walk_order() {
    let repo = express_repo();
    let output = run_archlens(&["excerpt", repo.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let app = stdout.find("FILE: app.js").unwrap();
    let models = stdout.find("FILE: models/User.js").unwrap();
    let routes = stdout.find("FILE: routes/userRoutes.js").unwrap();
    assert!(app < models && models < routes);
    assert!(!stdout.contains("node_modules"));
}

#[test]
fn config_file_in_root_is_honored() {
    let repo = express_repo();
    std::fs::write(repo.path().join(".archlens.yaml"), "excerpt:\n  max_files: 1\n").unwrap();
    let output = run_archlens(&["excerpt", repo.path().to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("FILE: ").count(), 1);
}

#[test]
fn malformed_config_fails() {
    let repo = express_repo();
    let config = repo.path().join("bad.yaml");
    std::fs::write(&config, "excerpt: [1, 2").unwrap();
    let output = run_archlens(&[
        "analyze",
        repo.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to parse config"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_archlens(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
