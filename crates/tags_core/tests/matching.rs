//! End-to-end matching tests
//!
//! Load a rules file, evaluate real directories, and check the reported tags.

use std::fs;
use std::path::PathBuf;
use tags_core::{load_tag_set, save_tag_set, EvalMode, MatchEngine, MatchOptions, PrefixMode, TagSet};
use tempfile::TempDir;

/// Temp project directory plus a rules file next to it
struct TestEnv {
    _temp: TempDir,
    pub project_dir: PathBuf,
    pub config_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let project_dir = temp.path().join("project");
        let config_path = temp.path().join("rules.json");

        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        Self {
            _temp: temp,
            project_dir,
            config_path,
        }
    }

    fn write_config(&self, json: &str) -> TagSet {
        fs::write(&self.config_path, json).expect("Failed to write config");
        load_tag_set(&self.config_path).expect("Failed to load config")
    }

    fn write_file(&self, name: &str, content: &str) {
        let path = self.project_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    fn find(&self, set: &TagSet, mode: EvalMode) -> Vec<String> {
        let mut found = MatchEngine::default()
            .find_matching_tags(set, &self.project_dir, mode)
            .expect("find failed");
        found.sort();
        found
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_makefile_scenario() {
    let env = TestEnv::new();
    let set = env.write_config(r#"{"make":{"file_exists":{"files":["Makefile"]}}}"#);

    assert!(env.find(&set, EvalMode::Sequential).is_empty());

    env.write_file("Makefile", "all:\n\techo hi\n");
    assert_eq!(env.find(&set, EvalMode::Sequential), vec!["make"]);
    assert_eq!(env.find(&set, EvalMode::Parallel), vec!["make"]);
}

#[test]
fn test_react_scenario() {
    let env = TestEnv::new();
    let set = env.write_config(r#"{"react":{"file_contains":{"search":{"package.json":"react"}}}}"#);

    env.write_file("package.json", r#"{"dependencies": {"vue": "^3.0.0"}}"#);
    assert!(env.find(&set, EvalMode::Sequential).is_empty());

    env.write_file("package.json", r#"{"dependencies": {"react": "^18.0.0"}}"#);
    assert_eq!(env.find(&set, EvalMode::Sequential), vec!["react"]);
}

#[test]
fn test_add_then_remove_never_reports() {
    let env = TestEnv::new();
    let mut set = TagSet::new();

    set.add_rule("fonts", "in_path", &["/usr/share/fonts".to_string()]).unwrap();
    set.remove_rule("fonts", "in_path", &["/usr/share/fonts".to_string()]).unwrap();
    save_tag_set(&env.config_path, &set).unwrap();

    let reloaded = load_tag_set(&env.config_path).unwrap();
    assert!(reloaded.get("fonts").is_none());

    let found = MatchEngine::default()
        .find_matching_tags(&set, std::path::Path::new("/usr/share/fonts/truetype"), EvalMode::Sequential)
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_or_semantics_across_rule_kinds() {
    let env = TestEnv::new();
    let json = format!(
        r#"{{"proj":{{"file_exists":{{"files":["Makefile"]}},"in_path":{{"paths":[{}]}}}}}}"#,
        serde_json::to_string(&env.project_dir.to_string_lossy()).unwrap()
    );
    let set = env.write_config(&json);

    assert_eq!(env.find(&set, EvalMode::Sequential), vec!["proj"]);
    assert_eq!(env.find(&set, EvalMode::Parallel), vec!["proj"]);
}

#[test]
fn test_many_tags_parallel() {
    let env = TestEnv::new();
    env.write_file("Cargo.toml", "[package]\nname = \"x\"\n");
    env.write_file("src/main.rs", "fn main() {}\n");

    let mut set = TagSet::new();
    for i in 0..32 {
        let file = if i % 2 == 0 { "Cargo.toml" } else { "missing.txt" };
        set.add_rule(&format!("tag{i:02}"), "file_exists", &[file.to_string()]).unwrap();
    }
    set.add_rule("rust", "file_contains", &["src/main.rs".to_string(), "fn main".to_string()])
        .unwrap();

    let parallel = env.find(&set, EvalMode::Parallel);
    let sequential = env.find(&set, EvalMode::Sequential);
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.len(), 17);
    assert!(parallel.contains(&"rust".to_string()));
}

#[test]
fn test_failing_tag_does_not_abort_scan() {
    let env = TestEnv::new();
    fs::create_dir_all(env.project_dir.join("package.json")).unwrap();
    env.write_file("Makefile", "");

    let set = env.write_config(
        r#"{
            "react": {"file_contains": {"search": {"package.json": "react"}}},
            "make": {"file_exists": {"files": ["Makefile"]}}
        }"#,
    );

    assert_eq!(env.find(&set, EvalMode::Sequential), vec!["make"]);
    assert_eq!(env.find(&set, EvalMode::Parallel), vec!["make"]);
}

#[test]
fn test_segment_prefix_mode() {
    let env = TestEnv::new();
    let sibling = env.project_dir.with_file_name("projectX");
    fs::create_dir_all(&sibling).unwrap();

    let mut set = TagSet::new();
    set.add_rule("proj", "in_path", &[env.project_dir.to_string_lossy().into_owned()])
        .unwrap();

    let loose = MatchEngine::default()
        .find_matching_tags(&set, &sibling, EvalMode::Sequential)
        .unwrap();
    assert_eq!(loose, vec!["proj"]);

    let strict = MatchEngine::new(MatchOptions {
        prefix_mode: PrefixMode::Segment,
    })
    .find_matching_tags(&set, &sibling, EvalMode::Sequential)
    .unwrap();
    assert!(strict.is_empty());
}
