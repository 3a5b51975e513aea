//! Loading and saving the JSON rules file

use crate::error::{Result, TagsError};
use crate::tag_set::TagSet;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Load a tag set from a JSON rules file.
pub fn load_tag_set(path: &Path) -> Result<TagSet> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            TagsError::NotFound(path.to_path_buf())
        } else {
            TagsError::io(path, e)
        }
    })?;

    let root: Value = serde_json::from_str(&content).map_err(|source| TagsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let set = TagSet::from_config(&root)?;
    debug!(path = %path.display(), tags = set.len(), "Loaded tag set");
    Ok(set)
}

/// Render the canonical JSON document: sorted keys, two-space indent,
/// trailing newline, empty rules and tags omitted.
pub fn to_json_string(set: &TagSet) -> String {
    let mut content = serde_json::to_string_pretty(&set.to_config())
        .unwrap_or_else(|_| "{}".to_string());
    content.push('\n');
    content
}

/// Save a tag set, replacing `path` atomically (temp file + rename).
pub fn save_tag_set(path: &Path, set: &TagSet) -> Result<()> {
    let content = to_json_string(set);

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| TagsError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| TagsError::io(parent, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| TagsError::io(tmp.path(), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))
            .map_err(|e| TagsError::io(tmp.path(), e))?;
    }

    tmp.persist(path).map_err(|e| TagsError::io(path, e.error))?;
    debug!(path = %path.display(), "Saved tag set");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
  "fonts": {
    "in_path": {
      "paths": [
        "/usr/share/fonts"
      ]
    }
  },
  "react": {
    "file_contains": {
      "search": {
        "package.json": "react"
      }
    },
    "file_exists": {
      "files": [
        "node_modules/react"
      ]
    }
  }
}
"#;

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_tag_set(&dir.path().join("rules.json")).unwrap_err();
        assert!(matches!(err, TagsError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_tag_set(&path), Err(TagsError::Parse { .. })));
    }

    #[test]
    fn test_load_bad_rule_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, r#"{"make": {"file_exists": {"file": ["Makefile"]}}}"#).unwrap();

        let err = load_tag_set(&path).unwrap_err();
        assert!(matches!(err, TagsError::Config(_)));
        assert!(err.to_string().contains("\"files\""));
    }

    #[test]
    fn test_save_load_save_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, SAMPLE).unwrap();

        let set = load_tag_set(&path).unwrap();
        save_tag_set(&path, &set).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert_eq!(first, SAMPLE);

        let reloaded = load_tag_set(&path).unwrap();
        assert_eq!(reloaded, set);
        save_tag_set(&path, &reloaded).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_drops_empty_tags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/tags/rules.json");

        let mut set = TagSet::new();
        set.add_rule("make", "file_exists", &["Makefile".to_string()]).unwrap();
        set.add_rule("tmp", "in_path", &["/tmp".to_string()]).unwrap();
        set.remove_rule("tmp", "in_path", &[]).unwrap();
        save_tag_set(&path, &set).unwrap();

        let saved = load_tag_set(&path).unwrap();
        assert_eq!(saved.names().collect::<Vec<_>>(), vec!["make"]);
    }
}
