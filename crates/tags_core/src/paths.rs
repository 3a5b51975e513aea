//! Path resolution for config files and `in_path` prefixes
//!
//! Priority for the config file:
//! 1) explicit path (`-c`)
//! 2) TAGS_CONFIG (tilde-expanded)
//! 3) <platform config dir>/tags/rules.json

use crate::error::{Result, TagsError};
use std::path::{Component, Path, PathBuf};

/// Environment variable overriding the default config path.
pub const CONFIG_ENV_VAR: &str = "TAGS_CONFIG";

const CONFIG_DIR_NAME: &str = "tags";
const CONFIG_FILE_NAME: &str = "rules.json";

/// Resolve the config path used when no `-c` flag is given.
pub fn default_config_path() -> PathBuf {
    let fallback = config_home().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);

    match std::env::var(CONFIG_ENV_VAR) {
        Ok(value) if !value.is_empty() => match expand_tilde(&value) {
            Ok(expanded) => PathBuf::from(expanded),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring {}", CONFIG_ENV_VAR);
                fallback
            }
        },
        _ => fallback,
    }
}

fn config_home() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
}

/// Expand a leading `~` to the user's home directory.
///
/// Everything after the `~` is joined onto the home directory, so both
/// `~/fonts` and `~fonts` resolve to `$HOME/fonts`.
pub fn expand_tilde(path: &str) -> Result<String> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(path.to_string());
    };

    let home =
        dirs::home_dir().ok_or_else(|| TagsError::HomeDirUnavailable(path.to_string()))?;
    let rest = rest.trim_start_matches(['/', '\\']);
    let expanded = if rest.is_empty() { home } else { home.join(rest) };

    Ok(expanded.to_string_lossy().into_owned())
}

/// Make a path absolute against the current directory and normalize it
/// lexically (no symlink resolution, no filesystem access besides `cwd`).
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean(path));
    }

    let cwd = std::env::current_dir().map_err(|e| TagsError::io(".", e))?;
    Ok(clean(&cwd.join(path)))
}

/// Lexically remove `.` and `..` components and redundant separators.
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_passthrough() {
        assert_eq!(expand_tilde("/usr/share/fonts").unwrap(), "/usr/share/fonts");
        assert_eq!(expand_tilde("relative/dir").unwrap(), "relative/dir");
    }

    #[test]
    fn test_expand_tilde_home() {
        let home = dirs::home_dir().expect("home dir available in tests");

        assert_eq!(expand_tilde("~").unwrap(), home.to_string_lossy());
        assert_eq!(
            expand_tilde("~/Documents").unwrap(),
            home.join("Documents").to_string_lossy()
        );
    }

    #[test]
    fn test_clean_removes_dots() {
        assert_eq!(clean(Path::new("/a/./b/../c/")), PathBuf::from("/a/c"));
        assert_eq!(clean(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(clean(Path::new("a/../..")), PathBuf::from(".."));
        assert_eq!(clean(Path::new("")), PathBuf::from("."));
    }

    #[test]
    fn test_absolutize_relative() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolutize(Path::new("sub/../x")).unwrap(), cwd.join("x"));
        assert_eq!(absolutize(Path::new("/tmp/")).unwrap(), PathBuf::from("/tmp"));
    }
}
