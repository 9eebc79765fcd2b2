use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CHROME_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

pub const LIGHTHOUSE_CANDIDATES: &[&str] = &["lighthouse"];

/// Resolve an external program: an explicit path wins, otherwise the first
/// candidate found on `PATH`.
pub fn locate_binary(explicit: Option<&Path>, candidates: &[&str]) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return which::which(path).map_err(|_| Error::ToolNotFound(path.display().to_string()));
    }

    candidates
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or_else(|| Error::ToolNotFound(candidates.join(" / ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("chrome");
        std::fs::write(&fake, "").unwrap();

        let found = locate_binary(Some(&fake), CHROME_CANDIDATES).unwrap();
        assert_eq!(found, fake);
    }

    #[test]
    fn test_missing_tool_is_reported() {
        let err = locate_binary(None, &["definitely-not-installed-tool-4821"]).unwrap_err();
        match err {
            Error::ToolNotFound(name) => assert!(name.contains("definitely-not-installed-tool-4821")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_candidate_found_on_path() {
        // `sh` exists on every unix test host
        let found = locate_binary(None, &["definitely-not-installed-tool-4821", "sh"]).unwrap();
        assert!(found.ends_with("sh"));
    }
}
