//! Ignore list loading using Tokio

use core_library::IgnoreSet;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Read the newline-delimited ignore list at `path`
///
/// A missing path yields an empty set. An unreadable file is not fatal: it
/// logs a warning and yields an empty set too.
pub async fn load_ignore_list(path: Option<&Path>) -> IgnoreSet {
    let Some(path) = path else {
        return IgnoreSet::new();
    };

    match fs::read_to_string(path).await {
        Ok(contents) => {
            let set = IgnoreSet::parse(&contents);
            debug!(path = %path.display(), entries = set.len(), "Loaded ignore list");
            set
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read ignore file; ignoring nothing");
            IgnoreSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[tokio::test]
    async fn test_no_path_means_empty() {
        assert!(load_ignore_list(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_empty() {
        let path = env::temp_dir().join("albumcheck-does-not-exist.txt");
        let _ = fs::remove_file(&path).await;

        assert!(load_ignore_list(Some(&path)).await.is_empty());
    }

    #[tokio::test]
    async fn test_reads_entries() {
        let path = env::temp_dir().join(format!("albumcheck-ignore-{}.txt", std::process::id()));
        fs::write(
            &path,
            "https://www.last.fm/music/A/B\n\n  https://www.last.fm/music/C/D \n",
        )
        .await
        .unwrap();

        let set = load_ignore_list(Some(&path)).await;
        fs::remove_file(&path).await.unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.contains("https://www.last.fm/music/C/D"));
    }
}
