use std::path::{Path, PathBuf};

use shared::defaults::EVENT_FILE_PREFIX;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

fn children(dir: &Path) -> impl Iterator<Item = Result<DirEntry>> + '_ {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(move |entry| {
            entry.map_err(|source| Error::Walk {
                path: dir.to_path_buf(),
                source,
            })
        })
}

fn file_name_starts_with(entry: &DirEntry, prefix: &str) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with(prefix))
}

/// Immediate subdirectories of `root`, sorted by name.
pub fn experiment_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in children(root) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// First subdirectory of `root` (by name) whose name starts with `prefix`.
pub fn find_experiment_dir(root: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    for entry in children(root) {
        let entry = entry?;
        if entry.file_type().is_dir() && file_name_starts_with(&entry, prefix) {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

/// First tensorboard event file (by name) directly inside `dir`.
pub fn find_event_file(dir: &Path) -> Result<Option<PathBuf>> {
    for entry in children(dir) {
        let entry = entry?;
        if entry.file_type().is_file() && file_name_starts_with(&entry, EVENT_FILE_PREFIX) {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn lists_only_directories_in_order() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("q2_b500_r0.01")).unwrap();
        fs::create_dir(root.path().join("q2_b100_r0.01")).unwrap();
        touch(&root.path().join("notes.txt"));

        let dirs = experiment_dirs(root.path()).unwrap();

        let names: Vec<_> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["q2_b100_r0.01", "q2_b500_r0.01"]);
    }

    #[test]
    fn prefix_match_picks_first_by_name() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("q1_dqn_1_LunarLander_02-10")).unwrap();
        fs::create_dir(root.path().join("q1_dqn_1_LunarLander_01-10")).unwrap();
        fs::create_dir(root.path().join("q1_doubledqn_1_LunarLander")).unwrap();
        touch(&root.path().join("q1_dqn_2.txt"));

        let found = find_experiment_dir(root.path(), "q1_dqn_1").unwrap().unwrap();
        assert!(found.ends_with("q1_dqn_1_LunarLander_01-10"));

        assert_eq!(find_experiment_dir(root.path(), "q1_dqn_2").unwrap(), None);
    }

    #[test]
    fn finds_event_files_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("params.json"));
        assert_eq!(find_event_file(dir.path()).unwrap(), None);

        touch(&dir.path().join("events.out.tfevents.2.host"));
        touch(&dir.path().join("events.out.tfevents.1.host"));
        let found = find_event_file(dir.path()).unwrap().unwrap();
        assert!(found.ends_with("events.out.tfevents.1.host"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            experiment_dirs(&missing),
            Err(Error::Walk { .. })
        ));
    }
}
