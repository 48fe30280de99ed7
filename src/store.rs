use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::PostingRecord;

/// The persisted posting dataset: a flat CSV keyed by posting link.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Store { path }
    }

    pub fn open_default() -> Self {
        Store {
            path: Self::default_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_path() -> PathBuf {
        // Use the XDG data directory or fall back to the working directory
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "scout") {
            proj_dirs.data_dir().join("scout.csv")
        } else {
            PathBuf::from("scout.csv")
        }
    }

    /// Load the full dataset. A dataset that doesn't exist yet is an empty
    /// dataset, not an error; the first ingest creates the file.
    pub fn load(&self) -> Result<Vec<PostingRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open dataset at {}", self.path.display()))?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: PostingRecord = row
                .with_context(|| format!("Malformed row in dataset {}", self.path.display()))?;
            records.push(record);
        }
        Ok(records)
    }

    /// Replace the dataset with `records`. Writes to a sibling temp file
    /// and renames over the target, so a crash mid-write leaves the old
    /// dataset intact.
    pub fn save(&self, records: &[PostingRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create dataset directory {}", parent.display())
                })?;
            }
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp_path)
                .with_context(|| format!("Failed to write dataset to {}", tmp_path.display()))?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace dataset at {}", self.path.display()))?;
        Ok(())
    }
}

/// Merge a batch of freshly scraped records into an existing dataset.
///
/// Existing records come first, then the batch; for each non-sentinel link
/// only the last occurrence survives, at the position of that last
/// occurrence. New records therefore supersede existing ones with the same
/// link (an upsert), and re-merging an identical batch of keyed records
/// changes nothing. Records without a usable link are kept unconditionally,
/// so idempotence does not extend to them; collapsing unrelated link-less
/// postings would be worse than the duplicates.
pub fn merge(existing: Vec<PostingRecord>, new: Vec<PostingRecord>) -> Vec<PostingRecord> {
    let combined: Vec<PostingRecord> = existing.into_iter().chain(new).collect();

    let mut last_index: HashMap<String, usize> = HashMap::new();
    for (i, record) in combined.iter().enumerate() {
        if let Some(key) = record.dedup_key() {
            last_index.insert(key.to_string(), i);
        }
    }

    combined
        .into_iter()
        .enumerate()
        .filter(|(i, record)| match record.dedup_key() {
            Some(key) => last_index[key] == *i,
            None => true,
        })
        .map(|(_, record)| record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NO_LINK;

    fn rec(link: &str, description: &str) -> PostingRecord {
        PostingRecord {
            title: "Engineer".to_string(),
            link: link.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_into_empty_keeps_batch() {
        let batch = vec![rec("a", "one"), rec("b", "two")];
        let merged = merge(Vec::new(), batch.clone());
        assert_eq!(merged, batch);
    }

    #[test]
    fn test_merge_last_wins_within_batch() {
        let batch = vec![rec("a", "old"), rec("b", "two"), rec("a", "new")];
        let merged = merge(Vec::new(), batch);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].link, "b");
        assert_eq!(merged[1].link, "a");
        assert_eq!(merged[1].description, "new");
    }

    #[test]
    fn test_merge_new_supersedes_existing() {
        let existing = vec![rec("x", "stale"), rec("y", "kept")];
        let batch = vec![rec("x", "fresh")];
        let merged = merge(existing, batch);
        assert_eq!(merged.len(), 2);
        let x: Vec<_> = merged.iter().filter(|r| r.link == "x").collect();
        assert_eq!(x.len(), 1);
        assert_eq!(x[0].description, "fresh");
    }

    #[test]
    fn test_merge_idempotent() {
        let existing = vec![rec("a", "one"), rec("b", "two")];
        let batch = vec![rec("b", "updated"), rec("c", "three")];
        let once = merge(existing.clone(), batch.clone());
        let twice = merge(once.clone(), batch);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_never_collapses_sentinel_links() {
        let existing = vec![rec(NO_LINK, "first"), rec("", "second")];
        let batch = vec![rec(NO_LINK, "third")];
        let merged = merge(existing, batch);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_empty_batch_is_noop() {
        let existing = vec![rec("a", "one")];
        let merged = merge(existing.clone(), Vec::new());
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("jobs.csv"));
        let records = vec![
            rec("a", "plain"),
            rec("b", "commas, and\nnewlines, \"quotes\""),
        ];
        store.save(&records).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("jobs.csv"));
        store.save(&[rec("a", "one")]).unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["jobs.csv"]);
    }

    #[test]
    fn test_load_missing_dataset_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("absent.csv"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested/deeper/jobs.csv"));
        store.save(&[rec("a", "one")]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
