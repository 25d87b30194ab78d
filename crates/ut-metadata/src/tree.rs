//! Repository-wide reassignment.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde::Serialize;

use crate::error::MetadataError;
use crate::record::{ReassignPolicy, reassign_record};

const RECORD_FILE: &str = "metadata.xml";

/// Packages touched by a reassignment run, as `category/package`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReassignReport {
    pub touched: BTreeSet<String>,
    pub up_for_grabs: BTreeSet<String>,
}

impl ReassignReport {
    /// Human-readable summary.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        if !self.up_for_grabs.is_empty() {
            std::iter::once("Packages up for grabs:".to_string())
                .chain(self.up_for_grabs.iter().cloned())
                .collect()
        } else if !self.touched.is_empty() {
            vec!["No packages up for grabs".to_string()]
        } else {
            vec!["No packages reassigned".to_string()]
        }
    }
}

/// Every `<category>/<package>/metadata.xml` under `root`, sorted.
///
/// Hidden directories are skipped; ignore files are not consulted.
///
/// # Errors
///
/// Returns [`MetadataError::Walk`] if a directory cannot be read.
pub fn find_records(root: &Path) -> Result<Vec<PathBuf>, MetadataError> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .max_depth(Some(3))
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.'))
        .build();

    let mut records = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.depth() == 3
            && entry.file_name() == RECORD_FILE
            && entry.file_type().is_some_and(|ft| ft.is_file())
        {
            records.push(entry.into_path());
        }
    }
    Ok(records)
}

/// `category/package` of a record path below `root`.
fn package_of(root: &Path, record: &Path) -> Option<String> {
    let package_dir = record.parent()?.strip_prefix(root).ok()?;
    let parts: Vec<String> = package_dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (parts.len() == 2).then(|| parts.join("/"))
}

/// Remove `departing` from every record under `root`, rewriting changed
/// files in place.
///
/// # Errors
///
/// Returns [`MetadataError`] on the first record that cannot be read,
/// parsed or written. Records rewritten before the failure stay rewritten.
pub fn reassign_tree(
    root: &Path,
    departing: &str,
    policy: &ReassignPolicy,
) -> Result<ReassignReport, MetadataError> {
    let mut report = ReassignReport::default();

    for path in find_records(root)? {
        let text = std::fs::read_to_string(&path).map_err(|source| MetadataError::Io {
            path: path.clone(),
            source,
        })?;
        let reassigned = reassign_record(&text, departing, policy).map_err(|source| MetadataError::Xml {
            path: path.clone(),
            source,
        })?;
        let Some(reassigned) = reassigned else {
            continue;
        };

        std::fs::write(&path, &reassigned.text).map_err(|source| MetadataError::Io {
            path: path.clone(),
            source,
        })?;

        let Some(package) = package_of(root, &path) else {
            continue;
        };
        tracing::debug!(%package, up_for_grabs = reassigned.up_for_grabs, "record rewritten");
        if reassigned.up_for_grabs {
            report.up_for_grabs.insert(package.clone());
        }
        report.touched.insert(package);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_prefers_up_for_grabs() {
        let report = ReassignReport {
            touched: ["dev-libs/a", "dev-libs/b"].map(String::from).into(),
            up_for_grabs: ["dev-libs/b", "app-misc/c"].map(String::from).into(),
        };
        assert_eq!(
            report.summary_lines(),
            vec!["Packages up for grabs:", "app-misc/c", "dev-libs/b"]
        );
    }

    #[test]
    fn summary_without_orphans() {
        let report = ReassignReport {
            touched: ["dev-libs/a"].map(String::from).into(),
            up_for_grabs: BTreeSet::new(),
        };
        assert_eq!(report.summary_lines(), vec!["No packages up for grabs"]);
        assert_eq!(
            ReassignReport::default().summary_lines(),
            vec!["No packages reassigned"]
        );
    }

    #[test]
    fn package_name_from_path() {
        let root = Path::new("/repo");
        assert_eq!(
            package_of(root, Path::new("/repo/dev-libs/foo/metadata.xml")).as_deref(),
            Some("dev-libs/foo")
        );
        assert_eq!(package_of(root, Path::new("/repo/dev-libs/metadata.xml")), None);
    }
}
