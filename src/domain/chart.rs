use std::collections::BTreeSet;

use crate::domain::file_change::FileChange;

const CHARTS_MARKER: &str = "charts";
const MANIFEST_SUFFIX: &str = "Chart.yaml";
const VERSION_BUMP_MARKER: &str = "+version";

/// Everything before the last `/`, with trailing separators dropped unless the
/// directory is the root itself. Empty for bare file names.
fn parent_dir(path: &str) -> &str {
    let head = match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => return "",
    };
    let trimmed = head.trim_end_matches('/');
    if trimmed.is_empty() { head } else { trimmed }
}

pub fn is_ignored_path(path: &str, ignore_paths: &[String]) -> bool {
    ignore_paths
        .iter()
        .filter(|ignore| !ignore.is_empty())
        .any(|ignore| path.contains(ignore.as_str()))
}

/// Chart directory a changed file belongs to: the first two segments of its
/// parent directory, if that directory mentions `charts` anywhere.
pub fn chart_dir_for(path: &str) -> Option<String> {
    let dirname = parent_dir(path);
    if !dirname.contains(CHARTS_MARKER) {
        return None;
    }
    Some(dirname.split('/').take(2).collect::<Vec<_>>().join("/"))
}

pub fn get_charts_dirs_changed(files_changed: &[String], ignore_paths: &[String]) -> Vec<String> {
    files_changed
        .iter()
        .filter(|file| !is_ignored_path(parent_dir(file), ignore_paths))
        .filter_map(|file| chart_dir_for(file))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn count_charts_changed(charts_dirs_changed: &[String]) -> usize {
    charts_dirs_changed
        .iter()
        .filter(|dir| dir.contains(CHARTS_MARKER))
        .count()
}

pub fn is_version_bump(file: &FileChange) -> bool {
    file.filename.ends_with(MANIFEST_SUFFIX) && file.patch_contains(VERSION_BUMP_MARKER)
}

pub fn count_version_bumps(files: &[FileChange], ignore_paths: &[String]) -> usize {
    files
        .iter()
        .filter(|file| !is_ignored_path(&file.filename, ignore_paths))
        .filter(|file| is_version_bump(file))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn nested_file_maps_to_top_two_segments() {
        assert_eq!(
            chart_dir_for("charts/foo/templates/x.yaml").as_deref(),
            Some("charts/foo")
        );
    }

    #[test]
    fn file_outside_charts_is_skipped() {
        assert_eq!(chart_dir_for("src/main.py"), None);
        assert_eq!(chart_dir_for("Chart.yaml"), None);
    }

    #[test]
    fn file_directly_in_charts_yields_short_identifier() {
        assert_eq!(chart_dir_for("charts/README.md").as_deref(), Some("charts"));
    }

    #[test]
    fn marker_matches_anywhere_in_directory() {
        assert_eq!(
            chart_dir_for("deploy/helm-charts/app/values.yaml").as_deref(),
            Some("deploy/helm-charts")
        );
    }

    #[test]
    fn parent_dir_follows_posix_dirname() {
        assert_eq!(parent_dir("a/b/c.txt"), "a/b");
        assert_eq!(parent_dir("a//c.txt"), "a");
        assert_eq!(parent_dir("/c.txt"), "/");
        assert_eq!(parent_dir("c.txt"), "");
    }

    #[test]
    fn dirs_are_sorted_and_unique() {
        let files = paths(&[
            "charts/db/values.yaml",
            "charts/app/Chart.yaml",
            "charts/db/templates/svc.yaml",
            "README.md",
            "charts/app/templates/deploy.yaml",
        ]);
        assert_eq!(
            get_charts_dirs_changed(&files, &[]),
            vec!["charts/app", "charts/db"]
        );
    }

    #[test]
    fn ignored_paths_drop_directories() {
        let files = paths(&["charts/app/Chart.yaml", "charts/legacy/values.yaml"]);
        let ignore = paths(&["charts/legacy"]);
        assert_eq!(get_charts_dirs_changed(&files, &ignore), vec!["charts/app"]);
    }

    #[test]
    fn blank_ignore_entries_match_nothing() {
        let ignore = paths(&[""]);
        assert!(!is_ignored_path("charts/app", &ignore));
    }

    #[test]
    fn counts_every_chart_dir() {
        let dirs = paths(&["charts", "charts/app", "charts/db"]);
        assert_eq!(count_charts_changed(&dirs), 3);
    }

    #[test]
    fn version_bump_requires_manifest_and_added_version() {
        let files = vec![
            FileChange::new("subdir/Chart.yaml", Some("+version: 1.2.3")),
            FileChange::new("Chart.yaml", Some("-version: 1.2.3")),
            FileChange::new("charts/app/values.yaml", Some("+version: 2")),
            FileChange::new("charts/app/Chart.yaml.bak", Some("+version: 2")),
            FileChange::new("charts/db/Chart.yaml", None),
        ];
        assert_eq!(count_version_bumps(&files, &[]), 1);
    }

    #[test]
    fn ignored_manifests_are_not_counted() {
        let files = vec![
            FileChange::new("charts/app/Chart.yaml", Some("+version: 1.0.1")),
            FileChange::new("charts/legacy/Chart.yaml", Some("+version: 0.3.0")),
        ];
        let ignore = paths(&["legacy"]);
        assert_eq!(count_version_bumps(&files, &ignore), 1);
    }
}
