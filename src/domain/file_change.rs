use serde::Deserialize;

/// One entry of the pull request "files" listing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FileChange {
    pub filename: String,
    /// Absent for binary files and diffs too large for the API to inline.
    #[serde(default)]
    pub patch: Option<String>,
}

impl FileChange {
    #[cfg(test)]
    pub fn new(filename: impl Into<String>, patch: Option<&str>) -> Self {
        Self {
            filename: filename.into(),
            patch: patch.map(str::to_string),
        }
    }

    pub fn patch_contains(&self, needle: &str) -> bool {
        self.patch
            .as_deref()
            .is_some_and(|patch| patch.contains(needle))
    }
}

pub fn get_filenames(files: &[FileChange]) -> Vec<String> {
    files.iter().map(|file| file.filename.clone()).collect()
}
