use async_trait::async_trait;
use tracing::debug;

use crate::domain::file_change::FileChange;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub repo: String,
    pub number: u64,
}

#[async_trait]
pub trait PullRequestService: Send + Sync {
    /// One page of the changed-files listing. Pages start at 1.
    async fn list_files_page(&self, pr: &PullRequestRef, page: u32) -> AppResult<Vec<FileChange>>;
}

/// Walks pages until the first empty one and concatenates them in order.
pub async fn fetch_files_changed(
    service: &dyn PullRequestService,
    pr: &PullRequestRef,
    max_pages: u32,
) -> AppResult<Vec<FileChange>> {
    let mut files = Vec::new();

    for page in 1..=max_pages {
        let batch = service.list_files_page(pr, page).await?;
        if batch.is_empty() {
            debug!(page, total = files.len(), "reached empty page");
            return Ok(files);
        }
        debug!(page, count = batch.len(), "fetched page of changed files");
        files.extend(batch);
    }

    Err(AppError::PullRequest(format!(
        "{}#{} still returned files after {max_pages} pages",
        pr.repo, pr.number
    )))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Serves a fixed list of pages, then empty pages forever.
    pub(crate) struct FakePullRequests {
        pages: Vec<Vec<FileChange>>,
        pub requested: Mutex<Vec<u32>>,
    }

    impl FakePullRequests {
        pub(crate) fn new(pages: Vec<Vec<FileChange>>) -> Self {
            Self {
                pages,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PullRequestService for FakePullRequests {
        async fn list_files_page(
            &self,
            _pr: &PullRequestRef,
            page: u32,
        ) -> AppResult<Vec<FileChange>> {
            self.requested.lock().unwrap().push(page);
            Ok(self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default())
        }
    }

    struct EndlessPages;

    #[async_trait]
    impl PullRequestService for EndlessPages {
        async fn list_files_page(
            &self,
            _pr: &PullRequestRef,
            page: u32,
        ) -> AppResult<Vec<FileChange>> {
            Ok(vec![FileChange::new(format!("file-{page}"), None)])
        }
    }

    fn pr() -> PullRequestRef {
        PullRequestRef {
            repo: "acme/charts".to_string(),
            number: 7,
        }
    }

    fn page(names: &[&str]) -> Vec<FileChange> {
        names.iter().map(|n| FileChange::new(*n, None)).collect()
    }

    #[tokio::test]
    async fn concatenates_pages_until_empty() {
        let fake = FakePullRequests::new(vec![
            page(&["a", "b"]),
            page(&["c", "d"]),
            page(&["e"]),
        ]);

        let files = fetch_files_changed(&fake, &pr(), 30).await.unwrap();

        let names = files.iter().map(|f| f.filename.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(*fake.requested.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn empty_first_page_yields_nothing() {
        let fake = FakePullRequests::new(Vec::new());

        let files = fetch_files_changed(&fake, &pr(), 30).await.unwrap();

        assert!(files.is_empty());
        assert_eq!(*fake.requested.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn stops_at_page_bound() {
        let err = fetch_files_changed(&EndlessPages, &pr(), 3)
            .await
            .unwrap_err();

        match err {
            AppError::PullRequest(msg) => assert!(msg.contains("after 3 pages")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
