pub mod pull_request;

pub use pull_request::{PullRequestRef, PullRequestService, fetch_files_changed};
