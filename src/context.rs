use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::PullRequestService;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub pull_requests: Arc<dyn PullRequestService>,
}

impl AppContext {
    pub fn new(config: AppConfig, pull_requests: Arc<dyn PullRequestService>) -> Self {
        Self {
            config,
            pull_requests,
        }
    }
}
