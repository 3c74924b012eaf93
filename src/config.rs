use std::path::PathBuf;

use clap::Args;

use crate::error::{AppError, AppResult};
use crate::services::PullRequestRef;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 100;
/// The files listing stops at 3000 entries, i.e. 30 pages of 100.
pub const DEFAULT_MAX_PAGES: u32 = 30;

/// Raw inputs as handed over by the CI runner or the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Repository in `owner/name` form.
    #[arg(long, env = "INPUT_REPONAME")]
    pub repo_name: Option<String>,

    /// Pull request number.
    #[arg(long, env = "INPUT_PRNUMBER")]
    pub pr_number: Option<String>,

    /// Skip changed paths containing this text. Repeatable; the environment
    /// form takes one entry per line.
    #[arg(
        long = "ignore-path",
        env = "INPUT_IGNOREPATHS",
        value_delimiter = '\n'
    )]
    pub ignore_paths: Vec<String>,

    /// Exit with status 1 when chart and version bump counts differ.
    /// Runners pass undeclared inputs as blanks, which count as `false`.
    #[arg(
        long,
        env = "INPUT_FAILONMISMATCH",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub fail_on_mismatch: Option<String>,

    /// Base URL of the hosting API.
    #[arg(long = "api-url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_base_url: String,

    /// Files requested per page.
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,

    /// Give up when this many pages were all non-empty.
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// File collecting step outputs for the calling workflow.
    #[arg(long, env = "GITHUB_OUTPUT", hide = true)]
    pub github_output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub repo_name: String,
    pub pr_number: u64,
    pub ignore_paths: Vec<String>,
    pub fail_on_mismatch: bool,
    pub api_base_url: String,
    pub per_page: u32,
    pub max_pages: u32,
    pub github_output: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(args: ConfigArgs) -> AppResult<Self> {
        let repo_name = args
            .repo_name
            .map(|repo| repo.trim().to_string())
            .filter(|repo| !repo.is_empty())
            .ok_or_else(|| AppError::Configuration("repository name not provided".to_string()))?;
        let pr_number = args
            .pr_number
            .as_deref()
            .map(str::trim)
            .filter(|number| !number.is_empty())
            .ok_or_else(|| {
                AppError::Configuration("pull request number not provided".to_string())
            })?;
        let pr_number = pr_number.parse::<u64>().map_err(|_| {
            AppError::Configuration(format!("invalid pull request number '{pr_number}'"))
        })?;

        let ignore_paths = args
            .ignore_paths
            .iter()
            .map(|path| path.trim())
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect();

        let fail_on_mismatch = parse_flag(args.fail_on_mismatch.as_deref())?;

        let config = Self {
            repo_name,
            pr_number,
            ignore_paths,
            fail_on_mismatch,
            api_base_url: args.api_base_url,
            per_page: args.per_page,
            max_pages: args.max_pages,
            github_output: args.github_output.filter(|path| !path.as_os_str().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        match self.repo_name.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
            _ => {
                return Err(AppError::Configuration(format!(
                    "repository '{}' is not in owner/name form",
                    self.repo_name
                )));
            }
        }
        if self.pr_number == 0 {
            return Err(AppError::Configuration(
                "pull request number must be positive".to_string(),
            ));
        }
        if !(1..=100).contains(&self.per_page) {
            return Err(AppError::Configuration(format!(
                "per-page must be between 1 and 100, got {}",
                self.per_page
            )));
        }
        if self.max_pages == 0 {
            return Err(AppError::Configuration(
                "max-pages must be at least 1".to_string(),
            ));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(AppError::Configuration("API URL is empty".to_string()));
        }
        Ok(())
    }

    pub fn pull_request(&self) -> PullRequestRef {
        PullRequestRef {
            repo: self.repo_name.clone(),
            number: self.pr_number,
        }
    }
}

/// Same spellings clap accepts for boolish flags; blank or absent is `false`.
fn parse_flag(value: Option<&str>) -> AppResult<bool> {
    let value = value.map(str::trim).unwrap_or_default();
    match value.to_ascii_lowercase().as_str() {
        "" | "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        _ => Err(AppError::Configuration(format!(
            "invalid value '{value}' for fail-on-mismatch"
        ))),
    }
}
