use tracing::info;

use crate::context::AppContext;
use crate::domain::chart::{count_charts_changed, count_version_bumps, get_charts_dirs_changed};
use crate::domain::file_change::get_filenames;
use crate::domain::report::CheckReport;
use crate::error::AppResult;
use crate::services::fetch_files_changed;

pub async fn check_version_bumps(ctx: &AppContext) -> AppResult<CheckReport> {
    let config = &ctx.config;
    let pr = config.pull_request();

    let files_changed_data =
        fetch_files_changed(ctx.pull_requests.as_ref(), &pr, config.max_pages).await?;
    let files_changed = get_filenames(&files_changed_data);
    let charts_dirs_changed = get_charts_dirs_changed(&files_changed, &config.ignore_paths);
    let num_charts_changed = count_charts_changed(&charts_dirs_changed);
    let num_version_bumps = count_version_bumps(&files_changed_data, &config.ignore_paths);

    info!(
        repo = %pr.repo,
        pr = pr.number,
        files = files_changed.len(),
        num_charts_changed,
        num_version_bumps,
        "compared chart changes with version bumps"
    );

    Ok(CheckReport {
        files_changed,
        charts_dirs_changed,
        num_charts_changed,
        num_version_bumps,
    })
}
