use std::io::{self, Write};

use tracing::warn;

use crate::context::AppContext;
use crate::domain::report::CheckOutcome;
use crate::error::AppResult;
use crate::workflow::check::check_version_bumps;

/// Runs the check, prints the report and returns the process exit code.
pub async fn run(ctx: &AppContext) -> AppResult<i32> {
    let report = check_version_bumps(ctx).await?;
    let outcome = report.outcome();

    let mut stdout = io::stdout().lock();
    stdout.write_all(report.render().as_bytes())?;
    stdout.flush()?;

    if outcome == CheckOutcome::Mismatch {
        if let Some(path) = &ctx.config.github_output {
            report.append_outputs(path)?;
        }
        if !ctx.config.fail_on_mismatch {
            warn!("version bump mismatch does not fail this step; pass --fail-on-mismatch to enforce it");
        }
    }

    Ok(outcome.exit_code(ctx.config.fail_on_mismatch))
}
