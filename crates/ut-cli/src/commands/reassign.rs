use anyhow::Context;
use ut_config::UndertakerConfig;
use ut_core::process::SystemRunner;
use ut_metadata::{ReassignPolicy, ReassignReport, reassign_tree, run_linter};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReassignArgs;
use crate::output::output;

/// Handle `undertaker reassign`.
pub fn handle(
    args: &ReassignArgs,
    config: &UndertakerConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let policy = ReassignPolicy::new(
        &config.repository.domain,
        &config.repository.proxy_maint_email,
    );

    let report = reassign_tree(&args.path, &args.email, &policy)
        .with_context(|| format!("failed to reassign packages under {}", args.path.display()))?;
    tracing::info!(
        touched = report.touched.len(),
        up_for_grabs = report.up_for_grabs.len(),
        "reassignment finished"
    );

    if args.pkgcheck && !run_linter(&SystemRunner, &args.path, &report.touched)? {
        tracing::warn!("pkgcheck exited unsuccessfully; review its output above");
    }

    output(&report, flags.format, ReassignReport::summary_lines)
}
