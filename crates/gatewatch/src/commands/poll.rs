//! One-shot poll command.

use gatewatch_core::GatewayMonitor;

use crate::cli::{GlobalOpts, PollArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Run a single poll cycle, print the statistics map, and log out.
pub async fn handle(args: PollArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor_config = config::resolve_monitor_config(global, &args)?;
    let monitor = GatewayMonitor::new(monitor_config)?;

    let result = monitor.poll().await;
    // Log out whether or not the cycle succeeded.
    monitor.shutdown().await;

    let snapshot = result?;
    let rendered = output::render_statistics(&global.output, &snapshot.statistics);
    output::print_output(&rendered, global.quiet);
    Ok(())
}
