//! Repeated polling on an interval.

use std::time::Duration;

use tokio::time::MissedTickBehavior;

use gatewatch_core::{CoreError, GatewayMonitor};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Poll on an interval until interrupted or the cycle count is reached.
///
/// Transient fetch failures are logged and the loop keeps going; an
/// authentication failure ends the watch, since retrying with the same
/// credentials cannot succeed.
pub async fn handle(args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor_config = config::resolve_monitor_config(global, &args.poll)?;
    let monitor = GatewayMonitor::new(monitor_config)?;

    let mut interval = tokio::time::interval(Duration::from_secs(args.interval.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut cycles: u64 = 0;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, logging out");
                break;
            }
            _ = interval.tick() => {}
        }

        match monitor.poll().await {
            Ok(snapshot) => {
                if !global.quiet {
                    println!(
                        "# {} ({} metrics)",
                        snapshot.collected_at.format("%Y-%m-%dT%H:%M:%SZ"),
                        snapshot.statistics.len()
                    );
                }
                let rendered = output::render_statistics(&global.output, &snapshot.statistics);
                output::print_output(&rendered, global.quiet);
            }
            Err(err @ CoreError::AuthenticationFailed { .. }) => {
                monitor.shutdown().await;
                return Err(err.into());
            }
            Err(err) => {
                tracing::warn!(error = %err, "poll cycle failed, previous values stand");
            }
        }

        cycles += 1;
        if args.count.is_some_and(|limit| cycles >= limit) {
            break;
        }
    }

    monitor.shutdown().await;
    Ok(())
}
