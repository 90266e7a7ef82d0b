use super::monitor_session::{MonitorSession, PollReport};
use crate::{config::MonitorConfig, info};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// Polls `session` on the configured cadence and hands every report to `sink`.
///
/// Stops when `token` is cancelled, after `max_cycles` polls, or once the tanks
/// are empty. Returns the number of polls performed.
pub async fn run_live(
    session: &mut MonitorSession,
    config: &MonitorConfig,
    token: CancellationToken,
    mut sink: impl FnMut(&PollReport),
) -> usize {
    if config.max_cycles() == Some(0) {
        return 0;
    }
    // The first poll lands one full period after start, never immediately.
    let period = config.poll_interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut polls = 0;

    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                info!("Monitoring loop cancelled after {polls} polls");
                break;
            }
            _ = ticker.tick() => {
                let report = session.poll();
                sink(&report);
                polls += 1;

                if report.status.current_fuel <= 0.0 {
                    info!("Fuel depleted after {polls} polls, stopping monitoring loop");
                    break;
                }
                if config.max_cycles().is_some_and(|max| polls >= max) {
                    info!("Reached configured limit of {polls} polls");
                    break;
                }
            }
        }
    }
    polls
}
