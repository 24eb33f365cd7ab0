//! Time-ordered schedule dispatch.
use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::info;

use crate::engine::{TransferEngine, TransferOutcome};
use crate::schedule::{Request, Schedule};

/// Upper bound on one engine readiness wait, so admission state is
/// re-checked at least this often.
const PUMP_WAIT: Duration = Duration::from_secs(1);

pub struct Dispatcher {
    engine: TransferEngine,
    pump_wait: Duration,
}

impl Dispatcher {
    #[must_use]
    pub fn new(engine: TransferEngine) -> Self {
        Self {
            engine,
            pump_wait: PUMP_WAIT,
        }
    }

    /// Admits every scheduled request once its offset elapses and
    /// drives the engine until all transfers resolve. Buckets are
    /// admitted in ascending offset order, requests within a bucket in
    /// line order; outcomes come back in completion order.
    pub async fn run(mut self, schedule: &Schedule) -> Vec<TransferOutcome> {
        let started = Instant::now();
        let mut in_flight: usize = 0;
        let mut pending: VecDeque<(u64, &[Request])> = schedule
            .buckets()
            .iter()
            .map(|(offset_ms, bucket)| (*offset_ms, bucket.as_slice()))
            .collect();

        while !pending.is_empty() || in_flight > 0 {
            if let Some((offset_ms, bucket)) = pending.pop_front() {
                let due = Duration::from_millis(offset_ms);
                // A slow previous batch can overrun the slot; clamp to
                // an immediate wakeup instead of sleeping backwards.
                let sleep_for = due.saturating_sub(started.elapsed());
                info!(
                    "Sleeping {:?} - admitting {} request(s) due at {}ms",
                    sleep_for,
                    bucket.len(),
                    offset_ms
                );
                sleep(sleep_for).await;
                for request in bucket {
                    self.engine.admit(request);
                }
            }
            in_flight = self.engine.pump(self.pump_wait).await;
        }

        self.engine.into_outcomes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::schedule::parse_schedule;
    use std::future::Future;
    use std::net::TcpListener;

    fn run_async_test<F>(future: F) -> Result<(), String>
    where
        F: Future<Output = Result<(), String>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| format!("Failed to build runtime: {}", err))?;
        runtime.block_on(future)
    }

    fn test_engine() -> Result<TransferEngine, String> {
        let config = RunConfig {
            follow_redirects: false,
            debug: false,
            connect_timeout: Duration::from_secs(10),
        };
        TransferEngine::new(&config).map_err(|err| format!("client build failed: {}", err))
    }

    fn refused_port() -> Result<u16, String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind probe failed: {}", err))?;
        let port = listener
            .local_addr()
            .map_err(|err| format!("probe addr failed: {}", err))?
            .port();
        drop(listener);
        Ok(port)
    }

    #[test]
    fn empty_schedule_terminates_immediately() -> Result<(), String> {
        run_async_test(async {
            let plan = parse_schedule("").map_err(|err| format!("parse failed: {}", err))?;
            let dispatch = Dispatcher::new(test_engine()?).run(&plan);
            let outcomes = tokio::time::timeout(Duration::from_secs(1), dispatch)
                .await
                .map_err(|_| "Dispatch did not terminate on an empty schedule".to_owned())?;
            if !outcomes.is_empty() {
                return Err(format!("Expected no outcomes, got {}", outcomes.len()));
            }
            Ok(())
        })
    }

    #[test]
    fn admission_waits_for_the_scheduled_offset() -> Result<(), String> {
        run_async_test(async {
            let port = refused_port()?;
            let input = format!("80 http://127.0.0.1:{}/ GET\n", port);
            let plan =
                parse_schedule(&input).map_err(|err| format!("parse failed: {}", err))?;
            let started = Instant::now();
            let outcomes = Dispatcher::new(test_engine()?).run(&plan).await;
            if started.elapsed() < Duration::from_millis(80) {
                return Err("Request admitted before its offset".to_owned());
            }
            if outcomes.len() != 1 {
                return Err(format!("Expected 1 outcome, got {}", outcomes.len()));
            }
            Ok(())
        })
    }

    #[test]
    fn shared_offset_bucket_resolves_every_request() -> Result<(), String> {
        run_async_test(async {
            let port = refused_port()?;
            let input = format!(
                "0 http://127.0.0.1:{port}/a GET\n0 http://127.0.0.1:{port}/b GET\n10 http://127.0.0.1:{port}/c GET\n"
            );
            let plan =
                parse_schedule(&input).map_err(|err| format!("parse failed: {}", err))?;
            let outcomes = Dispatcher::new(test_engine()?).run(&plan).await;
            if outcomes.len() != 3 {
                return Err(format!("Expected 3 outcomes, got {}", outcomes.len()));
            }
            let mut slots: Vec<usize> = outcomes.iter().map(|outcome| outcome.slot).collect();
            slots.sort_unstable();
            if slots != vec![0, 1, 2] {
                return Err(format!("Expected one outcome per slot, got {:?}", slots));
            }
            Ok(())
        })
    }
}
