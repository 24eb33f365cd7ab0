//! Multiplexed HTTP transfer engine.
//!
//! Drives any number of concurrently in-flight transfers from a single
//! task: `admit` registers a transfer, `pump` waits (bounded) for I/O
//! readiness and collects whatever completed. No thread is spawned per
//! request.


use std::time::Duration;

use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use futures_util::stream::FuturesUnordered;
use reqwest::{Client, redirect};
use tokio::time::Instant;
use tracing::debug;

use crate::config::{DEFAULT_USER_AGENT, REDIRECT_LIMIT, RunConfig};
use crate::error::HttpError;
use crate::schedule::{HttpMethod, Request};

/// Terminal state of one admitted transfer. Produced exactly once.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Schedule-order position of the request this outcome resolves.
    pub slot: usize,
    /// HTTP status code, 0 when no response was received.
    pub status: u16,
    pub elapsed: Duration,
    pub transport_error: Option<String>,
}

impl TransferOutcome {
    /// Placeholder for a transfer that never reported completion;
    /// verifies as "No Server Response".
    #[must_use]
    pub const fn unresolved(slot: usize) -> Self {
        Self {
            slot,
            status: 0,
            elapsed: Duration::ZERO,
            transport_error: None,
        }
    }
}

pub struct TransferEngine {
    client: Client,
    in_flight: FuturesUnordered<BoxFuture<'static, TransferOutcome>>,
    completed: Vec<TransferOutcome>,
}

impl TransferEngine {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: &RunConfig) -> Result<Self, HttpError> {
        let policy = if config.follow_redirects {
            redirect::Policy::limited(REDIRECT_LIMIT)
        } else {
            redirect::Policy::none()
        };
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .connect_timeout(config.connect_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| HttpError::BuildClientFailed { source: err })?;

        Ok(Self {
            client,
            in_flight: FuturesUnordered::new(),
            completed: Vec::new(),
        })
    }

    /// Registers `request` as a new concurrent transfer. The transfer
    /// only makes progress while `pump` is driven.
    pub fn admit(&mut self, request: &Request) {
        let client = self.client.clone();
        let slot = request.slot;
        let method = request.method;
        let url = request.url.clone();
        let started = Instant::now();
        self.in_flight.push(Box::pin(async move {
            execute_transfer(&client, slot, method, &url, started).await
        }));
    }

    /// Waits at most `timeout` for readiness on any registered transfer,
    /// advances all ready transfers, and returns the count still in
    /// flight. With nothing registered it returns zero immediately.
    pub async fn pump(&mut self, timeout: Duration) -> usize {
        if self.in_flight.is_empty() {
            return 0;
        }
        let started = Instant::now();
        loop {
            let remaining = timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                break;
            }
            match tokio::time::timeout(remaining, self.in_flight.next()).await {
                Ok(Some(outcome)) => {
                    debug!(
                        "Transfer {} resolved with status {} in {:?}",
                        outcome.slot, outcome.status, outcome.elapsed
                    );
                    self.completed.push(outcome);
                    if self.in_flight.is_empty() {
                        break;
                    }
                }
                Ok(None) | Err(_) => break,
            }
        }
        self.in_flight.len()
    }

    /// Consumes the engine, yielding collected outcomes in completion
    /// order.
    #[must_use]
    pub fn into_outcomes(self) -> Vec<TransferOutcome> {
        self.completed
    }
}

async fn execute_transfer(
    client: &Client,
    slot: usize,
    method: HttpMethod,
    url: &str,
    started: Instant,
) -> TransferOutcome {
    let builder = match method {
        HttpMethod::Get => client.get(url),
        HttpMethod::Post => client.post(url).body(String::new()),
        HttpMethod::Put => client.put(url),
        HttpMethod::Delete => client.delete(url),
    };

    match builder.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            match drain_response_body(response).await {
                Ok(_) => TransferOutcome {
                    slot,
                    status,
                    elapsed: started.elapsed(),
                    transport_error: None,
                },
                Err(err) => TransferOutcome {
                    slot,
                    status,
                    elapsed: started.elapsed(),
                    transport_error: Some(err.to_string()),
                },
            }
        }
        Err(err) => TransferOutcome {
            slot,
            status: 0,
            elapsed: started.elapsed(),
            transport_error: Some(err.to_string()),
        },
    }
}

/// Drains the body into this transfer's own scratch buffer; only
/// status, timing, and transport errors feed verification.
async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut scratch: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        scratch.extend_from_slice(&bytes);
    }
    Ok(u64::try_from(scratch.len()).unwrap_or(u64::MAX))
}
