//! Backoff Executor
//!
//! Sends one JSON POST per record and retries failed attempts with exponential backoff.
//! Every attempt failure is retryable; once the attempt budget is spent the failure is
//! folded into a [`RequestResult::Error`] that carries the original payload, so callers
//! never see an `Err` for a remote failure.

use crate::error::{RequestFailure, ServiceError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

mod http;

pub use http::{join_url, HttpConnector, HttpTransport};

/// Outcome of one record submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RequestResult {
    Success { data: Value },
    Error { error: String, payload: Value },
}

impl RequestResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestResult::Success { .. })
    }
}

/// POSTs a JSON body to a path relative to some base URL.
#[async_trait]
pub trait PostTransport: Send + Sync {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, RequestFailure>;
}

/// Opens a transport scope for one invocation.
pub trait Connector: Send + Sync {
    fn connect(&self) -> Result<Box<dyn PostTransport>, ServiceError>;
}

/// Suspends the current task between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real-time sleeper on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Attempt budget and backoff unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay after attempt N is `backoff_unit * 2^N`
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay after a failed `attempt` (1-based): 2, 4, 8 ... units.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.backoff_unit.saturating_mul(factor)
    }
}

enum RetryState {
    Attempting(u32),
    Backoff { attempt: u32, delay: Duration },
    Succeeded(Value),
    Exhausted(RequestFailure),
}

/// Executes record submissions under a [`RetryPolicy`].
pub struct BackoffExecutor {
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl BackoffExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { policy, sleeper }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Submit `payload` to `path` with the policy's attempt budget.
    pub async fn execute(
        &self,
        transport: &dyn PostTransport,
        path: &str,
        payload: &Value,
    ) -> RequestResult {
        self.execute_with_attempts(transport, path, payload, self.policy.max_attempts)
            .await
    }

    /// Submit with an explicit attempt budget; `0` is treated as `1`.
    pub async fn execute_with_attempts(
        &self,
        transport: &dyn PostTransport,
        path: &str,
        payload: &Value,
        max_attempts: u32,
    ) -> RequestResult {
        let max_attempts = max_attempts.max(1);
        let mut state = RetryState::Attempting(1);

        loop {
            state = match state {
                RetryState::Attempting(attempt) => match transport.post(path, payload).await {
                    Ok(data) => {
                        debug!(path, attempt, "Request succeeded");
                        RetryState::Succeeded(data)
                    }
                    Err(failure) => {
                        warn!(
                            path,
                            attempt,
                            max_attempts,
                            error = %failure,
                            "Request attempt failed"
                        );
                        if attempt >= max_attempts {
                            RetryState::Exhausted(failure)
                        } else {
                            RetryState::Backoff {
                                attempt,
                                delay: self.policy.delay_after(attempt),
                            }
                        }
                    }
                },
                RetryState::Backoff { attempt, delay } => {
                    self.sleeper.sleep(delay).await;
                    RetryState::Attempting(attempt + 1)
                }
                RetryState::Succeeded(data) => return RequestResult::Success { data },
                RetryState::Exhausted(failure) => {
                    error!(path, max_attempts, error = %failure, "Giving up on request");
                    return RequestResult::Error {
                        error: failure.to_string(),
                        payload: payload.clone(),
                    };
                }
            };
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport and recording sleeper shared by unit tests.

    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays scripted outcomes in order; after the script runs out every call succeeds
    /// with `{"id": n}`.
    #[derive(Default)]
    pub struct ScriptedTransport {
        script: Mutex<VecDeque<Result<Value, RequestFailure>>>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedTransport {
        pub fn new(script: Vec<Result<Value, RequestFailure>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl PostTransport for ScriptedTransport {
        async fn post(&self, path: &str, body: &Value) -> Result<Value, RequestFailure> {
            let n = {
                let mut calls = self.calls.lock();
                calls.push((path.to_string(), body.clone()));
                calls.len()
            };
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(serde_json::json!({ "id": n })))
        }
    }

    #[async_trait]
    impl PostTransport for Arc<ScriptedTransport> {
        async fn post(&self, path: &str, body: &Value) -> Result<Value, RequestFailure> {
            self.as_ref().post(path, body).await
        }
    }

    /// Hands out clones of one shared scripted transport.
    pub struct ScriptedConnector {
        pub transport: Arc<ScriptedTransport>,
    }

    impl ScriptedConnector {
        pub fn new(script: Vec<Result<Value, RequestFailure>>) -> Self {
            Self {
                transport: Arc::new(ScriptedTransport::new(script)),
            }
        }
    }

    impl Connector for ScriptedConnector {
        fn connect(&self) -> Result<Box<dyn PostTransport>, ServiceError> {
            Ok(Box::new(self.transport.clone()))
        }
    }

    #[derive(Default)]
    pub struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub fn delays(&self) -> Vec<Duration> {
            self.delays.lock().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.delays.lock().push(duration);
        }
    }
}
