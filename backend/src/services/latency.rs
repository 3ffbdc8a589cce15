//! Simulated network latency.
//!
//! Demo-mode operations have no real I/O, but the client still expects a
//! perceptible loading phase. The pause is an injected strategy so tests run
//! with [`NoDelay`].

use async_trait::async_trait;
use rand::Rng;
use std::fmt;
use std::time::Duration;

/// Operation being delayed, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Logout,
    Validate,
    Profile,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Validate => "validate",
            Self::Profile => "profile",
        };
        f.write_str(name)
    }
}

#[async_trait]
pub trait Latency: Send + Sync {
    async fn pause(&self, operation: Operation);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Latency for NoDelay {
    async fn pause(&self, _operation: Operation) {}
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

#[async_trait]
impl Latency for FixedDelay {
    async fn pause(&self, operation: Operation) {
        tracing::trace!(%operation, delay_ms = millis(self.0), "simulated latency");
        tokio::time::sleep(self.0).await;
    }
}

/// `base` plus a uniformly random extra of up to `jitter`.
#[derive(Debug, Clone, Copy)]
pub struct JitterDelay {
    pub base: Duration,
    pub jitter: Duration,
}

impl JitterDelay {
    fn sample(&self) -> Duration {
        let max = millis(self.jitter);
        let extra = if max == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=max)
        };
        self.base.saturating_add(Duration::from_millis(extra))
    }
}

#[async_trait]
impl Latency for JitterDelay {
    async fn pause(&self, operation: Operation) {
        let delay = self.sample();
        tracing::trace!(%operation, delay_ms = millis(delay), "simulated latency");
        tokio::time::sleep(delay).await;
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
