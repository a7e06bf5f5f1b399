use std::time::Duration;

use rand::RngExt;
use tokio::time::sleep;
use tracing::trace;

/// Request-rate throttle: a fixed base pause plus uniform random jitter,
/// applied before paginated fetches and between windowed scrapes. Purely a
/// rate-limiting policy; substitute [`Throttle::none`] in tests.
#[derive(Debug, Clone)]
pub struct Throttle {
    base: Duration,
    jitter: Duration,
}

impl Throttle {
    pub fn from_millis(base_ms: u64, jitter_ms: u64) -> Self {
        Self {
            base: Duration::from_millis(base_ms),
            jitter: Duration::from_millis(jitter_ms),
        }
    }

    /// Zero-delay strategy.
    pub fn none() -> Self {
        Self::from_millis(0, 0)
    }

    pub async fn pause(&self) {
        if self.base.is_zero() && self.jitter.is_zero() {
            return;
        }
        let jitter_ms = self.jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=jitter_ms)
        };
        let total = self.base + Duration::from_millis(jitter);
        trace!("throttling for {:?}", total);
        sleep(total).await;
    }
}
