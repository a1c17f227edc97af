//! Linear backoff with jitter.
//!
//! The window before the k-th retry is `[1, k * factor]` units, drawn
//! uniformly. The upper bound grows linearly; a single run is not guaranteed
//! to wait longer on each retry.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Calculate a jittered backoff delay for the given retry attempt.
///
/// `attempt` starts at 1 for the first retry decision.
pub fn calculate_backoff<R: Rng + ?Sized>(
    attempt: u32,
    factor: u32,
    unit: Duration,
    rng: &mut R,
) -> Duration {
    let upper = attempt.saturating_mul(factor);
    if upper == 0 {
        return Duration::from_millis(0);
    }

    let units = rng.gen_range(1..=upper);
    unit.saturating_mul(units)
}

/// Random source feeding [`calculate_backoff`].
///
/// Defaults to the thread-local generator. Tests inject a seeded one to make
/// the delays reproducible.
#[derive(Debug, Clone, Default)]
pub enum JitterSource {
    #[default]
    Thread,
    Seeded(Arc<Mutex<StdRng>>),
}

impl JitterSource {
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))))
    }

    pub fn backoff(&self, attempt: u32, factor: u32, unit: Duration) -> Duration {
        match self {
            Self::Thread => calculate_backoff(attempt, factor, unit, &mut rand::thread_rng()),
            Self::Seeded(rng) => {
                // A panic while holding the lock cannot leave a StdRng half-updated.
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                calculate_backoff(attempt, factor, unit, &mut *rng)
            }
        }
    }
}
