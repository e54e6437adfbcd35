//! Token-bucket admission control shared by all requests.
//!
//! Every request reserves one token. When the bucket is empty the request is
//! told how long to wait for its token; if that wait is longer than the
//! configured maximum the reservation is dropped and the request rejected.
//! Reservation and rejection happen under one lock, so concurrent requests
//! can never over-draw the bucket.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Configuration for the admission bucket.
#[derive(Debug, Clone)]
pub struct BucketConfig {
    /// Maximum tokens held (burst size).
    pub capacity: u32,
    /// One token is added per this interval.
    pub refill_interval: Duration,
    /// Requests that would have to wait longer than this are rejected.
    pub max_wait: Duration,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            refill_interval: Duration::from_secs(1),
            max_wait: Duration::from_secs(3),
        }
    }
}

/// Outcome of an admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A token was reserved; the caller must sleep for `wait` before proceeding.
    Proceed { wait: Duration },
    /// No token was consumed. `wait` is the delay that was refused.
    Reject { wait: Duration },
}

impl Admission {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Admission::Reject { .. })
    }
}

/// Bucket state. `tokens` goes negative while reservations are waiting.
#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refill(&mut self, now: Instant, config: &BucketConfig) {
        // A caller may have sampled `now` before a later caller took the lock.
        if now <= self.last_refill {
            return;
        }
        let elapsed = now.duration_since(self.last_refill);
        let added = elapsed.as_secs_f64() / config.refill_interval.as_secs_f64();
        self.tokens = (self.tokens + added).min(f64::from(config.capacity));
        self.last_refill = now;
    }
}

/// Process-wide admission controller. Construct once and share by reference.
#[derive(Debug)]
pub struct AdmissionController {
    config: BucketConfig,
    bucket: Mutex<Bucket>,
}

impl AdmissionController {
    /// Create a controller with a full bucket as of `now`.
    pub fn new(config: BucketConfig, now: Instant) -> Self {
        let bucket = Bucket {
            tokens: f64::from(config.capacity),
            last_refill: now,
        };
        Self {
            config,
            bucket: Mutex::new(bucket),
        }
    }

    /// Reserve one token at `now`.
    pub fn admit(&self, now: Instant) -> Admission {
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);
        bucket.refill(now, &self.config);

        let remaining = bucket.tokens - 1.0;
        let wait = if remaining >= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(-remaining * self.config.refill_interval.as_secs_f64())
        };

        if wait > self.config.max_wait {
            return Admission::Reject { wait };
        }

        bucket.tokens = remaining;
        Admission::Proceed { wait }
    }

    /// Tokens currently available (may be negative while reservations wait).
    pub fn available(&self, now: Instant) -> f64 {
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);
        bucket.refill(now, &self.config);
        bucket.tokens
    }
}
