use rand::{thread_rng, Rng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Token bucket shared by every dial of a run, so hundreds of trial
/// handshakes do not hit a target in one burst.
#[derive(Clone)]
pub struct DialPacer {
    rate: f64,
    bucket: Arc<Mutex<Bucket>>,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl DialPacer {
    /// `None` when pacing is disabled.
    pub fn new(per_second: u32) -> Option<Self> {
        if per_second == 0 {
            return None;
        }
        let rate = f64::from(per_second);
        Some(Self {
            rate,
            bucket: Arc::new(Mutex::new(Bucket {
                tokens: rate,
                last_refill: Instant::now(),
            })),
        })
    }

    pub async fn wait(&self) {
        loop {
            let shortfall = {
                let mut bucket = self.bucket.lock().await;
                let now = Instant::now();
                let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
                bucket.tokens = (bucket.tokens + elapsed * self.rate).min(self.rate);
                bucket.last_refill = now;
                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    return;
                }
                (1.0 - bucket.tokens) / self.rate
            };
            let jitter_ms: u64 = thread_rng().gen_range(1..10);
            sleep(Duration::from_secs_f64(shortfall) + Duration::from_millis(jitter_ms)).await;
        }
    }
}
