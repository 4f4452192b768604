use std::time::Duration;

/// Fixed-delay pacing between the requests of one portal run
///
/// The first call to [`Pacer::ready`] returns immediately; every later call
/// sleeps for the configured delay first.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    primed: bool,
    pauses: usize,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            primed: false,
            pauses: 0,
        }
    }

    /// Waits until the next request may be sent
    pub async fn ready(&mut self) {
        if !self.primed {
            self.primed = true;
            return;
        }

        self.pauses += 1;
        if !self.delay.is_zero() {
            tracing::trace!(delay_ms = self.delay.as_millis() as u64, "Pacing");
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Number of times the pacer paused
    pub fn pauses(&self) -> usize {
        self.pauses
    }
}
