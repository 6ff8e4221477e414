use std::time::Duration;

/// Delays inserted around generation calls to stay inside provider quota.
///
/// Rate-limiting discipline only, never a correctness mechanism. Defaults
/// are one second after every call (retries included) and four seconds
/// between successive epics. Tests substitute [`PacingPolicy::zero`] to
/// run without sleeping.
#[derive(Clone, Debug)]
pub struct PacingPolicy {
    pub after_call: Duration,
    pub between_epics: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self { after_call: Duration::from_secs(1), between_epics: Duration::from_secs(4) }
    }
}

impl PacingPolicy {
    #[must_use]
    pub fn zero() -> Self {
        Self { after_call: Duration::ZERO, between_epics: Duration::ZERO }
    }

    #[must_use]
    pub fn with_after_call(mut self, after_call: Duration) -> Self {
        self.after_call = after_call;
        self
    }

    #[must_use]
    pub fn with_between_epics(mut self, between_epics: Duration) -> Self {
        self.between_epics = between_epics;
        self
    }

    /// Sleep applied after every generation call.
    pub async fn settle_after_call(&self) {
        if !self.after_call.is_zero() {
            tokio::time::sleep(self.after_call).await;
        }
    }

    /// Longer pause between successive epic documents.
    pub async fn settle_between_epics(&self) {
        if !self.between_epics.is_zero() {
            tokio::time::sleep(self.between_epics).await;
        }
    }
}
