//! Scripted model for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use epic_core::{CompletionModel, EpicError, Result};

/// Returns queued responses in order and counts every call, so tests can
/// assert retry bounds and short-circuits that must not reach the service.
pub struct MockModel {
    name: String,
    script: Mutex<VecDeque<Result<String>>>,
    calls: AtomicUsize,
}

impl MockModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), script: Mutex::new(VecDeque::new()), calls: AtomicUsize::new(0) }
    }

    #[must_use]
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    #[must_use]
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(Err(EpicError::Model(message.into())));
        self
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, entry: Result<String>) {
        let mut script = match self.script.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        script.push_back(entry);
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = match self.script.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        script
            .pop_front()
            .unwrap_or_else(|| Err(EpicError::Model("mock script exhausted".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_order() {
        let mock = MockModel::new("test").with_response("first").with_response("second");

        assert_eq!(mock.complete("p").await.unwrap(), "first");
        assert_eq!(mock.complete("p").await.unwrap(), "second");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let mock = MockModel::new("test").with_error("HTTP 429 rate limit");

        let err = mock.complete("p").await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let mock = MockModel::new("test");

        let err = mock.complete("p").await.unwrap_err();
        assert!(matches!(err, EpicError::Model(_)));
        assert_eq!(mock.call_count(), 1);
    }
}
