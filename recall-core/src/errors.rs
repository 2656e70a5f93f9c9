use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid grade {0} (expected 0..=5)")]
    InvalidGrade(u8),
    #[error("card is not enrolled for this user")]
    NotEnrolled,
    #[error("card is busy with another review")]
    Busy,
    #[error("storage error: {0}")]
    Storage(String),
}

impl SchedulerError {
    /// Transient errors a caller may retry after a short backoff.
    /// `Storage` is retryable too, but only after re-fetching state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SchedulerError::Busy | SchedulerError::Storage(_))
    }
}
