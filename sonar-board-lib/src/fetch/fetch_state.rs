use std::sync::Arc;

/// The state of one independently fetched slice of dashboard data.
#[derive(Debug, Clone, Default)]
pub enum FetchState<T> {
    /// The fetch has not completed yet.
    #[default]
    Pending,

    /// The fetch succeeded.
    Loaded(T),

    /// The fetch failed; the slice renders as empty.
    Failed(Arc<ohno::AppError>),
}

impl<T> FetchState<T> {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The loaded data, if any.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ohno::AppError> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Pending | Self::Loaded(_) => None,
        }
    }
}

impl<T> From<crate::Result<T>> for FetchState<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => Self::Loaded(data),
            Err(e) => Self::Failed(Arc::new(e)),
        }
    }
}
