use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// The output cloud could not reserve room for every input point.
    #[error("not enough memory for an output cloud of {count} points")]
    Allocation {
        count: usize,
        #[source]
        source: TryReserveError,
    },
}

impl ProjectionError {
    pub(crate) fn allocation(count: usize) -> impl FnOnce(TryReserveError) -> Self {
        move |source| ProjectionError::Allocation { count, source }
    }
}
