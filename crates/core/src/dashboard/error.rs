//! Dashboard load errors.

use thiserror::Error;

use crate::crm::{DataSource, ServiceError};

/// A failed dashboard load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A collaborator read failed; the first failure in fan-out order.
    #[error("Failed to load {data_source}: {error}")]
    Read {
        /// The collection whose read failed.
        data_source: DataSource,
        /// The underlying service error.
        #[source]
        error: ServiceError,
    },

    /// The active deal values do not fit in a `Decimal`.
    #[error("Pipeline value overflowed")]
    PipelineOverflow,
}

impl LoadError {
    /// Attributes `error` to `data_source`.
    #[must_use]
    pub const fn read(data_source: DataSource, error: ServiceError) -> Self {
        Self::Read { data_source, error }
    }

    /// The collection whose read failed, if the load failed on a read.
    #[must_use]
    pub const fn data_source(&self) -> Option<DataSource> {
        match self {
            Self::Read { data_source, .. } => Some(*data_source),
            Self::PipelineOverflow => None,
        }
    }
}
