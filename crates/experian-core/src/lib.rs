pub mod error;
pub mod types;

#[cfg(feature = "credit_profile")]
pub mod credit_profile;

pub use error::ExperianError;
pub use types::*;

/// Standard result type for all experian-core operations
pub type ExperianResult<T> = Result<T, ExperianError>;
