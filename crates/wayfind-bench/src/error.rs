use thiserror::Error;
use wayfind_paths::RegistryError;

/// Errors that stop a whole batch.
///
/// Individual searches never fail the batch; their outcome is recorded in
/// the job's [`BatchRecord`](crate::BatchRecord).
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("failed to build the worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("baseline algorithm \"{0}\" has no records")]
    MissingBaseline(String),
}
