//! File storage: atomic writes, the problems directory and secrets.

pub mod atomic_file;
pub mod secret_storage;
pub mod solution_storage;

pub use atomic_file::{AtomicFileError, AtomicTextFile};
pub use secret_storage::{OpenAiSecret, SecretConfig, SecretStorage, SecretStorageError};
pub use solution_storage::FileSolutionStore;
