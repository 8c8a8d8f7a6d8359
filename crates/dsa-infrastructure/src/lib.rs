//! Infrastructure layer for the DSA agent: configuration, paths and file storage.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use config_service::{AppConfig, ConfigFile, ConfigService};
pub use paths::DsaPaths;
pub use storage::FileSolutionStore;
