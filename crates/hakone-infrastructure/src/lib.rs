pub mod paths;
pub mod storage;
pub mod user_service;

pub use crate::paths::{HakonePaths, PathError};
pub use crate::storage::{ConfigStorage, SecretStorage, SecretStorageError};
pub use crate::user_service::ConfigBasedUserService;
