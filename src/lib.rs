//! In-memory key-value store and data validator that pick their failure
//! channel by the kind of problem.
//!
//! Expected, caller-checkable outcomes come back as `Option` or `bool`.
//! Programmer errors and operational failures come back as typed errors
//! from [`error`].

pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod store;
pub mod validator;

pub use crate::config::{load_config, AppConfig};
pub use directory::{User, UserDirectory};
pub use error::{DirectoryError, StoreError, ValidationError};
pub use store::datatype::DataType;
pub use store::Store;
pub use validator::{BatchFailure, DataValidator, ValidationStats};
