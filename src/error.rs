use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid key: {key:?}")]
    InvalidKey { key: String },

    #[error("Required key '{key}' not found")]
    RequiredKeyMissing { key: String },

    #[error("Value for key '{key}' cannot be null")]
    InvalidValue { key: String },

    #[error("Source unavailable: {origin}: {source}")]
    SourceUnavailable {
        origin: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid rules specification: expected a list, got {found}")]
    InvalidRuleSpec { found: &'static str },

    #[error("Required field cannot be null")]
    RequiredValueMissing,

    #[error("Required field cannot be empty")]
    RequiredValueEmpty,

    #[error("Cannot convert required field of type {kind} to string")]
    Uncoercible { kind: &'static str },

    #[error("Required field failed validation rule '{rule}'")]
    RuleViolation { rule: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Invalid username: {username:?}")]
    InvalidUsername { username: String },

    #[error("User not found: {username}")]
    UserNotFound { username: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
