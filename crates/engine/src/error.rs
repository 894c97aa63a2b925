//! The module contains the error the engine can throw.
//!
//! The errors fall in three groups:
//!
//! - validation: [`InvalidAmount`], [`InvalidCategory`], [`InvalidDate`],
//!   raised before anything is written;
//! - [`KeyNotFound`] thrown when a record does not exist;
//! - [`Database`] when the store cannot be opened, read or written.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Returns `true` for errors caused by caller input rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InvalidCategory(_) | Self::InvalidDate(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
