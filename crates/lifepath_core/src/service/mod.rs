//! Use-case services for the conversational layer.
//!
//! # Responsibility
//! - Turn free text into a date decision for the current turn.
//! - Orchestrate numerology, report assembly, generation and caching.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod date_turn;
pub mod portrait_service;

pub use date_turn::{classify_turn, DateTurn};
pub use portrait_service::{Portrait, PortraitService};

#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "report cache failed: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
