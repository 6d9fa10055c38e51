//! Command implementations.
//!
//! Every command writes its output to a caller-supplied writer so the same
//! code serves the terminal and tests.

pub mod cart;
pub mod checkout;
pub mod format;
pub mod history;
pub mod quiz;
pub mod status;

use clearr_core::checkout::CheckoutError;
use clearr_core::quiz::QuizError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Order draft could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A quiz answer was rejected.
    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    /// Checkout could not proceed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// The quiz ran out of answers before every question was answered.
    #[error("Quiz incomplete: missing an answer for {0}")]
    QuizIncomplete(&'static str),
}
