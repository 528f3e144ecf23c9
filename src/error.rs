//! Error types for the Cortica crate.
//!
//! This module provides a unified error type for all fallible operations in
//! Cortica, using the `thiserror` crate for ergonomic error handling.
//!
//! Construction-time parameter problems and per-call input-shape mismatches
//! surface here; everything else in the region is either saturating policy
//! (permanence clamps, empty neighborhoods) or a debug assertion.

use thiserror::Error;

/// The main error type for Cortica operations.
#[derive(Error, Debug)]
pub enum CorticaError {
    /// A construction parameter is out of its legal range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input buffer length does not match the region's input topology.
    #[error("Invalid input size: expected {expected}, got {actual}")]
    InvalidInputSize {
        /// Expected number of input bits
        expected: usize,
        /// Actual number of bits received
        actual: usize,
    },

    /// I/O error while reading or writing a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization error.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// A specialized `Result` type for Cortica operations.
pub type Result<T> = std::result::Result<T, CorticaError>;
