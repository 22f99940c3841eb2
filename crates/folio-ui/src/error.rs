//! Error types surfaced by the page controller.
//!
//! # Design
//! - Every failure is contained by the operation that can fail; callers log and move on.
//! - Keep payloads as plain strings so JS exceptions can be folded in at the wasm boundary.

use thiserror::Error;

/// Page configuration was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The embedded configuration block was not valid JSON for [`crate::PageConfig`].
    #[error("configuration block could not be parsed: {detail}")]
    Parse {
        /// Parser error detail.
        detail: String,
    },
    /// A field contained an invalid value.
    #[error("invalid configuration field `{field}`: {reason}")]
    InvalidField {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            detail: err.to_string(),
        }
    }
}

/// Durable preference storage failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Storage is not available in this browsing context.
    #[error("preference storage is unavailable")]
    Unavailable,
    /// Writing a key failed (quota, privacy mode).
    #[error("failed to write preference `{key}`: {detail}")]
    Write {
        /// Key being written.
        key: String,
        /// Underlying failure detail.
        detail: String,
    },
}

/// Contact form submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// The form fields could not be collected.
    #[error("form fields could not be collected: {detail}")]
    Payload {
        /// Underlying failure detail.
        detail: String,
    },
    /// The request never produced a response.
    #[error("form submission could not be delivered: {detail}")]
    Transport {
        /// Transport failure detail.
        detail: String,
    },
    /// The endpoint answered outside the success range.
    #[error("form submission failed with status {status}")]
    Rejected {
        /// HTTP status returned by the endpoint.
        status: u16,
    },
}

/// Rewriting the visible address failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to replace the page address with `{url}`: {detail}")]
pub struct HistoryError {
    /// Target address.
    pub url: String,
    /// Underlying failure detail.
    pub detail: String,
}
