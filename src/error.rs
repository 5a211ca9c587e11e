// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A composite error type for everything that can go wrong while driving a
//! timeline.
//!
//! The first two variants are local precondition failures: the delegate raises
//! them before the timeline source is ever invoked, and they are never retried
//! automatically. Everything else wraps a failure bubbling up from page
//! loading. Source failures are carried through unchanged so callers can
//! inspect whatever their transport reported.

use std::error::Error as StdError;

/// Convenient alias to a `Result` containing this crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type used across the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The item buffer is full, so no further page load may be dispatched.
    ///
    /// The caller decides whether to drop items and retry; the engine never
    /// evicts on its own.
    #[error("Max capacity reached")]
    MaxCapacity,
    /// A page load is already in flight. The dispatch was suppressed rather
    /// than queued; retry once the outstanding load completes.
    #[error("Request already in flight")]
    RequestInFlight,
    /// A page payload could not be deserialized.
    #[error("error deserializing page: {0}")]
    DeserializeError(#[from] serde_json::Error),
    /// A failure reported by the timeline source, passed through unchanged.
    #[error("timeline source error: {0}")]
    Service(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Wraps an arbitrary source failure for the [`Error::Service`] variant.
    pub fn service<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error::Service(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn precondition_failures_use_fixed_messages() {
        assert_eq!(Error::MaxCapacity.to_string(), "Max capacity reached");
        assert_eq!(
            Error::RequestInFlight.to_string(),
            "Request already in flight"
        );
    }

    #[test]
    fn service_errors_surface_the_original_message() {
        let err = Error::service("connection reset by peer");
        assert!(err.to_string().contains("connection reset by peer"));
    }
}
