// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Library-level error taxonomy. Commands surface these through anyhow.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range input. Names the field that failed.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// The classifier was invoked implicitly and rejected its input.
    #[error("failed to categorize transaction: {0}")]
    Classification(#[source] Box<Error>),

    /// Referenced record does not exist or belongs to another owner.
    /// The two cases are deliberately indistinguishable.
    #[error("record not found")]
    NotFound,

    /// The underlying store failed.
    #[error("storage failure: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl Error {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
