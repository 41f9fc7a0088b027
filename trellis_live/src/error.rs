// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The live-value error taxonomy.
//!
//! Grammar violations during revalidation never surface here directly:
//! they taint the value as malformed, and only an explicit
//! [`check`](crate::LiveList::check) call escalates them to
//! [`LiveError::Malformed`]. Bounds, type, and read-only violations are
//! returned immediately at the call site.

use alloc::string::String;
use core::fmt;

use crate::name::QualName;

/// Error returned by live-value operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiveError {
    /// An index was outside `0..len`.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The list length at the time of the call.
        len: usize,
    },
    /// A typed operation received a value outside its kind's domain.
    TypeMismatch {
        /// The kind that was expected.
        expected: &'static str,
    },
    /// A structural mutation was attempted through a read-only view.
    ReadOnly,
    /// `check()` found the backing attribute absent.
    Missing {
        /// The attribute that is absent.
        name: QualName,
    },
    /// `check()` found the backing attribute unparseable.
    Malformed {
        /// The attribute whose text failed to parse.
        name: QualName,
        /// The raw offending text.
        text: String,
    },
}

impl fmt::Display for LiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for list of length {len}")
            }
            Self::TypeMismatch { expected } => {
                write!(f, "value is not a valid {expected}")
            }
            Self::ReadOnly => f.write_str("value is read-only while animated"),
            Self::Missing { name } => {
                write!(f, "required attribute `{name}` is missing")
            }
            Self::Malformed { name, text } => {
                write!(f, "attribute `{name}` has malformed value {text:?}")
            }
        }
    }
}

impl core::error::Error for LiveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        let err = LiveError::IndexOutOfBounds { index: 3, len: 2 };
        assert_eq!(
            format!("{err}"),
            "index 3 out of bounds for list of length 2"
        );

        let err = LiveError::Malformed {
            name: QualName::local("points"),
            text: "1 2 x".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "attribute `points` has malformed value \"1 2 x\""
        );
    }
}
