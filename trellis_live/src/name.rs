// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Qualified attribute names.

use core::fmt;

/// A (namespace, local name) pair identifying a backing attribute.
///
/// Names are built from `'static` strings so they stay `Copy` and can be
/// used as cheap map keys; this mirrors how attribute vocabularies are
/// fixed at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualName {
    /// Namespace URI, or `None` for the null namespace.
    pub namespace: Option<&'static str>,
    /// Local attribute name.
    pub local: &'static str,
}

impl QualName {
    /// Creates a name in the null namespace.
    #[must_use]
    pub const fn local(local: &'static str) -> Self {
        Self {
            namespace: None,
            local,
        }
    }

    /// Creates a namespaced name.
    #[must_use]
    pub const fn namespaced(namespace: &'static str, local: &'static str) -> Self {
        Self {
            namespace: Some(namespace),
            local,
        }
    }
}

impl fmt::Display for QualName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(self.local),
        }
    }
}
