//! Slug - URL-safe community identifier derived from the community name
//!
//! A slug is lowercase ASCII alphanumerics separated by single hyphens,
//! never empty, never longer than [`Slug::MAX_LEN`]. Uniqueness among
//! non-deleted communities is enforced at the store; this type only owns
//! the textual invariant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// URL-safe community slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum slug length in bytes
    pub const MAX_LEN: usize = 64;

    /// Normalize an arbitrary name into a slug
    ///
    /// Returns `None` when nothing slug-worthy remains (e.g. the name is
    /// all punctuation).
    pub fn from_name(name: &str) -> Option<Self> {
        let mut out = String::with_capacity(name.len());
        let mut last_hyphen = true; // suppress leading hyphen

        for ch in name.chars() {
            if ch.is_ascii_alphanumeric() {
                out.push(ch.to_ascii_lowercase());
                last_hyphen = false;
            } else if !last_hyphen {
                out.push('-');
                last_hyphen = true;
            }
        }

        while out.ends_with('-') {
            out.pop();
        }
        out.truncate(Self::MAX_LEN);
        while out.ends_with('-') {
            out.pop();
        }

        if out.is_empty() {
            None
        } else {
            Some(Self(out))
        }
    }

    /// Wrap an already-normalized slug loaded from storage
    pub fn from_stored(slug: String) -> Self {
        Self(slug)
    }

    /// Derive a de-duplication candidate: `{slug}-{suffix}`
    ///
    /// The base is shortened if needed so the result stays within
    /// [`Slug::MAX_LEN`].
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let budget = Self::MAX_LEN.saturating_sub(suffix.len() + 1);
        let mut base = self.0.clone();
        base.truncate(budget);
        while base.ends_with('-') {
            base.pop();
        }
        Self(format!("{base}-{suffix}"))
    }

    /// The bare slug text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully-qualified form used in URLs: `c/{slug}`
    pub fn full(&self) -> String {
        format!("c/{}", self.0)
    }

    /// Consume into the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
