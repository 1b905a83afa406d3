//! Community role - the ranked moderation hierarchy within a community
//!
//! Rank order is a named contract: Member < Moderator < Admin. Every
//! rank-based authorization check goes through [`CommunityRole::rank`],
//! never through implicit enum ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a member holds within a single community
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommunityRole {
    #[default]
    Member,
    Moderator,
    Admin,
}

impl CommunityRole {
    /// Explicit rank function: Member = 0, Moderator = 1, Admin = 2
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Member => 0,
            Self::Moderator => 1,
            Self::Admin => 2,
        }
    }

    /// Check if this role strictly outranks another
    #[inline]
    pub const fn outranks(self, other: Self) -> bool {
        self.rank() > other.rank()
    }

    /// Check if this role carries moderation privileges (Moderator or Admin)
    #[inline]
    pub const fn is_moderator(self) -> bool {
        self.rank() >= Self::Moderator.rank()
    }

    /// Stable string form used for storage and wire payloads
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for CommunityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a role from its string form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown community role: {0}")]
pub struct RoleParseError(pub String);

impl std::str::FromStr for CommunityRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}
