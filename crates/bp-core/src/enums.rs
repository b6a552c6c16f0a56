//! Role and status enums for BrightPath.
//!
//! Enums stored in SQL use their `as_str()` form; JSON uses the serde form,
//! which matches it except where noted.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Login role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
}

impl Role {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Parent => "parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CoverageStatus
// ---------------------------------------------------------------------------

/// Upload progress of one grade for one term.
///
/// `Complete` only when every known subject has at least one result and at
/// least one subject exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum CoverageStatus {
    #[serde(rename = "complete")]
    Complete,
    #[serde(rename = "in progress")]
    InProgress,
}

impl CoverageStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::InProgress => "in progress",
        }
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PerformanceOutcome
// ---------------------------------------------------------------------------

/// Why a student performance listing has the rows it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceOutcome {
    /// At least one row belongs to a released term.
    Released,
    /// The student has no result rows at all.
    NoRecords,
    /// Rows exist but none of their terms are released.
    NotReleased,
}

impl PerformanceOutcome {
    /// Message shown next to an empty listing, if any.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Released => None,
            Self::NoRecords => Some("No performance records found yet."),
            Self::NotReleased => Some("Results not yet released."),
        }
    }
}
