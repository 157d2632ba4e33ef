//! Route targets, form intents and page modes.
//!
//! The product form is addressed as `/products/{segment}` where the segment is
//! either the literal `new` or a product identifier. [`Target`] keeps those two
//! cases apart so the `new` token can never be looked up as a record.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Errors that can occur when parsing a [`Target`] from a route segment.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The segment is neither `new` nor a well-formed product identifier.
    #[error("not a product identifier: {0}")]
    InvalidId(String),
}

/// What a product form route points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// No record yet; a fresh one is allocated on save.
    New,
    /// An already stored product.
    Existing(ProductId),
}

impl Target {
    /// Route segment reserved for the new-product form.
    pub const NEW_SEGMENT: &'static str = "new";

    /// Parse a route segment.
    ///
    /// # Errors
    ///
    /// Returns `TargetError::InvalidId` if the segment is not `new` and does
    /// not parse as a product identifier.
    pub fn parse(segment: &str) -> Result<Self, TargetError> {
        if segment == Self::NEW_SEGMENT {
            return Ok(Self::New);
        }

        segment
            .parse::<ProductId>()
            .map(Self::Existing)
            .map_err(|_| TargetError::InvalidId(segment.to_owned()))
    }

    /// The stored identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<ProductId> {
        match self {
            Self::New => None,
            Self::Existing(id) => Some(*id),
        }
    }

    /// The page mode this target is edited in.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::New => Mode::New,
            Self::Existing(_) => Mode::Edit,
        }
    }

    /// Path of the product form for this target.
    #[must_use]
    pub fn form_path(&self) -> String {
        format!("/products/{self}")
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str(Self::NEW_SEGMENT),
            Self::Existing(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ProductId> for Target {
    fn from(id: ProductId) -> Self {
        Self::Existing(id)
    }
}

/// Whether the form shows a brand-new product or an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    New,
    Edit,
}

impl Mode {
    /// Wire representation (`"new"` or `"edit"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Edit => "edit",
        }
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self, Self::New)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action discriminator submitted with a product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Save,
    Delete,
}

impl Intent {
    /// Interpret the raw `intent` form field.
    ///
    /// Only the exact value `delete` deletes; anything else (including a
    /// missing field) saves.
    #[must_use]
    pub fn from_form(raw: Option<&str>) -> Self {
        match raw {
            Some("delete") => Self::Delete,
            _ => Self::Save,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Delete => "delete",
        }
    }
}
