//! Strongly Typed Identifiers
//!
//! This module provides type-safe identifier types for famaudit.
//! Using the newtype pattern, these types prevent accidental misuse of
//! different identifier kinds at compile time: a game-player tag, a
//! game-clan tag, and a community-platform member id are all plain
//! strings on the wire but must never be confused with one another.
//!
//! # Example
//!
//! ```
//! use famaudit_core::{MemberId, PlayerTag};
//!
//! let tag: PlayerTag = "#22q0vgup".parse().unwrap();
//! assert_eq!(tag.as_str(), "22Q0VGUP");
//!
//! // Type safety: cannot pass a MemberId where a PlayerTag is expected
//! fn requires_tag(tag: &PlayerTag) -> &str {
//!     tag.as_str()
//! }
//!
//! let _ = requires_tag(&tag);
//! let member = MemberId::from("99688854348369920");
//! // requires_tag(&member); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error type for tag parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTagError {
    /// The type of tag that failed to parse.
    pub tag_type: &'static str,
    /// Why the input was rejected.
    pub message: String,
}

impl Display for ParseTagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.tag_type, self.message)
    }
}

impl std::error::Error for ParseTagError {}

/// Normalize a raw game tag: trim surrounding whitespace, strip a
/// single leading `#`, uppercase.
///
/// Two tags are equal iff their normalized forms are equal, and the
/// normalization is idempotent.
fn normalize_tag(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('#')
        .unwrap_or(trimmed)
        .trim()
        .to_ascii_uppercase()
}

/// Macro to define a strongly-typed, normalizing game-tag type.
macro_rules! define_tag {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse and normalize a raw tag.
            ///
            /// Strips a leading `#`, trims whitespace, and uppercases.
            /// Fails only when nothing remains after normalization.
            pub fn parse(raw: &str) -> Result<Self, ParseTagError> {
                let normalized = normalize_tag(raw);
                if normalized.is_empty() {
                    return Err(ParseTagError {
                        tag_type: stringify!($name),
                        message: format!("empty tag after normalization: {raw:?}"),
                    });
                }
                Ok(Self(normalized))
            }

            /// Returns the normalized tag, without a leading `#`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseTagError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseTagError;

            fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
                Self::parse(&s)
            }
        }

        impl From<$name> for String {
            fn from(tag: $name) -> String {
                tag.0
            }
        }
    };
}

define_tag!(
    /// Strongly typed game-player tag.
    ///
    /// Unique identifier for a game-roster member, normalized to
    /// uppercase without a leading `#`. Construction always
    /// normalizes, so two `PlayerTag` values compare equal exactly
    /// when their source tags denote the same player.
    ///
    /// # Example
    ///
    /// ```
    /// use famaudit_core::PlayerTag;
    ///
    /// let a = PlayerTag::parse("#22Q0VGUP").unwrap();
    /// let b = PlayerTag::parse(" 22q0vgup ").unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str(), "22Q0VGUP");
    /// ```
    PlayerTag
);

define_tag!(
    /// Strongly typed game-clan tag, normalized like [`PlayerTag`].
    ClanTag
);

/// Opaque community-platform member identifier.
///
/// The chat platform assigns these (numeric snowflakes in practice);
/// the audit core treats them as opaque strings and never interprets
/// their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for MemberId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
