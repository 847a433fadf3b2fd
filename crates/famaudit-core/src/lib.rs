//! famaudit Core Library
//!
//! Shared identifier types for the famaudit clan-family audit engine.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (`PlayerTag`, `ClanTag`, `MemberId`)
//!
//! # Example
//!
//! ```
//! use famaudit_core::{ClanTag, MemberId, PlayerTag};
//!
//! // Tags normalize on construction
//! let tag = PlayerTag::parse("#22q0vgup").unwrap();
//! assert_eq!(tag.as_str(), "22Q0VGUP");
//!
//! let clan = ClanTag::parse("#9PJ82CRC").unwrap();
//! let member = MemberId::from("99688854348369920");
//! assert_eq!(member.as_str(), "99688854348369920");
//! # let _ = clan;
//! ```

pub mod ids;

// Re-export main types for convenient access
pub use ids::{ClanTag, MemberId, ParseTagError, PlayerTag};
