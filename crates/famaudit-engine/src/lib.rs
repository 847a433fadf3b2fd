//! # Clan-Family Audit Engine
//!
//! Reconciles membership records between an external game's clan
//! rosters and a chat community's role assignments, producing a
//! structured audit report plus an idempotent set of corrective role
//! operations.
//!
//! ## Overview
//!
//! The engine provides:
//! - Roster normalization with fail-closed validation of raw feed records
//! - Identity resolution between game tags and community members
//! - Seven-bucket mismatch classification (promotion tiers, missing
//!   roles, unlinked entries, members outside all tracked clans)
//! - Idempotent role-grant/role-revoke action planning with exemption rules
//! - Count summaries and CSV export for the caller's presentation layer
//! - Roster search with transliterated name matching
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        AuditEngine                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────┐          │
//! │  │ Normalizer │──►│ Classifier │──►│  Planner   │          │
//! │  └────────────┘   └────────────┘   └────────────┘          │
//! │        │                │                 │                 │
//! │        ▼                ▼                 ▼                 │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────┐          │
//! │  │  Identity  │   │   Issues   │   │  Summary   │          │
//! │  │ Directory  │   │ (values)   │   │  / CSV     │          │
//! │  └────────────┘   └────────────┘   └────────────┘          │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way: raw roster + identity links → normalized
//! roster → classification → action plan. The engine is synchronous,
//! pure computation over immutable snapshots; fetching rosters,
//! persisting settings, and executing role operations all belong to
//! the caller's collaborators.
//!
//! ## Usage
//!
//! ```
//! use famaudit_engine::{AuditConfig, AuditEngine, AuditSnapshot, FamilyConfig};
//!
//! let config = AuditConfig::new(FamilyConfig::default());
//! let engine = AuditEngine::new(config).unwrap();
//!
//! let outcome = engine.run(&AuditSnapshot::default());
//! assert!(outcome.classification.is_empty());
//! assert!(outcome.operations.is_empty());
//! ```

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod issue;
pub mod member;
pub mod plan;
pub mod report;
pub mod roster;
pub mod search;

// Re-export main types
pub use classify::{classify, Classification, ClassificationResult, Pairing, RosterRef};
pub use config::{AuditConfig, ClanDescriptor, FamilyConfig, MembershipType};
pub use engine::{AuditEngine, AuditOutcome, AuditRunInfo, AuditSnapshot};
pub use error::{AuditError, AuditResult};
pub use identity::{IdentityDirectory, IdentityLink};
pub use issue::AuditIssue;
pub use member::{CommunityMember, MemberDirectory};
pub use plan::{plan, RoleAction, RoleOperation};
pub use report::{AuditSummary, ClanBreakdown, ReportGenerator};
pub use roster::{normalize, normalize_roster, ClanRole, RawClanRef, RawMemberRecord, RosterEntry};
pub use search::{search, RosterQuery};

// Identifier types shared with callers
pub use famaudit_core::{ClanTag, MemberId, ParseTagError, PlayerTag};
