//! Roster classification.
//!
//! The heart of the audit: compares a normalized roster snapshot
//! against the community member directory and sorts every mismatch
//! into one of seven buckets. Classification is pure and
//! deterministic — bucket emission order follows roster input order
//! (member-directory order for `not_in_our_clans`), and two runs over
//! identical snapshots produce identical results.
//!
//! The three promotion buckets are deliberately not mutually
//! exclusive: each tier is an independent test, so a member holding
//! several tier roles can appear in several promotion buckets in the
//! same run. Downstream consumers rely on this and it is covered by
//! tests; do not collapse the tiers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use famaudit_core::{ClanTag, MemberId, PlayerTag};

use crate::config::FamilyConfig;
use crate::identity::IdentityDirectory;
use crate::issue::AuditIssue;
use crate::member::MemberDirectory;
use crate::roster::{ClanRole, RosterEntry};

/// The promotion tiers, checked independently per resolved pair.
pub const PROMOTION_TIERS: [ClanRole; 3] = [ClanRole::Elder, ClanRole::CoLeader, ClanRole::Leader];

/// Reference to a roster entry with no resolved community member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRef {
    /// Player tag.
    pub tag: PlayerTag,
    /// Clan the entry belongs to.
    pub clan_tag: ClanTag,
}

/// Reference to a resolved roster-entry / community-member pair.
///
/// Buckets hold identifiers only, never owned copies of entries or
/// members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// Player tag of the roster entry.
    pub tag: PlayerTag,
    /// Resolved community member.
    pub member_id: MemberId,
    /// Clan the roster entry belongs to.
    pub clan_tag: ClanTag,
}

/// The seven classification buckets.
///
/// Buckets never de-duplicate: a member can appear in several buckets
/// across categories, and (through multiple linked tags) more than
/// once within a category, at most once per distinct pairing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Holds the community role `elder` but the in-game role differs.
    pub elder_promotion_req: Vec<Pairing>,
    /// Holds the community role `coleader` but the in-game role differs.
    pub coleader_promotion_req: Vec<Pairing>,
    /// Holds the community role `leader` but the in-game role differs.
    pub leader_promotion_req: Vec<Pairing>,
    /// Roster entries with no linked community member.
    pub unlinked: Vec<RosterRef>,
    /// Resolved pairs missing their clan's configured community role.
    pub no_clan_role: Vec<Pairing>,
    /// Resolved pairs missing the literal "Member" community role.
    pub no_member_role: Vec<Pairing>,
    /// Community members holding "Member" but absent from every
    /// tracked clan roster.
    pub not_in_our_clans: Vec<MemberId>,
}

impl ClassificationResult {
    /// Total findings across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.elder_promotion_req.len()
            + self.coleader_promotion_req.len()
            + self.leader_promotion_req.len()
            + self.unlinked.len()
            + self.no_clan_role.len()
            + self.no_member_role.len()
            + self.not_in_our_clans.len()
    }

    /// Check whether every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Bucket sizes keyed by bucket name, in declaration order.
    #[must_use]
    pub fn bucket_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("elder_promotion_req", self.elder_promotion_req.len()),
            ("coleader_promotion_req", self.coleader_promotion_req.len()),
            ("leader_promotion_req", self.leader_promotion_req.len()),
            ("unlinked", self.unlinked.len()),
            ("no_clan_role", self.no_clan_role.len()),
            ("no_member_role", self.no_member_role.len()),
            ("not_in_our_clans", self.not_in_our_clans.len()),
        ]
    }
}

/// Classification output: buckets plus the non-fatal findings
/// collected along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    /// The seven buckets.
    pub result: ClassificationResult,
    /// Non-fatal findings (ambiguous links, unknown clans).
    pub issues: Vec<AuditIssue>,
}

/// Classify a normalized roster against the community directory.
///
/// Applied once per run over the full roster; no streaming or
/// incremental mode. A resolved link whose member is missing from the
/// directory snapshot counts as unlinked — the link points at nobody
/// the audit can see.
#[must_use]
pub fn classify(
    roster: &[RosterEntry],
    identities: &IdentityDirectory,
    members: &MemberDirectory,
    config: &FamilyConfig,
) -> Classification {
    let mut result = ClassificationResult::default();
    let mut issues: Vec<AuditIssue> = identities.ambiguities().to_vec();

    // Members reachable from at least one roster entry.
    let mut accounted_for: HashSet<&MemberId> = HashSet::new();

    for entry in roster {
        let member = identities
            .resolve(&entry.tag)
            .and_then(|id| members.get(id));

        let Some(member) = member else {
            result.unlinked.push(RosterRef {
                tag: entry.tag.clone(),
                clan_tag: entry.clan_tag.clone(),
            });
            continue;
        };

        accounted_for.insert(&member.id);
        let pairing = Pairing {
            tag: entry.tag.clone(),
            member_id: member.id.clone(),
            clan_tag: entry.clan_tag.clone(),
        };

        // Promotion tiers. Each tier is an independent test against
        // the literal community role name (case-insensitive keyword).
        for tier in PROMOTION_TIERS {
            if member.has_role_ci(tier.keyword()) && entry.clan_role != Some(tier) {
                let bucket = match tier {
                    ClanRole::Elder => &mut result.elder_promotion_req,
                    ClanRole::CoLeader => &mut result.coleader_promotion_req,
                    ClanRole::Leader => &mut result.leader_promotion_req,
                    ClanRole::Member => unreachable!("Member is not a promotion tier"),
                };
                bucket.push(pairing.clone());
            }
        }

        // Clan role: exact-case match against the configured name.
        match config.role_for(&entry.clan_tag) {
            Some(role_name) => {
                if !member.has_role(role_name) {
                    result.no_clan_role.push(pairing.clone());
                }
            }
            None => {
                issues.push(AuditIssue::UnknownClan {
                    tag: entry.tag.clone(),
                    clan_tag: entry.clan_tag.clone(),
                });
            }
        }

        // Member role: exact-case literal "Member".
        if !member.has_role("Member") {
            result.no_member_role.push(pairing);
        }
    }

    // Members wearing "Member" that no roster entry accounts for, in
    // directory snapshot order.
    for member in members.iter() {
        if member.has_role("Member") && !accounted_for.contains(&member.id) {
            result.not_in_our_clans.push(member.id.clone());
        }
    }

    debug!(
        entries = roster.len(),
        findings = result.total(),
        issues = issues.len(),
        "Classified roster"
    );

    Classification { result, issues }
}
