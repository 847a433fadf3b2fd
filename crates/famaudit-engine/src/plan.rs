//! Role action planning.
//!
//! Converts a [`ClassificationResult`] into a minimal, idempotent
//! sequence of grant/revoke operations. The planner only reads the
//! snapshot it is given — it never queries live external state — so
//! re-running classify + plan against an already-corrected snapshot
//! yields an empty plan.
//!
//! Operations must be applied by the caller in the emitted order:
//! revokes precede the grant within each pairing, which keeps role
//! stores with an "exactly one clan role" constraint consistent at
//! every intermediate step.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use famaudit_core::{ClanTag, MemberId};

use crate::classify::ClassificationResult;
use crate::config::AuditConfig;
use crate::member::MemberDirectory;

/// What to do with a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleAction {
    /// Assign the role.
    Grant,
    /// Remove the role.
    Revoke,
}

impl RoleAction {
    /// String representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleAction::Grant => "grant",
            RoleAction::Revoke => "revoke",
        }
    }
}

impl std::fmt::Display for RoleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single proposed role mutation.
///
/// Produced by the planner, executed by the caller against the live
/// role store; never persisted by the core. Revoking a role the
/// member no longer holds is a downstream no-op, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOperation {
    /// Target community member.
    pub member_id: MemberId,
    /// Grant or revoke.
    pub action: RoleAction,
    /// Role to grant or revoke.
    pub role_name: String,
}

impl RoleOperation {
    /// Create a grant operation.
    pub fn grant(member_id: MemberId, role_name: impl Into<String>) -> Self {
        Self {
            member_id,
            action: RoleAction::Grant,
            role_name: role_name.into(),
        }
    }

    /// Create a revoke operation.
    pub fn revoke(member_id: MemberId, role_name: impl Into<String>) -> Self {
        Self {
            member_id,
            action: RoleAction::Revoke,
            role_name: role_name.into(),
        }
    }
}

impl std::fmt::Display for RoleOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} for {}", self.action, self.role_name, self.member_id)
    }
}

/// Key for suppressing repeat emissions of the same correction.
#[derive(PartialEq, Eq, Hash)]
enum PlanKey<'a> {
    ClanRole(&'a MemberId, &'a ClanTag),
    MemberRole(&'a MemberId),
    NotInClans(&'a MemberId),
}

/// Build the corrective plan for a classification.
///
/// Promotion buckets are reported only; they contribute no
/// operations. The member directory is consulted to limit revokes to
/// roles actually held at snapshot time.
#[must_use]
pub fn plan(
    result: &ClassificationResult,
    members: &MemberDirectory,
    config: &AuditConfig,
) -> Vec<RoleOperation> {
    let mut operations = Vec::new();
    let mut emitted: HashSet<PlanKey<'_>> = HashSet::new();

    // Wrong or missing clan role: strip every other configured clan
    // role the member wears, then grant the correct one.
    let clan_role_names = config.family.clan_role_names();
    for pairing in &result.no_clan_role {
        if !emitted.insert(PlanKey::ClanRole(&pairing.member_id, &pairing.clan_tag)) {
            continue;
        }
        let Some(target_role) = config.family.role_for(&pairing.clan_tag) else {
            // Classification only pairs configured clans; nothing to
            // plan for anything else.
            continue;
        };
        let Some(member) = members.get(&pairing.member_id) else {
            continue;
        };

        for role_name in &clan_role_names {
            if *role_name != target_role && member.has_role(role_name) {
                operations.push(RoleOperation::revoke(pairing.member_id.clone(), *role_name));
            }
        }
        operations.push(RoleOperation::grant(pairing.member_id.clone(), target_role));
    }

    // Missing the membership role: grant it and revoke the visitor
    // role, whether or not the latter is held.
    for pairing in &result.no_member_role {
        if !emitted.insert(PlanKey::MemberRole(&pairing.member_id)) {
            continue;
        }
        operations.push(RoleOperation::grant(
            pairing.member_id.clone(),
            config.member_role_name.as_str(),
        ));
        operations.push(RoleOperation::revoke(
            pairing.member_id.clone(),
            config.visitor_role_name.as_str(),
        ));
    }

    // Wearing membership roles without being in any tracked clan:
    // strip the candidate roles held and demote to visitor, unless an
    // exempt role protects the member.
    for member_id in &result.not_in_our_clans {
        if !emitted.insert(PlanKey::NotInClans(member_id)) {
            continue;
        }
        let Some(member) = members.get(member_id) else {
            continue;
        };
        if member
            .roles
            .iter()
            .any(|r| config.exempt_role_names.contains(r))
        {
            debug!(member_id = %member_id, "Exempt role holder skipped");
            continue;
        }

        for role_name in &config.revoke_candidates {
            if member.has_role(role_name) {
                operations.push(RoleOperation::revoke(member_id.clone(), role_name.as_str()));
            }
        }
        operations.push(RoleOperation::grant(
            member_id.clone(),
            config.visitor_role_name.as_str(),
        ));
    }

    debug!(operations = operations.len(), "Planned role corrections");
    operations
}
