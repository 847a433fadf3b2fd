//! Audit engine orchestrator.
//!
//! Runs the full pipeline over a caller-supplied snapshot:
//! normalize → resolve → classify → plan → summarize. Everything is
//! synchronous, pure computation over the snapshot — no I/O, no
//! shared state, no concurrency. Callers may discard an outcome
//! freely; applying one is entirely their business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::classify::{classify, ClassificationResult};
use crate::config::AuditConfig;
use crate::error::AuditResult;
use crate::identity::{IdentityDirectory, IdentityLink};
use crate::issue::AuditIssue;
use crate::member::{CommunityMember, MemberDirectory};
use crate::plan::{plan, RoleOperation};
use crate::report::{AuditSummary, ReportGenerator};
use crate::roster::{normalize_roster, RawMemberRecord};

/// Immutable input snapshot for one audit run.
///
/// All three collections are captured by the caller's collaborators
/// (roster fetcher, identity store, community directory) before the
/// run starts; the engine never fetches anything itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSnapshot {
    /// Raw roster feed across all tracked clans.
    pub roster: Vec<RawMemberRecord>,
    /// Identity links, in store order.
    pub links: Vec<IdentityLink>,
    /// Community member directory, in directory order.
    pub members: Vec<CommunityMember>,
}

/// Identity of a completed audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRunInfo {
    /// Run ID.
    pub id: Uuid,
    /// When the outcome was produced.
    pub generated_at: DateTime<Utc>,
}

/// Everything one audit run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditOutcome {
    /// Run identity.
    pub run: AuditRunInfo,
    /// The seven classification buckets.
    pub classification: ClassificationResult,
    /// Corrective operations, in mandatory application order.
    pub operations: Vec<RoleOperation>,
    /// Non-fatal findings collected across the pipeline.
    pub issues: Vec<AuditIssue>,
    /// Count summaries for presentation.
    pub summary: AuditSummary,
}

/// The audit engine.
pub struct AuditEngine {
    config: AuditConfig,
}

impl AuditEngine {
    /// Create an engine for a validated configuration.
    pub fn new(config: AuditConfig) -> AuditResult<Self> {
        config.family.validate()?;
        Ok(Self { config })
    }

    /// Get the engine configuration.
    #[must_use]
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Run a full audit over a snapshot.
    #[must_use]
    pub fn run(&self, snapshot: &AuditSnapshot) -> AuditOutcome {
        let run = AuditRunInfo {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
        };

        let (entries, mut issues) = normalize_roster(&snapshot.roster);
        let identities = IdentityDirectory::from_links(snapshot.links.clone());
        let members = MemberDirectory::from_members(snapshot.members.clone());

        let classification = classify(&entries, &identities, &members, &self.config.family);
        issues.extend(classification.issues);

        let operations = plan(&classification.result, &members, &self.config);

        let summary = ReportGenerator::summarize(
            &classification.result,
            &operations,
            &issues,
            &self.config.family,
            snapshot.roster.len() as u32,
            entries.len() as u32,
        );

        for issue in &issues {
            warn!(kind = issue.kind(), "{issue}");
        }
        info!(
            run_id = %run.id,
            roster_total = snapshot.roster.len(),
            entries = entries.len(),
            findings = classification.result.total(),
            operations = operations.len(),
            issues = issues.len(),
            "Completed audit run"
        );

        AuditOutcome {
            run,
            classification: classification.result,
            operations,
            issues,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClanDescriptor, FamilyConfig, MembershipType};
    use crate::roster::RawClanRef;
    use famaudit_core::{ClanTag, PlayerTag};

    fn config() -> AuditConfig {
        AuditConfig::new(
            FamilyConfig::new(vec![ClanDescriptor {
                name: "Alpha".to_string(),
                tag: ClanTag::parse("#AAA").unwrap(),
                role_name: "Alpha".to_string(),
                membership_type: MembershipType::Member,
            }])
            .unwrap(),
        )
    }

    fn raw(tag: &str, role: &str) -> RawMemberRecord {
        RawMemberRecord {
            tag: Some(tag.to_string()),
            name: Some(tag.to_string()),
            role: Some(role.to_string()),
            trophies: Some(5000),
            clan: Some(RawClanRef {
                name: Some("Alpha".to_string()),
                tag: Some("#AAA".to_string()),
            }),
        }
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let family = FamilyConfig {
            clans: vec![
                ClanDescriptor {
                    name: "Alpha".to_string(),
                    tag: ClanTag::parse("#AAA").unwrap(),
                    role_name: "Shared".to_string(),
                    membership_type: MembershipType::Member,
                },
                ClanDescriptor {
                    name: "Bravo".to_string(),
                    tag: ClanTag::parse("#BBB").unwrap(),
                    role_name: "Shared".to_string(),
                    membership_type: MembershipType::Member,
                },
            ],
        };
        assert!(AuditEngine::new(AuditConfig::new(family)).is_err());
    }

    #[test]
    fn test_run_collects_malformed_and_continues() {
        let engine = AuditEngine::new(config()).unwrap();

        let mut bad = raw("#BAD", "member");
        bad.trophies = None;

        let snapshot = AuditSnapshot {
            roster: vec![raw("#AAA111", "member"), bad],
            links: vec![IdentityLink::new(
                "100",
                PlayerTag::parse("AAA111").unwrap(),
            )],
            members: vec![CommunityMember::new("100", "SML", ["Member", "Alpha"])],
        };

        let outcome = engine.run(&snapshot);
        assert_eq!(outcome.summary.roster_total, 2);
        assert_eq!(outcome.summary.entries_classified, 1);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind(), "malformed_entry");
        // The clean record was still classified and is fully consistent.
        assert!(outcome.classification.is_empty());
        assert!(outcome.operations.is_empty());
    }

    #[test]
    fn test_run_is_deterministic_apart_from_run_info() {
        let engine = AuditEngine::new(config()).unwrap();
        let snapshot = AuditSnapshot {
            roster: vec![raw("#AAA111", "member"), raw("#BBB222", "elder")],
            links: vec![
                IdentityLink::new("100", PlayerTag::parse("AAA111").unwrap()),
                IdentityLink::new("200", PlayerTag::parse("BBB222").unwrap()),
            ],
            members: vec![
                CommunityMember::new("100", "A", ["Visitor"]),
                CommunityMember::new("200", "B", ["Member", "Alpha", "elder"]),
            ],
        };

        let first = engine.run(&snapshot);
        let second = engine.run(&snapshot);
        assert_eq!(first.classification, second.classification);
        assert_eq!(first.operations, second.operations);
        assert_ne!(first.run.id, second.run.id);
    }
}
