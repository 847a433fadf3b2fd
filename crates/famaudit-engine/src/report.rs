//! Audit report generation.
//!
//! Aggregates a classification and its plan into count summaries for
//! the caller's presentation layer, plus a CSV export of the raw
//! classification rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use famaudit_core::ClanTag;

use crate::classify::{ClassificationResult, Pairing, RosterRef};
use crate::config::FamilyConfig;
use crate::issue::AuditIssue;
use crate::plan::RoleOperation;

/// Summary counts for an audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Raw records in the feed.
    pub roster_total: u32,
    /// Records that survived normalization and were classified.
    pub entries_classified: u32,
    /// Findings by bucket name.
    pub findings_by_bucket: BTreeMap<String, u32>,
    /// Planned operations by action name.
    pub operations_by_action: BTreeMap<String, u32>,
    /// Non-fatal issues by kind.
    pub issues_by_kind: BTreeMap<String, u32>,
    /// Findings broken down per participating clan, in family order.
    pub by_clan: Vec<ClanBreakdown>,
}

/// Per-clan view of the roster-side buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanBreakdown {
    /// Clan name.
    pub clan_name: String,
    /// Clan tag.
    pub clan_tag: ClanTag,
    /// Entries with no linked community member.
    pub unlinked: u32,
    /// Pending elder promotions.
    pub elder_promotion_req: u32,
    /// Pending co-leader promotions.
    pub coleader_promotion_req: u32,
    /// Pending leader promotions.
    pub leader_promotion_req: u32,
    /// Members missing this clan's role.
    pub no_clan_role: u32,
}

/// Summary and export generation.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Summarize a classification, plan, and issue list.
    #[must_use]
    pub fn summarize(
        result: &ClassificationResult,
        operations: &[RoleOperation],
        issues: &[AuditIssue],
        family: &FamilyConfig,
        roster_total: u32,
        entries_classified: u32,
    ) -> AuditSummary {
        let mut findings_by_bucket = BTreeMap::new();
        for (bucket, count) in result.bucket_counts() {
            if count > 0 {
                findings_by_bucket.insert(bucket.to_string(), count as u32);
            }
        }

        let mut operations_by_action = BTreeMap::new();
        for op in operations {
            *operations_by_action
                .entry(op.action.as_str().to_string())
                .or_insert(0) += 1;
        }

        let mut issues_by_kind = BTreeMap::new();
        for issue in issues {
            *issues_by_kind.entry(issue.kind().to_string()).or_insert(0) += 1;
        }

        let by_clan = family
            .participating()
            .map(|clan| ClanBreakdown {
                clan_name: clan.name.clone(),
                clan_tag: clan.tag.clone(),
                unlinked: count_refs(&result.unlinked, &clan.tag),
                elder_promotion_req: count_pairings(&result.elder_promotion_req, &clan.tag),
                coleader_promotion_req: count_pairings(&result.coleader_promotion_req, &clan.tag),
                leader_promotion_req: count_pairings(&result.leader_promotion_req, &clan.tag),
                no_clan_role: count_pairings(&result.no_clan_role, &clan.tag),
            })
            .collect();

        AuditSummary {
            roster_total,
            entries_classified,
            findings_by_bucket,
            operations_by_action,
            issues_by_kind,
            by_clan,
        }
    }

    /// Generate CSV export of classification rows.
    #[must_use]
    pub fn generate_csv(result: &ClassificationResult) -> String {
        let mut csv = String::new();
        csv.push_str("bucket,tag,member_id,clan_tag\n");

        let mut push = |bucket: &str, tag: &str, member_id: &str, clan_tag: &str| {
            csv.push_str(&format!("{bucket},{tag},{member_id},{clan_tag}\n"));
        };

        let pairing_buckets: [(&str, &[Pairing]); 5] = [
            ("elder_promotion_req", &result.elder_promotion_req),
            ("coleader_promotion_req", &result.coleader_promotion_req),
            ("leader_promotion_req", &result.leader_promotion_req),
            ("no_clan_role", &result.no_clan_role),
            ("no_member_role", &result.no_member_role),
        ];
        for (bucket, pairings) in pairing_buckets {
            for p in pairings {
                push(bucket, p.tag.as_str(), p.member_id.as_str(), p.clan_tag.as_str());
            }
        }
        for r in &result.unlinked {
            push("unlinked", r.tag.as_str(), "", r.clan_tag.as_str());
        }
        for m in &result.not_in_our_clans {
            push("not_in_our_clans", "", m.as_str(), "");
        }

        csv
    }
}

fn count_pairings(pairings: &[Pairing], clan_tag: &ClanTag) -> u32 {
    pairings.iter().filter(|p| &p.clan_tag == clan_tag).count() as u32
}

fn count_refs(refs: &[RosterRef], clan_tag: &ClanTag) -> u32 {
    refs.iter().filter(|r| &r.clan_tag == clan_tag).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClanDescriptor, MembershipType};
    use crate::plan::RoleAction;
    use famaudit_core::{MemberId, PlayerTag};

    fn clan_tag(s: &str) -> ClanTag {
        ClanTag::parse(s).unwrap()
    }

    fn pairing(tag: &str, member: &str, clan: &str) -> Pairing {
        Pairing {
            tag: PlayerTag::parse(tag).unwrap(),
            member_id: MemberId::from(member),
            clan_tag: clan_tag(clan),
        }
    }

    fn family() -> FamilyConfig {
        FamilyConfig::new(vec![
            ClanDescriptor {
                name: "Alpha".to_string(),
                tag: clan_tag("#AAA"),
                role_name: "Alpha".to_string(),
                membership_type: MembershipType::Member,
            },
            ClanDescriptor {
                name: "Bravo".to_string(),
                tag: clan_tag("#BBB"),
                role_name: "Bravo".to_string(),
                membership_type: MembershipType::Member,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let mut result = ClassificationResult::default();
        result.no_clan_role.push(pairing("AAA111", "100", "#AAA"));
        result.no_clan_role.push(pairing("BBB222", "200", "#BBB"));
        result.elder_promotion_req.push(pairing("AAA111", "100", "#AAA"));
        result.not_in_our_clans.push(MemberId::from("300"));

        let operations = vec![
            crate::plan::RoleOperation::grant(MemberId::from("100"), "Alpha"),
            crate::plan::RoleOperation::revoke(MemberId::from("300"), "Member"),
            crate::plan::RoleOperation::grant(MemberId::from("300"), "Visitor"),
        ];

        let summary =
            ReportGenerator::summarize(&result, &operations, &[], &family(), 10, 9);

        assert_eq!(summary.roster_total, 10);
        assert_eq!(summary.entries_classified, 9);
        assert_eq!(summary.findings_by_bucket.get("no_clan_role"), Some(&2));
        assert_eq!(summary.findings_by_bucket.get("elder_promotion_req"), Some(&1));
        assert_eq!(summary.findings_by_bucket.get("no_member_role"), None);
        assert_eq!(
            summary.operations_by_action.get(RoleAction::Grant.as_str()),
            Some(&2)
        );
        assert_eq!(
            summary.operations_by_action.get(RoleAction::Revoke.as_str()),
            Some(&1)
        );

        assert_eq!(summary.by_clan.len(), 2);
        assert_eq!(summary.by_clan[0].clan_name, "Alpha");
        assert_eq!(summary.by_clan[0].no_clan_role, 1);
        assert_eq!(summary.by_clan[0].elder_promotion_req, 1);
        assert_eq!(summary.by_clan[1].no_clan_role, 1);
    }

    #[test]
    fn test_csv_generation() {
        let mut result = ClassificationResult::default();
        result.no_clan_role.push(pairing("AAA111", "100", "#AAA"));
        result.unlinked.push(RosterRef {
            tag: PlayerTag::parse("CCC333").unwrap(),
            clan_tag: clan_tag("#AAA"),
        });
        result.not_in_our_clans.push(MemberId::from("300"));

        let csv = ReportGenerator::generate_csv(&result);

        assert!(csv.starts_with("bucket,tag,member_id,clan_tag\n"));
        assert!(csv.contains("no_clan_role,AAA111,100,AAA"));
        assert!(csv.contains("unlinked,CCC333,,AAA"));
        assert!(csv.contains("not_in_our_clans,,300,"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = ReportGenerator::summarize(
            &ClassificationResult::default(),
            &[],
            &[],
            &FamilyConfig::default(),
            0,
            0,
        );
        assert!(summary.findings_by_bucket.is_empty());
        assert!(summary.operations_by_action.is_empty());
        assert!(summary.by_clan.is_empty());
    }
}
