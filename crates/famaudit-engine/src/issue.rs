//! Non-fatal audit findings.
//!
//! A single bad record must never abort classification of the rest of
//! the roster, so data problems are reported as structured values
//! carried alongside results rather than raised as errors.

use serde::{Deserialize, Serialize};

use famaudit_core::{ClanTag, MemberId, PlayerTag};

/// A non-fatal finding collected during an audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditIssue {
    /// A raw roster record failed validation and was skipped.
    MalformedEntry {
        /// Position of the record in the input feed.
        index: usize,
        /// The record's tag, if it had a usable one.
        #[serde(skip_serializing_if = "Option::is_none")]
        tag: Option<String>,
        /// Why the record was rejected.
        reason: String,
    },

    /// The same tag is linked to more than one community member.
    ///
    /// The resolver keeps the first link in input order; every
    /// shadowed link is reported here.
    AmbiguousIdentity {
        /// The duplicated tag.
        tag: PlayerTag,
        /// The member the resolver kept.
        resolved: MemberId,
        /// The member whose link was shadowed.
        shadowed: MemberId,
    },

    /// A roster entry's clan is not present in the family config.
    ///
    /// The entry is excluded from clan-role classification but still
    /// participates in every other bucket.
    UnknownClan {
        /// The roster entry's tag.
        tag: PlayerTag,
        /// The unconfigured clan.
        clan_tag: ClanTag,
    },
}

impl AuditIssue {
    /// Short machine-readable label for summaries.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AuditIssue::MalformedEntry { .. } => "malformed_entry",
            AuditIssue::AmbiguousIdentity { .. } => "ambiguous_identity",
            AuditIssue::UnknownClan { .. } => "unknown_clan",
        }
    }
}

impl std::fmt::Display for AuditIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditIssue::MalformedEntry { index, tag, reason } => match tag {
                Some(tag) => write!(f, "malformed roster record #{index} ({tag}): {reason}"),
                None => write!(f, "malformed roster record #{index}: {reason}"),
            },
            AuditIssue::AmbiguousIdentity {
                tag,
                resolved,
                shadowed,
            } => write!(
                f,
                "tag {tag} linked to both {resolved} (kept) and {shadowed} (shadowed)"
            ),
            AuditIssue::UnknownClan { tag, clan_tag } => {
                write!(f, "roster entry {tag} belongs to unconfigured clan {clan_tag}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_kind_labels() {
        let issue = AuditIssue::MalformedEntry {
            index: 3,
            tag: None,
            reason: "missing trophies".to_string(),
        };
        assert_eq!(issue.kind(), "malformed_entry");

        let issue = AuditIssue::UnknownClan {
            tag: PlayerTag::parse("ABC123").unwrap(),
            clan_tag: ClanTag::parse("ZZZ999").unwrap(),
        };
        assert_eq!(issue.kind(), "unknown_clan");
    }

    #[test]
    fn test_issue_display() {
        let issue = AuditIssue::AmbiguousIdentity {
            tag: PlayerTag::parse("ABC123").unwrap(),
            resolved: MemberId::from("1"),
            shadowed: MemberId::from("2"),
        };
        let text = issue.to_string();
        assert!(text.contains("ABC123"));
        assert!(text.contains("kept"));
    }

    #[test]
    fn test_issue_serde_tagged() {
        let issue = AuditIssue::MalformedEntry {
            index: 0,
            tag: Some("#X".to_string()),
            reason: "missing name".to_string(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "malformed_entry");
    }
}
