//! Roster normalization.
//!
//! Converts raw per-member feed records into typed, validated
//! [`RosterEntry`] values. Validation fails closed: a record with a
//! missing required field or a negative trophy count is rejected as a
//! [`MalformedEntry`](AuditIssue::MalformedEntry) and skipped, never
//! silently dropped and never fatal to the run.

use serde::{Deserialize, Serialize};
use tracing::debug;

use famaudit_core::{ClanTag, PlayerTag};

use crate::issue::AuditIssue;

/// In-game clan role, canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClanRole {
    /// Regular member.
    Member,
    /// Elder.
    Elder,
    /// Co-leader.
    CoLeader,
    /// Leader.
    Leader,
}

impl ClanRole {
    /// Canonical display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ClanRole::Member => "Member",
            ClanRole::Elder => "Elder",
            ClanRole::CoLeader => "Co-Leader",
            ClanRole::Leader => "Leader",
        }
    }

    /// The raw keyword the game feed uses for this role.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            ClanRole::Member => "member",
            ClanRole::Elder => "elder",
            ClanRole::CoLeader => "coleader",
            ClanRole::Leader => "leader",
        }
    }

    /// Canonicalize a raw role string from the feed.
    ///
    /// Matches case-insensitively against the fixed keyword set;
    /// anything else is "no recognized role" (`None`), not an error.
    #[must_use]
    pub fn canonicalize(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "member" => Some(ClanRole::Member),
            "elder" => Some(ClanRole::Elder),
            "coleader" => Some(ClanRole::CoLeader),
            "leader" => Some(ClanRole::Leader),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClanRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ClanRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClanRole::canonicalize(s).ok_or_else(|| format!("Unknown clan role: {s}"))
    }
}

/// Clan reference embedded in a raw feed record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawClanRef {
    /// Clan name.
    pub name: Option<String>,
    /// Clan tag.
    pub tag: Option<String>,
}

/// Raw per-member record as delivered by the roster feed.
///
/// Every field is optional so that deserialization always succeeds;
/// [`normalize`] is the validation step that rejects bad records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMemberRecord {
    /// Game-player tag, usually with a leading `#`.
    pub tag: Option<String>,
    /// In-game display name.
    pub name: Option<String>,
    /// Free-text role string.
    pub role: Option<String>,
    /// Trophy count.
    pub trophies: Option<i64>,
    /// The clan this record was fetched from.
    pub clan: Option<RawClanRef>,
}

/// A validated, normalized roster entry. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Normalized player tag, unique within a roster.
    pub tag: PlayerTag,
    /// In-game display name.
    pub display_name: String,
    /// Canonical clan role; `None` when the feed value was not one of
    /// the recognized keywords.
    pub clan_role: Option<ClanRole>,
    /// Trophy count.
    pub trophies: u32,
    /// Normalized tag of the clan this entry belongs to.
    pub clan_tag: ClanTag,
    /// Name of the clan this entry belongs to.
    pub clan_name: String,
}

impl RosterEntry {
    /// Canonical role label, empty when no recognized role.
    #[must_use]
    pub fn role_label(&self) -> &'static str {
        self.clan_role.map_or("", |r| r.as_str())
    }
}

fn malformed(index: usize, tag: Option<&str>, reason: impl Into<String>) -> AuditIssue {
    AuditIssue::MalformedEntry {
        index,
        tag: tag.map(str::to_string),
        reason: reason.into(),
    }
}

/// Validate and normalize a single raw record.
///
/// Required fields are `tag`, `name`, `role`, `trophies`, and the
/// clan reference (`clan.name`, `clan.tag`); `trophies` must be a
/// non-negative integer. An unrecognized `role` value is not an
/// error — it normalizes to "no recognized role".
pub fn normalize(raw: &RawMemberRecord, index: usize) -> Result<RosterEntry, AuditIssue> {
    let raw_tag = raw.tag.as_deref();

    let tag = match raw_tag {
        Some(t) => PlayerTag::parse(t).map_err(|e| malformed(index, raw_tag, e.to_string()))?,
        None => return Err(malformed(index, None, "missing field: tag")),
    };

    let display_name = raw
        .name
        .as_deref()
        .ok_or_else(|| malformed(index, raw_tag, "missing field: name"))?
        .to_string();

    let role = raw
        .role
        .as_deref()
        .ok_or_else(|| malformed(index, raw_tag, "missing field: role"))?;
    let clan_role = ClanRole::canonicalize(role);
    if clan_role.is_none() {
        debug!(tag = %tag, role, "Unrecognized clan role normalized to empty");
    }

    let trophies = raw
        .trophies
        .ok_or_else(|| malformed(index, raw_tag, "missing field: trophies"))?;
    let trophies = u32::try_from(trophies)
        .map_err(|_| malformed(index, raw_tag, format!("negative trophies: {trophies}")))?;

    let clan = raw
        .clan
        .as_ref()
        .ok_or_else(|| malformed(index, raw_tag, "missing field: clan"))?;
    let clan_tag = match clan.tag.as_deref() {
        Some(t) => ClanTag::parse(t).map_err(|e| malformed(index, raw_tag, e.to_string()))?,
        None => return Err(malformed(index, raw_tag, "missing field: clan.tag")),
    };
    let clan_name = clan
        .name
        .as_deref()
        .ok_or_else(|| malformed(index, raw_tag, "missing field: clan.name"))?
        .to_string();

    Ok(RosterEntry {
        tag,
        display_name,
        clan_role,
        trophies,
        clan_tag,
        clan_name,
    })
}

/// Normalize a whole feed, skipping and collecting malformed records.
///
/// Output order follows input order for the surviving entries.
#[must_use]
pub fn normalize_roster(raws: &[RawMemberRecord]) -> (Vec<RosterEntry>, Vec<AuditIssue>) {
    let mut entries = Vec::with_capacity(raws.len());
    let mut issues = Vec::new();

    for (index, raw) in raws.iter().enumerate() {
        match normalize(raw, index) {
            Ok(entry) => entries.push(entry),
            Err(issue) => issues.push(issue),
        }
    }

    (entries, issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tag: &str, name: &str, role: &str, trophies: i64) -> RawMemberRecord {
        RawMemberRecord {
            tag: Some(tag.to_string()),
            name: Some(name.to_string()),
            role: Some(role.to_string()),
            trophies: Some(trophies),
            clan: Some(RawClanRef {
                name: Some("Alpha".to_string()),
                tag: Some("#9PJ82CRC".to_string()),
            }),
        }
    }

    #[test]
    fn test_clan_role_canonicalization() {
        assert_eq!(ClanRole::canonicalize("leader"), Some(ClanRole::Leader));
        assert_eq!(ClanRole::canonicalize("coLeader"), Some(ClanRole::CoLeader));
        assert_eq!(ClanRole::canonicalize("ELDER"), Some(ClanRole::Elder));
        assert_eq!(ClanRole::canonicalize("member"), Some(ClanRole::Member));
        assert_eq!(ClanRole::canonicalize("admin"), None);
        assert_eq!(ClanRole::canonicalize(""), None);
    }

    #[test]
    fn test_clan_role_labels() {
        assert_eq!(ClanRole::CoLeader.as_str(), "Co-Leader");
        assert_eq!(ClanRole::CoLeader.keyword(), "coleader");
        assert_eq!(format!("{}", ClanRole::Elder), "Elder");
    }

    #[test]
    fn test_normalize_happy_path() {
        let entry = normalize(&raw("#abc123", "SML", "coLeader", 5123), 0).unwrap();
        assert_eq!(entry.tag.as_str(), "ABC123");
        assert_eq!(entry.display_name, "SML");
        assert_eq!(entry.clan_role, Some(ClanRole::CoLeader));
        assert_eq!(entry.trophies, 5123);
        assert_eq!(entry.clan_tag.as_str(), "9PJ82CRC");
        assert_eq!(entry.clan_name, "Alpha");
        assert_eq!(entry.role_label(), "Co-Leader");
    }

    #[test]
    fn test_normalize_unrecognized_role_is_not_an_error() {
        let entry = normalize(&raw("#abc123", "SML", "admin", 100), 0).unwrap();
        assert_eq!(entry.clan_role, None);
        assert_eq!(entry.role_label(), "");
    }

    #[test]
    fn test_normalize_missing_trophies() {
        let mut record = raw("#abc123", "SML", "member", 0);
        record.trophies = None;
        let issue = normalize(&record, 7).unwrap_err();
        match issue {
            AuditIssue::MalformedEntry { index, reason, .. } => {
                assert_eq!(index, 7);
                assert!(reason.contains("trophies"));
            }
            other => panic!("unexpected issue: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_negative_trophies() {
        let record = raw("#abc123", "SML", "member", -1);
        assert!(normalize(&record, 0).is_err());
    }

    #[test]
    fn test_normalize_roster_skips_and_collects() {
        let mut bad = raw("#bad", "Broken", "member", 100);
        bad.name = None;

        let feed = vec![
            raw("#aaa", "First", "member", 100),
            bad,
            raw("#bbb", "Second", "elder", 200),
        ];

        let (entries, issues) = normalize_roster(&feed);
        assert_eq!(entries.len(), 2);
        assert_eq!(issues.len(), 1);
        assert_eq!(entries[0].tag.as_str(), "AAA");
        assert_eq!(entries[1].tag.as_str(), "BBB");
    }

    #[test]
    fn test_raw_record_deserializes_with_missing_fields() {
        let record: RawMemberRecord =
            serde_json::from_str(r##"{"tag": "#ABC", "name": "SML"}"##).unwrap();
        assert!(record.trophies.is_none());
        assert!(normalize(&record, 0).is_err());
    }
}
