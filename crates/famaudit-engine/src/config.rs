//! Clan-family configuration.
//!
//! An ordered list of clan descriptors. Only clans of membership type
//! `Member` participate in reconciliation and action planning; other
//! entries (feeder clans, retired clans) are carried for reporting but
//! never classified against.

use serde::{Deserialize, Serialize};

use famaudit_core::ClanTag;

use crate::error::{AuditError, AuditResult};

/// Membership type of a configured clan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum MembershipType {
    /// Participates in reconciliation.
    Member,
    /// Any other configured type, carried verbatim.
    Other(String),
}

impl MembershipType {
    /// Whether clans of this type participate in reconciliation.
    #[must_use]
    pub fn participates(&self) -> bool {
        matches!(self, MembershipType::Member)
    }

    /// String form as found in the config.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            MembershipType::Member => "Member",
            MembershipType::Other(s) => s,
        }
    }
}

impl From<MembershipType> for String {
    fn from(t: MembershipType) -> String {
        t.as_str().to_string()
    }
}

impl From<String> for MembershipType {
    fn from(s: String) -> Self {
        // Exact match: only the literal "Member" participates.
        if s == "Member" {
            MembershipType::Member
        } else {
            MembershipType::Other(s)
        }
    }
}

impl<'de> Deserialize<'de> for MembershipType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(String::deserialize(deserializer)?.into())
    }
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single configured clan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanDescriptor {
    /// Clan name.
    pub name: String,
    /// Normalized clan tag.
    pub tag: ClanTag,
    /// Community role granted to members of this clan.
    pub role_name: String,
    /// Membership type.
    #[serde(rename = "type")]
    pub membership_type: MembershipType,
}

/// Ordered clan-family configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyConfig {
    /// Configured clans, in family order.
    pub clans: Vec<ClanDescriptor>,
}

impl FamilyConfig {
    /// Create a config from descriptors, validating the invariant
    /// that every participating clan's `role_name` is unique.
    pub fn new(clans: Vec<ClanDescriptor>) -> AuditResult<Self> {
        let config = Self { clans };
        config.validate()?;
        Ok(config)
    }

    /// Validate the participating-role-name uniqueness invariant.
    pub fn validate(&self) -> AuditResult<()> {
        let mut seen = std::collections::HashSet::new();
        for clan in self.participating() {
            if !seen.insert(clan.role_name.as_str()) {
                return Err(AuditError::configuration(format!(
                    "duplicate clan role name among participating clans: {}",
                    clan.role_name
                )));
            }
        }
        Ok(())
    }

    /// Participating (type `Member`) clans, in config order.
    pub fn participating(&self) -> impl Iterator<Item = &ClanDescriptor> {
        self.clans.iter().filter(|c| c.membership_type.participates())
    }

    /// Tags of participating clans, in config order.
    #[must_use]
    pub fn participating_tags(&self) -> Vec<&ClanTag> {
        self.participating().map(|c| &c.tag).collect()
    }

    /// Community role name for a participating clan, by tag.
    #[must_use]
    pub fn role_for(&self, clan_tag: &ClanTag) -> Option<&str> {
        self.participating()
            .find(|c| &c.tag == clan_tag)
            .map(|c| c.role_name.as_str())
    }

    /// All participating clan role names, in config order.
    #[must_use]
    pub fn clan_role_names(&self) -> Vec<&str> {
        self.participating().map(|c| c.role_name.as_str()).collect()
    }
}

/// Configuration for a full audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// The clan family under audit.
    pub family: FamilyConfig,
    /// Community roles that suppress `not_in_our_clans` correction.
    #[serde(default = "default_exempt_role_names")]
    pub exempt_role_names: std::collections::BTreeSet<String>,
    /// Roles stripped from members who are not in our clans.
    #[serde(default = "default_revoke_candidates")]
    pub revoke_candidates: Vec<String>,
    /// The community-wide membership role.
    #[serde(default = "default_member_role_name")]
    pub member_role_name: String,
    /// The role granted to non-members.
    #[serde(default = "default_visitor_role_name")]
    pub visitor_role_name: String,
}

fn default_exempt_role_names() -> std::collections::BTreeSet<String> {
    ["Special", "Keep-Member", "Leader-Emeritus"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_revoke_candidates() -> Vec<String> {
    vec![
        "Member".to_string(),
        "Tourney".to_string(),
        "Practice".to_string(),
    ]
}

fn default_member_role_name() -> String {
    "Member".to_string()
}

fn default_visitor_role_name() -> String {
    "Visitor".to_string()
}

impl AuditConfig {
    /// Config for a family with the default role conventions.
    #[must_use]
    pub fn new(family: FamilyConfig) -> Self {
        Self {
            family,
            exempt_role_names: default_exempt_role_names(),
            revoke_candidates: default_revoke_candidates(),
            member_role_name: default_member_role_name(),
            visitor_role_name: default_visitor_role_name(),
        }
    }
}
