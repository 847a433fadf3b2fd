//! Community member directory snapshot.
//!
//! The audit core never mutates a member's role set — it only reads
//! the snapshot and proposes changes through
//! [`RoleOperation`](crate::plan::RoleOperation) values.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use famaudit_core::MemberId;

/// A community-platform member at audit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityMember {
    /// Platform identifier.
    pub id: MemberId,
    /// Display name.
    pub display_name: String,
    /// Role names currently assigned, as a set.
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl CommunityMember {
    /// Create a member with the given roles.
    pub fn new<I, S>(id: impl Into<MemberId>, display_name: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact-case role check.
    #[must_use]
    pub fn has_role(&self, role_name: &str) -> bool {
        self.roles.contains(role_name)
    }

    /// Case-insensitive role check (used for promotion tier keywords).
    #[must_use]
    pub fn has_role_ci(&self, role_name: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role_name))
    }
}

/// Ordered snapshot of the full community member directory.
#[derive(Debug, Clone, Default)]
pub struct MemberDirectory {
    members: Vec<CommunityMember>,
    by_id: HashMap<MemberId, usize>,
}

impl MemberDirectory {
    /// Build a directory preserving input order.
    ///
    /// On a duplicated id the first entry wins; later entries are
    /// unreachable by lookup but keep their place in iteration.
    #[must_use]
    pub fn from_members(members: Vec<CommunityMember>) -> Self {
        let mut by_id = HashMap::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            by_id.entry(member.id.clone()).or_insert(index);
        }
        Self { members, by_id }
    }

    /// Look up a member by id.
    #[must_use]
    pub fn get(&self, id: &MemberId) -> Option<&CommunityMember> {
        self.by_id.get(id).map(|&i| &self.members[i])
    }

    /// Members in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &CommunityMember> {
        self.members.iter()
    }

    /// Number of members in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let member = CommunityMember::new("100", "SML", ["Member", "Alpha", "eLdEr"]);
        assert!(member.has_role("Member"));
        assert!(!member.has_role("member"));
        assert!(member.has_role_ci("elder"));
        assert!(!member.has_role_ci("coleader"));
    }

    #[test]
    fn test_directory_lookup_and_order() {
        let directory = MemberDirectory::from_members(vec![
            CommunityMember::new("200", "B", ["Member"]),
            CommunityMember::new("100", "A", ["Visitor"]),
        ]);

        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.get(&MemberId::from("100")).unwrap().display_name,
            "A"
        );
        let order: Vec<_> = directory.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(order, vec!["200", "100"]);
    }

    #[test]
    fn test_member_roles_deserialize_default() {
        let member: CommunityMember =
            serde_json::from_str(r#"{"id": "100", "display_name": "SML"}"#).unwrap();
        assert!(member.roles.is_empty());
    }
}
