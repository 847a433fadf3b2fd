//! Identity resolution between game tags and community members.
//!
//! The identity store is externally supplied and read-only to the
//! core. A tag maps to at most one community member at a time; when
//! the store is corrupt and carries duplicates, the first link in
//! stable input order wins and the shadowed links are reported as
//! [`AuditIssue::AmbiguousIdentity`] findings rather than errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use famaudit_core::{MemberId, PlayerTag};

use crate::issue::AuditIssue;

/// A single game-tag to community-member association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityLink {
    /// Community-member identifier.
    pub member_id: MemberId,
    /// Normalized game-player tag.
    pub tag: PlayerTag,
}

impl IdentityLink {
    /// Create a new link.
    pub fn new(member_id: impl Into<MemberId>, tag: PlayerTag) -> Self {
        Self {
            member_id: member_id.into(),
            tag,
        }
    }
}

/// Read-only lookup table built from a snapshot of identity links.
#[derive(Debug, Clone, Default)]
pub struct IdentityDirectory {
    links: Vec<IdentityLink>,
    by_tag: HashMap<PlayerTag, MemberId>,
    duplicates: Vec<AuditIssue>,
}

impl IdentityDirectory {
    /// Build a directory from links in stable input order.
    ///
    /// Duplicate tags keep the first link; each shadowed link becomes
    /// an [`AuditIssue::AmbiguousIdentity`].
    #[must_use]
    pub fn from_links(links: Vec<IdentityLink>) -> Self {
        let mut by_tag: HashMap<PlayerTag, MemberId> = HashMap::with_capacity(links.len());
        let mut duplicates = Vec::new();

        for link in &links {
            if let Some(existing) = by_tag.get(&link.tag) {
                if existing != &link.member_id {
                    duplicates.push(AuditIssue::AmbiguousIdentity {
                        tag: link.tag.clone(),
                        resolved: existing.clone(),
                        shadowed: link.member_id.clone(),
                    });
                }
            } else {
                by_tag.insert(link.tag.clone(), link.member_id.clone());
            }
        }

        Self {
            links,
            by_tag,
            duplicates,
        }
    }

    /// Resolve a normalized tag to its community member, if linked.
    #[must_use]
    pub fn resolve(&self, tag: &PlayerTag) -> Option<&MemberId> {
        self.by_tag.get(tag)
    }

    /// All tags linked to a given member, in input order.
    pub fn tags_for<'a>(&'a self, member_id: &'a MemberId) -> impl Iterator<Item = &'a PlayerTag> {
        self.links
            .iter()
            .filter(move |l| &l.member_id == member_id)
            .map(|l| &l.tag)
    }

    /// Ambiguity findings collected while building the directory.
    #[must_use]
    pub fn ambiguities(&self) -> &[AuditIssue] {
        &self.duplicates
    }

    /// Number of links in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Check whether the snapshot holds no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> PlayerTag {
        PlayerTag::parse(s).unwrap()
    }

    #[test]
    fn test_resolve_linked_tag() {
        let directory = IdentityDirectory::from_links(vec![
            IdentityLink::new("100", tag("AAA111")),
            IdentityLink::new("200", tag("BBB222")),
        ]);

        assert_eq!(
            directory.resolve(&tag("aaa111")),
            Some(&MemberId::from("100"))
        );
        assert_eq!(directory.resolve(&tag("CCC333")), None);
    }

    #[test]
    fn test_duplicate_tag_first_match_wins() {
        let directory = IdentityDirectory::from_links(vec![
            IdentityLink::new("100", tag("AAA111")),
            IdentityLink::new("200", tag("AAA111")),
        ]);

        assert_eq!(
            directory.resolve(&tag("AAA111")),
            Some(&MemberId::from("100"))
        );
        assert_eq!(directory.ambiguities().len(), 1);
        match &directory.ambiguities()[0] {
            AuditIssue::AmbiguousIdentity {
                resolved, shadowed, ..
            } => {
                assert_eq!(resolved, &MemberId::from("100"));
                assert_eq!(shadowed, &MemberId::from("200"));
            }
            other => panic!("unexpected issue: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_identical_link_is_not_ambiguous() {
        let directory = IdentityDirectory::from_links(vec![
            IdentityLink::new("100", tag("AAA111")),
            IdentityLink::new("100", tag("AAA111")),
        ]);
        assert!(directory.ambiguities().is_empty());
    }

    #[test]
    fn test_tags_for_member() {
        let directory = IdentityDirectory::from_links(vec![
            IdentityLink::new("100", tag("AAA111")),
            IdentityLink::new("100", tag("ALT999")),
            IdentityLink::new("200", tag("BBB222")),
        ]);

        let member = MemberId::from("100");
        let tags: Vec<_> = directory.tags_for(&member).collect();
        assert_eq!(tags, vec![&tag("AAA111"), &tag("ALT999")]);
    }

    #[test]
    fn test_empty_directory() {
        let directory = IdentityDirectory::from_links(vec![]);
        assert!(directory.is_empty());
        assert_eq!(directory.len(), 0);
        assert_eq!(directory.resolve(&tag("AAA111")), None);
    }
}
