//! Roster search.
//!
//! Filters a normalized roster by display name, clan name, and trophy
//! range. Name matching is forgiving about decorated in-game names: a
//! plain case-insensitive substring test is tried first, then a
//! transliterated fallback that strips the name down to ASCII word
//! characters, so "lowenherz" finds a player named "Löwenherz★".

use unidecode::unidecode;

use crate::roster::RosterEntry;

const DEFAULT_MAX_TROPHIES: u32 = 10_000;

/// Search filter over a normalized roster.
#[derive(Debug, Clone)]
pub struct RosterQuery {
    /// Display-name substring, case-insensitive.
    pub name: Option<String>,
    /// Clan-name substring, case-insensitive.
    pub clan: Option<String>,
    /// Minimum trophies, inclusive.
    pub min_trophies: u32,
    /// Maximum trophies, inclusive.
    pub max_trophies: u32,
}

impl Default for RosterQuery {
    fn default() -> Self {
        Self {
            name: None,
            clan: None,
            min_trophies: 0,
            max_trophies: DEFAULT_MAX_TROPHIES,
        }
    }
}

impl RosterQuery {
    /// Create an unconstrained query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by display-name substring.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filter by clan-name substring.
    pub fn with_clan(mut self, clan: impl Into<String>) -> Self {
        self.clan = Some(clan.into());
        self
    }

    /// Set the minimum trophy count.
    #[must_use]
    pub fn with_min_trophies(mut self, min: u32) -> Self {
        self.min_trophies = min;
        self
    }

    /// Set the maximum trophy count.
    #[must_use]
    pub fn with_max_trophies(mut self, max: u32) -> Self {
        self.max_trophies = max;
        self
    }

    fn matches(&self, entry: &RosterEntry) -> bool {
        if entry.trophies < self.min_trophies || entry.trophies > self.max_trophies {
            return false;
        }
        if let Some(clan) = &self.clan {
            if !entry
                .clan_name
                .to_lowercase()
                .contains(&clan.to_lowercase())
            {
                return false;
            }
        }
        if let Some(name) = &self.name {
            let needle = name.to_lowercase();
            let direct = entry.display_name.to_lowercase().contains(&needle);
            let folded = fold_name(&entry.display_name).contains(&needle);
            if !direct && !folded {
                return false;
            }
        }
        true
    }
}

/// Transliterate a display name to lowercase ASCII word characters.
fn fold_name(name: &str) -> String {
    unidecode(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

/// Search the roster, preserving input order.
#[must_use]
pub fn search<'a>(roster: &'a [RosterEntry], query: &RosterQuery) -> Vec<&'a RosterEntry> {
    roster.iter().filter(|e| query.matches(e)).collect()
}
