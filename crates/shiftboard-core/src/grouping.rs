//! Name-based checklist categorization.
//!
//! Checklists carry no structured category upstream, so the group is derived
//! from the display name. Any name that matches none of the explicit patterns
//! lands in [`GroupKey::Restauracja`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

use crate::error::ValidationError;

/// Checklist category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Plaza32a,
    Wydma33,
    Toalety,
    ToaletyRestauracja,
    Restauracja,
}

const PLAZA_PATTERNS: &[&str] = &["plaza 32a", "plaża 32a", "plaza32a", "plaża32a"];
const WYDMA_PATTERNS: &[&str] = &["wydma 33", "wydma33"];

impl GroupKey {
    /// All groups in dashboard display order.
    pub const ALL: [GroupKey; 5] = [
        GroupKey::Plaza32a,
        GroupKey::Wydma33,
        GroupKey::Toalety,
        GroupKey::ToaletyRestauracja,
        GroupKey::Restauracja,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Plaza32a => "plaza32a",
            GroupKey::Wydma33 => "wydma33",
            GroupKey::Toalety => "toalety",
            GroupKey::ToaletyRestauracja => "toalety_restauracja",
            GroupKey::Restauracja => "restauracja",
        }
    }

    /// Human-readable label for tiles and charts.
    pub fn label(&self) -> &'static str {
        match self {
            GroupKey::Plaza32a => "Plaża32A",
            GroupKey::Wydma33 => "Wydma 33",
            GroupKey::Toalety => "Toalety",
            GroupKey::ToaletyRestauracja => "Toalety Restauracja",
            GroupKey::Restauracja => "Restauracja",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        GroupKey::ALL
            .into_iter()
            .find(|g| g.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "group".into(),
                message: format!(
                    "unknown group '{s}' (expected one of: {})",
                    GroupKey::ALL.map(|g| g.as_str()).join(", ")
                ),
            })
    }
}

/// Lowercase, strip combining diacritics and collapse whitespace.
pub fn normalize_name(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .nfkd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a checklist name to its group. Check order is significant.
pub fn detect_group(list_name: &str) -> GroupKey {
    let n = normalize_name(list_name);

    let has_toalety = n.contains("toalety");
    let has_restauracja = n.contains("restauracja");
    if has_toalety && has_restauracja {
        return GroupKey::ToaletyRestauracja;
    }
    if has_toalety {
        return GroupKey::Toalety;
    }
    if PLAZA_PATTERNS.iter().any(|p| n.contains(p)) {
        return GroupKey::Plaza32a;
    }
    if WYDMA_PATTERNS.iter().any(|p| n.contains(p)) {
        return GroupKey::Wydma33;
    }
    GroupKey::Restauracja
}
