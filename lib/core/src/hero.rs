use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::vector::FeatureVector;

/// Hero role vocabulary understood by the lane filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Marksman,
    Mage,
    Support,
    Tank,
    Assassin,
    Fighter,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Marksman,
        Role::Mage,
        Role::Support,
        Role::Tank,
        Role::Assassin,
        Role::Fighter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Marksman => "marksman",
            Role::Mage => "mage",
            Role::Support => "support",
            Role::Tank => "tank",
            Role::Assassin => "assassin",
            Role::Fighter => "fighter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == token)
            .ok_or(())
    }
}

/// A single catalog row.
///
/// `name` and `role` are stored trimmed and lower-cased. The role is kept as
/// text so rows with roles outside [`Role::ALL`] survive loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(rename = "hero_name")]
    pub name: String,
    pub role: String,
    pub win_rate: f64,
    pub pick_rate: f64,
    pub offense_overall: f64,
    pub defense_overall: f64,
    pub skill_effect_overall: f64,
    pub difficulty_overall: f64,
}

impl Hero {
    /// Parsed role, `None` for roles outside the known vocabulary.
    #[inline]
    pub fn known_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    #[inline]
    #[must_use]
    pub fn features(&self) -> FeatureVector {
        FeatureVector::new([
            self.win_rate,
            self.pick_rate,
            self.offense_overall,
            self.defense_overall,
            self.skill_effect_overall,
            self.difficulty_overall,
        ])
    }

    /// Title-cased name for display ("yi sun-shin" -> "Yi Sun-shin").
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

/// Trim and lower-case a name, role or lane token.
#[inline]
pub fn normalize_token(s: &str) -> String {
    s.trim().to_lowercase()
}

pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
