// Role and lane filters over the hero catalog
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::hero::{normalize_token, Hero, Role};
use crate::{Error, HeroCatalog, Result};

pub trait HeroFilter {
    fn matches(&self, hero: &Hero) -> bool;
}

/// Lane tokens accepted by [`recommend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Gold,
    Mid,
    Jungle,
    Roam,
    Exp,
}

impl Lane {
    pub const ALL: [Lane; 5] = [Lane::Gold, Lane::Mid, Lane::Jungle, Lane::Roam, Lane::Exp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Gold => "gold",
            Lane::Mid => "mid",
            Lane::Jungle => "jungle",
            Lane::Roam => "roam",
            Lane::Exp => "exp",
        }
    }

    /// Roles eligible for this lane.
    pub fn roles(&self) -> &'static [Role] {
        match self {
            Lane::Gold => &[Role::Marksman],
            Lane::Mid => &[Role::Mage, Role::Support],
            Lane::Roam => &[Role::Tank, Role::Support],
            Lane::Jungle => &[Role::Assassin, Role::Fighter],
            Lane::Exp => &[Role::Fighter, Role::Tank],
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = normalize_token(s);
        Lane::ALL
            .iter()
            .copied()
            .find(|lane| lane.as_str() == token)
            .ok_or(Error::InvalidLane(token))
    }
}

/// Matches heroes whose role is one of a fixed set.
#[derive(Debug, Clone)]
pub struct RoleFilter {
    roles: Vec<Role>,
}

impl RoleFilter {
    pub fn new(roles: impl Into<Vec<Role>>) -> Self {
        Self { roles: roles.into() }
    }
}

impl HeroFilter for RoleFilter {
    fn matches(&self, hero: &Hero) -> bool {
        hero.known_role()
            .map(|role| self.roles.contains(&role))
            .unwrap_or(false)
    }
}

/// Role filter for one lane.
#[derive(Debug, Clone, Copy)]
pub struct LaneFilter {
    lane: Lane,
}

impl LaneFilter {
    pub fn new(lane: Lane) -> Self {
        Self { lane }
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    /// Heroes of the lane's roles, best win rate first.
    ///
    /// The sort is stable, so heroes with equal win rates keep catalog order.
    pub fn apply<'a>(&self, catalog: &'a HeroCatalog) -> Vec<&'a Hero> {
        let mut heroes: Vec<&Hero> = catalog.iter().filter(|h| self.matches(h)).collect();
        heroes.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
        heroes
    }
}

impl HeroFilter for LaneFilter {
    fn matches(&self, hero: &Hero) -> bool {
        hero.known_role()
            .map(|role| self.lane.roles().contains(&role))
            .unwrap_or(false)
    }
}

/// Recommend heroes for a lane token such as `"gold"` or `" Mid "`.
///
/// Returns an empty vector when no hero plays the lane's roles, and
/// [`Error::InvalidLane`] for tokens outside `gold, mid, jungle, roam, exp`.
pub fn recommend<'a>(catalog: &'a HeroCatalog, lane: &str) -> Result<Vec<&'a Hero>> {
    let lane: Lane = lane.parse()?;
    Ok(LaneFilter::new(lane).apply(catalog))
}
