//! Catalog analytics behind the exploratory views
//!
//! Data preview, pick-rate leaders, side-by-side comparison, role
//! distribution and stat correlations. Everything here is computed from a
//! [`HeroCatalog`] on demand; rendering is left to the caller.

use serde::Serialize;
use tracing::warn;

use crate::hero::{normalize_token, Hero};
use crate::vector::{FEATURE_COLUMNS, FEATURE_DIM};
use crate::HeroCatalog;

/// Bounds on the number of preview rows.
pub const PREVIEW_ROWS: std::ops::RangeInclusive<usize> = 5..=50;

/// Clamp a requested preview size into [`PREVIEW_ROWS`], warning when the
/// request had to change.
pub fn preview_rows(requested: usize) -> usize {
    let rows = requested.clamp(*PREVIEW_ROWS.start(), *PREVIEW_ROWS.end());
    if rows != requested {
        warn!(requested, rows, "preview size out of range, clamped");
    }
    rows
}

/// First `rows` heroes in load order.
pub fn preview(catalog: &HeroCatalog, rows: usize) -> &[Hero] {
    let end = rows.min(catalog.len());
    &catalog.all()[..end]
}

/// Top `n` heroes by pick rate, highest first. Ties keep catalog order.
pub fn top_by_pick_rate(catalog: &HeroCatalog, n: usize) -> Vec<&Hero> {
    let mut heroes: Vec<&Hero> = catalog.iter().collect();
    heroes.sort_by(|a, b| b.pick_rate.total_cmp(&a.pick_rate));
    heroes.truncate(n);
    heroes
}

/// One cell of the long-format comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    pub hero_name: String,
    pub stat: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    /// Matching heroes, in catalog order.
    pub heroes: Vec<&'a Hero>,
    /// Requested names with no catalog entry (normalized).
    pub missing: Vec<String>,
}

impl<'a> Comparison<'a> {
    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    /// One row per (hero, stat) pair, heroes outer, stats in feature order.
    pub fn stat_rows(&self) -> Vec<StatRow> {
        self.heroes
            .iter()
            .flat_map(|hero| {
                let features = hero.features();
                FEATURE_COLUMNS
                    .into_iter()
                    .zip(features.as_slice().to_vec())
                    .map(|(stat, value)| StatRow {
                        hero_name: hero.name.clone(),
                        stat,
                        value,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// Compare the heroes named in a comma separated list such as
/// `"martis, irithel, tigreal"`.
///
/// Every catalog row whose name is in the list is returned (duplicates
/// included), so the result follows catalog order, not request order.
pub fn compare<'a>(catalog: &'a HeroCatalog, names: &str) -> Comparison<'a> {
    let wanted: Vec<String> = names
        .split(',')
        .map(normalize_token)
        .filter(|n| !n.is_empty())
        .collect();

    let heroes: Vec<&Hero> = catalog
        .iter()
        .filter(|h| wanted.contains(&h.name))
        .collect();

    let mut missing: Vec<String> = Vec::new();
    for name in wanted {
        if !catalog.contains(&name) && !missing.contains(&name) {
            missing.push(name);
        }
    }

    Comparison { heroes, missing }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleShare {
    pub role: String,
    pub count: usize,
    /// Share of the catalog in percent.
    pub percent: f64,
}

/// Heroes per role, most common first; equal counts keep first-seen order.
pub fn role_distribution(catalog: &HeroCatalog) -> Vec<RoleShare> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for hero in catalog {
        match counts.iter_mut().find(|(role, _)| *role == hero.role) {
            Some((_, count)) => *count += 1,
            None => counts.push((hero.role.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = catalog.len() as f64;
    counts
        .into_iter()
        .map(|(role, count)| RoleShare {
            role,
            count,
            percent: count as f64 * 100.0 / total,
        })
        .collect()
}

/// Pearson correlations between the six feature stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: [&'static str; FEATURE_DIM],
    pub values: [[f64; FEATURE_DIM]; FEATURE_DIM],
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        Some(self.values[i][j])
    }
}

/// Entries are `NaN` where the correlation is undefined: fewer than two
/// heroes, or a stat with zero variance.
pub fn correlation_matrix(catalog: &HeroCatalog) -> CorrelationMatrix {
    let columns: Vec<Vec<f64>> = (0..FEATURE_DIM)
        .map(|i| {
            catalog
                .iter()
                .map(|h| h.features().as_slice()[i])
                .collect()
        })
        .collect();

    let mut values = [[f64::NAN; FEATURE_DIM]; FEATURE_DIM];
    for i in 0..FEATURE_DIM {
        for j in 0..FEATURE_DIM {
            values[i][j] = pearson(&columns[i], &columns[j]);
        }
    }

    CorrelationMatrix {
        columns: FEATURE_COLUMNS,
        values,
    }
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}
