use crate::hero::{normalize_token, Hero};
use crate::vector::FEATURE_COLUMNS;
use crate::{Error, Result, SchemaError};
use ahash::AHashMap;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// One record from a data source, keyed by column name.
pub type RawRow = Map<String, Value>;

pub const NAME_COLUMN: &str = "hero_name";
pub const ROLE_COLUMN: &str = "role";

/// Immutable, load-ordered table of heroes.
///
/// Duplicate names are allowed; name lookups resolve to the first row
/// carrying that name.
#[derive(Debug, Clone, Default)]
pub struct HeroCatalog {
    heroes: Vec<Hero>,
    by_name: AHashMap<String, usize>,
}

impl HeroCatalog {
    /// Build a catalog from raw rows.
    ///
    /// Column names are trimmed and lower-cased before lookup, `hero_name`
    /// and `role` values likewise. Every feature column must hold a finite
    /// number (or a string that parses to one). The first bad row aborts the
    /// load.
    pub fn load<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut heroes = Vec::new();
        for (idx, raw) in rows.into_iter().enumerate() {
            let row = normalize_columns(raw);
            heroes.push(parse_row(idx, &row)?);
        }

        let catalog = Self::from_heroes(heroes)?;

        let unknown = catalog
            .heroes
            .iter()
            .filter(|h| h.known_role().is_none())
            .count();
        if unknown > 0 {
            warn!(unknown, "heroes with unrecognized roles will never match a lane");
        }
        info!(heroes = catalog.len(), "hero catalog loaded");

        Ok(catalog)
    }

    /// Like [`HeroCatalog::load`], but checks a table header first so that a
    /// table without data rows still fails on missing columns.
    pub fn load_with_columns<C, S, I>(columns: C, rows: I) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
        I: IntoIterator<Item = RawRow>,
    {
        check_columns(columns)?;
        Self::load(rows)
    }

    /// Build a catalog from already-typed heroes, normalizing name and role.
    ///
    /// Rejects heroes with a blank name or role, or a stat that is not finite.
    pub fn from_heroes(heroes: Vec<Hero>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(heroes.len());
        for (idx, mut hero) in heroes.into_iter().enumerate() {
            hero.name = normalize_token(&hero.name);
            hero.role = normalize_token(&hero.role);
            validate_hero(idx, &hero)?;
            normalized.push(hero);
        }

        let mut by_name = AHashMap::with_capacity(normalized.len());
        for (idx, hero) in normalized.iter().enumerate() {
            by_name.entry(hero.name.clone()).or_insert(idx);
        }

        Ok(Self {
            heroes: normalized,
            by_name,
        })
    }

    /// Case-insensitive exact match on the trimmed name.
    pub fn lookup(&self, name: &str) -> Result<&Hero> {
        let key = normalize_token(name);
        self.by_name
            .get(&key)
            .map(|&idx| &self.heroes[idx])
            .ok_or(Error::HeroNotFound(key))
    }

    /// Load-order position of the first hero with this name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(&normalize_token(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[inline]
    pub fn all(&self) -> &[Hero] {
        &self.heroes
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Hero> {
        self.heroes.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hero> {
        self.heroes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeroCatalog {
    type Item = &'a Hero;
    type IntoIter = std::slice::Iter<'a, Hero>;

    fn into_iter(self) -> Self::IntoIter {
        self.heroes.iter()
    }
}

/// Every required column must appear in a header, after normalization.
///
/// A header has no row of its own, so failures report row 0.
pub fn check_columns<C, S>(columns: C) -> Result<()>
where
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let present: Vec<String> = columns
        .into_iter()
        .map(|c| normalize_token(c.as_ref()))
        .collect();

    let required = [NAME_COLUMN, ROLE_COLUMN].into_iter().chain(FEATURE_COLUMNS);
    for column in required {
        if !present.iter().any(|c| c == column) {
            return Err(SchemaError::MissingColumn { row: 0, column: column.to_string() }.into());
        }
    }
    Ok(())
}

fn validate_hero(row: usize, hero: &Hero) -> Result<()> {
    if hero.name.is_empty() {
        return Err(SchemaError::MissingValue { row, column: NAME_COLUMN.to_string() }.into());
    }
    if hero.role.is_empty() {
        return Err(SchemaError::MissingValue { row, column: ROLE_COLUMN.to_string() }.into());
    }
    let features = hero.features();
    for (column, &value) in FEATURE_COLUMNS.into_iter().zip(features.as_slice()) {
        if !value.is_finite() {
            return Err(SchemaError::NonFinite { row, column: column.to_string(), value }.into());
        }
    }
    Ok(())
}

fn normalize_columns(raw: RawRow) -> RawRow {
    let mut row = Map::with_capacity(raw.len());
    for (key, value) in raw {
        row.entry(normalize_token(&key)).or_insert(value);
    }
    row
}

fn parse_row(row: usize, fields: &RawRow) -> Result<Hero> {
    let numbers = {
        let mut out = [0.0; FEATURE_COLUMNS.len()];
        for (slot, column) in out.iter_mut().zip(FEATURE_COLUMNS) {
            *slot = number_field(row, fields, column)?;
        }
        out
    };

    Ok(Hero {
        name: text_field(row, fields, NAME_COLUMN)?,
        role: text_field(row, fields, ROLE_COLUMN)?,
        win_rate: numbers[0],
        pick_rate: numbers[1],
        offense_overall: numbers[2],
        defense_overall: numbers[3],
        skill_effect_overall: numbers[4],
        difficulty_overall: numbers[5],
    })
}

fn field<'a>(row: usize, fields: &'a RawRow, column: &str) -> std::result::Result<&'a Value, SchemaError> {
    match fields.get(column) {
        None => Err(SchemaError::MissingColumn { row, column: column.to_string() }),
        Some(Value::Null) => Err(SchemaError::MissingValue { row, column: column.to_string() }),
        Some(v) => Ok(v),
    }
}

fn text_field(row: usize, fields: &RawRow, column: &str) -> Result<String> {
    let text = match field(row, fields, column)? {
        Value::String(s) => normalize_token(s),
        other => normalize_token(&other.to_string()),
    };
    if text.is_empty() {
        return Err(SchemaError::MissingValue { row, column: column.to_string() }.into());
    }
    Ok(text)
}

fn number_field(row: usize, fields: &RawRow, column: &str) -> Result<f64> {
    let value = match field(row, fields, column)? {
        Value::Number(n) => n.as_f64().ok_or_else(|| SchemaError::InvalidNumber {
            row,
            column: column.to_string(),
            value: n.to_string(),
        })?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err(SchemaError::MissingValue { row, column: column.to_string() }.into());
            }
            s.parse::<f64>().map_err(|_| SchemaError::InvalidNumber {
                row,
                column: column.to_string(),
                value: s.to_string(),
            })?
        }
        other => {
            return Err(SchemaError::InvalidNumber {
                row,
                column: column.to_string(),
                value: other.to_string(),
            }
            .into())
        }
    };

    if !value.is_finite() {
        return Err(SchemaError::NonFinite { row, column: column.to_string(), value }.into());
    }
    Ok(value)
}
