//! In-memory demographic lookup tables.
//!
//! Everything is keyed by year or by [`Decade`]. Lookups never fail on a
//! missing key: they resolve to the nearest available key instead, with ties
//! going to the lower key.

pub mod load;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, TableError};
use crate::model::{Gender, decade_of};

pub use load::load_tables;

/// Decade bucket, identified by its first year. Written as `"1950s"` in the
/// data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Decade(i32);

impl Decade {
    pub fn of_year(year: i32) -> Self {
        Self(decade_of(year))
    }

    pub fn start_year(self) -> i32 {
        self.0
    }

    fn distance(self, other: Decade) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl FromStr for Decade {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('s').unwrap_or(trimmed);
        digits
            .parse::<i32>()
            .map(Self::of_year)
            .map_err(|_| TableError::InvalidDecade(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecadeRates {
    pub birth_rate: f64,
    pub marriage_rate: f64,
}

/// A first name with its relative frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedName {
    pub name: String,
    pub weight: f64,
}

impl WeightedName {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// A surname with its popularity rank (1 = most common).
#[derive(Debug, Clone, PartialEq)]
pub struct RankedName {
    pub name: String,
    pub rank: u32,
}

impl RankedName {
    pub fn new(name: impl Into<String>, rank: u32) -> Self {
        Self {
            name: name.into(),
            rank,
        }
    }
}

pub type FirstNameTable = BTreeMap<Decade, HashMap<Gender, Vec<WeightedName>>>;
pub type LastNameTable = BTreeMap<Decade, Vec<RankedName>>;

#[derive(Debug, Clone)]
pub struct DemographicTables {
    life_expectancy: BTreeMap<i32, f64>,
    rates: BTreeMap<Decade, DecadeRates>,
    first_names: FirstNameTable,
    last_names: LastNameTable,
    rank_probabilities: BTreeMap<u32, f64>,
}

/// Exact match if present, otherwise the key with the smallest distance.
/// `min_by_key` keeps the first minimum, and map iteration is ascending, so
/// ties resolve to the lower key.
fn nearest<'m, K: Ord, V>(
    map: &'m BTreeMap<K, V>,
    key: &K,
    distance: impl Fn(&K) -> u32,
) -> Option<(&'m K, &'m V)> {
    if let Some(hit) = map.get_key_value(key) {
        return Some(hit);
    }
    map.iter().min_by_key(|&(k, _)| distance(k))
}

impl DemographicTables {
    /// Build tables from the two required statistics. Name tables start empty
    /// and are attached with [`with_first_names`](Self::with_first_names) and
    /// [`with_last_names`](Self::with_last_names).
    pub fn new(
        life_expectancy: BTreeMap<i32, f64>,
        rates: BTreeMap<Decade, DecadeRates>,
    ) -> Result<Self> {
        if life_expectancy.is_empty() {
            return Err(TableError::EmptyTable("life expectancy"));
        }
        if rates.is_empty() {
            return Err(TableError::EmptyTable("birth and marriage rate"));
        }
        Ok(Self {
            life_expectancy,
            rates,
            first_names: BTreeMap::new(),
            last_names: BTreeMap::new(),
            rank_probabilities: BTreeMap::new(),
        })
    }

    pub fn with_first_names(mut self, first_names: FirstNameTable) -> Self {
        self.first_names = first_names;
        self
    }

    pub fn with_last_names(
        mut self,
        last_names: LastNameTable,
        rank_probabilities: BTreeMap<u32, f64>,
    ) -> Self {
        self.last_names = last_names;
        self.rank_probabilities = rank_probabilities;
        self
    }

    /// Expected life at birth for `year`, or for the nearest year on record.
    pub fn life_expectancy_at(&self, year: i32) -> Option<f64> {
        nearest(&self.life_expectancy, &year, |k| k.abs_diff(year)).map(|(_, v)| *v)
    }

    pub fn rates_for(&self, year: i32) -> Option<DecadeRates> {
        let decade = Decade::of_year(year);
        nearest(&self.rates, &decade, |k| k.distance(decade)).map(|(_, v)| *v)
    }

    /// Weighted first names for the decade of `year` and `gender`. Empty when
    /// no decade exists or the resolved decade has no names for `gender`.
    pub fn first_names_for(&self, year: i32, gender: &Gender) -> &[WeightedName] {
        let decade = Decade::of_year(year);
        nearest(&self.first_names, &decade, |k| k.distance(decade))
            .and_then(|(_, by_gender)| by_gender.get(gender))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn last_names_for(&self, year: i32) -> &[RankedName] {
        let decade = Decade::of_year(year);
        nearest(&self.last_names, &decade, |k| k.distance(decade))
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[])
    }

    pub fn rank_weight(&self, rank: u32) -> Option<f64> {
        self.rank_probabilities.get(&rank).copied()
    }

    pub fn has_rank_probabilities(&self) -> bool {
        !self.rank_probabilities.is_empty()
    }

    /// Decade the rate table resolves `year` to.
    pub fn resolve_rate_decade(&self, year: i32) -> Option<Decade> {
        let decade = Decade::of_year(year);
        nearest(&self.rates, &decade, |k| k.distance(decade)).map(|(k, _)| *k)
    }

    pub fn life_expectancy_years(&self) -> usize {
        self.life_expectancy.len()
    }

    pub fn rate_decades(&self) -> usize {
        self.rates.len()
    }

    pub fn first_name_decades(&self) -> usize {
        self.first_names.len()
    }

    pub fn last_name_decades(&self) -> usize {
        self.last_names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(birth_rate: f64) -> DecadeRates {
        DecadeRates {
            birth_rate,
            marriage_rate: 0.5,
        }
    }

    fn tables() -> DemographicTables {
        let life = BTreeMap::from([(1950, 68.0), (1960, 70.0), (1970, 71.0)]);
        let rate_table = BTreeMap::from([
            (Decade::of_year(1950), rates(2.0)),
            (Decade::of_year(1970), rates(1.0)),
        ]);
        let first = BTreeMap::from([(
            Decade::of_year(1950),
            HashMap::from([(Gender::Male, vec![WeightedName::new("James", 1.0)])]),
        )]);
        DemographicTables::new(life, rate_table)
            .unwrap()
            .with_first_names(first)
    }

    #[test]
    fn decade_label_round_trip() {
        let d: Decade = " 1950s ".parse().unwrap();
        assert_eq!(d.start_year(), 1950);
        assert_eq!(d.to_string(), "1950s");
        assert_eq!("1987".parse::<Decade>().unwrap().start_year(), 1980);
    }

    #[test]
    fn bad_decade_label() {
        assert!(matches!(
            "fifties".parse::<Decade>(),
            Err(TableError::InvalidDecade(_))
        ));
    }

    #[test]
    fn empty_required_tables_rejected() {
        let err = DemographicTables::new(BTreeMap::new(), BTreeMap::new()).unwrap_err();
        assert!(matches!(err, TableError::EmptyTable("life expectancy")));

        let err = DemographicTables::new(BTreeMap::from([(1950, 68.0)]), BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, TableError::EmptyTable(_)));
    }

    #[test]
    fn life_expectancy_exact_and_nearest() {
        let t = tables();
        assert_eq!(t.life_expectancy_at(1960), Some(70.0));
        assert_eq!(t.life_expectancy_at(1968), Some(71.0));
        assert_eq!(t.life_expectancy_at(1800), Some(68.0));
        assert_eq!(t.life_expectancy_at(2100), Some(71.0));
    }

    #[test]
    fn life_expectancy_tie_goes_to_lower_year() {
        let t = tables();
        assert_eq!(t.life_expectancy_at(1955), Some(68.0));
    }

    #[test]
    fn decade_tie_goes_to_lower_decade() {
        // 1960s is equidistant from 1950s and 1970s.
        let t = tables();
        assert_eq!(t.resolve_rate_decade(1964), Some(Decade::of_year(1950)));
        assert_eq!(t.rates_for(1964).unwrap().birth_rate, 2.0);
    }

    #[test]
    fn decade_fallback_picks_nearest() {
        let t = tables();
        assert_eq!(t.resolve_rate_decade(2040), Some(Decade::of_year(1970)));
        assert_eq!(t.resolve_rate_decade(1900), Some(Decade::of_year(1950)));
    }

    #[test]
    fn first_names_fall_back_by_decade_not_gender() {
        let t = tables();
        assert_eq!(t.first_names_for(1990, &Gender::Male).len(), 1);
        assert!(t.first_names_for(1990, &Gender::Female).is_empty());
    }

    #[test]
    fn missing_last_names_are_empty() {
        let t = tables();
        assert!(t.last_names_for(1950).is_empty());
        assert!(!t.has_rank_probabilities());
        assert_eq!(t.rank_weight(1), None);
    }
}
