//! Aggregate read-only queries over a finished population.

use std::collections::{BTreeMap, HashMap};

use crate::model::Population;

pub fn total_people(population: &Population) -> usize {
    population.len()
}

/// Head count per birth decade, ascending by decade.
pub fn people_by_decade(population: &Population) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for person in population {
        *counts.entry(person.birth_decade()).or_insert(0) += 1;
    }
    counts
}

/// Full names ("First Last") shared by more than one person, sorted.
pub fn duplicate_names(population: &Population) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for person in population {
        *counts.entry(person.full_name()).or_insert(0) += 1;
    }
    let mut dupes: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect();
    dupes.sort();
    dupes
}
