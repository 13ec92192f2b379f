use std::collections::{BTreeMap, HashMap};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::model::{Gender, Population};
use crate::tables::{Decade, DecadeRates, DemographicTables, RankedName, WeightedName};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

fn decade(label: &str) -> Decade {
    label.parse().expect("fixture decade label")
}

fn rates(birth_rate: f64, marriage_rate: f64) -> DecadeRates {
    DecadeRates {
        birth_rate,
        marriage_rate,
    }
}

/// Small but complete set of tables.
///
/// - life expectancy: 1900 -> 47.0, 1950 -> 68.0, 2000 -> 76.0, 2020 -> 77.0
/// - rates: 1900s (2.0, 1.0), 1950s (2.5, 0.8), 1980s (2.0, 0.6), 2010s (1.6, 0.5)
/// - first names: 1950s and 1990s for both built-in genders; 1990s male has a
///   zero-weight "Zeke"
/// - surnames: 1900s holds only "Okafor" (rank 99, unmapped); 1950s and 2000s
///   use ranks 1-3, 2000s adds "Garcia" at rank 4 with probability 0.0
pub fn fixture_tables() -> DemographicTables {
    let life = BTreeMap::from([(1900, 47.0), (1950, 68.0), (2000, 76.0), (2020, 77.0)]);
    let rate_table = BTreeMap::from([
        (decade("1900s"), rates(2.0, 1.0)),
        (decade("1950s"), rates(2.5, 0.8)),
        (decade("1980s"), rates(2.0, 0.6)),
        (decade("2010s"), rates(1.6, 0.5)),
    ]);

    let first = BTreeMap::from([
        (
            decade("1950s"),
            HashMap::from([
                (
                    Gender::Male,
                    vec![WeightedName::new("James", 0.05), WeightedName::new("Robert", 0.04)],
                ),
                (
                    Gender::Female,
                    vec![WeightedName::new("Mary", 0.06), WeightedName::new("Linda", 0.04)],
                ),
            ]),
        ),
        (
            decade("1990s"),
            HashMap::from([
                (
                    Gender::Male,
                    vec![WeightedName::new("Michael", 0.03), WeightedName::new("Zeke", 0.0)],
                ),
                (
                    Gender::Female,
                    vec![WeightedName::new("Jessica", 0.03), WeightedName::new("Ashley", 0.02)],
                ),
            ]),
        ),
    ]);

    let last = BTreeMap::from([
        (decade("1900s"), vec![RankedName::new("Okafor", 99)]),
        (
            decade("1950s"),
            vec![
                RankedName::new("Smith", 1),
                RankedName::new("Johnson", 2),
                RankedName::new("Williams", 3),
            ],
        ),
        (
            decade("2000s"),
            vec![
                RankedName::new("Smith", 1),
                RankedName::new("Johnson", 2),
                RankedName::new("Williams", 3),
                RankedName::new("Garcia", 4),
            ],
        ),
    ]);
    let ranks = BTreeMap::from([(1, 0.5), (2, 0.3), (3, 0.2), (4, 0.0)]);

    DemographicTables::new(life, rate_table)
        .expect("fixture tables are non-empty")
        .with_first_names(first)
        .with_last_names(last, ranks)
}

/// Tables with a single decade of rates and no name data at all.
pub fn tables_with_rates(birth_rate: f64, marriage_rate: f64) -> DemographicTables {
    DemographicTables::new(
        BTreeMap::from([(1950, 70.0)]),
        BTreeMap::from([(decade("1950s"), rates(birth_rate, marriage_rate))]),
    )
    .expect("fixture tables are non-empty")
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert every partner link points back at its owner.
pub fn assert_partners_symmetric(population: &Population) {
    for person in population {
        if let Some(partner) = person.partner() {
            let back = population.get(partner).partner();
            assert_eq!(
                back,
                Some(person.id),
                "partner link not symmetric: {} -> {} -> {:?}",
                person.id,
                partner,
                back
            );
        }
    }
}
