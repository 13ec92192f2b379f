#![allow(dead_code)]

use std::path::Path;

use family_tree::model::Population;
use family_tree::tables::load::{
    FIRST_NAMES_FILE, LAST_NAMES_FILE, LIFE_EXPECTANCY_FILE, RANK_PROBABILITY_FILE, RATES_FILE,
};
use family_tree::{DemographicTables, FamilyTree, Founder, GenerationConfig, PersonId, load_tables};

pub const LIFE_EXPECTANCY_CSV: &str = "\
Entity,Code,Year,Period life expectancy at birth
United States,USA,1950,68.14
United States,USA,1960,69.77
United States,USA,1970,70.81
United States,USA,1980,73.70
United States,USA,1990,75.37
United States,USA,2000,76.75
United States,USA,2010,78.54
United States,USA,2020,77.41
";

pub const RATES_CSV: &str = "\
decade,birth_rate,marriage_rate
1950s,2.9,0.90
1960s,2.6,0.85
1970s,1.9,0.75
1980s,1.9,0.70
1990s,2.0,0.65
2000s,2.0,0.60
2010s,1.8,0.55
2020s,1.7,0.50
";

pub const FIRST_NAMES_CSV: &str = "\
decade,gender,name,frequency
1950s,male,James,0.047
1950s,male,Robert,0.043
1950s,female,Mary,0.053
1950s,female,Linda,0.041
1970s,male,Michael,0.042
1970s,male,David,0.021
1970s,female,Jennifer,0.030
1970s,female,Amy,0.013
1990s,male,Christopher,0.025
1990s,male,Joshua,0.023
1990s,female,Jessica,0.019
1990s,female,Ashley,0.018
2010s,male,Noah,0.009
2010s,male,Liam,0.009
2010s,female,Emma,0.010
2010s,female,Olivia,0.009
";

pub const LAST_NAMES_CSV: &str = "\
Decade,Rank,LastName
1950s,1,Smith
1950s,2,Johnson
1950s,3,Williams
1950s,4,Brown
1990s,1,Smith
1990s,2,Johnson
1990s,3,Williams
1990s,4,Garcia
1990s,5,Miller
";

pub const RANK_PROBABILITY_CSV: &str = "0.35,0.25,0.20,0.12,0.08";

/// Write the sample data set into `dir`.
pub fn write_sample_data(dir: &Path) {
    let files = [
        (LIFE_EXPECTANCY_FILE, LIFE_EXPECTANCY_CSV),
        (RATES_FILE, RATES_CSV),
        (FIRST_NAMES_FILE, FIRST_NAMES_CSV),
        (LAST_NAMES_FILE, LAST_NAMES_CSV),
        (RANK_PROBABILITY_FILE, RANK_PROBABILITY_CSV),
    ];
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents).unwrap();
    }
}

/// Load the sample data set through the real file loader.
pub fn sample_tables() -> DemographicTables {
    let dir = tempfile::tempdir().unwrap();
    write_sample_data(dir.path());
    load_tables(dir.path()).unwrap()
}

pub fn generate(seed: u64) -> FamilyTree {
    let tables = sample_tables();
    let config = GenerationConfig {
        seed,
        ..GenerationConfig::default()
    };
    let (f1, f2) = Founder::default_pair();
    family_tree::generate_tree(&tables, &config, &f1, &f2)
}

/// Ids of the first founder and every descendant of the first founder.
pub fn bloodline(tree: &FamilyTree) -> Vec<PersonId> {
    let pop = tree.population();
    let mut found = Vec::new();
    let mut stack = vec![tree.founder_ids().0];
    while let Some(id) = stack.pop() {
        found.push(id);
        stack.extend_from_slice(pop.get(id).children());
    }
    found
}

pub fn assert_partners_symmetric(population: &Population) {
    for person in population {
        if let Some(partner) = person.partner() {
            assert_eq!(
                population.get(partner).partner(),
                Some(person.id),
                "partner of {person} does not point back"
            );
        }
    }
}
