use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::id::PersonId;
use crate::model::{Gender, NewPerson, Person, Population};
use crate::query;
use crate::sampling::Sampler;
use crate::tables::DemographicTables;

/// Identity of one of the two people the tree grows from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Founder {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
}

impl Founder {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
        }
    }

    /// Desmond and Molly Jones.
    pub fn default_pair() -> (Founder, Founder) {
        (
            Founder::new("Desmond", "Jones", Gender::Male),
            Founder::new("Molly", "Jones", Gender::Female),
        )
    }
}

/// A finished tree: every generated person plus the two founders.
#[derive(Debug, Clone)]
pub struct FamilyTree {
    population: Population,
    root1: PersonId,
    root2: PersonId,
}

impl FamilyTree {
    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn root1(&self) -> &Person {
        self.population.get(self.root1)
    }

    pub fn root2(&self) -> &Person {
        self.population.get(self.root2)
    }

    pub fn founder_ids(&self) -> (PersonId, PersonId) {
        (self.root1, self.root2)
    }

    pub fn total_people(&self) -> usize {
        query::total_people(&self.population)
    }

    pub fn people_by_decade(&self) -> BTreeMap<i32, usize> {
        query::people_by_decade(&self.population)
    }

    pub fn duplicate_names(&self) -> Vec<String> {
        query::duplicate_names(&self.population)
    }
}

/// Grows a family tree from two founders.
///
/// Only the first founder's line is expanded. Children are attributed to
/// both the expanding person and their partner, and every child may marry
/// someone from outside the family. Those outside partners never start a
/// branch of their own.
pub struct TreeGenerator<'a> {
    sampler: Sampler<'a>,
    population: Population,
}

impl<'a> TreeGenerator<'a> {
    pub fn new(tables: &'a DemographicTables, config: &'a GenerationConfig) -> Self {
        Self {
            sampler: Sampler::new(tables, config),
            population: Population::new(),
        }
    }

    /// Create the founders, pair them, and expand the first founder's line
    /// under the first founder's surname.
    pub fn init(mut self, founder1: &Founder, founder2: &Founder, rng: &mut dyn RngCore) -> FamilyTree {
        let start_year = self.sampler.config().start_year;

        let death1 = self.sampler.pick_life_span(start_year, rng);
        let root1 = self.population.add(founder_record(founder1, start_year, death1));
        let death2 = self.sampler.pick_life_span(start_year, rng);
        let root2 = self.population.add(founder_record(founder2, start_year, death2));
        self.population.link_partners(root1, root2);

        self.expand(root1, &founder1.last_name, rng);

        info!(
            total_people = self.population.len(),
            founder1 = %self.population.get(root1),
            founder2 = %self.population.get(root2),
            "family tree generated"
        );

        FamilyTree {
            population: self.population,
            root1,
            root2,
        }
    }

    fn expand(&mut self, person: PersonId, family_surname: &str, rng: &mut dyn RngCore) {
        let (birth_year, partner) = {
            let p = self.population.get(person);
            (p.birth_year, p.partner())
        };

        let num_children = self.sampler.compute_num_children(birth_year, rng);
        if num_children == 0 {
            return;
        }

        let max_year = self.sampler.config().max_year;
        let birth_years = self
            .sampler
            .compute_child_birth_years(birth_year, num_children, rng);
        debug!(%person, birth_year, num_children, ?birth_years, "expanding");

        for year in birth_years {
            if year > max_year {
                continue;
            }

            let new_child = self.sampler.sample_person(year, Some(family_surname), rng);
            let child = self.population.add(new_child);
            self.population.add_child(person, child);
            if let Some(partner) = partner {
                self.population.add_child(partner, child);
            }

            let new_partner = self
                .sampler
                .attempt_partner_for(self.population.get(child), rng);
            if let Some(new_partner) = new_partner {
                let spouse = self.population.add(new_partner);
                self.population.link_partners(child, spouse);
            }

            self.expand(child, family_surname, rng);
        }
    }
}

fn founder_record(founder: &Founder, birth_year: i32, death_year: i32) -> NewPerson {
    NewPerson {
        first_name: founder.first_name.clone(),
        last_name: founder.last_name.clone(),
        gender: founder.gender.clone(),
        birth_year,
        death_year,
    }
}

/// Generate a tree with an RNG seeded from `config.seed`. The same seed and
/// tables always produce the same tree.
pub fn generate_tree(
    tables: &DemographicTables,
    config: &GenerationConfig,
    founder1: &Founder,
    founder2: &Founder,
) -> FamilyTree {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    TreeGenerator::new(tables, config).init(founder1, founder2, &mut rng)
}
