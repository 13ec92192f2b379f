//! Table-driven random draws for new people.
//!
//! Every draw goes through the `&mut dyn RngCore` handed in by the caller, so
//! a seeded RNG reproduces the same people in the same order.

use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::model::{Gender, NewPerson, Person};
use crate::tables::DemographicTables;

/// Pick one of `names` with probability proportional to `weights`.
/// Returns `None` when there is nothing valid to pick from (no names, or
/// weights that are all zero, negative, or not finite).
fn weighted_choice<'n>(
    names: &[&'n str],
    weights: &[f64],
    rng: &mut dyn RngCore,
) -> Option<&'n str> {
    let dist = WeightedIndex::new(weights).ok()?;
    names.get(dist.sample(rng)).copied()
}

/// Round half to even, matching the reference data pipeline.
fn round_year(value: f64) -> i32 {
    value.round_ties_even() as i32
}

pub struct Sampler<'a> {
    tables: &'a DemographicTables,
    config: &'a GenerationConfig,
}

impl<'a> Sampler<'a> {
    pub fn new(tables: &'a DemographicTables, config: &'a GenerationConfig) -> Self {
        Self { tables, config }
    }

    pub fn tables(&self) -> &'a DemographicTables {
        self.tables
    }

    pub fn config(&self) -> &'a GenerationConfig {
        self.config
    }

    /// Death year for someone born in `birth_year`: the life expectancy for
    /// that year (or the nearest year on record) plus uniform jitter.
    pub fn pick_life_span(&self, birth_year: i32, rng: &mut dyn RngCore) -> i32 {
        let expectancy = self.tables.life_expectancy_at(birth_year).unwrap_or(0.0);
        let jitter = self.config.life_span_jitter.abs();
        let offset = rng.random_range(-jitter..=jitter);
        birth_year + round_year(expectancy + offset)
    }

    pub fn pick_gender(&self, rng: &mut dyn RngCore) -> Gender {
        self.config
            .genders
            .choose(rng)
            .cloned()
            .unwrap_or(Gender::Male)
    }

    pub fn pick_first_name(&self, birth_year: i32, gender: &Gender, rng: &mut dyn RngCore) -> String {
        let candidates = self.tables.first_names_for(birth_year, gender);
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        let weights: Vec<f64> = candidates.iter().map(|c| c.weight).collect();

        match weighted_choice(&names, &weights, rng) {
            Some(name) => name.to_string(),
            None => {
                debug!(birth_year, %gender, "no first names on record, using default");
                self.config.default_first_name.clone()
            }
        }
    }

    /// Surname weighted by rank popularity. Ranks without a probability on
    /// record get `default_rank_weight`.
    pub fn pick_last_name(&self, birth_year: i32, rng: &mut dyn RngCore) -> String {
        let candidates = self.tables.last_names_for(birth_year);
        if candidates.is_empty() || !self.tables.has_rank_probabilities() {
            debug!(birth_year, "no surnames on record, using default");
            return self.config.default_last_name.clone();
        }

        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        let weights: Vec<f64> = candidates
            .iter()
            .map(|c| {
                self.tables
                    .rank_weight(c.rank)
                    .unwrap_or(self.config.default_rank_weight)
            })
            .collect();

        weighted_choice(&names, &weights, rng)
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_last_name.clone())
    }

    /// Inclusive child-count range for a birth rate:
    /// `[ceil(rate - spread), ceil(rate + spread)]`, both ends clamped at zero.
    pub fn child_count_range(&self, birth_rate: f64) -> (u32, u32) {
        let spread = self.config.child_count_spread;
        let low = (birth_rate - spread).ceil().max(0.0) as u32;
        let high = (birth_rate + spread).ceil().max(0.0) as u32;
        (low, high.max(low))
    }

    pub fn compute_num_children(&self, birth_year: i32, rng: &mut dyn RngCore) -> u32 {
        let birth_rate = self
            .tables
            .rates_for(birth_year)
            .map_or(0.0, |r| r.birth_rate);
        let (low, high) = self.child_count_range(birth_rate);
        rng.random_range(low..=high)
    }

    /// Birth years for `num_children` children of a parent born in
    /// `parent_birth_year`. A single child lands anywhere in the window;
    /// several children are spread evenly from its first to its last year.
    pub fn compute_child_birth_years(
        &self,
        parent_birth_year: i32,
        num_children: u32,
        rng: &mut dyn RngCore,
    ) -> Vec<i32> {
        let (start_offset, end_offset) = self.config.child_window;
        let first_year = parent_birth_year + start_offset;
        let last_year = parent_birth_year + end_offset;

        match num_children {
            0 => Vec::new(),
            1 => vec![rng.random_range(first_year..=last_year)],
            n => {
                let step = f64::from(last_year - first_year) / f64::from(n - 1);
                (0..n)
                    .map(|i| round_year(f64::from(first_year) + f64::from(i) * step))
                    .collect()
            }
        }
    }

    /// Fresh person born in `birth_year`. When `last_name` is `None` a surname
    /// is sampled. Draw order: gender, first name, surname, life span.
    pub fn sample_person(
        &self,
        birth_year: i32,
        last_name: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> NewPerson {
        let gender = self.pick_gender(rng);
        let first_name = self.pick_first_name(birth_year, &gender, rng);
        let last_name = match last_name {
            Some(name) => name.to_string(),
            None => self.pick_last_name(birth_year, rng),
        };
        let death_year = self.pick_life_span(birth_year, rng);

        NewPerson {
            first_name,
            last_name,
            gender,
            birth_year,
            death_year,
        }
    }

    /// Marry `subject` to someone from outside the family, with probability
    /// equal to the marriage rate of the subject's birth decade. The partner's
    /// birth year stays within `[min_partner_birth_year, max_year]`.
    pub fn attempt_partner_for(&self, subject: &Person, rng: &mut dyn RngCore) -> Option<NewPerson> {
        let marriage_rate = self
            .tables
            .rates_for(subject.birth_year)
            .map_or(0.0, |r| r.marriage_rate);
        if rng.random::<f64>() > marriage_rate {
            return None;
        }

        let gap = self.config.partner_age_gap.abs();
        let birth_year = (subject.birth_year + rng.random_range(-gap..=gap))
            .min(self.config.max_year)
            .max(self.config.min_partner_birth_year);
        Some(self.sample_person(birth_year, None, rng))
    }
}
