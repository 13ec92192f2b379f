use crate::model::Gender;

/// Configuration for family tree generation.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// RNG seed for deterministic generation.
    pub seed: u64,
    /// Birth year of both founders.
    pub start_year: i32,
    /// Children scheduled after this year are never born.
    pub max_year: i32,
    /// Life spans vary uniformly by up to this many years around the expectancy.
    pub life_span_jitter: f64,
    /// Partners are born up to this many years before or after their spouse.
    pub partner_age_gap: i32,
    /// Earliest birth year an outside partner can have.
    pub min_partner_birth_year: i32,
    /// Offsets (from the parent's birth year) of the first and last possible child.
    pub child_window: (i32, i32),
    /// Half-width of the child-count range centred on the decade birth rate.
    pub child_count_spread: f64,
    /// Surname weight used when a rank has no probability on record.
    pub default_rank_weight: f64,
    pub default_first_name: String,
    pub default_last_name: String,
    /// Genders drawn uniformly for new people.
    pub genders: Vec<Gender>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_year: 1950,
            max_year: 2120,
            life_span_jitter: 10.0,
            partner_age_gap: 10,
            min_partner_birth_year: 1900,
            child_window: (25, 45),
            child_count_spread: 1.5,
            default_rank_weight: 0.001,
            default_first_name: "John".to_string(),
            default_last_name: "Smith".to_string(),
            genders: vec![Gender::Male, Gender::Female],
        }
    }
}
