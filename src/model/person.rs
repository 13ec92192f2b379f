use std::fmt;

use serde::Serialize;

use super::gender::Gender;
use crate::id::PersonId;

/// Floor a year to the start of its decade (1987 -> 1980).
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// A sampled person that has not been placed in a population yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_year: i32,
    pub death_year: i32,
}

/// One simulated individual. Identity fields are fixed at creation; the
/// partner and children links are only changed through `Population`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_year: i32,
    pub death_year: i32,
    pub(crate) partner: Option<PersonId>,
    pub(crate) children: Vec<PersonId>,
}

impl Person {
    pub(crate) fn from_new(id: PersonId, new: NewPerson) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            gender: new.gender,
            birth_year: new.birth_year,
            death_year: new.death_year,
            partner: None,
            children: Vec::new(),
        }
    }

    pub fn age(&self) -> i32 {
        self.death_year - self.birth_year
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn birth_decade(&self) -> i32 {
        decade_of(self.birth_year)
    }

    pub fn partner(&self) -> Option<PersonId> {
        self.partner
    }

    /// Children in the order they were generated.
    pub fn children(&self) -> &[PersonId] {
        &self.children
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}-{})",
            self.first_name, self.last_name, self.birth_year, self.death_year
        )
    }
}
