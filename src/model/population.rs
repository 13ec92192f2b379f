use serde::Serialize;

use super::person::{NewPerson, Person};
use crate::id::PersonId;

/// Arena of every person created during generation, in creation order.
///
/// Relationship links are stored as `PersonId`s, so the family graph can be
/// cyclic (partners point at each other) without shared ownership.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Population {
    people: Vec<Person>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a person and return its id.
    pub fn add(&mut self, new: NewPerson) -> PersonId {
        let id = PersonId::from_index(self.people.len());
        self.people.push(Person::from_new(id, new));
        id
    }

    /// Get a person by id.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this population.
    pub fn get(&self, id: PersonId) -> &Person {
        self.people
            .get(id.index())
            .unwrap_or_else(|| panic!("person {id} not in population"))
    }

    pub fn try_get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Person> {
        self.people.iter()
    }

    /// Link two people as each other's partner. Any previous partner link on
    /// either side is overwritten.
    pub(crate) fn link_partners(&mut self, a: PersonId, b: PersonId) {
        self.get_mut(a).partner = Some(b);
        self.get_mut(b).partner = Some(a);
    }

    pub(crate) fn add_child(&mut self, parent: PersonId, child: PersonId) {
        self.get_mut(parent).children.push(child);
    }

    fn get_mut(&mut self, id: PersonId) -> &mut Person {
        self.people
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("person {id} not in population"))
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Person;
    type IntoIter = std::slice::Iter<'a, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.people.iter()
    }
}
