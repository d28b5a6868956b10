//! People and the family forest they form.
//!
//! A [`Population`] is validated once at construction: every person has
//! either both parents or neither, and every parent reference names a loaded
//! person. People are stored in an arena sorted by identifier, with parent
//! references resolved to arena indices so the evaluator never does name
//! lookups in its inner loop.

use std::collections::BTreeMap;

use hd_common::{Error, PersonId, Result, TraitObservation};
use tracing::debug;

/// One person as supplied by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub mother: Option<PersonId>,
    pub father: Option<PersonId>,
    pub observation: TraitObservation,
}

impl Person {
    /// A parentless person with an unknown trait.
    pub fn new(id: impl Into<PersonId>) -> Self {
        Self {
            id: id.into(),
            mother: None,
            father: None,
            observation: TraitObservation::Unknown,
        }
    }

    pub fn with_parents(mut self, mother: impl Into<PersonId>, father: impl Into<PersonId>) -> Self {
        self.mother = Some(mother.into());
        self.father = Some(father.into());
        self
    }

    pub fn with_observation(mut self, observation: TraitObservation) -> Self {
        self.observation = observation;
        self
    }
}

/// Arena indices of a person's mother and father.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parents {
    pub mother: usize,
    pub father: usize,
}

/// A validated set of people keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct Population {
    people: Vec<Person>,
    parents: Vec<Option<Parents>>,
    index: BTreeMap<PersonId, usize>,
}

impl Population {
    /// Validate and index a set of people.
    pub fn new(people: impl IntoIterator<Item = Person>) -> Result<Self> {
        let mut people: Vec<Person> = people.into_iter().collect();
        people.sort_by(|a, b| a.id.cmp(&b.id));

        let mut index = BTreeMap::new();
        for (i, person) in people.iter().enumerate() {
            if index.insert(person.id.clone(), i).is_some() {
                return Err(Error::DuplicatePerson {
                    name: person.id.to_string(),
                });
            }
        }

        let mut parents = Vec::with_capacity(people.len());
        for person in &people {
            let resolved = match (&person.mother, &person.father) {
                (None, None) => None,
                (Some(mother), Some(father)) => Some(Parents {
                    mother: resolve_parent(&index, person, mother)?,
                    father: resolve_parent(&index, person, father)?,
                }),
                _ => {
                    return Err(Error::SingleParent {
                        person: person.id.to_string(),
                    })
                }
            };
            parents.push(resolved);
        }

        let population = Self {
            people,
            parents,
            index,
        };
        debug!(
            people = population.len(),
            founders = population.founder_count(),
            observed = population.observed_count(),
            "population validated"
        );
        Ok(population)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// People in arena order (sorted by identifier).
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, index: usize) -> &Person {
        &self.people[index]
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.index_of(id).map(|i| &self.people[i])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Resolved parents of the person at `index`, if any.
    pub fn parents(&self, index: usize) -> Option<Parents> {
        self.parents[index]
    }

    pub fn observation(&self, index: usize) -> TraitObservation {
        self.people[index].observation
    }

    /// People with no listed parents.
    pub fn founder_count(&self) -> usize {
        self.parents.iter().filter(|p| p.is_none()).count()
    }

    /// People whose trait is fixed by observation.
    pub fn observed_count(&self) -> usize {
        self.people
            .iter()
            .filter(|p| p.observation.known().is_some())
            .count()
    }
}

fn resolve_parent(
    index: &BTreeMap<PersonId, usize>,
    person: &Person,
    parent: &PersonId,
) -> Result<usize> {
    index
        .get(parent)
        .copied()
        .ok_or_else(|| Error::UnknownParent {
            person: person.id.to_string(),
            parent: parent.to_string(),
        })
}
