pub mod config;
pub mod error;
pub mod generator;
pub mod id;
pub mod model;
pub mod query;
pub mod report;
pub mod sampling;
pub mod tables;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::GenerationConfig;
pub use error::TableError;
pub use generator::{FamilyTree, Founder, TreeGenerator, generate_tree};
pub use id::PersonId;
pub use model::{Gender, NewPerson, Person, Population};
pub use sampling::Sampler;
pub use tables::{DemographicTables, load_tables};
