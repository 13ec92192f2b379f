pub mod gender;
pub mod person;
pub mod population;

pub use gender::Gender;
pub use person::{NewPerson, Person, decade_of};
pub use population::Population;
