pub mod generator;
pub mod parse;
pub mod store;

pub use generator::Generator;
pub use store::{load_existing, load_or_create, save};
