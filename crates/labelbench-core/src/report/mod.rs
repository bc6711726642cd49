pub mod console;
pub mod summary;
