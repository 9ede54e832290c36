pub mod empty;
pub mod quiz;
pub mod summary;
