pub mod generator;
pub mod repository;
pub mod types;
