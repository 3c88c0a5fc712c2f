pub mod error;
pub mod runner;
pub mod spec_model;
