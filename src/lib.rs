pub mod bodies;
pub mod cache;
pub mod config;
pub mod conjunction_errors;
pub mod conjunctions;
pub mod constants;
pub mod coverage;
pub mod daily_sampler;
pub mod jpl_ephem;
pub mod minimum_finder;
pub mod pair_catalog;
pub mod progress;
pub mod separation;
pub mod tables;
pub mod time;
