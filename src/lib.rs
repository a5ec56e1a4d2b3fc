pub mod airline;
pub mod config;
pub mod demand;
pub mod engine;
pub mod error;
pub mod geo;
pub mod network;
pub mod output;
pub mod pricing;
pub mod priority;
pub mod round_trip;
pub mod scale;
pub mod weights;
