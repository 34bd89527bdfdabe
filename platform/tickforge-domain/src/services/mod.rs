pub mod generator;
pub mod price_path;
pub mod quality;
pub mod schedule;
pub mod symbols;
