pub mod generator;
pub mod payload;
pub mod sanitize;
