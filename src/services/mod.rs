pub mod circuit_sizing;
pub mod generation;
pub mod geocoding;
pub mod utm;
