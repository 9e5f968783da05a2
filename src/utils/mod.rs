pub mod occupancy;
pub mod validation;
