pub mod identity;
pub mod pantry;
pub mod plans;
pub mod profile;
pub mod recipes;
pub mod telemetry;
