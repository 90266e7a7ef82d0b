pub mod alerts;
pub mod consumption;
pub mod fuel_system;
pub mod mission_profile;
pub mod requirement;
pub mod safety;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use fuel_system::FuelSystem;
pub use snapshot::MonitorSnapshot;
