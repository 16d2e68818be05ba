pub mod clock;
pub mod dispatch;
pub mod ecs;
pub mod inventory;
pub mod network;
pub mod runner;
pub mod scenario;
pub mod systems;
pub mod telemetry;
pub mod telemetry_export;
pub mod topology;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
