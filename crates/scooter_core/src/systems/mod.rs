pub mod arrivals;
pub mod metrics_capture;
pub mod queue_service;
pub mod replenishment;
pub mod transit;
pub mod truck_movement;
pub mod truck_planning;
pub mod utilization;
