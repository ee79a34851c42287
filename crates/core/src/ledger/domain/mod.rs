pub mod detection_event;
pub mod event_store;
pub mod realtime_metrics;
pub mod sentiment;
pub mod table;
