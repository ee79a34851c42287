pub mod alert;
pub mod anomaly_engine;
