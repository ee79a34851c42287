pub mod anomaly;
pub mod detection;
pub mod identity;
pub mod ledger;
pub mod performance;
pub mod pipeline;
pub mod scene;
pub mod session;
pub mod shared;
pub mod video;
