pub mod bounding_box;
pub mod clock;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod emotion;
pub mod error;
pub mod frame;
pub mod math;
pub mod table_id;
