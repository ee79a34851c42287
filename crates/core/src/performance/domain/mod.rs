pub mod staff_performance;
