pub mod bhattacharyya_comparator;
pub mod comparator_factory;
pub mod correlation_comparator;
