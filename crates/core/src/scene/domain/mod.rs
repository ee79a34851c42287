pub mod frame_signature;
pub mod scene_segmenter;
pub mod signature_comparator;
