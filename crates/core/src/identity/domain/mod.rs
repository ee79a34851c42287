pub mod identity_resolver;
pub mod person;
pub mod staff_gallery;
