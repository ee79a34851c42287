pub mod json_gallery_loader;
