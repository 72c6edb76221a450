pub mod ease;
pub mod segment;
pub mod stagger;
pub mod timeline;
pub mod value;
