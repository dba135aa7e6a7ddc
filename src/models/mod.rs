pub mod draft;
pub mod image;
pub mod post;

pub use draft::*;
pub use image::*;
pub use post::*;
