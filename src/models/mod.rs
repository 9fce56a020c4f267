pub mod image;
pub mod outcome;

pub use image::*;
pub use outcome::*;
