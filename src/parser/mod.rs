pub mod exif_gps;
pub mod image;
pub mod stream;
pub mod xmp;

pub use exif_gps::*;
pub use image::*;
pub use stream::*;
pub use xmp::*;
