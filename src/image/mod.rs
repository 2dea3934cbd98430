//! Image handling: source loading, inline encoding, and expand canvases.

mod canvas;
mod encoder;
mod part;

pub use canvas::{mask_from_alpha, ExpandCanvas, PreparedCanvas, ALPHA_THRESHOLD, ASPECT_TOLERANCE};
pub use encoder::{ImageEncoder, ImageSource, LoadedImage};
pub use part::{data_url, ImagePart};
