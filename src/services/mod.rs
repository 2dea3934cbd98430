//! Services built on the Gemini image model.
//!
//! - `gateway` sends one multimodal request and returns the raw response
//! - `interpreter` turns a response into an image or a classified error
//! - `editing` implements the photo operations on top of both

pub mod editing;
pub mod gateway;
pub mod interpreter;

pub use editing::{EditingService, EditingServiceImpl};
pub use gateway::{GeminiGateway, ModelGateway, ModelRequest};
pub use interpreter::{interpret_response, ResponseInterpreter};
