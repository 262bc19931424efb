//! Source image loading.
//!
//! The editor works on a single decoded RGBA8 bitmap per session. Decoding
//! is the first suspension point of a session: nothing can be previewed
//! until [`decode_image`] has produced an [`ImageSource`].
//!
//! Supported formats are whatever the `image` crate is built with in this
//! workspace (JPEG and PNG).

mod loader;
mod types;

pub use loader::{decode_image, read_orientation};
pub use types::{DecodeError, ImageSource, Orientation};
