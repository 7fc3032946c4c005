use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Persists a finished image. Encoding is up to the implementation.
pub trait FilePresenterPort {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()>;

    /// File extension used for animation frames, without the dot.
    fn extension(&self) -> &str;
}
