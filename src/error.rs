// One error type for the whole app. Every variant states *where* things went wrong.
// Window errors are the only fatal ones; cursor-theme errors are swallowed by the
// image provider and replaced with the drawn fallback glyph.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the overlay window failed (no display, no transparent/topmost support).
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the overlay failed. Logged, next tick tries again.
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// The cursor theme file or its decoder is missing or produced nothing usable.
    #[error("Cursor theme error: {0}")]
    CursorTheme(String),

    #[error("Cursor decode error: {0}")]
    CursorDecode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
