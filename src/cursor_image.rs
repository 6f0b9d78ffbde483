// Supplies the cursor glyph exactly once per run.
// Visual expectation: either the themed arrow (largest frame of the Xcursor file)
// or, if anything on that path fails, a plain black/white arrow drawn in code.

use crate::config::{CURSOR_DECODER, CURSOR_THEME_FILE};
use crate::draw::fill_polygon;
use crate::error::Error;
use crate::types::CursorBitmap;
use image::{Rgba, RgbaImage};
use once_cell::unsync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Somewhere a cursor image can come from. Failures are expected and non-fatal.
pub trait CursorSource {
    fn load(&self) -> Result<RgbaImage, Error>;
}

/// Runs an Xcursor-to-PNG converter on a theme file inside a scratch directory and
/// keeps the biggest PNG (by file size), which is the highest-resolution frame.
pub struct XcursorThemeSource {
    cursor_file: PathBuf,
    decoder: String,
}

impl XcursorThemeSource {
    pub fn new(cursor_file: impl Into<PathBuf>, decoder: impl Into<String>) -> Self {
        Self { cursor_file: cursor_file.into(), decoder: decoder.into() }
    }

    pub fn system_default() -> Self {
        Self::new(CURSOR_THEME_FILE, CURSOR_DECODER)
    }
}

impl CursorSource for XcursorThemeSource {
    fn load(&self) -> Result<RgbaImage, Error> {
        if !self.cursor_file.is_file() {
            return Err(Error::CursorTheme(format!(
                "theme file {} not found",
                self.cursor_file.display()
            )));
        }

        // Scratch dir is removed when `scratch` drops, on success or failure.
        let scratch = tempfile::tempdir()?;
        let status = Command::new(&self.decoder)
            .arg(&self.cursor_file)
            .current_dir(scratch.path())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| Error::CursorTheme(format!("run {}: {e}", self.decoder)))?;
        if !status.success() {
            return Err(Error::CursorTheme(format!("{} exited with {status}", self.decoder)));
        }

        let largest = largest_png(scratch.path())?;
        tracing::debug!(frame = %largest.display(), "decoded cursor theme frame");
        Ok(image::open(&largest)?.to_rgba8())
    }
}

/// Pick the `.png` file with the most bytes in `dir`.
fn largest_png(dir: &Path) -> Result<PathBuf, Error> {
    let mut best: Option<(u64, PathBuf)> = None;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "png") {
            continue;
        }
        let size = fs::metadata(&path)?.len();
        if best.as_ref().is_none_or(|(b, _)| size > *b) {
            best = Some((size, path));
        }
    }
    best.map(|(_, p)| p)
        .ok_or_else(|| Error::CursorTheme("decoder produced no PNG frames".into()))
}

/// The built-in 32×32 arrow: black outer triangle, white inset triangle, transparent rest.
pub fn fallback_cursor() -> RgbaImage {
    let mut img = RgbaImage::new(32, 32);
    fill_polygon(&mut img, &[(0, 0), (16, 16), (0, 32)], Rgba([0, 0, 0, 255]));
    fill_polygon(&mut img, &[(1, 1), (14, 14), (1, 29)], Rgba([255, 255, 255, 255]));
    img
}

/// Loads from `source` on first use, falls back to [`fallback_cursor`] on any error,
/// and hands out the same bitmap for the rest of the run.
pub struct CursorImageProvider<S: CursorSource> {
    source: S,
    cached: OnceCell<CursorBitmap>,
}

impl<S: CursorSource> CursorImageProvider<S> {
    pub fn new(source: S) -> Self {
        Self { source, cached: OnceCell::new() }
    }

    pub fn load(&self) -> &CursorBitmap {
        self.cached.get_or_init(|| {
            let image = match self.source.load() {
                Ok(img) if img.width() > 0 && img.height() > 0 => img,
                Ok(_) => {
                    tracing::warn!("cursor theme frame is empty, using built-in arrow");
                    fallback_cursor()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cursor theme unavailable, using built-in arrow");
                    fallback_cursor()
                }
            };
            let bitmap = CursorBitmap::new(image);
            let (w, h) = bitmap.native_size();
            tracing::info!(width = w, height = h, "cursor bitmap ready");
            bitmap
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FailingSource {
        calls: Cell<u32>,
    }

    impl CursorSource for FailingSource {
        fn load(&self) -> Result<RgbaImage, Error> {
            self.calls.set(self.calls.get() + 1);
            Err(Error::CursorTheme("simulated".into()))
        }
    }

    struct FixedSource(u32);

    impl CursorSource for FixedSource {
        fn load(&self) -> Result<RgbaImage, Error> {
            Ok(RgbaImage::from_pixel(self.0, self.0, Rgba([9, 9, 9, 255])))
        }
    }

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn failing_source_falls_back_once_and_is_cached() {
        let provider = CursorImageProvider::new(FailingSource { calls: Cell::new(0) });
        for _ in 0..3 {
            assert_eq!(provider.load().native_size(), (32, 32));
        }
        assert_eq!(provider.source.calls.get(), 1);
    }

    #[test]
    fn empty_frame_falls_back() {
        let provider = CursorImageProvider::new(FixedSource(0));
        assert_eq!(provider.load().native_size(), (32, 32));
    }

    #[test]
    fn successful_source_is_used_as_is() {
        let provider = CursorImageProvider::new(FixedSource(48));
        assert_eq!(provider.load().native_size(), (48, 48));
    }

    #[test]
    fn fallback_arrow_has_outline_fill_and_transparent_background() {
        let img = fallback_cursor();
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(*img.get_pixel(5, 16), WHITE);
        assert_eq!(*img.get_pixel(13, 16), BLACK);
        assert_eq!(*img.get_pixel(0, 16), BLACK);
        assert_eq!(img.get_pixel(31, 31).0[3], 0);
        assert_eq!(img.get_pixel(20, 5).0[3], 0);
    }

    #[test]
    fn missing_theme_file_is_an_error_not_a_panic() {
        let source = XcursorThemeSource::new("/nonexistent/theme/left_ptr", "xcur2png");
        assert!(matches!(source.load(), Err(Error::CursorTheme(_))));
    }

    #[test]
    fn largest_png_picks_by_byte_size() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("left_ptr_000.png"), [0u8; 10]).unwrap();
        fs::write(dir.path().join("left_ptr_001.png"), [0u8; 300]).unwrap();
        fs::write(dir.path().join("left_ptr.conf"), [0u8; 5000]).unwrap();
        let best = largest_png(dir.path()).unwrap();
        assert_eq!(best.file_name().unwrap(), "left_ptr_001.png");
    }

    #[test]
    fn largest_png_in_empty_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(largest_png(dir.path()).is_err());
    }
}
