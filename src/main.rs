// Shake the mouse to make the cursor big.
// What you SEE:
// • Normal use: nothing; the regular system arrow.
// • Shake the mouse left/right (or up/down) quickly: a large arrow pops up at the
//   pointer and keeps growing while you keep shaking (up to 10x).
// • Stop: it shrinks back within a few ticks and disappears.
// Ctrl+C / SIGTERM / SIGHUP quit cleanly and always give the system arrow back.

mod animator;
mod config;
mod cursor_image;
mod cursor_override;
mod draw;
mod error;
mod magnifier;
mod overlay;
mod pointer;
mod poll;
mod sampler;
mod shake;
mod types;

use config::Tuning;
use cursor_image::{CursorImageProvider, XcursorThemeSource};
use cursor_override::CursorOverride;
use error::Error;
use magnifier::Magnifier;
use overlay::{MinifbSurface, OverlayRenderer};
use pointer::{DevicePointer, PointerSource};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    init_logging();

    let quit = Arc::new(AtomicBool::new(false));
    let quit_flag = Arc::clone(&quit);
    if let Err(e) = ctrlc::set_handler(move || quit_flag.store(true, Ordering::SeqCst)) {
        tracing::warn!(error = %e, "could not install signal handler");
    }

    let tuning = Tuning::default();

    /* --- Cursor glyph (once per run) ---
       Visual: the themed arrow if the decoder works, else the built-in one. */
    let provider = CursorImageProvider::new(XcursorThemeSource::system_default());
    let bitmap = provider.load();
    let base_size = tuning.base_size(bitmap.width());
    let capacity = (base_size as f64 * tuning.max_scale).ceil() as u32;

    /* --- Pointer source ---
       Fatal like the window: without it there is nothing to follow. */
    let pointer = DevicePointer::new().inspect_err(|e| {
        tracing::error!(error = %e, "cannot query pointer");
    })?;

    /* --- Overlay window ---
       Fatal if it can't be created; a broken overlay is worse than none. */
    let surface = MinifbSurface::create(capacity).inspect_err(|e| {
        tracing::error!(error = %e, "cannot create overlay window");
    })?;
    // Pointer is hidden only while the overlay shows; dropping `renderer` restores it.
    let surface = CursorOverride::acquire(surface);
    let mut renderer = OverlayRenderer::new(surface, bitmap, &tuning);

    let mut magnifier = Magnifier::new(tuning, pointer.position(), Instant::now());
    let mut interval = magnifier.initial_interval();

    tracing::info!("shake-magnifier running");

    /* ------------------------------ Main loop ------------------------------ */
    while renderer.is_open() && !quit.load(Ordering::SeqCst) {
        std::thread::sleep(interval);

        let frame = magnifier.tick(Instant::now(), pointer.position());
        if let Err(e) = renderer.render(frame.position, &frame.animation) {
            // A missed frame is superseded by the next tick.
            tracing::warn!(error = %e, "overlay render failed");
        }
        if frame.shaking {
            tracing::trace!(scale = frame.animation.current_scale, "magnifying");
        }
        interval = frame.interval;
    }

    tracing::info!("shutting down");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
