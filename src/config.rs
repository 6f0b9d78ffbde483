// Fixed tuning constants. There is no settings file; everything the components need
// is collected here so tests can build the same values the app runs with.

use std::time::Duration;

/// Cursor theme file handed to the external decoder.
pub const CURSOR_THEME_FILE: &str = "/usr/share/icons/Simp1e-Dark/cursors/left_ptr";

/// External Xcursor -> PNG converter. Writes one PNG per frame into its working directory.
pub const CURSOR_DECODER: &str = "xcur2png";

/// Default `RUST_LOG` directive when the variable is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy)]
pub struct Tuning {
    // scale animation
    pub min_scale: f64,
    pub max_scale: f64,
    /// Growth per tick while shaking (fine, smooth ramp).
    pub scale_step: f64,
    /// Shrink per tick once shaking stops (coarse, fast collapse).
    pub decay_step: f64,
    /// Target above `min_scale` on the first shaking tick.
    pub initial_boost: f64,
    /// Target increase per tick while the shake continues.
    pub target_growth: f64,

    // shake detection
    pub shake_threshold: u32,
    pub shake_timeout: Duration,
    /// Per-axis displacement (and total distance) a tick must exceed to count as motion.
    pub movement_threshold: i32,

    // poll rates
    pub active_interval: Duration,
    pub idle_interval: Duration,
    pub very_idle_interval: Duration,
    pub idle_threshold: Duration,

    /// Smallest side length the unscaled glyph is drawn at.
    pub min_base_size: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 10.0,
            scale_step: 0.1,
            decay_step: 1.0,
            initial_boost: 0.5,
            target_growth: 0.02,

            shake_threshold: 8,
            shake_timeout: Duration::from_millis(300),
            movement_threshold: 5,

            active_interval: Duration::from_millis(50),
            idle_interval: Duration::from_millis(250),
            very_idle_interval: Duration::from_millis(500),
            idle_threshold: Duration::from_secs(2),

            min_base_size: 32,
        }
    }
}

impl Tuning {
    /// Side length of the unscaled overlay for a glyph of the given native width.
    pub fn base_size(&self, native_width: u32) -> u32 {
        native_width.max(self.min_base_size)
    }

    /// Keep a scale value inside `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
