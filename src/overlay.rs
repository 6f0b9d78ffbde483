// The on-screen part: a borderless, always-on-top, transparent window that follows
// the pointer and shows the cursor glyph at the current scale.
//
// `OverlaySurface` is everything the renderer needs from a window system; the shake
// detector and animator never see it.

use crate::animator::AnimationState;
use crate::config::Tuning;
use crate::cursor_override::{CursorOverride, SystemCursor};
use crate::draw::blit_stretched;
use crate::error::Error;
use crate::types::{CursorBitmap, FrameBuffer, Point};
use minifb::{Window, WindowOptions};

pub trait OverlaySurface {
    fn move_to(&mut self, x: i32, y: i32);
    fn resize(&mut self, side: u32);
    /// Draw the glyph stretched over the current size and push it to the screen.
    fn paint(&mut self, bitmap: &CursorBitmap) -> Result<(), Error>;
    fn show(&mut self);
    fn hide(&mut self) -> Result<(), Error>;
    /// Keep the window's event queue drained on ticks where nothing is painted.
    fn pump(&mut self);
    fn is_open(&self) -> bool;
}

/// Where the overlay goes and how big it is for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
    pub x: i32,
    pub y: i32,
    pub side: u32,
}

impl OverlayGeometry {
    /// The pointer sits a quarter of the way in, so the hotspot stays near the glyph's tip.
    pub fn compute(pointer: Point, base_size: u32, scale: f64) -> Self {
        let side = (base_size as f64 * scale) as u32;
        let quarter = (side / 4) as i32;
        Self { x: pointer.x - quarter, y: pointer.y - quarter, side }
    }
}

pub struct OverlayRenderer<'a, S: OverlaySurface> {
    surface: S,
    bitmap: &'a CursorBitmap,
    base_size: u32,
    shown: bool,
}

impl<'a, S: OverlaySurface> OverlayRenderer<'a, S> {
    pub fn new(surface: S, bitmap: &'a CursorBitmap, tuning: &Tuning) -> Self {
        Self {
            surface,
            bitmap,
            base_size: tuning.base_size(bitmap.width()),
            shown: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_open()
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Bring the surface in line with this tick's animation state.
    pub fn render(&mut self, pointer: Point, anim: &AnimationState) -> Result<(), Error> {
        if !anim.visible {
            if self.shown {
                self.shown = false;
                return self.surface.hide();
            }
            self.surface.pump();
            return Ok(());
        }

        if !self.shown {
            self.surface.show();
            self.shown = true;
        }
        let geo = OverlayGeometry::compute(pointer, self.base_size, anim.current_scale);
        self.surface.move_to(geo.x, geo.y);
        self.surface.resize(geo.side);
        self.surface.paint(self.bitmap)
    }
}

/* ---------------------------- minifb-backed surface ---------------------------- */

/// How far past the top-left screen edge a hidden window is parked.
const PARK_MARGIN: i32 = 10_000;

/// Where the fixed-size minifb window sits. minifb cannot unmap a window, so a hidden
/// overlay is parked far off-screen where it can neither be seen nor take clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub capacity: u32,
}

impl Placement {
    /// A new window starts parked.
    pub fn parked(capacity: u32) -> Self {
        let offset = -(capacity as i32) - PARK_MARGIN;
        Self { x: offset, y: offset, capacity }
    }

    pub fn park(&mut self) {
        *self = Self::parked(self.capacity);
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn is_parked(&self) -> bool {
        *self == Self::parked(self.capacity)
    }

    /// True if the window rectangle contains `p`.
    #[cfg(test)]
    pub fn covers(&self, p: Point) -> bool {
        let side = self.capacity as i64;
        let (px, py) = (p.x as i64, p.y as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && px < x + side && py >= y && py < y + side
    }
}

/// One window sized for the largest overlay; smaller sizes use its top-left square
/// and leave the rest transparent. Hidden = transparent frame, parked off-screen.
pub struct MinifbSurface {
    window: Window,
    frame: FrameBuffer,
    placement: Placement,
    side: u32,
    visible: bool,
}

impl MinifbSurface {
    /// Visual: nothing appears yet; the window starts fully transparent.
    pub fn create(capacity: u32) -> Result<Self, Error> {
        let capacity = capacity.max(1) as usize;
        let options = WindowOptions {
            borderless: true,
            title: false,
            resize: false,
            topmost: true,
            transparency: true,
            none: true,
            ..WindowOptions::default()
        };
        let mut window = Window::new("shake-magnifier", capacity, capacity, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // Ticks are paced by the poll-rate controller, not by minifb.
        window.set_target_fps(0);

        let mut surface = Self {
            window,
            frame: FrameBuffer::new(capacity, capacity),
            placement: Placement::parked(capacity as u32),
            side: 0,
            visible: false,
        };
        // Off-screen before the first frame so startup never leaves a square over the desktop.
        surface.apply_placement();
        surface.present()?;
        tracing::info!(capacity, "overlay window created");
        Ok(surface)
    }

    fn apply_placement(&mut self) {
        self.window
            .set_position(self.placement.x as isize, self.placement.y as isize);
    }

    fn present(&mut self) -> Result<(), Error> {
        self.window
            .update_with_buffer(&self.frame.pixels, self.frame.width, self.frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }
}

impl OverlaySurface for MinifbSurface {
    fn move_to(&mut self, x: i32, y: i32) {
        if self.placement.is_parked() {
            tracing::debug!(x, y, "overlay unparked");
        }
        self.placement.move_to(x, y);
        self.apply_placement();
    }

    fn resize(&mut self, side: u32) {
        self.side = side.min(self.frame.width as u32);
    }

    fn paint(&mut self, bitmap: &CursorBitmap) -> Result<(), Error> {
        if !self.visible {
            return Ok(());
        }
        blit_stretched(&mut self.frame, bitmap, self.side);
        self.present()
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) -> Result<(), Error> {
        self.visible = false;
        self.frame.clear();
        self.placement.park();
        self.apply_placement();
        self.present()
    }

    fn pump(&mut self) {
        self.window.update();
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }
}

impl SystemCursor for MinifbSurface {
    fn set_cursor_hidden(&mut self, hidden: bool) {
        self.window.set_cursor_visibility(!hidden);
    }
}

/// The system pointer is hidden only while the overlay is on screen.
impl<C: OverlaySurface + SystemCursor> OverlaySurface for CursorOverride<C> {
    fn move_to(&mut self, x: i32, y: i32) {
        (**self).move_to(x, y)
    }
    fn resize(&mut self, side: u32) {
        (**self).resize(side)
    }
    fn paint(&mut self, bitmap: &CursorBitmap) -> Result<(), Error> {
        (**self).paint(bitmap)
    }
    fn show(&mut self) {
        (**self).show();
        self.hide_pointer();
    }
    fn hide(&mut self) -> Result<(), Error> {
        // Pointer comes back even if the transparent present fails.
        self.show_pointer();
        (**self).hide()
    }
    fn pump(&mut self) {
        (**self).pump()
    }
    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}
