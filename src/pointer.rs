// Where is the mouse right now, in global screen pixels.

use crate::error::Error;
use crate::types::Point;
use device_query::{DeviceQuery, DeviceState};

pub trait PointerSource {
    fn position(&self) -> Point;
}

/// Global pointer position via `device_query` (works outside our own window).
pub struct DevicePointer {
    state: DeviceState,
}

impl DevicePointer {
    /// Fails instead of panicking when no display connection can be opened
    /// (e.g. a Wayland-only session without XWayland).
    pub fn new() -> Result<Self, Error> {
        let state = require_display(DeviceState::checked_new())?;
        Ok(Self { state })
    }
}

fn require_display<T>(state: Option<T>) -> Result<T, Error> {
    state.ok_or_else(|| {
        Error::WindowInit("cannot query pointer position: no display connection".into())
    })
}

impl PointerSource for DevicePointer {
    fn position(&self) -> Point {
        let (x, y) = self.state.get_mouse().coords;
        Point::new(x, y)
    }
}
