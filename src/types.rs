// Core types shared by the sampler, detector, animator and overlay.

use image::RgbaImage;
use std::ops::Sub;
use std::time::Instant;

/// Integer pointer position in raw screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean length of this point taken as a vector.
    pub fn length(self) -> f64 {
        (self.x as f64).hypot(self.y as f64)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One pointer reading taken at the start of a tick.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub position: Point,
    pub at: Instant,
}

/// Displacement between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub delta: Point,
    pub distance: f64,
}

/// Cardinal direction of one motion step. `None` covers sub-threshold moves and axis ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Classify a displacement: the dominant axis wins, y-down is `Down`.
    pub fn classify(delta: Point, threshold: i32) -> Self {
        let (ax, ay) = (delta.x.abs(), delta.y.abs());
        if ax <= threshold && ay <= threshold {
            return Direction::None;
        }
        if ax > ay {
            if delta.x > 0 { Direction::Right } else { Direction::Left }
        } else if ay > ax {
            if delta.y > 0 { Direction::Down } else { Direction::Up }
        } else {
            Direction::None
        }
    }
}

/// Pixel buffer pushed to the overlay window.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // window width in pixels
    pub height: usize,     // window height in pixels
    pub pixels: Vec<u32>,  // each entry is 0xAARRGGBB (alpha honoured by a transparent minifb window)
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Visual: every pixel becomes fully transparent (nothing shows on screen).
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }
}

/// The cursor glyph. Loaded once at startup and never mutated afterwards.
/// Visual: this is the picture that gets stretched into the overlay window.
#[derive(Clone)]
pub struct CursorBitmap {
    image: RgbaImage,
}

impl CursorBitmap {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Native pixel size (width, height) as decoded or drawn.
    pub fn native_size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }
}
