//=========================================================================
// Stage Geometry
//=========================================================================
//
// Integer pixel geometry and ARGB color used across the stage contract.
//
// Coordinates are i32 pixels with the origin at the top-left of the
// surface. Containment checks use inclusive bounds on all four edges,
// matching the hit-test behavior of the control layer.
//
//=========================================================================

//=== Size ================================================================

/// Width and height of a surface or layer in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

//=== Point ===============================================================

/// A position in pixels from the top-left of its reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

//=== Rect ================================================================

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle at the origin covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Returns true if the point lies inside the rectangle.
    ///
    /// Bounds are inclusive on all edges, so a point exactly on the
    /// right or bottom edge is still contained.
    pub fn contains(&self, p: Point) -> bool {
        (p.x >= self.x && p.x <= self.x + self.width)
            && (p.y >= self.y && p.y <= self.y + self.height)
    }
}

//=== Color ===============================================================

/// An 8-bit-per-channel ARGB color.
///
/// Matches the packed-int color model of typical 2D canvas APIs, but
/// keeps the channels addressable for test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Translucent black scrim, the default backdrop for text messages.
    pub const SCRIM: Color = Color::argb(150, 0, 0, 0);

    /// Creates an opaque color from its RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    /// Creates a color from its alpha and RGB channels.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
