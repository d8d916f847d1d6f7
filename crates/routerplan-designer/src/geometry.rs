//! Machine-frame geometry.
//!
//! +X points right and +Y points down, so a box's top edge is its smallest
//! y value.

use serde::{Deserialize, Serialize};

/// An absolute position in the machine frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResolvedCoordinate {
    pub x: f64,
    pub y: f64,
}

impl ResolvedCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn to_lyon(self) -> lyon::math::Point {
        lyon::math::point(self.x as f32, self.y as f32)
    }

    /// Point `length` away along `degrees`, measured from +X toward +Y.
    pub fn polar_offset(self, degrees: f64, length: f64) -> Self {
        let theta = degrees.to_radians();
        Self {
            x: self.x + length * theta.cos(),
            y: self.y + length * theta.sin(),
        }
    }
}

/// Axis-aligned box with its top-left corner at `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> ResolvedCoordinate {
        ResolvedCoordinate::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> ResolvedCoordinate {
        ResolvedCoordinate::new(self.x, self.y)
    }
}

/// The boxes a placement can measure from
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameSet {
    /// Stock the job is cut from
    pub material: BoundingBox,
    /// Part being laid out
    pub part: BoundingBox,
    /// Machine workspace; its top-left corner is the physical origin
    pub workspace: BoundingBox,
}

impl FrameSet {
    /// All three frames set to the same box
    pub fn uniform(bounds: BoundingBox) -> Self {
        Self {
            material: bounds,
            part: bounds,
            workspace: bounds,
        }
    }

    pub fn physical_origin(&self) -> ResolvedCoordinate {
        self.workspace.top_left()
    }
}
