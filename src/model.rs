use serde::{Deserialize, Serialize};

/// A position on the topology's quantized integer grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn translated(self, d: Delta) -> Point {
        Point {
            x: self.x + d.dx,
            y: self.y + d.dy,
        }
    }
}

/// Displacement between consecutive arc points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

/// Running maxima over every decoded point. Fed explicitly during arc
/// decoding; complete only once the whole catalog has been built, so image
/// dimensions must not be derived from a partially filled accumulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn include(&mut self, p: Point) {
        if p.x > self.max_x {
            self.max_x = p.x;
        }
        if p.y > self.max_y {
            self.max_y = p.y;
        }
    }
}

/// Grid-to-image transform derived once from the topology header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One county's outline set: entity id, parent state id, and the stitched
/// point rings. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountyShape {
    pub county_id: u32,
    pub state_id: u32,
    pub rings: Vec<Vec<Point>>,
}
