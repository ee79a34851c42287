use serde::{Deserialize, Serialize};

/// Face region in source-frame pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> i64 {
        self.w.max(0) as i64 * self.h.max(0) as i64
    }

    /// Both sides must reach `min_side` pixels.
    pub fn meets_min_size(&self, min_side: i32) -> bool {
        self.w >= min_side && self.h >= min_side
    }
}
