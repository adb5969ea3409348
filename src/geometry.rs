use glam::Vec2;

/// An axis-aligned rectangle described by its centre and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.size / 2.0
    }

    /// Edges count as inside, matching how a tap on a button's border still lands.
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Strict overlap; rectangles that merely share an edge are not touching.
    pub fn intersects(&self, other: &Rect) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = (self.size + other.size) / 2.0;
        delta.x < reach.x && delta.y < reach.y
    }
}
