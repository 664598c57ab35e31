use super::{FloatType, Point, Vector, distance, lerp};

/// Axis-aligned bounding box.
///
/// The empty box is the sentinel pair (+inf, −inf); any union with a point
/// or box collapses it to the other operand.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BBox {
    pub p_min: Point,
    pub p_max: Point,
}

impl BBox {
    pub fn empty() -> BBox {
        BBox {
            p_min: Point::new(FloatType::INFINITY, FloatType::INFINITY, FloatType::INFINITY),
            p_max: Point::new(
                -FloatType::INFINITY,
                -FloatType::INFINITY,
                -FloatType::INFINITY,
            ),
        }
    }

    pub fn from_point(p: Point) -> BBox {
        BBox { p_min: p, p_max: p }
    }

    /// Bounds two points given in any order.
    pub fn from_points(p1: Point, p2: Point) -> BBox {
        BBox {
            p_min: Point::new(p1.x.min(p2.x), p1.y.min(p2.y), p1.z.min(p2.z)),
            p_max: Point::new(p1.x.max(p2.x), p1.y.max(p2.y), p1.z.max(p2.z)),
        }
    }

    pub fn union_point(&self, p: Point) -> BBox {
        BBox {
            p_min: Point::new(
                self.p_min.x.min(p.x),
                self.p_min.y.min(p.y),
                self.p_min.z.min(p.z),
            ),
            p_max: Point::new(
                self.p_max.x.max(p.x),
                self.p_max.y.max(p.y),
                self.p_max.z.max(p.z),
            ),
        }
    }

    pub fn union(&self, b: &BBox) -> BBox {
        BBox {
            p_min: Point::new(
                self.p_min.x.min(b.p_min.x),
                self.p_min.y.min(b.p_min.y),
                self.p_min.z.min(b.p_min.z),
            ),
            p_max: Point::new(
                self.p_max.x.max(b.p_max.x),
                self.p_max.y.max(b.p_max.y),
                self.p_max.z.max(b.p_max.z),
            ),
        }
    }

    pub fn overlaps(&self, b: &BBox) -> bool {
        let x = self.p_max.x >= b.p_min.x && self.p_min.x <= b.p_max.x;
        let y = self.p_max.y >= b.p_min.y && self.p_min.y <= b.p_max.y;
        let z = self.p_max.z >= b.p_min.z && self.p_min.z <= b.p_max.z;
        x && y && z
    }

    pub fn inside(&self, pt: Point) -> bool {
        pt.x >= self.p_min.x
            && pt.x <= self.p_max.x
            && pt.y >= self.p_min.y
            && pt.y <= self.p_max.y
            && pt.z >= self.p_min.z
            && pt.z <= self.p_max.z
    }

    pub fn expand(&mut self, delta: FloatType) {
        let d = Vector::new(delta, delta, delta);
        self.p_min -= d;
        self.p_max += d;
    }

    pub fn surface_area(&self) -> FloatType {
        let d = self.p_max - self.p_min;
        2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    pub fn volume(&self) -> FloatType {
        let d = self.p_max - self.p_min;
        d.x * d.y * d.z
    }

    /// The axis with the largest extent (0 = x, 1 = y, 2 = z); spatial
    /// partitioning uses this for split-axis selection.
    pub fn maximum_extent(&self) -> usize {
        let d = self.p_max - self.p_min;
        if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        }
    }

    /// The point at fractional position (tx, ty, tz) within the box.
    pub fn lerp(&self, tx: FloatType, ty: FloatType, tz: FloatType) -> Point {
        Point::new(
            lerp(tx, self.p_min.x, self.p_max.x),
            lerp(ty, self.p_min.y, self.p_max.y),
            lerp(tz, self.p_min.z, self.p_max.z),
        )
    }

    /// The fractional position of `p` within the box, the inverse of `lerp`.
    pub fn offset(&self, p: Point) -> Vector {
        Vector::new(
            (p.x - self.p_min.x) / (self.p_max.x - self.p_min.x),
            (p.y - self.p_min.y) / (self.p_max.y - self.p_min.y),
            (p.z - self.p_min.z) / (self.p_max.z - self.p_min.z),
        )
    }

    /// True for the empty sentinel and any inverted box.
    pub fn is_degenerate(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Centre and radius of a sphere enclosing the box. Radius is the
    /// centre-to-corner distance; a degenerate box reports radius 0.
    pub fn bounding_sphere(&self) -> (Point, FloatType) {
        if self.is_degenerate() {
            return (Point::origin(), 0.0);
        }
        let center = self.lerp(0.5, 0.5, 0.5);
        (center, distance(center, self.p_max))
    }
}

impl Default for BBox {
    fn default() -> BBox {
        BBox::empty()
    }
}

impl std::ops::Index<usize> for BBox {
    type Output = Point;
    fn index(&self, i: usize) -> &Point {
        match i {
            0 => &self.p_min,
            1 => &self.p_max,
            _ => panic!("BBox index {i} out of range"),
        }
    }
}
