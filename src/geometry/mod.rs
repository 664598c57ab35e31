mod bbox;
mod ray;
mod transform;

pub use bbox::BBox;
pub use ray::{Ray, RayDifferential};
pub use transform::{Transform, TransformError};

use num_traits::Float;

pub type FloatType = f32;

pub const INV_PI: FloatType = 0.318_309_886_183_790_7;
pub const INV_TWO_PI: FloatType = 0.159_154_943_091_895_35;
pub const INV_FOUR_PI: FloatType = 0.079_577_471_545_947_67;

pub fn radians(deg: FloatType) -> FloatType {
    (std::f32::consts::PI / 180.0) * deg
}

pub fn degrees(rad: FloatType) -> FloatType {
    (180.0 / std::f32::consts::PI) * rad
}

/// Linear interpolation; for t in [0, 1] the result lies between v1 and v2.
pub fn lerp<T: Float>(t: T, v1: T, v2: T) -> T {
    (T::one() - t) * v1 + t * v2
}

/// A free direction in world space, with no fixed origin.
///
/// Construction asserts that no component is NaN, so degenerate cross
/// products and divisions by zero get caught where they happen instead of
/// propagating through the transport math.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: FloatType,
    pub y: FloatType,
    pub z: FloatType,
}

impl Vector {
    pub fn new(x: FloatType, y: FloatType, z: FloatType) -> Vector {
        let v = Vector { x, y, z };
        assert!(!v.has_nans(), "NaN component in Vector::new");
        v
    }

    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub fn length_squared(&self) -> FloatType {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> FloatType {
        self.length_squared().sqrt()
    }

    /// Callers must guarantee non-zero length.
    pub fn normalize(&self) -> Vector {
        let len = self.length();
        assert!(len > 0.0, "normalizing a zero-length vector");
        *self / len
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;
    fn add(self, v: Vector) -> Vector {
        Vector::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl std::ops::AddAssign for Vector {
    fn add_assign(&mut self, v: Vector) {
        *self = *self + v;
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;
    fn sub(self, v: Vector) -> Vector {
        Vector::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl std::ops::SubAssign for Vector {
    fn sub_assign(&mut self, v: Vector) {
        *self = *self - v;
    }
}

impl std::ops::Mul<FloatType> for Vector {
    type Output = Vector;
    fn mul(self, f: FloatType) -> Vector {
        Vector::new(self.x * f, self.y * f, self.z * f)
    }
}

impl std::ops::Mul<Vector> for FloatType {
    type Output = Vector;
    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl std::ops::MulAssign<FloatType> for Vector {
    fn mul_assign(&mut self, f: FloatType) {
        *self = *self * f;
    }
}

impl std::ops::Div<FloatType> for Vector {
    type Output = Vector;
    fn div(self, f: FloatType) -> Vector {
        assert!(f != 0.0, "dividing a Vector by zero");
        let inv = 1.0 / f;
        Vector::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Index<usize> for Vector {
    type Output = FloatType;
    fn index(&self, i: usize) -> &FloatType {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector index {i} out of range"),
        }
    }
}

/// A location in world space. Point − Point yields a Vector; Point ± Vector
/// yields a Point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: FloatType,
    pub y: FloatType,
    pub z: FloatType,
}

impl Point {
    pub fn new(x: FloatType, y: FloatType, z: FloatType) -> Point {
        let p = Point { x, y, z };
        assert!(!p.has_nans(), "NaN component in Point::new");
        p
    }

    pub fn origin() -> Point {
        Point::default()
    }

    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl std::ops::Add<Vector> for Point {
    type Output = Point;
    fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl std::ops::AddAssign<Vector> for Point {
    fn add_assign(&mut self, v: Vector) {
        *self = *self + v;
    }
}

impl std::ops::Sub for Point {
    type Output = Vector;
    fn sub(self, p: Point) -> Vector {
        Vector::new(self.x - p.x, self.y - p.y, self.z - p.z)
    }
}

impl std::ops::Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, v: Vector) -> Point {
        Point::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl std::ops::SubAssign<Vector> for Point {
    fn sub_assign(&mut self, v: Vector) {
        *self = *self - v;
    }
}

impl std::ops::Index<usize> for Point {
    type Output = FloatType;
    fn index(&self, i: usize) -> &FloatType {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Point index {i} out of range"),
        }
    }
}

/// A surface orientation covector. Unlike a Vector it transforms by the
/// inverse transpose of an affine map, so the two types are kept distinct
/// and only convert through explicit `From` impls.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Normal {
    pub x: FloatType,
    pub y: FloatType,
    pub z: FloatType,
}

impl Normal {
    pub fn new(x: FloatType, y: FloatType, z: FloatType) -> Normal {
        let n = Normal { x, y, z };
        assert!(!n.has_nans(), "NaN component in Normal::new");
        n
    }

    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub fn length_squared(&self) -> FloatType {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> FloatType {
        self.length_squared().sqrt()
    }

    pub fn normalize(&self) -> Normal {
        let len = self.length();
        assert!(len > 0.0, "normalizing a zero-length normal");
        *self / len
    }
}

impl From<Vector> for Normal {
    fn from(v: Vector) -> Normal {
        Normal { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Normal> for Vector {
    fn from(n: Normal) -> Vector {
        Vector { x: n.x, y: n.y, z: n.z }
    }
}

impl std::ops::Add for Normal {
    type Output = Normal;
    fn add(self, n: Normal) -> Normal {
        Normal::new(self.x + n.x, self.y + n.y, self.z + n.z)
    }
}

impl std::ops::Mul<FloatType> for Normal {
    type Output = Normal;
    fn mul(self, f: FloatType) -> Normal {
        Normal::new(self.x * f, self.y * f, self.z * f)
    }
}

impl std::ops::MulAssign<FloatType> for Normal {
    fn mul_assign(&mut self, f: FloatType) {
        *self = *self * f;
    }
}

impl std::ops::Div<FloatType> for Normal {
    type Output = Normal;
    fn div(self, f: FloatType) -> Normal {
        assert!(f != 0.0, "dividing a Normal by zero");
        let inv = 1.0 / f;
        Normal::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl std::ops::Neg for Normal {
    type Output = Normal;
    fn neg(self) -> Normal {
        Normal::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Index<usize> for Normal {
    type Output = FloatType;
    fn index(&self, i: usize) -> &FloatType {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Normal index {i} out of range"),
        }
    }
}

/// Inner product over any vector/normal operand pair.
pub trait Dot<Rhs = Self> {
    fn dot(self, rhs: Rhs) -> FloatType;
}

impl Dot for Vector {
    fn dot(self, v: Vector) -> FloatType {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
}

impl Dot<Normal> for Vector {
    fn dot(self, n: Normal) -> FloatType {
        self.x * n.x + self.y * n.y + self.z * n.z
    }
}

impl Dot<Vector> for Normal {
    fn dot(self, v: Vector) -> FloatType {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
}

impl Dot for Normal {
    fn dot(self, n: Normal) -> FloatType {
        self.x * n.x + self.y * n.y + self.z * n.z
    }
}

pub fn abs_dot<A: Dot<B>, B>(a: A, b: B) -> FloatType {
    a.dot(b).abs()
}

/// Right-handed cross product.
pub fn cross(v1: Vector, v2: Vector) -> Vector {
    Vector::new(
        v1.y * v2.z - v1.z * v2.y,
        v1.z * v2.x - v1.x * v2.z,
        v1.x * v2.y - v1.y * v2.x,
    )
}

/// Completes `v1` to an orthonormal basis, returning the two other axes.
///
/// `v1` must already be normalized. The helper axis is chosen by whichever
/// of x/y dominates so the intermediate cross product never degenerates.
pub fn coordinate_system(v1: Vector) -> (Vector, Vector) {
    let v2 = if v1.x.abs() > v1.y.abs() {
        let inv_len = 1.0 / (v1.x * v1.x + v1.z * v1.z).sqrt();
        Vector::new(-v1.z * inv_len, 0.0, v1.x * inv_len)
    } else {
        let inv_len = 1.0 / (v1.y * v1.y + v1.z * v1.z).sqrt();
        Vector::new(0.0, v1.z * inv_len, -v1.y * inv_len)
    };
    let v3 = cross(v1, v2);
    (v2, v3)
}

pub fn distance(p1: Point, p2: Point) -> FloatType {
    (p1 - p2).length()
}

pub fn distance_squared(p1: Point, p2: Point) -> FloatType {
    (p1 - p2).length_squared()
}

/// Flips `n` into the hemisphere of `v`.
pub fn faceforward(n: Normal, v: Vector) -> Normal {
    if n.dot(v) < 0.0 { -n } else { n }
}
