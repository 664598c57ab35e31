use crate::geometry::{FloatType, Normal, Point, Vector, cross};
use crate::primitive::Shape;

/// Local surface description at a ray hit: position, shading normal,
/// parametric coordinates and partial derivatives.
///
/// The shape back-reference is borrowed and only valid for the duration of
/// the owning intersection.
#[derive(Copy, Clone)]
pub struct DifferentialGeometry<'a> {
    pub p: Point,
    /// Normalized shading normal.
    pub nn: Normal,
    pub u: FloatType,
    pub v: FloatType,
    pub dpdu: Vector,
    pub dpdv: Vector,
    pub dndu: Normal,
    pub dndv: Normal,
    pub shape: Option<&'a dyn Shape>,
}

impl<'a> DifferentialGeometry<'a> {
    /// The shading normal is the normalized cross product of the partial
    /// derivatives, negated when the shape's reverse-orientation flag and
    /// its transform's handedness swap disagree. The flip is a boolean XOR
    /// so the two conditions cancel when both hold.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p: Point,
        dpdu: Vector,
        dpdv: Vector,
        dndu: Normal,
        dndv: Normal,
        u: FloatType,
        v: FloatType,
        shape: Option<&'a dyn Shape>,
    ) -> DifferentialGeometry<'a> {
        let mut nn = Normal::from(cross(dpdu, dpdv).normalize());
        if let Some(shape) = shape
            && (shape.reverse_orientation() ^ shape.transform_swaps_handedness())
        {
            nn *= -1.0;
        }
        DifferentialGeometry {
            p,
            nn,
            u,
            v,
            dpdu,
            dpdv,
            dndu,
            dndv,
            shape,
        }
    }
}
