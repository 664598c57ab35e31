use crate::Spectrum;
use crate::bsdf::Bsdf;
use crate::diffgeom::DifferentialGeometry;
use crate::geometry::{BBox, FloatType, Normal, Point, Ray, RayDifferential, Vector};

/// Orientation flags of the shape that produced a hit; the differential
/// geometry frame reads these to orient its shading normal.
pub trait Shape {
    /// Set when the scene description asks for the normal to point against
    /// the parametric orientation.
    fn reverse_orientation(&self) -> bool;

    /// Set when the shape's object-to-world transform has negative
    /// determinant.
    fn transform_swaps_handedness(&self) -> bool;
}

/// A surface hit: the local frame, the epsilon to offset spawned rays by,
/// and the primitive that was hit. Borrows from the primitive and lives at
/// most one evaluation call.
pub struct Intersection<'a> {
    pub dg: DifferentialGeometry<'a>,
    pub ray_epsilon: FloatType,
    pub primitive: &'a dyn Primitive,
}

impl<'a> Intersection<'a> {
    /// The composite scattering function at the hit point.
    pub fn bsdf(&self, ray: &RayDifferential) -> Bsdf<'a> {
        self.primitive.bsdf(&self.dg, ray)
    }

    /// Emitted radiance toward `wo` if the hit surface is itself a light.
    pub fn le(&self, wo: Vector) -> Spectrum {
        self.primitive.le(self.dg.p, self.dg.nn, wo)
    }
}

/// Geometry the ray tracer can hit. An acceleration structure presents its
/// whole contents through this same interface.
pub trait Primitive: Send + Sync {
    fn world_bound(&self) -> BBox;

    /// Full intersection; on a hit, `ray.maxt` is clipped to the hit
    /// distance.
    fn intersect<'a>(&'a self, ray: &mut Ray) -> Option<Intersection<'a>>;

    /// Predicate intersection for shadow rays; cheaper than `intersect`
    /// because no differential geometry is produced.
    fn intersect_p(&self, ray: &Ray) -> bool;

    /// Builds the composite scattering function for a hit on this
    /// primitive. Lobes are borrowed from the primitive's material.
    fn bsdf<'a>(&'a self, dg: &DifferentialGeometry<'a>, ray: &RayDifferential) -> Bsdf<'a>;

    /// Emitted radiance for area-light primitives; everything else is dark.
    fn le(&self, _p: Point, _n: Normal, _wo: Vector) -> Spectrum {
        Spectrum::black()
    }
}
