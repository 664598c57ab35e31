pub mod lobes;

use arrayvec::ArrayVec;

use crate::Spectrum;
use crate::diffgeom::DifferentialGeometry;
use crate::geometry::{Dot, FloatType, Normal, Vector, cross};

/// Bitmask describing one scattering lobe: a reflection/transmission bit
/// combined with diffuse/glossy/specular bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BxdfType(u32);

impl BxdfType {
    pub const REFLECTION: BxdfType = BxdfType(1 << 0);
    pub const TRANSMISSION: BxdfType = BxdfType(1 << 1);
    pub const DIFFUSE: BxdfType = BxdfType(1 << 2);
    pub const GLOSSY: BxdfType = BxdfType(1 << 3);
    pub const SPECULAR: BxdfType = BxdfType(1 << 4);
    pub const ALL_TYPES: BxdfType =
        BxdfType(Self::DIFFUSE.0 | Self::GLOSSY.0 | Self::SPECULAR.0);
    pub const ALL_REFLECTION: BxdfType = BxdfType(Self::REFLECTION.0 | Self::ALL_TYPES.0);
    pub const ALL_TRANSMISSION: BxdfType = BxdfType(Self::TRANSMISSION.0 | Self::ALL_TYPES.0);
    pub const ALL: BxdfType = BxdfType(Self::ALL_REFLECTION.0 | Self::ALL_TRANSMISSION.0);

    /// Subset inclusion: every bit of `self` is also set in `flags`.
    /// This is the matching rule, not bitwise intersection.
    pub fn matches(self, flags: BxdfType) -> bool {
        self.0 & flags.0 == self.0
    }
}

impl std::ops::BitOr for BxdfType {
    type Output = BxdfType;
    fn bitor(self, rhs: BxdfType) -> BxdfType {
        BxdfType(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for BxdfType {
    type Output = BxdfType;
    fn bitand(self, rhs: BxdfType) -> BxdfType {
        BxdfType(self.0 & rhs.0)
    }
}

impl std::ops::Not for BxdfType {
    type Output = BxdfType;
    fn not(self) -> BxdfType {
        BxdfType(!self.0 & Self::ALL.0)
    }
}

/// Cosine of the polar angle in the local shading frame, where the normal
/// is the +z axis.
pub fn cos_theta(w: Vector) -> FloatType {
    w.z
}

pub fn abs_cos_theta(w: Vector) -> FloatType {
    w.z.abs()
}

pub fn same_hemisphere(w: Vector, wp: Vector) -> bool {
    w.z * wp.z > 0.0
}

/// Concentric (Shirley) mapping of the unit square onto the unit disk.
pub fn concentric_sample_disk(u1: FloatType, u2: FloatType) -> (FloatType, FloatType) {
    let sx = 2.0 * u1 - 1.0;
    let sy = 2.0 * u2 - 1.0;
    if sx == 0.0 && sy == 0.0 {
        return (0.0, 0.0);
    }
    let (r, theta) = if sx.abs() > sy.abs() {
        (sx, std::f32::consts::FRAC_PI_4 * (sy / sx))
    } else {
        (
            sy,
            std::f32::consts::FRAC_PI_2 - std::f32::consts::FRAC_PI_4 * (sx / sy),
        )
    };
    (r * theta.cos(), r * theta.sin())
}

/// Cosine-weighted direction in the upper local hemisphere, pdf cosθ/π.
pub fn cosine_sample_hemisphere(u1: FloatType, u2: FloatType) -> Vector {
    let (x, y) = concentric_sample_disk(u1, u2);
    let z = (1.0 - x * x - y * y).max(0.0).sqrt();
    Vector::new(x, y, z)
}

/// One sampled scattering direction with its spectral value and density,
/// expressed in the local shading frame.
#[derive(Copy, Clone, Debug)]
pub struct BxdfSample {
    pub f: Spectrum,
    pub wi: Vector,
    pub pdf: FloatType,
}

impl BxdfSample {
    /// The empty sample: black value, zero density. Callers skip it.
    pub fn zero() -> BxdfSample {
        BxdfSample {
            f: Spectrum::black(),
            wi: Vector::default(),
            pdf: 0.0,
        }
    }
}

/// One analytic scattering lobe. Directions are in the local shading frame
/// (normal along +z); the composite `Bsdf` handles world-space conversion.
pub trait Bxdf {
    /// Type flags, fixed at construction.
    fn bxdf_type(&self) -> BxdfType;

    fn matches_flags(&self, flags: BxdfType) -> bool {
        self.bxdf_type().matches(flags)
    }

    /// Scattering value for a fixed outgoing/incoming direction pair.
    /// Zero-measure lobes (ideal specular) return black here.
    fn f(&self, wo: Vector, wi: Vector) -> Spectrum;

    /// Importance-sample an incoming direction for the given outgoing one.
    /// This is the only way to evaluate lobes whose `f` is zero-measure.
    fn sample_f(&self, wo: Vector, u1: FloatType, u2: FloatType) -> BxdfSample;
}

pub const MAX_BXDFS: usize = 8;

/// Per-point composite of scattering lobes sharing one shading frame.
///
/// Lobes are borrowed from the material that owns them; the composite is
/// built per intersection and never outlives the evaluation call.
pub struct Bsdf<'a> {
    /// Shading normal.
    pub nn: Normal,
    /// Geometric normal, used to classify a direction pair as reflection
    /// or transmission.
    pub ng: Normal,
    sn: Vector,
    tn: Vector,
    bxdfs: ArrayVec<&'a dyn Bxdf, MAX_BXDFS>,
}

impl<'a> Bsdf<'a> {
    pub fn new(dg: &DifferentialGeometry<'_>, ng: Normal) -> Bsdf<'a> {
        let nn = dg.nn;
        let sn = dg.dpdu.normalize();
        let tn = cross(Vector::from(nn), sn);
        Bsdf {
            nn,
            ng,
            sn,
            tn,
            bxdfs: ArrayVec::new(),
        }
    }

    pub fn add(&mut self, bxdf: &'a dyn Bxdf) {
        self.bxdfs.push(bxdf);
    }

    pub fn num_components(&self) -> usize {
        self.bxdfs.len()
    }

    pub fn num_components_matching(&self, flags: BxdfType) -> usize {
        self.bxdfs.iter().filter(|b| b.matches_flags(flags)).count()
    }

    pub fn world_to_local(&self, v: Vector) -> Vector {
        Vector::new(v.dot(self.sn), v.dot(self.tn), v.dot(self.nn))
    }

    pub fn local_to_world(&self, v: Vector) -> Vector {
        Vector::new(
            self.sn.x * v.x + self.tn.x * v.y + self.nn.x * v.z,
            self.sn.y * v.x + self.tn.y * v.y + self.nn.y * v.z,
            self.sn.z * v.x + self.tn.z * v.y + self.nn.z * v.z,
        )
    }

    /// Sums the matching lobes for a world-space direction pair. The pair is
    /// classified against the geometric normal first, so reflection lobes
    /// never leak into transmission queries and vice versa.
    pub fn f(&self, wo_w: Vector, wi_w: Vector, flags: BxdfType) -> Spectrum {
        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);
        let flags = if wi_w.dot(self.ng) * wo_w.dot(self.ng) > 0.0 {
            flags & !BxdfType::TRANSMISSION
        } else {
            flags & !BxdfType::REFLECTION
        };
        let mut f = Spectrum::black();
        for bxdf in &self.bxdfs {
            if bxdf.matches_flags(flags) {
                f += bxdf.f(wo, wi);
            }
        }
        f
    }

    /// Samples the first lobe matching `flags`, returning the sample in
    /// world space together with the lobe's type. `None` when no lobe
    /// matches or the sampled density is zero — an expected outcome, not an
    /// error.
    pub fn sample_f(
        &self,
        wo_w: Vector,
        u1: FloatType,
        u2: FloatType,
        flags: BxdfType,
    ) -> Option<(BxdfSample, BxdfType)> {
        let bxdf = self.bxdfs.iter().find(|b| b.matches_flags(flags))?;
        let wo = self.world_to_local(wo_w);
        let mut sample = bxdf.sample_f(wo, u1, u2);
        if sample.pdf == 0.0 {
            return None;
        }
        sample.wi = self.local_to_world(sample.wi);
        Some((sample, bxdf.bxdf_type()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::lobes::Lambertian;
    use crate::geometry::{INV_PI, Point};
    use assert2::assert;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(BxdfType::REFLECTION | BxdfType::DIFFUSE)]
    #[test_case(BxdfType::REFLECTION | BxdfType::SPECULAR)]
    #[test_case(BxdfType::TRANSMISSION | BxdfType::SPECULAR)]
    #[test_case(BxdfType::TRANSMISSION | BxdfType::GLOSSY)]
    fn matches_is_reflexive_and_all_absorbs(ty: BxdfType) {
        assert!(ty.matches(ty));
        assert!(ty.matches(BxdfType::ALL));
    }

    #[test]
    fn matching_is_subset_inclusion_not_intersection() {
        let lobe = BxdfType::REFLECTION | BxdfType::DIFFUSE;
        // Shares the reflection bit but not diffuse: an intersection test
        // would wrongly accept this.
        assert!(!lobe.matches(BxdfType::REFLECTION | BxdfType::SPECULAR));
        assert!(!lobe.matches(BxdfType::DIFFUSE));
        assert!(lobe.matches(BxdfType::ALL_REFLECTION));
        assert!(!lobe.matches(BxdfType::ALL_TRANSMISSION));
    }

    fn flat_dg<'a>() -> DifferentialGeometry<'a> {
        DifferentialGeometry::new(
            Point::origin(),
            Vector::new(1.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
            Normal::default(),
            Normal::default(),
            0.0,
            0.0,
            None,
        )
    }

    #[test]
    fn frame_round_trips_directions() {
        let dg = flat_dg();
        let bsdf = Bsdf::new(&dg, dg.nn);
        let w = Vector::new(0.3, -0.4, 0.866).normalize();
        let back = bsdf.local_to_world(bsdf.world_to_local(w));
        assert!((back - w).length() < 1e-5);
    }

    #[test]
    fn aggregate_f_sums_matching_components() {
        let dg = flat_dg();
        let a = Lambertian::new(Spectrum::new(0.3));
        let b = Lambertian::new(Spectrum::new(0.5));
        let mut bsdf = Bsdf::new(&dg, dg.nn);
        bsdf.add(&a);
        bsdf.add(&b);

        let wo = Vector::new(0.0, 0.0, 1.0);
        let wi = Vector::new(0.0, 0.5, 0.866);
        let f = bsdf.f(wo, wi, BxdfType::ALL);
        let expected = 0.8 * INV_PI;
        assert!((f[0] - expected).abs() < 1e-5);

        // A transmission-only query skips both reflection lobes.
        assert!(bsdf.f(wo, wi, BxdfType::ALL_TRANSMISSION).is_black());
    }

    #[test]
    fn reflection_lobes_ignored_for_directions_through_the_surface() {
        let dg = flat_dg();
        let lobe = Lambertian::new(Spectrum::new(0.5));
        let mut bsdf = Bsdf::new(&dg, dg.nn);
        bsdf.add(&lobe);

        let wo = Vector::new(0.0, 0.0, 1.0);
        let below = Vector::new(0.0, 0.0, -1.0);
        assert!(bsdf.f(wo, below, BxdfType::ALL).is_black());
    }

    #[test]
    fn sample_f_respects_flags() {
        let dg = flat_dg();
        let lobe = Lambertian::new(Spectrum::new(0.5));
        let mut bsdf = Bsdf::new(&dg, dg.nn);
        bsdf.add(&lobe);

        let wo = Vector::new(0.0, 0.0, 1.0);
        assert!(
            bsdf.sample_f(wo, 0.3, 0.7, BxdfType::REFLECTION | BxdfType::SPECULAR)
                .is_none()
        );
        let (sample, ty) = bsdf.sample_f(wo, 0.3, 0.7, BxdfType::ALL).unwrap();
        assert!(ty == (BxdfType::REFLECTION | BxdfType::DIFFUSE));
        assert!(sample.pdf > 0.0);
        assert!(!sample.f.is_black());
    }

    proptest! {
        #[test]
        fn cosine_hemisphere_stays_above_with_cosine_pdf(
            u1 in 0.0f32..1.0,
            u2 in 0.0f32..1.0,
        ) {
            let w = cosine_sample_hemisphere(u1, u2);
            prop_assert!(w.z >= 0.0);
            prop_assert!((w.length() - 1.0).abs() < 1e-3);
        }
    }
}
