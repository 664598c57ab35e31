use rand::{Rng, RngCore};

use crate::Spectrum;
use crate::geometry::{FloatType, Point, Ray, RayDifferential, Vector, distance, distance_squared};
use crate::renderer::{Renderer, Sample};
use crate::scene::Scene;

/// Uniform random numbers driving one light sample, drawn from the
/// caller's per-evaluation RNG stream.
#[derive(Copy, Clone, Debug)]
pub struct LightSample {
    pub u_pos: [FloatType; 2],
}

impl LightSample {
    pub fn new(rng: &mut dyn RngCore) -> LightSample {
        LightSample {
            u_pos: [rng.random(), rng.random()],
        }
    }
}

/// Result of sampling a light toward a shading point: incident radiance,
/// the direction it arrives from, its density, and the visibility test that
/// guards the contribution.
pub struct LiSample {
    pub radiance: Spectrum,
    pub wi: Vector,
    pub pdf: FloatType,
    pub visibility: VisibilityTester,
}

/// Opaque light-source capability. Sampling distributions live with the
/// light implementation, not in the transport core.
pub trait Light {
    fn sample_l(
        &self,
        p: Point,
        p_epsilon: FloatType,
        ls: LightSample,
        time: FloatType,
    ) -> LiSample;
}

/// A deferred shadow query between a shading point and a sampled light.
#[derive(Copy, Clone, Debug)]
pub struct VisibilityTester {
    ray: Ray,
}

impl VisibilityTester {
    /// Tests the segment between two points, shortened at both ends by the
    /// respective intersection epsilons.
    pub fn from_segment(
        p1: Point,
        eps1: FloatType,
        p2: Point,
        eps2: FloatType,
        time: FloatType,
    ) -> VisibilityTester {
        let dist = distance(p1, p2);
        let mut ray = Ray::new(p1, (p2 - p1) / dist, eps1);
        ray.maxt = dist * (1.0 - eps2);
        ray.time = time;
        VisibilityTester { ray }
    }

    /// Tests the open-ended ray from `p` along `w`, for directional and
    /// infinite lights.
    pub fn from_ray(p: Point, eps: FloatType, w: Vector, time: FloatType) -> VisibilityTester {
        let mut ray = Ray::new(p, w, eps);
        ray.time = time;
        VisibilityTester { ray }
    }

    pub fn unoccluded(&self, scene: &Scene) -> bool {
        !scene.intersect_p(&self.ray)
    }

    /// Fraction of light surviving along the tested path; delegates to the
    /// renderer's beam-transmittance capability.
    pub fn transmittance(
        &self,
        scene: &Scene,
        renderer: &dyn Renderer,
        sample: &Sample,
        rng: &mut dyn RngCore,
    ) -> Spectrum {
        renderer.transmittance(scene, &RayDifferential::from(self.ray), sample, rng)
    }
}

/// Isotropic point source, the simplest concrete light.
pub struct PointLight {
    p: Point,
    intensity: Spectrum,
}

impl PointLight {
    pub fn new(p: Point, intensity: Spectrum) -> PointLight {
        PointLight { p, intensity }
    }
}

impl Light for PointLight {
    fn sample_l(
        &self,
        p: Point,
        p_epsilon: FloatType,
        _ls: LightSample,
        time: FloatType,
    ) -> LiSample {
        LiSample {
            radiance: self.intensity / distance_squared(self.p, p),
            wi: (self.p - p).normalize(),
            pdf: 1.0,
            visibility: VisibilityTester::from_segment(p, p_epsilon, self.p, 0.0, time),
        }
    }
}
