use rand::RngCore;

use crate::Spectrum;
use crate::geometry::{FloatType, RayDifferential};
use crate::scene::Scene;

/// Per-evaluation sample data handed down from the sampler layer. The
/// transport core only reads the time; a real sampler widens this carrier.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sample {
    pub time: FloatType,
}

/// Opaque ray-tracing capability. Surface integrators hand their child
/// specular rays back to the renderer, which owns camera-ray generation
/// and the outer evaluation loop.
pub trait Renderer {
    /// Radiance arriving along `ray`.
    fn li(
        &self,
        scene: &Scene,
        ray: &RayDifferential,
        sample: &Sample,
        rng: &mut dyn RngCore,
    ) -> Spectrum;

    /// Beam transmittance along `ray`, 1 in a vacuum.
    fn transmittance(
        &self,
        scene: &Scene,
        ray: &RayDifferential,
        sample: &Sample,
        rng: &mut dyn RngCore,
    ) -> Spectrum;
}
