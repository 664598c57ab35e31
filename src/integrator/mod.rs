mod whitted;

pub use whitted::WhittedIntegrator;

use rand::{Rng, RngCore};

use crate::Spectrum;
use crate::bsdf::{Bsdf, BxdfType};
use crate::geometry::{RayDifferential, abs_dot};
use crate::primitive::Intersection;
use crate::renderer::{Renderer, Sample};
use crate::scene::Scene;

/// A recursive radiance estimator for one surface hit. Implementations are
/// pure functions of their inputs: no shared mutable state, re-entrant for
/// concurrent evaluation of distinct rays.
pub trait SurfaceIntegrator {
    fn li(
        &self,
        scene: &Scene,
        renderer: &dyn Renderer,
        ray: &RayDifferential,
        isect: &Intersection<'_>,
        sample: &Sample,
        rng: &mut dyn RngCore,
    ) -> Spectrum;
}

/// Traces the specular-reflection contribution at a hit: samples the
/// mirror lobe, spawns a child ray one recursion level deeper and weights
/// the recursive estimate by `f · |cos θ| / pdf`.
pub fn specular_reflect(
    ray: &RayDifferential,
    bsdf: &Bsdf<'_>,
    rng: &mut dyn RngCore,
    isect: &Intersection<'_>,
    renderer: &dyn Renderer,
    scene: &Scene,
    sample: &Sample,
) -> Spectrum {
    trace_specular(
        ray,
        bsdf,
        rng,
        isect,
        renderer,
        scene,
        sample,
        BxdfType::REFLECTION | BxdfType::SPECULAR,
    )
}

/// Same as [`specular_reflect`] for the specular-transmission lobe.
pub fn specular_transmit(
    ray: &RayDifferential,
    bsdf: &Bsdf<'_>,
    rng: &mut dyn RngCore,
    isect: &Intersection<'_>,
    renderer: &dyn Renderer,
    scene: &Scene,
    sample: &Sample,
) -> Spectrum {
    trace_specular(
        ray,
        bsdf,
        rng,
        isect,
        renderer,
        scene,
        sample,
        BxdfType::TRANSMISSION | BxdfType::SPECULAR,
    )
}

#[allow(clippy::too_many_arguments)]
fn trace_specular(
    ray: &RayDifferential,
    bsdf: &Bsdf<'_>,
    rng: &mut dyn RngCore,
    isect: &Intersection<'_>,
    renderer: &dyn Renderer,
    scene: &Scene,
    sample: &Sample,
    flags: BxdfType,
) -> Spectrum {
    let wo = -ray.d;
    let Some((s, _sampled_type)) = bsdf.sample_f(wo, rng.random(), rng.random(), flags) else {
        return Spectrum::black();
    };
    let cos = abs_dot(s.wi, bsdf.nn);
    if s.f.is_black() || cos == 0.0 {
        return Spectrum::black();
    }

    // Child rays do not carry differentials; footprint propagation through
    // specular bounces belongs to the texture-filtering layer.
    let child = RayDifferential::spawned(isect.dg.p, s.wi, &ray.ray, isect.ray_epsilon);
    let li = renderer.li(scene, &child, sample, rng);
    s.f * li * cos / s.pdf
}
