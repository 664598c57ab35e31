use log::{debug, trace};
use rand::RngCore;

use super::{SurfaceIntegrator, specular_reflect, specular_transmit};
use crate::Spectrum;
use crate::bsdf::BxdfType;
use crate::geometry::{RayDifferential, abs_dot};
use crate::light::LightSample;
use crate::primitive::Intersection;
use crate::renderer::{Renderer, Sample};
use crate::scene::Scene;

/// Classic Whitted estimator: emitted light, one-sample direct lighting
/// from every light in the scene, and recursive specular reflection and
/// transmission up to a fixed depth.
pub struct WhittedIntegrator {
    max_depth: u32,
}

impl WhittedIntegrator {
    pub fn new(max_depth: u32) -> WhittedIntegrator {
        debug!("whitted integrator, max specular depth {max_depth}");
        WhittedIntegrator { max_depth }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

impl Default for WhittedIntegrator {
    fn default() -> WhittedIntegrator {
        WhittedIntegrator::new(5)
    }
}

impl SurfaceIntegrator for WhittedIntegrator {
    fn li(
        &self,
        scene: &Scene,
        renderer: &dyn Renderer,
        ray: &RayDifferential,
        isect: &Intersection<'_>,
        sample: &Sample,
        rng: &mut dyn RngCore,
    ) -> Spectrum {
        let bsdf = isect.bsdf(ray);
        let p = isect.dg.p;
        let n = bsdf.nn;
        let wo = -ray.d;

        // Emitted light if the hit surface is itself a light source.
        let mut l = isect.le(wo);

        // One sample from each light, in scene order so summation is
        // deterministic for a fixed light list.
        for light in scene.lights() {
            let ls = light.sample_l(p, isect.ray_epsilon, LightSample::new(rng), ray.time);
            if ls.radiance.is_black() || ls.pdf == 0.0 {
                continue;
            }
            let f = bsdf.f(wo, ls.wi, BxdfType::ALL);
            if !f.is_black() && ls.visibility.unoccluded(scene) {
                l += f * ls.radiance
                    * abs_dot(ls.wi, n)
                    * ls.visibility.transmittance(scene, renderer, sample, rng)
                    / ls.pdf;
            }
        }

        if ray.depth + 1 <= self.max_depth {
            l += specular_reflect(ray, &bsdf, rng, isect, renderer, scene, sample);
            l += specular_transmit(ray, &bsdf, rng, isect, renderer, scene, sample);
        } else {
            trace!("specular recursion cut off at depth {}", ray.depth);
        }
        l
    }
}
