pub mod bsdf;
pub mod diffgeom;
pub mod geometry;
pub mod integrator;
pub mod light;
pub mod primitive;
pub mod renderer;
pub mod scene;
pub mod spectrum;

/// Crate-wide spectral radiance representation, selected at build time.
#[cfg(not(feature = "sampled-spectrum"))]
pub type Spectrum = spectrum::RgbSpectrum;
#[cfg(feature = "sampled-spectrum")]
pub type Spectrum = spectrum::SampledSpectrum;

pub use crate::integrator::{SurfaceIntegrator, WhittedIntegrator};
pub use crate::scene::Scene;
