use super::{Bxdf, BxdfSample, BxdfType, abs_cos_theta, cos_theta, cosine_sample_hemisphere};
use crate::Spectrum;
use crate::geometry::{FloatType, INV_PI, Vector};

/// Ideal diffuse reflection: scatters incident light equally in all
/// directions of the upper hemisphere.
pub struct Lambertian {
    r: Spectrum,
}

impl Lambertian {
    /// `r` is the total reflectance over the hemisphere.
    pub fn new(r: Spectrum) -> Lambertian {
        Lambertian { r }
    }
}

impl Bxdf for Lambertian {
    fn bxdf_type(&self) -> BxdfType {
        BxdfType::REFLECTION | BxdfType::DIFFUSE
    }

    fn f(&self, _wo: Vector, _wi: Vector) -> Spectrum {
        self.r * INV_PI
    }

    fn sample_f(&self, wo: Vector, u1: FloatType, u2: FloatType) -> BxdfSample {
        let mut wi = cosine_sample_hemisphere(u1, u2);
        // Stay in the hemisphere of wo.
        if wo.z < 0.0 {
            wi.z = -wi.z;
        }
        BxdfSample {
            f: self.f(wo, wi),
            wi,
            pdf: abs_cos_theta(wi) * INV_PI,
        }
    }
}

/// Ideal mirror reflection. `f` is zero-measure, so the lobe is only
/// reachable through `sample_f`.
pub struct SpecularReflection {
    r: Spectrum,
}

impl SpecularReflection {
    pub fn new(r: Spectrum) -> SpecularReflection {
        SpecularReflection { r }
    }
}

impl Bxdf for SpecularReflection {
    fn bxdf_type(&self) -> BxdfType {
        BxdfType::REFLECTION | BxdfType::SPECULAR
    }

    fn f(&self, _wo: Vector, _wi: Vector) -> Spectrum {
        Spectrum::black()
    }

    fn sample_f(&self, wo: Vector, _u1: FloatType, _u2: FloatType) -> BxdfSample {
        let wi = Vector::new(-wo.x, -wo.y, wo.z);
        if wi.z == 0.0 {
            // Grazing direction, the 1/|cos| weight would blow up.
            return BxdfSample::zero();
        }
        BxdfSample {
            f: self.r / abs_cos_theta(wi),
            wi,
            pdf: 1.0,
        }
    }
}

/// Ideal refraction through a smooth dielectric boundary, with total
/// internal reflection handled as an empty sample.
pub struct SpecularTransmission {
    t: Spectrum,
    eta_i: FloatType,
    eta_t: FloatType,
}

impl SpecularTransmission {
    /// `eta_i`/`eta_t` are the refraction indices outside and inside the
    /// surface.
    pub fn new(t: Spectrum, eta_i: FloatType, eta_t: FloatType) -> SpecularTransmission {
        SpecularTransmission { t, eta_i, eta_t }
    }
}

impl Bxdf for SpecularTransmission {
    fn bxdf_type(&self) -> BxdfType {
        BxdfType::TRANSMISSION | BxdfType::SPECULAR
    }

    fn f(&self, _wo: Vector, _wi: Vector) -> Spectrum {
        Spectrum::black()
    }

    fn sample_f(&self, wo: Vector, _u1: FloatType, _u2: FloatType) -> BxdfSample {
        let entering = cos_theta(wo) > 0.0;
        let (ei, et) = if entering {
            (self.eta_i, self.eta_t)
        } else {
            (self.eta_t, self.eta_i)
        };

        // Snell's law in the local frame.
        let sini2 = (1.0 - cos_theta(wo) * cos_theta(wo)).max(0.0);
        let eta = ei / et;
        let sint2 = eta * eta * sini2;
        if sint2 >= 1.0 {
            // Total internal reflection.
            return BxdfSample::zero();
        }
        let cost = if entering {
            -(1.0 - sint2).max(0.0).sqrt()
        } else {
            (1.0 - sint2).max(0.0).sqrt()
        };
        let wi = Vector::new(eta * -wo.x, eta * -wo.y, cost);
        if wi.z == 0.0 {
            return BxdfSample::zero();
        }
        BxdfSample {
            f: (ei * ei) / (et * et) * self.t / abs_cos_theta(wi),
            wi,
            pdf: 1.0,
        }
    }
}
