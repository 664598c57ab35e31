use crate::geometry::{FloatType, lerp};

/// Wavelength range covered by the sampled spectrum, in nanometres.
pub const SAMPLED_LAMBDA_START: u32 = 400;
pub const SAMPLED_LAMBDA_END: u32 = 700;
pub const N_SPECTRAL_SAMPLES: usize = 30;

/// A sampled power or reflectance distribution stored as a fixed-length
/// coefficient vector with componentwise arithmetic.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoefficientSpectrum<const N: usize> {
    c: [FloatType; N],
}

impl<const N: usize> CoefficientSpectrum<N> {
    /// Constant spectrum with every coefficient set to `v`.
    pub fn new(v: FloatType) -> Self {
        CoefficientSpectrum { c: [v; N] }
    }

    pub fn black() -> Self {
        Self::new(0.0)
    }

    pub fn from_coefficients(c: [FloatType; N]) -> Self {
        CoefficientSpectrum { c }
    }

    /// True iff every coefficient is exactly zero. Used as a fast reject
    /// before shading work.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&x| x == 0.0)
    }

    /// Scans every coefficient, reporting true on the first non-finite one.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|x| x.is_nan())
    }

    pub fn sqrt(&self) -> Self {
        let mut ret = *self;
        for x in &mut ret.c {
            *x = x.sqrt();
        }
        ret
    }

    pub fn clamp(&self, low: FloatType, high: FloatType) -> Self {
        let mut ret = *self;
        for x in &mut ret.c {
            *x = x.clamp(low, high);
        }
        ret
    }

    /// Clamp to the default [0, +inf) range.
    pub fn clamp_positive(&self) -> Self {
        self.clamp(0.0, FloatType::INFINITY)
    }

    /// `(1 − t)·s1 + t·s2`; for t in [0, 1] each coefficient lies between
    /// the two inputs.
    pub fn lerp(t: FloatType, s1: &Self, s2: &Self) -> Self {
        let mut ret = *s1;
        for (r, (&a, &b)) in ret.c.iter_mut().zip(s1.c.iter().zip(s2.c.iter())) {
            *r = lerp(t, a, b);
        }
        ret
    }
}

impl<const N: usize> Default for CoefficientSpectrum<N> {
    fn default() -> Self {
        Self::black()
    }
}

impl<const N: usize> std::ops::Index<usize> for CoefficientSpectrum<N> {
    type Output = FloatType;
    fn index(&self, i: usize) -> &FloatType {
        &self.c[i]
    }
}

impl<const N: usize> std::ops::Add for CoefficientSpectrum<N> {
    type Output = Self;
    fn add(mut self, s2: Self) -> Self {
        self += s2;
        self
    }
}

impl<const N: usize> std::ops::AddAssign for CoefficientSpectrum<N> {
    fn add_assign(&mut self, s2: Self) {
        for (x, y) in self.c.iter_mut().zip(s2.c.iter()) {
            *x += y;
        }
        debug_assert!(!self.has_nans());
    }
}

impl<const N: usize> std::ops::Sub for CoefficientSpectrum<N> {
    type Output = Self;
    fn sub(mut self, s2: Self) -> Self {
        self -= s2;
        self
    }
}

impl<const N: usize> std::ops::SubAssign for CoefficientSpectrum<N> {
    fn sub_assign(&mut self, s2: Self) {
        for (x, y) in self.c.iter_mut().zip(s2.c.iter()) {
            *x -= y;
        }
        debug_assert!(!self.has_nans());
    }
}

impl<const N: usize> std::ops::Mul for CoefficientSpectrum<N> {
    type Output = Self;
    fn mul(mut self, s2: Self) -> Self {
        self *= s2;
        self
    }
}

impl<const N: usize> std::ops::MulAssign for CoefficientSpectrum<N> {
    fn mul_assign(&mut self, s2: Self) {
        for (x, y) in self.c.iter_mut().zip(s2.c.iter()) {
            *x *= y;
        }
        debug_assert!(!self.has_nans());
    }
}

impl<const N: usize> std::ops::Div for CoefficientSpectrum<N> {
    type Output = Self;
    fn div(mut self, s2: Self) -> Self {
        for (x, y) in self.c.iter_mut().zip(s2.c.iter()) {
            debug_assert!(*y != 0.0, "dividing a spectrum by a zero coefficient");
            *x /= y;
        }
        debug_assert!(!self.has_nans());
        self
    }
}

impl<const N: usize> std::ops::Mul<FloatType> for CoefficientSpectrum<N> {
    type Output = Self;
    fn mul(mut self, f: FloatType) -> Self {
        for x in &mut self.c {
            *x *= f;
        }
        debug_assert!(!self.has_nans());
        self
    }
}

impl<const N: usize> std::ops::Mul<CoefficientSpectrum<N>> for FloatType {
    type Output = CoefficientSpectrum<N>;
    fn mul(self, s: CoefficientSpectrum<N>) -> CoefficientSpectrum<N> {
        s * self
    }
}

impl<const N: usize> std::ops::Div<FloatType> for CoefficientSpectrum<N> {
    type Output = Self;
    fn div(mut self, f: FloatType) -> Self {
        assert!(f != 0.0, "dividing a spectrum by zero");
        let inv = 1.0 / f;
        for x in &mut self.c {
            *x *= inv;
        }
        self
    }
}

/// Coefficient spectrum over the usual three display primaries.
pub type RgbSpectrum = CoefficientSpectrum<3>;

impl RgbSpectrum {
    pub fn from_rgb(r: FloatType, g: FloatType, b: FloatType) -> RgbSpectrum {
        RgbSpectrum::from_coefficients([r, g, b])
    }

    pub fn to_rgb(&self) -> [FloatType; 3] {
        [self[0], self[1], self[2]]
    }

    /// CIE luminance of the rgb triple.
    pub fn y(&self) -> FloatType {
        0.212_671 * self[0] + 0.715_160 * self[1] + 0.072_169 * self[2]
    }
}

/// Coefficient spectrum sampled uniformly across the visible range.
pub type SampledSpectrum = CoefficientSpectrum<N_SPECTRAL_SAMPLES>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test::simple_float;
    use assert2::assert;
    use proptest::prelude::*;

    fn spectrum_strategy() -> BoxedStrategy<RgbSpectrum> {
        (simple_float(), simple_float(), simple_float())
            .prop_map(|(r, g, b)| RgbSpectrum::from_rgb(r, g, b))
            .boxed()
    }

    proptest! {
        #[test]
        fn lerp_stays_between_inputs(
            s1 in spectrum_strategy(),
            s2 in spectrum_strategy(),
            t in 0.0f32..=1.0,
        ) {
            let l = RgbSpectrum::lerp(t, &s1, &s2);
            for i in 0..3 {
                let lo = s1[i].min(s2[i]);
                let hi = s1[i].max(s2[i]);
                let slack = 1e-4 * (1.0 + hi.abs() + lo.abs());
                prop_assert!(l[i] >= lo - slack && l[i] <= hi + slack);
            }
        }

        #[test]
        fn clamp_positive_never_goes_negative(s in spectrum_strategy()) {
            let c = s.clamp_positive();
            for i in 0..3 {
                prop_assert!(c[i] >= 0.0);
            }
        }
    }

    #[test]
    fn black_iff_all_coefficients_zero() {
        assert!(RgbSpectrum::black().is_black());
        assert!(RgbSpectrum::new(0.0).is_black());
        assert!(!RgbSpectrum::from_rgb(0.0, 1e-9, 0.0).is_black());
        assert!(!RgbSpectrum::new(1e-30).is_black());
    }

    #[test]
    fn has_nans_checks_every_coefficient() {
        // A NaN in the last slot must not slip through.
        assert!(RgbSpectrum::from_rgb(1.0, 1.0, FloatType::NAN).has_nans());
        assert!(RgbSpectrum::from_rgb(FloatType::NAN, 1.0, 1.0).has_nans());
        assert!(!RgbSpectrum::from_rgb(0.0, 1.0, 2.0).has_nans());
    }

    #[test]
    fn componentwise_arithmetic() {
        let a = RgbSpectrum::from_rgb(1.0, 2.0, 3.0);
        let b = RgbSpectrum::from_rgb(4.0, 5.0, 6.0);
        assert!((a + b).to_rgb() == [5.0, 7.0, 9.0]);
        assert!((b - a).to_rgb() == [3.0, 3.0, 3.0]);
        assert!((a * b).to_rgb() == [4.0, 10.0, 18.0]);
        assert!((b / a).to_rgb() == [4.0, 2.5, 2.0]);
        assert!((a * 2.0).to_rgb() == [2.0, 4.0, 6.0]);
        assert!((2.0 * a).to_rgb() == [2.0, 4.0, 6.0]);
        assert!((a / 2.0).to_rgb() == [0.5, 1.0, 1.5]);
    }

    #[test]
    fn sqrt_is_componentwise() {
        let s = RgbSpectrum::from_rgb(4.0, 9.0, 0.25);
        assert!(s.sqrt().to_rgb() == [2.0, 3.0, 0.5]);
    }

    #[test]
    fn clamp_bounds_both_sides() {
        let s = RgbSpectrum::from_rgb(-1.0, 0.5, 2.0);
        assert!(s.clamp(0.0, 1.0).to_rgb() == [0.0, 0.5, 1.0]);
        assert!(s.clamp_positive().to_rgb() == [0.0, 0.5, 2.0]);
    }

    #[test]
    fn sampled_spectrum_has_thirty_buckets() {
        let s = SampledSpectrum::new(0.5);
        assert!(!s.is_black());
        assert!(s[N_SPECTRAL_SAMPLES - 1] == 0.5);
    }
}
