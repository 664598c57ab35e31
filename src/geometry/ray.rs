use super::{FloatType, Point, Vector};

/// Parametric line segment `o + t·d` for t in [mint, maxt].
///
/// `depth` counts how many specular bounces led to this ray; integrators use
/// it to bound their recursion.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub o: Point,
    pub d: Vector,
    pub mint: FloatType,
    pub maxt: FloatType,
    pub time: FloatType,
    pub depth: u32,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector, mint: FloatType) -> Ray {
        Ray {
            o: origin,
            d: direction,
            mint,
            maxt: FloatType::INFINITY,
            time: 0.0,
            depth: 0,
        }
    }

    /// A child ray inheriting time from its parent, one recursion level
    /// deeper.
    pub fn spawned(origin: Point, direction: Vector, parent: &Ray, mint: FloatType) -> Ray {
        Ray {
            o: origin,
            d: direction,
            mint,
            maxt: FloatType::INFINITY,
            time: parent.time,
            depth: parent.depth + 1,
        }
    }

    pub fn at(&self, t: FloatType) -> Point {
        self.o + self.d * t
    }
}

impl Default for Ray {
    fn default() -> Ray {
        Ray {
            o: Point::origin(),
            d: Vector::default(),
            mint: 0.0,
            maxt: FloatType::INFINITY,
            time: 0.0,
            depth: 0,
        }
    }
}

/// A Ray plus two auxiliary rays offset one sample apart in screen space,
/// used downstream to estimate the surface footprint of a ray.
///
/// The auxiliaries are only meaningful while `has_differentials` is set.
#[derive(Copy, Clone, Debug)]
pub struct RayDifferential {
    pub ray: Ray,
    pub has_differentials: bool,
    pub rx_origin: Point,
    pub ry_origin: Point,
    pub rx_direction: Vector,
    pub ry_direction: Vector,
}

impl RayDifferential {
    pub fn new(origin: Point, direction: Vector, mint: FloatType) -> RayDifferential {
        Ray::new(origin, direction, mint).into()
    }

    pub fn spawned(
        origin: Point,
        direction: Vector,
        parent: &Ray,
        mint: FloatType,
    ) -> RayDifferential {
        Ray::spawned(origin, direction, parent, mint).into()
    }

    /// Adjusts the auxiliary rays for the actual sample spacing; camera rays
    /// assume one-pixel spacing.
    pub fn scale_differentials(&mut self, s: FloatType) {
        self.rx_origin = self.ray.o + (self.rx_origin - self.ray.o) * s;
        self.ry_origin = self.ray.o + (self.ry_origin - self.ray.o) * s;
        self.rx_direction = self.ray.d + (self.rx_direction - self.ray.d) * s;
        self.ry_direction = self.ray.d + (self.ry_direction - self.ray.d) * s;
    }
}

impl From<Ray> for RayDifferential {
    fn from(ray: Ray) -> RayDifferential {
        RayDifferential {
            ray,
            has_differentials: false,
            rx_origin: Point::origin(),
            ry_origin: Point::origin(),
            rx_direction: Vector::default(),
            ry_direction: Vector::default(),
        }
    }
}

impl std::ops::Deref for RayDifferential {
    type Target = Ray;
    fn deref(&self) -> &Ray {
        &self.ray
    }
}

impl std::ops::DerefMut for RayDifferential {
    fn deref_mut(&mut self) -> &mut Ray {
        &mut self.ray
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn at_walks_along_the_direction() {
        let ray = Ray::new(Point::new(1.0, 2.0, 3.0), Vector::new(0.0, 0.0, 2.0), 0.0);
        assert!(ray.at(0.0) == Point::new(1.0, 2.0, 3.0));
        assert!(ray.at(1.5) == Point::new(1.0, 2.0, 6.0));
    }

    #[test]
    fn spawned_ray_inherits_time_and_increments_depth() {
        let mut parent = Ray::new(Point::origin(), Vector::new(1.0, 0.0, 0.0), 0.0);
        parent.time = 0.25;
        parent.depth = 3;

        let child = Ray::spawned(Point::new(1.0, 0.0, 0.0), Vector::new(0.0, 1.0, 0.0), &parent, 1e-3);
        assert!(child.depth == 4);
        assert!(child.time == 0.25);
        assert!(child.mint == 1e-3);
        assert!(child.maxt == FloatType::INFINITY);
    }

    #[test]
    fn scale_differentials_moves_auxiliaries_relative_to_primary() {
        let mut rd = RayDifferential::new(Point::origin(), Vector::new(0.0, 0.0, 1.0), 0.0);
        rd.has_differentials = true;
        rd.rx_origin = Point::new(1.0, 0.0, 0.0);
        rd.ry_origin = Point::new(0.0, 1.0, 0.0);
        rd.rx_direction = Vector::new(0.1, 0.0, 1.0);
        rd.ry_direction = Vector::new(0.0, 0.1, 1.0);

        rd.scale_differentials(0.5);

        assert!(rd.ray.o == Point::origin());
        assert!(rd.ray.d == Vector::new(0.0, 0.0, 1.0));
        assert!(rd.rx_origin == Point::new(0.5, 0.0, 0.0));
        assert!(rd.ry_origin == Point::new(0.0, 0.5, 0.0));
        assert!((rd.rx_direction - Vector::new(0.05, 0.0, 1.0)).length() < 1e-6);
        assert!((rd.ry_direction - Vector::new(0.0, 0.05, 1.0)).length() < 1e-6);
    }
}
