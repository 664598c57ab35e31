use nalgebra::Matrix4;
use thiserror::Error;

use super::{BBox, FloatType, Normal, Point, Ray, Vector, radians};

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,
}

/// Affine mapping with its inverse cached at construction.
///
/// The inverse is computed once and kept consistent with the forward matrix
/// through every composition; normals transform through it (inverse
/// transpose) while points and vectors use the forward matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    m: Matrix4<FloatType>,
    m_inv: Matrix4<FloatType>,
}

impl Transform {
    pub fn identity() -> Transform {
        Transform {
            m: Matrix4::identity(),
            m_inv: Matrix4::identity(),
        }
    }

    /// Fails if the matrix has no inverse.
    pub fn from_matrix(m: Matrix4<FloatType>) -> Result<Transform, TransformError> {
        let m_inv = m.try_inverse().ok_or(TransformError::SingularMatrix)?;
        Ok(Transform { m, m_inv })
    }

    /// Both matrices are trusted to be inverses of each other.
    pub fn from_parts(m: Matrix4<FloatType>, m_inv: Matrix4<FloatType>) -> Transform {
        Transform { m, m_inv }
    }

    pub fn translate(delta: Vector) -> Transform {
        Transform {
            m: Matrix4::new_translation(&nalgebra::Vector3::new(delta.x, delta.y, delta.z)),
            m_inv: Matrix4::new_translation(&nalgebra::Vector3::new(-delta.x, -delta.y, -delta.z)),
        }
    }

    pub fn scale(x: FloatType, y: FloatType, z: FloatType) -> Transform {
        assert!(x != 0.0 && y != 0.0 && z != 0.0, "scaling by zero");
        Transform {
            m: Matrix4::new_nonuniform_scaling(&nalgebra::Vector3::new(x, y, z)),
            m_inv: Matrix4::new_nonuniform_scaling(&nalgebra::Vector3::new(
                1.0 / x,
                1.0 / y,
                1.0 / z,
            )),
        }
    }

    pub fn rotate_x(angle_deg: FloatType) -> Transform {
        let (sin_t, cos_t) = radians(angle_deg).sin_cos();
        let m = Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, cos_t, -sin_t, 0.0, //
            0.0, sin_t, cos_t, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        // Rotations are orthogonal, the transpose is the inverse.
        Transform {
            m_inv: m.transpose(),
            m,
        }
    }

    pub fn rotate_y(angle_deg: FloatType) -> Transform {
        let (sin_t, cos_t) = radians(angle_deg).sin_cos();
        let m = Matrix4::new(
            cos_t, 0.0, sin_t, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -sin_t, 0.0, cos_t, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        Transform {
            m_inv: m.transpose(),
            m,
        }
    }

    pub fn rotate_z(angle_deg: FloatType) -> Transform {
        let (sin_t, cos_t) = radians(angle_deg).sin_cos();
        let m = Matrix4::new(
            cos_t, -sin_t, 0.0, 0.0, //
            sin_t, cos_t, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        Transform {
            m_inv: m.transpose(),
            m,
        }
    }

    pub fn inverse(&self) -> Transform {
        Transform {
            m: self.m_inv,
            m_inv: self.m,
        }
    }

    pub fn matrix(&self) -> &Matrix4<FloatType> {
        &self.m
    }

    /// True if applying this transform flips the coordinate handedness,
    /// i.e. the linear part has negative determinant.
    pub fn swaps_handedness(&self) -> bool {
        self.m.fixed_view::<3, 3>(0, 0).determinant() < 0.0
    }

    pub fn transform_point(&self, p: Point) -> Point {
        let (x, y, z) = (p.x, p.y, p.z);
        let m = &self.m;
        let xp = m[(0, 0)] * x + m[(0, 1)] * y + m[(0, 2)] * z + m[(0, 3)];
        let yp = m[(1, 0)] * x + m[(1, 1)] * y + m[(1, 2)] * z + m[(1, 3)];
        let zp = m[(2, 0)] * x + m[(2, 1)] * y + m[(2, 2)] * z + m[(2, 3)];
        let wp = m[(3, 0)] * x + m[(3, 1)] * y + m[(3, 2)] * z + m[(3, 3)];
        if wp == 1.0 {
            Point::new(xp, yp, zp)
        } else {
            Point::new(xp / wp, yp / wp, zp / wp)
        }
    }

    pub fn transform_vector(&self, v: Vector) -> Vector {
        let (x, y, z) = (v.x, v.y, v.z);
        let m = &self.m;
        Vector::new(
            m[(0, 0)] * x + m[(0, 1)] * y + m[(0, 2)] * z,
            m[(1, 0)] * x + m[(1, 1)] * y + m[(1, 2)] * z,
            m[(2, 0)] * x + m[(2, 1)] * y + m[(2, 2)] * z,
        )
    }

    /// Normals are covectors: they map through the transpose of the cached
    /// inverse, never through the forward matrix.
    pub fn transform_normal(&self, n: Normal) -> Normal {
        let (x, y, z) = (n.x, n.y, n.z);
        let mi = &self.m_inv;
        Normal::new(
            mi[(0, 0)] * x + mi[(1, 0)] * y + mi[(2, 0)] * z,
            mi[(0, 1)] * x + mi[(1, 1)] * y + mi[(2, 1)] * z,
            mi[(0, 2)] * x + mi[(1, 2)] * y + mi[(2, 2)] * z,
        )
    }

    pub fn transform_ray(&self, r: &Ray) -> Ray {
        Ray {
            o: self.transform_point(r.o),
            d: self.transform_vector(r.d),
            ..*r
        }
    }

    pub fn transform_bbox(&self, b: &BBox) -> BBox {
        let mut ret = BBox::from_point(self.transform_point(b.p_min));
        for i in 1..8 {
            let corner = Point::new(
                if i & 1 == 0 { b.p_min.x } else { b.p_max.x },
                if i & 2 == 0 { b.p_min.y } else { b.p_max.y },
                if i & 4 == 0 { b.p_min.z } else { b.p_max.z },
            );
            ret = ret.union_point(self.transform_point(corner));
        }
        ret
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform::identity()
    }
}

impl std::ops::Mul for &Transform {
    type Output = Transform;

    fn mul(self, t2: &Transform) -> Transform {
        Transform {
            m: self.m * t2.m,
            m_inv: t2.m_inv * self.m_inv,
        }
    }
}
