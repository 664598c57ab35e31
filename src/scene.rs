use crate::geometry::{BBox, Ray};
use crate::light::Light;
use crate::primitive::{Intersection, Primitive};

/// The world as the transport core sees it: an ordered list of lights and
/// one aggregate intersector. Read-only during evaluation, so concurrent
/// evaluation calls may share it freely.
pub struct Scene {
    aggregate: Box<dyn Primitive>,
    lights: Vec<Box<dyn Light + Send + Sync>>,
}

impl Scene {
    pub fn new(aggregate: Box<dyn Primitive>, lights: Vec<Box<dyn Light + Send + Sync>>) -> Scene {
        Scene { aggregate, lights }
    }

    /// Lights in scene-description order. Integrators must iterate in this
    /// order so summation stays deterministic for a fixed scene.
    pub fn lights(&self) -> &[Box<dyn Light + Send + Sync>] {
        &self.lights
    }

    pub fn intersect<'a>(&'a self, ray: &mut Ray) -> Option<Intersection<'a>> {
        self.aggregate.intersect(ray)
    }

    pub fn intersect_p(&self, ray: &Ray) -> bool {
        self.aggregate.intersect_p(ray)
    }

    pub fn world_bound(&self) -> BBox {
        self.aggregate.world_bound()
    }
}
