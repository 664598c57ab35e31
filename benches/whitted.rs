use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::RngCore;
use rand::rngs::SmallRng;

use lumen::bsdf::lobes::Lambertian;
use lumen::bsdf::{Bsdf, Bxdf};
use lumen::diffgeom::DifferentialGeometry;
use lumen::geometry::{BBox, Normal, Point, Ray, RayDifferential, Vector};
use lumen::light::PointLight;
use lumen::primitive::{Intersection, Primitive};
use lumen::renderer::{Renderer, Sample};
use lumen::{Scene, Spectrum, SurfaceIntegrator, WhittedIntegrator};

/// Unbounded matte plane at z = 0; every downward ray hits it.
struct Floor {
    lobe: Lambertian,
}

impl Primitive for Floor {
    fn world_bound(&self) -> BBox {
        BBox::from_points(
            Point::new(-1e6, -1e6, 0.0),
            Point::new(1e6, 1e6, 0.0),
        )
    }

    fn intersect<'a>(&'a self, ray: &mut Ray) -> Option<Intersection<'a>> {
        if ray.d.z >= 0.0 {
            return None;
        }
        let t = -ray.o.z / ray.d.z;
        if t < ray.mint || t > ray.maxt {
            return None;
        }
        ray.maxt = t;
        let p = ray.at(t);
        Some(Intersection {
            dg: DifferentialGeometry::new(
                p,
                Vector::new(1.0, 0.0, 0.0),
                Vector::new(0.0, 1.0, 0.0),
                Normal::default(),
                Normal::default(),
                p.x,
                p.y,
                None,
            ),
            ray_epsilon: 1e-3,
            primitive: self,
        })
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        let mut probe = *ray;
        self.intersect(&mut probe).is_some()
    }

    fn bsdf<'a>(&'a self, dg: &DifferentialGeometry<'a>, _ray: &RayDifferential) -> Bsdf<'a> {
        let mut bsdf = Bsdf::new(dg, dg.nn);
        bsdf.add(&self.lobe as &dyn Bxdf);
        bsdf
    }
}

struct NullRenderer;

impl Renderer for NullRenderer {
    fn li(
        &self,
        _scene: &Scene,
        _ray: &RayDifferential,
        _sample: &Sample,
        _rng: &mut dyn RngCore,
    ) -> Spectrum {
        Spectrum::black()
    }

    fn transmittance(
        &self,
        _scene: &Scene,
        _ray: &RayDifferential,
        _sample: &Sample,
        _rng: &mut dyn RngCore,
    ) -> Spectrum {
        Spectrum::new(1.0)
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let scene = Scene::new(
        Box::new(Floor {
            lobe: Lambertian::new(Spectrum::new(0.7)),
        }),
        (0..8)
            .map(|i| {
                Box::new(PointLight::new(
                    Point::new(i as f32 - 3.5, 0.0, 5.0),
                    Spectrum::new(10.0),
                )) as _
            })
            .collect(),
    );
    let integrator = WhittedIntegrator::default();
    let renderer = NullRenderer;
    let sample = Sample::default();

    c.bench_function("whitted_direct_lighting", |b| {
        let mut rng = SmallRng::seed_from_u64(42);
        b.iter(|| {
            let rd = RayDifferential::new(
                Point::new(0.0, 0.0, 2.0),
                Vector::new(0.1, 0.1, -1.0).normalize(),
                0.0,
            );
            let mut ray = rd.ray;
            let isect = scene.intersect(&mut ray).unwrap();
            integrator.li(&scene, &renderer, &rd, &isect, &sample, &mut rng)
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(100).measurement_time(Duration::from_secs(10));
    targets = criterion_benchmark
}
criterion_main!(benches);
