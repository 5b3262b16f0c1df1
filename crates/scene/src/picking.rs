use foundation::math::precision::stable_total_cmp_f64;
use foundation::math::{Vec2, Vec3, ring_contains};

use crate::entity::RegionId;
use crate::region::{Footprint, Region};
use crate::registry::RegionRegistry;

const PARALLEL_EPS: f64 = 1e-12;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// Straight down from `origin`.
    pub fn down_from(origin: Vec3) -> Self {
        Self::new(origin, Vec3::DOWN)
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub region: RegionId,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Deterministic ray picking against extruded region footprints.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - If multiple regions are hit at the same distance, the lower `RegionId` wins.
///
/// Notes:
/// - Each region is tested as a vertical prism at its *current* extrusion.
/// - A ray starting inside a prism hits it at distance 0.
/// - An empty registry, or a zero-length direction, yields `None`.
pub fn pick_ray(registry: &RegionRegistry, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;
    let ray = Ray::new(ray.origin, dir);

    let mut best: Option<(f64, RegionId)> = None;
    for region in registry.iter() {
        let Some(t) = region_hit_t(region, ray, opts.max_distance) else {
            continue;
        };
        best = match best {
            None => Some((t, region.id())),
            Some((bt, be)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| region.id().cmp(&be));
                if ord.is_lt() {
                    Some((t, region.id()))
                } else {
                    Some((bt, be))
                }
            }
        };
    }

    let (t, region) = best?;
    Some(PickHit {
        region,
        distance: t,
        point: ray.at(t),
    })
}

/// Casts the hover ray: straight down from `viewpoint`.
pub fn pick_below(registry: &RegionRegistry, viewpoint: Vec3) -> Option<PickHit> {
    pick_ray(registry, Ray::down_from(viewpoint), PickOptions::default())
}

fn region_hit_t(region: &Region, ray: Ray, max_distance: f64) -> Option<f64> {
    let bounds = region.footprint().bounds_3d(region.scale_z());
    bounds.ray_entry(ray.origin, ray.dir, 0.0, max_distance)?;
    prism_hit_t(region.footprint(), region.scale_z(), ray)
        .filter(|t| *t <= max_distance)
}

/// Nearest non-negative hit of a normalized ray with the footprint prism.
fn prism_hit_t(footprint: &Footprint, scale_z: f64, ray: Ray) -> Option<f64> {
    let ring = footprint.ring();
    let (lo, hi) = {
        let a = footprint.base_y;
        let b = footprint.top_y(scale_z);
        (a.min(b), a.max(b))
    };
    let o = ray.origin;
    let d = ray.dir;

    if o.y >= lo && o.y <= hi && ring_contains(ring, o.xz()) {
        return Some(0.0);
    }

    let mut best = f64::INFINITY;

    // Caps.
    if d.y.abs() > PARALLEL_EPS {
        for cap_y in [lo, hi] {
            let t = (cap_y - o.y) / d.y;
            if t >= 0.0 && t < best && ring_contains(ring, ray.at(t).xz()) {
                best = t;
            }
        }
    }

    // Side walls.
    let o2 = o.xz();
    let d2 = d.xz();
    if d2.x.abs() > PARALLEL_EPS || d2.y.abs() > PARALLEL_EPS {
        for (i, a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            let Some(t) = wall_hit_t(o2, d2, *a, b) else {
                continue;
            };
            let y = o.y + d.y * t;
            if t < best && y >= lo && y <= hi {
                best = t;
            }
        }
    }

    best.is_finite().then_some(best)
}

/// Planar ray/segment intersection; `t` is measured along the 3D ray.
fn wall_hit_t(o: Vec2, d: Vec2, a: Vec2, b: Vec2) -> Option<f64> {
    let edge = b - a;
    let denom = d.perp_dot(edge);
    if denom.abs() < PARALLEL_EPS {
        return None;
    }
    let w = a - o;
    let t = w.perp_dot(edge) / denom;
    let s = w.perp_dot(d) / denom;
    (t >= 0.0 && (0.0..=1.0).contains(&s)).then_some(t)
}
