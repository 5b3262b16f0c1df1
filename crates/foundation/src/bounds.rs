use crate::math::{Vec2, Vec3};

/// Axis-aligned bounding boxes
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    /// Tight bounds around `points`; `None` when empty.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = points.first()?;
        let mut out = Aabb2::new([first.x, first.y], [first.x, first.y]);
        for p in &points[1..] {
            out.min[0] = out.min[0].min(p.x);
            out.min[1] = out.min[1].min(p.y);
            out.max[0] = out.max[0].max(p.x);
            out.max[1] = out.max[1].max(p.y);
        }
        Some(out)
    }

    /// Lifts the planar box into 3D: plane x -> world x, plane y -> world z.
    pub fn extrude_y(&self, y_min: f64, y_max: f64) -> Aabb3 {
        Aabb3::new(
            [self.min[0], y_min.min(y_max), self.min[1]],
            [self.max[0], y_min.max(y_max), self.max[1]],
        )
    }
}

impl Aabb3 {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Aabb3 { min, max }
    }

    /// Slab test; returns the entry distance clamped to `t_min`.
    pub fn ray_entry(
        &self,
        origin: Vec3,
        dir: Vec3,
        mut t_min: f64,
        mut t_max: f64,
    ) -> Option<f64> {
        let o = [origin.x, origin.y, origin.z];
        let d = [dir.x, dir.y, dir.z];
        for axis in 0..3 {
            if d[axis].abs() < 1e-12 {
                if o[axis] < self.min[axis] || o[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d[axis];
            let mut t1 = (self.min[axis] - o[axis]) * inv;
            let mut t2 = (self.max[axis] - o[axis]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_max < t_min {
                return None;
            }
        }
        Some(t_min)
    }
}
