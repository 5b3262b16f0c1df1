use foundation::math::Vec2;

/// Maps (lon, lat) degrees onto the world ground plane.
///
/// The plane is world x/z with y up. Longitude grows toward +x and latitude
/// toward -z, both multiplied by `scale`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GroundProjection {
    pub scale: f64,
}

impl Default for GroundProjection {
    fn default() -> Self {
        Self { scale: 15.0 }
    }
}

impl GroundProjection {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Vec2 {
        Vec2::new(lon_deg * self.scale, -lat_deg * self.scale)
    }

    /// Inverse of `project`; `None` for a degenerate scale.
    pub fn unproject(&self, plane: Vec2) -> Option<(f64, f64)> {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return None;
        }
        Some((plane.x / self.scale, -plane.y / self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::GroundProjection;
    use foundation::math::Vec2;

    #[test]
    fn project_flips_latitude_and_scales() {
        let p = GroundProjection::new(15.0);
        assert_eq!(p.project(2.0, 1.0), Vec2::new(30.0, -15.0));
        assert_eq!(p.unproject(Vec2::new(30.0, -15.0)), Some((2.0, 1.0)));
        assert_eq!(GroundProjection::new(0.0).unproject(Vec2::new(1.0, 1.0)), None);
    }
}
