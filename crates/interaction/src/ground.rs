use crate::config::GroundConfig;

/// Keeps the viewpoint hovering a fixed height above whatever lies below it.
#[derive(Debug, Copy, Clone)]
pub struct GroundFollow {
    config: GroundConfig,
}

impl GroundFollow {
    pub fn new(config: GroundConfig) -> Self {
        Self { config }
    }

    pub fn target_height(&self, surface_y: Option<f64>) -> f64 {
        match surface_y {
            Some(y) => y + self.config.eye_height,
            None => self.config.floor_height + self.config.floor_clearance,
        }
    }

    /// Falls toward the target at `gravity`, never below it; rises instantly.
    pub fn settle(&self, viewpoint_y: f64, surface_y: Option<f64>, dt_s: f64) -> f64 {
        let target = self.target_height(surface_y);
        if viewpoint_y > target {
            let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
            (viewpoint_y - self.config.gravity * dt_s).max(target)
        } else {
            target
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_target_without_surface() {
        let ground = GroundFollow::new(GroundConfig::default());
        assert_eq!(ground.target_height(None), 20.5);
        assert_eq!(ground.settle(10.0, None, 0.1), 20.5);
    }

    #[test]
    fn falls_without_passing_target() {
        let ground = GroundFollow::new(GroundConfig::default());
        let y = ground.settle(30.0, Some(1.0), 0.5);
        assert!((y - (30.0 - 9.81)).abs() < 1e-9);
        assert_eq!(ground.settle(3.5, Some(1.0), 0.5), 3.0);
        assert_eq!(ground.settle(30.0, Some(1.0), -1.0), 30.0);
    }
}
