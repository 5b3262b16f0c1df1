use crate::config::MoodConfig;

/// Sun elevation (degrees) for a normalized net migration in `[-1, 1]`.
///
/// Continuous piecewise-linear mapping: `-1 -> -20`, `-0.5 -> -5`, `0 -> 10`,
/// `1 -> 45`. NaN maps like 0.
pub fn target_elevation_deg(net_migration: f64) -> f64 {
    let n = if net_migration.is_nan() {
        0.0
    } else {
        net_migration.clamp(-1.0, 1.0)
    };
    if n <= -0.5 {
        -20.0 + (n + 1.0) * 30.0
    } else if n < 0.0 {
        -5.0 + (n + 0.5) * 30.0
    } else if n == 0.0 {
        10.0
    } else {
        10.0 + n * 35.0
    }
}

/// Smoothly drives the sun elevation toward a mood target.
#[derive(Debug, Clone)]
pub struct MoodController {
    current_deg: f64,
    target_deg: f64,
    rate_deg_per_s: f64,
    snap_epsilon_deg: f64,
}

impl MoodController {
    pub fn new(config: &MoodConfig) -> Self {
        Self {
            current_deg: config.initial_elevation_deg,
            target_deg: config.initial_elevation_deg,
            rate_deg_per_s: config.rate_deg_per_s,
            snap_epsilon_deg: config.snap_epsilon_deg,
        }
    }

    pub fn current_elevation_deg(&self) -> f64 {
        self.current_deg
    }

    pub fn target_elevation_deg(&self) -> f64 {
        self.target_deg
    }

    pub fn is_settled(&self) -> bool {
        self.current_deg == self.target_deg
    }

    /// Sets the target from a net migration signal; returns the new target.
    pub fn set_target(&mut self, net_migration: f64) -> f64 {
        self.target_deg = target_elevation_deg(net_migration);
        self.target_deg
    }

    pub fn tick(&mut self, dt_s: f64) -> f64 {
        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        let diff = self.target_deg - self.current_deg;
        if diff.abs() <= self.snap_epsilon_deg {
            self.current_deg = self.target_deg;
        } else {
            let step = (self.rate_deg_per_s * dt_s).min(diff.abs());
            self.current_deg += step.copysign(diff);
        }
        self.current_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> MoodController {
        MoodController::new(&MoodConfig::default())
    }

    #[test]
    fn mapping_hits_anchor_points() {
        assert_eq!(target_elevation_deg(-1.0), -20.0);
        assert_eq!(target_elevation_deg(-0.5), -5.0);
        assert_eq!(target_elevation_deg(0.0), 10.0);
        assert_eq!(target_elevation_deg(1.0), 45.0);
        assert_eq!(target_elevation_deg(0.5), 27.5);
        assert_eq!(target_elevation_deg(f64::NAN), 10.0);
        assert_eq!(target_elevation_deg(-3.0), -20.0);
        assert_eq!(target_elevation_deg(7.0), 45.0);
    }

    #[test]
    fn mapping_is_continuous() {
        let eps = 1e-9;
        for anchor in [-0.5, 0.0] {
            let below = target_elevation_deg(anchor - eps);
            let above = target_elevation_deg(anchor + eps);
            assert!((below - above).abs() < 1e-6, "jump at {anchor}");
        }
    }

    #[test]
    fn starts_at_two_degrees() {
        let mood = controller();
        assert_eq!(mood.current_elevation_deg(), 2.0);
        assert!(mood.is_settled());
    }

    #[test]
    fn moves_at_bounded_rate_without_overshoot() {
        let mut mood = controller();
        mood.set_target(1.0);
        let mut previous_gap = (mood.target_elevation_deg() - mood.current_elevation_deg()).abs();
        assert_eq!(mood.tick(0.5), 17.0);
        for _ in 0..20 {
            let value = mood.tick(0.25);
            assert!(value <= 45.0);
            let gap = (45.0 - value).abs();
            assert!(gap <= previous_gap);
            previous_gap = gap;
        }
        assert_eq!(mood.current_elevation_deg(), 45.0);

        mood.set_target(-1.0);
        mood.tick(1.0);
        assert_eq!(mood.current_elevation_deg(), 15.0);
    }

    #[test]
    fn snaps_within_epsilon() {
        let mut mood = controller();
        mood.set_target(0.0);
        mood.tick(0.264);
        assert!((mood.current_elevation_deg() - 9.92).abs() < 1e-9);
        mood.tick(0.0);
        assert_eq!(mood.current_elevation_deg(), 10.0);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut mood = controller();
        mood.set_target(1.0);
        assert_eq!(mood.tick(-1.0), 2.0);
        assert_eq!(mood.tick(f64::NAN), 2.0);
    }
}
