use foundation::math::Vec3;
use scene::Rgb;

pub const WATER_NIGHT: u32 = 0x000408;
pub const WATER_DUSK: u32 = 0x001122;
pub const WATER_DAY: u32 = 0x001e0f;

/// Floor for the directional light so night scenes stay readable.
pub const MIN_LIGHT_INTENSITY: f64 = 0.1;

/// Scene lighting derived from one sun elevation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightingFrame {
    pub elevation_deg: f64,
    pub sun_direction: Vec3,
    pub light_intensity: f64,
    pub water_tint: Rgb,
    pub glow_intensity: f64,
}

impl LightingFrame {
    pub fn from_elevation(elevation_deg: f64, azimuth_deg: f64) -> Self {
        let phi = (90.0 - elevation_deg).to_radians();
        let theta = azimuth_deg.to_radians();
        let sun_direction = Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos());

        let light_intensity = elevation_deg.max(0.0).to_radians().sin().max(MIN_LIGHT_INTENSITY);

        let water_tint = if elevation_deg < 0.0 {
            WATER_NIGHT
        } else if elevation_deg < 10.0 {
            WATER_DUSK
        } else {
            WATER_DAY
        };

        let glow_intensity = 1.0 - ((elevation_deg + 20.0) / 40.0).clamp(0.0, 1.0);

        Self {
            elevation_deg,
            sun_direction,
            light_intensity,
            water_tint: Rgb::from_hex(water_tint),
            glow_intensity,
        }
    }
}

/// Self-illumination of a region: a night glow, plus a highlight while hovered.
pub fn region_emissive(original: Rgb, glow_intensity: f64, hovered: bool) -> Rgb {
    let glow = original.scaled((glow_intensity * 0.3) as f32);
    if hovered {
        glow.add(original.scaled(0.5))
    } else {
        glow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn noon_and_night_extremes() {
        let noon = LightingFrame::from_elevation(90.0, 180.0);
        assert!(close(noon.light_intensity, 1.0));
        assert!(close(noon.sun_direction.y, 1.0));
        assert_eq!(noon.glow_intensity, 0.0);
        assert_eq!(noon.water_tint, Rgb::from_hex(WATER_DAY));

        let night = LightingFrame::from_elevation(-20.0, 180.0);
        assert_eq!(night.light_intensity, MIN_LIGHT_INTENSITY);
        assert_eq!(night.glow_intensity, 1.0);
        assert_eq!(night.water_tint, Rgb::from_hex(WATER_NIGHT));
        assert!(night.sun_direction.y < 0.0);
    }

    #[test]
    fn dusk_band() {
        let dusk = LightingFrame::from_elevation(2.0, 180.0);
        assert_eq!(dusk.water_tint, Rgb::from_hex(WATER_DUSK));
        assert!(close(dusk.glow_intensity, 1.0 - 22.0 / 40.0));
        assert!(close(dusk.light_intensity, MIN_LIGHT_INTENSITY.max(2.0_f64.to_radians().sin())));
        // Azimuth 180 points the sun toward -z.
        assert!(dusk.sun_direction.z < 0.0);
        assert!(close(dusk.sun_direction.length(), 1.0));
    }

    #[test]
    fn hovered_regions_are_highlighted() {
        let color = Rgb::new(1.0, 0.5, 0.0);
        assert_eq!(region_emissive(color, 0.0, false), Rgb::new(0.0, 0.0, 0.0));
        assert_eq!(region_emissive(color, 0.0, true), Rgb::new(0.5, 0.25, 0.0));
        let glowing = region_emissive(color, 1.0, false);
        assert!((glowing.r - 0.3).abs() < 1e-6);
    }
}
