use foundation::math::Vec2;

use crate::color::Rgb;
use crate::entity::RegionId;
use crate::projection::GroundProjection;
use crate::region::{Footprint, Region};

/// One named polygon as delivered by the geometry loader, in (lon, lat) degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    pub name: String,
    pub code: Option<String>,
    pub ring: Vec<Vec2>,
}

impl RegionGeometry {
    pub fn new(name: impl Into<String>, ring: Vec<Vec2>) -> Self {
        Self {
            name: name.into(),
            code: None,
            ring,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// How registered footprints are placed in the world.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegionLayout {
    pub projection: GroundProjection,
    /// Ground height of every footprint's base.
    pub base_y: f64,
    /// Unscaled footprint depth, in projected (lon/lat) units.
    pub depth: f64,
}

impl Default for RegionLayout {
    fn default() -> Self {
        Self {
            projection: GroundProjection::default(),
            base_y: 0.0,
            depth: 1.0,
        }
    }
}

/// Owns the fixed set of interactive regions.
///
/// Regions are registered once; afterwards only their animated pose changes.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    regions: Vec<Region>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one region per usable input polygon and returns them.
    ///
    /// A registry only accepts its first non-empty load; later calls leave it
    /// untouched.
    pub fn register(&mut self, geometry: Vec<RegionGeometry>, layout: RegionLayout) -> &[Region] {
        if !self.regions.is_empty() {
            tracing::warn!(
                existing = self.regions.len(),
                offered = geometry.len(),
                "region registry already populated; ignoring second load"
            );
            return &self.regions;
        }

        let depth = layout.depth * layout.projection.scale;
        for geom in geometry {
            let ring = geom
                .ring
                .iter()
                .map(|p| layout.projection.project(p.x, p.y))
                .collect();
            let Some(footprint) = Footprint::new(ring, layout.base_y, depth) else {
                tracing::warn!(name = %geom.name, "skipping region with degenerate ring");
                continue;
            };
            let id = RegionId(self.regions.len() as u32);
            let color = region_color(id);
            self.regions
                .push(Region::new(id, geom.name, geom.code, footprint, color));
        }

        tracing::info!(count = self.regions.len(), "regions registered");
        &self.regions
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index() as usize)
    }

    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(id.index() as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Vivid, deterministic per-region base colour (golden-ratio hue walk).
fn region_color(id: RegionId) -> Rgb {
    const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;
    let hue = (id.index() as f64 * GOLDEN_RATIO_CONJUGATE).fract();
    Rgb::from_hsl(hue as f32, 0.7, 0.6)
}
