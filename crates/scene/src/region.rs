use foundation::bounds::{Aabb2, Aabb3};
use foundation::math::{Vec2, drop_closing_duplicate};

use crate::color::Rgb;
use crate::entity::RegionId;

/// Scale applied to a region's depth while nothing animates it.
pub const REST_SCALE_Z: f64 = 1.0;

/// Which transition, if any, currently drives a region's depth scale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ExtrusionState {
    #[default]
    Resting,
    Extruding,
    Retracting,
}

/// Collision geometry: a ground-plane ring extruded upward from `base_y`.
///
/// The vertical extent is `depth * scale_z`, so the prism grows with the
/// owning region's current extrusion.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    ring: Vec<Vec2>,
    bounds: Aabb2,
    pub base_y: f64,
    pub depth: f64,
}

impl Footprint {
    /// Builds a footprint from a ground-plane ring. Returns `None` when fewer
    /// than three vertices remain after dropping a closing duplicate.
    pub fn new(mut ring: Vec<Vec2>, base_y: f64, depth: f64) -> Option<Self> {
        drop_closing_duplicate(&mut ring);
        if ring.len() < 3 {
            return None;
        }
        let bounds = Aabb2::from_points(&ring)?;
        Some(Self {
            ring,
            bounds,
            base_y,
            depth,
        })
    }

    pub fn ring(&self) -> &[Vec2] {
        &self.ring
    }

    pub fn top_y(&self, scale_z: f64) -> f64 {
        self.base_y + self.depth * scale_z
    }

    pub fn bounds_3d(&self, scale_z: f64) -> Aabb3 {
        self.bounds.extrude_y(self.base_y, self.top_y(scale_z))
    }
}

/// One interactive country-shaped polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: RegionId,
    name: String,
    code: Option<String>,
    footprint: Footprint,
    original_color: Rgb,
    scale_z: f64,
    extrusion: ExtrusionState,
    extruded: bool,
}

impl Region {
    pub fn new(
        id: RegionId,
        name: impl Into<String>,
        code: Option<String>,
        footprint: Footprint,
        original_color: Rgb,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            code,
            footprint,
            original_color,
            scale_z: REST_SCALE_Z,
            extrusion: ExtrusionState::Resting,
            extruded: false,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// ISO code carried by the source geometry, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn original_color(&self) -> Rgb {
        self.original_color
    }

    pub fn scale_z(&self) -> f64 {
        self.scale_z
    }

    pub fn extrusion(&self) -> ExtrusionState {
        self.extrusion
    }

    /// `true` once an extrusion has started and until a retraction completes.
    pub fn is_extruded(&self) -> bool {
        self.extruded
    }

    pub fn top_y(&self) -> f64 {
        self.footprint.top_y(self.scale_z)
    }

    /// Writes the animated pose. Only the extrusion animator should call this.
    pub fn set_pose(&mut self, scale_z: f64, extrusion: ExtrusionState, extruded: bool) {
        self.scale_z = scale_z;
        self.extrusion = extrusion;
        self.extruded = extruded;
    }
}
