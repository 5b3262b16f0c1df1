use foundation::math::Vec3;
use scene::picking::{PickHit, pick_below};
use scene::{RegionId, RegionRegistry};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HoverChange {
    pub previous: Option<RegionId>,
    pub current: Option<RegionId>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HoverOutcome {
    /// Nearest region under the viewpoint this tick.
    pub hit: Option<PickHit>,
    /// Set only when the hovered region differs from the previous tick.
    pub change: Option<HoverChange>,
}

/// Tracks which region lies directly below the viewpoint.
#[derive(Debug, Clone, Default)]
pub struct HoverResolver {
    current: Option<RegionId>,
}

impl HoverResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<RegionId> {
        self.current
    }

    pub fn resolve(&mut self, registry: &RegionRegistry, viewpoint: Vec3) -> HoverOutcome {
        let hit = pick_below(registry, viewpoint);
        let change = self.observe(hit.map(|h| h.region));
        HoverOutcome { hit, change }
    }

    pub fn observe(&mut self, candidate: Option<RegionId>) -> Option<HoverChange> {
        if candidate == self.current {
            return None;
        }
        let change = HoverChange {
            previous: self.current,
            current: candidate,
        };
        self.current = candidate;
        Some(change)
    }
}
