use std::collections::BTreeMap;

use foundation::time::{Time, ease_out_cubic, progress};
use scene::{ExtrusionState, RegionId, RegionRegistry};

use crate::config::ExtrusionConfig;
use crate::events::TransitionKind;

impl TransitionKind {
    fn state(self) -> ExtrusionState {
        match self {
            TransitionKind::Extrude => ExtrusionState::Extruding,
            TransitionKind::Retract => ExtrusionState::Retracting,
        }
    }
}

/// One in-flight scale animation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub start: Time,
    pub duration_s: f64,
    pub start_scale: f64,
    pub target_scale: f64,
}

impl Transition {
    pub fn progress(&self, now: Time) -> f64 {
        progress(self.start, now, self.duration_s)
    }

    pub fn sample(&self, now: Time) -> f64 {
        let eased = ease_out_cubic(self.progress(now));
        self.start_scale + (self.target_scale - self.start_scale) * eased
    }

    pub fn is_complete(&self, now: Time) -> bool {
        self.progress(now) >= 1.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    /// Regions whose scale moved this tick, with the new scale.
    pub updated: Vec<(RegionId, f64)>,
    pub finished: Vec<(RegionId, TransitionKind)>,
}

/// Drives per-region extrusion transitions from the frame clock.
///
/// At most one transition per region is active; starting a new one replaces
/// the old one, beginning from the scale the old one had reached.
#[derive(Debug, Clone)]
pub struct ExtrusionAnimator {
    config: ExtrusionConfig,
    active: BTreeMap<RegionId, Transition>,
}

impl ExtrusionAnimator {
    pub fn new(config: ExtrusionConfig) -> Self {
        Self {
            config,
            active: BTreeMap::new(),
        }
    }

    pub fn extrude(
        &mut self,
        registry: &mut RegionRegistry,
        id: RegionId,
        now: Time,
    ) -> Option<Transition> {
        self.start(registry, id, TransitionKind::Extrude, now)
    }

    pub fn retract(
        &mut self,
        registry: &mut RegionRegistry,
        id: RegionId,
        now: Time,
    ) -> Option<Transition> {
        self.start(registry, id, TransitionKind::Retract, now)
    }

    pub fn transition(&self, id: RegionId) -> Option<&Transition> {
        self.active.get(&id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    fn start(
        &mut self,
        registry: &mut RegionRegistry,
        id: RegionId,
        kind: TransitionKind,
        now: Time,
    ) -> Option<Transition> {
        let region = registry.get_mut(id)?;
        let redundant = match kind {
            TransitionKind::Extrude => match region.extrusion() {
                ExtrusionState::Extruding => true,
                ExtrusionState::Resting => region.is_extruded(),
                ExtrusionState::Retracting => false,
            },
            TransitionKind::Retract => match region.extrusion() {
                ExtrusionState::Retracting => true,
                ExtrusionState::Resting => !region.is_extruded(),
                ExtrusionState::Extruding => false,
            },
        };
        if redundant {
            return None;
        }

        let start_scale = self
            .active
            .get(&id)
            .map(|t| t.sample(now))
            .unwrap_or_else(|| region.scale_z());
        let (duration_s, target_scale) = match kind {
            TransitionKind::Extrude => (self.config.extrude_duration_s, self.config.extrude_scale),
            TransitionKind::Retract => (self.config.retract_duration_s, self.config.rest_scale),
        };
        let transition = Transition {
            kind,
            start: now,
            duration_s,
            start_scale,
            target_scale,
        };

        if let Some(cancelled) = self.active.insert(id, transition) {
            tracing::trace!(
                region = %id,
                cancelled = ?cancelled.kind,
                at_scale = start_scale,
                "transition replaced"
            );
        }
        region.set_pose(start_scale, kind.state(), true);
        Some(transition)
    }

    /// Samples every active transition at `now`, writes the scales back into
    /// the registry and retires the ones that reached their end.
    pub fn advance(&mut self, registry: &mut RegionRegistry, now: Time) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        for (&id, transition) in &self.active {
            let Some(region) = registry.get_mut(id) else {
                report.finished.push((id, transition.kind));
                continue;
            };
            if transition.is_complete(now) {
                let extruded = transition.kind == TransitionKind::Extrude;
                region.set_pose(transition.target_scale, ExtrusionState::Resting, extruded);
                report.updated.push((id, transition.target_scale));
                report.finished.push((id, transition.kind));
            } else {
                let scale = transition.sample(now);
                region.set_pose(scale, transition.kind.state(), true);
                report.updated.push((id, scale));
            }
        }
        for (id, _) in &report.finished {
            self.active.remove(id);
        }
        report
    }
}
