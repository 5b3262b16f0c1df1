use scene::RegionId;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Extrude,
    Retract,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionEvent {
    HoverChanged {
        from: Option<RegionId>,
        to: Option<RegionId>,
    },
    TransitionStarted {
        region: RegionId,
        transition: TransitionKind,
        from_scale: f64,
        to_scale: f64,
    },
    TransitionFinished {
        region: RegionId,
        transition: TransitionKind,
    },
    MoodTargetChanged {
        net_migration: f64,
        target_deg: f64,
    },
}
