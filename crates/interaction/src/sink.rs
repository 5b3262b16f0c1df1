use dataset::NormalizedSignals;
use scene::{RegionId, Rgb};

use crate::lighting::LightingFrame;

/// Label shown when the viewpoint is over open water.
pub const OCEAN_LABEL: &str = "Ocean";

/// Receives presentation updates from `GlobeApp::tick`.
///
/// Signals and label are pushed only when the hover target changes; lighting
/// is pushed every tick.
pub trait PresentationSink {
    fn set_signals(&mut self, signals: &NormalizedSignals);

    fn set_label(&mut self, label: &str);

    fn set_lighting(&mut self, lighting: &LightingFrame);

    fn set_region_scale(&mut self, _region: RegionId, _scale_z: f64) {}

    fn set_region_emissive(&mut self, _region: RegionId, _emissive: Rgb) {}
}

/// Discards every update.
#[derive(Debug, Copy, Clone, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn set_signals(&mut self, _signals: &NormalizedSignals) {}

    fn set_label(&mut self, _label: &str) {}

    fn set_lighting(&mut self, _lighting: &LightingFrame) {}
}
