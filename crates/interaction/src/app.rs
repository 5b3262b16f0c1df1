use dataset::{DatasetIndex, NormalizedSignals, normalize};
use foundation::math::Vec3;
use runtime::{Event, EventBus, Frame};
use scene::{RegionGeometry, RegionId, RegionRegistry};
use serde::Serialize;

use crate::config::InteractionConfig;
use crate::events::InteractionEvent;
use crate::extrusion::{ExtrusionAnimator, Transition};
use crate::ground::GroundFollow;
use crate::hover::{HoverChange, HoverResolver};
use crate::lighting::{LightingFrame, region_emissive};
use crate::mood::MoodController;
use crate::sink::{OCEAN_LABEL, PresentationSink};

/// What one tick observed and decided.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub frame_index: u64,
    pub hovered: Option<RegionId>,
    pub hover_changed: bool,
    pub elevation_deg: f64,
    /// Top of the hovered region after this tick's animation step.
    pub surface_y: Option<f64>,
    /// Viewpoint height after ground-follow.
    pub viewpoint_y: f64,
}

/// Owns the interactive globe state and advances it once per frame.
///
/// Regions and the dataset may be installed late; until then hovering
/// resolves to open water and lookups to neutral signals.
pub struct GlobeApp {
    config: InteractionConfig,
    registry: RegionRegistry,
    dataset: DatasetIndex,
    hover: HoverResolver,
    animator: ExtrusionAnimator,
    mood: MoodController,
    ground: GroundFollow,
    signals: NormalizedSignals,
    signals_stale: bool,
    events: EventBus<InteractionEvent>,
    // (glow intensity, hovered region) last pushed to the sink.
    last_glow: Option<(f64, Option<RegionId>)>,
}

impl GlobeApp {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            registry: RegionRegistry::new(),
            dataset: DatasetIndex::new(),
            hover: HoverResolver::new(),
            animator: ExtrusionAnimator::new(config.extrusion),
            mood: MoodController::new(&config.mood),
            ground: GroundFollow::new(config.ground),
            signals: NormalizedSignals::NEUTRAL,
            signals_stale: true,
            events: EventBus::new(),
            last_glow: None,
            config,
        }
    }

    pub fn install_regions(&mut self, geometry: Vec<RegionGeometry>) -> usize {
        let layout = self.config.layout.region_layout();
        self.registry.register(geometry, layout).len()
    }

    pub fn install_dataset(&mut self, index: DatasetIndex) {
        tracing::info!(records = index.len(), keys = index.key_count(), "dataset installed");
        self.dataset = index;
        // A region hovered before the data arrived picks up its statistics on the next tick.
        self.signals_stale |= self.hover.current().is_some();
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn dataset(&self) -> &DatasetIndex {
        &self.dataset
    }

    pub fn mood(&self) -> &MoodController {
        &self.mood
    }

    pub fn animator(&self) -> &ExtrusionAnimator {
        &self.animator
    }

    pub fn hovered(&self) -> Option<RegionId> {
        self.hover.current()
    }

    pub fn signals(&self) -> &NormalizedSignals {
        &self.signals
    }

    pub fn events(&self) -> &[Event<InteractionEvent>] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event<InteractionEvent>> {
        self.events.drain()
    }

    pub fn tick<S: PresentationSink + ?Sized>(
        &mut self,
        frame: Frame,
        viewpoint: Vec3,
        sink: &mut S,
    ) -> TickReport {
        let outcome = self.hover.resolve(&self.registry, viewpoint);
        if let Some(change) = outcome.change {
            self.apply_hover_change(frame, change, sink);
        } else if self.signals_stale {
            let hovered = self.hover.current();
            self.refresh_signals(frame, hovered, sink);
        }

        let advanced = self.animator.advance(&mut self.registry, frame.time);
        for &(region, scale_z) in &advanced.updated {
            sink.set_region_scale(region, scale_z);
        }
        for &(region, transition) in &advanced.finished {
            tracing::debug!(region = %region, ?transition, "transition finished");
            self.events
                .emit(frame, InteractionEvent::TransitionFinished { region, transition });
        }

        let elevation_deg = self.mood.tick(frame.dt_s);
        let lighting =
            LightingFrame::from_elevation(elevation_deg, self.config.mood.sun_azimuth_deg);
        sink.set_lighting(&lighting);
        self.push_glow(&lighting, sink);

        // Read after the advance so the viewpoint tracks a prism that grew this tick.
        let surface_y = self
            .hover
            .current()
            .and_then(|id| self.registry.get(id))
            .map(|region| region.top_y());
        let viewpoint_y = self.ground.settle(viewpoint.y, surface_y, frame.dt_s);

        TickReport {
            frame_index: frame.index,
            hovered: self.hover.current(),
            hover_changed: outcome.change.is_some(),
            elevation_deg,
            surface_y,
            viewpoint_y,
        }
    }

    fn apply_hover_change<S: PresentationSink + ?Sized>(
        &mut self,
        frame: Frame,
        change: HoverChange,
        sink: &mut S,
    ) {
        tracing::debug!(from = ?change.previous, to = ?change.current, "hover changed");
        self.events.emit(
            frame,
            InteractionEvent::HoverChanged {
                from: change.previous,
                to: change.current,
            },
        );

        if let Some(previous) = change.previous {
            if let Some(t) = self.animator.retract(&mut self.registry, previous, frame.time) {
                self.emit_started(frame, previous, t);
            }
        }
        if let Some(current) = change.current {
            if let Some(t) = self.animator.extrude(&mut self.registry, current, frame.time) {
                self.emit_started(frame, current, t);
            }
        }

        self.refresh_signals(frame, change.current, sink);
    }

    fn refresh_signals<S: PresentationSink + ?Sized>(
        &mut self,
        frame: Frame,
        hovered: Option<RegionId>,
        sink: &mut S,
    ) {
        self.signals_stale = false;
        let (signals, label) = match hovered.and_then(|id| self.registry.get(id)) {
            Some(region) => {
                let record = self.dataset.lookup(region.code(), Some(region.name()));
                (normalize(record), region.name())
            }
            None => (NormalizedSignals::NEUTRAL, OCEAN_LABEL),
        };
        sink.set_signals(&signals);
        sink.set_label(label);
        self.signals = signals;

        let target_deg = self.mood.set_target(signals.net_migration);
        self.events.emit(
            frame,
            InteractionEvent::MoodTargetChanged {
                net_migration: signals.net_migration,
                target_deg,
            },
        );
    }

    fn emit_started(&mut self, frame: Frame, region: RegionId, t: Transition) {
        tracing::debug!(
            region = %region,
            transition = ?t.kind,
            from = t.start_scale,
            to = t.target_scale,
            "transition started"
        );
        self.events.emit(
            frame,
            InteractionEvent::TransitionStarted {
                region,
                transition: t.kind,
                from_scale: t.start_scale,
                to_scale: t.target_scale,
            },
        );
    }

    fn push_glow<S: PresentationSink + ?Sized>(&mut self, lighting: &LightingFrame, sink: &mut S) {
        let hovered = self.hover.current();
        let key = (lighting.glow_intensity, hovered);
        if self.last_glow == Some(key) {
            return;
        }
        self.last_glow = Some(key);
        for region in self.registry.iter() {
            let emissive = region_emissive(
                region.original_color(),
                lighting.glow_intensity,
                Some(region.id()) == hovered,
            );
            sink.set_region_emissive(region.id(), emissive);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::DatasetRecord;
    use foundation::math::Vec2;
    use foundation::time::Time;
    use pretty_assertions::assert_eq;
    use runtime::FrameClock;

    #[derive(Default)]
    struct RecordingSink {
        labels: Vec<String>,
        signals: Vec<NormalizedSignals>,
        lighting_updates: usize,
        emissive_updates: usize,
    }

    impl PresentationSink for RecordingSink {
        fn set_signals(&mut self, signals: &NormalizedSignals) {
            self.signals.push(*signals);
        }

        fn set_label(&mut self, label: &str) {
            self.labels.push(label.to_string());
        }

        fn set_lighting(&mut self, _lighting: &LightingFrame) {
            self.lighting_updates += 1;
        }

        fn set_region_emissive(&mut self, _region: RegionId, _emissive: scene::Rgb) {
            self.emissive_updates += 1;
        }
    }

    fn square(lon: f64, lat: f64) -> Vec<Vec2> {
        vec![
            Vec2::new(lon, lat),
            Vec2::new(lon + 1.0, lat),
            Vec2::new(lon + 1.0, lat + 1.0),
            Vec2::new(lon, lat + 1.0),
        ]
    }

    fn app() -> GlobeApp {
        let mut app = GlobeApp::new(InteractionConfig::default());
        app.install_regions(vec![
            RegionGeometry::new("Alpha", square(0.0, 0.0)).with_code("AL"),
            RegionGeometry::new("Beta", square(10.0, 0.0)).with_code("BE"),
        ]);
        app
    }

    fn dataset() -> DatasetIndex {
        DatasetIndex::build(vec![DatasetRecord {
            iso_code2: Some("AL".into()),
            total_net_migration: Some(500_000.0),
            ..DatasetRecord::named("Alpha")
        }])
    }

    // World position above the centre of the square at (lon, lat).
    fn above(lon: f64, lat: f64) -> Vec3 {
        Vec3::new((lon + 0.5) * 15.0, 100.0, -(lat + 0.5) * 15.0)
    }

    #[test]
    fn hovering_a_region_extrudes_and_sets_mood() {
        let mut app = app();
        app.install_dataset(dataset());
        let mut sink = RecordingSink::default();
        let mut clock = FrameClock::new();

        let report = app.tick(clock.advance(0.0), above(0.0, 0.0), &mut sink);
        assert_eq!(report.hovered, Some(RegionId(0)));
        assert!(report.hover_changed);
        assert_eq!(report.surface_y, Some(15.0));
        assert_eq!(sink.labels, vec!["Alpha".to_string()]);
        assert_eq!(sink.signals[0].net_migration, 0.5);
        assert_eq!(app.mood().target_elevation_deg(), 27.5);
        assert_eq!(
            app.registry().get(RegionId(0)).unwrap().extrusion(),
            scene::ExtrusionState::Extruding
        );

        let report = app.tick(clock.advance(0.1), above(0.0, 0.0), &mut sink);
        assert!(!report.hover_changed);
        assert!((report.elevation_deg - 5.0).abs() < 1e-9);
        assert_eq!(sink.labels.len(), 1);
        assert_eq!(sink.lighting_updates, 2);
    }

    #[test]
    fn moving_to_open_water_resets_to_neutral() {
        let mut app = app();
        app.install_dataset(dataset());
        let mut sink = RecordingSink::default();
        let mut clock = FrameClock::new();

        app.tick(clock.advance(0.0), above(0.0, 0.0), &mut sink);
        let report = app.tick(clock.advance(0.1), above(5.0, 0.0), &mut sink);
        assert_eq!(report.hovered, None);
        assert_eq!(report.viewpoint_y, 100.0 - 19.62 * 0.1);
        assert_eq!(sink.labels.last().map(String::as_str), Some(OCEAN_LABEL));
        assert_eq!(*app.signals(), NormalizedSignals::NEUTRAL);
        assert_eq!(app.mood().target_elevation_deg(), 10.0);
        assert_eq!(
            app.registry().get(RegionId(0)).unwrap().extrusion(),
            scene::ExtrusionState::Retracting
        );
    }

    #[test]
    fn unknown_region_gets_neutral_signals() {
        let mut app = app();
        app.install_dataset(dataset());
        let mut sink = RecordingSink::default();
        let report = app.tick(Frame::new(0, 0.0, Time::ZERO), above(10.0, 0.0), &mut sink);
        assert_eq!(report.hovered, Some(RegionId(1)));
        assert_eq!(sink.labels, vec!["Beta".to_string()]);
        assert_eq!(sink.signals[0], NormalizedSignals::NEUTRAL);
    }

    #[test]
    fn late_dataset_refreshes_hovered_region() {
        let mut app = app();
        let mut sink = RecordingSink::default();
        let mut clock = FrameClock::new();

        app.tick(clock.advance(0.0), above(0.0, 0.0), &mut sink);
        assert!(!app.signals().has_data());

        app.install_dataset(dataset());
        app.tick(clock.advance(0.1), above(0.0, 0.0), &mut sink);
        assert!(app.signals().has_data());
        assert_eq!(sink.labels, vec!["Alpha".to_string(), "Alpha".to_string()]);
        assert_eq!(app.mood().target_elevation_deg(), 27.5);
    }

    #[test]
    fn empty_app_ticks_over_ocean() {
        let mut app = GlobeApp::new(InteractionConfig::default());
        let mut sink = RecordingSink::default();
        let frame = Frame::new(0, 0.1, Time(0.1));
        let report = app.tick(frame, Vec3::new(0.0, 5.0, 0.0), &mut sink);
        assert_eq!(report.hovered, None);
        assert_eq!(report.viewpoint_y, 20.5);
        assert_eq!(sink.labels, vec![OCEAN_LABEL.to_string()]);
        assert_eq!(sink.signals, vec![NormalizedSignals::NEUTRAL]);
        assert_eq!(app.mood().target_elevation_deg(), 10.0);
        assert_eq!(app.events().len(), 1);
        assert_eq!(sink.lighting_updates, 1);

        app.tick(Frame::new(1, 0.1, Time(0.2)), Vec3::new(0.0, 5.0, 0.0), &mut sink);
        assert_eq!(sink.labels.len(), 1);
    }

    #[test]
    fn first_tick_presents_ocean_even_with_data_installed() {
        let mut app = app();
        app.install_dataset(dataset());
        let mut sink = RecordingSink::default();
        app.tick(Frame::new(0, 0.0, Time::ZERO), above(5.0, 0.0), &mut sink);
        assert_eq!(sink.labels, vec![OCEAN_LABEL.to_string()]);
        assert_eq!(sink.signals, vec![NormalizedSignals::NEUTRAL]);
    }

    #[test]
    fn viewpoint_rides_a_prism_that_grew_this_frame() {
        let mut app = app();
        let mut sink = RecordingSink::default();
        let mut clock = FrameClock::new();

        app.tick(clock.advance(0.0), above(0.0, 0.0), &mut sink);
        let low = Vec3::new(7.5, 17.0, -7.5);
        let report = app.tick(clock.advance(0.25), low, &mut sink);

        let top = app.registry().get(RegionId(0)).unwrap().top_y();
        let expected_top = 15.0 * (1.0 + 2.0 * (1.0 - 0.95_f64.powi(3)));
        assert!((top - expected_top).abs() < 1e-9);
        assert_eq!(report.surface_y, Some(top));
        assert_eq!(report.viewpoint_y, top + 2.0);
    }

    #[test]
    fn glow_is_pushed_only_when_it_changes() {
        let mut app = app();
        let mut sink = RecordingSink::default();
        let mut clock = FrameClock::new();

        app.tick(clock.advance(0.0), above(5.0, 0.0), &mut sink);
        assert_eq!(sink.emissive_updates, 2);
        app.tick(clock.advance(0.0), above(5.0, 0.0), &mut sink);
        assert_eq!(sink.emissive_updates, 2);

        app.tick(clock.advance(0.1), above(0.0, 0.0), &mut sink);
        assert_eq!(sink.emissive_updates, 4);
    }
}
