use std::path::PathBuf;

use clap::Parser;
use dataset::NormalizedSignals;
use foundation::math::{Vec2, Vec3};
use interaction::{GlobeApp, InteractionConfig, LightingFrame, PresentationSink};
use runtime::FrameClock;
use scene::RegionId;
use serde::Serialize;
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Fly a viewpoint across the migration globe and report what it hovers"
)]
struct Args {
    /// Region outlines (GeoJSON FeatureCollection)
    #[arg(long)]
    regions: Option<PathBuf>,

    /// Migration statistics (CSV)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Interaction tunables (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start of the flight on the ground plane: x,z
    #[arg(
        long,
        value_parser = parse_plane_point,
        allow_hyphen_values = true,
        default_value = "-150,0"
    )]
    from: Vec2,

    /// End of the flight on the ground plane: x,z
    #[arg(
        long,
        value_parser = parse_plane_point,
        allow_hyphen_values = true,
        default_value = "150,0"
    )]
    to: Vec2,

    /// Starting height of the viewpoint
    #[arg(long, default_value_t = 40.0)]
    altitude: f64,

    /// Flight duration in seconds
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_plane_point(s: &str) -> Result<Vec2, String> {
    let (x, z) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,z but got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate {v:?}"))
    };
    Ok(Vec2::new(parse(x)?, parse(z)?))
}

#[derive(Debug, Serialize)]
struct Visit {
    frame: u64,
    time_s: f64,
    label: String,
    signals: NormalizedSignals,
}

#[derive(Debug, Serialize)]
struct FlightReport {
    frames: u64,
    duration_s: f64,
    regions_loaded: usize,
    dataset_records: usize,
    events: usize,
    visits: Vec<Visit>,
    final_elevation_deg: f64,
    final_viewpoint_y: f64,
}

/// Logs presentation updates and records every label change as a visit.
#[derive(Default)]
struct TracingSink {
    frame: u64,
    time_s: f64,
    signals: NormalizedSignals,
    visits: Vec<Visit>,
}

impl PresentationSink for TracingSink {
    fn set_signals(&mut self, signals: &NormalizedSignals) {
        debug!(frame = self.frame, ?signals, "signals");
        self.signals = *signals;
    }

    fn set_label(&mut self, label: &str) {
        info!(frame = self.frame, time_s = self.time_s, label, "hover");
        self.visits.push(Visit {
            frame: self.frame,
            time_s: self.time_s,
            label: label.to_string(),
            signals: self.signals,
        });
    }

    fn set_lighting(&mut self, lighting: &LightingFrame) {
        trace!(
            frame = self.frame,
            elevation_deg = lighting.elevation_deg,
            intensity = lighting.light_intensity,
            glow = lighting.glow_intensity,
            "lighting"
        );
    }

    fn set_region_scale(&mut self, region: RegionId, scale_z: f64) {
        trace!(frame = self.frame, region = %region, scale_z, "region scale");
    }
}

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if !args.fps.is_finite() || args.fps <= 0.0 {
        return Err(format!("--fps must be > 0, got {}", args.fps).into());
    }
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        return Err(format!("--seconds must be >= 0, got {}", args.seconds).into());
    }
    if !args.altitude.is_finite() {
        return Err("--altitude must be finite".into());
    }

    let config = match &args.config {
        Some(path) => InteractionConfig::load(path)?,
        None => InteractionConfig::default(),
    };

    let mut app = GlobeApp::new(config);
    if let Some(path) = &args.regions {
        app.install_regions(formats::or_empty("regions", formats::load_regions_file(path)));
    }
    if let Some(path) = &args.dataset {
        app.install_dataset(formats::or_empty("dataset", formats::load_dataset_file(path)));
    }

    let report = fly(&mut app, &args);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn fly(app: &mut GlobeApp, args: &Args) -> FlightReport {
    let steps = (args.seconds * args.fps).round().max(1.0) as u64;
    let dt_s = 1.0 / args.fps;
    info!(
        regions = app.registry().len(),
        records = app.dataset().len(),
        steps,
        "starting flight"
    );

    let mut clock = FrameClock::new();
    let mut sink = TracingSink::default();
    let mut y = args.altitude;
    let mut events = 0;

    for step in 0..=steps {
        let frame = clock.advance(if step == 0 { 0.0 } else { dt_s });
        let s = step as f64 / steps as f64;
        let ground = args.from.lerp(args.to, s);
        sink.frame = frame.index;
        sink.time_s = frame.time.0;

        let report = app.tick(frame, Vec3::new(ground.x, y, ground.y), &mut sink);
        y = report.viewpoint_y;
        events += app.drain_events().len();
    }

    FlightReport {
        frames: steps + 1,
        duration_s: clock.time().0,
        regions_loaded: app.registry().len(),
        dataset_records: app.dataset().len(),
        events,
        visits: sink.visits,
        final_elevation_deg: app.mood().current_elevation_deg(),
        final_viewpoint_y: y,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_plane_point;
    use foundation::math::Vec2;

    #[test]
    fn parses_plane_points() {
        assert_eq!(parse_plane_point("1.5, -2"), Ok(Vec2::new(1.5, -2.0)));
        assert!(parse_plane_point("1.5").is_err());
        assert!(parse_plane_point("a,b").is_err());
        assert!(parse_plane_point("inf,0").is_err());
    }
}
