//! Bounded presentation signals derived from a dataset record.
//!
//! The scales below are fixed domain constants, not configuration.

use serde::Serialize;

use crate::record::DatasetRecord;

/// Net migration (people) mapped to a signal of magnitude 1.
pub const NET_MIGRATION_SCALE: f64 = 1_000_000.0;
/// Percent-change value mapped to a signal of magnitude 1.
pub const PERCENT_CHANGE_SCALE: f64 = 100.0;
/// Population mapped to a ratio of 1 (roughly the most populous country).
pub const POPULATION_SCALE: f64 = 1_400_000_000.0;
/// Population assumed when the record has none.
pub const DEFAULT_POPULATION: f64 = 1_000_000.0;

/// Trend token for a growing migrant stock.
pub const GROWTH_TREND: &str = "crecimiento";
/// Trend token for a shrinking migrant stock.
pub const DECLINE_TREND: &str = "decrecimiento";

pub const TREND_GROWTH: f64 = 1.0;
pub const TREND_NEUTRAL: f64 = 0.5;
pub const TREND_DECLINE: f64 = 0.0;

/// The five scalars handed to the presentation layer.
///
/// Ranges: `net_migration` and `percent_change` in `[-1, 1]`,
/// `migration_trend` in `{0, 0.5, 1}`, `population_ratio` in `[0, 1]`,
/// `has_data` in `{0, 1}`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct NormalizedSignals {
    pub net_migration: f64,
    pub percent_change: f64,
    pub migration_trend: f64,
    pub population_ratio: f64,
    pub has_data: f64,
}

impl NormalizedSignals {
    /// Midpoints everywhere and `has_data = 0`.
    pub const NEUTRAL: NormalizedSignals = NormalizedSignals {
        net_migration: 0.0,
        percent_change: 0.0,
        migration_trend: TREND_NEUTRAL,
        population_ratio: 0.5,
        has_data: 0.0,
    };

    pub fn has_data(&self) -> bool {
        self.has_data > 0.5
    }
}

impl Default for NormalizedSignals {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Maps a record, or its absence, to bounded signals. Never fails.
pub fn normalize(record: Option<&DatasetRecord>) -> NormalizedSignals {
    let Some(record) = record else {
        return NormalizedSignals::NEUTRAL;
    };
    let Some(net) = record.total_net_migration.filter(|v| !v.is_nan()) else {
        return NormalizedSignals::NEUTRAL;
    };

    let percent = present(record.percent_change).unwrap_or(0.0);
    let population = present(record.population).unwrap_or(DEFAULT_POPULATION);

    NormalizedSignals {
        net_migration: (net / NET_MIGRATION_SCALE).clamp(-1.0, 1.0),
        percent_change: (percent / PERCENT_CHANGE_SCALE).clamp(-1.0, 1.0),
        migration_trend: trend_signal(record.migration_trend.as_deref()),
        population_ratio: (population / POPULATION_SCALE).clamp(0.0, 1.0),
        has_data: 1.0,
    }
}

/// Growth -> 1, decline -> 0, anything else -> 0.5.
pub fn trend_signal(trend: Option<&str>) -> f64 {
    let Some(trend) = trend else {
        return TREND_NEUTRAL;
    };
    let token = trend.trim().to_lowercase();
    if token == GROWTH_TREND {
        TREND_GROWTH
    } else if token == DECLINE_TREND {
        TREND_DECLINE
    } else {
        tracing::trace!(trend = %trend, "unrecognized migration trend; using neutral");
        TREND_NEUTRAL
    }
}

fn present(v: Option<f64>) -> Option<f64> {
    v.filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::{NormalizedSignals, normalize, trend_signal};
    use crate::record::DatasetRecord;
    use pretty_assertions::assert_eq;

    fn record(net: f64) -> DatasetRecord {
        DatasetRecord {
            name: Some("Testland".to_string()),
            total_net_migration: Some(net),
            ..DatasetRecord::default()
        }
    }

    #[test]
    fn missing_record_is_neutral() {
        assert_eq!(
            normalize(None),
            NormalizedSignals {
                net_migration: 0.0,
                percent_change: 0.0,
                migration_trend: 0.5,
                population_ratio: 0.5,
                has_data: 0.0,
            }
        );
    }

    #[test]
    fn absent_or_nan_net_migration_is_neutral() {
        assert_eq!(normalize(Some(&DatasetRecord::named("x"))), NormalizedSignals::NEUTRAL);
        assert_eq!(normalize(Some(&record(f64::NAN))), NormalizedSignals::NEUTRAL);
    }

    #[test]
    fn net_migration_clamps_to_unit_range() {
        assert_eq!(normalize(Some(&record(2_000_000.0))).net_migration, 1.0);
        assert_eq!(normalize(Some(&record(-3_000_000.0))).net_migration, -1.0);
        assert_eq!(normalize(Some(&record(250_000.0))).net_migration, 0.25);
    }

    #[test]
    fn zero_net_migration_still_has_data() {
        let s = normalize(Some(&record(0.0)));
        assert_eq!(s.net_migration, 0.0);
        assert_eq!(s.has_data, 1.0);
        assert!(s.has_data());
    }

    #[test]
    fn defaults_apply_to_missing_fields() {
        let s = normalize(Some(&record(10.0)));
        assert_eq!(s.percent_change, 0.0);
        assert_eq!(s.migration_trend, 0.5);
        assert_eq!(s.population_ratio, 1_000_000.0 / 1_400_000_000.0);
    }

    #[test]
    fn full_record_is_scaled() {
        let r = DatasetRecord {
            percent_change: Some(-250.0),
            population: Some(2_800_000_000.0),
            migration_trend: Some("  Crecimiento ".to_string()),
            ..record(-500_000.0)
        };
        assert_eq!(
            normalize(Some(&r)),
            NormalizedSignals {
                net_migration: -0.5,
                percent_change: -1.0,
                migration_trend: 1.0,
                population_ratio: 1.0,
                has_data: 1.0,
            }
        );
    }

    #[test]
    fn trend_tokens() {
        assert_eq!(trend_signal(Some("crecimiento")), 1.0);
        assert_eq!(trend_signal(Some("DECRECIMIENTO")), 0.0);
        assert_eq!(trend_signal(Some("estable")), 0.5);
        assert_eq!(trend_signal(None), 0.5);
    }
}
