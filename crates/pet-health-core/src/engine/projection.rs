//! Weight trend projection by ordinary least squares.
//!
//! x is days since the first sample, y is weight in kg. The fit is
//! projected forward from the reference date and bracketed by
//! `confidence_z` residual standard deviations.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{
    AlertLevel, HorizonProjection, RapidChangeAlert, TrendDirection, WeightProjection,
    WeightSample, WeightTrend,
};

/// Slope (kg/day) beyond which a trend counts as gaining or losing.
const STABLE_SLOPE_KG_PER_DAY: f64 = 0.01;

/// Days in the "monthly" rate.
const DAYS_PER_MONTH: f64 = 30.0;

/// Slack on alert thresholds so fit rounding error cannot tip an exact
/// threshold change over the edge.
const PERCENT_TOLERANCE: f64 = 1e-9;

/// A least-squares line with its residual spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub std_dev: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit y = m x + b. Returns `None` for fewer than two points or zero x spread.
///
/// Residual variance divides by n, so an exact fit has std-dev 0.
pub fn least_squares(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), &(x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
    );

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    let residual_ss: f64 = points
        .iter()
        .map(|&(x, y)| {
            let r = y - (slope * x + intercept);
            r * r
        })
        .sum();

    Some(LinearFit {
        slope,
        intercept,
        std_dev: (residual_ss / n).sqrt(),
    })
}

/// Classify a slope in kg/day.
pub fn classify_trend(slope: f64) -> TrendDirection {
    if slope > STABLE_SLOPE_KG_PER_DAY {
        TrendDirection::Gaining
    } else if slope < -STABLE_SLOPE_KG_PER_DAY {
        TrendDirection::Losing
    } else {
        TrendDirection::Stable
    }
}

/// Alert when the monthly change strictly exceeds the warning percentage.
pub fn rapid_change_alert(
    monthly_rate: f64,
    last_weight_kg: f64,
    config: &EngineConfig,
) -> Option<RapidChangeAlert> {
    if last_weight_kg <= 0.0 {
        return None;
    }
    let percent = monthly_rate.abs() * 100.0 / last_weight_kg;
    if percent <= config.rapid_change_warning_pct + PERCENT_TOLERANCE {
        return None;
    }

    let level = if percent > config.rapid_change_critical_pct + PERCENT_TOLERANCE {
        AlertLevel::Critical
    } else {
        AlertLevel::Warning
    };
    let direction = if monthly_rate > 0.0 { "gaining" } else { "losing" };

    Some(RapidChangeAlert {
        level,
        monthly_rate_kg: monthly_rate,
        percent_of_weight: percent,
        message: format!(
            "Rapid weight change: {:+.2} kg/month ({} {:.1}% of body weight per month)",
            monthly_rate, direction, percent
        ),
    })
}

/// Project weight from a history of samples.
pub fn project_weight(
    samples: &[WeightSample],
    today: NaiveDate,
    config: &EngineConfig,
) -> WeightProjection {
    if samples.len() < 2 {
        debug!(samples = samples.len(), "weight projection unavailable");
        return WeightProjection::unavailable(format!(
            "At least 2 weight measurements are required, found {}",
            samples.len()
        ));
    }

    let mut ordered: Vec<&WeightSample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.date);

    let first_date = ordered[0].date;
    let points: Vec<(f64, f64)> = ordered
        .iter()
        .map(|s| (days_between(first_date, s.date), s.weight_kg))
        .collect();

    let Some(fit) = least_squares(&points) else {
        debug!("all weight samples share one date");
        return WeightProjection::unavailable(
            "Weight measurements must span more than one day",
        );
    };

    let last_weight_kg = ordered[ordered.len() - 1].weight_kg;
    let today_offset = days_between(first_date, today);
    let margin = config.confidence_z * fit.std_dev;

    let projections = config
        .projection_horizons_days
        .iter()
        .map(|&days_ahead| {
            let predicted = fit.predict(today_offset + days_ahead as f64);
            HorizonProjection {
                days_ahead,
                weight_kg: predicted.max(0.0),
                lower_kg: (predicted - margin).max(0.0),
                upper_kg: (predicted + margin).max(0.0),
            }
        })
        .collect();

    WeightProjection::Available(WeightTrend {
        trend: classify_trend(fit.slope),
        slope: fit.slope,
        intercept: fit.intercept,
        std_dev: fit.std_dev,
        sample_count: ordered.len(),
        last_weight_kg,
        projections,
        alert: rapid_change_alert(fit.slope * DAYS_PER_MONTH, last_weight_kg, config),
    })
}

fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(day_offset: i64, weight: f64) -> WeightSample {
        WeightSample::new(date(2024, 1, 1) + chrono::Duration::days(day_offset), weight)
    }

    #[test]
    fn test_fewer_than_two_samples() {
        let cfg = EngineConfig::default();
        let projection = project_weight(&[sample(0, 10.0)], date(2024, 2, 1), &cfg);
        match projection {
            WeightProjection::Unavailable { reason } => assert!(reason.contains("found 1")),
            other => panic!("expected unavailable, got {:?}", other),
        }
        assert!(!project_weight(&[], date(2024, 2, 1), &cfg).is_available());
    }

    #[test]
    fn test_same_day_samples_unavailable() {
        let cfg = EngineConfig::default();
        let projection =
            project_weight(&[sample(0, 10.0), sample(0, 10.4)], date(2024, 2, 1), &cfg);
        assert!(!projection.is_available());
    }

    #[test]
    fn test_two_samples_fit_exactly() {
        let cfg = EngineConfig::default();
        let projection =
            project_weight(&[sample(0, 10.0), sample(30, 10.5)], date(2024, 1, 31), &cfg);
        let trend = projection.trend().unwrap();

        assert!((trend.slope - 0.5 / 30.0).abs() < 1e-12);
        assert!((trend.intercept - 10.0).abs() < 1e-12);
        assert!(trend.std_dev.abs() < 1e-9);
        assert_eq!(trend.trend, TrendDirection::Gaining);
        assert_eq!(trend.last_weight_kg, 10.5);
        // 0.5 kg/month on 10.5 kg is under 5%
        assert!(trend.alert.is_none());

        // zero residual: bounds collapse onto the prediction
        let month = &trend.projections[0];
        assert_eq!(month.days_ahead, 30);
        assert!((month.weight_kg - 11.0).abs() < 1e-9);
        assert!((month.lower_kg - month.weight_kg).abs() < 1e-9);
        assert!((month.upper_kg - month.weight_kg).abs() < 1e-9);
    }

    #[test]
    fn test_unsorted_samples_are_ordered() {
        let cfg = EngineConfig::default();
        let projection = project_weight(
            &[sample(60, 8.0), sample(0, 10.0), sample(30, 9.0)],
            date(2024, 3, 1),
            &cfg,
        );
        let trend = projection.trend().unwrap();
        assert_eq!(trend.trend, TrendDirection::Losing);
        assert_eq!(trend.last_weight_kg, 8.0);
        assert_eq!(trend.sample_count, 3);
    }

    #[test]
    fn test_confidence_band_floored_at_zero() {
        let cfg = EngineConfig::default();
        // Noisy, steep loss on a tiny animal
        let projection = project_weight(
            &[sample(0, 1.0), sample(10, 0.4), sample(20, 0.6), sample(30, 0.1)],
            date(2024, 1, 31),
            &cfg,
        );
        let trend = projection.trend().unwrap();
        assert!(trend.std_dev > 0.0);
        let year = trend.projections.last().unwrap();
        assert_eq!(year.days_ahead, 365);
        assert_eq!(year.weight_kg, 0.0);
        assert_eq!(year.lower_kg, 0.0);
        assert!(trend.projections.iter().all(|p| p.lower_kg >= 0.0));
    }

    #[test]
    fn test_stable_trend() {
        assert_eq!(classify_trend(0.01), TrendDirection::Stable);
        assert_eq!(classify_trend(-0.01), TrendDirection::Stable);
        assert_eq!(classify_trend(0.0101), TrendDirection::Gaining);
        assert_eq!(classify_trend(-0.0101), TrendDirection::Losing);
    }

    #[test]
    fn test_alert_boundary_is_strict() {
        let cfg = EngineConfig::default();
        // exactly 10% of body weight per month
        assert!(rapid_change_alert(1.0, 10.0, &cfg).is_none());
        assert!(rapid_change_alert(-2.0, 20.0, &cfg).is_none());
        assert!(rapid_change_alert(1.2, 10.0, &cfg).is_some());
        // exactly 20% is still a warning
        assert_eq!(rapid_change_alert(2.0, 10.0, &cfg).unwrap().level, AlertLevel::Warning);
    }

    #[test]
    fn test_fitted_threshold_changes_stay_strict() {
        let cfg = EngineConfig::default();

        // 9.9 -> 11.0 kg in 30 days: exactly 10% of the last weight
        let projection =
            project_weight(&[sample(0, 9.9), sample(30, 11.0)], date(2024, 1, 31), &cfg);
        assert!(projection.trend().unwrap().alert.is_none());

        for last in [3.0, 7.0, 10.0, 11.0, 20.0, 30.0, 42.7] {
            let projection = project_weight(
                &[sample(0, last - last / 10.0), sample(30, last)],
                date(2024, 1, 31),
                &cfg,
            );
            assert!(
                projection.trend().unwrap().alert.is_none(),
                "10% change on {} kg raised an alert",
                last
            );
        }

        // 8.8 -> 11.0 kg: exactly 20%, a warning and not critical
        let projection =
            project_weight(&[sample(0, 8.8), sample(30, 11.0)], date(2024, 1, 31), &cfg);
        let alert = projection.trend().unwrap().alert.clone().unwrap();
        assert_eq!(alert.level, AlertLevel::Warning);
    }

    #[test]
    fn test_alert_levels_and_message() {
        let cfg = EngineConfig::default();

        let warning = rapid_change_alert(1.5, 10.0, &cfg).unwrap();
        assert_eq!(warning.level, AlertLevel::Warning);
        assert!(warning.message.contains("+1.50 kg/month"));

        let critical = rapid_change_alert(-2.5, 10.0, &cfg).unwrap();
        assert_eq!(critical.level, AlertLevel::Critical);
        assert!(critical.message.contains("-2.50 kg/month"));
        assert!(critical.message.contains("losing"));
    }
}
