//! Table-driven mapping of raw metrics onto the common 0-100 scale.
//!
//! Every curve is monotonic in the direction "worse raw value => lower
//! score". No analyzer-specific logic lives here beyond the table lookup.

use crate::config::ConfigurationError;
use crate::{CurveId, MetricId, MetricValue, NormalizedScore, RawMetric};

/// A normalization curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// true -> 100, false -> 0
    BooleanPass,
    /// 100 inside [lo, hi]; below: value/lo * 100; above: 100 - ((value-hi)/hi) * 100
    TargetRange { lo: f64, hi: f64 },
    /// 100 - min(100, count * per)
    CountPenalty { per: f64 },
    /// 100 at or below fast, 0 at or above slow, linear in between
    DurationRamp { fast_ms: f64, slow_ms: f64 },
}

impl Curve {
    pub fn id(&self) -> CurveId {
        match self {
            Curve::BooleanPass => CurveId::BooleanPass,
            Curve::TargetRange { .. } => CurveId::TargetRange,
            Curve::CountPenalty { .. } => CurveId::CountPenalty,
            Curve::DurationRamp { .. } => CurveId::DurationRamp,
        }
    }

    /// Apply the curve. None when the value kind doesn't fit the curve.
    fn apply(&self, value: &MetricValue) -> Option<f64> {
        let score = match (self, value) {
            (Curve::BooleanPass, MetricValue::Boolean(b)) => {
                if *b {
                    100.0
                } else {
                    0.0
                }
            }
            (Curve::BooleanPass, _) => return None,
            (Curve::TargetRange { lo, hi }, v) => {
                let value = numeric(v)?;
                if value >= *lo && value <= *hi {
                    100.0
                } else if value < *lo {
                    if *lo > 0.0 {
                        value / lo * 100.0
                    } else {
                        100.0
                    }
                } else {
                    100.0 - ((value - hi) / hi) * 100.0
                }
            }
            (Curve::CountPenalty { per }, v) => {
                let count = numeric(v)?;
                100.0 - (count * per).min(100.0)
            }
            (Curve::DurationRamp { fast_ms, slow_ms }, MetricValue::DurationMs(ms)) => {
                if *ms <= *fast_ms {
                    100.0
                } else if *ms >= *slow_ms {
                    0.0
                } else {
                    100.0 * (slow_ms - ms) / (slow_ms - fast_ms)
                }
            }
            (Curve::DurationRamp { .. }, _) => return None,
        };
        Some(score.clamp(0.0, 100.0))
    }
}

fn numeric(value: &MetricValue) -> Option<f64> {
    match value {
        MetricValue::Count(n) => Some(*n as f64),
        MetricValue::Ratio(r) => Some(*r),
        MetricValue::DurationMs(ms) => Some(*ms),
        MetricValue::Scale(s) => Some(*s),
        MetricValue::Boolean(_) => None,
    }
}

/// The normalization table: one curve per metric.
pub fn curve_for(id: MetricId) -> Curve {
    match id {
        MetricId::TitleLength => Curve::TargetRange { lo: 50.0, hi: 60.0 },
        MetricId::MetaDescriptionLength => Curve::TargetRange { lo: 50.0, hi: 160.0 },
        MetricId::H1Count => Curve::TargetRange { lo: 1.0, hi: 1.0 },
        MetricId::InternalLinkCount => Curve::TargetRange { lo: 5.0, hi: 20.0 },
        MetricId::ExternalLinkCount => Curve::TargetRange { lo: 2.0, hi: 10.0 },
        MetricId::InternalLinkRatio => Curve::TargetRange { lo: 0.5, hi: 0.9 },
        MetricId::ImagesMissingAlt => Curve::CountPenalty { per: 10.0 },
        MetricId::InlineAssets => Curve::CountPenalty { per: 5.0 },
        MetricId::SemanticRatio => Curve::TargetRange { lo: 0.5, hi: 1.0 },
        MetricId::ValidityIssues => Curve::CountPenalty { per: 5.0 },
        MetricId::HeadingOrderViolations => Curve::CountPenalty { per: 15.0 },
        MetricId::Indexability => Curve::BooleanPass,
        MetricId::SitemapPresent => Curve::BooleanPass,
        MetricId::TextHtmlRatio => Curve::TargetRange { lo: 0.25, hi: 0.7 },
        MetricId::LoadTime => Curve::DurationRamp {
            fast_ms: 2000.0,
            slow_ms: 6000.0,
        },
        MetricId::LlmBotDirectives => Curve::BooleanPass,
        MetricId::FleschReadingEase => Curve::TargetRange { lo: 60.0, hi: 80.0 },
        MetricId::AvgSentenceLength => Curve::TargetRange { lo: 1.0, hi: 14.0 },
        MetricId::LexicalComplexity => Curve::TargetRange { lo: 0.0, hi: 0.15 },
    }
}

/// Normalize one raw metric via the table.
pub fn normalize(metric: &RawMetric) -> Result<NormalizedScore, ConfigurationError> {
    let curve = curve_for(metric.id);
    let score = curve
        .apply(&metric.value)
        .ok_or(ConfigurationError::CurveMismatch {
            metric: metric.id,
            curve: curve.id(),
        })?;
    Ok(NormalizedScore {
        metric: metric.id,
        score,
        curve: curve.id(),
    })
}

/// Verify every table entry fits its metric's value kind. Run once at
/// engine construction so mismatches surface before any analysis.
pub fn check_table() -> Result<(), ConfigurationError> {
    for id in MetricId::ALL {
        let probe = match curve_for(id) {
            Curve::BooleanPass => MetricValue::Boolean(true),
            Curve::TargetRange { .. } | Curve::CountPenalty { .. } => MetricValue::Count(0),
            Curve::DurationRamp { .. } => MetricValue::DurationMs(0.0),
        };
        normalize(&RawMetric::new(id, probe))?;
    }
    Ok(())
}
