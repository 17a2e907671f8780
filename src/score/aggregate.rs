//! Weighted aggregation of normalized scores into category scores and the
//! composite. Pure function of its inputs; no I/O.

use std::collections::HashMap;

use crate::config::ScoringConfig;
use crate::snapshot::PageSnapshot;
use crate::{
    AnalysisReport, Category, CategoryReport, CategoryStatus, Finding, Grade, NormalizedScore,
    RawMetric,
};

/// Combine metrics, scores and findings into the final report.
///
/// Category score = weighted sum of member scores. The composite weights
/// unavailable categories out entirely: remaining category weights are
/// re-normalized so a failed analyzer never reads as a zero score.
pub fn build_report(
    snapshot: &PageSnapshot,
    scoring: &ScoringConfig,
    metrics: Vec<RawMetric>,
    scores: Vec<NormalizedScore>,
    findings: Vec<Finding>,
    unavailable: HashMap<Category, String>,
) -> AnalysisReport {
    let mut category_scores: HashMap<Category, f64> = HashMap::new();
    for category in Category::ALL {
        if unavailable.contains_key(&category) {
            continue;
        }
        category_scores.insert(category, category_score(scoring, &scores, category));
    }

    let available_weight: f64 = Category::ALL
        .iter()
        .filter(|c| category_scores.contains_key(c))
        .map(|c| scoring.category_weight(*c))
        .sum();

    let mut composite = 0.0;
    let mut categories = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        match category_scores.get(&category) {
            Some(score) => {
                let weight = if available_weight > 0.0 {
                    scoring.category_weight(category) / available_weight
                } else {
                    0.0
                };
                composite += score * weight;
                categories.push(CategoryReport {
                    category,
                    status: CategoryStatus::Computed { score: *score },
                    weight,
                });
            }
            None => {
                let reason = unavailable
                    .get(&category)
                    .cloned()
                    .unwrap_or_else(|| "analyzer failed".to_string());
                categories.push(CategoryReport {
                    category,
                    status: CategoryStatus::Unavailable { reason },
                    weight: 0.0,
                });
            }
        }
    }

    let composite = composite.clamp(0.0, 100.0);

    AnalysisReport {
        url: snapshot.url.to_string(),
        fetched_at: snapshot.fetched_at,
        composite,
        grade: Grade::from_score(composite),
        categories,
        metrics,
        scores,
        findings,
    }
}

/// Weighted sum of the category's member scores, normalized by the weight
/// actually present so a missing metric cannot silently deflate the score.
fn category_score(scoring: &ScoringConfig, scores: &[NormalizedScore], category: Category) -> f64 {
    let members: Vec<&NormalizedScore> = scores
        .iter()
        .filter(|s| s.metric.category() == category)
        .collect();

    let weight_sum: f64 = members.iter().map(|s| scoring.metric_weight(s.metric)).sum();
    if weight_sum <= 0.0 {
        return 0.0;
    }

    let weighted: f64 = members
        .iter()
        .map(|s| s.score * scoring.metric_weight(s.metric))
        .sum();
    (weighted / weight_sum).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CurveId, MetricId};

    fn score(metric: MetricId, value: f64) -> NormalizedScore {
        NormalizedScore {
            metric,
            score: value,
            curve: CurveId::TargetRange,
        }
    }

    fn snapshot() -> PageSnapshot {
        PageSnapshot::from_html("https://example.com/", "<p>x</p>")
    }

    #[test]
    fn test_category_score_is_weighted_sum() {
        let scoring = ScoringConfig::default_weights();
        // AI readability: semantic .40, validity .30, heading .30
        let scores = vec![
            score(MetricId::SemanticRatio, 100.0),
            score(MetricId::ValidityIssues, 50.0),
            score(MetricId::HeadingOrderViolations, 0.0),
        ];
        let s = category_score(&scoring, &scores, Category::AiReadability);
        assert!((s - 55.0).abs() < 1e-9, "score was {}", s);
    }

    #[test]
    fn test_composite_equal_weights() {
        let scoring = ScoringConfig::default_weights();
        let scores = vec![
            score(MetricId::SemanticRatio, 80.0),
            score(MetricId::ValidityIssues, 80.0),
            score(MetricId::HeadingOrderViolations, 80.0),
            score(MetricId::Indexability, 40.0),
            score(MetricId::SitemapPresent, 40.0),
            score(MetricId::TextHtmlRatio, 40.0),
            score(MetricId::LoadTime, 40.0),
            score(MetricId::LlmBotDirectives, 40.0),
        ];
        let mut unavailable = HashMap::new();
        unavailable.insert(Category::Seo, "x".to_string());
        unavailable.insert(Category::TextReadability, "y".to_string());

        let report = build_report(
            &snapshot(),
            &scoring,
            Vec::new(),
            scores,
            Vec::new(),
            unavailable,
        );
        // Two available categories at equal weight: (80 + 40) / 2
        assert!((report.composite - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_unavailable_category_is_not_zero() {
        let scoring = ScoringConfig::default_weights();
        let scores = vec![
            score(MetricId::SemanticRatio, 100.0),
            score(MetricId::ValidityIssues, 100.0),
            score(MetricId::HeadingOrderViolations, 100.0),
        ];
        let mut unavailable = HashMap::new();
        for category in [Category::Seo, Category::Crawlability, Category::TextReadability] {
            unavailable.insert(category, "failed".to_string());
        }

        let report = build_report(
            &snapshot(),
            &scoring,
            Vec::new(),
            scores,
            Vec::new(),
            unavailable,
        );
        // The single available category carries all the weight
        assert!((report.composite - 100.0).abs() < 1e-9);
        let ai = report.category(Category::AiReadability).unwrap();
        assert!((ai.weight - 1.0).abs() < 1e-9);
        let seo = report.category(Category::Seo).unwrap();
        assert_eq!(
            seo.status,
            CategoryStatus::Unavailable {
                reason: "failed".to_string()
            }
        );
        assert_eq!(seo.weight, 0.0);
    }

    #[test]
    fn test_all_unavailable_yields_zero_composite() {
        let scoring = ScoringConfig::default_weights();
        let mut unavailable = HashMap::new();
        for category in Category::ALL {
            unavailable.insert(category, "failed".to_string());
        }
        let report = build_report(
            &snapshot(),
            &scoring,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            unavailable,
        );
        assert_eq!(report.composite, 0.0);
        assert_eq!(report.grade, Grade::F);
    }
}
