use std::sync::Arc;

use time::OffsetDateTime;
use tracing::debug;

use crate::bias::catalog;
use crate::bias::dto::{AnalysisReport, BiasMetrics, BiasStatus, RiskLevel};
use crate::bias::random::RandomSource;

const SCORE_SPREAD: f64 = 25.0;
const RATE_FLOOR: f64 = 30.0;
const RATE_SPREAD: f64 = 40.0;
const OTHER_RATE_FLOOR: f64 = 5.0;
const OTHER_RATE_SPREAD: f64 = 15.0;
const SAMPLE_FLOOR: u32 = 100;
const SAMPLE_SPREAD: u32 = 900;

/// Produces synthetic bias reports. The uploaded file is never parsed; only
/// the industry baseline and the random source shape the result.
#[derive(Clone)]
pub struct BiasAnalyzer {
    rng: Arc<dyn RandomSource>,
}

impl BiasAnalyzer {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }

    pub fn analyze(&self, industry: &str, file_size: u64) -> AnalysisReport {
        let base = catalog::base_bias(industry);
        // draw order: score, male, female, other, sample size
        let bias_score = base + self.rng.next_unit() * SCORE_SPREAD;
        let male_rate = RATE_FLOOR + self.rng.next_unit() * RATE_SPREAD;
        let female_rate = RATE_FLOOR + self.rng.next_unit() * RATE_SPREAD;
        let other_rate = OTHER_RATE_FLOOR + self.rng.next_unit() * OTHER_RATE_SPREAD;

        let disparate_impact = (male_rate - female_rate).abs();
        let statistical_parity = 100.0 - disparate_impact;

        let reported_score = round1(bias_score);
        let (status, risk_level) = classify(reported_score);
        let sample_size = SAMPLE_FLOOR + self.rng.next_below(SAMPLE_SPREAD);
        let confidence = 95.0 - bias_score / 2.0;

        debug!(industry, file_size, bias_score = reported_score, ?status, "report generated");

        AnalysisReport {
            bias_score: reported_score,
            status,
            message: format!("Analysis of {industry} data completed"),
            male_rate: round1(male_rate),
            female_rate: round1(female_rate),
            other_rate: round1(other_rate),
            metrics: BiasMetrics {
                disparate_impact: round1(disparate_impact),
                statistical_parity: round1(statistical_parity),
                bias_score: reported_score,
                risk_level,
                sample_size,
                confidence: round1(confidence),
            },
            recommendations: catalog::recommendations(industry).to_vec(),
        }
    }
}

/// Tenths precision, halves rounded up: `floor(x * 10 + 0.5) / 10`.
pub fn round1(x: f64) -> f64 {
    (x * 10.0 + 0.5).floor() / 10.0
}

pub fn classify(score: f64) -> (BiasStatus, RiskLevel) {
    if score < 20.0 {
        (BiasStatus::Low, RiskLevel::Low)
    } else if score < 40.0 {
        (BiasStatus::Moderate, RiskLevel::Medium)
    } else if score < 60.0 {
        (BiasStatus::High, RiskLevel::High)
    } else {
        (BiasStatus::Critical, RiskLevel::Critical)
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
