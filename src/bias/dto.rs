use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BiasStatus {
    #[serde(rename = "Low Bias")]
    Low,
    #[serde(rename = "Moderate Bias")]
    Moderate,
    #[serde(rename = "High Bias")]
    High,
    #[serde(rename = "Critical Bias")]
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BiasMetrics {
    pub disparate_impact: f64,
    pub statistical_parity: f64,
    pub bias_score: f64,
    pub risk_level: RiskLevel,
    pub sample_size: u32,
    pub confidence: f64,
}

/// Synthetic bias report. Rates are independent draws and do not sum to 100.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub bias_score: f64,
    pub status: BiasStatus,
    pub message: String,
    pub male_rate: f64,
    pub female_rate: f64,
    pub other_rate: f64,
    pub metrics: BiasMetrics,
    pub recommendations: Vec<&'static str>,
}

/// Report plus the upload it was produced for.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub file_name: String,
    pub file_size: u64,
    pub industry: String,
    pub analysis_time: i64,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub industry: String,
    pub format: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub message: &'static str,
    pub timestamp: i64,
}
