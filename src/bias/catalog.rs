//! Fixed per-industry lookup tables. Keys are lowercase; lookups fold the
//! caller's industry to lowercase and fall back to a generic entry.

pub const DEFAULT_BASE_BIAS: f64 = 25.0;
pub const DEFAULT_FORMAT: &str = "Gender,Feature1,Feature2,Selected";
pub const DEFAULT_DESCRIPTION: &str = "Analyzes bias in decision-making systems";

pub const DEFAULT_RECOMMENDATIONS: [&str; 5] = [
    "Review data collection methods for potential bias",
    "Implement regular bias audits of decision systems",
    "Diversify training datasets across demographic groups",
    "Transparent algorithmic decision-making processes",
    "Establish bias monitoring and response protocols",
];

const BASE_BIAS: &[(&str, f64)] = &[
    ("hiring", 25.0),
    ("finance", 35.0),
    ("education", 20.0),
    ("health", 30.0),
    ("justice", 40.0),
    ("ecommerce", 15.0),
    ("social", 22.0),
    ("industrial", 28.0),
];

const FORMATS: &[(&str, &str)] = &[
    ("hiring", "Gender,Experience,Position,Selected"),
    ("finance", "Gender,Income,CreditScore,LoanApproved"),
    ("education", "Gender,TestScore,Extracurriculars,Admitted"),
    ("health", "Gender,Age,Symptoms,TreatmentGiven"),
    ("justice", "Ethnicity,Priors,BailAmount,Sentenced"),
    ("ecommerce", "UserGender,BrowsingHistory,PriceShown,Purchased"),
    ("social", "UserDemographic,ContentType,Visibility,Engagement"),
    ("industrial", "WorkerGender,Experience,SafetyIncidents,Promoted"),
];

const DESCRIPTIONS: &[(&str, &str)] = &[
    ("hiring", "Analyzes gender bias in hiring decisions"),
    ("finance", "Detects bias in loan approvals and credit scoring"),
    ("education", "Identifies bias in admissions and grading"),
    ("health", "Analyzes bias in medical treatment recommendations"),
    ("justice", "Detects bias in bail amounts and sentencing"),
    ("ecommerce", "Identifies price discrimination and recommendation bias"),
    ("social", "Analyzes content visibility and engagement bias"),
    ("industrial", "Detects bias in promotions and safety evaluations"),
];

const RECOMMENDATIONS: &[(&str, [&str; 5])] = &[
    (
        "hiring",
        [
            "Implement blind resume screening",
            "Standardize interview questions across all candidates",
            "Set diversity goals for hiring panels",
            "Regular bias audits of hiring algorithms",
            "Use structured interviews with scoring rubrics",
        ],
    ),
    (
        "finance",
        [
            "Remove ZIP code and neighborhood data from loan decisions",
            "Audit interest rate algorithms monthly for disparities",
            "Provide alternative credit scoring options",
            "Transparent loan approval criteria accessible to applicants",
            "Regular training on fair lending practices",
        ],
    ),
    (
        "education",
        [
            "Review admission criteria for socioeconomic bias",
            "Implement anonymous grading where possible",
            "Diversify curriculum examples and case studies",
            "Regular faculty bias training and workshops",
            "Monitor grade distributions across demographic groups",
        ],
    ),
    (
        "health",
        [
            "Standard treatment protocols for all demographics",
            "Regular bias audits of diagnostic algorithms",
            "Diverse representation in clinical trials",
            "Cultural competency training for medical staff",
            "Patient outcome monitoring by demographic",
        ],
    ),
];

fn lookup<T: Copy>(table: &[(&str, T)], industry: &str) -> Option<T> {
    let key = industry.to_lowercase();
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn base_bias(industry: &str) -> f64 {
    lookup(BASE_BIAS, industry).unwrap_or(DEFAULT_BASE_BIAS)
}

/// Expected CSV header for an industry's upload.
pub fn format(industry: &str) -> &'static str {
    lookup(FORMATS, industry).unwrap_or(DEFAULT_FORMAT)
}

pub fn description(industry: &str) -> &'static str {
    lookup(DESCRIPTIONS, industry).unwrap_or(DEFAULT_DESCRIPTION)
}

pub fn recommendations(industry: &str) -> [&'static str; 5] {
    lookup(RECOMMENDATIONS, industry).unwrap_or(DEFAULT_RECOMMENDATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_known_and_fallback() {
        assert_eq!(format("hiring"), "Gender,Experience,Position,Selected");
        assert_eq!(format("nonexistent"), "Gender,Feature1,Feature2,Selected");
    }

    #[test]
    fn lookups_fold_case() {
        assert_eq!(format("JUSTICE"), "Ethnicity,Priors,BailAmount,Sentenced");
        assert_eq!(description("Finance"), "Detects bias in loan approvals and credit scoring");
        assert_eq!(base_bias("EcoMmerce"), 15.0);
    }

    #[test]
    fn base_bias_defaults_to_25() {
        assert_eq!(base_bias("unknown"), DEFAULT_BASE_BIAS);
        assert_eq!(base_bias(""), 25.0);
        assert_eq!(base_bias("justice"), 40.0);
    }

    #[test]
    fn recommendations_fall_back_for_industries_without_a_list() {
        // social has a format and description but no dedicated recommendations
        assert_eq!(recommendations("social"), DEFAULT_RECOMMENDATIONS);
        assert_eq!(recommendations("Health")[0], "Standard treatment protocols for all demographics");
    }

    #[test]
    fn description_fallback() {
        assert_eq!(description("mystery"), DEFAULT_DESCRIPTION);
    }
}
