use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TECHNOLOGY: &str = "Technology";
pub const HEALTH_AND_WELLNESS: &str = "Health & Wellness";
pub const FINANCE: &str = "Finance";

/// Domain used when the requested one is empty or has no catalog entry.
pub const DEFAULT_DOMAIN: &str = TECHNOLOGY;

/// Form input driving one analysis request.
///
/// Optional fields that hold an empty string are treated exactly like absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormContext {
    pub domain: String,
    pub country: String,
    pub age_range: Option<String>,
    pub income_level: Option<String>,
    pub interests: Option<String>,
    pub complexity: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl FormContext {
    pub fn new(domain: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            country: country.into(),
            ..Self::default()
        }
    }

    pub fn with_age_range(mut self, age_range: impl Into<String>) -> Self {
        self.age_range = Some(age_range.into());
        self
    }

    pub fn with_income_level(mut self, income_level: impl Into<String>) -> Self {
        self.income_level = Some(income_level.into());
        self
    }

    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = Some(interests.into());
        self
    }

    pub fn with_complexity(mut self, complexity: impl Into<String>) -> Self {
        self.complexity = Some(complexity.into());
        self
    }

    pub fn age_range(&self) -> Option<&str> {
        non_empty(&self.age_range)
    }

    pub fn income_level(&self) -> Option<&str> {
        non_empty(&self.income_level)
    }

    pub fn interests(&self) -> Option<&str> {
        non_empty(&self.interests)
    }

    pub fn complexity(&self) -> Complexity {
        Complexity::from_input(non_empty(&self.complexity))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
}

impl Complexity {
    /// Unknown or missing input maps to `Medium`.
    pub fn from_input(input: Option<&str>) -> Self {
        match input {
            Some("simple") => Self::Simple,
            Some("complex") => Self::Complex,
            _ => Self::Medium,
        }
    }

    pub fn timeline(&self) -> &'static str {
        match self {
            Self::Simple => "4-6 weeks",
            Self::Medium => "8-12 weeks",
            Self::Complex => "12-16 weeks",
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Self::Simple => 1,
            Self::Medium => 2,
            Self::Complex => 3,
        }
    }

    pub fn estimated_weeks(&self) -> u32 {
        match self {
            Self::Simple => 4,
            Self::Medium => 8,
            Self::Complex => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    #[serde(alias = "md")]
    #[cfg_attr(feature = "cli", value(alias = "md"))]
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }

    pub fn file_name(&self) -> String {
        format!("project-specs.{}", self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRecord {
    pub name: String,
    pub domain: String,
    pub score: u8,
    pub growth_rate: String,
    pub keywords: Vec<String>,
}

impl TrendRecord {
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        score: u8,
        growth_rate: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let keywords = name.to_lowercase().split(' ').map(str::to_string).collect();
        Self {
            name,
            domain: domain.into(),
            score,
            growth_rate: growth_rate.into(),
            keywords,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.domain.is_empty() && self.score <= 100
    }

    pub fn is_high_performing(&self) -> bool {
        self.score >= 80
    }

    pub fn is_growing(&self) -> bool {
        self.growth_rate.contains('+')
    }

    /// "+45%" -> 45.0, "-3.5%" -> -3.5. Unparseable strings yield `None`.
    pub fn growth_rate_value(&self) -> Option<f64> {
        self.growth_rate
            .trim()
            .trim_end_matches('%')
            .trim_start_matches('+')
            .parse()
            .ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualFactors {
    pub country_relevance: f64,
    pub income_relevance: f64,
}

impl Default for ContextualFactors {
    fn default() -> Self {
        Self {
            country_relevance: 1.0,
            income_relevance: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTrend {
    #[serde(flatten)]
    pub trend: TrendRecord,
    pub adjusted_score: u8,
    pub contextual_factors: ContextualFactors,
}

impl ScoredTrend {
    pub fn name(&self) -> &str {
        &self.trend.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplate {
    pub title: String,
    pub description: String,
    pub tech_requirements: Vec<String>,
    pub success_metrics: Vec<String>,
    pub market_opportunity: String,
    pub estimated_cost: String,
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    #[serde(flatten)]
    pub template: ProjectTemplate,
    pub domain: String,
    pub complexity: Complexity,
    pub timeline: String,
    pub target_audience: String,
    pub country_considerations: Vec<String>,
    pub aligned_trends: Vec<String>,
}

impl GeneratedProject {
    pub fn title(&self) -> &str {
        &self.template.title
    }

    pub fn is_high_viability(&self) -> bool {
        self.aligned_trends.len() >= 2 && self.template.success_metrics.len() >= 3
    }

    pub fn complexity_level(&self) -> u8 {
        self.complexity.level()
    }

    pub fn estimated_duration_weeks(&self) -> u32 {
        self.complexity.estimated_weeks()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    pub total_found: usize,
    pub filtered: usize,
    pub generated_count: usize,
    pub domain: String,
    pub country: String,
    pub complexity: Complexity,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub trends: Vec<ScoredTrend>,
    pub projects: Vec<GeneratedProject>,
    pub metadata: ResultMetadata,
    pub form_data: FormContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_derived_from_name() {
        let trend = TrendRecord::new("AI-Powered Personal Assistants", TECHNOLOGY, 95, "+45%");
        assert_eq!(trend.keywords, vec!["ai-powered", "personal", "assistants"]);
    }

    #[test]
    fn test_high_performing_starts_at_eighty() {
        assert!(TrendRecord::new("Wearable Health Tech", HEALTH_AND_WELLNESS, 80, "+25%")
            .is_high_performing());
        assert!(!TrendRecord::new("Wearable Health Tech", HEALTH_AND_WELLNESS, 79, "+25%")
            .is_high_performing());
    }

    fn project(complexity: Complexity, aligned: &[&str]) -> GeneratedProject {
        GeneratedProject {
            template: ProjectTemplate {
                title: "Crypto Portfolio Management Tool".to_string(),
                description: String::new(),
                tech_requirements: Vec::new(),
                success_metrics: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                market_opportunity: String::new(),
                estimated_cost: String::new(),
                risk_factors: Vec::new(),
            },
            domain: FINANCE.to_string(),
            complexity,
            timeline: complexity.timeline().to_string(),
            target_audience: String::new(),
            country_considerations: Vec::new(),
            aligned_trends: aligned.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_project_duration_follows_complexity() {
        let weeks: Vec<u32> = [Complexity::Simple, Complexity::Medium, Complexity::Complex]
            .into_iter()
            .map(|c| project(c, &[]).estimated_duration_weeks())
            .collect();
        assert_eq!(weeks, vec![4, 8, 12]);
        assert_eq!(project(Complexity::Complex, &[]).complexity_level(), 3);
    }

    #[test]
    fn test_high_viability_needs_two_aligned_trends() {
        let crypto = "Cryptocurrency Trading Tools";
        let esg = "ESG Investment Platforms";
        assert!(!project(Complexity::Medium, &[crypto]).is_high_viability());
        assert!(project(Complexity::Medium, &[crypto, esg]).is_high_viability());
    }

    #[test]
    fn test_growth_rate_parsing() {
        let growing = TrendRecord::new("Edge Computing Solutions", TECHNOLOGY, 82, "+28%");
        assert!(growing.is_growing());
        assert_eq!(growing.growth_rate_value(), Some(28.0));

        let shrinking = TrendRecord::new("Legacy Hosting", TECHNOLOGY, 40, "-3.5%");
        assert!(!shrinking.is_growing());
        assert_eq!(shrinking.growth_rate_value(), Some(-3.5));

        let unknown = TrendRecord::new("Mystery", TECHNOLOGY, 40, "n/a");
        assert_eq!(unknown.growth_rate_value(), None);
    }

    #[test]
    fn test_record_validity() {
        assert!(TrendRecord::new("Mental Health Apps", HEALTH_AND_WELLNESS, 92, "+38%").is_valid());
        assert!(!TrendRecord::new("", FINANCE, 50, "+1%").is_valid());
        assert!(!TrendRecord::new("Overflow", FINANCE, 101, "+1%").is_valid());
    }

    #[test]
    fn test_complexity_fallback() {
        assert_eq!(Complexity::from_input(Some("simple")), Complexity::Simple);
        assert_eq!(Complexity::from_input(Some("complex")), Complexity::Complex);
        assert_eq!(Complexity::from_input(Some("extreme")), Complexity::Medium);
        assert_eq!(Complexity::from_input(None), Complexity::Medium);
        assert_eq!(Complexity::Complex.timeline(), "12-16 weeks");
    }

    #[test]
    fn test_empty_optional_fields_read_as_absent() {
        let form = FormContext {
            age_range: Some(String::new()),
            interests: Some("ai".to_string()),
            ..FormContext::new(FINANCE, "Germany")
        };
        assert_eq!(form.age_range(), None);
        assert_eq!(form.interests(), Some("ai"));
        assert_eq!(form.complexity(), Complexity::Medium);
    }

    #[test]
    fn test_form_context_deserializes_camel_case() {
        let form: FormContext = serde_json::from_str(
            r#"{"domain":"Finance","country":"India","ageRange":"25-34","incomeLevel":"high"}"#,
        )
        .unwrap();
        assert_eq!(form.age_range(), Some("25-34"));
        assert_eq!(form.income_level(), Some("high"));
        assert_eq!(form.interests(), None);
    }
}
