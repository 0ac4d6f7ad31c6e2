use crate::domain::model::{
    FormContext, GeneratedProject, ProjectTemplate, ScoredTrend, DEFAULT_DOMAIN, FINANCE,
    HEALTH_AND_WELLNESS, TECHNOLOGY,
};
use std::collections::BTreeMap;

pub const MAX_ALIGNED_TRENDS: usize = 3;

pub const DEFAULT_CONSIDERATIONS: [&str; 3] = [
    "Local regulations apply",
    "Market research needed",
    "Cultural adaptation required",
];

const COUNTRY_CONSIDERATIONS: [(&str, &str, [&str; 3]); 9] = [
    (
        "United States",
        TECHNOLOGY,
        [
            "GDPR-like privacy laws emerging",
            "High competition",
            "Strong VC funding available",
        ],
    ),
    (
        "United States",
        HEALTH_AND_WELLNESS,
        [
            "FDA regulations for health apps",
            "HIPAA compliance required",
            "Insurance integration opportunities",
        ],
    ),
    (
        "United States",
        FINANCE,
        [
            "SEC regulations",
            "State-level licensing",
            "Strong fintech ecosystem",
        ],
    ),
    (
        "United Kingdom",
        TECHNOLOGY,
        [
            "GDPR compliance mandatory",
            "Brexit impact on data flows",
            "Government digital initiatives",
        ],
    ),
    (
        "United Kingdom",
        HEALTH_AND_WELLNESS,
        [
            "NHS integration potential",
            "NICE guidelines consideration",
            "Data protection strict",
        ],
    ),
    (
        "United Kingdom",
        FINANCE,
        [
            "FCA regulation",
            "Open banking standards",
            "Brexit financial services impact",
        ],
    ),
    (
        "Germany",
        TECHNOLOGY,
        [
            "Strict data protection laws",
            "Industry 4.0 initiatives",
            "Strong engineering culture",
        ],
    ),
    (
        "Germany",
        HEALTH_AND_WELLNESS,
        [
            "Medical device regulations",
            "Social insurance system",
            "Privacy-first approach",
        ],
    ),
    (
        "Germany",
        FINANCE,
        [
            "BaFin regulation",
            "Conservative investment culture",
            "Strong banking sector",
        ],
    ),
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Project templates grouped by domain.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, Vec<ProjectTemplate>>,
}

impl TemplateCatalog {
    pub fn builtin() -> Self {
        let mut templates = BTreeMap::new();

        templates.insert(
            TECHNOLOGY.to_string(),
            vec![
                ProjectTemplate {
                    title: "AI-Powered Productivity Assistant".to_string(),
                    description: "A smart assistant that integrates with popular work tools to optimize daily workflows"
                        .to_string(),
                    tech_requirements: strings(&[
                        "React/Vue.js frontend",
                        "Python/Node.js backend",
                        "OpenAI API integration",
                        "Cloud hosting",
                    ]),
                    success_metrics: strings(&[
                        "User engagement rate > 70%",
                        "Monthly retention > 85%",
                        "Task completion improvement > 30%",
                    ]),
                    market_opportunity: "$2.5B market size with 23% CAGR".to_string(),
                    estimated_cost: "$75K - $150K".to_string(),
                    risk_factors: strings(&[
                        "AI API dependency",
                        "Data privacy concerns",
                        "Competition from tech giants",
                    ]),
                },
                ProjectTemplate {
                    title: "No-Code Business Automation Platform".to_string(),
                    description: "Visual workflow builder for small businesses to automate repetitive tasks"
                        .to_string(),
                    tech_requirements: strings(&[
                        "Drag-and-drop interface",
                        "API integrations",
                        "Cloud infrastructure",
                        "Mobile app",
                    ]),
                    success_metrics: strings(&[
                        "Customer acquisition cost < $50",
                        "Monthly churn rate < 5%",
                        "Feature adoption > 60%",
                    ]),
                    market_opportunity: "$1.8B addressable market with 35% growth rate".to_string(),
                    estimated_cost: "$100K - $200K".to_string(),
                    risk_factors: strings(&[
                        "Market saturation",
                        "Technical complexity",
                        "User adoption challenges",
                    ]),
                },
            ],
        );

        templates.insert(
            HEALTH_AND_WELLNESS.to_string(),
            vec![ProjectTemplate {
                title: "Mental Health Companion App".to_string(),
                description: "AI-driven mental wellness platform with personalized therapy sessions and mood tracking"
                    .to_string(),
                tech_requirements: strings(&[
                    "Mobile app (iOS/Android)",
                    "AI chatbot",
                    "Data analytics",
                    "HIPAA compliance",
                ]),
                success_metrics: strings(&[
                    "Daily active users > 10K",
                    "Session completion rate > 80%",
                    "User well-being improvement scores",
                ]),
                market_opportunity: "$4.2B mental health app market, growing at 20% annually"
                    .to_string(),
                estimated_cost: "$120K - $250K".to_string(),
                risk_factors: strings(&[
                    "Regulatory compliance",
                    "Clinical validation",
                    "User safety concerns",
                ]),
            }],
        );

        templates.insert(
            FINANCE.to_string(),
            vec![ProjectTemplate {
                title: "Crypto Portfolio Management Tool".to_string(),
                description: "Advanced analytics platform for cryptocurrency investment tracking and optimization"
                    .to_string(),
                tech_requirements: strings(&[
                    "Real-time data feeds",
                    "Advanced charting",
                    "Portfolio analytics",
                    "Security protocols",
                ]),
                success_metrics: strings(&[
                    "Assets under management > $10M",
                    "User portfolio performance improvement",
                    "Platform reliability 99.9%",
                ]),
                market_opportunity: "$1.1B crypto management tools market with 45% growth"
                    .to_string(),
                estimated_cost: "$90K - $180K".to_string(),
                risk_factors: strings(&[
                    "Regulatory uncertainty",
                    "Market volatility",
                    "Security vulnerabilities",
                ]),
            }],
        );

        Self { templates }
    }

    /// Templates for `domain`, or the default domain's when it is unknown.
    pub fn templates_for(&self, domain: &str) -> &[ProjectTemplate] {
        self.templates
            .get(domain)
            .or_else(|| self.templates.get(DEFAULT_DOMAIN))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// "individuals aged 25-34 in Japan with high income level interested in ai"
pub fn target_audience(form: &FormContext) -> String {
    let mut parts = Vec::with_capacity(4);

    match form.age_range() {
        Some(age_range) => parts.push(format!("individuals aged {}", age_range)),
        None => parts.push("professionals".to_string()),
    }
    parts.push(format!("in {}", form.country));
    if let Some(income_level) = form.income_level() {
        parts.push(format!("with {} income level", income_level));
    }
    if let Some(interests) = form.interests() {
        parts.push(format!("interested in {}", interests));
    }

    parts.join(" ")
}

/// Never empty: pairs missing from the table yield [`DEFAULT_CONSIDERATIONS`].
pub fn country_considerations(country: &str, domain: &str) -> Vec<String> {
    COUNTRY_CONSIDERATIONS
        .iter()
        .find(|(c, d, _)| *c == country && *d == domain)
        .map(|(_, _, items)| strings(items))
        .unwrap_or_else(|| strings(&DEFAULT_CONSIDERATIONS))
}

fn words(text: &str) -> Vec<String> {
    text.to_lowercase().split(' ').map(str::to_string).collect()
}

/// Names of the first trends, in ranked order, sharing a word with `title`.
/// Two words overlap when either contains the other.
pub fn aligned_trends(title: &str, trends: &[ScoredTrend]) -> Vec<String> {
    let title_words = words(title);

    trends
        .iter()
        .filter(|trend| {
            let trend_words = words(trend.name());
            title_words.iter().any(|word| {
                trend_words
                    .iter()
                    .any(|trend_word| {
                        word.contains(trend_word.as_str()) || trend_word.contains(word.as_str())
                    })
            })
        })
        .take(MAX_ALIGNED_TRENDS)
        .map(|trend| trend.name().to_string())
        .collect()
}

/// Builds one project per template of the requested domain.
pub fn generate_projects(
    templates: &TemplateCatalog,
    form: &FormContext,
    trends: &[ScoredTrend],
) -> Vec<GeneratedProject> {
    let complexity = form.complexity();
    let audience = target_audience(form);
    let considerations = country_considerations(&form.country, &form.domain);

    templates
        .templates_for(&form.domain)
        .iter()
        .map(|template| {
            let aligned = aligned_trends(&template.title, trends);
            tracing::debug!(
                "Template '{}' aligned with {} trends",
                template.title,
                aligned.len()
            );
            GeneratedProject {
                template: template.clone(),
                domain: form.domain.clone(),
                complexity,
                timeline: complexity.timeline().to_string(),
                target_audience: audience.clone(),
                country_considerations: considerations.clone(),
                aligned_trends: aligned,
            }
        })
        .collect()
}
