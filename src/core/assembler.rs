use crate::domain::model::{
    FormContext, GeneratedProject, ResultMetadata, ResultPayload, ScoredTrend,
};
use chrono::{DateTime, Utc};

/// Packages one request's stage outputs into the payload returned to callers.
#[derive(Debug, Clone, Copy)]
pub struct ResultAssembler {
    total_found: usize,
}

impl ResultAssembler {
    /// `total_found` is the number of catalog trends seen before filtering.
    pub fn new(total_found: usize) -> Self {
        Self { total_found }
    }

    pub fn assemble(
        &self,
        trends: Vec<ScoredTrend>,
        projects: Vec<GeneratedProject>,
        form: &FormContext,
    ) -> ResultPayload {
        self.assemble_at(trends, projects, form, Utc::now())
    }

    pub fn assemble_at(
        &self,
        trends: Vec<ScoredTrend>,
        projects: Vec<GeneratedProject>,
        form: &FormContext,
        generated_at: DateTime<Utc>,
    ) -> ResultPayload {
        let metadata = ResultMetadata {
            total_found: self.total_found,
            filtered: trends.len(),
            generated_count: projects.len(),
            domain: form.domain.clone(),
            country: form.country.clone(),
            complexity: form.complexity(),
            generated_at,
        };

        ResultPayload {
            trends,
            projects,
            metadata,
            form_data: form.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Complexity, TrendRecord, FINANCE};
    use crate::core::scoring::score_trend;
    use chrono::TimeZone;

    #[test]
    fn test_metadata_counts_and_echo() {
        let form = FormContext::new(FINANCE, "India").with_complexity("simple");
        let trend = TrendRecord::new("AI Financial Advisors", FINANCE, 85, "+33%");
        let trends = vec![score_trend(&trend, &form)];
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let payload = ResultAssembler::new(4).assemble_at(trends, Vec::new(), &form, at);

        assert_eq!(payload.metadata.total_found, 4);
        assert_eq!(payload.metadata.filtered, 1);
        assert_eq!(payload.metadata.generated_count, 0);
        assert_eq!(payload.metadata.domain, FINANCE);
        assert_eq!(payload.metadata.country, "India");
        assert_eq!(payload.metadata.complexity, Complexity::Simple);
        assert_eq!(payload.metadata.generated_at, at);
        assert_eq!(payload.form_data, form);
    }

    #[test]
    fn test_payload_serializes_with_camel_case_keys() {
        let form = FormContext::new(FINANCE, "India");
        let trend = TrendRecord::new("AI Financial Advisors", FINANCE, 85, "+33%");
        let trends = vec![score_trend(&trend, &form)];
        let payload = ResultAssembler::new(1).assemble(trends, Vec::new(), &form);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["trends"][0]["adjustedScore"], 98);
        assert_eq!(json["trends"][0]["growthRate"], "+33%");
        assert_eq!(json["trends"][0]["contextualFactors"]["countryRelevance"], 1.15);
        assert_eq!(json["metadata"]["totalFound"], 1);
        assert!(json["metadata"]["generatedAt"].is_string());
    }
}
