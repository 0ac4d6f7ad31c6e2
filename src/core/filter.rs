use crate::core::scoring::{age_relevance, score_trends};
use crate::domain::model::{FormContext, ScoredTrend, TrendRecord};

/// Trends whose age relevance falls below this are dropped.
///
/// The age table never yields less than 0.7, so this currently removes nothing.
pub const AGE_RELEVANCE_DROP_THRESHOLD: f64 = 0.5;

/// Lowercased, trimmed interest tokens from a comma separated list.
pub fn parse_interests(interests: &str) -> Vec<String> {
    interests
        .to_lowercase()
        .split(',')
        .map(|token| token.trim().to_string())
        .collect()
}

fn matches_interests(trend: &TrendRecord, interests: &[String]) -> bool {
    interests.iter().any(|interest| {
        trend
            .keywords
            .iter()
            .any(|keyword| keyword.contains(interest.as_str()))
    })
}

/// Drops trends failing the age and interest checks. Input order is kept.
pub fn filter_trends<'a>(trends: &'a [TrendRecord], form: &FormContext) -> Vec<&'a TrendRecord> {
    let interests = form.interests().map(parse_interests);

    trends
        .iter()
        .filter(|trend| {
            if let Some(age_range) = form.age_range() {
                if age_relevance(&trend.name, age_range) < AGE_RELEVANCE_DROP_THRESHOLD {
                    return false;
                }
            }
            match &interests {
                Some(interests) => matches_interests(trend, interests),
                None => true,
            }
        })
        .collect()
}

/// Stable sort by adjusted score, highest first.
pub fn sort_by_adjusted_score(trends: &mut [ScoredTrend]) {
    trends.sort_by(|a, b| b.adjusted_score.cmp(&a.adjusted_score));
}

/// Filter, score, then sort. This is the ranked trend list handed to the aligner.
pub fn rank_trends(trends: &[TrendRecord], form: &FormContext) -> Vec<ScoredTrend> {
    let filtered = filter_trends(trends, form);
    tracing::debug!("Filtered {} -> {} trends", trends.len(), filtered.len());

    let mut scored = score_trends(filtered, form);
    sort_by_adjusted_score(&mut scored);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::TrendCatalog;
    use crate::domain::model::{FINANCE, TECHNOLOGY};

    fn names(trends: &[ScoredTrend]) -> Vec<&str> {
        trends.iter().map(ScoredTrend::name).collect()
    }

    #[test]
    fn test_parse_interests() {
        assert_eq!(
            parse_interests(" AI, Banking ,crypto"),
            vec!["ai", "banking", "crypto"]
        );
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let catalog = TrendCatalog::builtin();
        let trends = catalog.lookup(TECHNOLOGY);
        let filtered = filter_trends(trends, &FormContext::new(TECHNOLOGY, "Germany"));
        assert_eq!(filtered.len(), trends.len());
    }

    #[test]
    fn test_interest_filter_matches_keyword_substrings() {
        let catalog = TrendCatalog::builtin();
        let form = FormContext::new(FINANCE, "Germany").with_interests("Bank, crypto");

        let filtered = filter_trends(catalog.lookup(FINANCE), &form);
        let names: Vec<&str> = filtered.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["Cryptocurrency Trading Tools", "Digital Banking Solutions"]
        );
    }

    #[test]
    fn test_interest_filter_can_remove_all_trends() {
        let catalog = TrendCatalog::builtin();
        let form = FormContext::new(TECHNOLOGY, "Germany").with_interests("knitting");
        assert!(filter_trends(catalog.lookup(TECHNOLOGY), &form).is_empty());
    }

    #[test]
    fn test_interest_is_substring_of_keyword_not_the_reverse() {
        let catalog = TrendCatalog::builtin();
        // "computing" keyword does not contain "computings"
        let form = FormContext::new(TECHNOLOGY, "Germany").with_interests("computings");
        assert!(filter_trends(catalog.lookup(TECHNOLOGY), &form).is_empty());
    }

    #[test]
    fn test_age_filter_never_drops_with_current_table() {
        let catalog = TrendCatalog::builtin();
        for age in ["18-24", "25-34", "35-44", "45-54", "55+", "unknown"] {
            let form = FormContext::new(TECHNOLOGY, "Germany").with_age_range(age);
            assert_eq!(filter_trends(catalog.lookup(TECHNOLOGY), &form).len(), 4);
        }
    }

    #[test]
    fn test_rank_sorts_descending_and_keeps_ties_in_catalog_order() {
        let trends = vec![
            TrendRecord::new("Alpha", TECHNOLOGY, 60, "+1%"),
            TrendRecord::new("Beta", TECHNOLOGY, 90, "+1%"),
            TrendRecord::new("Gamma", TECHNOLOGY, 60, "+1%"),
            TrendRecord::new("Delta", TECHNOLOGY, 95, "+1%"),
        ];
        // both 95 and 90 clamp to 100 in China (1.2)
        let ranked = rank_trends(&trends, &FormContext::new(TECHNOLOGY, "China"));

        assert_eq!(names(&ranked), vec!["Beta", "Delta", "Alpha", "Gamma"]);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].adjusted_score >= w[1].adjusted_score));
    }

    #[test]
    fn test_rank_with_neutral_context_keeps_base_scores() {
        let catalog = TrendCatalog::builtin();
        let ranked = rank_trends(catalog.lookup(FINANCE), &FormContext::default());

        for scored in &ranked {
            assert_eq!(scored.adjusted_score, scored.trend.score);
        }
    }
}
