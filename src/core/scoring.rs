//! Contextual score adjustment.
//!
//! Every lookup here degrades to a neutral multiplier of 1.0 on a miss, so
//! scoring never fails for partially filled form input.

use crate::domain::model::{ContextualFactors, FormContext, ScoredTrend, TrendRecord};

pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

const COUNTRY_MULTIPLIERS: [(&str, f64); 7] = [
    ("United States", 1.1),
    ("United Kingdom", 1.05),
    ("Germany", 1.0),
    ("France", 0.95),
    ("Japan", 0.9),
    ("China", 1.2),
    ("India", 1.15),
];

const LUXURY_KEYWORDS: [&str; 4] = ["premium", "luxury", "high-end", "exclusive"];
const BUDGET_KEYWORDS: [&str; 4] = ["affordable", "budget", "free", "low-cost"];

/// (income level, luxury trend, budget trend)
const INCOME_MULTIPLIERS: [(&str, f64, f64); 4] = [
    ("luxury", 1.3, 0.7),
    ("high", 1.2, 0.8),
    ("middle", 0.9, 1.1),
    ("low", 0.6, 1.3),
];

/// (age range, name patterns, hit factor, miss factor). Patterns are case-sensitive.
const AGE_RELEVANCE: [(&str, [&str; 2], f64, f64); 5] = [
    ("18-24", ["Social", "Gaming"], 1.2, 0.8),
    ("25-34", ["AI", "Productivity"], 1.2, 0.9),
    ("35-44", ["Business", "Finance"], 1.2, 0.9),
    ("45-54", ["Health", "Investment"], 1.2, 0.8),
    ("55+", ["Health", "Traditional"], 1.2, 0.7),
];

/// Exact-match country lookup.
pub fn country_multiplier(country: &str) -> f64 {
    COUNTRY_MULTIPLIERS
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(NEUTRAL_MULTIPLIER)
}

/// Matches the lowercased trend name against luxury then budget tokens and
/// combines the result with `income_level`.
pub fn income_multiplier(trend_name: &str, income_level: &str) -> f64 {
    let name = trend_name.to_lowercase();
    let is_luxury = LUXURY_KEYWORDS.iter().any(|k| name.contains(k));
    let is_budget = BUDGET_KEYWORDS.iter().any(|k| name.contains(k));

    let Some((_, luxury, budget)) = INCOME_MULTIPLIERS
        .iter()
        .find(|(level, _, _)| *level == income_level)
    else {
        return NEUTRAL_MULTIPLIER;
    };

    if is_luxury {
        *luxury
    } else if is_budget {
        *budget
    } else {
        NEUTRAL_MULTIPLIER
    }
}

/// Age relevance of a trend name. Unknown ranges are neutral.
pub fn age_relevance(trend_name: &str, age_range: &str) -> f64 {
    AGE_RELEVANCE
        .iter()
        .find(|(range, _, _, _)| *range == age_range)
        .map(|(_, patterns, hit, miss)| {
            if patterns.iter().any(|p| trend_name.contains(p)) {
                *hit
            } else {
                *miss
            }
        })
        .unwrap_or(NEUTRAL_MULTIPLIER)
}

/// `round(base * country * income)` clamped to [0, 100].
pub fn adjust_score(base: u8, factors: &ContextualFactors) -> u8 {
    let raw = f64::from(base) * factors.country_relevance * factors.income_relevance;
    raw.round().clamp(0.0, 100.0) as u8
}

pub fn contextual_factors(trend: &TrendRecord, form: &FormContext) -> ContextualFactors {
    ContextualFactors {
        country_relevance: country_multiplier(&form.country),
        income_relevance: form
            .income_level()
            .map(|level| income_multiplier(&trend.name, level))
            .unwrap_or(NEUTRAL_MULTIPLIER),
    }
}

pub fn score_trend(trend: &TrendRecord, form: &FormContext) -> ScoredTrend {
    let factors = contextual_factors(trend, form);
    ScoredTrend {
        adjusted_score: adjust_score(trend.score, &factors),
        contextual_factors: factors,
        trend: trend.clone(),
    }
}

/// Scores each trend in input order. Sorting is left to the caller.
pub fn score_trends<'a, I>(trends: I, form: &FormContext) -> Vec<ScoredTrend>
where
    I: IntoIterator<Item = &'a TrendRecord>,
{
    trends
        .into_iter()
        .map(|trend| score_trend(trend, form))
        .collect()
}
