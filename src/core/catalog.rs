use crate::domain::model::{TrendRecord, DEFAULT_DOMAIN, FINANCE, HEALTH_AND_WELLNESS, TECHNOLOGY};
use crate::utils::error::{Result, TrendError};
use std::collections::BTreeMap;

/// Partial edit applied by [`TrendCatalog::update`].
#[derive(Debug, Clone, Default)]
pub struct TrendUpdate {
    pub score: Option<u8>,
    pub growth_rate: Option<String>,
}

/// Read-mostly table of trend records grouped by domain.
///
/// Built once at startup, then shared with the pipeline behind an `Arc`.
/// The edit methods need `&mut self` and therefore only run before sharing.
#[derive(Debug, Clone, Default)]
pub struct TrendCatalog {
    trends: BTreeMap<String, Vec<TrendRecord>>,
}

impl TrendCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let table: [(&str, [(&str, u8, &str); 4]); 3] = [
            (
                TECHNOLOGY,
                [
                    ("AI-Powered Personal Assistants", 95, "+45%"),
                    ("No-Code Development Platforms", 88, "+32%"),
                    ("Edge Computing Solutions", 82, "+28%"),
                    ("Quantum Computing Applications", 76, "+55%"),
                ],
            ),
            (
                HEALTH_AND_WELLNESS,
                [
                    ("Mental Health Apps", 92, "+38%"),
                    ("Personalized Nutrition", 86, "+42%"),
                    ("Wearable Health Tech", 84, "+25%"),
                    ("Telemedicine Platforms", 79, "+35%"),
                ],
            ),
            (
                FINANCE,
                [
                    ("Cryptocurrency Trading Tools", 89, "+48%"),
                    ("AI Financial Advisors", 85, "+33%"),
                    ("Digital Banking Solutions", 81, "+29%"),
                    ("ESG Investment Platforms", 77, "+41%"),
                ],
            ),
        ];

        let trends = table
            .into_iter()
            .map(|(domain, rows)| {
                let records = rows
                    .into_iter()
                    .map(|(name, score, growth)| TrendRecord::new(name, domain, score, growth))
                    .collect();
                (domain.to_string(), records)
            })
            .collect();

        Self { trends }
    }

    /// Trends for `domain`, falling back to the default domain's list when the
    /// domain is empty or unknown.
    pub fn lookup(&self, domain: &str) -> &[TrendRecord] {
        match self.trends.get(domain) {
            Some(records) => records,
            None => {
                tracing::debug!(
                    "Domain '{}' not in catalog, using '{}'",
                    domain,
                    DEFAULT_DOMAIN
                );
                self.trends
                    .get(DEFAULT_DOMAIN)
                    .map(Vec::as_slice)
                    .unwrap_or(&[])
            }
        }
    }

    pub fn contains_domain(&self, domain: &str) -> bool {
        self.trends.contains_key(domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.trends.keys().map(String::as_str)
    }

    pub fn find_all(&self) -> Vec<&TrendRecord> {
        self.trends.values().flatten().collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&TrendRecord> {
        self.trends.values().flatten().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.trends.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a record under its own domain, creating the domain when needed.
    pub fn insert(&mut self, record: TrendRecord) -> Result<()> {
        if !record.is_valid() {
            return Err(TrendError::internal(format!(
                "malformed trend record '{}' for domain '{}' (score {})",
                record.name, record.domain, record.score
            )));
        }
        if self.find_in_domain(&record.domain, &record.name).is_some() {
            return Err(TrendError::internal(format!(
                "trend '{}' already exists in domain '{}'",
                record.name, record.domain
            )));
        }

        tracing::debug!("Adding trend '{}' to '{}'", record.name, record.domain);
        self.trends
            .entry(record.domain.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    pub fn update(
        &mut self,
        domain: &str,
        name: &str,
        update: TrendUpdate,
    ) -> Result<&TrendRecord> {
        if matches!(update.score, Some(score) if score > 100) {
            return Err(TrendError::internal(format!(
                "score for '{}' must lie in [0, 100]",
                name
            )));
        }

        let index = self.find_in_domain(domain, name).ok_or_else(|| {
            TrendError::internal(format!("trend '{}' not found in domain '{}'", name, domain))
        })?;
        let records = self
            .trends
            .get_mut(domain)
            .ok_or_else(|| TrendError::internal(format!("domain '{}' vanished", domain)))?;
        let record = &mut records[index];

        if let Some(score) = update.score {
            record.score = score;
        }
        if let Some(growth_rate) = update.growth_rate {
            record.growth_rate = growth_rate;
        }
        Ok(&*record)
    }

    /// Takes a record out of the catalog. A domain left without trends is dropped.
    pub fn remove(&mut self, domain: &str, name: &str) -> Result<TrendRecord> {
        let index = self.find_in_domain(domain, name).ok_or_else(|| {
            TrendError::internal(format!("trend '{}' not found in domain '{}'", name, domain))
        })?;
        let records = self
            .trends
            .get_mut(domain)
            .ok_or_else(|| TrendError::internal(format!("domain '{}' vanished", domain)))?;

        let removed = records.remove(index);
        if records.is_empty() {
            self.trends.remove(domain);
        }
        tracing::debug!("Removed trend '{}' from '{}'", name, domain);
        Ok(removed)
    }

    fn find_in_domain(&self, domain: &str, name: &str) -> Option<usize> {
        self.trends
            .get(domain)
            .and_then(|records| records.iter().position(|t| t.name == name))
    }
}
