use crate::domain::model::{ExportFormat, FormContext, GeneratedProject, ResultPayload, ScoredTrend};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const CSV_HEADERS: [&str; 5] = [
    "Title",
    "Description",
    "Timeline",
    "Market Opportunity",
    "Tech Requirements",
];

pub const NO_PROJECTS_CSV: &str = "No projects to export";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportSummary<'a> {
    total_projects: usize,
    total_trends: usize,
    domain: &'a str,
    country: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    projects: &'a [GeneratedProject],
    trends: &'a [ScoredTrend],
    form_data: &'a FormContext,
    generated_at: DateTime<Utc>,
    summary: ExportSummary<'a>,
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

pub fn render_json(payload: &ResultPayload) -> Result<String> {
    let document = ExportDocument {
        projects: &payload.projects,
        trends: &payload.trends,
        form_data: &payload.form_data,
        generated_at: payload.metadata.generated_at,
        summary: ExportSummary {
            total_projects: payload.projects.len(),
            total_trends: payload.trends.len(),
            domain: or_na(&payload.form_data.domain),
            country: or_na(&payload.form_data.country),
        },
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// One quoted row per project. An empty project list yields [`NO_PROJECTS_CSV`].
pub fn render_csv(payload: &ResultPayload) -> Result<String> {
    if payload.projects.is_empty() {
        return Ok(NO_PROJECTS_CSV.to_string());
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for project in &payload.projects {
        let tech = project.template.tech_requirements.join("; ");
        writer.write_record([
            project.template.title.as_str(),
            project.template.description.as_str(),
            project.timeline.as_str(),
            project.template.market_opportunity.as_str(),
            tech.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn render_markdown(payload: &ResultPayload) -> String {
    let mut out = String::from("# Project Specifications Report\n\n");
    out.push_str(&format!(
        "**Generated:** {}\n",
        payload.metadata.generated_at.format("%Y-%m-%d")
    ));
    out.push_str(&format!("**Domain:** {}\n", payload.form_data.domain));
    out.push_str(&format!("**Country:** {}\n\n", payload.form_data.country));

    if payload.projects.is_empty() {
        return out;
    }

    out.push_str(&format!("## Projects ({})\n\n", payload.projects.len()));
    for (index, project) in payload.projects.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", index + 1, project.title()));
        out.push_str(&format!("{}\n\n", project.template.description));
        out.push_str(&format!("**Timeline:** {}\n\n", project.timeline));
        out.push_str(&format!(
            "**Market Opportunity:** {}\n\n",
            project.template.market_opportunity
        ));
        if !project.template.tech_requirements.is_empty() {
            out.push_str("**Technical Requirements:**\n");
            for requirement in &project.template.tech_requirements {
                out.push_str(&format!("- {}\n", requirement));
            }
            out.push('\n');
        }
    }

    out
}

pub fn render(format: ExportFormat, payload: &ResultPayload) -> Result<String> {
    match format {
        ExportFormat::Json => render_json(payload),
        ExportFormat::Csv => render_csv(payload),
        ExportFormat::Markdown => Ok(render_markdown(payload)),
    }
}

/// Writes rendered reports through a [`Storage`] backend.
pub struct Exporter<S: Storage> {
    storage: S,
    formats: Vec<ExportFormat>,
    bundle_filename: Option<String>,
}

impl<S: Storage> Exporter<S> {
    pub fn new(storage: S, formats: Vec<ExportFormat>) -> Self {
        Self {
            storage,
            formats,
            bundle_filename: None,
        }
    }

    /// Pack every format into one ZIP archive instead of separate files.
    pub fn with_bundle(mut self, filename: impl Into<String>) -> Self {
        self.bundle_filename = Some(filename.into());
        self
    }

    pub fn formats(&self) -> &[ExportFormat] {
        &self.formats
    }

    /// Returns the storage-relative paths that were written.
    pub async fn export(&self, payload: &ResultPayload) -> Result<Vec<String>> {
        match &self.bundle_filename {
            Some(filename) => {
                let data = self.build_bundle(payload)?;
                tracing::debug!("Writing ZIP bundle ({} bytes)", data.len());
                self.storage.write_file(filename, &data).await?;
                tracing::info!("💾 Bundle saved: {}", filename);
                Ok(vec![filename.clone()])
            }
            None => {
                let mut written = Vec::with_capacity(self.formats.len());
                for format in &self.formats {
                    let filename = format.file_name();
                    let content = render(*format, payload)?;
                    self.storage.write_file(&filename, content.as_bytes()).await?;
                    tracing::info!("💾 Export saved: {}", filename);
                    written.push(filename);
                }
                Ok(written)
            }
        }
    }

    fn build_bundle(&self, payload: &ResultPayload) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for format in &self.formats {
            zip.start_file::<_, ()>(format.file_name(), FileOptions::default())?;
            zip.write_all(render(*format, payload)?.as_bytes())?;
        }

        zip.start_file::<_, ()>("metadata.json", FileOptions::default())?;
        let metadata = serde_json::to_string_pretty(&payload.metadata)?;
        zip.write_all(metadata.as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}
