//! Rendering of overview reports.
//!
//! A [`Renderer`] turns the continuous and categorical summary tables into one
//! [`VisualizationArtifact`]. Rendering is a pure function of the two tables and
//! the display name. Every renderer here refuses to render a report whose
//! tables are both empty.
//!
//! # Examples
//!
//! ```rust
//! use arrow::array::{ArrayRef, Float64Array, StringArray};
//! use arrow::record_batch::RecordBatch;
//! use std::sync::Arc;
//! use term_overview::report::data_overview_report;
//! use term_overview::visualize::{MarkdownRenderer, Renderer};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let table = RecordBatch::try_from_iter(vec![
//!     ("price", Arc::new(Float64Array::from(vec![9.5, 12.0])) as ArrayRef),
//!     ("sku", Arc::new(StringArray::from(vec!["A-1", "B-2"])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let report = data_overview_report(&table, None).await.unwrap();
//! let artifact = report.visualize_with(&MarkdownRenderer::new(), "inventory").unwrap();
//! assert!(artifact.content.contains("| price |"));
//! # })
//! ```

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use arrow::util::pretty::pretty_format_batches;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::error::{OverviewError, Result};

/// Output format of a visualization artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    /// Structured JSON document.
    Json,
    /// Plain-text tables for terminals.
    Text,
    /// Markdown tables.
    Markdown,
}

impl ArtifactFormat {
    /// MIME type of the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ArtifactFormat::Json => "application/json",
            ArtifactFormat::Text => "text/plain",
            ArtifactFormat::Markdown => "text/markdown",
        }
    }
}

/// A rendered overview report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationArtifact {
    /// Display name of the dataset.
    pub name: String,
    /// Format of `content`.
    pub format: ArtifactFormat,
    /// The rendered document.
    pub content: String,
}

impl fmt::Display for VisualizationArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// Renders the two summary tables of a report.
pub trait Renderer {
    /// Renders both tables under a display name.
    fn render(
        &self,
        continuous: &RecordBatch,
        categorical: &RecordBatch,
        name: &str,
    ) -> Result<VisualizationArtifact>;
}

fn ensure_not_empty(continuous: &RecordBatch, categorical: &RecordBatch) -> Result<()> {
    if continuous.num_rows() == 0 && categorical.num_rows() == 0 {
        return Err(OverviewError::EmptyReport);
    }
    Ok(())
}

/// Renders reports as a JSON document with one object per summary row.
///
/// ```json
/// {
///   "name": "data",
///   "continuous": { "fields": ["column", "range.min", ...], "rows": [{...}] },
///   "categorical": { "fields": [...], "rows": [...] }
/// }
/// ```
///
/// Null metric values are omitted from row objects.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    /// Creates a renderer producing pretty-printed JSON.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Sets whether to pretty-print.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn table_json(table: &RecordBatch) -> Result<Value> {
        let fields: Vec<&str> = table
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();

        let rows: Vec<Value> = if table.num_rows() == 0 {
            Vec::new()
        } else {
            let mut writer = arrow::json::ArrayWriter::new(Vec::new());
            writer.write(table)?;
            writer.finish()?;
            serde_json::from_slice(&writer.into_inner())?
        };

        Ok(json!({ "fields": fields, "rows": rows }))
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for JsonRenderer {
    fn render(
        &self,
        continuous: &RecordBatch,
        categorical: &RecordBatch,
        name: &str,
    ) -> Result<VisualizationArtifact> {
        ensure_not_empty(continuous, categorical)?;
        let document = json!({
            "name": name,
            "continuous": Self::table_json(continuous)?,
            "categorical": Self::table_json(categorical)?,
        });
        let content = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(VisualizationArtifact {
            name: name.to_string(),
            format: ArtifactFormat::Json,
            content,
        })
    }
}

/// Renders reports as boxed plain-text tables.
#[derive(Debug, Clone, Default)]
pub struct HumanRenderer;

impl HumanRenderer {
    /// Creates the renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HumanRenderer {
    fn render(
        &self,
        continuous: &RecordBatch,
        categorical: &RecordBatch,
        name: &str,
    ) -> Result<VisualizationArtifact> {
        ensure_not_empty(continuous, categorical)?;
        let mut content = format!("Data overview: {name}\n");
        for (title, table) in [("Continuous", continuous), ("Categorical", categorical)] {
            content.push_str(&format!("\n{title} columns ({} rows):\n", table.num_rows()));
            if table.num_rows() > 0 {
                let rendered = pretty_format_batches(std::slice::from_ref(table))?;
                content.push_str(&format!("{rendered}\n"));
            }
        }
        Ok(VisualizationArtifact {
            name: name.to_string(),
            format: ArtifactFormat::Text,
            content,
        })
    }
}

/// Renders reports as Markdown tables.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    heading_level: u8,
}

impl MarkdownRenderer {
    /// Creates a renderer whose title uses a level-2 heading.
    pub fn new() -> Self {
        Self { heading_level: 2 }
    }

    /// Sets the base heading level for the output.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 5);
        self
    }

    fn table_markdown(table: &RecordBatch, out: &mut String) -> Result<()> {
        if table.num_rows() == 0 {
            out.push_str("_No columns._\n");
            return Ok(());
        }

        let schema = table.schema_ref();
        let header: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        out.push_str(&format!("| {} |\n", header.join(" | ")));
        out.push_str(&format!("|{}\n", " --- |".repeat(header.len())));

        let options = FormatOptions::default();
        let formatters = table
            .columns()
            .iter()
            .map(|c| ArrayFormatter::try_new(c.as_ref(), &options))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for row in 0..table.num_rows() {
            let cells: Vec<String> = table
                .columns()
                .iter()
                .zip(&formatters)
                .map(|(values, formatter)| {
                    if values.is_null(row) {
                        String::new()
                    } else {
                        formatter.value(row).to_string().replace('|', "\\|")
                    }
                })
                .collect();
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        Ok(())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MarkdownRenderer {
    fn render(
        &self,
        continuous: &RecordBatch,
        categorical: &RecordBatch,
        name: &str,
    ) -> Result<VisualizationArtifact> {
        ensure_not_empty(continuous, categorical)?;
        let h = "#".repeat(self.heading_level as usize);
        let mut content = format!("{h} Data overview: {name}\n");
        for (title, table) in [("Continuous", continuous), ("Categorical", categorical)] {
            content.push_str(&format!("\n{h}# {title} columns\n\n"));
            Self::table_markdown(table, &mut content)?;
        }
        Ok(VisualizationArtifact {
            name: name.to_string(),
            format: ArtifactFormat::Markdown,
            content,
        })
    }
}
