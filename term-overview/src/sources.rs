//! Loading tables for reports through DataFusion.
//!
//! Reports run on a single in-memory [`RecordBatch`]. These helpers collect a
//! registered DataFusion table, or a CSV file, into one batch.

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use datafusion::prelude::{CsvReadOptions, DataFrame, SessionContext};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{OverviewError, Result};

/// CSV reading options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Whether the first line holds column names
    pub has_header: bool,
    /// Field delimiter
    pub delimiter: u8,
    /// Number of records read to infer the schema
    pub schema_infer_max_records: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            schema_infer_max_records: 1000,
        }
    }
}

/// Collects the table registered under `name` into a single batch.
///
/// An empty table yields a zero-row batch carrying the table's schema.
#[instrument(skip(ctx))]
pub async fn load_table(ctx: &SessionContext, name: &str) -> Result<RecordBatch> {
    let df = ctx.table(name).await?;
    collect_single(df).await
}

/// Reads a CSV file with default options.
pub async fn read_csv(path: &str) -> Result<RecordBatch> {
    read_csv_with(path, &CsvOptions::default()).await
}

/// Reads a CSV file.
#[instrument(skip(options))]
pub async fn read_csv_with(path: &str, options: &CsvOptions) -> Result<RecordBatch> {
    if !path.ends_with(".csv") {
        return Err(OverviewError::NotSupported(format!(
            "CSV files must use the .csv extension: {path}"
        )));
    }
    let csv_options = CsvReadOptions::new()
        .has_header(options.has_header)
        .delimiter(options.delimiter)
        .schema_infer_max_records(options.schema_infer_max_records);

    let ctx = SessionContext::new();
    let df = ctx.read_csv(path, csv_options).await?;
    collect_single(df).await
}

async fn collect_single(df: DataFrame) -> Result<RecordBatch> {
    let schema = df.schema().inner().clone();
    let batches = df.collect().await?;
    let table = concat_batches(&schema, &batches)?;
    debug!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        batches = batches.len(),
        "Collected table"
    );
    Ok(table)
}
