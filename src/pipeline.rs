use std::time::Instant;

use anyhow::{Context, Result};
use bon::Builder;
use colored::Colorize;
use rustic_duration::beautify_duration;
use rustic_etl_config::config_structs::etl_config::EtlConfig;
use rustic_sheet_extractor::sheet_extractor::SheetExtractor;
use rustic_target_db::table_loader::TableLoader;
use rustic_transformator::clock::Clock;
use rustic_transformator::wide_to_long_transformation::WideToLongTransformation;
use tracing::info;

use crate::execution_payload::ExecutionPayload;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub table_name: String,
    pub rows_extracted: usize,
    pub rows_loaded: u64,
}

/// Extract → transform → load, one sheet per run. Any failure stops the run;
/// nothing is loaded unless the transform succeeded.
#[derive(Builder)]
pub struct EtlPipeline<'a> {
    config: &'a EtlConfig,
    loader: &'a dyn TableLoader,
    clock: &'a dyn Clock,
}

impl EtlPipeline<'_> {
    pub async fn run(&self) -> Result<PipelineReport> {
        let pipeline_start = Instant::now();
        let execution_payload = ExecutionPayload::new(self.config);

        info!(
            "Will read {} and load into table {}",
            execution_payload.source_path().display(),
            execution_payload.table_name().bold()
        );

        // Extract
        let extracted = SheetExtractor::new(
            &self.config.data_directory,
            &self.config.data_file,
            &self.config.data_sheet,
        )
        .extract()
        .context("Extract stage failed")?;

        // Transform
        let transformed = WideToLongTransformation::builder()
            .transform_columns(self.config.transform_columns.clone())
            .transform_column(&self.config.transform_column)
            .transform_value(&self.config.transform_value)
            .source_file_name(&self.config.data_file)
            .build()
            .run(&extracted, self.clock)
            .context("Transform stage failed")?;

        // Load
        let rows_loaded = self
            .loader
            .replace_table(&transformed, execution_payload.table_name())
            .await
            .context("Load stage failed")?;

        info!(
            "Pipeline done! Time taken: {}",
            beautify_duration(pipeline_start.elapsed())
        );

        Ok(PipelineReport {
            table_name: execution_payload.table_name().to_string(),
            rows_extracted: extracted.height(),
            rows_loaded,
        })
    }
}
