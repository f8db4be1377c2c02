//! AppSight enrichment pipeline runner.

#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use appsight_application::{
    DEFAULT_OWNER_TOP_N, DEFAULT_USAGE_RANKING_TOP_N, PipelineConfig, PipelineService,
    RollupScope, SinkHandle, SourceHandle, SourceTable,
};
use appsight_core::{AppError, AppResult};
use appsight_infrastructure::JsonFileTableStore;

use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct RunnerConfig {
    input_dir: PathBuf,
    pipeline: PipelineConfig,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = RunnerConfig::load()?;
    info!(
        input_dir = %config.input_dir.display(),
        output_dir = %config.pipeline.destination.as_str(),
        owner_top_n = config.pipeline.owner_top_n,
        usage_ranking_top_n = config.pipeline.usage_ranking_top_n,
        rollup_scope = config.pipeline.rollup_scope.as_str(),
        "appsight-pipeline started"
    );

    let service = PipelineService::new(
        Arc::new(JsonFileTableStore::new(config.input_dir.clone())),
        Arc::new(JsonFileTableStore::new(".")),
    );
    let report = service.run(&config.pipeline).await?;

    for stage in &report.stages {
        info!(
            run_id = %report.run_id,
            stage = stage.stage.as_str(),
            rows_in = stage.rows_in,
            rows_out = stage.rows_out,
            "stage summary"
        );
    }

    info!(
        run_id = %report.run_id,
        tables = report.outputs.len(),
        "appsight-pipeline finished"
    );
    Ok(())
}

impl RunnerConfig {
    fn load() -> AppResult<Self> {
        let input_dir = PathBuf::from(env_or_default("APPSIGHT_INPUT_DIR", "./data/raw"));
        let output_dir = env_or_default("APPSIGHT_OUTPUT_DIR", "./data/enriched");

        let mut pipeline = PipelineConfig::new(SinkHandle::new(output_dir)?);
        for table in SourceTable::ALL {
            let name = format!("APPSIGHT_{}_SOURCE", table.as_str().to_uppercase());
            let location = env_or_default(&name, &format!("{}.json", table.as_str()));
            pipeline = pipeline.with_source(table, SourceHandle::new(location)?);
        }

        pipeline.owner_top_n = parse_env_usize("APPSIGHT_OWNER_TOP_N", DEFAULT_OWNER_TOP_N)?;
        pipeline.usage_ranking_top_n =
            parse_env_usize("APPSIGHT_USAGE_RANKING_TOP_N", DEFAULT_USAGE_RANKING_TOP_N)?;
        pipeline.rollup_scope = match env::var("APPSIGHT_ROLLUP_SCOPE") {
            Ok(value) => RollupScope::parse(&value).map_err(|_| {
                AppError::Validation(format!(
                    "invalid APPSIGHT_ROLLUP_SCOPE value '{value}', expected 'all' or 'high_adoption'"
                ))
            })?,
            Err(_) => RollupScope::default(),
        };

        pipeline.validate()?;

        Ok(Self {
            input_dir,
            pipeline,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn env_or_default(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn parse_env_usize(name: &str, default: usize) -> AppResult<usize> {
    match env::var(name) {
        Ok(value) => value.trim().parse::<usize>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
