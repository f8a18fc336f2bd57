use clap::Parser;
use futures::future::join_all;
use image_insight::{
    AnalysisError, AnalysisServiceBuilder, AnalysisPipeline, AppError, Configuration,
    ImageAnalyzer, ImageRequest,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, Level};

const RULE: &str = "\n---\n";

#[derive(Debug, Parser)]
#[command(
    name = "image-insight",
    version,
    about = "Describe images with a deterministic rule-based classifier"
)]
struct Cli {
    /// Images to analyse.
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    /// Configuration file (TOML, YAML or JSON).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Declared format for every input, overriding the file extension.
    #[arg(long)]
    format: Option<String>,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
    /// Run the analyzers one after another.
    #[arg(long)]
    sequential: bool,
    #[arg(long)]
    timeout_ms: Option<u64>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn declared_format(path: &Path, forced: Option<&str>) -> String {
    match forced {
        Some(format) => format.to_string(),
        None => path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string(),
    }
}

async fn describe_file(
    analyzer: ImageAnalyzer,
    path: PathBuf,
    format: Option<String>,
    as_json: bool,
) -> Result<String, AppError> {
    let declared = declared_format(&path, format.as_deref());

    let outcome = match tokio::fs::read(&path).await {
        Ok(bytes) => analyzer.analyze(ImageRequest::new(bytes, declared)).await,
        Err(err) => Err(AnalysisError::DecodeFailure(format!(
            "could not read {}: {err}",
            path.display()
        ))),
    };

    let output = match (outcome, as_json) {
        (Ok(report), false) => report.into_text(),
        (Ok(report), true) => serde_json::to_string_pretty(&json!({
            "path": path.display().to_string(),
            "report": report,
        }))?,
        (Err(err), false) => analyzer.fallback(&err),
        (Err(err), true) => serde_json::to_string_pretty(&json!({
            "path": path.display().to_string(),
            "error": err.to_string(),
            "kind": err.kind(),
            "fallback": analyzer.fallback(&err),
        }))?,
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut configuration = Configuration::load(cli.config.as_deref())?;
    if cli.sequential {
        configuration = configuration.with_parallel_analysis(false);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        configuration = configuration.with_timeout(Some(Duration::from_millis(timeout_ms)));
    }
    info!(
        "Analysing {} file(s), limit {} bytes",
        cli.paths.len(),
        configuration.max_image_bytes
    );

    let analyzer = AnalysisServiceBuilder::new(AnalysisPipeline::new(configuration)?).build();

    let outputs = join_all(cli.paths.into_iter().map(|path| {
        describe_file(analyzer.clone(), path, cli.format.clone(), cli.json)
    }))
    .await
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;

    println!("{}", outputs.join(RULE));
    Ok(())
}
