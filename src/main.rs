use chklst_reports::{
    ConfigError, RawRecord, ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportKind,
    ReportPeriod, StatisticsMapping, artifact_file_name,
};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Render a monthly deployment or statistics report from a JSON file.
#[derive(Parser, Debug)]
#[command(name = "chklst-reports", version, about)]
struct Cli {
    /// Which report to build.
    #[arg(value_enum)]
    kind: KindArg,

    /// JSON input: a list of deployment records (or `{"deployments": [...]}`)
    /// for `deployments`, a metric map (or `{"stats": {...}}`) for `statistics`.
    #[arg(short, long)]
    input: PathBuf,

    #[arg(short, long)]
    month: u32,

    #[arg(short, long)]
    year: i32,

    #[arg(short, long, value_enum, default_value_t = FormatArg::Both)]
    format: FormatArg,

    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Optional theme and layout overrides.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Deployments,
    Statistics,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Xlsx,
    Pdf,
    Both,
}

impl FormatArg {
    fn formats(self) -> &'static [ReportFormat] {
        match self {
            FormatArg::Xlsx => &[ReportFormat::Spreadsheet],
            FormatArg::Pdf => &[ReportFormat::Document],
            FormatArg::Both => &ReportFormat::ALL,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeploymentsInput {
    Wrapped { deployments: Vec<RawRecord> },
    Bare(Vec<RawRecord>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatisticsInput {
    Wrapped { stats: StatisticsMapping },
    Bare(StatisticsMapping),
}

#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Input is not valid JSON for this report: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CliError + '_ {
    move |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    let generator = ReportGenerator::builder().with_config(config).build();
    let period = ReportPeriod::new(cli.month, cli.year).map_err(ReportError::from)?;
    let input = fs::read_to_string(&cli.input).map_err(io_error(&cli.input))?;

    fs::create_dir_all(&cli.out_dir).map_err(io_error(&cli.out_dir))?;

    match cli.kind {
        KindArg::Deployments => {
            let records = match serde_json::from_str(&input)? {
                DeploymentsInput::Wrapped { deployments } => deployments,
                DeploymentsInput::Bare(records) => records,
            };
            for &format in cli.format.formats() {
                let bytes = generator.render_deployments(format, &records, period)?;
                write_artifact(&cli.out_dir, ReportKind::Deployments, format, period, &bytes)?;
            }
        }
        KindArg::Statistics => {
            let stats = match serde_json::from_str(&input)? {
                StatisticsInput::Wrapped { stats } => stats,
                StatisticsInput::Bare(stats) => stats,
            };
            for &format in cli.format.formats() {
                let bytes = generator.render_statistics(format, &stats, period)?;
                write_artifact(&cli.out_dir, ReportKind::Statistics, format, period, &bytes)?;
            }
        }
    }
    Ok(())
}

fn write_artifact(
    out_dir: &Path,
    kind: ReportKind,
    format: ReportFormat,
    period: ReportPeriod,
    bytes: &[u8],
) -> Result<(), CliError> {
    let path = out_dir.join(artifact_file_name(kind, format, period));
    fs::write(&path, bytes).map_err(io_error(&path))?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
