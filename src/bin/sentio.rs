//! sentio: sentiment analysis CLI
//!
//! Classifies typed text, a `.txt`/`.csv`/`.json` file or piped stdin and
//! prints statistics, highlighted results or an export.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use sentio::config::{Config, Secrets};
use sentio::{
    AnalysisResult, AnalysisSession, ExportFormat, GeminiClient, SentimentClassifier, TextSource,
    distribution, export_file_name, highlight,
};

/// Sentio CLI
#[derive(Parser)]
#[command(name = "sentio")]
#[command(version)]
#[command(about = "Batch sentiment analysis over the Gemini API")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze text, a file, or stdin
    Analyze {
        /// Text to analyze as a single item (or omit to use --file or stdin)
        text: Option<String>,
        /// Newline-delimited .txt, .csv or .json file, one item per line
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Model to use (overrides the config file)
        #[arg(short, long)]
        model: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,
        /// Also write CSV and JSON exports into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Config::load(args.config.as_deref())?;

    let Command::Analyze {
        text,
        file,
        model,
        format,
        export_dir,
    } = args.command;

    let source = resolve_source(text, file)?;

    let api_key = Secrets::load()?.api_key().ok_or_else(|| {
        "no API key: set GEMINI_API_KEY or add [gemini] api_key to ~/.sentio/secrets.toml"
    })?;
    let client = GeminiClient::with_options(
        api_key,
        &config.provider.base_url,
        config.provider.timeout(),
    )?;
    let classifier = SentimentClassifier::new(client)
        .model(model.unwrap_or_else(|| config.provider.model.clone()))
        .limits(config.input);
    let session = AnalysisSession::new(classifier);

    info!(version = env!("CARGO_PKG_VERSION"), "sentio starting");

    let results = match session.analyze(&source).await {
        Ok(Some(results)) => results,
        Ok(None) => {
            eprintln!("nothing to analyze");
            return Ok(ExitCode::SUCCESS);
        }
        Err(_) => {
            let message = session.last_error().unwrap_or_default();
            eprintln!("{message}");
            return Ok(ExitCode::FAILURE);
        }
    };

    match format {
        OutputFormat::Summary => print_summary(&results, &session),
        OutputFormat::Csv => println!("{}", ExportFormat::Csv.render(&results)?),
        OutputFormat::Json => println!("{}", ExportFormat::Json.render(&results)?),
    }

    if let Some(dir) = export_dir {
        let timestamp = chrono::Utc::now().timestamp_millis();
        for format in [ExportFormat::Csv, ExportFormat::Json] {
            let path = write_export(&dir, &results, format, timestamp)?;
            eprintln!("wrote {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Pick the input source from the argument, the file flag or stdin.
///
/// Piped stdin is treated like file contents: one item per line.
fn resolve_source(
    text: Option<String>,
    file: Option<PathBuf>,
) -> Result<TextSource, Box<dyn std::error::Error>> {
    if let Some(text) = text {
        return Ok(TextSource::Text(text));
    }
    if let Some(path) = file {
        return Ok(TextSource::from_path(path)?);
    }
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(TextSource::File(buf));
    }
    Err("analyze: no input provided (pass text, --file, or pipe via stdin)".into())
}

fn write_export(
    dir: &Path,
    results: &[AnalysisResult],
    format: ExportFormat,
    timestamp: i64,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(format, timestamp));
    fs::write(&path, format.render(results)?)?;
    Ok(path)
}

fn print_summary<P: sentio::SentimentProvider>(
    results: &[AnalysisResult],
    session: &AnalysisSession<P>,
) {
    let stats = session.stats();
    println!("total analyzed:    {}", stats.total);
    println!("avg. confidence:   {:.1}%", stats.avg_confidence);
    println!("dominant:          {}", stats.dominant);

    println!("\ndistribution:");
    for point in distribution(&stats) {
        println!("  {:<9} {}", point.name.as_str(), point.value);
    }

    println!("\nresults ({}):", results.len());
    for result in results {
        let rendered: String = highlight(result.original_text(), result.keywords())
            .into_iter()
            .map(|segment| {
                if segment.is_keyword {
                    format!("[{}]", segment.text)
                } else {
                    segment.text.to_string()
                }
            })
            .collect();
        println!(
            "  {:<8} {:>3}%  {}",
            result.sentiment().as_str(),
            result.confidence_percent(),
            rendered
        );
    }
}
