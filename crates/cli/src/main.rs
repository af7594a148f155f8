use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use symptom_core::{
    build_prompt, extract_analysis, AnalysisOutcome, CoreConfig, NoopAuditStore, SymptomAnalyzer,
    SymptomText,
};

#[derive(Parser)]
#[command(name = "symptom")]
#[command(about = "Symptom analysis service CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full analysis against the configured completion service
    Analyze {
        /// Free-text symptom description
        symptoms: String,
        /// Skip writing the audit record
        #[arg(long)]
        no_audit: bool,
    },
    /// Print the prompt that would be sent for these symptoms
    Prompt {
        /// Free-text symptom description
        symptoms: String,
    },
    /// Run the response extractor over a saved model reply
    Extract {
        /// File containing the raw model reply
        file: PathBuf,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();

    match cli.command {
        Commands::Analyze { symptoms, no_audit } => {
            let cfg = CoreConfig::from_env()?;
            let analyzer = if no_audit {
                SymptomAnalyzer::with_store(&cfg, Box::new(NoopAuditStore))?
            } else {
                SymptomAnalyzer::from_config(&cfg)?
            };
            render_outcome(analyzer.analyze(&symptoms).await, &mut out)
        }
        Commands::Prompt { symptoms } => prompt_command(&symptoms, &mut out),
        Commands::Extract { file } => extract_file(&file, &mut out, &mut err),
    }
}

/// Print a finished analysis as `{"analysis": ...}`; any other outcome is an error.
fn render_outcome(outcome: AnalysisOutcome, out: &mut impl Write) -> CliResult<()> {
    match outcome {
        AnalysisOutcome::Done(analysis) => {
            let body = serde_json::json!({ "analysis": analysis });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            Ok(())
        }
        AnalysisOutcome::Rejected(e) => Err(e.into()),
        AnalysisOutcome::UpstreamFailed(e) => Err(e.into()),
        AnalysisOutcome::Faulted(msg) => Err(msg.into()),
    }
}

fn prompt_command(symptoms: &str, out: &mut impl Write) -> CliResult<()> {
    let prompt = build_prompt(&SymptomText::new(symptoms)?);
    writeln!(out, "{}", serde_json::to_string_pretty(&prompt.messages())?)?;
    Ok(())
}

fn extract_file(path: &Path, out: &mut impl Write, err: &mut impl Write) -> CliResult<()> {
    let raw = std::fs::read_to_string(path)?;
    extract_command(&raw, out, err)
}

fn extract_command(raw: &str, out: &mut impl Write, err: &mut impl Write) -> CliResult<()> {
    let extraction = extract_analysis(raw);
    if extraction.is_fallback() {
        writeln!(err, "Reply could not be parsed; fallback analysis used.")?;
    }
    writeln!(out, "{}", serde_json::to_string_pretty(extraction.analysis())?)?;
    Ok(())
}
