//! glrfill CLI - General Loss Report template filler

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use glrfill::completion::{
    CompletionConfig, CredentialSource, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
use glrfill::detect::is_pdf_bytes;
use glrfill::pipeline::prompts::combine_reports;
use glrfill::pipeline::{PipelineObserver, ReportPipeline, Stage, Upload, PREVIEW_CHARS};
use glrfill::render::{self, JsonFormat, OUTPUT_FILE_NAME};
use glrfill::{analyze_structure, open_template, parser, structure_summary};

#[derive(Parser)]
#[command(name = "glrfill")]
#[command(version)]
#[command(about = "Fill General Loss Report templates from photo inspection reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a completed report from a template and photo reports
    Fill {
        /// GLR template (.docx)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Photo inspection reports (.pdf)
        #[arg(value_name = "REPORT", required = true)]
        reports: Vec<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the beginning of the generated text
        #[arg(long)]
        preview: bool,

        #[command(flatten)]
        completion: CompletionArgs,
    },

    /// Show how the template's paragraphs are classified
    Analyze {
        /// GLR template (.docx)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Print every descriptor as JSON instead of the summary
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Print the template's readable text
    #[command(alias = "text")]
    TemplateText {
        /// GLR template (.docx)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the combined text of photo reports
    Extract {
        /// Photo inspection reports (.pdf)
        #[arg(value_name = "REPORT", required = true)]
        reports: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output one JSON object per report
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct CompletionArgs {
    /// API key for the completion service
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Prompt for the API key on the terminal
    #[arg(long)]
    interactive_key: bool,

    /// Model identifier
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Chat completions URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Maximum generated tokens
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Request timeout in seconds (no timeout if not specified)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

impl CompletionArgs {
    fn credential_source(&self) -> CredentialSource {
        if self.interactive_key {
            CredentialSource::Interactive
        } else if let Some(key) = &self.api_key {
            CredentialSource::Explicit(key.clone())
        } else {
            CredentialSource::default()
        }
    }

    fn config(&self) -> CompletionConfig {
        let config = CompletionConfig::new()
            .with_endpoint(&self.endpoint)
            .with_model(&self.model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);
        match self.timeout {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

/// Drives a progress bar from pipeline stages.
struct ProgressObserver {
    pb: ProgressBar,
}

impl PipelineObserver for ProgressObserver {
    fn on_stage(&self, stage: &Stage) {
        self.pb.set_position(u64::from(stage.percent()));
        self.pb.set_message(stage.message());
    }

    fn on_warning(&self, message: &str) {
        self.pb
            .println(format!("{} {}", "Warning:".yellow().bold(), message));
    }
}

fn main() {
    // .env must be loaded before clap reads GROQ_API_KEY and before the
    // logger reads RUST_LOG.
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Ok(path) = dotenv {
        log::debug!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fill {
            template,
            reports,
            output,
            preview,
            completion,
        } => cmd_fill(&template, &reports, output.as_deref(), preview, &completion),
        Commands::Analyze {
            template,
            json,
            compact,
        } => cmd_analyze(&template, json, compact),
        Commands::TemplateText { template, output } => {
            cmd_template_text(&template, output.as_deref())
        }
        Commands::Extract {
            reports,
            output,
            json,
        } => cmd_extract(&reports, output.as_deref(), json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_fill(
    template: &Path,
    reports: &[PathBuf],
    output: Option<&Path>,
    preview: bool,
    completion: &CompletionArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    // Resolve the credential before reading inputs or touching the network.
    let pipeline =
        ReportPipeline::from_credentials(&completion.credential_source(), completion.config())?;

    let template = Upload::from_path(template)?;
    let reports = reports
        .iter()
        .map(Upload::from_path)
        .collect::<glrfill::Result<Vec<_>>>()?;

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")?
            .progress_chars("#>-"),
    );
    pb.enable_steady_tick(Duration::from_millis(120));

    let pipeline = pipeline.with_observer(Box::new(ProgressObserver { pb: pb.clone() }));
    let output_data = match pipeline.run(&template, &reports) {
        Ok(output_data) => output_data,
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e.into());
        }
    };
    pb.finish_with_message("Complete!");

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&output_data.file_name));
    fs::write(&output_path, &output_data.document)?;

    let populate = output_data.populate;
    println!("\n{} {}", "Saved to".green(), output_path.display());
    println!("  {} {} paragraphs replaced", "├─".dimmed(), populate.replaced);
    println!("  {} {} paragraphs appended", "├─".dimmed(), populate.appended);
    println!("  {} {} paragraphs unchanged", "└─".dimmed(), populate.untouched);

    if preview {
        println!();
        println!("{}", "Generated Report Preview".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", output_data.preview(PREVIEW_CHARS));
    }

    Ok(())
}

fn cmd_analyze(template: &Path, json: bool, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = open_template(template)?;
    let descriptors = analyze_structure(&doc);

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", render::to_json(&descriptors, format)?);
        return Ok(());
    }

    println!("{}", "Template Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), template.display());
    println!("{}: {}", "Paragraphs".bold(), doc.paragraph_count());
    println!("{}: {}", "Non-blank".bold(), descriptors.len());
    println!("{}: {}", "Tables".bold(), doc.tables().count());
    println!();
    println!("{}", structure_summary(&descriptors));

    Ok(())
}

fn cmd_template_text(template: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let doc = open_template(template)?;
    let text = render::to_text(&doc);

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_extract(
    reports: &[PathBuf],
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut extracted = Vec::with_capacity(reports.len());
    for path in reports {
        let report = Upload::from_path(path)?;
        if !is_pdf_bytes(&report.data) {
            eprintln!("{} {} does not look like a PDF", "Warning:".yellow().bold(), report.name);
        }
        let text = parser::extract_text(&report.data);
        extracted.push((report.name, text));
    }

    let content = if json {
        let values: Vec<_> = extracted
            .iter()
            .map(|(name, text)| serde_json::json!({ "name": name, "text": text }))
            .collect();
        serde_json::to_string_pretty(&values)?
    } else {
        combine_reports(extracted.iter().map(|(n, t)| (n.as_str(), t.as_str())))
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "glrfill".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("General Loss Report template filler");
    println!();
    println!("Default output: {}", OUTPUT_FILE_NAME.dimmed());
    println!("License: MIT");
}
