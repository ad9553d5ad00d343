use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use medpredict_client::{
    client::HttpPredictionClient,
    config::{self, Config},
    form::{DIABETES_FIELDS, FieldValue, FormPayload, HEART_FIELDS, parse_assignment},
    page::{OutputFormat, TerminalPage},
    submit::{SubmitOutcome, submit_form},
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "medpredict",
    version,
    about = "Submit patient data to the disease-prediction service and show the result",
    after_help = "EXAMPLES:\n\
        \n  medpredict submit diabetes --field glucose=148 --field bmi=33.6 --file image_file=fundus.png\
        \n  medpredict submit heart --field age=63 --file image_file=ecg.jpg --format html\
        \n  medpredict signup --name 'Ada L' --email ada@example.com --password secret"
)]
struct Cli {
    /// Configuration file (defaults to $CONFIG_PATH, then ./config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a prediction form
    Submit(SubmitArgs),
    /// Create an account on the prediction service
    Signup(SignupArgs),
}

#[derive(Debug, Args)]
struct SubmitArgs {
    /// Form to submit: a configured form id or endpoint name (diabetes, heart)
    target: String,

    /// Text field as name=value (repeatable)
    #[arg(long = "field", value_name = "NAME=VALUE")]
    fields: Vec<String>,

    /// File field as name=path (repeatable)
    #[arg(long = "file", value_name = "NAME=PATH")]
    files: Vec<String>,

    /// How to print the result panel
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct SignupArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());
    validate_log_level(&log_level)?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))?;

    // stdout carries the result panel
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Logging initialized with level: {}", log_level);
    Ok(())
}

async fn build_payload(args: &SubmitArgs) -> Result<FormPayload> {
    let mut payload = FormPayload::new();

    for raw in &args.fields {
        let (name, value) = parse_assignment(raw)?;
        payload.insert(name, FieldValue::text(value));
    }

    for raw in &args.files {
        let (name, path) = parse_assignment(raw)?;
        let value = FieldValue::file_from_path(Path::new(&path))
            .await
            .with_context(|| format!("Failed to read file for field '{name}'"))?;
        payload.insert(name, value);
    }

    Ok(payload)
}

fn known_fields(endpoint: &str) -> Option<&'static [&'static str]> {
    match endpoint {
        "/predict/diabetes" => Some(DIABETES_FIELDS),
        "/predict/heart" => Some(HEART_FIELDS),
        _ => None,
    }
}

async fn run_submit(config: &Config, args: SubmitArgs) -> Result<bool> {
    let options = config
        .find_form(&args.target)
        .with_context(|| format!("No configured form matches '{}'", args.target))?
        .clone();

    let payload = build_payload(&args).await?;
    if let Some(fields) = known_fields(&options.endpoint) {
        let missing: Vec<&str> = fields
            .iter()
            .copied()
            .filter(|field| payload.get(field).is_none())
            .collect();
        if !missing.is_empty() {
            info!("Fields not supplied: {}", missing.join(", "));
        }
    }

    let client = HttpPredictionClient::new(&config.server)?;
    if let Some(auth) = &config.auth {
        client.login(&auth.email, &auth.password).await?;
    }

    let page = TerminalPage::new(options.form_id.clone(), payload, args.format);
    let outcome = submit_form(&options, &page, &client).await?;

    Ok(matches!(outcome, SubmitOutcome::Rendered(_)))
}

async fn run_signup(config: &Config, args: SignupArgs) -> Result<()> {
    let client = HttpPredictionClient::new(&config.server)?;
    let response = client.signup(&args.name, &args.email, &args.password).await?;
    println!("{}", response.message);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging setup)
    let config = match config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    match cli.command {
        Command::Submit(args) => match run_submit(&config, args).await {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => {
                error!("Submission aborted: {:#}", e);
                Err(e)
            }
        },
        Command::Signup(args) => run_signup(&config, args).await,
    }
}
