//! Command implementations for the Orap reporter CLI
//!
//! Rendering commands write report text to stdout byte-for-byte so the
//! output can be piped straight into other tools. Service commands print
//! listings in human or JSON form. Logs go to stderr.

use crate::cli::args::{
    Args, BoundaryArgs, Commands, FormArgs, ListArgs, ObservationArgs, OutputFormat, SnapsArgs,
    StatusArgs, SubmitArgs,
};
use crate::client::{HttpSnapMessageService, OrapUploader, SnapMessageService};
use crate::config::{ReporterConfig, validate_boundary_id_length};
use crate::form::{boundary_id, observation_report_form};
use crate::models::{EchogramInfo, SnapMessage};
use crate::report::{ReportFormatter, ReportKind, hidden_kl_status_line};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use std::io::{self, Write};
use tracing::{debug, info};

/// Main command runner
///
/// 1. Set up logging
/// 2. Load layered configuration and apply CLI overrides
/// 3. Dispatch the subcommand
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let Some(command) = args.command.clone() else {
        anyhow::bail!("No command given. Run with --help to list commands.");
    };

    match command {
        Commands::Hidden(observation) => render(&config, ReportKind::Hidden, &observation),
        Commands::Kl(observation) => render(&config, ReportKind::Kl, &observation),
        Commands::Status(status) => render_status(&status),
        Commands::Form(form) => render_form(&config, &form),
        Commands::Submit(submit) => submit_report(&config, &submit).await,
        Commands::Boundary(boundary) => print_boundary(&config, &boundary),
        Commands::Echograms(list) => list_echograms(&config, &list).await,
        Commands::Snaps(snaps) => list_snaps(&config, &snaps).await,
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("orap_reporter={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
fn load_configuration(args: &Args) -> Result<ReporterConfig> {
    let default_config_path = if args.config_file.is_none() {
        ReporterConfig::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if config_file.is_none() {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = ReporterConfig::load_layered(config_file)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    Ok(config)
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("Failed to write to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn render(config: &ReporterConfig, kind: ReportKind, args: &ObservationArgs) -> Result<()> {
    args.validate()?;
    let observation = args.to_observation(Utc::now());
    let formatter = ReportFormatter::new(config.kl_patterns.clone());
    write_stdout(&formatter.render(kind, &observation))
}

fn render_status(args: &StatusArgs) -> Result<()> {
    args.observation.validate()?;
    let observation = args.observation.to_observation(Utc::now());
    let epoch = args.epoch.unwrap_or(observation.observed_at.timestamp());
    write_stdout(&hidden_kl_status_line(epoch, &observation))
}

fn render_form(config: &ReporterConfig, args: &FormArgs) -> Result<()> {
    args.observation.validate()?;
    let observation = args.observation.to_observation(Utc::now());
    let boundary = args
        .boundary
        .clone()
        .unwrap_or_else(|| boundary_id(config.boundary_id_length));

    let formatter = ReportFormatter::new(config.kl_patterns.clone());
    let form = observation_report_form(&observation, &formatter, boundary);

    if args.show_content_type {
        write_stdout(&format!("Content-Type: {}\n\n", form.content_type()))?;
    }
    write_stdout(&form.serialize())
}

async fn submit_report(config: &ReporterConfig, args: &SubmitArgs) -> Result<()> {
    args.observation.validate()?;
    let observation = args.observation.to_observation(Utc::now());
    let formatter = ReportFormatter::new(config.kl_patterns.clone());
    let form = observation_report_form(
        &observation,
        &formatter,
        boundary_id(config.boundary_id_length),
    );

    let uploader = OrapUploader::new(config)?;

    if args.dry_run {
        println!("{} {}", "Target:".bright_white().bold(), uploader.endpoint());
        println!("{} {}", "Content-Type:".bright_white().bold(), form.content_type());
        println!();
        return write_stdout(&form.serialize());
    }

    info!(
        "Submitting report for {} to {}",
        observation.reporting_username,
        uploader.endpoint()
    );
    let response = uploader
        .submit(form)
        .await
        .context("Failed to submit observation report")?;

    println!("{}", "Report submitted".bright_green().bold());
    if !response.trim().is_empty() {
        println!("{}", response.trim());
    }
    Ok(())
}

fn print_boundary(config: &ReporterConfig, args: &BoundaryArgs) -> Result<()> {
    println!("{}", requested_boundary(config, args)?);
    Ok(())
}

fn requested_boundary(config: &ReporterConfig, args: &BoundaryArgs) -> Result<String> {
    let length = args.length.unwrap_or(config.boundary_id_length);
    validate_boundary_id_length(length)?;
    Ok(boundary_id(length))
}

async fn list_echograms(config: &ReporterConfig, args: &ListArgs) -> Result<()> {
    let service = HttpSnapMessageService::new(config)?;
    let echograms = service
        .echogram_infos()
        .await
        .context("Failed to fetch echogram infos")?;

    match args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&echograms)?),
        OutputFormat::Human => print_echograms(&echograms),
    }
    Ok(())
}

async fn list_snaps(config: &ReporterConfig, args: &SnapsArgs) -> Result<()> {
    let service = HttpSnapMessageService::new(config)?;
    let messages = service
        .snap_messages(args.with_echogram)
        .await
        .context("Failed to fetch snap messages")?;

    match args.list.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&messages)?),
        OutputFormat::Human => print_snaps(&messages),
    }
    Ok(())
}

fn print_echograms(echograms: &[EchogramInfo]) {
    println!("{}", "Echograms:".bright_green().bold());
    if echograms.is_empty() {
        println!("  {}", "(none)".bright_black());
        return;
    }

    for echogram in echograms {
        println!(
            "  {} {} {}",
            format!("#{}", echogram.id).bright_yellow().bold(),
            echogram.timestamp.format("%Y-%m-%d %H:%M").to_string().bright_cyan(),
            format!("({:.4}, {:.4})", echogram.latitude, echogram.longitude).bright_black()
        );
    }
}

fn print_snaps(messages: &[SnapMessage]) {
    println!("{}", "Snap messages:".bright_green().bold());
    if messages.is_empty() {
        println!("  {}", "(none)".bright_black());
        return;
    }

    for message in messages {
        let when = message
            .echogram_info
            .as_ref()
            .map(|echogram| echogram.timestamp)
            .or(message.sent_timestamp)
            .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        println!(
            "  {} {} {}",
            message.sender.bright_yellow().bold(),
            message.title.bright_cyan(),
            when.bright_black()
        );
    }
}
