//! Command-line argument definitions for the Orap reporter
//!
//! Defines the CLI using the clap derive API: report rendering commands
//! that take observation fields, and service commands that list remote data.

use crate::config::ReporterConfig;
use crate::models::Observation;
use crate::{ReporterError, Result};
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the Orap reporter
///
/// Renders marine observations into the legacy Orap/KL report formats and
/// talks to the snap message service.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "orap-reporter",
    version,
    about = "Render Orap/KL observation reports and browse echogram snap messages",
    long_about = "Renders sea-ice and wind-wave observations into the fixed-column Orap and KL \
                  report formats consumed by the ingestion system, builds the WebKit multipart \
                  bodies used to upload them, and lists echograms and snap messages from the \
                  snap message service."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (JSON)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Override the Orap server URL
    #[arg(long, value_name = "URL", global = true)]
    pub orap_server_url: Option<String>,

    /// Override the snap API URL
    #[arg(long, value_name = "URL", global = true)]
    pub snap_api_url: Option<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Render the hidden message line
    Hidden(ObservationArgs),
    /// Render the multi-line KL message
    Kl(ObservationArgs),
    /// Render the KL status line
    Status(StatusArgs),
    /// Render the multipart form body carrying all report lines
    Form(FormArgs),
    /// Render and upload the report form to the Orap server
    Submit(SubmitArgs),
    /// Print a random boundary id
    Boundary(BoundaryArgs),
    /// List echogram metadata from the snap message service
    Echograms(ListArgs),
    /// List snap messages from the snap message service
    Snaps(SnapsArgs),
}

/// Observation fields shared by the rendering commands
#[derive(Debug, Clone, ClapArgs)]
pub struct ObservationArgs {
    /// Reporting username
    #[arg(short = 'u', long)]
    pub username: String,

    /// Observation time (RFC 3339) on the observer's clock; defaults to now
    #[arg(long, value_name = "TIME")]
    pub observed_at: Option<DateTime<FixedOffset>>,

    /// Time the report was received (RFC 3339); defaults to the observation time
    #[arg(long, value_name = "TIME")]
    pub received_at: Option<DateTime<Utc>>,

    /// Reporting epoch in seconds; defaults to the received time
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub reporting_epoch: Option<i64>,

    /// Wind-wave height in meters, as it should appear in the report
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub wave_height: String,

    /// Wind-wave period in seconds
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub wave_period: String,

    /// Ice thickness in centimeters
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub ice_thickness: i32,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub latitude: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub longitude: String,

    /// Air temperature in degrees Celsius
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub air_temperature: String,
}

impl ObservationArgs {
    /// Build the observation, filling defaulted timestamps from `now`
    pub fn to_observation(&self, now: DateTime<Utc>) -> Observation {
        let mut observation = Observation::new(self.username.clone(), now);
        if let Some(observed_at) = self.observed_at {
            observation = observation.with_observed_at(observed_at);
        }
        let received_at = self.received_at.unwrap_or(observation.observed_at);

        observation
            .with_received_at(received_at)
            .with_reporting_epoch(self.reporting_epoch.unwrap_or(received_at.timestamp()))
            .with_wind_waves(self.wave_height.clone(), self.wave_period.clone())
            .with_ice_thickness(self.ice_thickness)
            .with_position(self.latitude.clone(), self.longitude.clone())
            .with_air_temperature(self.air_temperature.clone())
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ReporterError::configuration("username must not be empty"));
        }
        if self.username.contains(',') || self.username.contains('\n') {
            return Err(ReporterError::configuration(
                "username must not contain commas or newlines",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StatusArgs {
    #[command(flatten)]
    pub observation: ObservationArgs,

    /// Observation epoch in seconds; defaults to the observation time
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub epoch: Option<i64>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct FormArgs {
    #[command(flatten)]
    pub observation: ObservationArgs,

    /// Boundary id to use instead of a random one
    #[arg(long, value_name = "ID")]
    pub boundary: Option<String>,

    /// Also print the Content-Type header
    #[arg(long)]
    pub show_content_type: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub observation: ObservationArgs,

    /// Render the form and print the target URL without sending
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BoundaryArgs {
    /// Number of characters; defaults to the configured length
    #[arg(short = 'n', long)]
    pub length: Option<usize>,
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ListArgs {
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SnapsArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Embed echogram metadata in each snap message
    #[arg(long)]
    pub with_echogram: bool,
}

impl Args {
    /// Logging level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Apply URL overrides from the command line
    pub fn apply_overrides(&self, config: &mut ReporterConfig) {
        if let Some(url) = &self.orap_server_url {
            config.orap_server_url = url.clone();
        }
        if let Some(url) = &self.snap_api_url {
            config.snap_api_url = url.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("orap-reporter").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_hidden_command() {
        let args = parse(&[
            "hidden",
            "-u",
            "obs1",
            "--wave-height",
            "1.5",
            "--air-temperature",
            "-3",
            "--latitude",
            "-60.0",
        ]);

        let Some(Commands::Hidden(observation)) = args.command else {
            panic!("expected hidden command");
        };
        assert_eq!(observation.username, "obs1");
        assert_eq!(observation.air_temperature, "-3");
        assert_eq!(observation.latitude, "-60.0");
        assert_eq!(observation.ice_thickness, 0);
    }

    #[test]
    fn test_parse_timestamps() {
        let args = parse(&[
            "kl",
            "-u",
            "obs1",
            "--observed-at",
            "2020-03-01T14:00:00+02:00",
        ]);

        let Some(Commands::Kl(observation)) = args.command else {
            panic!("expected kl command");
        };
        let observed_at = observation.observed_at.unwrap();
        assert_eq!(observed_at.offset().local_minus_utc(), 2 * 3600);

        let observation = observation.to_observation(Utc::now());
        assert_eq!(
            observation.observed_at,
            Utc.with_ymd_and_hms(2020, 3, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(observation.received_at, observation.observed_at);
        assert_eq!(observation.observer_utc_offset_seconds, 2 * 3600);
    }

    #[test]
    fn test_to_observation_defaults() {
        let args = parse(&["hidden", "-u", "obs1"]);
        let Some(Commands::Hidden(observation_args)) = args.command else {
            panic!("expected hidden command");
        };

        let now = Utc.with_ymd_and_hms(2021, 5, 4, 3, 2, 1).unwrap();
        let observation = observation_args.to_observation(now);

        assert_eq!(observation.observed_at, now);
        assert_eq!(observation.received_at, now);
        assert_eq!(observation.reporting_epoch_seconds, now.timestamp());
    }

    #[test]
    fn test_observation_validation() {
        let args = parse(&["hidden", "-u", "obs,1"]);
        let Some(Commands::Hidden(observation_args)) = args.command else {
            panic!("expected hidden command");
        };
        assert!(observation_args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["boundary"]).get_log_level(), "warn");
        assert_eq!(parse(&["-vv", "boundary"]).get_log_level(), "debug");
        assert_eq!(parse(&["boundary", "-q"]).get_log_level(), "error");
    }

    #[test]
    fn test_url_overrides() {
        let args = parse(&["--orap-server-url", "http://localhost:1", "echograms"]);
        let mut config = ReporterConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.orap_server_url, "http://localhost:1");
        assert_eq!(config.snap_api_url, ReporterConfig::default().snap_api_url);
    }

    #[test]
    fn test_snaps_args() {
        let args = parse(&["snaps", "--with-echogram", "--format", "json"]);
        let Some(Commands::Snaps(snaps)) = args.command else {
            panic!("expected snaps command");
        };
        assert!(snaps.with_echogram);
        assert_eq!(snaps.list.output_format, OutputFormat::Json);
    }
}
