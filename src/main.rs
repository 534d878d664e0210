use clap::Parser;
use orap_reporter::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(anyhow::Error::from)?;
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Interrupted by user"))
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Orap Reporter - Marine Observation Report Tool");
    println!("==============================================");
    println!();
    println!("Render sea-ice and wind-wave observations into the legacy Orap/KL");
    println!("report formats, and browse echogram snap messages.");
    println!();
    println!("USAGE:");
    println!("    orap-reporter <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    hidden      Render the hidden message line");
    println!("    kl          Render the multi-line KL message");
    println!("    status      Render the KL status line");
    println!("    form        Render the multipart upload body");
    println!("    submit      Upload a report to the Orap server");
    println!("    boundary    Print a random boundary id");
    println!("    echograms   List echogram metadata");
    println!("    snaps       List snap messages");
    println!();
    println!("EXAMPLES:");
    println!("    # Render a hidden message line:");
    println!("    orap-reporter hidden -u obs1 --wave-height 1.5 --wave-period 6 \\");
    println!("                         --latitude 60.0 --longitude 5.0 --air-temperature 10");
    println!();
    println!("    # Preview an upload without sending it:");
    println!("    orap-reporter submit -u obs1 --observed-at 2020-03-01T12:00:00Z --dry-run");
    println!();
    println!("For detailed help on any command, use:");
    println!("    orap-reporter <COMMAND> --help");
}
