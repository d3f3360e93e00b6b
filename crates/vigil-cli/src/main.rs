//! Vigil CLI - run the dashboard in a terminal.

#![allow(
    clippy::uninlined_format_args,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};
use vigil::{Dashboard, DashboardConfig, SessionEvent, VitalField};

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Single-subject vitals dashboard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard in local simulation mode
    Run {
        /// Path to the session configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of ticks to run (default: until interrupted)
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Override the tick interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Check a configuration file
    Check {
        /// Path to the configuration file
        #[arg(default_value = "vigil.yaml")]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            ticks,
            interval_ms,
        } => run(config.as_deref(), ticks, interval_ms),
        Commands::Check { config } => check(&config),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<DashboardConfig, String> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            DashboardConfig::from_yaml(&source).map_err(|e| e.to_string())
        }
        None => Ok(DashboardConfig::default()),
    }
}

fn run(
    config_path: Option<&std::path::Path>,
    ticks: Option<u64>,
    interval_ms: Option<u64>,
) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(interval) = interval_ms {
        config.tick_interval_ms = interval;
    }

    let interval = Duration::from_millis(config.tick_interval_ms);
    let mut dashboard = Dashboard::new(&config);
    let started = Instant::now();

    println!("vigil - monitoring {}", config.subject_id);
    println!("tick interval: {}ms, mode: local simulation", config.tick_interval_ms);
    println!();

    let mut count: u64 = 0;
    loop {
        thread::sleep(interval);
        let now = started.elapsed();
        dashboard.handle(SessionEvent::Tick, now);
        print_frame(&dashboard, now);

        count += 1;
        if ticks.is_some_and(|limit| count >= limit) {
            break;
        }
    }
    ExitCode::SUCCESS
}

fn print_frame(dashboard: &Dashboard, now: Duration) {
    let mut line = format!("[{:>6.1}s]", now.as_secs_f64());
    for field in [
        VitalField::HeartRate,
        VitalField::Spo2,
        VitalField::Systolic,
        VitalField::Diastolic,
        VitalField::Temperature,
    ] {
        if let Some(badge) = dashboard.badge(field) {
            line.push_str(&format!("  {}", badge.text()));
        }
    }
    line.push_str(&format!("  [{}]", dashboard.overall().label()));
    if let Some(notice) = dashboard.notice(now) {
        line.push_str(&format!("  ({})", notice.message));
    }
    println!("{line}");
}

fn check(path: &std::path::Path) -> ExitCode {
    match load_config(Some(path)) {
        Ok(config) => {
            println!("{} is valid", path.display());
            println!("  subject:   {}", config.subject_id);
            println!("  tick:      {}ms", config.tick_interval_ms);
            match &config.backend {
                Some(backend) => {
                    println!("  backend:   {}", backend.base_url);
                    println!("  reconnect: {} attempts", backend.reconnect_attempts);
                }
                None => println!("  backend:   not configured (local-only)"),
            }
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
