//! Serial terminal TUI - Entry Point

use clap::Parser;
use sertui::config::CliOverrides;
use sertui::model::{AppError, LineEnding, Parity};
use sertui::source::ByteSource;
use sertui::view::ColorConfig;
use std::path::PathBuf;
use tracing::info;

/// Serial terminal TUI with scrollback, timestamps and send history
#[derive(Parser, Debug)]
#[command(name = "sertui")]
#[command(version)]
#[command(about = "TUI serial terminal with scrollback, timestamps and send history")]
pub struct Args {
    /// Serial port to open (e.g. /dev/ttyUSB0 or COM3)
    pub port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Data bits (5-8)
    #[arg(long, value_parser = clap::value_parser!(u8).range(5..=8))]
    pub data_bits: Option<u8>,

    /// Stop bits (1 or 2)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub stop_bits: Option<u8>,

    /// Parity
    #[arg(long, value_enum)]
    pub parity: Option<Parity>,

    /// Line ending appended to sent lines
    #[arg(long, value_enum)]
    pub line_ending: Option<LineEnding>,

    /// Start with the timestamp column hidden
    #[arg(long)]
    pub no_timestamps: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print available ports and exit
    #[arg(long)]
    pub list_ports: bool,

    /// Use an in-memory echo device instead of a serial port
    #[arg(long, conflicts_with = "port")]
    pub loopback: bool,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            port: self.port.clone(),
            baud_rate: self.baud,
            data_bits: self.data_bits,
            stop_bits: self.stop_bits,
            parity: self.parity,
            line_ending: self.line_ending,
            no_timestamps: self.no_timestamps,
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.list_ports {
        for name in sertui::source::serial::list_ports()? {
            println!("{name}");
        }
        return Ok(());
    }

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = sertui::config::load_config_with_precedence(args.config.clone())?;
        let merged = sertui::config::merge_config(config_file)?;
        let with_env = sertui::config::apply_env_overrides(merged)?;
        sertui::config::apply_cli_overrides(with_env, args.cli_overrides())?
    };

    sertui::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let source_options = config.source_options();
    let (source, port_label) = if args.loopback {
        let (source, _device) = ByteSource::loopback(&source_options)?;
        (source, String::from("loopback"))
    } else {
        let settings = config.port_settings()?;
        let source = ByteSource::open_serial(&settings, &source_options)?;
        (source, settings.to_string())
    };

    let color_config = ColorConfig::from_env_and_args(args.no_color);
    sertui::view::run_with_source(source, port_label, &config, color_config)?;

    Ok(())
}
