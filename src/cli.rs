//! Command line surface.
//!
//! Usage:
//!   padscope /dev/ttyACM0 -t 5 -o run.json
//!   padscope -i run.json --abs 350 --rel 150 --show-histograms

use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use crate::drivers::{PadError, Thresholds};
use crate::types::{DataSource, RenderOptions, SerialSettings};

#[derive(Parser, Debug)]
#[command(name = "padscope")]
#[command(about = "Collect and plot ADC samples from a DDR pad board", long_about = None)]
pub struct Args {
    /// Serial port of the board (not needed with --input)
    pub device: Option<String>,

    /// Polling period of the board in seconds
    #[arg(long, default_value_t = 0.001, allow_negative_numbers = true)]
    pub polling_period: f64,

    /// How long to collect data, in seconds
    #[arg(short = 't', long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub collection_time: f64,

    /// File to save the collected data in
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Load data from this file instead of collecting from the serial port
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Absolute threshold
    #[arg(long = "abs", default_value_t = 400, allow_negative_numbers = true)]
    pub abs_thresh: i32,

    /// Relative threshold
    #[arg(long = "rel", default_value_t = 200, allow_negative_numbers = true)]
    pub rel_thresh: i32,

    /// Serial baud rate
    #[arg(long, default_value_t = 9600)]
    pub baud_rate: u32,

    /// Seconds a single line read may block before giving up
    #[arg(long, default_value_t = 1.0)]
    pub read_timeout: f64,

    /// Also show all raw traces overlaid in one plot
    #[arg(long)]
    pub show_overlay: bool,

    /// Also show a histogram per channel
    #[arg(long)]
    pub show_histograms: bool,

    /// Export the stacked plots to this PNG file
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Do not open the plot window
    #[arg(long)]
    pub no_window: bool,
}

/// Everything a run needs, checked before any I/O happens.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub source: DataSource,
    pub output: Option<PathBuf>,
    pub thresholds: Thresholds,
    pub render: RenderOptions,
    pub png: Option<PathBuf>,
    pub show_window: bool,
}

impl Args {
    pub fn resolve(self) -> Result<RunConfig, PadError> {
        let source = match (self.input, self.device) {
            (Some(_), Some(device)) => {
                return Err(PadError::Config(format!(
                    "both an input file and device {device} were given; pick one"
                )))
            }
            (None, None) => {
                return Err(PadError::Config(
                    "either a serial device or --input is required".into(),
                ))
            }
            (Some(path), None) => DataSource::Loaded(path),
            (None, Some(device)) => {
                let settings = SerialSettings {
                    device,
                    baud_rate: self.baud_rate,
                    polling_period: seconds("--polling-period", self.polling_period)?,
                    collection_time: seconds("--collection-time", self.collection_time)?,
                    read_timeout: seconds("--read-timeout", self.read_timeout)?,
                };
                if settings.polling_period.is_zero() {
                    return Err(PadError::Config("--polling-period must be positive".into()));
                }
                if crate::drivers::sample_count(settings.polling_period, settings.collection_time)
                    == 0
                {
                    return Err(PadError::Config(format!(
                        "collection time {}s is shorter than one polling period",
                        self.collection_time
                    )));
                }
                DataSource::Acquired(settings)
            }
        };
        Ok(RunConfig {
            source,
            output: self.output,
            thresholds: Thresholds {
                absolute: self.abs_thresh,
                relative: self.rel_thresh,
            },
            render: RenderOptions {
                show_overlay: self.show_overlay,
                show_histograms: self.show_histograms,
            },
            png: self.png,
            show_window: !self.no_window,
        })
    }
}

fn seconds(flag: &str, value: f64) -> Result<Duration, PadError> {
    Duration::try_from_secs_f64(value)
        .map_err(|e| PadError::Config(format!("{flag} {value}: {e}")))
}
