// src/main.rs
mod cli;
mod drivers;
mod gui;
mod types;
use anyhow::{Context, Result};
use clap::Parser;
use drivers::{Derived, PlotStyle, SampleArchive, DEFAULT_STRIDE};
use types::DataSource;

// 入口函数
fn main() -> Result<()> {
    env_logger::init();
    let config = cli::Args::parse().resolve()?;
    run(config)
}

// 采集/读取 -> 保存 -> 计算 -> 绘图
fn run(config: cli::RunConfig) -> Result<()> {
    let archive = match &config.source {
        DataSource::Loaded(path) => SampleArchive::load(path)?,
        DataSource::Acquired(settings) => drivers::acquire_from_serial(settings)
            .with_context(|| format!("acquisition from {} failed", settings.device))?,
    };
    if let Some(path) = &config.output {
        archive.save(path)?;
    }
    let derived = Derived::compute(&archive, DEFAULT_STRIDE, config.thresholds);
    if let Some(path) = &config.png {
        drivers::write_stacked_png(path, &archive, &derived, &PlotStyle::default())?;
    }
    if config.show_window {
        gui::show(&archive, &derived, config.render)?;
    }
    Ok(())
}
