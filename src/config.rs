// src/config.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::dashboard::DisplayOptions;

pub const DEFAULT_DATA: &str = "all_data.csv";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command-line args; anything left unset falls back to the config file,
/// then to built-in defaults.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "E-commerce transaction dashboard: daily orders, category demand, buyer and seller cities"
)]
pub struct Args {
    /// CSV or Parquet file, or a glob pattern matching several
    #[arg(short, long)]
    pub data: Option<String>,

    /// First day of the range (YYYY-MM-DD), defaults to the earliest order
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD), defaults to the latest order
    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Keep reading `START END` ranges from stdin and re-render each
    #[arg(short, long)]
    pub interactive: bool,

    /// YAML file with defaults for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub top_categories: Option<usize>,

    #[arg(long)]
    pub bottom_categories: Option<usize>,

    #[arg(long)]
    pub top_cities: Option<usize>,
}

/// Optional YAML config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data: Option<String>,
    pub format: Option<OutputFormat>,
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub top_categories: Option<usize>,
    pub bottom_categories: Option<usize>,
    pub top_cities: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config `{}`", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config `{}`", path.display()))
    }
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub format: OutputFormat,
    pub interactive: bool,
    pub display: DisplayOptions,
}

impl Settings {
    /// Merge CLI args over the config file (if any) over defaults.
    pub fn resolve(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(args, file))
    }

    pub fn merge(args: Args, file: FileConfig) -> Self {
        let defaults = DisplayOptions::default();
        let display = DisplayOptions {
            top_categories: args
                .top_categories
                .or(file.display.top_categories)
                .unwrap_or(defaults.top_categories),
            bottom_categories: args
                .bottom_categories
                .or(file.display.bottom_categories)
                .unwrap_or(defaults.bottom_categories),
            top_cities: args
                .top_cities
                .or(file.display.top_cities)
                .unwrap_or(defaults.top_cities),
        };
        Self {
            data: args
                .data
                .or(file.data)
                .unwrap_or_else(|| DEFAULT_DATA.to_string()),
            start: args.start,
            end: args.end,
            format: args.format.or(file.format).unwrap_or_default(),
            interactive: args.interactive,
            display,
        }
    }
}
