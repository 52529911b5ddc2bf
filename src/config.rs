use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Parser, Debug, Clone)]
#[command(name = "cavernrun")]
#[command(about = "Fly through a scrolling cavern, grab the treasure, don't touch the walls", long_about = None)]
pub(crate) struct Args {
    /// JSON settings file; fields left out keep their defaults
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Write logs to this file (RUST_LOG filters, default info)
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Rules {
    pub(crate) initial_tick_ms: u64,
    pub(crate) min_tick_ms: u64,
    pub(crate) tick_step_ms: u64,
    pub(crate) spawn_period: i32,
    pub(crate) treasure_bonus: u64,
    pub(crate) seed: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_tick_ms: 70,
            min_tick_ms: 24,
            tick_step_ms: 2,
            spawn_period: 100,
            treasure_bonus: 500,
            seed: 0xC0FFEE_u64,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RulesError {
    #[error("min_tick_ms must be positive")]
    ZeroFloor,
    #[error("initial_tick_ms ({initial}) is below min_tick_ms ({floor})")]
    StartBelowFloor { initial: u64, floor: u64 },
    #[error("tick_step_ms must be positive")]
    ZeroStep,
    #[error("spawn_period must be positive, got {0}")]
    BadSpawnPeriod(i32),
}

impl Rules {
    pub(crate) fn validate(&self) -> Result<(), RulesError> {
        if self.min_tick_ms == 0 {
            return Err(RulesError::ZeroFloor);
        }
        if self.initial_tick_ms < self.min_tick_ms {
            return Err(RulesError::StartBelowFloor {
                initial: self.initial_tick_ms,
                floor: self.min_tick_ms,
            });
        }
        if self.tick_step_ms == 0 {
            return Err(RulesError::ZeroStep);
        }
        if self.spawn_period <= 0 {
            return Err(RulesError::BadSpawnPeriod(self.spawn_period));
        }
        Ok(())
    }
}

pub(crate) fn parse_rules(json: &str) -> Result<Rules> {
    let rules: Rules = serde_json::from_str(json).context("invalid settings json")?;
    rules.validate()?;
    Ok(rules)
}

pub(crate) fn load_rules(path: &Path) -> Result<Rules> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("could not read settings file {}", path.display()))?;
    parse_rules(&s).with_context(|| format!("bad settings in {}", path.display()))
}

/// Defaults, then the settings file, then command-line overrides.
pub(crate) fn resolve_rules(args: &Args) -> Result<Rules> {
    let mut rules = match &args.config {
        Some(path) => load_rules(path)?,
        None => Rules::default(),
    };
    if let Some(seed) = args.seed {
        rules.seed = seed;
    }
    rules.validate()?;
    Ok(rules)
}
