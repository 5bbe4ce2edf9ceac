use crate::circular_buffer::DEFAULT_CAPACITY;
use log::{error, info};
use serde::Deserialize;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueueConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_first_id")]
    pub first_id: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            first_id: default_first_id(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_show_indices")]
    pub show_indices: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_indices: default_show_indices(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_first_id() -> u64 {
    1
}

fn default_show_indices() -> bool {
    true
}

/// Validated settings the rest of the program runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub capacity: NonZeroUsize,
    pub first_id: u64,
    pub show_indices: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            first_id: default_first_id(),
            show_indices: default_show_indices(),
        }
    }
}

impl Config {
    pub fn resolve(self) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
        let capacity = validate_capacity(self.queue.capacity)?;
        let first_id = validate_first_id(self.queue.first_id)?;
        validate_id_range(capacity, first_id)?;
        Ok(ResolvedConfig {
            capacity,
            first_id,
            show_indices: self.display.show_indices,
        })
    }
}

pub fn validate_capacity(capacity: usize) -> Result<NonZeroUsize, Box<dyn std::error::Error>> {
    NonZeroUsize::new(capacity).ok_or_else(|| {
        error!("Invalid queue capacity {}. It must be at least 1", capacity);
        "queue.capacity must be at least 1".into()
    })
}

pub fn validate_first_id(first_id: u64) -> Result<u64, Box<dyn std::error::Error>> {
    if first_id == 0 {
        error!("Invalid first id 0. Ids start at 1 or higher");
        return Err("queue.first_id must be at least 1".into());
    }
    Ok(first_id)
}

/// The initial fill plus at least one enqueue must fit below `u64::MAX`.
pub fn validate_id_range(capacity: NonZeroUsize, first_id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let fits = u64::try_from(capacity.get())
        .ok()
        .and_then(|c| first_id.checked_add(c))
        .is_some();
    if !fits {
        error!("First id {} leaves no room for {} pieces", first_id, capacity);
        return Err(format!(
            "queue.first_id {} is too large for a capacity of {}",
            first_id, capacity
        )
        .into());
    }
    Ok(())
}

pub fn parse_config(content: &str, origin: &str) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
    let cfg: Config = toml::from_str(content)
        .map_err(|e| format!("Failed to parse TOML config {}: {}", origin, e))?;
    cfg.resolve()
        .map_err(|e| format!("Invalid config {}: {}", origin, e).into())
}

pub fn load_config(path: &str) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Config file not found: {}", path).into());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {}", path, e))?;

    let resolved = parse_config(&content, path)?;

    info!("Config loaded from: {}", path);
    info!(
        "Queue capacity {}, ids starting at {}",
        resolved.capacity, resolved.first_id
    );
    Ok(resolved)
}

/// Like `load_config`, but a missing file falls back to the defaults unless
/// `required` is set.
pub fn load_config_or_default(path: &str, required: bool) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
    if !required && !Path::new(path).exists() {
        info!("No config at {}, using defaults", path);
        return Ok(ResolvedConfig::default());
    }
    load_config(path)
}
