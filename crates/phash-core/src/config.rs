use crate::error::{Error, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Side length the image collaborator resizes to before the DCT
pub const DEFAULT_REDUCED_SIZE: usize = 32;

/// Side length of the low-frequency band kept after the DCT
pub const DEFAULT_SAMPLING_SIZE: usize = 8;

/// Bits packed into each hexadecimal digit, e.g. 0011 1101 -> "3d"
pub const BIN_GROUP_SIZE: usize = 4;

/// Decimal digits every DCT coefficient is rounded to
pub const DEFAULT_PRECISION: u32 = 8;

/// Largest rounding precision that still means something for an f64
const MAX_PRECISION: u32 = 15;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Configuration for fingerprint computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side length N of the intensity matrix
    pub reduced_size: usize,

    /// Side length K of the cropped low-frequency band
    pub sampling_size: usize,

    /// Bits per hexadecimal digit of the fingerprint
    pub bin_group_size: usize,

    /// DCT rounding precision in decimal digits
    pub precision: u32,

    /// Maximum Hamming distance for two fingerprints to count as similar
    pub similarity_threshold: u32,

    /// Number of threads to use for batch processing (0 = auto)
    pub threads: usize,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reduced_size: DEFAULT_REDUCED_SIZE,
            sampling_size: DEFAULT_SAMPLING_SIZE,
            bin_group_size: BIN_GROUP_SIZE,
            precision: DEFAULT_PRECISION,
            similarity_threshold: 10,
            threads: 0, // Auto
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let file = std::fs::File::open(path)?;
        let config: Config = serde_json::from_reader(file)?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Number of hexadecimal digits in a fingerprint produced with this configuration
    pub fn fingerprint_len(&self) -> usize {
        self.sampling_size * self.sampling_size / self.bin_group_size
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.reduced_size == 0 || self.sampling_size == 0 || self.bin_group_size == 0 {
            return Err(Error::Configuration(
                "reduced_size, sampling_size and bin_group_size must be positive".to_string(),
            ));
        }

        if self.sampling_size > self.reduced_size {
            return Err(Error::Configuration(format!(
                "sampling_size ({}) cannot exceed reduced_size ({})",
                self.sampling_size, self.reduced_size
            )));
        }

        // A group must fit in a single hex digit
        if self.bin_group_size > BIN_GROUP_SIZE {
            return Err(Error::Configuration(format!(
                "bin_group_size must be between 1 and {}, got {}",
                BIN_GROUP_SIZE, self.bin_group_size
            )));
        }

        let bits = self.sampling_size * self.sampling_size;
        if bits % self.bin_group_size != 0 {
            return Err(Error::Configuration(format!(
                "{} band bits are not divisible into groups of {}",
                bits, self.bin_group_size
            )));
        }

        if self.precision > MAX_PRECISION {
            return Err(Error::Configuration(format!(
                "precision must be at most {} digits, got {}",
                MAX_PRECISION, self.precision
            )));
        }

        Ok(())
    }
}
