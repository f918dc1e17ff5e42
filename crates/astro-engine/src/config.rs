//! Configuration for the calculation engine process.

use std::env;
use std::path::PathBuf;

/// Default script location relative to the working directory.
pub const DEFAULT_SCRIPT_PATH: &str = "scripts/kerykeion_calculator.py";

/// Default per-calculation deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for spawning the calculator script.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Python interpreter to run the script with.
    pub python_path: String,
    /// Path to the calculator script.
    pub script_path: PathBuf,
    /// Deadline for one calculation; a hung engine is killed after this.
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            python_path: "python3".to_string(),
            script_path: PathBuf::from(DEFAULT_SCRIPT_PATH),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PYTHON_PATH` - interpreter (default: python3)
    /// - `ASTRO_SCRIPT_PATH` - script location (default: scripts/kerykeion_calculator.py)
    /// - `ASTRO_CALC_TIMEOUT_SECS` - per-call deadline (default: 30)
    pub fn from_env() -> Self {
        let python_path = env::var("PYTHON_PATH").unwrap_or_else(|_| "python3".to_string());

        let script_path = env::var("ASTRO_SCRIPT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCRIPT_PATH));

        let timeout_secs = env::var("ASTRO_CALC_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            python_path,
            script_path,
            timeout_secs,
        }
    }

    /// Set the interpreter.
    pub fn with_python_path(mut self, path: impl Into<String>) -> Self {
        self.python_path = path.into();
        self
    }

    /// Set the script location.
    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = path.into();
        self
    }

    /// Set the per-call deadline.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
