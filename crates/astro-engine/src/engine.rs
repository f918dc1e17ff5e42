//! Spawning and supervising the calculator script.

use std::process::Stdio;
use std::time::Duration;

use astro_core::{
    async_trait, AstrologySystem, BirthInput, CalculationError, CalculationResult, Calculator,
};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::wire;

/// Placeholder subject name; the engine requires one but nothing downstream
/// reads it back.
const SUBJECT_NAME: &str = "User";

/// Calculator backed by the Kerykeion Python script.
///
/// Each [`calculate`](Calculator::calculate) call spawns one short-lived
/// process; there is no batching and no state shared between calls.
pub struct KerykeionEngine {
    config: EngineConfig,
}

impl KerykeionEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        info!(
            python = %config.python_path,
            script = %config.script_path.display(),
            timeout_secs = config.timeout_secs,
            "Kerykeion engine configured"
        );
        Self { config }
    }

    /// Create an engine from environment variables.
    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Positional arguments for one calculation call.
    fn build_args(input: &BirthInput, system: AstrologySystem) -> Vec<String> {
        vec![
            SUBJECT_NAME.to_string(),
            input.date_arg(),
            input.time_arg(),
            input.place.clone(),
            system.as_str().to_string(),
        ]
    }
}

#[async_trait]
impl Calculator for KerykeionEngine {
    async fn calculate(
        &self,
        input: &BirthInput,
        system: AstrologySystem,
    ) -> Result<CalculationResult, CalculationError> {
        let args = Self::build_args(input, system);
        debug!(system = %system, place = %input.place, "spawning calculation");

        let mut command = Command::new(&self.config.python_path);
        command
            .arg(&self.config.script_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|e| CalculationError::Spawn(e.to_string()))?;

        let deadline = Duration::from_secs(self.config.timeout_secs);
        let output = match timeout(deadline, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| CalculationError::Spawn(e.to_string()))?,
            Err(_) => {
                // kill_on_drop reaps the hung process.
                warn!(system = %system, timeout_secs = self.config.timeout_secs, "calculation timed out");
                return Err(CalculationError::Timeout(self.config.timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(system = %system, status = ?output.status.code(), "calculation engine failed");
            return Err(CalculationError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let result = wire::parse_document(&stdout)?.into_result(system)?;

        info!(system = %system, place = %input.place, "calculation succeeded");
        Ok(result)
    }
}
