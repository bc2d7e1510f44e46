//! Local completion executable (llama.cpp `llama-cli` contract).
//!
//! The executable is the only blocking external boundary in the pipeline.
//! The child is spawned with kill-on-drop: when the timeout fires or the
//! caller drops the future, the process is killed and handed to tokio's
//! reaper, and its pipes close with the handle.

use crate::config::LlmConfig;
use crate::error::RegimeError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Text completion backend.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Raw completion output for `prompt`, prompt echo included if the
    /// backend echoes.
    async fn complete(&self, prompt: &str) -> Result<String, RegimeError>;
}

/// Runs the configured completion binary once per prompt.
#[derive(Debug, Clone)]
pub struct LlamaCli {
    config: LlmConfig,
}

impl LlamaCli {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }

    /// Command line for `prompt`: fixed decoding parameters, non-chat mode.
    pub fn args(&self, prompt: &str) -> Vec<OsString> {
        vec![
            "-m".into(),
            self.config.model_path.clone().into_os_string(),
            "-p".into(),
            prompt.into(),
            "-no-cnv".into(),
            "-ngl".into(),
            self.config.gpu_layers.to_string().into(),
            "--temp".into(),
            self.config.temperature.to_string().into(),
            "--n-predict".into(),
            self.config.n_predict.to_string().into(),
        ]
    }
}

#[async_trait]
impl CompletionModel for LlamaCli {
    async fn complete(&self, prompt: &str) -> Result<String, RegimeError> {
        let start = Instant::now();
        let child = Command::new(&self.config.binary)
            .args(self.args(prompt))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RegimeError::Spawn {
                binary: self.config.binary.clone(),
                source,
            })?;

        debug!(
            "Spawned {} (pid {:?}, prompt {} bytes)",
            self.config.binary.display(),
            child.id(),
            prompt.len()
        );

        let pending = child.wait_with_output();
        let output = match self.config.timeout() {
            Some(limit) => match timeout(limit, pending).await {
                Ok(result) => result?,
                Err(_) => {
                    let secs = limit.as_secs();
                    warn!("Inference timeout after {}s, killing executable", secs);
                    return Err(RegimeError::Timeout { secs });
                }
            },
            None => pending.await?,
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                "Inference exited with {:?} after {}ms",
                output.status.code(),
                elapsed_ms
            );
            return Err(RegimeError::Inference {
                exit_code: output.status.code(),
                stderr,
            });
        }

        debug!(
            "Inference finished in {}ms ({} bytes stdout)",
            elapsed_ms,
            output.stdout.len()
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_args_carry_fixed_decoding_parameters() {
        let cli = LlamaCli::new(LlmConfig {
            model_path: PathBuf::from("/models/m.gguf"),
            ..LlmConfig::default()
        });
        let args: Vec<String> = cli
            .args("Say hi")
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect();
        assert_eq!(
            args,
            vec![
                "-m",
                "/models/m.gguf",
                "-p",
                "Say hi",
                "-no-cnv",
                "-ngl",
                "40",
                "--temp",
                "0.2",
                "--n-predict",
                "300",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let cli = LlamaCli::new(LlmConfig {
            binary: PathBuf::from("/nonexistent/llama-cli"),
            ..LlmConfig::default()
        });
        let err = cli.complete("prompt").await.unwrap_err();
        assert!(matches!(err, RegimeError::Spawn { .. }));
    }
}
