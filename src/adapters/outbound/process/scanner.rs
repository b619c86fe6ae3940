use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;

use crate::config::{INVENTORY_CONFIG_FILE, VULNERABILITY_CONFIG_FILE};
use crate::ports::outbound::ScannerBackend;
use crate::scanning::domain::ImageRef;
use crate::shared::error::{ScanError, ScannerKind};

const VULNERABILITY_TOOL: &str = "grype";
const INVENTORY_TOOL: &str = "syft";
const VULNERABILITY_FORMAT: &str = "json";
const INVENTORY_FORMAT: &str = "syft-json";

/// ProcessScannerBackend adapter invoking grype and syft as subprocesses.
///
/// Each invocation spawns `<tool> <identifier> -o <format> [-c <config>]`
/// with stdout and stderr piped. Exit status 1 is the tools' "image could
/// not be resolved or pulled" signal and maps to `ImageNotFound`; any
/// other abnormal exit, non-JSON stdout, launch failure, or timeout
/// expiry maps to `MalformedOutput`.
///
/// Children are spawned with `kill_on_drop`, so cancelling a scan future
/// (fail-fast mode, timeout) kills the outstanding process best-effort.
pub struct ProcessScannerBackend {
    vulnerability_tool: String,
    inventory_tool: String,
    config_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ProcessScannerBackend {
    pub fn new() -> Self {
        Self {
            vulnerability_tool: VULNERABILITY_TOOL.to_string(),
            inventory_tool: INVENTORY_TOOL.to_string(),
            config_dir: None,
            timeout: None,
        }
    }

    /// Points the tools at config files inside `dir` (`.grype.yaml` and
    /// `.syft.yaml`). A config file that does not exist is simply not
    /// passed.
    pub fn with_config_dir(mut self, dir: PathBuf) -> Self {
        self.config_dir = Some(dir);
        self
    }

    /// Applies a per-invocation timeout. Expiry maps to
    /// `ScanError::MalformedOutput` so the error union is unchanged.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn config_file(&self, kind: ScannerKind) -> Option<PathBuf> {
        let name = match kind {
            ScannerKind::Vulnerability => VULNERABILITY_CONFIG_FILE,
            ScannerKind::Inventory => INVENTORY_CONFIG_FILE,
        };
        let path = self.config_dir.as_ref()?.join(name);
        path.exists().then_some(path)
    }

    async fn invoke(
        &self,
        kind: ScannerKind,
        tool: &str,
        format: &str,
        image: &ImageRef,
    ) -> Result<Value, ScanError> {
        let mut command = Command::new(tool);
        command
            .arg(image.identifier())
            .arg("-o")
            .arg(format)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(config) = self.config_file(kind) {
            command.arg("-c").arg(config);
        }

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| ScanError::MalformedOutput {
                    kind,
                    reason: format!("{} did not finish within {}s", tool, limit.as_secs()),
                })?,
            None => command.output().await,
        };
        let output = output.map_err(|e| ScanError::MalformedOutput {
            kind,
            reason: format!("failed to launch {}: {}", tool, e),
        })?;

        match output.status.code() {
            Some(0) => {
                serde_json::from_slice(&output.stdout).map_err(|e| ScanError::MalformedOutput {
                    kind,
                    reason: format!("invalid JSON from {}: {}", tool, e),
                })
            }
            Some(1) => Err(ScanError::ImageNotFound {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            _ => Err(ScanError::MalformedOutput {
                kind,
                reason: format!(
                    "{} exited with {}: {}",
                    tool,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }),
        }
    }
}

impl Default for ProcessScannerBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScannerBackend for ProcessScannerBackend {
    async fn vulnerability_report(&self, image: &ImageRef) -> Result<Value, ScanError> {
        self.invoke(
            ScannerKind::Vulnerability,
            &self.vulnerability_tool,
            VULNERABILITY_FORMAT,
            image,
        )
        .await
    }

    async fn inventory_report(&self, image: &ImageRef) -> Result<Value, ScanError> {
        self.invoke(
            ScannerKind::Inventory,
            &self.inventory_tool,
            INVENTORY_FORMAT,
            image,
        )
        .await
    }
}
