use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::application::dto::{PlannedImage, ScanPlan};
use crate::scanning::domain::ImageRef;
use crate::shared::result::Result;

/// Config file consumed by the vulnerability scanner.
pub const VULNERABILITY_CONFIG_FILE: &str = ".grype.yaml";
/// Config file consumed by the inventory scanner.
pub const INVENTORY_CONFIG_FILE: &str = ".syft.yaml";

/// Settings written into both scanner config files: no self-update
/// checks, no banner noise on stderr.
#[derive(Debug, Serialize)]
struct ScannerConfig {
    #[serde(rename = "check-for-app-update")]
    check_for_app_update: bool,
    quiet: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            check_for_app_update: false,
            quiet: true,
        }
    }
}

/// Creates the scanner config directory and default config files.
///
/// Idempotent: existing files are left untouched so user edits survive
/// repeated runs.
pub fn ensure_scanner_config(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let rendered = serde_yaml_ng::to_string(&ScannerConfig::default())
        .context("failed to render scanner config")?;

    for file_name in [VULNERABILITY_CONFIG_FILE, INVENTORY_CONFIG_FILE] {
        let path = dir.join(file_name);
        if path.exists() {
            continue;
        }
        fs::write(&path, &rendered)
            .with_context(|| format!("failed to write scanner config {}", path.display()))?;
    }
    Ok(())
}

/// One row of the scan manifest CSV.
#[derive(Debug, Deserialize)]
struct ManifestRow {
    application: String,
    publisher: String,
    registry: String,
    repository: String,
    #[serde(default)]
    tag: String,
    #[serde(default)]
    digest: String,
}

/// Loads and validates the scan manifest.
///
/// Each row names an application, the publisher providing the image, and
/// the image coordinates. An empty tag defaults to `latest`; an empty
/// digest means "scan whatever the tag resolves to". Rejected outright:
/// empty application or publisher labels, duplicate
/// `(publisher, image)` pairs, and a manifest with no rows at all.
pub fn load_scan_plan(path: &Path) -> Result<ScanPlan> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open manifest {}", path.display()))?;

    let mut plan = ScanPlan::new();
    for (index, record) in reader.deserialize().enumerate() {
        let line = index + 2; // header is line 1
        let row: ManifestRow = record
            .with_context(|| format!("malformed manifest row at line {}", line))?;

        if row.application.trim().is_empty() {
            bail!("manifest line {}: application must not be empty", line);
        }
        if row.publisher.trim().is_empty() {
            bail!("manifest line {}: publisher must not be empty", line);
        }

        let tag = match row.tag.trim() {
            "" => None,
            tag => Some(tag.to_string()),
        };
        let digest = match row.digest.trim() {
            "" => None,
            digest => Some(digest.to_string()),
        };
        let image = ImageRef::new(
            row.registry.trim().to_string(),
            row.repository.trim().to_string(),
            tag,
            digest,
        )
        .with_context(|| format!("manifest line {}: invalid image reference", line))?;

        if plan.contains(&row.publisher, &image.identifier()) {
            bail!(
                "manifest line {}: duplicate image {} for publisher {}",
                line,
                image.identifier(),
                row.publisher
            );
        }
        plan.add(
            &row.publisher,
            PlannedImage {
                application: row.application.trim().to_string(),
                image,
            },
        );
    }

    if plan.is_empty() {
        bail!("manifest {} contains no images", path.display());
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("manifest.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_ensure_scanner_config_creates_both_files() {
        let dir = TempDir::new().unwrap();
        ensure_scanner_config(dir.path()).unwrap();

        let grype = fs::read_to_string(dir.path().join(VULNERABILITY_CONFIG_FILE)).unwrap();
        let syft = fs::read_to_string(dir.path().join(INVENTORY_CONFIG_FILE)).unwrap();
        assert!(grype.contains("check-for-app-update: false"));
        assert!(grype.contains("quiet: true"));
        assert_eq!(grype, syft);
    }

    #[test]
    fn test_ensure_scanner_config_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(VULNERABILITY_CONFIG_FILE);
        fs::write(&path, "quiet: false\n").unwrap();

        ensure_scanner_config(dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "quiet: false\n");
    }

    #[test]
    fn test_load_scan_plan_groups_and_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "application,publisher,registry,repository,tag,digest\n\
             nginx,docker,docker.io,library/nginx,1.25,\n\
             nginx,chainguard,cgr.dev,chainguard/nginx,,\n\
             redis,docker,docker.io,library/redis,7,sha256:abc123\n",
        );

        let plan = load_scan_plan(&path).unwrap();
        assert_eq!(plan.image_count(), 3);
        assert!(plan.contains("docker", "docker.io/library/nginx:1.25"));
        // empty tag defaults to latest
        assert!(plan.contains("chainguard", "cgr.dev/chainguard/nginx:latest"));
        assert!(plan.contains("docker", "docker.io/library/redis:7@sha256:abc123"));
    }

    #[test]
    fn test_load_scan_plan_rejects_empty_application() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "application,publisher,registry,repository,tag,digest\n\
             ,docker,docker.io,library/nginx,latest,\n",
        );

        let error = load_scan_plan(&path).unwrap_err();
        assert!(error.to_string().contains("application must not be empty"));
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_scan_plan_rejects_duplicate_publisher_image() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "application,publisher,registry,repository,tag,digest\n\
             nginx,docker,docker.io,library/nginx,latest,\n\
             web,docker,docker.io,library/nginx,latest,\n",
        );

        let error = load_scan_plan(&path).unwrap_err();
        assert!(error.to_string().contains("duplicate image"));
    }

    #[test]
    fn test_load_scan_plan_rejects_empty_manifest() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "application,publisher,registry,repository,tag,digest\n");

        let error = load_scan_plan(&path).unwrap_err();
        assert!(error.to_string().contains("contains no images"));
    }

    #[test]
    fn test_load_scan_plan_missing_file() {
        let dir = TempDir::new().unwrap();
        let error = load_scan_plan(&dir.path().join("nope.csv")).unwrap_err();
        assert!(error.to_string().contains("failed to open manifest"));
    }
}
