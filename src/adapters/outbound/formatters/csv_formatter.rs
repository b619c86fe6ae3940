use anyhow::anyhow;
use csv::WriterBuilder;

use crate::analysis::{ComparisonTable, SnapshotTable, SNAPSHOT_TABLE_COLUMNS};
use crate::ports::outbound::TableFormatter;
use crate::shared::Result;

/// CsvFormatter adapter rendering tables as CSV
///
/// Output schema for snapshot tables follows `SNAPSHOT_TABLE_COLUMNS`;
/// comparison tables get an `application` column plus one column per
/// publisher. Counts render as integers, sizes with one decimal.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("csv into inner error: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter for CsvFormatter {
    fn format_snapshot_table(&self, table: &SnapshotTable) -> Result<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(SNAPSHOT_TABLE_COLUMNS)?;
        for row in table.rows() {
            writer.write_record([
                row.application.as_str(),
                row.registry.as_str(),
                row.repository.as_str(),
                row.tag.as_str(),
                row.digest.as_str(),
                row.distro.as_str(),
                &row.total_cves.to_string(),
                &row.severe_cves.to_string(),
                &row.components.to_string(),
                &format!("{:.1}", row.image_size_mb),
            ])?;
        }
        Self::finish(writer)
    }

    fn format_comparison_table(&self, table: &ComparisonTable) -> Result<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        let mut header = vec!["application".to_string()];
        header.extend(table.publishers().iter().cloned());
        writer.write_record(&header)?;

        for row in table.rows() {
            let mut record = vec![row.application.clone()];
            record.extend(row.cells.iter().map(|cell| table.metric().render_cell(*cell)));
            writer.write_record(&record)?;
        }
        Self::finish(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{build_comparison_table, LabeledSnapshot, Metric};
    use crate::scanning::domain::{Component, ImageRef, Severity, Snapshot, Vulnerability};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn labeled(application: &str, identifier: &str, cves: usize) -> LabeledSnapshot {
        let vulnerabilities = (0..cves)
            .map(|i| {
                Vulnerability::new(
                    format!("CVE-2024-{:04}", i),
                    Severity::High,
                    "fixed",
                    Component::new("openssl".to_string(), "3.0.13".to_string(), "deb"),
                )
            })
            .collect();
        LabeledSnapshot {
            application: application.to_string(),
            snapshot: Snapshot::new(
                ImageRef::parse(identifier).unwrap(),
                Utc::now(),
                vulnerabilities,
                vec![],
                10_500_000,
                "debian".to_string(),
            ),
        }
    }

    #[test]
    fn test_snapshot_table_csv() {
        let table = crate::analysis::SnapshotTable::from_snapshots(
            "docker",
            &[labeled("nginx", "docker.io/library/nginx:1.25", 2)],
        );
        let csv = CsvFormatter::new().format_snapshot_table(&table).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "application,registry,repository,tag,digest,distro,total_cves,severe_cves,components,image_size_mb"
        );
        assert_eq!(
            lines.next().unwrap(),
            "nginx,docker.io,library/nginx,1.25,,debian,2,2,0,10.5"
        );
    }

    #[test]
    fn test_comparison_table_csv_zero_fills() {
        let mut groups = BTreeMap::new();
        groups.insert(
            "A".to_string(),
            vec![
                labeled("app1", "a.example/app1:latest", 5),
                labeled("app2", "a.example/app2:latest", 3),
            ],
        );
        groups.insert(
            "B".to_string(),
            vec![labeled("app1", "b.example/app1:latest", 2)],
        );
        let table = build_comparison_table(&groups, Metric::TotalCves);
        let csv = CsvFormatter::new().format_comparison_table(&table).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["application,A,B", "app1,5,2", "app2,3,0"]);
    }
}
