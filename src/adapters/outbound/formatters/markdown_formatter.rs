use crate::analysis::{ComparisonTable, SnapshotTable, SNAPSHOT_TABLE_COLUMNS};
use crate::ports::outbound::TableFormatter;
use crate::shared::Result;

/// MarkdownFormatter adapter rendering tables as Markdown
///
/// Comparison tables are what the CLI prints to stdout at the end of a
/// run; snapshot tables render with the same column set as the CSV form.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_table(output: &mut String, header: &[String], rows: &[Vec<String>]) {
        output.push('|');
        for cell in header {
            output.push_str(&format!(" {} |", Self::escape_cell(cell)));
        }
        output.push('\n');

        output.push('|');
        for _ in header {
            output.push_str("---|");
        }
        output.push('\n');

        for row in rows {
            output.push('|');
            for cell in row {
                output.push_str(&format!(" {} |", Self::escape_cell(cell)));
            }
            output.push('\n');
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter for MarkdownFormatter {
    fn format_snapshot_table(&self, table: &SnapshotTable) -> Result<String> {
        let mut output = format!("## Snapshots: {}\n\n", table.publisher());
        let header: Vec<String> = SNAPSHOT_TABLE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect();
        let rows: Vec<Vec<String>> = table
            .rows()
            .iter()
            .map(|row| {
                vec![
                    row.application.clone(),
                    row.registry.clone(),
                    row.repository.clone(),
                    row.tag.clone(),
                    row.digest.clone(),
                    row.distro.clone(),
                    row.total_cves.to_string(),
                    row.severe_cves.to_string(),
                    row.components.to_string(),
                    format!("{:.1}", row.image_size_mb),
                ]
            })
            .collect();
        Self::render_table(&mut output, &header, &rows);
        output.push('\n');
        Ok(output)
    }

    fn format_comparison_table(&self, table: &ComparisonTable) -> Result<String> {
        let mut output = format!("## {}\n\n", table.metric().title());
        let mut header = vec!["Application".to_string()];
        header.extend(table.publishers().iter().cloned());
        let rows: Vec<Vec<String>> = table
            .rows()
            .iter()
            .map(|row| {
                let mut cells = vec![row.application.clone()];
                cells.extend(
                    row.cells
                        .iter()
                        .map(|cell| table.metric().render_cell(*cell)),
                );
                cells
            })
            .collect();
        Self::render_table(&mut output, &header, &rows);
        output.push('\n');
        Ok(output)
    }
}
