//! Portfolio report exporters (CSV and PDF)
//!
//! Both exporters return the written file's path, or `None` for an
//! empty portfolio so callers can answer "nothing to export" without
//! treating it as a failure.

use chrono::Local;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

use crate::data_paths::DataPaths;
use crate::errors::{AssistantError, Result};
use crate::ledger::Portfolio;
use crate::report::{report_rows, total_value, ReportRow};

/// Writes portfolio reports into the exports directory.
#[derive(Clone)]
pub struct Exporter {
    exports_dir: PathBuf,
}

impl Exporter {
    pub fn new(data_paths: &DataPaths) -> Self {
        Self {
            exports_dir: data_paths.exports(),
        }
    }

    /// Export the portfolio as a CSV table: one row per asset plus a
    /// total row. Returns `None` for an empty portfolio.
    pub fn export_csv(&self, user_id: &str, portfolio: &Portfolio) -> Result<Option<PathBuf>> {
        require_user(user_id)?;
        if portfolio.is_empty() {
            return Ok(None);
        }

        let path = self.export_path(user_id, "csv")?;
        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| AssistantError::persistence(format!("Failed to write CSV file: {}", e)))?;

        let rows = report_rows(portfolio);
        let write = |writer: &mut csv::Writer<File>, record: [String; 4]| {
            writer.write_record(&record).map_err(|e| {
                AssistantError::persistence(format!("Failed to write CSV file: {}", e))
            })
        };

        write(
            &mut writer,
            [
                "Asset".to_string(),
                "Quantity".to_string(),
                "Price".to_string(),
                "Value".to_string(),
            ],
        )?;
        for row in &rows {
            write(
                &mut writer,
                [
                    row.asset.clone(),
                    format!("{:.2}", row.quantity),
                    format!("{:.2}", row.price),
                    format!("{:.2}", row.value),
                ],
            )?;
        }
        write(
            &mut writer,
            [
                "Total".to_string(),
                String::new(),
                String::new(),
                format!("{:.2}", total_value(&rows)),
            ],
        )?;

        writer
            .flush()
            .map_err(|e| AssistantError::persistence(format!("Failed to write CSV file: {}", e)))?;

        info!(user_id, path = %path.display(), "Exported portfolio CSV");
        Ok(Some(path))
    }

    /// Export the portfolio as a PDF report: title, generation
    /// timestamp, and the same table as the CSV including the total
    /// row. Returns `None` for an empty portfolio.
    pub fn export_pdf(&self, user_id: &str, portfolio: &Portfolio) -> Result<Option<PathBuf>> {
        require_user(user_id)?;
        if portfolio.is_empty() {
            return Ok(None);
        }

        let path = self.export_path(user_id, "pdf")?;
        let rows = report_rows(portfolio);
        let total = total_value(&rows);

        // US letter page
        let (doc, page, layer) = PdfDocument::new(
            format!("Portfolio Report for {}", user_id),
            Mm(215.9),
            Mm(279.4),
            "report",
        );
        let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;

        let mut layer = doc.get_page(page).get_layer(layer);
        let mut y = Mm(260.0);

        layer.use_text(
            format!("Portfolio Report for {}", user_id),
            18.0,
            Mm(20.0),
            y,
            &bold,
        );
        y.0 -= 8.0;
        layer.use_text(
            format!("Generated on {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
            10.0,
            Mm(20.0),
            y,
            &font,
        );
        y.0 -= 14.0;

        write_table_line(
            &layer,
            y,
            &bold,
            ["Asset", "Quantity", "Price ($)", "Value ($)"],
        );
        y.0 -= 8.0;

        for row in &rows {
            if y.0 < 20.0 {
                let (next_page, next_layer) = doc.add_page(Mm(215.9), Mm(279.4), "report");
                layer = doc.get_page(next_page).get_layer(next_layer);
                y = Mm(260.0);
            }
            write_table_line(&layer, y, &font, formatted_row(row));
            y.0 -= 7.0;
        }

        let total_text = format!("{:.2}", total);
        write_table_line(&layer, y, &bold, ["Total", "", "", total_text.as_str()]);

        doc.save(&mut BufWriter::new(File::create(&path).map_err(|e| {
            AssistantError::persistence(format!("Failed to write PDF file: {}", e))
        })?))
        .map_err(pdf_error)?;

        info!(user_id, path = %path.display(), "Exported portfolio PDF");
        Ok(Some(path))
    }

    fn export_path(&self, user_id: &str, extension: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.exports_dir).map_err(|e| {
            AssistantError::persistence(format!("Failed to create exports directory: {}", e))
        })?;
        Ok(self.exports_dir.join(format!(
            "{}_portfolio.{}",
            crate::storage::sanitize_filename(user_id),
            extension
        )))
    }
}

fn formatted_row(row: &ReportRow) -> [String; 4] {
    [
        row.asset.clone(),
        format!("{:.2}", row.quantity),
        format!("{:.2}", row.price),
        format!("{:.2}", row.value),
    ]
}

fn write_table_line<S: AsRef<str>>(
    layer: &PdfLayerReference,
    y: Mm,
    font: &IndirectFontRef,
    columns: [S; 4],
) {
    // Fixed column origins sized for the letter page
    for (text, x) in columns.iter().zip([20.0, 80.0, 120.0, 160.0]) {
        layer.use_text(text.as_ref(), 11.0, Mm(x), y, font);
    }
}

fn pdf_error(err: printpdf::Error) -> AssistantError {
    AssistantError::persistence(format!("Failed to write PDF file: {}", err))
}

fn require_user(user_id: &str) -> Result<()> {
    if user_id.is_empty() {
        return Err(AssistantError::validation(
            "User ID must be a non-empty string",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Holding, PurchaseLot};
    use rust_decimal_macros::dec;

    fn sample_portfolio() -> Portfolio {
        let mut portfolio = Portfolio::new();
        portfolio.insert(
            "BTC".to_string(),
            Holding {
                quantity: dec!(2.00),
                lots: vec![PurchaseLot {
                    quantity: dec!(2),
                    price: dec!(30000.00),
                }],
                current_price: Some(dec!(32000.00)),
            },
        );
        portfolio.insert(
            "ETH".to_string(),
            Holding {
                quantity: dec!(5.00),
                lots: vec![PurchaseLot {
                    quantity: dec!(5),
                    price: dec!(2000.00),
                }],
                current_price: None,
            },
        );
        portfolio
    }

    #[test]
    fn csv_contains_rows_and_total() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(&DataPaths::new(dir.path()));

        let path = exporter
            .export_csv("user1", &sample_portfolio())
            .unwrap()
            .unwrap();
        assert!(path.ends_with("user1_portfolio.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Asset,Quantity,Price,Value");
        assert_eq!(lines[1], "BTC,2.00,32000.00,64000.00");
        assert_eq!(lines[2], "ETH,5.00,2000.00,10000.00");
        assert_eq!(lines[3], "Total,,,74000.00");
    }

    #[test]
    fn empty_portfolio_exports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(&DataPaths::new(dir.path()));

        assert_eq!(exporter.export_csv("user1", &Portfolio::new()).unwrap(), None);
        assert_eq!(exporter.export_pdf("user1", &Portfolio::new()).unwrap(), None);
    }

    #[test]
    fn pdf_is_written_to_exports_dir() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(&DataPaths::new(dir.path()));

        let path = exporter
            .export_pdf("user1", &sample_portfolio())
            .unwrap()
            .unwrap();
        assert!(path.ends_with("user1_portfolio.pdf"));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn empty_user_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(&DataPaths::new(dir.path()));

        let err = exporter
            .export_csv("", &sample_portfolio())
            .unwrap_err();
        assert_eq!(err.to_string(), "User ID must be a non-empty string");
    }
}
