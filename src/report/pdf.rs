//! Printable report generation.
//!
//! A4 portrait document: title block, per-group summary table, then the
//! timeline chart embedded as a raster image. A chart failure is noted
//! inline instead of failing the whole document.

use printpdf::*;
use std::io::BufWriter;

use super::{chart, ExportError, Metric, Report};
use crate::config;

/// Generates the PDF for a built report. Returns PDF bytes.
pub fn to_pdf_bytes(report: &Report) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) =
        PdfDocument::new("MedIntel Report", Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("PDF font error: {e}")))?;

    let mut y = Mm(280.0);

    // Title block
    layer.use_text("MedIntel Report", 14.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    layer.use_text(
        format!("Generated by {} v{}", config::APP_NAME, config::APP_VERSION),
        9.0,
        Mm(20.0),
        y,
        &font,
    );
    y -= Mm(4.5);
    let metric_label = match report.metric {
        Metric::Count => "record count",
        Metric::ValueSum => "value sum",
    };
    layer.use_text(
        format!(
            "Grouped by {} | metric: {} | {} rows in range",
            report.group_column,
            metric_label,
            report.filtered.len()
        ),
        9.0,
        Mm(20.0),
        y,
        &font,
    );
    y -= Mm(10.0);

    // Summary table
    layer.use_text("SUMMARY BY GROUP:", 11.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    if report.summary.is_empty() {
        layer.use_text("No records in the selected range.", 9.0, Mm(25.0), y, &font);
        y -= Mm(4.5);
    }
    for entry in &report.summary {
        let text = match entry.value_sum {
            Some(sum) => format!(
                "{}: {} records, value {:.2}",
                entry.group, entry.count, sum
            ),
            None => format!("{}: {} records", entry.group, entry.count),
        };
        for line in wrap_text(&text, 80) {
            layer.use_text(&line, 9.0, Mm(25.0), y, &font);
            y -= Mm(4.5);
        }
    }
    y -= Mm(8.0);

    // Timeline chart
    layer.use_text("TIMELINE:", 11.0, Mm(20.0), y, &bold);
    y -= Mm(4.0);
    match chart::render_timeline(report) {
        Ok(png_bytes) => {
            let dynamic_image = printpdf::image_crate::load_from_memory(&png_bytes)
                .map_err(|e| ExportError::Pdf(e.to_string()))?;
            let pdf_image = Image::from_dynamic_image(&dynamic_image);

            // 900x400 px at 120 DPI is about 190mm x 85mm, fits the page width.
            let transform = ImageTransform {
                translate_x: Some(Mm(20.0)),
                translate_y: Some(y - Mm(90.0)),
                dpi: Some(120.0),
                ..Default::default()
            };
            pdf_image.add_to_layer(layer.clone(), transform);
        }
        Err(e) => {
            y -= Mm(6.0);
            layer.use_text(
                format!("Chart unavailable: {e}"),
                9.0,
                Mm(25.0),
                y,
                &font,
            );
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("PDF buffer error: {e}")))
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataTable;
    use crate::report::{build_report, ReportOptions};
    use chrono::NaiveDate;

    fn options(start: (i32, u32, u32), end: (i32, u32, u32)) -> ReportOptions {
        ReportOptions {
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            group_by: "department".to_string(),
            metric: Metric::ValueSum,
        }
    }

    #[test]
    fn produces_pdf_bytes_with_chart() {
        let table = DataTable::from_csv(
            "start,end,department,value\n\
             2024-01-01 08:00:00,2024-01-01 12:00:00,Cardiology,120\n\
             2024-01-02 09:00:00,2024-01-02 17:00:00,Neurology,80\n"
                .as_bytes(),
        )
        .unwrap();
        let report = build_report(&table, &options((2024, 1, 1), (2024, 2, 1)));
        let bytes = to_pdf_bytes(&report).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn empty_range_still_produces_a_document() {
        let table = DataTable::from_csv(
            "start,end,department\n2024-06-01 08:00:00,2024-06-01 09:00:00,Cardiology\n"
                .as_bytes(),
        )
        .unwrap();
        let report = build_report(&table, &options((2024, 1, 1), (2024, 1, 2)));
        // Chart fails on an empty timeline; the note path still saves.
        let bytes = to_pdf_bytes(&report).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("one two three four five six seven", 12);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= 12));
    }
}
