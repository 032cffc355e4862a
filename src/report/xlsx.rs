//! Spreadsheet serializer.

use rust_xlsxwriter::{Format, Workbook};
use serde_json::Value;

use super::ExportError;
use crate::dataset::DataTable;

/// Serializes the table as a single-sheet workbook named "report":
/// bold header row, numbers written as numbers, everything else as text.
pub fn to_xlsx_bytes(table: &DataTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("report")
        .map_err(|e| ExportError::Xlsx(e.to_string()))?;

    let bold = Format::new().set_bold();
    for (col, name) in table.columns().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name, &bold)
            .map_err(|e| ExportError::Xlsx(e.to_string()))?;
    }

    for i in 0..table.len() {
        let row = table.row(i).unwrap_or(&[]);
        for (col, cell) in row.iter().enumerate() {
            let (r, c) = (i as u32 + 1, col as u16);
            match cell {
                Value::Number(n) => {
                    worksheet
                        .write_number(r, c, n.as_f64().unwrap_or(0.0))
                        .map_err(|e| ExportError::Xlsx(e.to_string()))?;
                }
                Value::Null => {}
                Value::String(s) => {
                    worksheet
                        .write_string(r, c, s)
                        .map_err(|e| ExportError::Xlsx(e.to_string()))?;
                }
                other => {
                    worksheet
                        .write_string(r, c, other.to_string())
                        .map_err(|e| ExportError::Xlsx(e.to_string()))?;
                }
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ExportError::Xlsx(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_a_zip_container() {
        let table =
            DataTable::from_csv("department,cost\nCardiology,100\n".as_bytes()).unwrap();
        let bytes = to_xlsx_bytes(&table).unwrap();
        // XLSX is a ZIP archive: PK magic.
        assert_eq!(&bytes[0..2], b"PK");
        assert!(bytes.len() > 100);
    }

    #[test]
    fn empty_table_still_serializes() {
        let table = DataTable::from_csv("a,b\n".as_bytes()).unwrap();
        let bytes = to_xlsx_bytes(&table).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }
}
