//! CSV export of the visible matrix.

use std::io::Write;
use std::path::Path;

use crate::Result;
use crate::matrix::Matrix;

/// Write the matrix as CSV.
///
/// Values are written unformatted so spreadsheets can parse them; missing
/// cells are empty fields.
pub fn write_csv<W: Write>(matrix: &Matrix, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(matrix.columns.len() + 2);
    header.push(matrix.corner_label.clone());
    header.extend(matrix.columns.iter().cloned());
    header.push("Total".to_string());
    wtr.write_record(&header)?;

    for row in &matrix.rows {
        let mut record = Vec::with_capacity(row.cells.len() + 2);
        record.push(row.label.clone());
        record.extend(
            row.cells
                .iter()
                .map(|c| c.value.map(|v| v.to_string()).unwrap_or_default()),
        );
        record.push(row.total.to_string());
        wtr.write_record(&record)?;
    }

    if !matrix.rows.is_empty() {
        let mut totals = Vec::with_capacity(matrix.column_totals.len() + 2);
        totals.push("Total".to_string());
        totals.extend(matrix.column_totals.iter().map(|t| t.to_string()));
        totals.push(matrix.grand_total.to_string());
        wtr.write_record(&totals)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(matrix: &Matrix) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(matrix, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn export_to_path(matrix: &Matrix, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(matrix, std::io::BufWriter::new(file))?;
    tracing::info!("Exported {} rows to {}", matrix.num_rows(), path.display());
    Ok(())
}
