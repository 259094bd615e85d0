// Primitives for reading CSV files.

use log::debug;
use snafu::prelude::*;

use crate::report::{CsvLineParseSnafu, CsvOpenSnafu, EmptyInputSnafu, ParsedTable, ReportResult};

pub fn read_csv_table(path: String) -> ReportResult<ParsedTable> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path.as_str())
        .context(CsvOpenSnafu {})?;
    let mut records = rdr.into_records();

    let header = records
        .next()
        .context(EmptyInputSnafu { path: path.clone() })?
        .context(CsvLineParseSnafu { lineno: 1usize })?;
    let headers: Vec<String> = header.iter().map(|s| s.to_string()).collect();
    debug!("read_csv_table: header: {:?}", headers);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, line);
        let mut cells: Vec<String> = line
            .iter()
            .take(headers.len())
            .map(|s| s.to_string())
            .collect();
        // Rows narrower than the header are padded with blanks.
        while cells.len() < headers.len() {
            cells.push("".to_string());
        }
        rows.push(cells);
    }
    Ok(ParsedTable { headers, rows })
}
