// Primitives for reading Excel (xlsx) files.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use crate::report::{
    EmptyInputSnafu, ExcelWrongCellTypeSnafu, OpeningExcelSnafu, ParsedTable, ReportResult,
};

pub fn read_xlsx_table(path: String, worksheet_name: &Option<String>) -> ReportResult<ParsedTable> {
    let wrange = get_range(&path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyInputSnafu { path: path.clone() })?;
    debug!("read_xlsx_table: header: {:?}", header);
    let mut headers: Vec<String> = Vec::new();
    for elt in header {
        headers.push(read_cell(1, elt)?);
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        debug!("read_xlsx_table: idx: {:?} row: {:?}", idx, row);
        // Line numbering starts at 1 and the first line is the header.
        let lineno = (idx + 2) as u64;
        let mut cells: Vec<String> = Vec::new();
        for elt in row.iter().take(headers.len()) {
            cells.push(read_cell(lineno, elt)?);
        }
        // Rows narrower than the header are padded with blanks.
        while cells.len() < headers.len() {
            cells.push("".to_string());
        }
        rows.push(cells);
    }
    Ok(ParsedTable { headers, rows })
}

fn read_cell(lineno: u64, cell: &DataType) -> ReportResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        // Numeric and boolean cells are carried as their display text: they
        // count in the answer frequencies and recode to missing.
        DataType::Float(f) => Ok(format!("{}", f)),
        DataType::Int(i) => Ok(format!("{}", i)),
        DataType::Bool(b) => Ok(format!("{}", b)),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(
    path: &String,
    worksheet_name_o: &Option<String>,
) -> ReportResult<calamine::Range<DataType>> {
    debug!(
        "read_xlsx_table: path: {:?} worksheet: {:?}",
        path, worksheet_name_o
    );
    let p = path.clone();
    let mut workbook: Xlsx<_> =
        open_workbook(p).context(OpeningExcelSnafu { path: path.clone() })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(EmptyInputSnafu { path: path.clone() })?
            .context(OpeningExcelSnafu { path: path.clone() })?;

        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyInputSnafu { path: path.clone() }.fail(),
            [(worksheet_name, wrange)] => {
                debug!(
                    "read_xlsx_table: path: {:?} worksheet: {:?}",
                    path, worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => {
                whatever!(
                    "read_xlsx_table: too many worksheets in {:?}, the worksheet name must be provided",
                    path
                )
            }
        }
    }
}
