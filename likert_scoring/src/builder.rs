pub use crate::config::*;

/// A builder for assembling a response table.
///
/// The column header comes first, then the rows, one respondent at a time.
///
/// ```
/// pub use likert_scoring::builder::Builder;
/// # use likert_scoring::ScoringErrors;
///
/// let mut builder = Builder::new()
///     .columns(&["Timestamp".to_string(), "Q1".to_string(), "Q2".to_string()])?;
///
/// builder.add_row(&["2024-05-02".to_string(), "SS".to_string(), "".to_string()])?;
///
/// let table = builder.build()?;
/// assert_eq!(table.num_respondents(), 1);
///
/// # Ok::<(), ScoringErrors>(())
/// ```
pub struct Builder {
    pub(crate) _columns: Vec<String>,
    pub(crate) _rows: Vec<Vec<Option<String>>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _columns: Vec::new(),
            _rows: Vec::new(),
        }
    }

    /// Sets the column header. Any row added earlier is discarded.
    pub fn columns(self, columns: &[String]) -> Result<Builder, ScoringErrors> {
        Ok(Builder {
            _columns: columns.to_vec(),
            _rows: Vec::new(),
        })
    }

    /// Adds one respondent row.
    ///
    /// The row must have one cell per column. An empty string is recorded as
    /// a blank answer.
    pub fn add_row(&mut self, cells: &[String]) -> Result<(), ScoringErrors> {
        if cells.len() != self._columns.len() {
            return Err(ScoringErrors::MismatchedRowWidth {
                expected: self._columns.len(),
                actual: cells.len(),
            });
        }
        let row: Vec<Option<String>> = cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    None
                } else {
                    Some(c.clone())
                }
            })
            .collect();
        self._rows.push(row);
        Ok(())
    }

    pub fn build(self) -> Result<ResponseTable, ScoringErrors> {
        ResponseTable::new(self._columns, self._rows)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
