// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The reserved prefix marking a column as a survey question.
pub const QUESTION_PREFIX: &str = "Q";

/// A loaded table of survey responses: respondent rows over named columns.
///
/// The table is built once per session (see the builder API) and never
/// mutated afterwards. Every scoring pass is a pure function of the table
/// and the current question selection.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseTable {
    columns: Vec<String>,
    // Invariant: every row has exactly one cell per column.
    rows: Vec<Vec<Option<String>>>,
}

impl ResponseTable {
    /// Builds a table from a header and raw rows. A cell holds `None` for a
    /// blank answer. Every row must have one cell per column.
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Result<ResponseTable, ScoringErrors> {
        for row in rows.iter() {
            if row.len() != columns.len() {
                return Err(ScoringErrors::MismatchedRowWidth {
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(ResponseTable { columns, rows })
    }

    /// The number of respondent rows.
    pub fn num_respondents(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The question columns: the columns whose name starts with
    /// [QUESTION_PREFIX], in table order.
    pub fn question_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.starts_with(QUESTION_PREFIX))
            .cloned()
            .collect()
    }

    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub(crate) fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }
}

/// The mapping from categorical answer codes to ordinal scores.
///
/// The mapping is total only over its known codes. Any other raw value
/// recodes to a missing score and is excluded from the numeric aggregates,
/// but it still appears in the answer frequency table under its own label.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScaleVocabulary {
    entries: Vec<(String, u32)>,
}

impl ScaleVocabulary {
    /// The five-point agreement scale used by the survey forms this tool
    /// consumes. S and CS are both the plain-agreement level.
    pub fn agreement_five_point() -> ScaleVocabulary {
        ScaleVocabulary {
            entries: vec![
                ("SS".to_string(), 5),
                ("S".to_string(), 4),
                ("CS".to_string(), 4),
                ("N".to_string(), 3),
                ("TS".to_string(), 2),
                ("STS".to_string(), 1),
            ],
        }
    }

    /// The score for a raw answer code, if the code is part of the scale.
    pub fn score(&self, code: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, s)| *s)
    }

    /// The highest score of the scale. Charts use `[0, max_score]` as their
    /// nominal display range.
    pub fn max_score(&self) -> u32 {
        self.entries.iter().map(|(_, s)| *s).max().unwrap_or(0)
    }
}

/// The chart projections a presentation layer can request.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Radar,
}

// ******** Output data structures *********

/// The mean score of one question.
#[derive(PartialEq, Debug, Clone)]
pub struct QuestionMean {
    pub question: String,
    /// None when the question has no scored answer at all.
    pub mean: Option<f64>,
}

/// How many times one distinct raw answer appears across the selection.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnswerCount {
    pub answer: String,
    pub count: u64,
}

/// The derived views of one scoring pass.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoringSummary {
    pub respondent_count: usize,
    /// Non-blank raw answers across the selection. An answer outside the
    /// vocabulary still counts as answered.
    pub answered_count: usize,
    /// Mean over every non-missing recoded score, rounded to 2 decimal
    /// places. None when the selection has no scored answer.
    pub overall_mean: Option<f64>,
    /// Rows x selected questions. None marks a blank or unrecognized answer.
    pub score_matrix: Vec<Vec<Option<u32>>>,
    /// One entry per selected question, in selection order.
    pub question_means: Vec<QuestionMean>,
    /// Distinct raw answers across the selection, descending by count.
    /// Ties keep their first-seen order.
    pub answer_frequencies: Vec<AnswerCount>,
}

/// Errors that prevent a scoring pass from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    NoQuestionColumns,
    EmptySelection,
    UnknownQuestion { question: String },
    NotEnoughQuestionsForRadar { selected: usize },
    MismatchedRowWidth { expected: usize, actual: usize },
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::NoQuestionColumns => {
                write!(
                    f,
                    "no question columns (prefix {:?}) found in the table",
                    QUESTION_PREFIX
                )
            }
            ScoringErrors::EmptySelection => write!(f, "the question selection is empty"),
            ScoringErrors::UnknownQuestion { question } => {
                write!(f, "{:?} is not a question column of the table", question)
            }
            ScoringErrors::NotEnoughQuestionsForRadar { selected } => {
                write!(
                    f,
                    "the radar projection needs at least 3 selected questions, got {}",
                    selected
                )
            }
            ScoringErrors::MismatchedRowWidth { expected, actual } => {
                write!(f, "expected {} cells in the row, got {}", expected, actual)
            }
        }
    }
}
