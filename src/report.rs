use log::{info, warn};

use likert_scoring::builder::Builder;
use likert_scoring::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::report::io_common::{infer_input_type, simplify_file_name};

pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Input file {path} not found"))]
    InputFileNotFound { path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No data found in {path}"))]
    EmptyInput { path: String },
    #[snafu(display("Unexpected cell content at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display(""))]
    CsvOpen { source: csv::Error },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("No question columns (prefix {prefix:?}) found in {path}"))]
    NoQuestionColumns { prefix: String, path: String },
    #[snafu(display("Unknown input type {input_type}"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Unknown chart kind {name}"))]
    UnknownChartKind { name: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Scoring failed: {source}"))]
    Scoring { source: ScoringErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

/// A raw table, as parsed by the readers.
/// This is before question detection and recoding: every cell is carried as
/// text, with the empty string for a blank cell.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The settings the summary was produced with, echoed into the output.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub input: String,
    pub chart: Option<String>,
    pub questions: Option<Vec<String>>,
}

fn read_survey_data(args: &Args) -> ReportResult<ParsedTable> {
    let path = args.input.clone();
    ensure!(
        Path::new(path.as_str()).exists(),
        InputFileNotFoundSnafu { path: path.clone() }
    );
    let input_type = match args.input_type.clone() {
        Some(x) => x,
        None => match infer_input_type(path.as_str()) {
            Some(x) => x,
            None => {
                whatever!(
                    "Cannot infer the input type of {:?}, pass it with --input-type",
                    path
                )
            }
        },
    };
    info!(
        "Attempting to read survey file {:?} (type {:?})",
        path, input_type
    );
    match input_type.as_str() {
        "xlsx" => io_xlsx::read_xlsx_table(path, &args.excel_worksheet_name),
        "csv" => io_csv::read_csv_table(path),
        x => UnknownInputTypeSnafu { input_type: x }.fail(),
    }
}

fn build_table(parsed: &ParsedTable) -> ReportResult<ResponseTable> {
    let mut builder = Builder::new()
        .columns(&parsed.headers)
        .context(ScoringSnafu)?;
    for row in parsed.rows.iter() {
        builder.add_row(row).context(ScoringSnafu)?;
    }
    builder.build().context(ScoringSnafu)
}

fn validate_chart(name: &str) -> ReportResult<ChartKind> {
    match name {
        "bar" => Ok(ChartKind::Bar),
        "pie" => Ok(ChartKind::Pie),
        "line" => Ok(ChartKind::Line),
        "radar" => Ok(ChartKind::Radar),
        x => UnknownChartKindSnafu { name: x }.fail(),
    }
}

fn question_means_to_json(means: &[QuestionMean]) -> Vec<JSValue> {
    means
        .iter()
        .map(|qm| json!({"question": qm.question, "mean": qm.mean}))
        .collect()
}

fn frequencies_to_json(freqs: &[AnswerCount]) -> Vec<JSValue> {
    freqs
        .iter()
        .map(|ac| json!({"answer": ac.answer, "count": ac.count}))
        .collect()
}

/// The series of the requested chart projection, or None when the chart is
/// withheld because its precondition does not hold.
fn chart_to_json(
    chart: ChartKind,
    summary: &ScoringSummary,
    vocabulary: &ScaleVocabulary,
) -> ReportResult<Option<JSValue>> {
    let js = match chart {
        ChartKind::Bar => Some(json!({
            "kind": "bar",
            "series": question_means_to_json(&summary.question_means),
        })),
        ChartKind::Line => Some(json!({
            "kind": "line",
            "series": question_means_to_json(&summary.question_means),
        })),
        ChartKind::Pie => Some(json!({
            "kind": "pie",
            "slices": frequencies_to_json(&summary.answer_frequencies),
        })),
        ChartKind::Radar => match radar_series(&summary.question_means) {
            Ok(series) => Some(json!({
                "kind": "radar",
                "series": question_means_to_json(&series),
                "range": [0, vocabulary.max_score()],
            })),
            Err(ScoringErrors::NotEnoughQuestionsForRadar { selected }) => {
                warn!(
                    "The radar chart needs at least 3 questions, got {}. Withholding the chart.",
                    selected
                );
                None
            }
            Err(e) => return Err(e).context(ScoringSnafu),
        },
    };
    Ok(js)
}

fn build_summary_js(
    config: &OutputConfig,
    summary: &ScoringSummary,
    chart_js: Option<JSValue>,
) -> JSValue {
    let mut doc: JSMap<String, JSValue> = JSMap::new();
    doc.insert("config".to_string(), json!(config));
    doc.insert(
        "metrics".to_string(),
        json!({
            "respondentCount": summary.respondent_count,
            "answeredCount": summary.answered_count,
            "overallMean": summary.overall_mean,
        }),
    );
    doc.insert("scoreMatrix".to_string(), json!(summary.score_matrix));
    doc.insert(
        "questionMeans".to_string(),
        JSValue::Array(question_means_to_json(&summary.question_means)),
    );
    doc.insert(
        "answerFrequencies".to_string(),
        JSValue::Array(frequencies_to_json(&summary.answer_frequencies)),
    );
    if let Some(chart) = chart_js {
        doc.insert("chart".to_string(), chart);
    }
    JSValue::Object(doc)
}

fn read_summary(path: String) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

pub fn run_report(args: &Args) -> ReportResult<()> {
    let parsed = read_survey_data(args)?;
    let table = build_table(&parsed)?;

    let question_columns = table.question_columns();
    ensure!(
        !question_columns.is_empty(),
        NoQuestionColumnsSnafu {
            prefix: QUESTION_PREFIX,
            path: args.input.clone(),
        }
    );

    let selection = match args.questions.clone() {
        Some(questions) => questions,
        None => question_columns,
    };
    let chart = validate_chart(args.chart.as_deref().unwrap_or("bar"))?;
    let vocabulary = ScaleVocabulary::agreement_five_point();

    let summary = match run_scoring_stats(&table, &vocabulary, &selection) {
        Ok(summary) => summary,
        Err(ScoringErrors::EmptySelection) => {
            // Recoverable: nothing to aggregate until at least one question
            // is selected.
            warn!("The question selection is empty, no summary produced");
            return Ok(());
        }
        Err(e) => return Err(e).context(ScoringSnafu),
    };

    info!(
        "run_report: {} respondents, {} answers, overall mean: {:?}",
        summary.respondent_count, summary.answered_count, summary.overall_mean
    );

    let config = OutputConfig {
        input: simplify_file_name(args.input.as_str()),
        chart: args.chart.clone(),
        questions: args.questions.clone(),
    };
    let chart_js = chart_to_json(chart, &summary, &vocabulary)?;
    let result_js = build_summary_js(&config, &summary, chart_js);

    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, pretty_js_stats.as_str()).context(WritingSummarySnafu { path })?
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = args.reference.clone() {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn summary_for(columns: &[&str], rows: &[&[&str]], selection: &[&str]) -> ScoringSummary {
        let mut builder = Builder::new().columns(&strings(columns)).unwrap();
        for row in rows {
            builder.add_row(&strings(row)).unwrap();
        }
        let table = builder.build().unwrap();
        run_scoring_stats(
            &table,
            &ScaleVocabulary::agreement_five_point(),
            &strings(selection),
        )
        .unwrap()
    }

    fn config() -> OutputConfig {
        OutputConfig {
            input: "responses.xlsx".to_string(),
            chart: None,
            questions: None,
        }
    }

    #[test]
    fn bar_chart_follows_selection_order() {
        let summary = summary_for(
            &["Q1", "Q2", "Q3"],
            &[&["SS", "S", "N"]],
            &["Q3", "Q1", "Q2"],
        );
        let js = chart_to_json(
            ChartKind::Bar,
            &summary,
            &ScaleVocabulary::agreement_five_point(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(js["kind"], json!("bar"));
        let series = js["series"].as_array().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0]["question"], json!("Q3"));
        assert_eq!(series[0]["mean"], json!(3.0));
    }

    #[test]
    fn radar_chart_is_withheld_below_three_questions() {
        let summary = summary_for(&["Q1", "Q2"], &[&["SS", "S"]], &["Q1", "Q2"]);
        let vocabulary = ScaleVocabulary::agreement_five_point();
        let js = chart_to_json(ChartKind::Radar, &summary, &vocabulary).unwrap();
        assert!(js.is_none());
        // The other projections stay available for the same selection.
        let bar = chart_to_json(ChartKind::Bar, &summary, &vocabulary).unwrap();
        assert!(bar.is_some());
    }

    #[test]
    fn radar_chart_closes_the_loop_with_display_range() {
        let summary = summary_for(
            &["Q1", "Q2", "Q3"],
            &[&["SS", "S", "N"], &["TS", "STS", "S"]],
            &["Q1", "Q2", "Q3"],
        );
        let js = chart_to_json(
            ChartKind::Radar,
            &summary,
            &ScaleVocabulary::agreement_five_point(),
        )
        .unwrap()
        .unwrap();
        let series = js["series"].as_array().unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series[0], series[3]);
        assert_eq!(js["range"], json!([0, 5]));
    }

    #[test]
    fn pie_chart_uses_the_frequency_table() {
        let summary = summary_for(
            &["Q1", "Q2"],
            &[&["SS", ""], &["X", "S"], &["S", ""]],
            &["Q1", "Q2"],
        );
        let js = chart_to_json(
            ChartKind::Pie,
            &summary,
            &ScaleVocabulary::agreement_five_point(),
        )
        .unwrap()
        .unwrap();
        let slices = js["slices"].as_array().unwrap();
        assert_eq!(slices[0], json!({"answer": "S", "count": 2}));
        let total: u64 = slices.iter().map(|s| s["count"].as_u64().unwrap()).sum();
        assert_eq!(total, summary.answered_count as u64);
    }

    #[test]
    fn summary_document_renders_undefined_means_as_null() {
        let summary = summary_for(&["Q1"], &[&[""]], &["Q1"]);
        let js = build_summary_js(&config(), &summary, None);
        assert_eq!(js["metrics"]["overallMean"], JSValue::Null);
        assert_eq!(js["questionMeans"][0]["mean"], JSValue::Null);
        assert_eq!(js["metrics"]["respondentCount"], json!(1));
        assert_eq!(js["metrics"]["answeredCount"], json!(0));
        assert!(js.get("chart").is_none());
    }

    #[test]
    fn summary_document_contains_the_four_views() {
        let summary = summary_for(
            &["Q1", "Q2", "Q3"],
            &[&["SS", "S", "N"]],
            &["Q1", "Q2", "Q3"],
        );
        let vocabulary = ScaleVocabulary::agreement_five_point();
        let chart = chart_to_json(ChartKind::Line, &summary, &vocabulary).unwrap();
        let js = build_summary_js(&config(), &summary, chart);
        assert_eq!(js["config"]["input"], json!("responses.xlsx"));
        assert_eq!(js["scoreMatrix"], json!([[5, 4, 3]]));
        assert_eq!(js["questionMeans"].as_array().unwrap().len(), 3);
        assert_eq!(js["answerFrequencies"].as_array().unwrap().len(), 3);
        assert_eq!(js["chart"]["kind"], json!("line"));
    }

    #[test]
    fn unknown_chart_kind_is_rejected() {
        assert!(validate_chart("bar").is_ok());
        assert!(validate_chart("radar").is_ok());
        assert!(validate_chart("scatter").is_err());
    }
}
