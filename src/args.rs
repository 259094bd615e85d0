use clap::Parser;

/// This is a tabulation program for Likert-scale survey spreadsheets.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The spreadsheet containing the survey responses. The first row is the
    /// header; the survey questions are the columns whose name starts with 'Q'.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (default inferred from the file extension) The type of the input: 'xlsx' or 'csv'.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (list of question columns or not specified) If specified, restricts the report to the
    /// given question columns, in the given order. Repeat the flag for each question.
    /// Defaults to every question column of the input.
    #[clap(short, long, value_parser)]
    pub questions: Option<Vec<String>>,

    /// (default bar) The chart projection to emit with the summary: 'bar', 'pie', 'line'
    /// or 'radar'.
    #[clap(long, value_parser)]
    pub chart: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the report will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a report summary in JSON format. If provided,
    /// survtab will check that the produced summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default the only worksheet) When using an Excel file, indicates the name of the
    /// worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
