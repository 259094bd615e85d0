/*!

# Quick start

This example shows how to turn the raw export of a survey into summary
metrics and chart series, end to end. It uses Google Forms because it is free
to use, but any tool that can export its responses as a spreadsheet
(Microsoft Forms, Qualtrics, a plain shared sheet) works the same way.

**Collecting the answers** Create a form with your survey items as *Multiple
choice* questions, one row per agreement level. The names of the question
columns in the export must start with `Q` (for example `Q1 - The course was
well organized`); every other column (timestamps, emails, free-form notes) is
ignored by the tabulation. The recognized agreement codes and their scores:

| code  | score |
|-------|-------|
| `SS`  | 5     |
| `S`   | 4     |
| `CS`  | 4     |
| `N`   | 3     |
| `TS`  | 2     |
| `STS` | 1     |

Blank cells and any other answer are left out of the numeric aggregates.
Other answers still show up in the answer frequency table under their own
label.

**Getting the results** After the survey is closed, export the responses as
an Excel file (xlsx) or CSV, then run `survtab`:

```bash
survtab -i responses.xlsx --chart bar
```

The summary is written as a JSON document with the respondent and answer
counts, the overall mean, the per-question means, the answer frequencies and
the series of the requested chart. Pass `--questions` to restrict the report
to a subset of the survey items, and `--chart pie`, `--chart line` or
`--chart radar` for the other projections. The radar projection needs at
least 3 questions; with fewer, the chart is withheld with a warning and the
rest of the summary is still produced.

```bash
survtab -i responses.xlsx --questions Q1 --questions Q2 --questions Q5 --chart radar
```

**Using the library** The same pipeline is available on in-memory data:

```
use likert_scoring::builder::Builder;
use likert_scoring::{run_scoring_stats, ScaleVocabulary};
# use likert_scoring::ScoringErrors;

let mut builder = Builder::new().columns(&[
    "Timestamp".to_string(),
    "Q1".to_string(),
    "Q2".to_string(),
])?;
builder.add_row(&["2024-05-02 09:13".to_string(), "SS".to_string(), "TS".to_string()])?;
builder.add_row(&["2024-05-02 09:21".to_string(), "S".to_string(), "".to_string()])?;
let table = builder.build()?;

let vocabulary = ScaleVocabulary::agreement_five_point();
let summary = run_scoring_stats(&table, &vocabulary, &table.question_columns())?;
assert_eq!(summary.respondent_count, 2);
assert_eq!(summary.answered_count, 3);
# Ok::<(), ScoringErrors>(())
```

The table is loaded once and never mutated; every call to
`run_scoring_stats` is a pure function of the table and the selection, so a
presentation layer can simply re-run it on every selection change.

*/
