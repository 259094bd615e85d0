mod config;
pub mod builder;
pub mod quick_start;

use log::{debug, info};

use std::collections::HashMap;

pub use crate::config::*;

// **** Private structures ****

// A selected question resolved to its column position in the table.
type SelectedColumn = (String, usize);

/// Runs the scoring pipeline for the given selection of questions.
///
/// Arguments:
/// * `table` the loaded response table
/// * `vocabulary` the scale used to recode the raw answers
/// * `selection` the question columns to aggregate, in presentation order
///
/// All the precondition checks run before any aggregate is computed: a
/// failed check returns an error and no partial summary is ever produced.
pub fn run_scoring_stats(
    table: &ResponseTable,
    vocabulary: &ScaleVocabulary,
    selection: &[String],
) -> Result<ScoringSummary, ScoringErrors> {
    info!(
        "run_scoring_stats: processing {:?} respondents, selection: {:?}",
        table.num_respondents(),
        selection
    );

    let selected = check_selection(table, selection)?;

    let score_matrix = recode_matrix(table, vocabulary, &selected);

    // An answer outside the vocabulary recodes to missing but still counts
    // as answered.
    let mut answered_count: usize = 0;
    for row in table.rows().iter() {
        for (_, idx) in selected.iter() {
            if row[*idx].is_some() {
                answered_count += 1;
            }
        }
    }

    let all_scores: Vec<Option<u32>> = score_matrix.iter().flatten().cloned().collect();
    let overall_mean = mean_of(&all_scores).map(round2);

    let mut question_means: Vec<QuestionMean> = Vec::new();
    for (pos, (name, _)) in selected.iter().enumerate() {
        let column: Vec<Option<u32>> = score_matrix.iter().map(|row| row[pos]).collect();
        question_means.push(QuestionMean {
            question: name.clone(),
            mean: mean_of(&column),
        });
    }

    let answer_frequencies = count_answers(table, &selected);

    debug!(
        "run_scoring_stats: answered: {:?} overall mean: {:?}",
        answered_count, overall_mean
    );

    Ok(ScoringSummary {
        respondent_count: table.num_respondents(),
        answered_count,
        overall_mean,
        score_matrix,
        question_means,
        answer_frequencies,
    })
}

/// The closed polygon for the radar projection.
///
/// Appends the first (question, mean) pair again at the end so that a polar
/// plot can close the loop. The means are passed through as computed, with
/// no clamping to the display range of the scale.
pub fn radar_series(question_means: &[QuestionMean]) -> Result<Vec<QuestionMean>, ScoringErrors> {
    if question_means.len() < 3 {
        return Err(ScoringErrors::NotEnoughQuestionsForRadar {
            selected: question_means.len(),
        });
    }
    let mut series = question_means.to_vec();
    series.push(question_means[0].clone());
    Ok(series)
}

// Selected questions are returned in selection order.
fn check_selection(
    table: &ResponseTable,
    selection: &[String],
) -> Result<Vec<SelectedColumn>, ScoringErrors> {
    if table.question_columns().is_empty() {
        return Err(ScoringErrors::NoQuestionColumns);
    }
    if selection.is_empty() {
        return Err(ScoringErrors::EmptySelection);
    }
    let mut selected: Vec<SelectedColumn> = Vec::new();
    for name in selection.iter() {
        let idx = match table.column_index(name) {
            Some(idx) if name.starts_with(QUESTION_PREFIX) => idx,
            _ => {
                return Err(ScoringErrors::UnknownQuestion {
                    question: name.clone(),
                });
            }
        };
        selected.push((name.clone(), idx));
    }
    debug!("check_selection: selected: {:?}", selected);
    Ok(selected)
}

fn recode_matrix(
    table: &ResponseTable,
    vocabulary: &ScaleVocabulary,
    selected: &[SelectedColumn],
) -> Vec<Vec<Option<u32>>> {
    table
        .rows()
        .iter()
        .map(|row| {
            selected
                .iter()
                .map(|(_, idx)| row[*idx].as_deref().and_then(|code| vocabulary.score(code)))
                .collect()
        })
        .collect()
}

// The mean over the non-missing scores, or None when there is none at all.
fn mean_of(scores: &[Option<u32>]) -> Option<f64> {
    let present: Vec<u32> = scores.iter().flatten().cloned().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().map(|s| *s as f64).sum::<f64>() / present.len() as f64)
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn count_answers(table: &ResponseTable, selected: &[SelectedColumn]) -> Vec<AnswerCount> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    for row in table.rows().iter() {
        for (_, idx) in selected.iter() {
            if let Some(answer) = &row[*idx] {
                let e = counts.entry(answer.clone()).or_insert(0);
                if *e == 0 {
                    first_seen.push(answer.clone());
                }
                *e += 1;
            }
        }
    }
    let mut res: Vec<AnswerCount> = first_seen
        .iter()
        .map(|answer| AnswerCount {
            answer: answer.clone(),
            count: counts[answer],
        })
        .collect();
    // The sort is stable, so equal counts stay in first-seen order.
    res.sort_by_key(|ac| std::cmp::Reverse(ac.count));
    res
}
