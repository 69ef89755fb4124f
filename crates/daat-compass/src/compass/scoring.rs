//! Aggregation of Likert answers into bounded per-axis coordinates.
//!
//! Each axis is normalized by the catalog's theoretical maximum (`2 * sum(|weight|)` over
//! every effect touching it), never by the number of answers received. A skipped or
//! unanswered statement therefore pulls its axes toward the center instead of
//! inflating the remaining answers.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::QuestionCatalog;
use super::domain::{Answer, AxisId, Coordinates, QuestionId, AXIS_LIMIT};

/// Largest magnitude of a Likert answer.
pub const MAX_SCORE: f64 = 2.0;

/// Divisor used for axes that no statement touches. Any non-zero value works since
/// their raw sum is always zero.
const EMPTY_AXIS_NORMALIZER: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Coordinate reported for declared axes without any statement.
    pub empty_axis_default: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            empty_axis_default: 0.0,
        }
    }
}

/// Why an answer contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnknownQuestion,
    NonNumericScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedAnswer {
    pub question_id: QuestionId,
    pub reason: SkipReason,
}

/// Audit trail of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub coordinates: Coordinates,
    pub raw_sums: BTreeMap<AxisId, f64>,
    pub normalizers: BTreeMap<AxisId, f64>,
    pub skipped: Vec<SkippedAnswer>,
}

/// Stateless engine; the catalog and answers are passed on every call.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// `2 * sum(|weight|)` per axis, with a safe divisor for axes nothing touches.
    pub fn normalizers(&self, catalog: &QuestionCatalog) -> BTreeMap<AxisId, f64> {
        weight_totals(catalog)
            .into_iter()
            .map(|(axis, total)| {
                let normalizer = if total > 0.0 {
                    MAX_SCORE * total
                } else {
                    EMPTY_AXIS_NORMALIZER
                };
                (axis, normalizer)
            })
            .collect()
    }

    pub fn compute(&self, answers: &[Answer], catalog: &QuestionCatalog) -> Coordinates {
        self.score_sheet(answers, catalog).coordinates
    }

    pub fn score_sheet(&self, answers: &[Answer], catalog: &QuestionCatalog) -> ScoreSheet {
        let totals = weight_totals(catalog);
        let (resolved, skipped) = resolve_answers(answers, catalog);

        let mut raw_sums: BTreeMap<AxisId, f64> =
            totals.keys().map(|axis| (axis.clone(), 0.0)).collect();

        // Accumulate in catalog order so the floating point sum does not depend on the
        // order answers were collected in.
        for question in catalog.questions() {
            let Some(score) = resolved.get(&question.id) else {
                continue;
            };
            for effect in &question.effects {
                *raw_sums.entry(effect.axis.clone()).or_insert(0.0) += score * effect.weight;
            }
        }

        let normalizers = self.normalizers(catalog);
        let mut coordinates = Coordinates::new();
        for (axis, total) in &totals {
            let value = if *total > 0.0 {
                let raw = raw_sums.get(axis).copied().unwrap_or(0.0);
                let normalizer = normalizers
                    .get(axis)
                    .copied()
                    .unwrap_or(EMPTY_AXIS_NORMALIZER);
                raw / normalizer * AXIS_LIMIT
            } else {
                self.config.empty_axis_default
            };
            coordinates.set(axis.clone(), value);
        }

        ScoreSheet {
            coordinates,
            raw_sums,
            normalizers,
            skipped,
        }
    }
}

/// Score a completed answer set with the default configuration.
pub fn compute_coordinates(answers: &[Answer], catalog: &QuestionCatalog) -> Coordinates {
    ScoringEngine::default().compute(answers, catalog)
}

/// `sum(|weight|)` per axis, covering every declared axis even when nothing touches it.
fn weight_totals(catalog: &QuestionCatalog) -> BTreeMap<AxisId, f64> {
    let mut totals: BTreeMap<AxisId, f64> = catalog
        .axes()
        .iter()
        .map(|axis| (axis.id.clone(), 0.0))
        .collect();

    for question in catalog.questions() {
        for effect in &question.effects {
            *totals.entry(effect.axis.clone()).or_insert(0.0) += effect.weight.abs();
        }
    }

    totals
}

/// Map usable answers to their question, dropping unknown ids and non-numeric scores.
fn resolve_answers(
    answers: &[Answer],
    catalog: &QuestionCatalog,
) -> (HashMap<QuestionId, f64>, Vec<SkippedAnswer>) {
    let mut resolved: HashMap<QuestionId, f64> = HashMap::with_capacity(answers.len());
    let mut skipped = Vec::new();

    for answer in answers {
        if catalog.question(answer.question_id).is_none() {
            debug!(question_id = %answer.question_id, "skipping answer for unknown question");
            skipped.push(SkippedAnswer {
                question_id: answer.question_id,
                reason: SkipReason::UnknownQuestion,
            });
            continue;
        }

        if !answer.score.is_finite() {
            debug!(question_id = %answer.question_id, "skipping non-numeric answer score");
            skipped.push(SkippedAnswer {
                question_id: answer.question_id,
                reason: SkipReason::NonNumericScore,
            });
            continue;
        }

        *resolved.entry(answer.question_id).or_insert(0.0) += answer.score;
    }

    (resolved, skipped)
}
