//! Static question catalog: loaded once, validated, read-only afterwards.

mod parser;
mod standard;

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::domain::{AxisDefinition, AxisId, Question, QuestionId};

/// Validated set of declared axes and statements, indexed by question id.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionCatalog {
    axes: Vec<AxisDefinition>,
    questions: Vec<Question>,
    #[serde(skip)]
    index: HashMap<QuestionId, usize>,
}

impl QuestionCatalog {
    /// Build a catalog, rejecting the first integrity violation found.
    pub fn new(axes: Vec<AxisDefinition>, questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut declared = HashSet::new();
        for axis in &axes {
            if !declared.insert(axis.id.clone()) {
                return Err(CatalogError::DuplicateAxis(axis.id.clone()));
            }
        }

        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if index.insert(question.id, position).is_some() {
                return Err(CatalogError::DuplicateQuestion(question.id));
            }
            if question.effects.is_empty() {
                return Err(CatalogError::EmptyEffects(question.id));
            }
            let mut touched = HashSet::with_capacity(question.effects.len());
            for effect in &question.effects {
                if !touched.insert(&effect.axis) {
                    return Err(CatalogError::DuplicateEffectAxis {
                        question: question.id,
                        axis: effect.axis.clone(),
                    });
                }
                if !declared.contains(&effect.axis) {
                    return Err(CatalogError::UndeclaredAxis {
                        question: question.id,
                        axis: effect.axis.clone(),
                    });
                }
                if !effect.weight.is_finite() {
                    return Err(CatalogError::NonFiniteWeight {
                        question: question.id,
                        axis: effect.axis.clone(),
                    });
                }
            }
        }

        Ok(Self {
            axes,
            questions,
            index,
        })
    }

    /// Built-in Hebrew catalog over the standard axis set. Integrity of the table is
    /// asserted by the catalog tests.
    pub fn standard() -> Self {
        let questions = standard::standard_questions();
        let index = questions
            .iter()
            .enumerate()
            .map(|(position, question)| (question.id, position))
            .collect();
        Self {
            axes: AxisDefinition::standard_set(),
            questions,
            index,
        }
    }

    /// Load a JSON (`.json`) or CSV (`.csv`) catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let reader = || File::open(path).map(BufReader::new);
        match extension.as_deref() {
            Some("json") => Self::from_json_reader(reader()?),
            Some("csv") => Self::from_csv_reader(reader()?, AxisDefinition::standard_set()),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document = parser::parse_json(reader)?;
        Self::new(document.axes, document.questions)
    }

    /// CSV rows carry one effect each; the axes must come from `axes`.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        axes: Vec<AxisDefinition>,
    ) -> Result<Self, CatalogError> {
        let questions = parser::parse_csv(reader)?;
        Self::new(axes, questions)
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.index.get(&id).map(|position| &self.questions[*position])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn axes(&self) -> &[AxisDefinition] {
        &self.axes
    }

    pub fn axis(&self, id: &AxisId) -> Option<&AxisDefinition> {
        self.axes.iter().find(|axis| &axis.id == id)
    }

    /// Questions with at least one effect on `axis`.
    pub fn questions_for_axis<'a>(&'a self, axis: &'a AxisId) -> impl Iterator<Item = &'a Question> {
        self.questions.iter().filter(move |question| question.touches(axis))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Integrity and loading failures for catalogs.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("axis {0} is declared more than once")]
    DuplicateAxis(AxisId),
    #[error("question {0} appears more than once")]
    DuplicateQuestion(QuestionId),
    #[error("question {0} has no effects")]
    EmptyEffects(QuestionId),
    #[error("question {question} references undeclared axis {axis}")]
    UndeclaredAxis { question: QuestionId, axis: AxisId },
    #[error("question {question} carries more than one effect on axis {axis}")]
    DuplicateEffectAxis { question: QuestionId, axis: AxisId },
    #[error("question {question} has a non-finite weight on axis {axis}")]
    NonFiniteWeight { question: QuestionId, axis: AxisId },
    #[error("question {question} has a legacy direction of {direction}; expected 1 or -1")]
    InvalidDirection { question: QuestionId, direction: i8 },
    #[error("question {0} has conflicting text across rows")]
    ConflictingText(QuestionId),
    #[error("unsupported catalog format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
