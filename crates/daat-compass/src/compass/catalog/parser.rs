use std::io::Read;

use serde::Deserialize;

use super::CatalogError;
use crate::compass::domain::{AxisDefinition, Direction, Effect, Question, QuestionId};

#[derive(Debug)]
pub(crate) struct CatalogDocument {
    pub(crate) axes: Vec<AxisDefinition>,
    pub(crate) questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    axes: Vec<AxisDefinition>,
    questions: Vec<QuestionRecord>,
}

/// Either catalog generation; both collapse into the weighted-effects form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionRecord {
    Weighted {
        id: u32,
        text: String,
        effects: Vec<Effect>,
    },
    Legacy {
        id: u32,
        text: String,
        axis: String,
        direction: i8,
    },
}

impl QuestionRecord {
    fn into_question(self) -> Result<Question, CatalogError> {
        match self {
            QuestionRecord::Weighted { id, text, effects } => {
                Ok(Question::weighted(id, text, effects))
            }
            QuestionRecord::Legacy {
                id,
                text,
                axis,
                direction,
            } => {
                let direction =
                    Direction::from_sign(direction).ok_or(CatalogError::InvalidDirection {
                        question: QuestionId(id),
                        direction,
                    })?;
                Ok(Question::directed(id, text, axis, direction))
            }
        }
    }
}

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<CatalogDocument, CatalogError> {
    let raw: RawDocument = serde_json::from_reader(reader)?;
    let questions = raw
        .questions
        .into_iter()
        .map(QuestionRecord::into_question)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CatalogDocument {
        axes: raw.axes,
        questions,
    })
}

#[derive(Debug, Deserialize)]
struct EffectRow {
    id: u32,
    #[serde(default)]
    text: String,
    axis: String,
    weight: f64,
}

/// One row per effect. Rows sharing an id merge in first-seen order; follow-up rows may
/// leave the text empty.
pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Question>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut questions: Vec<Question> = Vec::new();

    for record in csv_reader.deserialize::<EffectRow>() {
        let row = record?;
        let effect = Effect::new(row.axis, row.weight);

        match questions
            .iter_mut()
            .find(|question| question.id == QuestionId(row.id))
        {
            Some(existing) => {
                if existing.text != row.text && !row.text.is_empty() {
                    return Err(CatalogError::ConflictingText(existing.id));
                }
                existing.effects.push(effect);
            }
            None => questions.push(Question::weighted(row.id, row.text, vec![effect])),
        }
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compass::domain::AxisId;

    #[test]
    fn json_accepts_both_question_generations() {
        let json = r#"{
            "axes": [
                {"id": "economic", "label": "כלכלה", "negative_pole": "שמאל", "positive_pole": "ימין"},
                {"id": "liberty", "label": "חירויות", "negative_pole": "ליברטריאני", "positive_pole": "סמכותני"}
            ],
            "questions": [
                {"id": 1, "text": "legacy", "axis": "economic", "direction": -1},
                {"id": 2, "text": "weighted", "effects": [
                    {"axis": "economic", "weight": 1.5},
                    {"axis": "liberty", "weight": -0.5}
                ]}
            ]
        }"#;

        let document = parse_json(json.as_bytes()).expect("document parses");
        assert_eq!(document.axes.len(), 2);
        assert_eq!(
            document.questions[0].effects,
            vec![Effect::new(AxisId::ECONOMIC, -1.0)]
        );
        assert_eq!(document.questions[1].effects.len(), 2);
    }

    #[test]
    fn json_rejects_non_unit_legacy_direction() {
        let json = r#"{"axes": [], "questions": [
            {"id": 5, "text": "bad", "axis": "economic", "direction": 2}
        ]}"#;
        assert!(matches!(
            parse_json(json.as_bytes()),
            Err(CatalogError::InvalidDirection { direction: 2, .. })
        ));
    }

    #[test]
    fn csv_merges_rows_by_question_id() {
        let csv = "id,text,axis,weight\n\
                   28,ארגוני זכויות אדם,liberty,1\n\
                   28,ארגוני זכויות אדם,national,0.5\n\
                   1,רווחה,economic,-1\n";

        let questions = parse_csv(csv.as_bytes()).expect("csv parses");
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, QuestionId(28));
        assert_eq!(questions[0].effects.len(), 2);
        assert_eq!(questions[1].effects[0].weight, -1.0);
    }

    #[test]
    fn csv_rejects_conflicting_text() {
        let csv = "id,text,axis,weight\n3,one,economic,1\n3,two,liberty,1\n";
        assert!(matches!(
            parse_csv(csv.as_bytes()),
            Err(CatalogError::ConflictingText(QuestionId(3)))
        ));
    }
}
