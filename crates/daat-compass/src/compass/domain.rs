use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound of every axis coordinate; the lower bound is its negation.
pub const AXIS_LIMIT: f64 = 10.0;

/// Identifier of a political axis. The set of axes is open: catalogs declare their own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisId(pub String);

impl AxisId {
    pub const ECONOMIC: &'static str = "economic";
    pub const NATIONAL: &'static str = "national";
    pub const SOCIAL: &'static str = "social";
    pub const CONSERVATISM: &'static str = "conservatism";
    pub const LIBERTY: &'static str = "liberty";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn economic() -> Self {
        Self::new(Self::ECONOMIC)
    }

    pub fn national() -> Self {
        Self::new(Self::NATIONAL)
    }

    pub fn conservatism() -> Self {
        Self::new(Self::CONSERVATISM)
    }

    pub fn liberty() -> Self {
        Self::new(Self::LIBERTY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AxisId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared axis with human readable pole names (negative end first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDefinition {
    pub id: AxisId,
    pub label: String,
    pub negative_pole: String,
    pub positive_pole: String,
}

impl AxisDefinition {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        negative_pole: impl Into<String>,
        positive_pole: impl Into<String>,
    ) -> Self {
        Self {
            id: AxisId::new(id),
            label: label.into(),
            negative_pole: negative_pole.into(),
            positive_pole: positive_pole.into(),
        }
    }

    /// Axes used by the built-in catalog.
    pub fn standard_set() -> Vec<AxisDefinition> {
        vec![
            AxisDefinition::new(AxisId::ECONOMIC, "כלכלה", "שמאל כלכלי", "ימין כלכלי"),
            AxisDefinition::new(AxisId::NATIONAL, "מדיני-ביטחוני", "יונה", "נץ"),
            AxisDefinition::new(AxisId::CONSERVATISM, "שמרנות", "פרוגרסיבי", "שמרן"),
            AxisDefinition::new(AxisId::LIBERTY, "חירויות אזרח", "ליברטריאני", "סמכותני"),
        ]
    }

    /// Legacy social/cultural axis, superseded by `conservatism` in the standard set.
    pub fn legacy_social() -> Self {
        AxisDefinition::new(AxisId::SOCIAL, "חברה ותרבות", "פרוגרסיבי", "שמרן")
    }
}

/// Coarse reading of a coordinate, matching the bands of the result meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leaning {
    StrongNegative,
    LeaningNegative,
    Balanced,
    LeaningPositive,
    StrongPositive,
}

impl Leaning {
    pub fn from_value(value: f64) -> Self {
        if value > 6.0 {
            Leaning::StrongPositive
        } else if value > 2.0 {
            Leaning::LeaningPositive
        } else if value < -6.0 {
            Leaning::StrongNegative
        } else if value < -2.0 {
            Leaning::LeaningNegative
        } else {
            Leaning::Balanced
        }
    }
}

/// Direction of the legacy single-axis question form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    pub fn from_sign(value: i8) -> Option<Self> {
        match value {
            1 => Some(Direction::Positive),
            -1 => Some(Direction::Negative),
            _ => None,
        }
    }
}

/// Pull of a question on one axis. Agreement moves the axis by `score * weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub axis: AxisId,
    pub weight: f64,
}

impl Effect {
    pub fn new(axis: impl Into<String>, weight: f64) -> Self {
        Self {
            axis: AxisId::new(axis),
            weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable catalog statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub effects: Vec<Effect>,
}

impl Question {
    pub fn weighted(id: u32, text: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            id: QuestionId(id),
            text: text.into(),
            effects,
        }
    }

    /// Single-axis form: one effect of weight ±1.
    pub fn directed(
        id: u32,
        text: impl Into<String>,
        axis: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self::weighted(id, text, vec![Effect::new(axis, direction.sign())])
    }

    pub fn touches(&self, axis: &AxisId) -> bool {
        self.effects.iter().any(|effect| &effect.axis == axis)
    }
}

/// Five point agreement scale shown for every statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum LikertScore {
    StronglyDisagree,
    Disagree,
    Neutral,
    Agree,
    StronglyAgree,
}

impl LikertScore {
    pub const ALL: [LikertScore; 5] = [
        LikertScore::StronglyAgree,
        LikertScore::Agree,
        LikertScore::Neutral,
        LikertScore::Disagree,
        LikertScore::StronglyDisagree,
    ];

    pub fn value(self) -> i8 {
        match self {
            LikertScore::StronglyDisagree => -2,
            LikertScore::Disagree => -1,
            LikertScore::Neutral => 0,
            LikertScore::Agree => 1,
            LikertScore::StronglyAgree => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LikertScore::StronglyDisagree => "מתנגד בהחלט",
            LikertScore::Disagree => "לא מסכים",
            LikertScore::Neutral => "ניטרלי",
            LikertScore::Agree => "מסכים",
            LikertScore::StronglyAgree => "מסכים בהחלט",
        }
    }
}

impl TryFrom<i8> for LikertScore {
    type Error = InvalidLikertScore;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(LikertScore::StronglyDisagree),
            -1 => Ok(LikertScore::Disagree),
            0 => Ok(LikertScore::Neutral),
            1 => Ok(LikertScore::Agree),
            2 => Ok(LikertScore::StronglyAgree),
            other => Err(InvalidLikertScore(other)),
        }
    }
}

impl From<LikertScore> for i8 {
    fn from(value: LikertScore) -> Self {
        value.value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("likert score must be between -2 and 2, got {0}")]
pub struct InvalidLikertScore(pub i8);

/// Submitted answer. The score is kept as a raw number so unusable input can be skipped
/// at aggregation time instead of rejecting the whole submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    #[serde(deserialize_with = "lenient_score")]
    pub score: f64,
}

impl Answer {
    pub fn new(question_id: QuestionId, score: LikertScore) -> Self {
        Self {
            question_id,
            score: f64::from(score.value()),
        }
    }

    pub fn raw(question_id: u32, score: f64) -> Self {
        Self {
            question_id: QuestionId(question_id),
            score,
        }
    }
}

/// Numeric coercion of a submitted score: numbers and numeric strings parse, `null` and
/// blank strings count as a neutral 0, anything else becomes NaN and is skipped when scored.
fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let score = match value {
        serde_json::Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(raw) if raw.trim().is_empty() => 0.0,
        serde_json::Value::String(raw) => raw.trim().parse::<f64>().unwrap_or(f64::NAN),
        serde_json::Value::Bool(flag) => f64::from(u8::from(flag)),
        serde_json::Value::Null => 0.0,
        _ => f64::NAN,
    };
    Ok(score)
}

/// Final per-axis position, every value finite and within `[-10, 10]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<AxisId, f64>", into = "BTreeMap<AxisId, f64>")]
pub struct Coordinates(BTreeMap<AxisId, f64>);

impl From<BTreeMap<AxisId, f64>> for Coordinates {
    fn from(values: BTreeMap<AxisId, f64>) -> Self {
        let mut coordinates = Coordinates::new();
        for (axis, value) in values {
            coordinates.set(axis, value);
        }
        coordinates
    }
}

impl From<Coordinates> for BTreeMap<AxisId, f64> {
    fn from(coordinates: Coordinates) -> Self {
        coordinates.0
    }
}

impl Coordinates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, substituting 0 for NaN and clamping to the axis range.
    pub fn set(&mut self, axis: AxisId, value: f64) {
        self.0.insert(axis, bounded(value));
    }

    pub fn with(mut self, axis: impl Into<String>, value: f64) -> Self {
        self.set(AxisId::new(axis), value);
        self
    }

    /// Value for an axis; axes not in play read as the center.
    pub fn get(&self, axis: &str) -> f64 {
        self.0.get(axis).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, axis: &str) -> bool {
        self.0.contains_key(axis)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AxisId, f64)> {
        self.0.iter().map(|(axis, value)| (axis, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn point(&self) -> CompassPoint {
        CompassPoint {
            x: self.get(AxisId::ECONOMIC),
            y: self.get(AxisId::NATIONAL),
            z: self.get(AxisId::CONSERVATISM),
        }
    }

    pub fn leanings(&self) -> BTreeMap<AxisId, Leaning> {
        self.0
            .iter()
            .map(|(axis, value)| (axis.clone(), Leaning::from_value(*value)))
            .collect()
    }
}

pub(crate) fn bounded(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-AXIS_LIMIT, AXIS_LIMIT)
    }
}

/// Chart projection: economic on x, national on y, conservatism on z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompassPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
