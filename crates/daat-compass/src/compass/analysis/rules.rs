use async_trait::async_trait;

use super::{AnalysisError, AnalysisProvider, AnalysisResult};
use crate::compass::domain::{AxisId, Coordinates, Leaning};

/// Economic coordinate beyond which the commentary switches to the pronounced variant.
const STRONG_ECONOMICS: f64 = 5.0;

/// Deterministic Hebrew rule table keyed on the quadrant of economic, national and
/// conservatism coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    pub fn interpret(&self, coordinates: &Coordinates) -> AnalysisResult {
        let point = coordinates.point();
        let right = point.x >= 0.0;
        let hawk = point.y >= 0.0;
        let conservative = point.z >= 0.0;

        let economic_analysis = economic_commentary(point.x);
        let (title, description, national_analysis, religious_analysis) =
            match (right, hawk) {
                (true, true) => (
                    pick(conservative, "ימין לאומי-שמרני", "ימין לאומי-ליברלי"),
                    "אתה מאמין בשילוב של עוצמה צבאית, ריבונות יהודית וחופש כלכלי.",
                    "גישה ביטחונית תקיפה, תמיכה בהתיישבות וראיית הכוח כמרכיב הכרחי להרתעה.",
                    pick(
                        conservative,
                        "שמירה על זהותה היהודית של המדינה וכיבוד ערכי המסורת במרחב הציבורי.",
                        "תמיכה במדינה יהודית לצד חופש דת וצמצום כפייה.",
                    ),
                ),
                (true, false) => (
                    pick(conservative, "ימין פרגמטי-שמרני", "ליברטריאניזם / ימין ליברלי"),
                    "החופש האישי והכלכלי עומדים בראש סדר העדיפויות שלך.",
                    "נכונות לפשרות טריטוריאליות או פרגמטיזם מדיני כל עוד נשמר החופש הכלכלי.",
                    pick(
                        conservative,
                        "שמרנות חברתית ומסורתיות.",
                        "ליברליזם חברתי מלא, הפרדת דת ומדינה וחופש הפרט.",
                    ),
                ),
                (false, true) => (
                    pick(conservative, "שמאל ביטחוני-שמרני", "שמאל ביטחוני-ליברלי"),
                    "שילוב ייחודי של עמדות חברתיות-כלכליות משמאל עם תפיסת עולם ביטחונית ניצית.",
                    "למרות עמדותיך החברתיות, אתה מחזיק בגישה חשדנית כלפי הסדרים מדיניים ותומך ביד קשה מול הטרור.",
                    pick(
                        conservative,
                        "חיבור למסורת וערכים קהילתיים שמרניים.",
                        "קידום ערכים ליברליים וזכויות מיעוטים.",
                    ),
                ),
                (false, false) => (
                    pick(conservative, "שמאל חברתי-מסורתי", "שמאל ליברלי / סוציאל-דמוקרטיה"),
                    "חתירה לשוויון חברתי, צדק חלוקתי ופשרה מדינית מול השכנים.",
                    "אמונה בפתרון שתי המדינות, דיפלומטיה וראיית הכיבוש כנטל מוסרי וביטחוני.",
                    pick(
                        conservative,
                        "זהות יהודית תרבותית ומסורתית לצד ערכי שוויון.",
                        "חילוניות מובהקת, שוויון מגדרי מלא והפרדת דת ומדינה.",
                    ),
                ),
            };

        AnalysisResult {
            title: title.to_string(),
            description: description.to_string(),
            ideology: conservatism_label(point.z).to_string(),
            economic_analysis: economic_analysis.to_string(),
            national_analysis: national_analysis.to_string(),
            religious_analysis: religious_analysis.to_string(),
            social_analysis: Some(social_commentary(coordinates)),
        }
    }
}

#[async_trait]
impl AnalysisProvider for RuleBasedAnalyzer {
    async fn analyze(&self, coordinates: &Coordinates) -> Result<AnalysisResult, AnalysisError> {
        Ok(self.interpret(coordinates))
    }
}

/// Label shown on the conservatism meter for a coordinate.
pub fn conservatism_label(value: f64) -> &'static str {
    match Leaning::from_value(value) {
        Leaning::StrongPositive => "שמרן",
        Leaning::LeaningPositive => "נוטה לשמרנות",
        Leaning::Balanced => "מאוזן",
        Leaning::LeaningNegative => "נוטה לפרוגרסיביות",
        Leaning::StrongNegative => "פרוגרסיבי",
    }
}

fn pick(condition: bool, when_true: &'static str, when_false: &'static str) -> &'static str {
    if condition {
        when_true
    } else {
        when_false
    }
}

fn economic_commentary(x: f64) -> &'static str {
    if x >= 0.0 {
        if x > STRONG_ECONOMICS {
            "אתה דוגל בקפיטליזם מובהק, שוק חופשי ללא התערבות, הפרטה וצמצום מיסים."
        } else {
            "אתה נוטה לכלכלת שוק חופשי עם הבנה לצורך ברשת ביטחון בסיסית."
        }
    } else if x < -STRONG_ECONOMICS {
        "אתה דוגל בסוציאליזם מובהק, מדינת רווחה רחבה, צמצום פערים אגרסיבי והלאמה."
    } else {
        "אתה תומך במודל סוציאל-דמוקרטי המשלב שוק חופשי עם פיקוח ממשלתי הדוק."
    }
}

/// Conservatism meter reading, plus civil liberty commentary when that axis was scored.
fn social_commentary(coordinates: &Coordinates) -> String {
    let z = coordinates.get(AxisId::CONSERVATISM);
    let mut commentary = format!("מדד השמרנות שלך: {} ({z:.1}).", conservatism_label(z));

    if coordinates.contains(AxisId::LIBERTY) {
        let liberty = coordinates.get(AxisId::LIBERTY);
        let reading = match Leaning::from_value(liberty) {
            Leaning::StrongPositive | Leaning::LeaningPositive => {
                "נטייה סמכותנית: העדפה לחיזוק סמכויות המדינה וגופי הביטחון על פני חירויות הפרט."
            }
            Leaning::StrongNegative | Leaning::LeaningNegative => {
                "נטייה ליברטריאנית: הגנה על חירויות האזרח, חופש הביטוי וזכויות הפרט מול השלטון."
            }
            Leaning::Balanced => "איזון בין שמירה על חירויות הפרט לבין צורכי הביטחון והסדר הציבורי.",
        };
        commentary.push(' ');
        commentary.push_str(reading);
    }

    commentary
}
