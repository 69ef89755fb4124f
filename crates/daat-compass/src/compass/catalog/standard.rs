//! Built-in Hebrew statement table.
//!
//! Signs follow the axis orientation: positive weight means agreement pushes toward
//! the right, hawk, conservative or authoritarian pole.

use crate::compass::domain::{AxisId, Direction, Effect, Question};

pub(super) fn standard_questions() -> Vec<Question> {
    let mut questions = economic_questions();
    questions.extend(identity_and_security_questions());
    questions
}

fn economic_questions() -> Vec<Question> {
    vec![
        Question::directed(
            1,
            "הממשלה צריכה להגדיל את תקציבי הרווחה והחינוך, גם אם זה דורש העלאת מיסים.",
            AxisId::ECONOMIC,
            Direction::Negative,
        ),
        Question::directed(
            2,
            "הכלכלה הישראלית סובלת מעודף רגולציה ובירוקרטיה שחונקת את המגזר העסקי.",
            AxisId::ECONOMIC,
            Direction::Positive,
        ),
        Question::directed(
            3,
            "ועדי העובדים הגדולים (כמו בנמלים או בחברת החשמל) מחזיקים בכוח מופרז שפוגע בציבור.",
            AxisId::ECONOMIC,
            Direction::Positive,
        ),
        Question::directed(
            4,
            "המדינה צריכה לסבסד דיור לזוגות צעירים ולפקח על מחירי השכירות.",
            AxisId::ECONOMIC,
            Direction::Negative,
        ),
        Question::directed(
            5,
            "יש לאפשר תחרות חופשית מלאה בייבוא מוצרי מזון וחקלאות, גם אם זה יפגע בחקלאים ישראלים.",
            AxisId::ECONOMIC,
            Direction::Positive,
        ),
        Question::directed(
            6,
            "מערכת הבריאות הציבורית בישראל צריכה להיות ממומנת לחלוטין מכספי המדינה ללא ביטוחים משלימים ושר\"פ.",
            AxisId::ECONOMIC,
            Direction::Negative,
        ),
        Question::directed(
            13,
            "הפרטת חברות ממשלתיות (כמו הדואר או התעשייה האווירית) היא הדרך הטובה ביותר לייעל אותן.",
            AxisId::ECONOMIC,
            Direction::Positive,
        ),
        Question::directed(
            14,
            "יש להעלות את מס ההכנסה על בעלי משכורות גבוהות מאוד (מס עשירים).",
            AxisId::ECONOMIC,
            Direction::Negative,
        ),
        Question::directed(
            15,
            "קצבאות הביטוח הלאומי מעודדות אנשים לא לעבוד וצריך לצמצם אותן.",
            AxisId::ECONOMIC,
            Direction::Positive,
        ),
        Question::directed(
            16,
            "המדינה צריכה להשקיע יותר בפריפריה ובשכונות מצוקה מאשר במרכז הארץ.",
            AxisId::ECONOMIC,
            Direction::Negative,
        ),
        Question::directed(
            17,
            "זכות השביתה היא זכות יסוד דמוקרטית שאין להגביל אותה גם בשירותים חיוניים.",
            AxisId::ECONOMIC,
            Direction::Negative,
        ),
        Question::directed(
            18,
            "ההייטק הישראלי הוא הקטר של המשק והמדינה צריכה לתת לו הטבות מס כדי שלא יעזוב.",
            AxisId::ECONOMIC,
            Direction::Positive,
        ),
        Question::directed(
            19,
            "משאבי הגז הטבעי של ישראל צריכים להיות בבעלות המדינה ובניהולה המלא, ולא בידי חברות פרטיות.",
            AxisId::ECONOMIC,
            Direction::Negative,
        ),
        Question::directed(
            20,
            "תשלומי הורים בבתי הספר מרחיבים את הפערים ויש לבטלם לטובת חינוך חינם אמיתי.",
            AxisId::ECONOMIC,
            Direction::Negative,
        ),
        Question::directed(
            21,
            "שוק עבודה גמיש שבו קל לפטר עובדים תורם לצמיחה כלכלית.",
            AxisId::ECONOMIC,
            Direction::Positive,
        ),
        Question::directed(
            22,
            "יש להגביל את שכר הבכירים בחברות הציבוריות והפיננסיות.",
            AxisId::ECONOMIC,
            Direction::Negative,
        ),
        Question::directed(
            23,
            "הגירעון בתקציב המדינה הוא סכנה ויש לקצץ בהוצאות הממשלה כדי לצמצמו.",
            AxisId::ECONOMIC,
            Direction::Positive,
        ),
        Question::directed(
            24,
            "המיסים על דלק ורכב בישראל גבוהים מדי וצריך להוריד אותם משמעותית.",
            AxisId::ECONOMIC,
            Direction::Positive,
        ),
        Question::weighted(
            41,
            "יש לעבור לשיטת 'השוברים' (Vouchers) בחינוך: המדינה תיתן תקציב לכל תלמיד, וההורים יבחרו באיזה בית ספר פרטי או ציבורי להשתמש בו.",
            vec![
                Effect::new(AxisId::ECONOMIC, 1.0),
                Effect::new(AxisId::LIBERTY, -0.5),
            ],
        ),
        Question::weighted(
            42,
            "שכר מינימום פוגע בעובדים חלשים בכך שהוא מונע מהם להיכנס לשוק העבודה, ויש לבטלו או להפחיתו.",
            vec![
                Effect::new(AxisId::ECONOMIC, 1.0),
                Effect::new(AxisId::LIBERTY, -0.5),
            ],
        ),
        Question::weighted(
            43,
            "יש להנהיג בישראל 'מס אחיד' (Flat Tax) שבו כולם משלמים אותו אחוז מהכנסתם, ללא קשר לגובה השכר.",
            vec![
                Effect::new(AxisId::ECONOMIC, 1.0),
                Effect::new(AxisId::LIBERTY, -0.5),
            ],
        ),
        Question::weighted(
            44,
            "זכות הקניין היא מקודשת: למדינה אסור להפקיע קרקע פרטית לצורכי ציבור (כמו כבישים או רכבת) ללא פיצוי מעל מחיר השוק והסכמת הבעלים.",
            vec![
                Effect::new(AxisId::ECONOMIC, 1.0),
                Effect::new(AxisId::LIBERTY, -0.5),
            ],
        ),
    ]
}

fn identity_and_security_questions() -> Vec<Question> {
    vec![
        Question::directed(
            7,
            "יש לאפשר תחבורה ציבורית בשבת במימון או באישור המדינה.",
            AxisId::CONSERVATISM,
            Direction::Negative,
        ),
        Question::weighted(
            8,
            "בית המשפט העליון (בג\"ץ) מתערב יותר מדי בהחלטות הכנסת ויש להגביל את כוחו.",
            vec![
                Effect::new(AxisId::LIBERTY, 1.0),
                Effect::new(AxisId::CONSERVATISM, 0.5),
            ],
        ),
        Question::directed(
            9,
            "מדינת ישראל צריכה לקדם נישואים אזרחיים עבור מי שאינו מעוניין או יכול להתחתן ברבנות.",
            AxisId::CONSERVATISM,
            Direction::Negative,
        ),
        Question::weighted(
            10,
            "במקרה של התנגשות, האופי היהודי של המדינה חשוב יותר מהערכים הדמוקרטיים-ליברליים.",
            vec![
                Effect::new(AxisId::CONSERVATISM, 1.0),
                Effect::new(AxisId::NATIONAL, 0.5),
            ],
        ),
        Question::weighted(
            11,
            "יש להחיל ריבונות ישראלית (סיפוח) על שטחי יהודה ושומרון.",
            vec![
                Effect::new(AxisId::NATIONAL, 1.5),
            ],
        ),
        Question::weighted(
            12,
            "יש לקדם פתרון מדיני של שתי מדינות לשני עמים כדי להבטיח את עתידה של ישראל.",
            vec![
                Effect::new(AxisId::NATIONAL, -1.5),
            ],
        ),
        Question::directed(
            27,
            "ההתיישבות ביהודה ושומרון (התנחלויות) היא מפעל ציוני חשוב התורם לביטחון.",
            AxisId::NATIONAL,
            Direction::Positive,
        ),
        Question::weighted(
            28,
            "ארגוני זכויות אדם (כמו 'בצלם' או 'שוברים שתיקה') גורמים נזק למדינה ויש להגביל את פעילותם.",
            vec![
                Effect::new(AxisId::LIBERTY, 1.0),
                Effect::new(AxisId::NATIONAL, 0.5),
            ],
        ),
        Question::directed(
            29,
            "זוגות להט\"ב צריכים ליהנות משוויון זכויות מלא, כולל אימוץ ופונדקאות.",
            AxisId::CONSERVATISM,
            Direction::Negative,
        ),
        Question::directed(
            30,
            "חוק השבות צריך לחול רק על יהודים על פי ההלכה, ולא על נכדים של יהודים.",
            AxisId::CONSERVATISM,
            Direction::Positive,
        ),
        Question::weighted(
            31,
            "יש לחייב את כל אזרחי ישראל, כולל חרדים וערבים, בשירות צבאי או לאומי.",
            vec![
                Effect::new(AxisId::NATIONAL, 1.0),
                Effect::new(AxisId::LIBERTY, 0.5),
            ],
        ),
        Question::weighted(
            32,
            "המשטרה צריכה לקבל יותר סמכויות (כמו חיפוש ללא צו) כדי להילחם בפשיעה הגואה.",
            vec![
                Effect::new(AxisId::LIBERTY, 1.5),
            ],
        ),
        Question::weighted(
            33,
            "שימוש בקנאביס (מריחואנה) לצרכי פנאי צריך להיות חוקי בישראל.",
            vec![
                Effect::new(AxisId::LIBERTY, -1.0),
                Effect::new(AxisId::CONSERVATISM, -0.5),
            ],
        ),
        Question::directed(
            34,
            "ערביי ישראל הם אזרחים שווי זכויות ויש לשלב אותם בכל מוקדי קבלת ההחלטות.",
            AxisId::NATIONAL,
            Direction::Negative,
        ),
        Question::directed(
            35,
            "מערכת המשפט צריכה לשקף יותר את ערכי המסורת היהודית.",
            AxisId::CONSERVATISM,
            Direction::Positive,
        ),
        Question::weighted(
            36,
            "חופש הביטוי וההפגנה הם ערכים עליונים, גם בזמן מלחמה.",
            vec![
                Effect::new(AxisId::LIBERTY, -1.5),
            ],
        ),
        Question::weighted(
            37,
            "יש לאסור על מכירת חמץ בפומבי במהלך חג הפסח בחוק.",
            vec![
                Effect::new(AxisId::CONSERVATISM, 1.0),
                Effect::new(AxisId::LIBERTY, 1.0),
            ],
        ),
        Question::directed(
            38,
            "מדיניות היד הקשה היא הדרך היחידה להתמודד עם הטרור.",
            AxisId::NATIONAL,
            Direction::Positive,
        ),
        Question::directed(
            39,
            "הפרדה מגדרית באירועים לציבור החרדי היא לגיטימית במרחב הציבורי.",
            AxisId::CONSERVATISM,
            Direction::Positive,
        ),
        Question::weighted(
            40,
            "ישראל צריכה לשאוף להיות 'מדינת כל אזרחיה' מבחינה חוקתית.",
            vec![
                Effect::new(AxisId::NATIONAL, -1.0),
                Effect::new(AxisId::CONSERVATISM, -0.5),
            ],
        ),
        Question::weighted(
            45,
            "יש להקל משמעותית על אזרחים שומרי חוק לקבל רישיון לנשיאת נשק אישי כדי שיוכלו להגן על עצמם ועל סביבתם.",
            vec![
                Effect::new(AxisId::NATIONAL, 1.0),
                Effect::new(AxisId::LIBERTY, -0.5),
            ],
        ),
        Question::weighted(
            46,
            "חוק הלאום הוא חוק חיוני שמגן על זהותה של ישראל כמדינת הלאום של העם היהודי ויש לחזק אותו.",
            vec![
                Effect::new(AxisId::NATIONAL, 1.0),
                Effect::new(AxisId::CONSERVATISM, 0.5),
            ],
        ),
        Question::weighted(
            47,
            "בכל נושא צבאי או ביטחוני, ישראל צריכה לפעול לפי האינטרס שלה בלבד, גם אם הדבר נוגד את עמדת הקהילה הבינלאומית.",
            vec![
                Effect::new(AxisId::NATIONAL, 1.5),
            ],
        ),
        Question::weighted(
            48,
            "יש לאסור על עמותות המקבלות מימון מישויות מדיניות זרות להתערב בתהליכים פוליטיים או משפטיים בישראל.",
            vec![
                Effect::new(AxisId::LIBERTY, 1.0),
                Effect::new(AxisId::NATIONAL, 0.5),
            ],
        ),
        Question::directed(
            49,
            "החזקת שטחי יהודה ושומרון היא זכות מוסרית והיסטורית בלתי ניתנת לערעור של עם ישראל.",
            AxisId::NATIONAL,
            Direction::Positive,
        ),
        Question::weighted(
            50,
            "על המדינה להפסיק כל מימון למוסדות תרבות המציגים נרטיב שסותר את קיומה של ישראל כמדינה יהודית וציונית.",
            vec![
                Effect::new(AxisId::LIBERTY, 1.0),
                Effect::new(AxisId::NATIONAL, 0.5),
            ],
        ),
        Question::directed(
            51,
            "יש לאפשר הקמת יישובים יהודיים חדשים בכל מקום בארץ ישראל ללא מגבלות של 'מרקם תכנוני' או לחץ בינלאומי.",
            AxisId::NATIONAL,
            Direction::Positive,
        ),
        Question::weighted(
            52,
            "התנגדות לביצוע פקודה צבאית מטעמי מצפון או פוליטיקה היא סכנה לדמוקרטיה ויש להעניש עליה בחומרה.",
            vec![
                Effect::new(AxisId::LIBERTY, 1.0),
                Effect::new(AxisId::NATIONAL, 0.5),
            ],
        ),
    ]
}
