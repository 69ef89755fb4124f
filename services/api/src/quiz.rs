use crate::infra::{build_service, load_catalog, parse_likert};
use chrono::{DateTime, Utc};
use clap::Args;
use daat_compass::compass::{
    AnalysisSource, Answer, AnswerCollector, AxisDefinition, CollectorError, CollectorState,
    CollectorStep, CompassService, Leaning, LikertScore, QuestionCatalog, QuizOutcome,
    QuizSubmission, ReportSink, ResultStore, ScoringEngine, ServiceSettings, UserIdentity,
};
use daat_compass::config::AppConfig;
use daat_compass::error::AppError;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args, Debug, Default)]
pub(crate) struct QuizArgs {
    /// Name to attach to the saved result and share link
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Optional e-mail stored alongside the name
    #[arg(long, requires = "name")]
    pub(crate) email: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file with an array of {"questionId", "score"} answers
    pub(crate) answers: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogValidateArgs {
    /// Catalog file (.json or .csv)
    pub(crate) path: PathBuf,
}

/// What the respondent typed at a prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Score(LikertScore),
    Back,
    Quit,
    Invalid(String),
}

fn read_input(line: &str) -> Input {
    match line.trim().to_ascii_lowercase().as_str() {
        "b" | "back" => Input::Back,
        "q" | "quit" => Input::Quit,
        other => match parse_likert(other) {
            Ok(score) => Input::Score(score),
            Err(reason) => Input::Invalid(reason),
        },
    }
}

/// Drive a collector from line input. `None` means the respondent quit and every recorded
/// answer is discarded.
pub(crate) fn collect_answers<I, W>(
    catalog: &QuestionCatalog,
    collector: &mut AnswerCollector,
    input: I,
    output: &mut W,
) -> io::Result<Option<Vec<Answer>>>
where
    I: BufRead,
    W: Write,
{
    if collector.is_empty() {
        return Ok(Some(Vec::new()));
    }

    let mut lines = input.lines();
    loop {
        let Some(id) = collector.current_question() else {
            return Ok(Some(collector.answers()));
        };
        let Some(question) = catalog.question(id) else {
            return Ok(Some(collector.answers()));
        };

        let progress = collector.progress();
        writeln!(
            output,
            "\n[{}/{}] {}",
            progress.position, progress.total, question.text
        )?;
        if let CollectorState::Presenting(index) = collector.state() {
            if let Some(previous) = collector.recorded(index) {
                writeln!(output, "  (תשובה קודמת: {})", previous.label())?;
            }
        }
        write!(output, "  2..-2, b=back, q=quit > ")?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(None);
        };

        let step = match read_input(&line) {
            Input::Quit => return Ok(None),
            Input::Invalid(reason) => {
                writeln!(output, "  {reason}")?;
                continue;
            }
            Input::Back => settle_then(|now| collector.back(now)),
            Input::Score(score) => settle_then(|now| collector.answer(score, now)),
        };

        match step {
            Ok(CollectorStep::Completed(answers)) => return Ok(Some(answers)),
            Ok(CollectorStep::Presenting(_)) => {}
            Err(error) => writeln!(output, "  {error}")?,
        }
    }
}

/// Retry a transition once the settle window from the previous one has passed.
fn settle_then<F>(mut transition: F) -> Result<CollectorStep, CollectorError>
where
    F: FnMut(Instant) -> Result<CollectorStep, CollectorError>,
{
    match transition(Instant::now()) {
        Err(CollectorError::Settling { remaining }) => {
            std::thread::sleep(remaining);
            transition(Instant::now())
        }
        other => other,
    }
}

pub(crate) async fn run_quiz(args: QuizArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config)?;

    let user = args.name.map(|name| UserIdentity {
        name,
        email: args.email,
    });
    let started_at = Utc::now();
    let mut collector = service.start_session();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let answers = collect_answers(service.catalog(), &mut collector, stdin.lock(), &mut stdout)?;

    let Some(answers) = answers else {
        println!("\nהשאלון בוטל; התשובות לא נשמרו.");
        return Ok(());
    };

    let outcome = finish(&service, answers, user, Some(started_at)).await?;
    render_outcome(&outcome, service.catalog());
    service.flush_reports().await;
    Ok(())
}

pub(crate) async fn finish<S, R>(
    service: &CompassService<S, R>,
    answers: Vec<Answer>,
    user: Option<UserIdentity>,
    started_at: Option<DateTime<Utc>>,
) -> Result<QuizOutcome, AppError>
where
    S: ResultStore + 'static,
    R: ReportSink + 'static,
{
    let outcome = service
        .complete(QuizSubmission {
            answers,
            user,
            started_at,
            client: Some(format!("daat-compass-cli/{}", env!("CARGO_PKG_VERSION"))),
        })
        .await?;
    Ok(outcome)
}

fn leaning_label(leaning: Leaning, axis: Option<&AxisDefinition>) -> String {
    let (negative, positive) = axis
        .map(|axis| (axis.negative_pole.as_str(), axis.positive_pole.as_str()))
        .unwrap_or(("הקוטב השלילי", "הקוטב החיובי"));
    match leaning {
        Leaning::StrongPositive => format!("{positive} מובהק"),
        Leaning::LeaningPositive => format!("נוטה ל{positive}"),
        Leaning::Balanced => "מאוזן".to_string(),
        Leaning::LeaningNegative => format!("נוטה ל{negative}"),
        Leaning::StrongNegative => format!("{negative} מובהק"),
    }
}

pub(crate) fn render_outcome(outcome: &QuizOutcome, catalog: &QuestionCatalog) {
    print!("{}", outcome_text(outcome, catalog));
}

fn outcome_text(outcome: &QuizOutcome, catalog: &QuestionCatalog) -> String {
    let mut text = format!(
        "\n{}\n{}\nמיקום על המצפן:\n",
        outcome.analysis.title, outcome.analysis.description
    );
    for (axis, value) in outcome.coordinates.iter() {
        let definition = catalog.axis(axis);
        let name = definition
            .map(|definition| definition.label.as_str())
            .unwrap_or(axis.as_str());
        let leaning = outcome
            .leanings
            .get(axis)
            .map(|leaning| leaning_label(*leaning, definition))
            .unwrap_or_default();
        text.push_str(&format!("  - {name}: {value:+.2} ({leaning})\n"));
    }

    let sections = [
        ("כלכלה", outcome.analysis.economic_analysis.as_str()),
        ("מדיניות וביטחון", outcome.analysis.national_analysis.as_str()),
        ("דת ומדינה", outcome.analysis.religious_analysis.as_str()),
        (
            "חברה",
            outcome.analysis.social_analysis.as_deref().unwrap_or_default(),
        ),
    ];
    for (heading, body) in sections {
        if !body.is_empty() {
            text.push_str(&format!("{heading}: {body}\n"));
        }
    }

    if let Some(duration) = outcome.duration_secs {
        text.push_str(&format!("זמן מילוי: {duration:.0} שניות\n"));
    }
    if !outcome.skipped.is_empty() {
        text.push_str(&format!(
            "{} תשובות לא תקינות לא נכללו בחישוב\n",
            outcome.skipped.len()
        ));
    }
    let source = match outcome.analysis_source {
        AnalysisSource::Remote => "מודל מרוחק",
        AnalysisSource::Rules => "כללים מקומיים",
    };
    text.push_str(&format!(
        "נשמר: {} | מקור הניתוח: {source}\n",
        if outcome.persisted { "כן" } else { "לא" }
    ));
    text.push_str(&format!("קישור לשיתוף: {}\n", outcome.share_link));
    text
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.compass)?;

    let raw = std::fs::read(&args.answers)?;
    let answers: Vec<Answer> = serde_json::from_slice(&raw).map_err(io::Error::from)?;

    let engine = ScoringEngine::new(ServiceSettings::from(&config.compass).scoring);
    let sheet = engine.score_sheet(&answers, &catalog);
    let rendered = serde_json::to_string_pretty(&sheet).map_err(io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_catalog_validate(args: CatalogValidateArgs) -> Result<(), AppError> {
    let catalog = QuestionCatalog::from_path(&args.path)?;
    println!(
        "{}: {} questions over {} axes",
        args.path.display(),
        catalog.len(),
        catalog.axes().len()
    );
    for axis in catalog.axes() {
        let count = catalog.questions_for_axis(&axis.id).count();
        let marker = if count == 0 { " (no statements)" } else { "" };
        println!(
            "  - {} [{} ↔ {}]: {count}{marker}",
            axis.id, axis.negative_pole, axis.positive_pole
        );
    }
    Ok(())
}
