use crate::infra::{build_analyzer, load_catalog, InMemoryResultStore};
use crate::quiz::{finish, render_outcome};
use chrono::{Duration, Utc};
use clap::{Args, ValueEnum};
use daat_compass::compass::{
    Answer, AxisId, CompassService, DisabledReportSink, LikertScore, Question, QuestionCatalog,
    ServiceSettings, UserIdentity,
};
use daat_compass::config::AppConfig;
use daat_compass::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only run one persona instead of the whole lineup.
    #[arg(long, value_enum)]
    pub(crate) persona: Option<Persona>,
    /// Ask the configured remote model for the analysis instead of the built-in rules.
    #[arg(long)]
    pub(crate) remote_analysis: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Persona {
    /// Welfare state, territorial compromise, separation of religion and state
    SocialDemocrat,
    /// Free market, security hawk, traditional values
    NationalConservative,
    /// Free market, dovish, minimal state in private life
    Libertarian,
    /// Neutral on every statement
    Undecided,
}

impl Persona {
    const ALL: [Persona; 4] = [
        Persona::SocialDemocrat,
        Persona::NationalConservative,
        Persona::Libertarian,
        Persona::Undecided,
    ];

    fn display_name(self) -> &'static str {
        match self {
            Persona::SocialDemocrat => "נועה",
            Persona::NationalConservative => "אליהו",
            Persona::Libertarian => "דניאל",
            Persona::Undecided => "מיכל",
        }
    }

    /// Preferred direction per axis, -1..1.
    fn stance(self, axis: &AxisId) -> f64 {
        let (economic, national, conservatism, liberty) = match self {
            Persona::SocialDemocrat => (-1.0, -0.8, -0.7, -0.4),
            Persona::NationalConservative => (0.5, 1.0, 0.9, 0.6),
            Persona::Libertarian => (1.0, -0.3, -0.5, -1.0),
            Persona::Undecided => (0.0, 0.0, 0.0, 0.0),
        };
        match axis.as_str() {
            AxisId::ECONOMIC => economic,
            AxisId::NATIONAL => national,
            AxisId::CONSERVATISM => conservatism,
            AxisId::LIBERTY => liberty,
            _ => 0.0,
        }
    }

    fn respond(self, question: &Question) -> LikertScore {
        let pull: f64 = question
            .effects
            .iter()
            .map(|effect| self.stance(&effect.axis) * effect.weight)
            .sum();
        let value = (pull * 2.0).round().clamp(-2.0, 2.0) as i8;
        LikertScore::try_from(value).unwrap_or(LikertScore::Neutral)
    }

    fn answers(self, catalog: &QuestionCatalog) -> Vec<Answer> {
        catalog
            .questions()
            .iter()
            .map(|question| Answer::new(question.id, self.respond(question)))
            .collect()
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.compass)?;

    let store = Arc::new(InMemoryResultStore::default());
    let mut service = CompassService::new(
        Arc::new(catalog),
        store,
        Arc::new(DisabledReportSink),
        ServiceSettings::from(&config.compass),
    );
    if args.remote_analysis {
        service = service.with_analyzer(build_analyzer(&config.analysis));
    }

    println!("Daat compass demo");
    println!(
        "- {} statements over {} axes",
        service.catalog().len(),
        service.catalog().axes().len()
    );

    let lineup: Vec<Persona> = match args.persona {
        Some(persona) => vec![persona],
        None => Persona::ALL.to_vec(),
    };

    for persona in lineup {
        println!("\n=== {:?} ({}) ===", persona, persona.display_name());
        let answers = persona.answers(service.catalog());
        let user = UserIdentity {
            name: persona.display_name().to_string(),
            email: None,
        };
        let started_at = Utc::now() - Duration::minutes(6);
        let outcome = finish(&service, answers, Some(user), Some(started_at)).await?;
        render_outcome(&outcome, service.catalog());

        if let Some((_, query)) = outcome.share_link.split_once('?') {
            match service.open_shared(query) {
                Some(shared) => println!(
                    "Share link reopens as {} at ({:+.2}, {:+.2})",
                    shared.name.as_deref().unwrap_or("anonymous"),
                    shared.coordinates.point().x,
                    shared.coordinates.point().y
                ),
                None => println!("Share link could not be decoded"),
            }
        }
    }

    match service.latest().await {
        Some(saved) => println!(
            "\nLast saved result: {} ({})",
            saved.analysis.title,
            saved
                .user
                .map(|user| user.name)
                .unwrap_or_else(|| "anonymous".to_string())
        ),
        None => println!("\nNo result saved"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use daat_compass::compass::compute_coordinates;

    #[test]
    fn personas_land_in_their_quadrants() {
        let catalog = QuestionCatalog::standard();

        let left = compute_coordinates(&Persona::SocialDemocrat.answers(&catalog), &catalog);
        assert!(left.get(AxisId::ECONOMIC) < 0.0);
        assert!(left.get(AxisId::NATIONAL) < 0.0);

        let right = compute_coordinates(&Persona::NationalConservative.answers(&catalog), &catalog);
        assert!(right.get(AxisId::NATIONAL) > 0.0);
        assert!(right.get(AxisId::CONSERVATISM) > 0.0);

        let market = compute_coordinates(&Persona::Libertarian.answers(&catalog), &catalog);
        assert!(market.get(AxisId::ECONOMIC) > 0.0);
        assert!(market.get(AxisId::LIBERTY) < 0.0);
    }

    #[test]
    fn undecided_answers_everything_neutral() {
        let catalog = QuestionCatalog::standard();
        let answers = Persona::Undecided.answers(&catalog);

        assert_eq!(answers.len(), catalog.len());
        assert!(answers.iter().all(|answer| answer.score == 0.0));
    }

    #[tokio::test]
    async fn demo_service_keeps_the_last_persona() {
        let store = Arc::new(InMemoryResultStore::default());
        let service = CompassService::new(
            Arc::new(QuestionCatalog::standard()),
            store.clone(),
            Arc::new(DisabledReportSink),
            ServiceSettings::default(),
        );

        for persona in [Persona::SocialDemocrat, Persona::Libertarian] {
            let answers = persona.answers(service.catalog());
            let user = UserIdentity {
                name: persona.display_name().to_string(),
                email: None,
            };
            finish(&service, answers, Some(user), None)
                .await
                .expect("demo run completes");
        }

        let saved = service.latest().await.expect("result saved");
        assert_eq!(saved.user.map(|user| user.name), Some("דניאל".to_string()));
    }
}
