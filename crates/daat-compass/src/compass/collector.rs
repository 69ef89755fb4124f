//! Sequential questionnaire state machine with back-navigation and a settle guard.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use super::catalog::QuestionCatalog;
use super::domain::{Answer, LikertScore, QuestionId};

/// Presentation order, fixed once when the collector is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationOrder {
    #[default]
    Catalog,
    Shuffled {
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum CollectorState {
    Presenting(usize),
    Completed,
}

/// Result of an accepted transition.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectorStep {
    Presenting(usize),
    /// Every statement has an answer; carries the answers in presentation order.
    Completed(Vec<Answer>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.position as f64 / self.total as f64) * 100.0).round() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CollectorError {
    #[error("previous transition still settling ({remaining:?} left)")]
    Settling { remaining: Duration },
    #[error("questionnaire already completed")]
    Completed,
}

/// One quiz session. Abandoning it (dropping it) discards every recorded answer.
#[derive(Debug, Clone)]
pub struct AnswerCollector {
    order: Vec<QuestionId>,
    recorded: Vec<Option<LikertScore>>,
    state: CollectorState,
    settle_delay: Duration,
    settling_until: Option<Instant>,
}

impl AnswerCollector {
    pub fn new(catalog: &QuestionCatalog, order: PresentationOrder, settle_delay: Duration) -> Self {
        let mut ids: Vec<QuestionId> = catalog.questions().iter().map(|q| q.id).collect();

        if let PresentationOrder::Shuffled { seed } = order {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            ids.shuffle(&mut rng);
        }

        let state = if ids.is_empty() {
            CollectorState::Completed
        } else {
            CollectorState::Presenting(0)
        };

        Self {
            recorded: vec![None; ids.len()],
            order: ids,
            state,
            settle_delay,
            settling_until: None,
        }
    }

    pub fn state(&self) -> CollectorState {
        self.state
    }

    pub fn order(&self) -> &[QuestionId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Statement currently on screen, if any.
    pub fn current_question(&self) -> Option<QuestionId> {
        match self.state {
            CollectorState::Presenting(index) => self.order.get(index).copied(),
            CollectorState::Completed => None,
        }
    }

    /// Answer previously recorded for the statement at `index`.
    pub fn recorded(&self, index: usize) -> Option<LikertScore> {
        self.recorded.get(index).copied().flatten()
    }

    pub fn progress(&self) -> Progress {
        let position = match self.state {
            CollectorState::Presenting(index) => index + 1,
            CollectorState::Completed => self.order.len(),
        };
        Progress {
            position,
            total: self.order.len(),
        }
    }

    /// Record (or overwrite) the answer for the current statement and advance.
    pub fn answer(&mut self, score: LikertScore, now: Instant) -> Result<CollectorStep, CollectorError> {
        let index = self.presenting_index()?;
        self.ensure_settled(now)?;

        self.recorded[index] = Some(score);
        self.settling_until = Some(now + self.settle_delay);

        if index + 1 < self.order.len() {
            self.state = CollectorState::Presenting(index + 1);
            return Ok(CollectorStep::Presenting(index + 1));
        }

        self.state = CollectorState::Completed;
        Ok(CollectorStep::Completed(self.answers()))
    }

    /// Step back one statement. A no-op on the first statement.
    pub fn back(&mut self, now: Instant) -> Result<CollectorStep, CollectorError> {
        let index = self.presenting_index()?;
        if index == 0 {
            return Ok(CollectorStep::Presenting(0));
        }
        self.ensure_settled(now)?;

        self.settling_until = Some(now + self.settle_delay);
        self.state = CollectorState::Presenting(index - 1);
        Ok(CollectorStep::Presenting(index - 1))
    }

    /// Answers recorded so far, in presentation order.
    pub fn answers(&self) -> Vec<Answer> {
        self.order
            .iter()
            .zip(&self.recorded)
            .filter_map(|(id, score)| score.map(|score| Answer::new(*id, score)))
            .collect()
    }

    fn presenting_index(&self) -> Result<usize, CollectorError> {
        match self.state {
            CollectorState::Presenting(index) => Ok(index),
            CollectorState::Completed => Err(CollectorError::Completed),
        }
    }

    fn ensure_settled(&self, now: Instant) -> Result<(), CollectorError> {
        match self.settling_until {
            Some(until) if now < until => Err(CollectorError::Settling {
                remaining: until - now,
            }),
            _ => Ok(()),
        }
    }
}
