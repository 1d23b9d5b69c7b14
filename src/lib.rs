use std::{fmt::Display, str::FromStr};

use clap::Parser;

use catalog::{load_catalog, Catalog, CatalogError};
use filter::{filter_items, SessionFilter};
use modes::{flashcards::show_flashcards, quiz::run_quiz};
use progress::{Progress, ProgressError};
use session::{flashcards::FlashcardSession, quiz::QuizConfig, SessionError};
use terminal::TerminalWrapper;

pub mod catalog;
mod cli;
mod color;
mod event;
pub mod filter;
mod modes;
pub mod progress;
pub mod random;
pub mod session;
mod terminal;
#[cfg(test)]
mod test_support;

pub type ScoreTotal = Option<(usize, usize)>;

const DEFAULT_QUESTION_COUNT: usize = 10;

pub fn run() -> Result<ScoreTotal, PharmaStudyError> {
    let cli = cli::PharmaStudyCli::parse();
    let catalog = load_catalog(cli.paths)?;
    let filter = build_filter(&catalog, cli.chapter, cli.topic, cli.item_type)?;
    let progress = Progress::load_from_user_home()?;
    let question_count = resolve_question_count(cli.question_count)?;

    std::panic::catch_unwind(move || -> Result<ScoreTotal, PharmaStudyError> {
        //NOTE: From this point, stdout/stderr will not be usable, hence we
        //need to catch any panics, since they are not loggable. Mapping to
        //PharmaStudyError allows us to gracefully exit and log the panic.
        let term = &mut TerminalWrapper::new().map_err(UiError::IoError)?;
        let mut progress = progress;

        let score_total = match cli.mode {
            Mode::Flash => {
                let deck = filter_items(&catalog.items, &catalog.topics, &filter);
                let mut session =
                    FlashcardSession::with_mastered(deck, progress.mastered_ids())?;
                show_flashcards(term, &mut session, &catalog, &mut progress).map(|_| None)
            }
            Mode::Quiz => {
                let config = QuizConfig::new(filter, question_count);
                run_quiz(term, &catalog, config, &mut progress)
            }
        }?;

        progress.save_to_user_home()?;

        Ok(score_total)
    })
    .map_err(|err| {
        PharmaStudyError::Panic({
            // Attempt to extract the panic message
            let message = if let Some(msg) = err.downcast_ref::<String>() {
                msg.clone()
            } else if let Some(msg) = err.downcast_ref::<&str>() {
                (*msg).to_owned()
            } else {
                "Unknown panic occurred".to_owned()
            };

            // Get the location of the panic
            let location = std::panic::Location::caller();
            let file_name = location.file();
            let line_number = location.line();

            // Create the formatted string
            format!("{}:{}: {}", file_name, line_number, message)
        })
    })?
}

///Turns the CLI selectors into a pool filter, rejecting ids the catalog
///does not know about so typos fail fast instead of yielding empty pools.
fn build_filter(
    catalog: &Catalog,
    chapter: Option<String>,
    topic: Option<String>,
    kind: Option<catalog::ItemType>,
) -> Result<SessionFilter, PharmaStudyError> {
    let mut filter = SessionFilter::default();

    if let Some(chapter) = chapter {
        if catalog.chapter(&chapter).is_none() {
            return Err(ArgError::UnknownChapter(chapter).into());
        }
        filter = filter.chapter(chapter);
    }

    if let Some(topic) = topic {
        if catalog.topic(&topic).is_none() {
            return Err(ArgError::UnknownTopic(topic).into());
        }
        filter = filter.topic(topic);
    }

    if let Some(kind) = kind {
        filter = filter.kind(kind);
    }

    Ok(filter)
}

//Checked here so the builder's positive-count precondition only ever sees
//validated input
fn resolve_question_count(count: Option<usize>) -> Result<usize, ArgError> {
    match count {
        Some(0) => Err(ArgError::ZeroQuestionCount),
        Some(count) => Ok(count),
        None => Ok(DEFAULT_QUESTION_COUNT),
    }
}

#[derive(Clone, Debug)]
enum Mode {
    Flash,
    Quiz,
}

impl FromStr for Mode {
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();

        if s == "flash" {
            Ok(Self::Flash)
        } else if s == "quiz" {
            Ok(Self::Quiz)
        } else {
            Err(format!("Mode argument not recognized: {s}"))
        }
    }

    type Err = String;
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mode::Flash => "flash",
            Mode::Quiz => "quiz",
        })
    }
}

#[derive(Debug)]
pub enum PharmaStudyError {
    Catalog(Box<CatalogError>),
    Session(SessionError),
    Ui(UiError),
    Arg(ArgError),
    Progress(ProgressError),
    Panic(String),
}

impl Display for PharmaStudyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(err) => f.write_fmt(format_args!("Catalog: {err}")),
            Self::Session(err) => f.write_fmt(format_args!("Session: {err}")),
            Self::Ui(err) => f.write_fmt(format_args!("Ui: {err}")),
            Self::Arg(err) => f.write_fmt(format_args!("Arg: {err}")),
            Self::Progress(err) => f.write_fmt(format_args!("Progress: {err}")),
            Self::Panic(err) => f.write_fmt(format_args!("Panicked: {err}")),
        }
    }
}

impl From<CatalogError> for PharmaStudyError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(Box::new(err))
    }
}

impl From<SessionError> for PharmaStudyError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<UiError> for PharmaStudyError {
    fn from(err: UiError) -> Self {
        Self::Ui(err)
    }
}

impl From<ArgError> for PharmaStudyError {
    fn from(err: ArgError) -> Self {
        Self::Arg(err)
    }
}

impl From<ProgressError> for PharmaStudyError {
    fn from(err: ProgressError) -> Self {
        Self::Progress(err)
    }
}

#[derive(Debug)]
pub enum UiError {
    IoError(std::io::Error),
}

impl Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(err) => f.write_fmt(format_args!("IoError: {err}")),
        }
    }
}

impl From<std::io::Error> for UiError {
    fn from(err: std::io::Error) -> Self {
        UiError::IoError(err)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ArgError {
    UnknownChapter(String),
    UnknownTopic(String),
    ZeroQuestionCount,
}

impl Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownChapter(id) => {
                f.write_fmt(format_args!("No chapter with id \"{id}\" in the catalog"))
            }
            Self::UnknownTopic(id) => {
                f.write_fmt(format_args!("No topic with id \"{id}\" in the catalog"))
            }
            Self::ZeroQuestionCount => f.write_str("Question count must be at least 1"),
        }
    }
}
