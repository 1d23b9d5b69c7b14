pub mod flashcards;
pub mod quiz;

use std::fmt::Display;

///Failures raised by the session builder and players.
///
///`EmptyDeck` and `InsufficientPool` are recoverable: the caller should
///prompt for wider filters. The remaining variants are rejected state
///transitions and indicate a caller bug; the UI avoids them by disabling
///the corresponding controls.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    EmptyDeck,
    InsufficientPool { have: usize, need: usize },
    AlreadyAnswered,
    NotYetAnswered,
    AnswerOutOfRange { index: usize, len: usize },
    NoNextCard,
    NoPrevCard,
    SessionComplete,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDeck => f.write_str("EmptyDeck: No items matched the session filters"),
            Self::InsufficientPool { have, need } => f.write_fmt(format_args!(
                "InsufficientPool: A quiz needs at least {need} matching items, found {have}"
            )),
            Self::AlreadyAnswered => {
                f.write_str("AlreadyAnswered: The current question has already been answered")
            }
            Self::NotYetAnswered => {
                f.write_str("NotYetAnswered: Cannot advance before an answer is selected")
            }
            Self::AnswerOutOfRange { index, len } => f.write_fmt(format_args!(
                "AnswerOutOfRange: Answer index {index} is outside of [0, {len})"
            )),
            Self::NoNextCard => f.write_str("NoNextCard: Already at the last card"),
            Self::NoPrevCard => f.write_str("NoPrevCard: Already at the first card"),
            Self::SessionComplete => {
                f.write_str("SessionComplete: The session has already finished")
            }
        }
    }
}
