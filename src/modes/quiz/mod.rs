use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use widget::{QuizQuestionWidget, QuizQuestionWidgetState, QuizSummaryWidget};

use crate::{
    catalog::Catalog,
    event::clear_and_match_event,
    progress::Progress,
    session::quiz::{QuizConfig, QuizQuestion, QuizSession},
    terminal::TerminalWrapper,
    PharmaStudyError, ScoreTotal,
};

mod widget;

pub fn run_quiz(
    term: &mut TerminalWrapper,
    catalog: &Catalog,
    config: QuizConfig,
    progress: &mut Progress,
) -> Result<ScoreTotal, PharmaStudyError> {
    let rng = &mut rand::thread_rng();
    let mut session = config
        .build(&catalog.items, &catalog.topics, rng)
        .map_err(PharmaStudyError::Session)?;

    loop {
        while let Some(question) = session.current() {
            let question = question.clone();

            let selected = match prompt_answer(term, &session, &question)? {
                Ok(index) => index,
                Err(Quit) => return Ok(Some((session.score(), session.total()))),
            };

            let correct = session
                .select_answer(selected)
                .map_err(PharmaStudyError::Session)?;

            {
                let item_progress = progress.for_item_mut(&question.item().id);
                if correct {
                    item_progress.correct += 1;
                } else {
                    item_progress.incorrect += 1;
                }
            }

            if let Err(Quit) = show_revealed(term, &session, &question, (selected, correct))? {
                return Ok(Some((session.score(), session.total())));
            }

            session.next().map_err(PharmaStudyError::Session)?;
        }

        match show_summary(term, &session)? {
            //Restart retains the filters and question count but rebuilds the
            //question sequence from scratch
            SummaryAction::Restart => {
                session = config
                    .build(&catalog.items, &catalog.topics, rng)
                    .map_err(PharmaStudyError::Session)?;
            }
            SummaryAction::Quit => return Ok(Some((session.score(), session.total()))),
        }
    }
}

struct Quit;

fn prompt_answer(
    term: &mut TerminalWrapper,
    session: &QuizSession,
    question: &QuizQuestion,
) -> Result<Result<usize, Quit>, PharmaStudyError> {
    let widget_state = &mut QuizQuestionWidgetState::default();

    loop {
        term.render_stateful_widget(
            QuizQuestionWidget::new(question, session.progress(), session.score()),
            widget_state,
        )?;

        let input = clear_and_match_event(|event| match_answer_input(event, widget_state))?;
        match input {
            UserInput::Answer(index) => return Ok(Ok(index)),
            UserInput::Advance | UserInput::Resize => continue,
            UserInput::Quit => return Ok(Err(Quit)),
        }
    }
}

fn show_revealed(
    term: &mut TerminalWrapper,
    session: &QuizSession,
    question: &QuizQuestion,
    answer: (usize, bool),
) -> Result<Result<(), Quit>, PharmaStudyError> {
    let widget_state = &mut QuizQuestionWidgetState::default();

    loop {
        term.render_stateful_widget(
            QuizQuestionWidget::new(question, session.progress(), session.score())
                .answered(answer),
            widget_state,
        )?;

        let input = clear_and_match_event(|event| match_answer_input(event, widget_state))?;
        match input {
            UserInput::Advance => return Ok(Ok(())),
            UserInput::Answer(_) | UserInput::Resize => continue,
            UserInput::Quit => return Ok(Err(Quit)),
        }
    }
}

enum SummaryAction {
    Restart,
    Quit,
}

fn show_summary(
    term: &mut TerminalWrapper,
    session: &QuizSession,
) -> Result<SummaryAction, PharmaStudyError> {
    enum SummaryInput {
        Restart,
        Quit,
        Resize,
    }

    loop {
        term.render_widget(QuizSummaryWidget::new(session.score(), session.total()))?;

        let input = clear_and_match_event(|event| match event {
            Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                code,
                ..
            }) => match code {
                KeyCode::Char('r') => Some(SummaryInput::Restart),
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(SummaryInput::Quit),
                _ => None,
            },
            Event::Resize(_, _) => Some(SummaryInput::Resize),
            _ => None,
        })?;

        match input {
            SummaryInput::Restart => return Ok(SummaryAction::Restart),
            SummaryInput::Quit => return Ok(SummaryAction::Quit),
            SummaryInput::Resize => continue,
        }
    }
}

enum UserInput {
    Answer(usize),
    Advance,
    Resize,
    Quit,
}

fn match_answer_input(event: Event, state: &QuizQuestionWidgetState) -> Option<UserInput> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Char('1') => Some(UserInput::Answer(0)),
            KeyCode::Char('2') => Some(UserInput::Answer(1)),
            KeyCode::Char('3') => Some(UserInput::Answer(2)),
            KeyCode::Char('4') => Some(UserInput::Answer(3)),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => Some(UserInput::Advance),
            KeyCode::Esc | KeyCode::Char('q') => Some(UserInput::Quit),
            _ => None,
        },
        Event::Resize(_, _) => Some(UserInput::Resize),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(_),
            column,
            row,
            ..
        }) => state
            .answer_areas
            .iter()
            .enumerate()
            .find(|(_, area)| area.contains((column, row).into()))
            .map(|(index, _)| UserInput::Answer(index)),
        _ => None,
    }
}
