/*
 * Copyright (C) 2025 The PharmaStudy Authors
 *
 * This file is part of PharmaStudy.
 *
 * PharmaStudy is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * PharmaStudy is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with PharmaStudy.  If not, see <http://www.gnu.org/licenses/>.
 */

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use widget::FlashcardWidget;

use crate::{
    catalog::Catalog,
    color::Color,
    event::clear_and_match_event,
    progress::Progress,
    session::flashcards::FlashcardSession,
    terminal::TerminalWrapper,
    PharmaStudyError,
};

mod widget;

pub fn show_flashcards(
    term: &mut TerminalWrapper,
    session: &mut FlashcardSession,
    catalog: &Catalog,
    progress: &mut Progress,
) -> Result<(), PharmaStudyError> {
    let rng = &mut rand::thread_rng();

    loop {
        let widget = {
            let item = session.current();
            FlashcardWidget::new(
                item,
                session.side(),
                chapter_color(catalog, &item.topic_id),
                session.is_mastered(&item.id),
                session.progress(),
                (session.has_prev(), session.has_next()),
            )
        };
        term.render_widget(widget)?;

        let input = clear_and_match_event(match_user_input)?;
        match input {
            UserInput::Flip => session.flip(),
            //Boundary moves are disabled rather than erroring: the widget
            //already renders the unavailable direction dimmed
            UserInput::NextCard => {
                if session.has_next() {
                    session.next().map_err(PharmaStudyError::Session)?;
                }
            }
            UserInput::PrevCard => {
                if session.has_prev() {
                    session.prev().map_err(PharmaStudyError::Session)?;
                }
            }
            UserInput::Shuffle => session.shuffle(rng),
            UserInput::ToggleMastered => {
                let id = session.current().id.clone();
                let mastered = session.toggle_mastered(&id);
                progress.set_mastered(&id, mastered);
            }
            UserInput::Resize => continue,
            UserInput::Quit => break,
        }
    }

    Ok(())
}

///Resolves an item's chapter display color through its topic.
fn chapter_color(catalog: &Catalog, topic_id: &str) -> Option<Color> {
    let topic = catalog.topic(topic_id)?;
    let chapter = catalog.chapter(&topic.chapter_id)?;
    chapter.color.as_deref().and_then(Color::parse_hex)
}

enum UserInput {
    Flip,
    NextCard,
    PrevCard,
    Shuffle,
    ToggleMastered,
    Resize,
    Quit,
}

fn match_user_input(event: Event) -> Option<UserInput> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up | KeyCode::Down => {
                Some(UserInput::Flip)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(UserInput::NextCard),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(UserInput::PrevCard),
            KeyCode::Char('s') => Some(UserInput::Shuffle),
            KeyCode::Char('m') => Some(UserInput::ToggleMastered),
            KeyCode::Esc | KeyCode::Char('q') => Some(UserInput::Quit),
            _ => None,
        },
        Event::Resize(_, _) => Some(UserInput::Resize),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(button),
            ..
        }) => match button {
            MouseButton::Left => Some(UserInput::Flip),
            MouseButton::Right => Some(UserInput::PrevCard),
            MouseButton::Middle => Some(UserInput::NextCard),
        },
        _ => None,
    }
}
