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

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Style, Stylize},
    widgets::{Block, Gauge, Paragraph, Widget, Wrap},
};

use crate::{
    catalog::StudyItem,
    color::Color,
    session::flashcards::CardSide,
};

pub(super) struct FlashcardWidget<'a> {
    item: &'a StudyItem,
    side: CardSide,
    chapter_color: Option<Color>,
    mastered: bool,
    progress: (usize, usize),
    can_move: (bool, bool),
}

impl<'a> FlashcardWidget<'a> {
    pub fn new(
        item: &'a StudyItem,
        side: CardSide,
        chapter_color: Option<Color>,
        mastered: bool,
        progress: (usize, usize),
        can_move: (bool, bool),
    ) -> Self {
        Self {
            item,
            side,
            chapter_color,
            mastered,
            progress,
            can_move,
        }
    }

    fn front_text(&self) -> String {
        match self.item.description.as_deref() {
            Some(description) => description.to_owned(),
            None => format!("A {} from your catalog", self.item.kind.label()),
        }
    }

    fn back_text(&self) -> String {
        let mut text = self.item.name.clone();

        let sections = [
            ("Structure", self.item.structure_description.as_deref()),
            ("Mechanism", self.item.mechanism_description.as_deref()),
            ("Uses", self.item.uses.as_deref()),
            ("Effects", self.item.effects.as_deref()),
        ];

        for (title, body) in sections {
            if let Some(body) = body {
                text.push_str(&format!("\n\n{title}: {body}"));
            }
        }

        text
    }
}

impl Widget for FlashcardWidget<'_> {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let (badge_area, card_area, hint_area, progress_area) = {
            let layout = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Length(1),
                    Constraint::Min(3),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ],
            );
            let split = layout.split(area);
            (split[0], split[1], split[2], split[3])
        };

        {
            let badge = if self.mastered {
                format!("[{}] [mastered]", self.item.kind.label())
            } else {
                format!("[{}]", self.item.kind.label())
            };
            Paragraph::new(badge)
                .centered()
                .fg(Color::for_item_type(self.item.kind))
                .render(badge_area, buf);
        }

        {
            let card = Block::bordered().border_style(Style::default().fg(self
                .chapter_color
                .map(Into::into)
                .unwrap_or_default()));
            let body_area = card.inner(card_area);
            card.render(card_area, buf);

            let (label, body) = match self.side {
                CardSide::Front => ("?", self.front_text()),
                CardSide::Back => ("Answer", self.back_text()),
            };

            let (label_area, text_area) = {
                let layout = Layout::new(
                    Direction::Vertical,
                    [Constraint::Length(2), Constraint::Min(1)],
                );
                let split = layout.split(body_area);
                (split[0], split[1])
            };

            Paragraph::new(format!("{label}:"))
                .centered()
                .render(label_area, buf);
            Paragraph::new(body)
                .wrap(Wrap { trim: false })
                .centered()
                .render(text_area, buf);
        }

        {
            let (can_prev, can_next) = self.can_move;
            let prev = if can_prev { "<- prev" } else { "       " };
            let next = if can_next { "next ->" } else { "       " };
            Paragraph::new(format!(
                "{prev} | space: flip | s: shuffle | m: mastered | q: quit | {next}"
            ))
            .centered()
            .render(hint_area, buf);
        }

        {
            let (current, total) = self.progress;
            Gauge::default()
                .ratio(current as f64 / total as f64)
                .label(format!("{current}/{total}"))
                .use_unicode(true)
                .render(progress_area, buf);
        }
    }
}
