use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::{border, line},
    widgets::{Block, Borders, Gauge, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::session::quiz::{QuizQuestion, OPTIONS_PER_QUESTION};

pub(super) struct QuizQuestionWidget<'a> {
    question: &'a QuizQuestion,
    progress: (usize, usize),
    score: usize,
    answer: Option<(usize, bool)>,
}

impl<'a> QuizQuestionWidget<'a> {
    pub(super) fn new(question: &'a QuizQuestion, progress: (usize, usize), score: usize) -> Self {
        Self {
            question,
            progress,
            score,
            answer: None,
        }
    }

    pub(super) fn answered(mut self, answer: (usize, bool)) -> Self {
        self.answer = Some(answer);
        self
    }

    fn prompt_text(&self) -> String {
        let item = self.question.item();
        let mut text = format!("What is the name of this {}?", item.kind.label());
        if let Some(description) = item.description.as_deref() {
            text.push_str("\n\n");
            text.push_str(description);
        }
        text
    }
}

pub(super) struct QuizQuestionWidgetState {
    pub(super) answer_areas: Vec<Rect>,
}

impl Default for QuizQuestionWidgetState {
    fn default() -> Self {
        Self {
            answer_areas: [Rect::default()].repeat(OPTIONS_PER_QUESTION),
        }
    }
}

const COLOR_CORRECT: Color = Color::Green;
const COLOR_INCORRECT: Color = Color::Red;

impl StatefulWidget for QuizQuestionWidget<'_> {
    type State = QuizQuestionWidgetState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) where
        Self: Sized,
    {
        let (question_area, option_areas, progress_area, (divider_top_area, divider_bot_area)) = {
            let (question_area, options_area, progress_area) = {
                let layout = Layout::new(
                    Direction::Vertical,
                    [
                        Constraint::Ratio(1, 3),
                        Constraint::Ratio(2, 3),
                        Constraint::Min(1),
                    ],
                );
                let split = layout.split(area);
                (split[0], split[1], split[2])
            };

            let (options_top, options_bot) = {
                let layout = Layout::new(Direction::Vertical, [Constraint::Ratio(1, 2); 2]);
                let split = layout.split(options_area);
                (split[0], split[1])
            };

            let layout = Layout::new(
                Direction::Horizontal,
                [
                    Constraint::Ratio(1, 2),
                    Constraint::Min(1),
                    Constraint::Ratio(1, 2),
                ],
            );

            let (top_left, divider_top, top_right) = {
                let split = layout.split(options_top);
                (split[0], split[1], split[2])
            };
            let (bot_left, divider_bot, bot_right) = {
                let split = layout.split(options_bot);
                (split[0], split[1], split[2])
            };

            (
                question_area,
                [top_left, top_right, bot_left, bot_right],
                progress_area,
                (divider_top, divider_bot),
            )
        };

        let question = Paragraph::new(self.prompt_text())
            .wrap(Wrap { trim: false })
            .centered();

        let divider_top = Block::new()
            .borders(Borders::RIGHT | Borders::TOP)
            .border_set(border::Set {
                top_right: line::DOUBLE_HORIZONTAL_DOWN,
                ..border::DOUBLE
            });
        let divider_bot = Block::new()
            .borders(Borders::RIGHT | Borders::TOP)
            .border_set(border::Set {
                top_right: line::DOUBLE_CROSS,
                ..border::DOUBLE
            });

        match self.answer {
            None => {
                question.render(question_area, buf);

                for (option_index, option) in self.question.options().iter().enumerate() {
                    let option_area = option_areas[option_index];
                    state.answer_areas[option_index] = option_area;

                    QuizOptionWidget::new(option.name().to_owned(), option_index)
                        .render(option_area, buf)
                }

                divider_top.render(divider_top_area, buf);
                divider_bot.render(divider_bot_area, buf);
            }
            Some((answered_index, correct)) => {
                {
                    let color = if correct {
                        COLOR_CORRECT
                    } else {
                        COLOR_INCORRECT
                    };
                    question.fg(color).render(question_area, buf);
                }

                let correct_index = self.question.correct_index();

                for (option_index, option) in self.question.options().iter().enumerate() {
                    let option_area = option_areas[option_index];
                    state.answer_areas[option_index] = option_area;

                    QuizOptionWidget::new(option.name().to_owned(), option_index)
                        .answered((option_index == correct_index, option_index == answered_index))
                        .render(option_area, buf)
                }

                let color_for_divider = |index_test: fn(usize) -> bool| -> Color {
                    if index_test(answered_index) {
                        if correct {
                            COLOR_CORRECT
                        } else {
                            COLOR_INCORRECT
                        }
                    } else if index_test(correct_index) {
                        COLOR_CORRECT
                    } else {
                        Color::default()
                    }
                };

                divider_top
                    .fg(color_for_divider(|index| index < 2))
                    .render(divider_top_area, buf);
                divider_bot
                    .fg(color_for_divider(|index| index >= 2))
                    .render(divider_bot_area, buf);
            }
        }

        {
            let (current, total) = self.progress;
            Gauge::default()
                .ratio(current as f64 / total as f64)
                .label(format!(
                    "question {current}/{total} | score {}",
                    self.score
                ))
                .gauge_style(Style::default().fg(COLOR_CORRECT).bg(COLOR_INCORRECT))
                .use_unicode(true)
                .render(progress_area, buf);
        }
    }
}

struct QuizOptionWidget {
    name: String,
    option_index: usize,
    outcome: Option<(bool, bool)>,
}

impl QuizOptionWidget {
    fn new(name: String, option_index: usize) -> Self {
        Self {
            name,
            option_index,
            outcome: None,
        }
    }

    fn answered(mut self, outcome: (bool, bool)) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

impl Widget for QuizOptionWidget {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer) {
        Paragraph::new(format!("{}: {}", self.option_index + 1, self.name))
            .wrap(Wrap { trim: false })
            .centered()
            .block(
                Block::bordered()
                    .borders(Borders::TOP)
                    .border_set(border::DOUBLE),
            )
            .fg(match self.outcome {
                None | Some((false, false)) => Color::default(),
                Some((is_correct, _)) => {
                    if is_correct {
                        COLOR_CORRECT
                    } else {
                        COLOR_INCORRECT
                    }
                }
            })
            .render(area, buf)
    }
}

pub(super) struct QuizSummaryWidget {
    score: usize,
    total: usize,
}

impl QuizSummaryWidget {
    pub(super) fn new(score: usize, total: usize) -> Self {
        Self { score, total }
    }

    fn message(&self) -> &'static str {
        if self.total == 0 {
            return "Keep practicing!";
        }
        let percent = self.score as f64 / self.total as f64 * 100.0;
        if percent >= 90.0 {
            "Excellent!"
        } else if percent >= 70.0 {
            "Great job!"
        } else if percent >= 50.0 {
            "Good effort!"
        } else {
            "Keep practicing!"
        }
    }
}

impl Widget for QuizSummaryWidget {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let (message_area, score_area, hint_area) = {
            let layout = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ],
            );
            let split = layout.split(area);
            (split[0], split[1], split[2])
        };

        Paragraph::new(self.message())
            .bold()
            .centered()
            .render(message_area, buf);

        let percent = if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64 * 100.0
        };
        Paragraph::new(format!(
            "You scored {}/{} ({percent:.0}%)",
            self.score, self.total
        ))
        .centered()
        .render(score_area, buf);

        Paragraph::new("r: try again | q: quit")
            .dim()
            .centered()
            .render(hint_area, buf);
    }
}
