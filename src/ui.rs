use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::bank::Question;
use crate::session::{Phase, Verdict};
use crate::summary::GroupStat;

const HORIZONTAL_MARGIN: u16 = 4;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(1),
                Constraint::Min(1),    // body
                Constraint::Length(2), // notice + key map
            ])
            .split(area);

        render_header(self, chunks[0], buf);

        match self.state {
            AppState::Summary => render_summary(self, chunks[2], buf),
            AppState::Quiz => match self.session.phase() {
                Phase::NoQuestion => render_idle(chunks[2], buf),
                Phase::QuestionDisplayed => {
                    if let Some(question) = self.session.current_question() {
                        render_question(question, self.selected, chunks[2], buf);
                    }
                }
                Phase::AnswerRevealed => {
                    if let (Some(question), Some(verdict)) =
                        (self.session.current_question(), self.last_verdict.as_ref())
                    {
                        render_reveal(question, verdict, chunks[2], buf);
                    }
                }
            },
        }

        render_footer(self, chunks[3], buf);
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let header = Line::from(vec![
        Span::styled("kakomon", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  bank: {}", app.bank_label), dim),
        Span::styled(format!("  mode: {}", app.session.mode()), dim),
        Span::styled(format!("  attempts: {}", app.session.history().len()), dim),
    ]);
    Paragraph::new(header).render(area, buf);
}

fn render_idle(area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(1),
            Constraint::Percentage(40),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "press a for a random question, m to retry your mistakes",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);
}

fn render_question(question: &Question, selected: Option<usize>, area: Rect, buf: &mut Buffer) {
    let max_chars_per_line = area.width.max(1);
    let text_lines = ((question.text.width() as f64 / max_chars_per_line as f64).ceil() as u16)
        .max(1)
        + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(text_lines),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        question.text.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .wrap(Wrap { trim: true })
    .render(chunks[0], buf);

    let highlight = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let options: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if selected == Some(i) {
                Line::from(Span::styled(format!("▶ {}) {}", i + 1, option), highlight))
            } else {
                Line::from(format!("  {}) {}", i + 1, option))
            }
        })
        .collect();

    Paragraph::new(options).render(chunks[2], buf);
}

fn render_reveal(question: &Question, verdict: &Verdict, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    let banner = if verdict.is_correct {
        Span::styled(
            "correct!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("incorrect! the answer is “{}”", verdict.correct_option_text),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    };
    Paragraph::new(banner).render(chunks[0], buf);

    Paragraph::new(Span::styled(
        question.text.clone(),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .wrap(Wrap { trim: true })
    .render(chunks[1], buf);

    let explanation = vec![
        Line::from(Span::styled(
            "explanation",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(Span::styled(
            verdict.explanation.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    Paragraph::new(explanation)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);
}

fn summary_table<'a>(key_header: &'a str, stats: &'a BTreeMap<String, GroupStat>) -> Table<'a> {
    let header = Row::new([key_header, "asked", "correct", "accuracy"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = stats
        .iter()
        .map(|(key, stat)| {
            Row::new([
                Cell::from(key.clone()),
                Cell::from(stat.count.to_string()),
                Cell::from(stat.correct_count.to_string()),
                Cell::from(format!("{:.1}%", stat.accuracy_pct)),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("accuracy by {key_header}")),
    )
}

fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    if app.session.history().is_empty() {
        Paragraph::new(Span::styled(
            "no attempts recorded in this session yet",
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(area, buf);
        return;
    }

    let summaries = app.session.summaries();
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    summary_table("period", &summaries.by_period).render(halves[0], buf);
    summary_table("category", &summaries.by_category).render(halves[1], buf);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if let Some(notice) = &app.notice {
        Paragraph::new(Span::styled(
            notice.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .render(chunks[0], buf);
    }

    let dim = Style::default().add_modifier(Modifier::DIM);
    let keymap = match app.state {
        AppState::Summary => Line::from(Span::styled("b: back  esc: quit", dim)),
        AppState::Quiz => {
            let mistakes_hint = if app.session.available_actions().can_request_mistakes {
                Span::styled("m: mistakes  ", dim)
            } else {
                Span::styled("m: mistakes (none yet)  ", dim.add_modifier(Modifier::CROSSED_OUT))
            };
            Line::from(vec![
                Span::styled("a: random  ", dim),
                mistakes_hint,
                Span::styled("1-4/↑↓: choose  enter: answer/next  s: summary  esc: quit", dim),
            ])
        }
    };
    Paragraph::new(keymap).render(chunks[1], buf);
}
