use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use protocol::Severity;
use smartlex_core::{AppState, View};

use crate::app::App;
use crate::types::Focus;

pub struct UI;

impl UI {
    pub fn draw(frame: &mut Frame, app: &App) {
        let state = app.snapshot();
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

        Self::draw_tabs(frame, chunks[0], &state);
        match state.view {
            View::Home => Self::draw_home(frame, chunks[1], app, &state),
            View::History => Self::draw_list(
                frame,
                chunks[1],
                "History",
                &state.history.list(),
                app.history_cursor,
            ),
            View::Library => Self::draw_list(
                frame,
                chunks[1],
                "Library",
                &state.library,
                app.library_cursor,
            ),
            View::AnalysisResult => Self::draw_result(frame, chunks[1], &state),
            View::Settings => Self::draw_settings(frame, chunks[1], app),
        }
        Self::draw_status(frame, chunks[2], app, &state);
    }

    fn draw_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
        let titles = ["Home", "History", "Library", "Settings", "Analysis"];
        let selected = match state.view {
            View::Home => 0,
            View::History => 1,
            View::Library => 2,
            View::Settings => 3,
            View::AnalysisResult => 4,
        };
        let tabs = Tabs::new(titles.iter().map(|t| Line::from(*t)))
            .select(selected)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title(" SmartLex "));
        frame.render_widget(tabs, area);
    }

    fn draw_home(frame: &mut Frame, area: Rect, app: &App, state: &AppState) {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

        let term = Paragraph::new(app.term_input.as_str()).block(
            Self::input_block(" Term ", app.focus == Focus::Term),
        );
        frame.render_widget(term, chunks[0]);

        let context = Paragraph::new(app.context_input.as_str())
            .wrap(Wrap { trim: false })
            .block(Self::input_block(" Context ", app.focus == Focus::Context));
        frame.render_widget(context, chunks[1]);

        let hint = if state.is_analyzing {
            Line::from(Span::styled(
                " Analyzing… submission disabled until the request resolves",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(" Tab switch field · Enter analyze")
        };
        frame.render_widget(Paragraph::new(hint), chunks[2]);
    }

    fn input_block(title: &str, focused: bool) -> Block<'_> {
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title)
    }

    fn draw_list(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        entries: &[std::sync::Arc<protocol::AnalysisResult>],
        cursor: usize,
    ) {
        let items: Vec<ListItem> = entries
            .iter()
            .map(|result| {
                ListItem::new(format!(
                    "{}  {}",
                    result.created_at.format("%Y-%m-%d %H:%M"),
                    result.term
                ))
            })
            .collect();

        if items.is_empty() {
            let empty = Paragraph::new("Nothing here yet.")
                .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)));
            frame.render_widget(empty, area);
            return;
        }

        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("› ")
            .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)));
        let mut list_state = ListState::default();
        list_state.select(Some(cursor.min(entries.len().saturating_sub(1))));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_result(frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(result) = &state.current_analysis else {
            frame.render_widget(
                Paragraph::new("No analysis selected.")
                    .block(Block::default().borders(Borders::ALL).title(" Analysis ")),
                area,
            );
            return;
        };

        let chunks =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(area);

        let breadcrumb = Line::from(vec![
            Span::styled("← ", Style::default().fg(Color::Cyan)),
            Span::styled(
                state.breadcrumb.label.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            ),
            Span::raw("  (Enter to go back)"),
        ]);
        frame.render_widget(Paragraph::new(breadcrumb), chunks[0]);

        let mut lines = vec![
            Line::from(Span::styled(
                result.term.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                result.summary.as_str(),
                Style::default().fg(Color::Green),
            )),
            Line::from(""),
        ];
        lines.extend(result.detail.lines().map(Line::from));
        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Deep Analysis "));
        frame.render_widget(body, chunks[1]);
    }

    fn draw_settings(frame: &mut Frame, area: Rect, app: &App) {
        let lines = vec![
            Line::from(format!("Model: {}", app.model)),
            Line::from(format!(
                "Window pinned: {}",
                if app.pinned { "yes" } else { "no" }
            )),
            Line::from(""),
            Line::from("Provider keys and appearance are configured via the environment."),
        ];
        let settings = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Settings "));
        frame.render_widget(settings, area);
    }

    fn draw_status(frame: &mut Frame, area: Rect, app: &App, state: &AppState) {
        let line = if let Some(active) = app.toasts.last() {
            let color = match active.toast.severity {
                Severity::Info => Color::Cyan,
                Severity::Success => Color::Green,
                Severity::Error => Color::Red,
            };
            Line::from(Span::styled(
                active.toast.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        } else if state.is_analyzing {
            Line::from(Span::styled("Analyzing…", Style::default().fg(Color::Yellow)))
        } else {
            Line::from("^H home  ^Y history  ^L library  ^S settings  ^P pin  ^Q quit")
        };
        let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, area);
    }
}
