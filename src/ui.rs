pub mod position_list;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Report},
    points::Position,
    selection::Rival,
    ui::position_list::{present_row, PositionRowData},
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

const KEY_HELP: [&str; 6] = [
    "←/→ rival",
    "↑/↓ move",
    "enter select (1-9,0,d)",
    "(c)alculate",
    "(r)eset",
    "(esc)ape",
];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(3),  // title
                Constraint::Min(13),    // position columns
                Constraint::Length(7),  // report
                Constraint::Length(1),  // status
                Constraint::Length(1),  // key help
            ])
            .split(area);

        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(self.config.subject.clone(), bold_style.fg(Color::Rgb(255, 135, 0))),
            Span::raw(format!(
                " leads {} by {} and {} by {}",
                self.config.rival_a,
                self.config.gap_to_rival_a,
                self.config.rival_b,
                self.config.gap_to_rival_b
            )),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Title decider"))
        .alignment(Alignment::Center);
        title.render(chunks[0], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        render_column(self, Rival::A, columns[0], buf);
        render_column(self, Rival::B, columns[1], buf);

        let (report_text, report_style) = match self.report {
            None => (
                "Pick a finishing position for both rivals, then press (c) to calculate.".to_string(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            ),
            Some(Report::MissingSelection) => (
                self.report_text().unwrap_or_default(),
                Style::default().fg(Color::Yellow),
            ),
            Some(report @ Report::Computed(_)) => {
                (report.text(&self.config), bold_style.fg(Color::Green))
            }
        };
        Paragraph::new(report_text)
            .style(report_style)
            .block(Block::default().borders(Borders::ALL).title("Result"))
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        if let Some(status) = &self.status {
            Paragraph::new(Span::styled(status.clone(), Style::default().fg(Color::Red)))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }

        Paragraph::new(Span::styled(
            KEY_HELP.iter().join("  "),
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }
}

fn render_column(app: &App, rival: Rival, area: Rect, buf: &mut Buffer) {
    let focused = app.focus == rival;
    let rows: Vec<Row> = Position::all()
        .enumerate()
        .map(|(idx, position)| {
            present_row(&PositionRowData {
                position,
                selected: app.selection.get(rival) == Some(position),
                disabled: app.selection.is_disabled(rival, position),
                highlighted: focused && app.cursor(rival) == idx,
            })
        })
        .collect();

    let label_width = Position::all()
        .map(|p| p.label().width())
        .max()
        .unwrap_or_default() as u16;

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(label_width),
            Constraint::Min(8),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!("{} finishes", app.config.rival_name(rival))),
    );

    table.render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::Message, config::Config};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| f.render_widget(app, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_render_empty_app() {
        let app = App::new(Config::default());
        let content = render(&app);
        assert!(content.contains("Lando"));
        assert!(content.contains("Max finishes"));
        assert!(content.contains("Oscar finishes"));
        assert!(content.contains("No points / DNF"));
        assert!(content.contains("(25 pts)"));
    }

    #[test]
    fn test_render_report() {
        let mut app = App::new(Config::default()).with_selections(
            Position::new(1),
            Position::new(2),
        );
        app.update(Message::Calculate);
        let content = render(&app);
        assert!(content.contains("needs at least"));
        assert!(content.contains("or better."));
    }

    #[test]
    fn test_render_status_line() {
        let mut app = App::new(Config::default()).with_selections(Position::new(3), None);
        app.update(Message::Focus(Rival::B));
        app.update(Message::RivalPositionSelected {
            rival: Rival::B,
            position: Position::new(3).unwrap(),
        });
        let content = render(&app);
        assert!(content.contains("already taken by Max"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let app = App::new(Config::default());
        let backend = TestBackend::new(10, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
    }
}
