use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Cell, Row},
};

use crate::points::Position;

pub struct PositionRowData {
    pub position: Position,
    pub selected: bool,
    pub disabled: bool,
    pub highlighted: bool,
}

/// Marker shown in the first column of a row.
pub fn marker(data: &PositionRowData) -> &'static str {
    match (data.selected, data.disabled) {
        (true, _) => "(•)",
        (false, true) => " x ",
        (false, false) => "( )",
    }
}

pub fn row_style(data: &PositionRowData) -> Style {
    let style = if data.disabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    } else if data.selected {
        Style::default()
            .fg(Color::Rgb(255, 135, 0))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    if data.highlighted {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

/// Pure presenter for a single selectable position
pub fn present_row(data: &PositionRowData) -> Row<'static> {
    Row::new(vec![
        Cell::from(marker(data)),
        Cell::from(data.position.label()),
        Cell::from(data.position.points_caption()),
    ])
    .style(row_style(data))
}
