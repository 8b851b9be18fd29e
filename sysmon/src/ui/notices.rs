//! Recent alerts and sampling failures, newest at the bottom.

use std::collections::VecDeque;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use sysmon_core::Notice;

pub fn draw_notices(f: &mut ratatui::Frame<'_>, area: Rect, notices: &VecDeque<Notice>) {
    let block = Block::default().borders(Borders::ALL).title("Alerts");
    let visible = area.height.saturating_sub(2) as usize;
    let skip = notices.len().saturating_sub(visible);

    let lines: Vec<Line> = notices
        .iter()
        .skip(skip)
        .map(|n| {
            let color = match n {
                Notice::Alert(_) => Color::Red,
                Notice::SamplingFailed { .. } => Color::Yellow,
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", n.at().format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(n.message(), Style::default().fg(color)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}
