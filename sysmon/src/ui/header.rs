//! Top header with last update time and key hints.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};
use sysmon_core::Sample;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, s: Option<&Arc<Sample>>) {
    let title = match s {
        Some(s) => format!(
            "sysmon | updated {} | {} processes shown  (r: refresh, q: quit)",
            s.timestamp.format("%H:%M:%S"),
            s.processes.len()
        ),
        None => "sysmon | sampling...  (r: refresh, q: quit)".into(),
    };
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
