//! Top processes table with per-cell coloring and a scrollbar.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use sysmon_core::render::{process_row, PROCESS_HEADERS};
use sysmon_core::Sample;

const SB_COLOR: Color = Color::Rgb(170, 170, 180);

const COLS: [Constraint; 4] = [
    Constraint::Length(8),      // PID
    Constraint::Percentage(50), // Name
    Constraint::Length(8),      // CPU %
    Constraint::Length(9),      // Mem %
];

/// Rows that fit below the header inside a bordered table of height `area_height`.
pub fn page_size(area_height: u16) -> usize {
    area_height.saturating_sub(3).max(1) as usize
}

pub fn draw_top_processes(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    s: Option<&Arc<Sample>>,
    scroll_offset: usize,
) {
    let shown = s.map(|s| s.processes.len()).unwrap_or(0);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Top Processes by CPU ({shown})"));
    f.render_widget(block, area);
    let Some(s) = s else { return };

    // Inner area; the last column is reserved for the scrollbar.
    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height < 1 || inner.width < 3 {
        return;
    }
    let content = Rect {
        width: inner.width.saturating_sub(2),
        ..inner
    };

    let total_rows = s.processes.len();
    let viewport_rows = content.height.saturating_sub(1) as usize;
    let offset = scroll_offset.min(total_rows.saturating_sub(viewport_rows));

    // Already in rank order; the first visible row is the hottest.
    let peak_cpu = s.processes.first().map(|p| p.cpu_percent).unwrap_or(0.0);
    let rows = s
        .processes
        .iter()
        .skip(offset)
        .take(viewport_rows)
        .map(|p| {
            let cpu_fg = match p.cpu_percent {
                x if x < 25.0 => Color::Green,
                x if x < 60.0 => Color::Yellow,
                _ => Color::Red,
            };
            let mem_fg = match p.mem_percent {
                x if x < 5.0 => Color::Blue,
                x if x < 20.0 => Color::Magenta,
                _ => Color::Red,
            };
            let emphasis = if p.cpu_percent > 0.0 && p.cpu_percent == peak_cpu {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let [pid, name, cpu, mem] = process_row(p);
            Row::new(vec![
                Cell::from(pid).style(Style::default().fg(Color::DarkGray)),
                Cell::from(name),
                Cell::from(cpu).style(Style::default().fg(cpu_fg)),
                Cell::from(mem).style(Style::default().fg(mem_fg)),
            ])
            .style(emphasis)
        });

    let header = Row::new(PROCESS_HEADERS.to_vec()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(rows, COLS.to_vec())
        .header(header)
        .column_spacing(1);
    f.render_widget(table, content);

    let scroll_area = Rect {
        x: inner.x + inner.width.saturating_sub(1),
        y: inner.y,
        width: 1,
        height: inner.height,
    };
    if scroll_area.height >= 3 {
        let track = (scroll_area.height - 2) as usize;
        let total = total_rows.max(1);
        let view = viewport_rows.clamp(1, total);
        let max_off = total.saturating_sub(view);

        let thumb_len = (track * view).div_ceil(total).clamp(1, track);
        let thumb_top = if max_off == 0 {
            0
        } else {
            ((track - thumb_len) * offset + max_off / 2) / max_off
        };

        let style = Style::default().fg(SB_COLOR);
        let mut lines: Vec<Line> = Vec::with_capacity(scroll_area.height as usize);
        lines.push(Line::from(Span::styled("▲", style)));
        for i in 0..track {
            let glyph = if i >= thumb_top && i < thumb_top + thumb_len {
                "█"
            } else {
                "│"
            };
            lines.push(Line::from(Span::styled(glyph, style)));
        }
        lines.push(Line::from(Span::styled("▼", style)));
        f.render_widget(Paragraph::new(lines), scroll_area);
    }
}

/// Keyboard scrolling (Up/Down/PageUp/PageDown/Home/End), clamped to the rows available.
pub fn processes_handle_key(
    scroll_offset: &mut usize,
    key: KeyEvent,
    page_size: usize,
    total_rows: usize,
) {
    let max_off = total_rows.saturating_sub(page_size);
    *scroll_offset = match key.code {
        KeyCode::Up => scroll_offset.saturating_sub(1),
        KeyCode::Down => scroll_offset.saturating_add(1),
        KeyCode::PageUp => scroll_offset.saturating_sub(page_size),
        KeyCode::PageDown => scroll_offset.saturating_add(page_size),
        KeyCode::Home => 0,
        KeyCode::End => max_off,
        _ => *scroll_offset,
    }
    .min(max_off);
}
