//! CPU, RAM and disk gauges plus the network rate line.

use std::sync::Arc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};
use sysmon_core::render::{cpu_line, disk_line, human_rate, ram_line};
use sysmon_core::{AlertThresholds, Sample};

fn gauge<'a>(title: &'a str, label: String, pct: f32, limit: f32, base: Color) -> Gauge<'a> {
    // Same strict comparison the alert evaluator uses.
    let over = pct > limit;
    let style = if over {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(base)
    };
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(style)
        .percent(pct.clamp(0.0, 100.0) as u16)
        .label(label)
}

pub fn draw_gauges(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    s: Option<&Arc<Sample>>,
    t: &AlertThresholds,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let Some(s) = s else {
        for (ix, title) in ["CPU", "Memory", "Disk"].into_iter().enumerate() {
            f.render_widget(Block::default().borders(Borders::ALL).title(title), cols[ix]);
        }
        return;
    };

    f.render_widget(
        gauge("CPU", cpu_line(s), s.cpu_percent, t.cpu, Color::Cyan),
        cols[0],
    );
    f.render_widget(
        gauge("Memory", ram_line(s), s.ram_percent, t.ram, Color::Magenta),
        cols[1],
    );
    f.render_widget(
        gauge("Disk", disk_line(s), s.disk_percent, t.disk, Color::Yellow),
        cols[2],
    );
}

pub fn draw_network(f: &mut ratatui::Frame<'_>, area: Rect, s: Option<&Arc<Sample>>) {
    let line = match s {
        Some(s) => Line::from(format!(
            "Sent {}  |  Recv {}",
            human_rate(s.net_sent_rate),
            human_rate(s.net_recv_rate)
        )),
        None => Line::from("waiting for first sample"),
    };
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Network"));
    f.render_widget(p, area);
}
