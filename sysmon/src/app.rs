//! App state and main loop: input handling, picking up samples and notices, and drawing.

use std::{collections::VecDeque, io, sync::Arc, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use sysmon_core::{AlertThresholds, Notice, RefreshHandle, Sample};
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tracing::debug;

use crate::history::push_capped;
use crate::ui::{
    header::draw_header,
    notices::draw_notices,
    processes::{draw_top_processes, page_size, processes_handle_key},
    summary::{draw_gauges, draw_network},
};

const NOTICE_CAP: usize = 200;

pub struct App {
    last: Option<Arc<Sample>>,
    notices: VecDeque<Notice>,
    thresholds: AlertThresholds,

    should_quit: bool,

    pub procs_scroll_offset: usize,
    last_procs_area: Option<Rect>,
}

impl App {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self {
            last: None,
            notices: VecDeque::with_capacity(NOTICE_CAP),
            thresholds,
            should_quit: false,
            procs_scroll_offset: 0,
            last_procs_area: None,
        }
    }

    pub async fn run(
        &mut self,
        samples: watch::Receiver<Option<Arc<Sample>>>,
        notices: mpsc::UnboundedReceiver<Notice>,
        refresh: RefreshHandle,
    ) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let res = self
            .event_loop(&mut terminal, samples, notices, refresh)
            .await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut samples: watch::Receiver<Option<Arc<Sample>>>,
        mut notices: mpsc::UnboundedReceiver<Notice>,
        refresh: RefreshHandle,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    match k.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            self.should_quit = true;
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            debug!("manual refresh requested");
                            refresh.refresh();
                        }
                        _ => {
                            let page = self
                                .last_procs_area
                                .map(|a| page_size(a.height))
                                .unwrap_or(1);
                            let total = self.last.as_ref().map(|s| s.processes.len()).unwrap_or(0);
                            processes_handle_key(&mut self.procs_scroll_offset, k, page, total);
                        }
                    }
                }
            }
            if self.should_quit {
                break;
            }

            // The poller dropping its sender means it stopped; keep showing the last sample.
            if samples.has_changed().unwrap_or(false) {
                self.last = samples.borrow_and_update().clone();
            }
            while let Ok(n) = notices.try_recv() {
                self.push_notice(n);
            }

            terminal.draw(|f| self.draw(f))?;

            sleep(Duration::from_millis(100)).await;
        }
        Ok(())
    }

    fn push_notice(&mut self, n: Notice) {
        push_capped(&mut self.notices, n, NOTICE_CAP);
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, gauges, network, bottom
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(3), // cpu / ram / disk
                Constraint::Length(3), // network
                Constraint::Min(6),    // processes (left) + alerts (right)
            ])
            .split(area);

        draw_header(f, rows[0], self.last.as_ref());
        draw_gauges(f, rows[1], self.last.as_ref(), &self.thresholds);
        draw_network(f, rows[2], self.last.as_ref());

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(rows[3]);

        // Cache for input handlers
        self.last_procs_area = Some(bottom[0]);
        draw_top_processes(f, bottom[0], self.last.as_ref(), self.procs_scroll_offset);
        draw_notices(f, bottom[1], &self.notices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use ratatui::backend::TestBackend;
    use sysmon_core::{Alert, AlertEvent, AlertKind, ProcessInfo};

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn draws_placeholder_before_first_sample() {
        let mut app = App::new(AlertThresholds::default());
        let text = screen(&mut app);
        assert!(text.contains("sampling..."));
        assert!(text.contains("waiting for first sample"));
    }

    #[test]
    fn draws_sample_and_notices() {
        let mut app = App::new(AlertThresholds::default());
        app.last = Some(Arc::new(Sample {
            cpu_percent: 91.0,
            ram_percent: 40.0,
            disk_percent: 55.5,
            net_sent_rate: 2048.0,
            net_recv_rate: 100.0,
            processes: vec![ProcessInfo {
                pid: 4242,
                name: "rustc".into(),
                cpu_percent: 75.0,
                mem_percent: 2.0,
            }],
            timestamp: Local::now(),
        }));
        app.push_notice(Notice::Alert(AlertEvent {
            alert: Alert {
                kind: AlertKind::CpuHigh,
                value: 91.0,
            },
            at: Local::now(),
        }));

        let text = screen(&mut app);
        assert!(text.contains("CPU Usage: 91.0%"));
        assert!(text.contains("Disk Usage: 55.5%"));
        assert!(text.contains("Sent 2.0 KB/s"));
        assert!(text.contains("4242"));
        assert!(text.contains("rustc"));
        assert!(text.contains("CPU usage high: 91.0%"));
    }

    #[test]
    fn notice_buffer_is_capped() {
        let mut app = App::new(AlertThresholds::default());
        for _ in 0..NOTICE_CAP + 5 {
            app.push_notice(Notice::SamplingFailed {
                message: "boom".into(),
                at: Local::now(),
            });
        }
        assert_eq!(app.notices.len(), NOTICE_CAP);
    }
}
