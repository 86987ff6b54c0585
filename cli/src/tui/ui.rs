use std::io::{self, Stdout, Write};
use anyhow::Result;
use crossterm::{cursor::MoveTo, execute};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame, Terminal, TerminalOptions, Viewport,
};
use tinypomo_core::{format_clock, CountdownView, TickFrame};

const INLINE_HEIGHT: u16 = 2;

pub fn draw(f: &mut Frame, tick: &TickFrame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Clock
            Constraint::Length(1), // Progress
        ])
        .split(f.area());

    let (state, color) = if tick.paused {
        ("PAUSED", Color::Yellow)
    } else {
        ("RUNNING", Color::Green)
    };

    let clock = Line::from(vec![
        Span::styled(
            format!("⏱  {} ", format_clock(tick.remaining)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(state, Style::default().fg(color)),
        Span::styled("   p: pause/resume | q: stop", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(clock), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(tick.progress.clamp(0.0, 1.0))
        .label(format!("{:.0}% of {}", tick.progress * 100.0, format_clock(tick.total)));
    f.render_widget(gauge, chunks[1]);
}

/// Two-line countdown drawn in place below the current cursor line.
pub struct InlineView {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl InlineView {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(INLINE_HEIGHT),
            },
        )?;
        Ok(Self { terminal })
    }

    /// Leaves the cursor on the last line of the countdown area.
    pub fn finish(&mut self) -> Result<()> {
        let area = self.terminal.get_frame().area();
        execute!(self.terminal.backend_mut(), MoveTo(0, area.bottom().saturating_sub(1)))?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl CountdownView for InlineView {
    fn render(&mut self, tick: &TickFrame) -> Result<()> {
        self.terminal.draw(|f| draw(f, tick))?;
        Ok(())
    }
}

pub fn status_line(tick: &TickFrame) -> String {
    format!(
        "⏱  {} remaining{}",
        format_clock(tick.remaining),
        if tick.paused { " (paused)" } else { "" }
    )
}

/// Carriage-return redraw for output that is not a terminal.
#[derive(Default)]
pub struct PlainView {
    last: String,
}

impl PlainView {
    pub fn finish(&mut self) {
        println!();
    }
}

impl CountdownView for PlainView {
    fn render(&mut self, tick: &TickFrame) -> Result<()> {
        let line = status_line(tick);
        if line == self.last {
            return Ok(());
        }
        let mut stdout = io::stdout();
        write!(stdout, "\r{:<40}", line)?;
        stdout.flush()?;
        self.last = line;
        Ok(())
    }
}
