//! Terminal dashboard runner.
//!
//! The loop owns the view; a [`Ticker`] thread owns the collector and sends
//! whole snapshots over a channel. Input, snapshot intake and drawing all
//! happen on the calling thread, so nothing is shared.

use crate::color::ColorMode;
use crate::direct::{CellBuffer, DiffRenderer};
use crate::error::TuiError;
use crate::ui::{self, DashboardView, MIN_HEIGHT, MIN_WIDTH};
use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self as term, EnterAlternateScreen, LeaveAlternateScreen},
};
use folio_core::{Collector, DashboardSnapshot, Ticker};
use std::collections::VecDeque;
use std::io::{self, IsTerminal, Stdout, Write};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Screen the dashboard draws on.
///
/// [`CrosstermTerminal`] drives the real TTY; [`HeadlessTerminal`] replays
/// scripted input into any writer so the loop runs under test.
pub trait Terminal {
    /// Raw mode, alternate screen, hidden cursor.
    fn enter(&mut self) -> Result<(), TuiError>;
    /// Undo [`Terminal::enter`]. Every step runs even if an earlier one fails.
    fn leave(&mut self) -> Result<(), TuiError>;
    /// (width, height) in cells.
    fn size(&self) -> Result<(u16, u16), TuiError>;
    /// Next input event, waiting at most `timeout`.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<CrosstermEvent>, TuiError>;
    /// Write the dirty cells of `buffer`.
    fn present(&mut self, buffer: &mut CellBuffer, renderer: &mut DiffRenderer) -> Result<(), TuiError>;
}

/// Emit the escape sequences that enter or leave the dashboard screen.
fn switch_screen<W: Write>(out: &mut W, enter: bool) -> io::Result<()> {
    if enter {
        execute!(out, EnterAlternateScreen, cursor::Hide)
    } else {
        execute!(out, cursor::Show, LeaveAlternateScreen)
    }
}

/// The process's own terminal, through crossterm.
///
/// Restores the screen on drop if [`Terminal::leave`] was never reached.
pub struct CrosstermTerminal {
    stdout: Stdout,
    active: bool,
}

impl CrosstermTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            active: false,
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn enter(&mut self) -> Result<(), TuiError> {
        if !self.stdout.is_terminal() {
            return Err(TuiError::TerminalNotAvailable);
        }
        term::enable_raw_mode()?;
        self.active = true;
        switch_screen(&mut self.stdout, true)?;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TuiError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let screen = switch_screen(&mut self.stdout, false);
        let raw = term::disable_raw_mode();
        screen.and(raw).map_err(TuiError::from)
    }

    fn size(&self) -> Result<(u16, u16), TuiError> {
        Ok(term::size()?)
    }

    fn next_event(&mut self, timeout: Duration) -> Result<Option<CrosstermEvent>, TuiError> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    fn present(&mut self, buffer: &mut CellBuffer, renderer: &mut DiffRenderer) -> Result<(), TuiError> {
        renderer.flush(buffer, &mut self.stdout)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// One step of scripted input for [`HeadlessTerminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    /// The wait times out with no input.
    Idle,
    Event(CrosstermEvent),
    /// Reading input fails.
    Error,
}

impl ScriptedInput {
    /// Key press without modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::Event(CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }
}

/// Terminal over an arbitrary writer with scripted input.
///
/// Once the script runs out every wait reports no input.
pub struct HeadlessTerminal<W: Write> {
    out: W,
    size: (u16, u16),
    active: bool,
    script: VecDeque<ScriptedInput>,
}

impl<W: Write> HeadlessTerminal<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            size: (width, height),
            active: false,
            script: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn with_input(mut self, input: impl IntoIterator<Item = ScriptedInput>) -> Self {
        self.script.extend(input);
        self
    }

    /// Change the reported size, as a resize would.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    /// Between `enter` and `leave`.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Everything written so far, escape sequences included.
    pub const fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for HeadlessTerminal<W> {
    fn enter(&mut self) -> Result<(), TuiError> {
        self.active = true;
        switch_screen(&mut self.out, true)?;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TuiError> {
        self.active = false;
        switch_screen(&mut self.out, false)?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), TuiError> {
        Ok(self.size)
    }

    fn next_event(&mut self, _timeout: Duration) -> Result<Option<CrosstermEvent>, TuiError> {
        match self.script.pop_front() {
            None | Some(ScriptedInput::Idle) => Ok(None),
            Some(ScriptedInput::Event(event)) => Ok(Some(event)),
            Some(ScriptedInput::Error) => Err(TuiError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "scripted input failure",
            ))),
        }
    }

    fn present(&mut self, buffer: &mut CellBuffer, renderer: &mut DiffRenderer) -> Result<(), TuiError> {
        renderer.flush(buffer, &mut self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiConfig {
    /// Input poll timeout while animations run.
    pub frame_ms: u64,
    /// Input poll timeout once the screen only changes on ticks.
    pub idle_ms: u64,
    pub color_mode: ColorMode,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            frame_ms: 33,
            idle_ms: 250,
            color_mode: ColorMode::detect(),
        }
    }
}

/// Interactive dashboard state.
pub struct DashboardApp {
    view: DashboardView,
    config: TuiConfig,
    started: Instant,
    frames: u64,
}

impl DashboardApp {
    #[must_use]
    pub fn new(view: DashboardView, config: TuiConfig) -> Self {
        Self {
            view,
            config,
            started: Instant::now(),
            frames: 0,
        }
    }

    #[must_use]
    pub const fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Frames drawn so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns true when the key quits.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.view.apply_snapshot(snapshot);
    }

    /// Run against `terminal`, collecting every `interval` on a ticker thread.
    ///
    /// The ticker is stopped before the terminal is restored, so no
    /// snapshot arrives after the screen is handed back.
    pub fn run_with_terminal<T, C>(
        &mut self,
        terminal: &mut T,
        collector: C,
        interval: Duration,
    ) -> Result<(), TuiError>
    where
        T: Terminal,
        C: Collector<Snapshot = DashboardSnapshot>,
    {
        let (tx, rx) = mpsc::channel();
        let mut ticker = Ticker::spawn(collector, interval, tx)?;

        if let Err(e) = terminal.enter() {
            ticker.stop();
            return Err(e);
        }
        tracing::debug!(interval_ms = interval.as_millis() as u64, "dashboard started");
        let result = self.run_loop(terminal, &rx);

        ticker.stop();
        let restored = terminal.leave();
        tracing::debug!(frames = self.frames, "dashboard stopped");
        result.and(restored)
    }

    /// Run on the real terminal.
    pub fn run<C>(&mut self, collector: C, interval: Duration) -> Result<(), TuiError>
    where
        C: Collector<Snapshot = DashboardSnapshot>,
    {
        self.run_with_terminal(&mut CrosstermTerminal::new(), collector, interval)
    }

    fn run_loop<T: Terminal>(
        &mut self,
        terminal: &mut T,
        snapshots: &Receiver<DashboardSnapshot>,
    ) -> Result<(), TuiError> {
        let (width, height) = terminal.size()?;
        let mut front = CellBuffer::new(width, height);
        let mut frame = CellBuffer::new(width, height);
        let mut renderer = DiffRenderer::with_color_mode(self.config.color_mode);
        front.mark_all_dirty();

        loop {
            let (width, height) = terminal.size()?;
            if width != frame.width() || height != frame.height() {
                frame.resize(width, height);
                renderer.reset();
            }

            while let Ok(snapshot) = snapshots.try_recv() {
                self.view.apply_snapshot(snapshot);
            }

            let elapsed = self.started.elapsed();
            ui::draw(&self.view, &mut frame, elapsed);
            front.sync_from(&frame);
            terminal.present(&mut front, &mut renderer)?;
            self.frames += 1;

            let timeout = if self.view.is_animating(elapsed) {
                self.config.frame_ms
            } else {
                self.config.idle_ms
            };
            if let Some(CrosstermEvent::Key(key)) = terminal.next_event(Duration::from_millis(timeout))? {
                if key.kind == KeyEventKind::Press && self.handle_key(key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
}

/// Draw a single frame as plain text, no escape sequences.
pub fn render_once<W: Write>(
    view: &DashboardView,
    width: u16,
    height: u16,
    elapsed: Duration,
    out: &mut W,
) -> Result<(), TuiError> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(TuiError::TooSmall {
            width,
            height,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        });
    }
    let mut buffer = CellBuffer::new(width, height);
    ui::draw(view, &mut buffer, elapsed);
    for y in 0..height {
        writeln!(out, "{}", buffer.row_text(y))?;
    }
    out.flush()?;
    Ok(())
}
