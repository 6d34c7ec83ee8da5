//! Terminal front-end shared by the demo binaries: draws a [`Session`] with
//! crossterm and maps mouse and key events onto it.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use botnav_core::Coord;
use botnav_sim::{CellKind, Phase, Placement, Session, SessionError, SimConfig, Walker};

/// Terminal columns per grid cell.
const CELL_WIDTH: u16 = 2;
/// Idle poll timeout when no animation is running.
const IDLE_POLL: Duration = Duration::from_millis(250);
const BOT: &str = "🤖";

const COL_EMPTY: Color = Color::Rgb { r: 235, g: 235, b: 235 };
const COL_EMPTY_ALT: Color = Color::Rgb { r: 215, g: 215, b: 215 };
const COL_SOURCE: Color = Color::Rgb { r: 220, g: 60, b: 60 };
const COL_DESTINATION: Color = Color::Rgb { r: 60, g: 170, b: 80 };
const COL_OBSTACLE: Color = Color::Rgb { r: 30, g: 30, b: 30 };

/// Restores the terminal when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// The demo application: a session, the running animation and a status
/// message.
pub struct Demo {
    session: Session,
    walker: Option<Walker>,
    status: String,
    quit: bool,
}

impl Demo {
    pub fn new(config: SimConfig) -> Result<Self, SessionError> {
        let session = Session::new(config)?;
        Ok(Self {
            session,
            walker: None,
            status: String::new(),
            quit: false,
        })
    }

    fn animating(&self) -> bool {
        self.walker.as_ref().is_some_and(|w| !w.is_finished())
    }

    fn bot_position(&self) -> Option<Coord> {
        match &self.walker {
            Some(w) => w.position(),
            None => self.session.source(),
        }
    }

    /// Map a terminal cell to a grid coordinate.
    fn coord_at(&self, column: u16, row: u16) -> Option<Coord> {
        let c = Coord::new(row as i32, (column / CELL_WIDTH) as i32);
        self.session.grid().contains(c).then_some(c)
    }

    fn click(&mut self, c: Coord) {
        if self.walker.is_some() {
            return;
        }
        self.status = match self.session.click(c) {
            Ok(Placement::Source) => format!("source at {c}"),
            Ok(Placement::Destination) => format!("destination at {c}"),
            Ok(Placement::Obstacle { remaining }) => {
                format!("obstacle at {c}, {remaining} left")
            }
            Ok(Placement::Ignored) => return,
            Err(e) => e.to_string(),
        };
    }

    fn run(&mut self) {
        if self.animating() {
            return;
        }
        match self.session.run() {
            Ok(w) => {
                self.status = format!("moving {} steps", w.remaining());
                self.walker = Some(w);
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn scatter(&mut self) {
        if self.walker.is_some() {
            return;
        }
        let n = self.session.obstacles_remaining();
        let placed = self.session.scatter_obstacles(&mut rand::rng(), n);
        self.status = format!("scattered {placed} obstacles");
    }

    fn clear(&mut self) {
        self.session.clear();
        self.walker = None;
        self.status.clear();
    }

    fn handle(&mut self, ev: Event) {
        match ev {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                KeyCode::Char('r') | KeyCode::Enter => self.run(),
                KeyCode::Char('c') => self.clear(),
                KeyCode::Char('o') => self.scatter(),
                _ => {}
            },
            Event::Mouse(me) => {
                if let MouseEventKind::Down(MouseButton::Left) = me.kind {
                    if let Some(c) = self.coord_at(me.column, me.row) {
                        self.click(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        let Some(w) = self.walker.as_mut() else {
            return;
        };
        if w.advance(elapsed).is_empty() {
            return;
        }
        if w.is_finished() {
            self.status = "arrived".to_string();
        } else {
            self.status = format!("moving, {} steps left", w.remaining());
        }
    }

    fn phase_hint(&self) -> &'static str {
        match self.session.phase() {
            Phase::AwaitingSource => "click a cell to place the source",
            Phase::AwaitingDestination => "click a cell to place the destination",
            Phase::PlacingObstacles => "click cells to place obstacles, o: random, r: run",
            Phase::Ready => "r: run",
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let grid = self.session.grid();
        let n = grid.size();
        let bot = self.bot_position();
        for c in grid.coords() {
            let bg = match self.session.cell_kind(c) {
                Ok(CellKind::Source) => COL_SOURCE,
                Ok(CellKind::Destination) => COL_DESTINATION,
                Ok(CellKind::Obstacle) => COL_OBSTACLE,
                _ if (c.row + c.col) % 2 == 0 => COL_EMPTY,
                _ => COL_EMPTY_ALT,
            };
            let glyph = if bot == Some(c) { BOT } else { "  " };
            queue!(
                out,
                cursor::MoveTo(c.col as u16 * CELL_WIDTH, c.row as u16),
                SetBackgroundColor(bg),
                Print(glyph)
            )?;
        }
        let y = n as u16 + 1;
        queue!(
            out,
            ResetColor,
            cursor::MoveTo(0, y),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(&self.status),
            ResetColor,
            cursor::MoveTo(0, y + 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "[{}] {} | c: clear  q: quit",
                self.session.phase(),
                self.phase_hint()
            ))
        )?;
        out.flush()
    }

    /// Run the interactive loop until the user quits.
    pub fn run_terminal(mut self) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut stdout = io::stdout();
        let mut last = Instant::now();
        while !self.quit {
            self.draw(&mut stdout)?;
            let timeout = self
                .walker
                .as_ref()
                .and_then(Walker::until_next)
                .unwrap_or(IDLE_POLL);
            if event::poll(timeout)? {
                let ev = event::read()?;
                self.handle(ev);
            }
            let now = Instant::now();
            self.tick(now - last);
            last = now;
        }
        Ok(())
    }
}

/// Build a [`SimConfig`] from `[grid_size] [obstacles]` positional
/// arguments, falling back to the defaults.
pub fn config_from_args(mut args: impl Iterator<Item = String>) -> Result<SimConfig, String> {
    let mut cfg = SimConfig::default();
    if let Some(size) = args.next() {
        cfg.grid_size = size
            .parse()
            .map_err(|e| format!("invalid grid size {size:?}: {e}"))?;
    }
    if let Some(n) = args.next() {
        cfg.max_obstacles = n
            .parse()
            .map_err(|e| format!("invalid obstacle count {n:?}: {e}"))?;
    }
    cfg.validate().map_err(|e| e.to_string())?;
    Ok(cfg)
}
