//! Interactive terminal front end. Reads session state for drawing and turns
//! keys and mouse events into session calls; owns no simulation logic.

use crate::config::SandboxConfig;
use crate::help::{render_help_overlay, SANDBOX_HELP};
use crate::sim::{library, Command, DrawMode, Session};
use crate::terminal::{rgb, Cell, Terminal};
use crate::theme::{self, Theme};
use crate::view::View;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::io;
use std::time::{Duration, Instant};

/// Rows reserved for the status panel at the bottom of the screen.
const STATUS_ROWS: u16 = 2;
const FRAME: Duration = Duration::from_millis(16);
const MESSAGE_TTL: Duration = Duration::from_secs(4);

/// What a key press asks the front end to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Session(Command),
    ToggleHelp,
    CycleTheme,
    NextPattern,
    PrevPattern,
    Pan(isize, isize),
    ZoomIn,
    ZoomOut,
}

/// Maps a key press to an action.
pub fn key_action(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('s') => Some(Action::Session(Command::Save)),
            KeyCode::Char('l') => Some(Action::Session(Command::Load)),
            KeyCode::Char('z') => Some(Action::Session(Command::Undo)),
            KeyCode::Char('y') => Some(Action::Session(Command::Redo)),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char(' ') => Action::Session(Command::PlayPause),
        KeyCode::Char('.') | KeyCode::Char('n') => Action::Session(Command::Step),
        KeyCode::Char('c') => Action::Session(Command::Clear),
        KeyCode::Char('r') => Action::Session(Command::Random),
        KeyCode::Char('u') => Action::Session(Command::Undo),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Session(Command::SpeedUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Action::Session(Command::SpeedDown),
        KeyCode::Char('e') => Action::Session(Command::ToggleDrawMode),
        KeyCode::Char('o') => Action::Session(Command::RotatePattern),
        KeyCode::Char('f') => Action::Session(Command::FlipPattern),
        KeyCode::Esc => Action::Session(Command::CancelPattern),
        KeyCode::Char('t') => Action::CycleTheme,
        KeyCode::Char('p') => Action::NextPattern,
        KeyCode::Char('P') => Action::PrevPattern,
        KeyCode::Char(']') => Action::ZoomIn,
        KeyCode::Char('[') => Action::ZoomOut,
        KeyCode::Left => Action::Pan(-1, 0),
        KeyCode::Right => Action::Pan(1, 0),
        KeyCode::Up => Action::Pan(0, -1),
        KeyCode::Down => Action::Pan(0, 1),
        _ => return None,
    };
    Some(action)
}

/// Front-end state that is not part of the simulation.
pub struct Controls {
    pub view: View,
    pub show_help: bool,
    pattern_index: Option<usize>,
    pointer: Option<(u16, u16)>,
    message: Option<(String, Instant)>,
}

impl Controls {
    pub fn new(cell_width: u16) -> Self {
        Self {
            view: View::new(cell_width),
            show_help: false,
            pattern_index: None,
            pointer: None,
            message: None,
        }
    }

    /// Steps through the library, wrapping in both directions.
    pub fn cycle_pattern(&mut self, forward: bool) -> Option<&'static str> {
        let count = library::all().len();
        if count == 0 {
            return None;
        }
        let next = match (self.pattern_index, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.pattern_index = Some(next);
        library::all().get(next).map(|p| p.name())
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.message = Some((message.into(), Instant::now()));
    }

    fn current_message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < MESSAGE_TTL)
            .map(|(m, _)| m.as_str())
    }
}

/// Applies an action. Returns true when the user asked to quit.
pub fn perform(session: &mut Session, controls: &mut Controls, action: Action) -> bool {
    match action {
        Action::Quit => return true,
        Action::ToggleHelp => controls.show_help = !controls.show_help,
        Action::CycleTheme => {
            session.cycle_theme();
            controls.notify(format!("Theme: {}", session.theme().name));
        }
        Action::NextPattern => return select_cycled(session, controls, true),
        Action::PrevPattern => return select_cycled(session, controls, false),
        Action::Pan(dc, dr) => controls.view.pan(dc * 4, dr * 2),
        Action::ZoomIn => controls.view.zoom_in(),
        Action::ZoomOut => controls.view.zoom_out(),
        Action::Session(command) => {
            let label = match &command {
                Command::Save => Some(format!("Saved to {}", session.save_path().display())),
                Command::Load => Some(format!("Loaded {}", session.save_path().display())),
                _ => None,
            };
            match session.apply(command) {
                Ok(()) => {
                    if let Some(label) = label {
                        controls.notify(label);
                    }
                }
                Err(e) => {
                    log::warn!("{}", e);
                    controls.notify(format!("Error: {}", e));
                }
            }
        }
    }
    false
}

fn select_cycled(session: &mut Session, controls: &mut Controls, forward: bool) -> bool {
    match controls.cycle_pattern(forward) {
        Some(name) => perform(session, controls, Action::Session(Command::SelectPattern(name.to_string()))),
        None => false,
    }
}

/// Routes a mouse event inside the grid area to the session.
pub fn handle_mouse(session: &mut Session, controls: &mut Controls, event: MouseEvent, grid_rows: u16) {
    controls.pointer = Some((event.column, event.row));
    let in_area = event.row < grid_rows;
    let (row, col) = controls.view.screen_to_grid(event.column, event.row);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) if in_area => {
            // A press always starts a new gesture, even if the last release was missed
            session.end_stroke();
            if session.selected_pattern().is_some() {
                session.place_selected(row, col);
            } else if row >= 0 && col >= 0 {
                session.draw_on_grid(row as usize, col as usize);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if in_area && session.stroke_active() => {
            if row >= 0 && col >= 0 {
                session.draw_on_grid(row as usize, col as usize);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => session.end_stroke(),
        MouseEventKind::Down(MouseButton::Right) => {
            let _ = session.apply(Command::CancelPattern);
        }
        MouseEventKind::ScrollUp => controls.view.zoom_in(),
        MouseEventKind::ScrollDown => controls.view.zoom_out(),
        _ => {}
    }
}

fn draw(term: &mut Terminal, session: &Session, controls: &Controls) {
    let theme: &Theme = session.theme();
    let (width, height) = term.size();
    let grid_rows = height.saturating_sub(STATUS_ROWS);
    term.clear(Some(rgb(theme.background)));

    let view = &controls.view;
    let grid = session.grid();
    let (alive, dead) = (Some(rgb(theme.alive)), Some(rgb(theme.dead)));
    for y in 0..grid_rows {
        for x in 0..width {
            let (row, col) = view.screen_to_grid(x, y);
            if !grid.contains(row, col) {
                continue;
            }
            let bg = if grid.get(row as usize, col as usize) { alive } else { dead };
            term.set(x as i32, y as i32, Cell { bg, ..Cell::default() });
        }
    }

    // Ghost of the selected pattern under the pointer
    if let (Some(pattern), Some((px, py))) = (session.selected_pattern(), controls.pointer) {
        let (row, col) = view.screen_to_grid(px, py);
        let (anchor_row, anchor_col) = pattern.centered_anchor(row, col);
        for (dr, dc) in pattern.live_cells() {
            let (r, c) = (anchor_row + dr as isize, anchor_col + dc as isize);
            if r < 0 || c < 0 {
                continue;
            }
            if let Some((x, y)) = view.grid_to_screen(r as usize, c as usize) {
                if y < grid_rows as i32 {
                    for dx in 0..view.cell_width as i32 {
                        term.set(x + dx, y, Cell { bg: Some(rgb(theme.accent)), ..Cell::default() });
                    }
                }
            }
        }
    }

    draw_status(term, session, controls, grid_rows);

    if controls.show_help {
        render_help_overlay(term, SANDBOX_HELP, rgb(theme.accent), rgb(theme.text), rgb(theme.panel));
    }
}

fn draw_status(term: &mut Terminal, session: &Session, controls: &Controls, top: u16) {
    let theme = session.theme();
    let panel = Some(rgb(theme.panel));
    let text = Some(rgb(theme.text));
    let accent = Some(rgb(theme.accent));
    let stats = session.stats();
    let grid = session.grid();

    term.fill_row(top as i32, panel);
    term.fill_row(top as i32 + 1, panel);

    let counters = format!(
        " Gen {}  Pop {}  Max {}  Births {}  Deaths {}  Density {:.1}%  Time {:.1}s",
        stats.generation,
        stats.population,
        stats.max_population,
        stats.births,
        stats.deaths,
        stats.density(grid.width() * grid.height()),
        stats.runtime.as_secs_f32(),
    );
    term.set_str(0, top as i32, &counters, text, false);

    let line = match controls.current_message() {
        Some(message) => format!(" {}", message),
        None => format!(
            " {}  {}/s  {}  Pattern: {}  Theme: {}  {}  Undo {} Redo {}  ? help",
            if session.is_running() { "RUNNING" } else { "PAUSED" },
            session.speed(),
            match session.draw_mode() {
                DrawMode::Draw => "Draw",
                DrawMode::Erase => "Erase",
            },
            session.selected_pattern().map_or("-", |p| p.name()),
            session.theme().name,
            session.boundary().name(),
            session.history().undo_depth(),
            session.history().redo_depth(),
        ),
    };
    term.set_str(0, top as i32 + 1, &line, accent, true);
}

/// Runs the interactive sandbox until the user quits.
pub fn run(config: SandboxConfig, pattern: Option<String>, load: bool) -> io::Result<()> {
    let mut session = Session::new(&config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut controls = Controls::new(config.cell_width);

    if theme::lookup(&config.theme).is_none() {
        controls.notify(format!("Unknown theme {}, using {}", config.theme, session.theme().name));
    }
    if let Some(name) = pattern {
        perform(&mut session, &mut controls, Action::Session(Command::SelectPattern(name)));
    }
    if load {
        perform(&mut session, &mut controls, Action::Session(Command::Load));
    }

    let mut term = Terminal::new()?;
    term.clear_screen()?;
    let (width, height) = term.size();
    controls
        .view
        .center_on(config.width, config.height, width, height.saturating_sub(STATUS_ROWS));
    log::info!("sandbox started: {}x{} {}", config.width, config.height, config.boundary.name());

    loop {
        let mut timeout = FRAME;
        while let Some(event) = term.poll_event(timeout)? {
            timeout = Duration::ZERO;
            match event {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if controls.show_help && matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                        controls.show_help = false;
                        continue;
                    }
                    if let Some(action) = key_action(key.code, key.modifiers) {
                        if perform(&mut session, &mut controls, action) {
                            log::info!("sandbox closed at generation {}", session.stats().generation);
                            return Ok(());
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    let grid_rows = term.size().1.saturating_sub(STATUS_ROWS);
                    handle_mouse(&mut session, &mut controls, mouse, grid_rows);
                }
                Event::Resize(w, h) => {
                    term.resize(w, h);
                    term.clear_screen()?;
                }
                _ => {}
            }
        }

        session.tick(Instant::now());
        draw(&mut term, &session, &controls);
        term.render()?;
    }
}
