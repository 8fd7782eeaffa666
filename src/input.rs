//! Input handling: crossterm events become `Command`s, and `dispatch`
//! applies a command to the round.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use rand::Rng;

use crate::compute::{shoot, spawn_tick};
use crate::display::Viewport;
use crate::entities::{Point, RoundState};

/// A platform event reduced to what the game cares about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Primary button pressed at a point.
    Click(Point),
    PointerMoved(Point),
    /// The spawn timer fired.
    SpawnTick,
    Restart,
    /// Leave from the game-over screen.
    Exit,
    /// Quit signal; honoured in any state.
    Quit,
    Resize(u16, u16),
    Ignore,
}

/// What the game loop should do after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Start a fresh round.
    Restart,
    Terminate,
}

/// Map a crossterm event onto a command.
pub fn translate(event: &Event, viewport: &Viewport) -> Command {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, viewport),
        Event::Resize(cols, rows) => Command::Resize(*cols, *rows),
        _ => Command::Ignore,
    }
}

fn translate_key(key: &KeyEvent) -> Command {
    if key.kind == KeyEventKind::Release {
        return Command::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Esc => Command::Exit,
        _ => Command::Ignore,
    }
}

fn translate_mouse(mouse: &MouseEvent, viewport: &Viewport) -> Command {
    let at = viewport.cell_to_point(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Command::Click(at),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Command::PointerMoved(at),
        _ => Command::Ignore,
    }
}

/// Apply one command.  While the round runs, clicks and spawn ticks mutate
/// it; once it is over only restart, exit and quit do anything.
pub fn dispatch(
    state: &mut RoundState,
    pointer: &mut Point,
    command: Command,
    rng: &mut impl Rng,
) -> Flow {
    match command {
        Command::Quit => Flow::Terminate,
        Command::PointerMoved(at) => {
            *pointer = at;
            Flow::Continue
        }
        Command::Click(at) => {
            *pointer = at;
            *state = shoot(state, at);
            Flow::Continue
        }
        Command::SpawnTick => {
            *state = spawn_tick(state, rng);
            Flow::Continue
        }
        Command::Restart if state.is_over() => Flow::Restart,
        Command::Exit if state.is_over() => Flow::Terminate,
        Command::Restart | Command::Exit | Command::Resize(..) | Command::Ignore => Flow::Continue,
    }
}
