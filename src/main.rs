use std::io::{stdout, BufWriter, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    terminal, ExecutableCommand,
};
use rand::{thread_rng, Rng};

use shooting_gallery::compute::{init_state, tick};
use shooting_gallery::display::TerminalCanvas;
use shooting_gallery::entities::Point;
use shooting_gallery::input::{dispatch, translate, Command, Flow};
use shooting_gallery::render::draw_frame;
use shooting_gallery::timer::SpawnTimer;
use shooting_gallery::{logging, Settings};

/// How a round loop ended.
enum Outcome {
    Restart,
    Quit,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Play one round until it is restarted or the player leaves.
///
/// Each frame: drain pending input without blocking, fire the spawn timer,
/// advance the simulation, draw, then sleep out the rest of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    canvas: &mut TerminalCanvas,
    settings: &Settings,
    rng: &mut impl Rng,
) -> std::io::Result<Outcome> {
    let mut state = init_state(settings);
    let started = Instant::now();
    let mut spawn_timer = SpawnTimer::new(state.difficulty.spawn_interval(), started);
    let mut pointer = Point::center();
    let frame_time = settings.frame_time();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut commands = Vec::new();
        while event::poll(Duration::ZERO)? {
            commands.push(translate(&event::read()?, &canvas.viewport()));
        }
        if spawn_timer.fire(frame_start) {
            commands.push(Command::SpawnTick);
        }

        for command in commands {
            if let Command::Resize(cols, rows) = command {
                canvas.resize(cols, rows);
                continue;
            }
            match dispatch(&mut state, &mut pointer, command, rng) {
                Flow::Continue => {}
                Flow::Restart => return Ok(Outcome::Restart),
                Flow::Terminate => return Ok(Outcome::Quit),
            }
        }

        // ── Simulation ────────────────────────────────────────────────────────
        if !state.is_over() {
            state = tick(&state, started.elapsed());
            spawn_timer.sync(state.difficulty.spawn_interval(), frame_start);
        }

        draw_frame(canvas, &state, pointer);
        canvas.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init()?;
    let settings = Settings::load();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    let result = setup_terminal(&mut out).and_then(|()| run(&mut out, &settings));

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("Fatal: {:#}", err);
    }
    result
}

fn setup_terminal<W: Write>(out: &mut W) -> anyhow::Result<()> {
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter the alternate screen")?;
    out.execute(cursor::Hide).context("failed to hide the cursor")?;
    out.execute(EnableMouseCapture)
        .context("failed to enable mouse capture")?;
    Ok(())
}

fn run<W: Write>(out: &mut W, settings: &Settings) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size().context("failed to read the terminal size")?;
    let mut canvas = TerminalCanvas::new(cols, rows);
    let mut rng = thread_rng();

    loop {
        match game_loop(out, &mut canvas, settings, &mut rng)? {
            Outcome::Restart => log::info!("Restarting"),
            Outcome::Quit => break,
        }
    }
    log::info!("Bye");
    Ok(())
}
