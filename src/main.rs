mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use swarm_shooter::compute::{fire_projectile, init_state, tick};
use swarm_shooter::config::Settings;
use swarm_shooter::entities::{GameState, GameStatus};
use swarm_shooter::error::Result;
use swarm_shooter::spawner::{spawn_enemy, SpawnTimer};
use swarm_shooter::surface::{paint_frame, Surface};

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: stdout belongs to the game screen.
fn init_logging(settings: &Settings) -> Result<()> {
    let file = File::create(settings.log_path())?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the user quits.
///
/// Input arrives on a channel fed by the reader thread and is drained
/// without blocking at the top of every frame.  Spawning follows wall-clock
/// time; everything else advances one step per frame.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    surface: &mut Surface,
    settings: &Settings,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let frame_budget = Duration::from_millis(settings.frame_ms);
    let mut spawner = SpawnTimer::new(Duration::from_millis(settings.spawn_interval_ms));
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) if state.status == GameStatus::Playing => {
                    let (x, y) = Surface::cell_center(column, row);
                    *state = fire_projectile(state, x, y);
                }
                Event::Resize(cols, rows) => {
                    debug!(cols, rows, "resize ignored, surface keeps its start-up size");
                }
                _ => {}
            }
        }

        // ── Simulation ────────────────────────────────────────────────────────
        if state.status == GameStatus::Playing {
            let due = spawner.advance(frame_start.duration_since(last_frame));
            for _ in 0..due {
                *state = spawn_enemy(state, &mut rng);
            }
            *state = tick(state, &mut rng);
        }
        last_frame = frame_start;

        paint_frame(surface, state, settings.fade_alpha);
        display::render(out, surface, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let settings = Settings::load()?;
    init_logging(&settings)?;
    info!(?settings, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &settings, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting");
    result?;
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    settings: &Settings,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    // Last row is reserved for the status line.
    let mut surface = Surface::new(cols, rows.saturating_sub(1));
    let (width, height) = surface.world_size();
    let mut state = init_state(width, height, settings.gameplay);
    info!(cols, rows, width, height, "surface ready");

    game_loop(out, &mut state, &mut surface, settings, rx)
}
