//! Terminal presenter: the only place that writes to stdout.
//!
//! The simulation paints into a `Surface`; this module only copies that
//! raster to the terminal as background-coloured cells and adds the text
//! overlays.  No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use swarm_shooter::entities::{GameState, GameStatus, Rgb};
use swarm_shooter::surface::Surface;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HINT: Color = Color::DarkGrey;
const C_COUNTS: Color = Color::Grey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Present one complete frame.  The surface fills rows `0..surface.rows()`;
/// the row below it holds the controls hint.
pub fn render<W: Write>(out: &mut W, surface: &Surface, state: &GameState) -> std::io::Result<()> {
    draw_surface(out, surface)?;
    draw_status_line(out, surface, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, surface)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, surface.rows()))?;
    out.flush()?;
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }
}

// ── Raster ────────────────────────────────────────────────────────────────────

fn draw_surface<W: Write>(out: &mut W, surface: &Surface) -> std::io::Result<()> {
    for row in 0..surface.rows() {
        out.queue(cursor::MoveTo(0, row))?;
        // Only switch colour when it changes along the row.
        let mut current: Option<Rgb> = None;
        for col in 0..surface.cols() {
            let pixel = surface.pixel(col, row);
            if current != Some(pixel) {
                out.queue(style::SetBackgroundColor(to_color(pixel)))?;
                current = Some(pixel);
            }
            out.queue(Print(' '))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Status line (last row) ────────────────────────────────────────────────────

fn draw_status_line<W: Write>(
    out: &mut W,
    surface: &Surface,
    state: &GameState,
) -> std::io::Result<()> {
    let row = surface.rows();
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(Print(" ".repeat(surface.cols() as usize)))?;

    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("CLICK : Shoot   Q : Quit"))?;

    let counts = format!(
        "enemies {:>3}  shots {:>3}  particles {:>4}",
        state.enemies.len(),
        state.projectiles.len(),
        state.particles.len()
    );
    let col = surface
        .cols()
        .saturating_sub(counts.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_COUNTS))?;
    out.queue(Print(&counts))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, surface: &Surface) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        ("Q - Quit", Color::White),
    ];

    let cx = surface.cols() / 2;
    let start_row = (surface.rows() / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetBackgroundColor(Color::Black))?;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
