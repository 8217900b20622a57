#![forbid(unsafe_code)]

//! Differential compilation: turning a pair of [`Screen`]s into the
//! shortest plausible ANSI byte stream that transforms a terminal already
//! displaying the old frame into the new one.
//!
//! See spec §4.2 for the full algorithm; this module is a direct
//! transcription of it.

use crate::ansi;
use crate::buffer::Screen;
use crate::cell::Cell;

/// The constant term of the short-run threshold (spec §4.2 case 2, §9
/// open question (b)): rendering intervening cells is cheaper than a
/// cursor-move escape when the run is shorter than roughly the escape's
/// character cost.
const SHORT_RUN_BASE: i64 = 6;

/// Produce the minimal transform from `previous` to `self`. Falls back to
/// [`compile_full`] if `previous` is absent or has different dimensions.
pub(crate) fn compile(screen: &mut Screen, previous: Option<&Screen>) -> String {
    let previous = match previous {
        Some(p) if p.width() == screen.width() && p.height() == screen.height() => p,
        _ => return compile_full(screen),
    };

    let mut out = String::new();
    let (mut prev_fg, mut prev_bg) = previous.running_modes();
    let mut prev_pos: Option<(i64, i64)> = None;

    let changed = changed_coordinates(previous, screen);
    #[cfg(feature = "tracing")]
    tracing::trace!(changed_cells = changed.len(), "differential compile");

    for (x, y) in changed {
        match prev_pos {
            Some((px, py)) if y == py && x == px + 1 => {
                // Case 1: the terminal's own cursor advance gets us here.
                emit_cell(&mut out, cell_at(screen, x, y), &mut prev_fg, &mut prev_bg);
            }
            Some((px, py)) if y == py && x < px + short_run_threshold(x, y) => {
                // Case 2: re-emit every intervening cell; cheaper than a move.
                for fill_x in (px + 1)..=x {
                    emit_cell(
                        &mut out,
                        cell_at(screen, fill_x, y),
                        &mut prev_fg,
                        &mut prev_bg,
                    );
                }
            }
            Some((_, py)) if x == 0 && y == py + 1 => {
                // Case 3: a bare newline reaches column 0 of the next row.
                out.push('\n');
                emit_cell(&mut out, cell_at(screen, x, y), &mut prev_fg, &mut prev_bg);
            }
            Some((px, py)) if x == px + 1 && y == py + 1 => {
                // Case 4: vertical tab holds the column, drops one row.
                out.push('\x0b');
                emit_cell(&mut out, cell_at(screen, x, y), &mut prev_fg, &mut prev_bg);
            }
            _ => {
                // Case 5: no cheaper option — move explicitly.
                out.push_str(&ansi::move_to((y + 1) as u32, (x + 1) as u32));
                emit_cell(&mut out, cell_at(screen, x, y), &mut prev_fg, &mut prev_bg);
            }
        }
        prev_pos = Some((x, y));
    }

    screen.set_running_modes((prev_fg, prev_bg));
    out
}

/// Emit a full, non-differential frame: move to the origin, then every
/// cell row by row, rows separated by `\n` (no trailing newline).
pub(crate) fn compile_full(screen: &mut Screen) -> String {
    let mut out = String::new();
    out.push_str(&ansi::move_to(1, 1));
    let (mut prev_fg, mut prev_bg) = (None, None);

    let width = screen.width() as i64;
    let height = screen.height() as i64;
    for y in 0..height {
        for x in 0..width {
            emit_cell(&mut out, cell_at(screen, x, y), &mut prev_fg, &mut prev_bg);
        }
        if y + 1 < height {
            out.push('\n');
        }
    }

    screen.set_running_modes((prev_fg, prev_bg));
    out
}

fn cell_at(screen: &Screen, x: i64, y: i64) -> &Cell {
    screen
        .get(x, y)
        .expect("diff only ever addresses in-bounds coordinates")
}

/// The short-run threshold: `6 + [x > 9] + [y > 9]`.
fn short_run_threshold(x: i64, y: i64) -> i64 {
    SHORT_RUN_BASE + i64::from(x > 9) + i64::from(y > 9)
}

/// All `(x, y)` whose cell differs between `previous` and `current`, in
/// row-major (y then x) order.
fn changed_coordinates(previous: &Screen, current: &Screen) -> Vec<(i64, i64)> {
    let width = current.width() as i64;
    let height = current.height() as i64;
    let mut changed = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if cell_at(previous, x, y) != cell_at(current, x, y) {
                changed.push((x, y));
            }
        }
    }
    changed
}

/// Write one cell, emitting fg/bg SGR codes only when they differ from the
/// running modes (spec §4.2 `_emit_cell`).
fn emit_cell(
    out: &mut String,
    cell: &Cell,
    prev_fg: &mut Option<String>,
    prev_bg: &mut Option<String>,
) {
    if cell.fg != *prev_fg {
        match &cell.fg {
            Some(code) => out.push_str(code),
            None => out.push_str(&ansi::fg_default()),
        }
        *prev_fg = cell.fg.clone();
    }
    if cell.bg != *prev_bg {
        match &cell.bg {
            Some(code) => out.push_str(code),
            None => out.push_str(&ansi::bg_default()),
        }
        *prev_bg = cell.bg.clone();
    }
    out.push(cell.ch);
}
