use crate::biomorph::{Biomorph, GENE_COUNT, OFFSPRING_COUNT};
use crate::colors::{scheme_color, ColorState};
use crate::config::ExplorerConfig;
use crate::help::show_help_modal;
use crate::render;
use crate::terminal::{rgb, Terminal};
use crossterm::event::KeyCode;
use crossterm::style::Color;
use rand::prelude::*;
use std::f64::consts::TAU;
use std::io;

const HELP: &str = "\
BIOMORPH EXPLORER
─────────────────
h/← l/→  Select offspring
Enter    Breed from selection
r        New random parent
)!@#$    Color scheme
q/Esc    Quit
?        Close help";

// Layout in terminal cells. A cell is roughly twice as tall as it is
// wide, so x distances get doubled to look square on screen.
const CELL_ASPECT: f64 = 2.0;
// Ring of offspring around the parent, pushed right of centre to leave
// room for the gene readout.
const RING_CENTRE_X: f64 = 0.62;
const PARENT_DIVISOR: f64 = 5.0;
const CHILD_DIVISOR: f64 = 14.0;
// Shapes spanning less than this in abstract units are treated as this
// big, so near-degenerate biomorphs don't get blown up to full panel.
const MIN_ABSTRACT_SPAN: f64 = 100.0;

/// Screen-space region one biomorph is drawn into
#[derive(Clone, Copy)]
struct Panel {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Panel {
    fn centre(&self) -> (f64, f64) {
        (
            self.x as f64 + self.w as f64 / 2.0,
            self.y as f64 + self.h as f64 / 2.0,
        )
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// Run the biomorph explorer
pub fn run(config: ExplorerConfig) -> io::Result<()> {
    let seed = config.seed.unwrap_or_else(now_secs);

    if config.print {
        run_print_mode(&config, seed)
    } else {
        run_interactive(&config, seed)
    }
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0) // Fallback seed for misconfigured system clocks
}

fn new_parent(rng: &mut StdRng) -> io::Result<Biomorph> {
    // Gene bounds are constants; a failure here is a startup bug, not a
    // runtime condition.
    let mut parent =
        Biomorph::new().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    parent.randomize(rng);
    Ok(parent)
}

fn run_print_mode(config: &ExplorerConfig, seed: u64) -> io::Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let parent = new_parent(&mut rng)?;

    let mut term = Terminal::new(false)?;
    let (width, height) = term.size();
    let panel = Panel {
        x: 0,
        y: 0,
        w: width as i32,
        h: height as i32,
    };

    draw_biomorph(&mut term, panel, &parent, config, &ColorState::new(config.scheme), 1);
    term.print_to_stdout()
}

fn run_interactive(config: &ExplorerConfig, initial_seed: u64) -> io::Result<()> {
    let mut rng = StdRng::seed_from_u64(initial_seed);
    let mut parent = new_parent(&mut rng)?;
    let mut offspring = parent.generate_offspring();
    let mut selected: usize = 0;
    let mut colors = ColorState::new(config.scheme);

    let mut term = Terminal::new(true)?;
    term.clear_screen()?;

    loop {
        draw_frame(&mut term, config, &colors, &parent, &offspring, selected);
        term.render()?;

        let Some(code) = term.wait_key(250)? else {
            continue;
        };

        if colors.handle_key(code) {
            continue;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('?') => {
                if show_help_modal(&mut term, HELP)? {
                    break;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                selected = (selected + OFFSPRING_COUNT - 1) % OFFSPRING_COUNT;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                selected = (selected + 1) % OFFSPRING_COUNT;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                // The chosen offspring becomes the next parent.
                parent = offspring.swap_remove(selected);
                offspring = parent.generate_offspring();
                selected = 0;
            }
            KeyCode::Char('r') => {
                rng = StdRng::seed_from_u64(now_secs());
                parent.randomize(&mut rng);
                offspring = parent.generate_offspring();
                selected = 0;
            }
            _ => {}
        }
    }

    Ok(())
}

fn draw_frame(
    term: &mut Terminal,
    config: &ExplorerConfig,
    colors: &ColorState,
    parent: &Biomorph,
    offspring: &[Biomorph],
    selected: usize,
) {
    term.clear();

    let (width, height) = term.size();
    let w = width as f64;
    let h = height as f64;

    let parent_w = (w / PARENT_DIVISOR) as i32;
    let parent_h = ((parent_w as f64 / CELL_ASPECT) as i32).max(3);
    let child_w = ((w / CHILD_DIVISOR) as i32).max(4);
    let child_h = ((child_w as f64 / CELL_ASPECT) as i32).max(2);

    let ring_x = w * RING_CENTRE_X;
    let ring_y = h / 2.0;
    // Fit the ring vertically, then widen it by the cell aspect and cap
    // it so child panels stay on screen.
    let radius_y = (ring_y - child_h as f64 - 1.0).max(1.0);
    let radius_x = (radius_y * CELL_ASPECT).min(w - ring_x - child_w as f64 - 1.0);

    let parent_panel = Panel {
        x: (ring_x - parent_w as f64 / 2.0) as i32,
        y: (ring_y - parent_h as f64 / 2.0) as i32,
        w: parent_w,
        h: parent_h,
    };
    draw_biomorph(term, parent_panel, parent, config, colors, 2);

    for (k, child) in offspring.iter().enumerate() {
        let angle = k as f64 * TAU / OFFSPRING_COUNT as f64;
        let panel = Panel {
            x: (ring_x + radius_x * angle.cos() - child_w as f64 / 2.0) as i32,
            y: (ring_y + radius_y * angle.sin() - child_h as f64 / 2.0) as i32,
            w: child_w,
            h: child_h,
        };

        if k == selected {
            draw_border(term, panel, scheme_color(colors.scheme, 3));
        }
        draw_biomorph(term, panel, child, config, colors, 1);
    }

    // Parent gene readout, one line per gene, plus the hint naming the
    // mutation behind the selected offspring.
    let text = scheme_color(colors.scheme, 0);
    for i in 0..GENE_COUNT {
        term.set_str(1, 1 + i as i32, &parent.gene(i).to_string(), Some(text), false);
    }
    term.set_str(
        1,
        GENE_COUNT as i32 + 2,
        &parent.offspring_hint(selected),
        Some(scheme_color(colors.scheme, 2)),
        true,
    );
}

/// Scale a biomorph's abstract render into a panel and rasterize it.
fn draw_biomorph(
    term: &mut Terminal,
    panel: Panel,
    biomorph: &Biomorph,
    config: &ExplorerConfig,
    colors: &ColorState,
    intensity: u8,
) {
    let rendered = render::generate(biomorph);

    let abstract_w = rendered.extent.width().max(MIN_ABSTRACT_SPAN);
    let abstract_h = rendered.extent.height().max(MIN_ABSTRACT_SPAN);

    // Uniform scale preserving shape aspect; x carries the cell
    // correction so the result looks square on screen.
    let scale = (panel.w as f64 / (abstract_w * CELL_ASPECT)).min(panel.h as f64 / abstract_h);
    let (cx, cy) = panel.centre();

    let bold = intensity >= 2;
    for line in &rendered.lines {
        let x0 = cx + line.x0 * scale * CELL_ASPECT;
        let y0 = cy + line.y0 * scale;
        let x1 = cx + line.x1 * scale * CELL_ASPECT;
        let y1 = cy + line.y1 * scale;

        let ch = config
            .line_char
            .unwrap_or_else(|| segment_char(x1 - x0, y1 - y0));
        let color = if colors.is_mono() {
            // Mono passes the renderer's own segment grey through.
            rgb(line.color)
        } else {
            scheme_color(colors.scheme, intensity)
        };

        plot_segment(
            term,
            panel,
            x0.round() as i32,
            y0.round() as i32,
            x1.round() as i32,
            y1.round() as i32,
            ch,
            color,
            bold,
        );
    }
}

/// Pick a glyph from the segment's on-screen direction
fn segment_char(dx: f64, dy: f64) -> char {
    if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if dx.abs() > 2.0 * dy.abs() {
        '~'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Bresenham line onto the cell grid, clipped to the panel
fn plot_segment(
    term: &mut Terminal,
    panel: Panel,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    ch: char,
    color: Color,
    bold: bool,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if panel.contains(x0, y0) {
            term.set(x0, y0, ch, Some(color), bold);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Box just outside a panel, marking the selected offspring
fn draw_border(term: &mut Terminal, panel: Panel, color: Color) {
    let x0 = panel.x - 1;
    let y0 = panel.y - 1;
    let x1 = panel.x + panel.w;
    let y1 = panel.y + panel.h;

    for x in panel.x..panel.x + panel.w {
        term.set(x, y0, '─', Some(color), true);
        term.set(x, y1, '─', Some(color), true);
    }
    for y in panel.y..panel.y + panel.h {
        term.set(x0, y, '│', Some(color), true);
        term.set(x1, y, '│', Some(color), true);
    }
    term.set(x0, y0, '┌', Some(color), true);
    term.set(x1, y0, '┐', Some(color), true);
    term.set(x0, y1, '└', Some(color), true);
    term.set(x1, y1, '┘', Some(color), true);
}
