//! ASCII line charts for terminal output.
//!
//! Fixed-size character grid with deterministic output (golden tests):
//! - the series: `-` segments joining observations marked `*`
//! - recessions: `:` filling the columns between peak and trough
//!
//! Missing observations break the line.

use chrono::NaiveDate;

use crate::data::{CycleDateProvider, CycleSpan, recession_spans};
use crate::domain::LabeledSeries;
use crate::error::AppError;
use crate::plot::{PlotOptions, Renderer};

const SHADE: char = ':';
const LINE: char = '-';
const POINT: char = '*';

pub struct AsciiRenderer {
    cycle_dates: Vec<CycleSpan>,
}

impl AsciiRenderer {
    pub fn new(provider: &impl CycleDateProvider) -> Self {
        Self {
            cycle_dates: provider.cycle_dates(),
        }
    }

    /// A renderer that never shades.
    pub fn plain() -> Self {
        Self {
            cycle_dates: Vec::new(),
        }
    }
}

impl Renderer for AsciiRenderer {
    fn draw_series(&self, series: &LabeledSeries, options: &PlotOptions) -> Result<String, AppError> {
        let width = options.width.max(10);
        let height = options.height.max(5);

        let points: Vec<(NaiveDate, f64)> =
            series.data.iter().filter_map(|&(d, v)| v.map(|v| (d, v))).collect();
        let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
            return Ok(format!("{} | {}\n(no observations)\n", series.title, series.date_range));
        };
        let Some((y_min, y_max)) = y_range(&points) else {
            return Ok(format!("{} | {}\n(all observations missing)\n", series.title, series.date_range));
        };
        let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

        let t_min = day_number(first);
        let t_max = day_number(last);
        let mut grid = vec![vec![' '; width]; height];

        if options.recessions {
            for (peak, trough) in recession_spans(&self.cycle_dates, first, last) {
                let x0 = map_x(day_number(peak), t_min, t_max, width);
                let x1 = map_x(day_number(trough), t_min, t_max, width);
                for row in grid.iter_mut() {
                    for cell in &mut row[x0..=x1] {
                        *cell = SHADE;
                    }
                }
            }
        }

        // Segments first so observation markers sit on top.
        let mut prev: Option<(usize, usize)> = None;
        let mut cells = Vec::with_capacity(points.len());
        for &(d, v) in &series.data {
            let Some(v) = v else {
                prev = None;
                continue;
            };
            let cell = (map_x(day_number(d), t_min, t_max, width), map_y(v, y_min, y_max, height));
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, cell.0, cell.1, LINE);
            }
            cells.push(cell);
            prev = Some(cell);
        }
        for (x, y) in cells {
            grid[y][x] = POINT;
        }

        let mut out = String::new();
        out.push_str(&format!(
            "{} | {} | y=[{y_min:.2}, {y_max:.2}] {}\n",
            series.title, series.date_range, series.units_short
        ));
        for row in grid {
            out.push_str(&row.into_iter().collect::<String>());
            out.push('\n');
        }
        Ok(out)
    }
}

fn day_number(d: NaiveDate) -> f64 {
    f64::from(chrono::Datelike::num_days_from_ce(&d))
}

fn y_range(points: &[(NaiveDate, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in points {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y { Some((min_y, max_y)) } else { Some((min_y - 1.0, max_y + 1.0)) }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    if t_max <= t_min {
        return 0;
    }
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = if y.is_finite() { ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0) } else { 1.0 };
    // Row 0 is the top of the chart.
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham). Overwrites blanks and shading only.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            let cell = &mut grid[y0 as usize][x0 as usize];
            if *cell == ' ' || *cell == SHADE {
                *cell = ch;
            }
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
