//! The fixed shape catalogue.
//!
//! Center shapes fill the inner 2×2 cells, outer shapes the sides and
//! corners. Every shape is drawn in cell-local coordinates; the caller
//! has already set the transform for the target cell.

use super::graphics::Graphics;

/// Number of center shapes.
pub const CENTER_SHAPES: usize = 14;

/// Number of outer shapes.
pub const OUTER_SHAPES: usize = 4;

/// Draw center shape `index` (taken modulo [`CENTER_SHAPES`]).
///
/// `position` is the index of the cell within its group; shape 13 only
/// draws in the first cell.
pub fn center_shape(index: usize, g: &mut Graphics, cell: f32, position: usize) {
    match index % CENTER_SHAPES {
        0 => {
            let k = cell * 0.42;
            g.add_polygon(
                &[0.0, 0.0, cell, 0.0, cell, cell - k * 2.0, cell - k, cell, 0.0, cell],
                false,
            );
        }
        1 => {
            let w = (cell * 0.5).trunc();
            let h = (cell * 0.8).trunc();
            g.add_triangle(cell - w, 0.0, w, h, 2, false);
        }
        2 => {
            let w = (cell / 3.0).trunc();
            g.add_rectangle(w, w, cell - w, cell - w, false);
        }
        3 => {
            let inner = cell * 0.1;
            // Fixed border widths keep the border visible in small icons
            let outer = if cell < 6.0 {
                1.0
            } else if cell < 8.0 {
                2.0
            } else {
                (cell * 0.25).trunc()
            };
            let inner = if inner > 1.0 {
                inner.trunc()
            } else if inner > 0.5 {
                1.0
            } else {
                inner
            };
            g.add_rectangle(
                outer,
                outer,
                cell - inner - outer,
                cell - inner - outer,
                false,
            );
        }
        4 => {
            let m = (cell * 0.15).trunc();
            let w = (cell * 0.5).trunc();
            g.add_circle(cell - w - m, cell - w - m, w, false);
        }
        5 => {
            let inner = cell * 0.1;
            let mut outer = inner * 4.0;
            if outer > 3.0 {
                outer = outer.trunc();
            }
            g.add_rectangle(0.0, 0.0, cell, cell, false);
            g.add_polygon(
                &[
                    outer,
                    outer,
                    cell - inner,
                    outer,
                    outer + (cell - outer - inner) / 2.0,
                    cell - inner,
                ],
                true,
            );
        }
        6 => {
            g.add_polygon(
                &[
                    0.0,
                    0.0,
                    cell,
                    0.0,
                    cell,
                    cell * 0.7,
                    cell * 0.4,
                    cell * 0.4,
                    cell * 0.7,
                    cell,
                    0.0,
                    cell,
                ],
                false,
            );
        }
        7 | 11 => {
            let half = cell / 2.0;
            g.add_triangle(half, half, half, half, 3, false);
        }
        8 => {
            let half = cell / 2.0;
            g.add_rectangle(0.0, 0.0, cell, half, false);
            g.add_rectangle(0.0, half, half, half, false);
            g.add_triangle(half, half, half, half, 1, false);
        }
        9 => {
            let inner = cell * 0.14;
            let outer = if cell < 4.0 {
                1.0
            } else if cell < 6.0 {
                2.0
            } else {
                (cell * 0.35).trunc()
            };
            let inner = if cell < 8.0 { inner } else { inner.trunc() };
            g.add_rectangle(0.0, 0.0, cell, cell, false);
            g.add_rectangle(
                outer,
                outer,
                cell - outer - inner,
                cell - outer - inner,
                true,
            );
        }
        10 => {
            let inner = cell * 0.12;
            let outer = inner * 3.0;
            g.add_rectangle(0.0, 0.0, cell, cell, false);
            g.add_circle(outer, outer, cell - inner - outer, true);
        }
        12 => {
            let m = cell * 0.25;
            g.add_rectangle(0.0, 0.0, cell, cell, false);
            g.add_rhombus(m, m, cell - m, cell - m, true);
        }
        _ => {
            if position == 0 {
                let m = cell * 0.4;
                let w = cell * 1.2;
                g.add_circle(m, m, w, false);
            }
        }
    }
}

/// Draw outer shape `index` (taken modulo [`OUTER_SHAPES`]).
pub fn outer_shape(index: usize, g: &mut Graphics, cell: f32) {
    match index % OUTER_SHAPES {
        0 => g.add_triangle(0.0, 0.0, cell, cell, 0, false),
        1 => g.add_triangle(0.0, cell / 2.0, cell, cell / 2.0, 0, false),
        2 => g.add_rhombus(0.0, 0.0, cell, cell, false),
        _ => {
            let m = cell / 6.0;
            g.add_circle(m, m, cell - 2.0 * m, false);
        }
    }
}
