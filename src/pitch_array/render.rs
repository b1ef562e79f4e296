//! Text rendering of pitch arrays
//!
//! Each cell prints as `[content]`, padded so that cells spanning the same
//! grid columns line up across rows:
//!
//! ```text
//! [c'] [d'     ] [ ]
//! [e' f'  ] [g'] [ ]
//! ```

use super::array::PitchArray;
use std::fmt;

impl fmt::Display for PitchArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = column_text_widths(self);
        let lines: Vec<String> = self
            .rows()
            .map(|row| {
                let mut start = 0;
                row.cells()
                    .map(|cell| {
                        let stop = start + cell.width();
                        let text_width = span_text_width(&widths[start..stop]);
                        start = stop;
                        format!("[{:<width$}]", cell.label(), width = text_width)
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Character width of each grid column, at least one
fn column_text_widths(array: &PitchArray) -> Vec<usize> {
    let mut widths = vec![1; array.width()];
    loop {
        let mut changed = false;
        for row in array.rows() {
            let mut start = 0;
            for cell in row.cells() {
                let stop = start + cell.width();
                let available = span_text_width(&widths[start..stop]);
                let needed = cell.label().chars().count();
                if needed > available {
                    widths[stop - 1] += needed - available;
                    changed = true;
                }
                start = stop;
            }
        }
        if !changed {
            return widths;
        }
    }
}

/// Characters between the brackets of a cell covering these columns
fn span_text_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)
}
