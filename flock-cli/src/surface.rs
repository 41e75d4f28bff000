use flock_core::{Surface, Vector2D};
use std::convert::Infallible;
use std::f32::consts::FRAC_PI_4;
use std::fmt;

/// Points sampled along a circle wider than one cell.
const RING_SAMPLES: usize = 24;

/// Character-grid surface for terminals. Simulation space is scaled onto
/// `columns × rows` cells on every `clear`.
#[derive(Debug, Clone)]
pub struct AsciiSurface {
    columns: usize,
    rows: usize,
    scale_x: f32,
    scale_y: f32,
    cells: Vec<char>,
}

impl AsciiSurface {
    pub fn new(columns: usize, rows: usize) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            columns,
            rows,
            scale_x: 1.0,
            scale_y: 1.0,
            cells: vec![' '; columns * rows],
        }
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        (column < self.columns && row < self.rows).then(|| self.cells[row * self.columns + column])
    }

    /// Number of non-blank cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| **c != ' ').count()
    }

    fn plot(&mut self, point: Vector2D, glyph: char) {
        let column = (point.x * self.scale_x).floor();
        let row = (point.y * self.scale_y).floor();
        if column < 0.0 || row < 0.0 {
            return;
        }
        let (column, row) = (column as usize, row as usize);
        if column < self.columns && row < self.rows {
            self.cells[row * self.columns + column] = glyph;
        }
    }
}

/// Arrow for a heading in screen coordinates (y grows downward).
fn arrow(direction: Vector2D) -> char {
    let octant = (direction.angle() / FRAC_PI_4).round() as i32;
    match octant.rem_euclid(8) {
        0 => '>',
        1 => '\\',
        2 => 'v',
        3 => '/',
        4 => '<',
        5 => '\\',
        6 => '^',
        _ => '/',
    }
}

impl Surface for AsciiSurface {
    type Error = Infallible;

    fn clear(&mut self, width: f32, height: f32) -> Result<(), Infallible> {
        self.scale_x = self.columns as f32 / width;
        self.scale_y = self.rows as f32 / height;
        self.cells.fill(' ');
        Ok(())
    }

    fn draw_circle(&mut self, center: Vector2D, radius: f32, _shade: f32) -> Result<(), Infallible> {
        if radius * self.scale_x < 1.0 {
            self.plot(center, 'o');
            return Ok(());
        }
        for i in 0..RING_SAMPLES {
            let angle = i as f32 / RING_SAMPLES as f32 * std::f32::consts::TAU;
            self.plot(center + Vector2D::from_angle(angle) * radius, '.');
        }
        Ok(())
    }

    fn draw_polygon(&mut self, vertices: &[Vector2D], _shade: f32) -> Result<(), Infallible> {
        let Some(tip) = vertices.first() else {
            return Ok(());
        };
        let centroid = vertices.iter().copied().sum::<Vector2D>() / vertices.len() as f32;
        self.plot(centroid, arrow(*tip - centroid));
        Ok(())
    }
}

impl fmt::Display for AsciiSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.columns).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().collect();
            f.write_str(&line)?;
        }
        Ok(())
    }
}
