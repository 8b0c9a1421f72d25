use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::ParseGridError;

/// Rectangular snapshot of binary cell states, stored row-major.
///
/// Dimensions are fixed for the grid's lifetime; resizing means building a new
/// grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid with every cell dead.
    ///
    /// # Panics
    ///
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be at least 1x1, got {width}x{height}"
        );
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Creates a grid where each cell is independently alive with probability
    /// `alive_chance` percent (0 = empty, 100 = full).
    ///
    /// # Panics
    ///
    /// If either dimension is zero or `alive_chance` exceeds 100.
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        alive_chance: u8,
        rng: &mut R,
    ) -> Self {
        let mut grid = Self::new(width, height);
        grid.randomize(alive_chance, rng);
        grid
    }

    /// Re-seeds every cell in place; see [`Grid::random`].
    pub fn randomize<R: Rng + ?Sized>(&mut self, alive_chance: u8, rng: &mut R) {
        assert!(
            alive_chance <= 100,
            "alive chance must be within 0..=100, got {alive_chance}"
        );
        for cell in &mut self.cells {
            *cell = rng.gen_range(0..100u8) < alive_chance;
        }
    }

    /// Builds a grid from row-major cell states.
    ///
    /// # Panics
    ///
    /// If either dimension is zero or `cells` does not hold `width * height`
    /// entries.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be at least 1x1, got {width}x{height}"
        );
        assert_eq!(
            cells.len(),
            width * height,
            "cell buffer does not match {width}x{height}"
        );
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell states.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Cell state, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Cell state; cells outside the grid read as dead.
    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    /// Sets a single cell. Returns `false` (and changes nothing) outside the grid.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = alive;
                true
            }
            None => false,
        }
    }

    /// Flips a single cell. Returns `false` (and changes nothing) outside the grid.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = !self.cells[i];
                true
            }
            None => false,
        }
    }

    /// Clear all cells.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Count live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, row by row.
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Stamps a pattern of live cells at `origin + offset` for each offset.
    /// Offsets landing outside the grid are skipped. Returns how many cells
    /// were placed.
    pub fn stamp(&mut self, pattern: &[(i32, i32)], origin: (usize, usize)) -> usize {
        let mut placed = 0;
        for &(dx, dy) in pattern {
            let x = origin.0 as i64 + i64::from(dx);
            let y = origin.1 as i64 + i64::from(dy);
            if x < 0 || y < 0 {
                continue;
            }
            if self.set(x as usize, y as usize, true) {
                placed += 1;
            }
        }
        placed
    }
}

/// Renders rows top to bottom (y = 0 first) using `#` for live cells and `.`
/// for dead ones.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) format. Blank lines and surrounding
/// whitespace are ignored; `#`/`O`/`*` are live, `.`/`_` are dead.
impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let start = cells.len();
            for ch in line.chars() {
                cells.push(match ch {
                    '#' | 'O' | '*' => true,
                    '.' | '_' => false,
                    ch => return Err(ParseGridError::BadCell { row: height, ch }),
                });
            }
            let len = cells.len() - start;
            let expected = *width.get_or_insert(len);
            if expected != len {
                return Err(ParseGridError::RaggedRow {
                    row: height,
                    len,
                    expected,
                });
            }
            height += 1;
        }
        let width = width.ok_or(ParseGridError::Empty)?;
        Ok(Self::from_cells(width, height, cells))
    }
}

// ── Predefined patterns ──

/// Block: 2×2 still life.
pub fn pattern_block() -> Vec<(i32, i32)> {
    vec![(0, 0), (1, 0), (0, 1), (1, 1)]
}

/// Blinker: period-2 oscillator, horizontal phase.
pub fn pattern_blinker() -> Vec<(i32, i32)> {
    vec![(-1, 0), (0, 0), (1, 0)]
}

/// Glider: small, moving pattern.
pub fn pattern_glider() -> Vec<(i32, i32)> {
    vec![(0, -1), (1, 0), (-1, 1), (0, 1), (1, 1)]
}

/// R-pentomino: a methuselah that runs for 1103 generations.
pub fn pattern_r_pentomino() -> Vec<(i32, i32)> {
    vec![(0, -1), (1, -1), (-1, 0), (0, 0), (0, 1)]
}

/// Lightweight spaceship (LWSS).
pub fn pattern_lwss() -> Vec<(i32, i32)> {
    vec![
        (-2, -1), (-1, -2), (0, -2), (1, -2), (2, -2),
        (2, -1), (2, 0), (1, 1), (-2, 0),
    ]
}
