//! Generation stepping: neighbor counting under a boundary policy followed by
//! per-cell rule evaluation.
//!
//! Every step reads only the previous snapshot and writes a fresh [`Grid`], so
//! the result never depends on the order cells are visited in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::rule::Rule;
use crate::sequence::RuleSequence;

/// Moore neighborhood offsets.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// How neighbors that fall outside the grid are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Boundary {
    /// Toroidal: offsets wrap around to the opposite edge.
    Wrap,
    /// Finite: outside neighbors are absent, or alive in edge-alive mode.
    #[default]
    Wall,
}

/// Computes generation N+1 from generation N.
///
/// Holds only the boundary configuration. Wrapping and edge-alive mode are
/// mutually exclusive; the setters keep that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepEngine {
    boundary: Boundary,
    edge_alive: bool,
}

impl StepEngine {
    /// Walled boundary with edge-alive mode off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toroidal boundary.
    pub fn wrapping() -> Self {
        Self {
            boundary: Boundary::Wrap,
            edge_alive: false,
        }
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn edge_alive(&self) -> bool {
        self.edge_alive
    }

    /// Selects the boundary policy. Switching to [`Boundary::Wrap`] clears
    /// edge-alive mode; switching to [`Boundary::Wall`] keeps its last value.
    pub fn set_boundary(&mut self, boundary: Boundary) {
        if boundary == Boundary::Wrap && self.edge_alive {
            log::debug!("wrap boundary selected, clearing edge-alive mode");
            self.edge_alive = false;
        }
        self.boundary = boundary;
    }

    /// Turns edge-alive mode on or off. Turning it on while wrapping switches
    /// the boundary to [`Boundary::Wall`], since wrapped grids have no edges.
    pub fn set_edge_alive(&mut self, edge_alive: bool) {
        if edge_alive && self.boundary == Boundary::Wrap {
            log::debug!("edge-alive mode selected, switching boundary from wrap to wall");
            self.boundary = Boundary::Wall;
        }
        self.edge_alive = edge_alive;
    }

    /// Number of living cells among the eight neighbors of `(x, y)`.
    ///
    /// Under [`Boundary::Wrap`] every offset is taken modulo the grid size, so
    /// on a grid one cell wide or tall a neighbor can be the cell itself.
    pub fn neighbor_count(&self, grid: &Grid, x: usize, y: usize) -> u8 {
        assert!(
            x < grid.width() && y < grid.height(),
            "cell ({x}, {y}) outside {}x{} grid",
            grid.width(),
            grid.height()
        );
        let w = grid.width() as isize;
        let h = grid.height() as isize;
        let cells = grid.cells();

        let mut count = 0u8;
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            let alive = match self.boundary {
                Boundary::Wrap => {
                    let wx = nx.rem_euclid(w);
                    let wy = ny.rem_euclid(h);
                    cells[(wy * w + wx) as usize]
                }
                Boundary::Wall => {
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        self.edge_alive
                    } else {
                        cells[(ny * w + nx) as usize]
                    }
                }
            };
            count += u8::from(alive);
        }
        count
    }

    /// Advance the grid by one generation using `rule`.
    pub fn step(&self, grid: &Grid, rule: &Rule) -> Grid {
        let width = grid.width();
        let height = grid.height();
        let cells = grid.cells();
        let mut next = Vec::with_capacity(cells.len());

        for y in 0..height {
            for x in 0..width {
                let count = self.neighbor_count(grid, x, y);
                next.push(rule.next_state(cells[y * width + x], count));
            }
        }

        Grid::from_cells(width, height, next)
    }

    /// Advance `n` generations, taking the rule for each step from `sequence`
    /// starting at `start_generation`. Any generation number is accepted; the
    /// rotation is computed modulo the sequence length.
    pub fn step_n(
        &self,
        grid: &Grid,
        sequence: &RuleSequence,
        start_generation: u64,
        n: u64,
    ) -> Grid {
        let len = sequence.len() as u64;
        let offset = start_generation % len;
        let mut current = grid.clone();
        for i in 0..n {
            current = self.step(&current, sequence.at(offset + i % len));
        }
        current
    }
}
