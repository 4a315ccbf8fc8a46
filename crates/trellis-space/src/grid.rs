//! The immutable glyph-indexed character grid.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use tracing::debug;
use trellis_core::{Coord2, Neighborhood};

use crate::error::GridError;
use crate::options::GridOptions;

/// Padding glyph for rows shorter than the widest row.
const PAD: char = ' ';

/// The value of a single cell as returned by [`Grid::value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// The raw glyph.
    Glyph(char),
    /// A decimal digit, when the grid was built with
    /// [`GridOptions::integer_values`].
    Digit(u32),
}

/// An immutable rectangular character grid.
///
/// Cell `(x, y)` is column `x` of row `y`, with `(0, 0)` at the top left.
/// Every row has the same width: shorter input lines are right-padded with
/// spaces. On construction every cell is scanned once and, subject to
/// [`GridOptions`], recorded in a glyph → coordinates index whose sets are
/// in row-major order.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: Vec<Vec<char>>,
    width: usize,
    items: IndexMap<char, IndexSet<Coord2>>,
    default_glyph: Option<char>,
    integer_values: bool,
}

impl Grid {
    /// Build a grid from newline-separated text.
    ///
    /// A trailing newline (and `\r` line endings) are ignored. Returns
    /// `Err(GridError::EmptyGrid)` if there are no rows or every row is
    /// empty.
    pub fn parse(text: &str, options: GridOptions) -> Result<Self, GridError> {
        Self::from_lines(text.lines(), options)
    }

    /// Build a grid from a sequence of lines.
    pub fn from_lines<I, S>(lines: I, options: GridOptions) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows: Vec<Vec<char>> = lines
            .into_iter()
            .map(|line| line.as_ref().trim_end_matches('\r').chars().collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(GridError::EmptyGrid);
        }
        for row in &mut rows {
            row.resize(width, PAD);
        }

        let mut items: IndexMap<char, IndexSet<Coord2>> = IndexMap::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &glyph) in row.iter().enumerate() {
                if options.indexes(glyph) {
                    items
                        .entry(glyph)
                        .or_default()
                        .insert(Coord2::new(x as i64, y as i64));
                }
            }
        }
        debug!(
            width,
            height = rows.len(),
            glyphs = items.len(),
            "grid indexed"
        );

        Ok(Self {
            rows,
            width,
            items,
            default_glyph: options.default_glyph,
            integer_values: options.integer_values,
        })
    }

    // ── Dimensions and bounds ───────────────────────────────────

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Always `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The background glyph excluded from the index, if any.
    pub fn default_glyph(&self) -> Option<char> {
        self.default_glyph
    }

    /// `true` if `p` lies inside the grid.
    pub fn in_space(&self, p: impl Into<Coord2>) -> bool {
        self.cell_index(p.into()).is_some()
    }

    /// `true` if `p` is a cell of the first row.
    pub fn on_top_edge(&self, p: impl Into<Coord2>) -> bool {
        let p = p.into();
        self.in_space(p) && p.y == 0
    }

    /// `true` if `p` is a cell of the last row.
    pub fn on_bottom_edge(&self, p: impl Into<Coord2>) -> bool {
        let p = p.into();
        self.in_space(p) && p.y == self.height() as i64 - 1
    }

    /// `true` if `p` is a cell of the first column.
    pub fn on_left_edge(&self, p: impl Into<Coord2>) -> bool {
        let p = p.into();
        self.in_space(p) && p.x == 0
    }

    /// `true` if `p` is a cell of the last column.
    pub fn on_right_edge(&self, p: impl Into<Coord2>) -> bool {
        let p = p.into();
        self.in_space(p) && p.x == self.width as i64 - 1
    }

    /// `true` if `p` is a cell on any of the four edges. Coordinates
    /// outside the grid are on no edge.
    pub fn on_edge(&self, p: impl Into<Coord2>) -> bool {
        let p = p.into();
        self.on_top_edge(p) || self.on_bottom_edge(p) || self.on_left_edge(p) || self.on_right_edge(p)
    }

    /// Map any coordinate into the grid as if the grid tiled the plane.
    pub fn wrap(&self, p: impl Into<Coord2>) -> Coord2 {
        let p = p.into();
        Coord2::new(
            p.x.rem_euclid(self.width as i64),
            p.y.rem_euclid(self.height() as i64),
        )
    }

    // ── Lookup ──────────────────────────────────────────────────

    /// The glyph at `p`, or `None` outside the grid.
    pub fn get(&self, p: impl Into<Coord2>) -> Option<char> {
        self.cell_index(p.into()).map(|(x, y)| self.rows[y][x])
    }

    /// The glyph at `p`.
    ///
    /// Returns `Err(GridError::CoordOutOfBounds)` outside the grid.
    pub fn glyph(&self, p: impl Into<Coord2>) -> Result<char, GridError> {
        let p = p.into();
        self.get(p).ok_or_else(|| self.out_of_bounds(p))
    }

    /// The cell at `p`, read as an integer when the grid was built with
    /// [`GridOptions::integer_values`] and the glyph is a decimal digit.
    pub fn value(&self, p: impl Into<Coord2>) -> Result<Cell, GridError> {
        let glyph = self.glyph(p)?;
        Ok(match glyph.to_digit(10) {
            Some(d) if self.integer_values => Cell::Digit(d),
            _ => Cell::Glyph(glyph),
        })
    }

    /// The glyph index: every indexed glyph mapped to the cells bearing it,
    /// in row-major order.
    pub fn items(&self) -> &IndexMap<char, IndexSet<Coord2>> {
        &self.items
    }

    /// Every cell bearing `glyph`, in row-major order.
    ///
    /// Served from the index when `glyph` is indexed, otherwise by a scan.
    pub fn find(&self, glyph: char) -> Vec<Coord2> {
        match self.items.get(&glyph) {
            Some(cells) => cells.iter().copied().collect(),
            None => self
                .coordinates()
                .filter(|&p| self.get(p) == Some(glyph))
                .collect(),
        }
    }

    /// Number of cells bearing `glyph`.
    pub fn count(&self, glyph: char) -> usize {
        match self.items.get(&glyph) {
            Some(cells) => cells.len(),
            None => self.rows.iter().flatten().filter(|&&g| g == glyph).count(),
        }
    }

    /// The single cell bearing `glyph`.
    ///
    /// Returns `Err(GridError::GlyphNotUnique)` when `glyph` appears zero
    /// times or more than once.
    pub fn initial_position(&self, glyph: char) -> Result<Coord2, GridError> {
        match self.find(glyph).as_slice() {
            [only] => Ok(*only),
            cells => Err(GridError::GlyphNotUnique {
                glyph,
                count: cells.len(),
            }),
        }
    }

    /// The in-grid neighbours of `p`.
    pub fn neighbors(
        &self,
        p: impl Into<Coord2>,
        neighborhood: Neighborhood,
    ) -> SmallVec<[Coord2; 8]> {
        p.into()
            .neighbors(neighborhood)
            .into_iter()
            .filter(|&n| self.in_space(n))
            .collect()
    }

    /// All coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coord2> + '_ {
        let width = self.width;
        (0..self.height()).flat_map(move |y| {
            (0..width).map(move |x| Coord2::new(x as i64, y as i64))
        })
    }

    /// Row `y` as a string, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<String> {
        self.rows.get(y).map(|r| r.iter().collect())
    }

    /// Every row as a string, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|r| r.iter().collect())
    }

    /// Re-render the grid from the glyph index alone.
    ///
    /// Cells missing from the index are drawn with the default glyph (or a
    /// space when there is none). This reproduces the [`Display`] output
    /// whenever every unindexed cell bears the default glyph.
    ///
    /// [`Display`]: fmt::Display
    pub fn render_index(&self) -> String {
        let blank = self.default_glyph.unwrap_or(PAD);
        let mut canvas = vec![vec![blank; self.width]; self.height()];
        for (&glyph, cells) in &self.items {
            for p in cells {
                canvas[p.y as usize][p.x as usize] = glyph;
            }
        }
        join_rows(&canvas)
    }

    fn cell_index(&self, p: Coord2) -> Option<(usize, usize)> {
        let x = usize::try_from(p.x).ok()?;
        let y = usize::try_from(p.y).ok()?;
        (x < self.width && y < self.rows.len()).then_some((x, y))
    }

    fn out_of_bounds(&self, coord: Coord2) -> GridError {
        GridError::CoordOutOfBounds {
            coord,
            bounds: format!("[0, {}) x [0, {})", self.width, self.height()),
        }
    }
}

fn join_rows(rows: &[Vec<char>]) -> String {
    rows.iter()
        .map(|r| r.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

impl<P: Into<Coord2>> Index<P> for Grid {
    type Output = char;

    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid; use [`Grid::glyph`]
    /// for a checked lookup.
    fn index(&self, p: P) -> &char {
        let p = p.into();
        match self.cell_index(p) {
            Some((x, y)) => &self.rows[y][x],
            None => panic!("{}", self.out_of_bounds(p)),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_rows(&self.rows))
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse with [`GridOptions::default`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, GridOptions::default())
    }
}
