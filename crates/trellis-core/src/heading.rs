//! Absolute compass headings and relative turn directions.
//!
//! Both are cyclic enumerations of eight values, 45° apart and ordered
//! clockwise. Encoding each as an index in `0..8` turns rotation into
//! addition modulo eight: `heading.rotate(direction)` is the heading at
//! `(heading.index() + direction.index()) % 8`.

use std::fmt;
use std::str::FromStr;

use crate::coord2::Coord2;
use crate::error::CoreError;

/// A rotation relative to the current heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// No rotation.
    Forward,
    /// 45° clockwise.
    ForwardRight,
    /// 90° clockwise.
    Right,
    /// 135° clockwise.
    ///
    /// Rotation is index arithmetic, so `North` turned `BackwardRight` is
    /// `SouthEast`, not `SouthWest`:
    ///
    /// ```
    /// use trellis_core::{Direction, Heading};
    ///
    /// assert_eq!(Heading::North.rotate(Direction::BackwardRight), Heading::SouthEast);
    /// assert_eq!(Heading::North.rotate(Direction::BackwardLeft), Heading::SouthWest);
    /// ```
    BackwardRight,
    /// Half turn.
    Backward,
    /// 135° counter-clockwise.
    BackwardLeft,
    /// 90° counter-clockwise.
    Left,
    /// 45° counter-clockwise.
    ForwardLeft,
}

impl Direction {
    /// All directions in clockwise order starting at [`Direction::Forward`].
    pub const ALL: [Self; 8] = [
        Self::Forward,
        Self::ForwardRight,
        Self::Right,
        Self::BackwardRight,
        Self::Backward,
        Self::BackwardLeft,
        Self::Left,
        Self::ForwardLeft,
    ];

    /// Position in the clockwise ring, `0..8`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The direction at `index % 8`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 8]
    }

    /// Lower-case snake-case name, e.g. `"backward_left"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::ForwardRight => "forward_right",
            Self::Right => "right",
            Self::BackwardRight => "backward_right",
            Self::Backward => "backward",
            Self::BackwardLeft => "backward_left",
            Self::Left => "left",
            Self::ForwardLeft => "forward_left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    /// Parse a snake-case name or one of the single-letter shorthands
    /// `F`, `R`, `B`, `L`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "f" => return Ok(Self::Forward),
            "r" => return Ok(Self::Right),
            "b" => return Ok(Self::Backward),
            "l" => return Ok(Self::Left),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|d| d.name() == lower)
            .ok_or_else(|| CoreError::invalid(format!("unknown direction '{s}'")))
    }
}

/// One of the eight absolute compass headings.
///
/// North is "up" on screen, i.e. towards decreasing `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Heading {
    /// Up.
    North,
    /// Up and right.
    NorthEast,
    /// Right.
    East,
    /// Down and right.
    SouthEast,
    /// Down.
    South,
    /// Down and left.
    SouthWest,
    /// Left.
    West,
    /// Up and left.
    NorthWest,
}

impl Heading {
    /// All headings in clockwise order starting at [`Heading::North`].
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Position in the clockwise ring, `0..8`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The heading at `index % 8`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 8]
    }

    /// The heading reached by turning through `direction`.
    pub fn rotate(self, direction: Direction) -> Self {
        Self::from_index(self.index() + direction.index())
    }

    /// 90° clockwise.
    pub fn right(self) -> Self {
        self.rotate(Direction::Right)
    }

    /// 90° counter-clockwise.
    pub fn left(self) -> Self {
        self.rotate(Direction::Left)
    }

    /// Half turn.
    pub fn reverse(self) -> Self {
        self.rotate(Direction::Backward)
    }

    /// `true` for north and south.
    pub fn vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// `true` for east and west.
    pub fn horizontal(self) -> bool {
        matches!(self, Self::East | Self::West)
    }

    /// `true` for the four intercardinal headings.
    pub fn diagonal(self) -> bool {
        self.index() % 2 == 1
    }

    /// The unit step taken when moving one cell along this heading.
    pub fn offset(self) -> Coord2 {
        self.advance(Coord2::ORIGIN, 1)
    }

    /// The point `distance` cells from `from` along this heading.
    pub fn advance(self, from: Coord2, distance: i64) -> Coord2 {
        match self {
            Self::North => from.up(distance),
            Self::NorthEast => from.up_right(distance),
            Self::East => from.right(distance),
            Self::SouthEast => from.down_right(distance),
            Self::South => from.down(distance),
            Self::SouthWest => from.down_left(distance),
            Self::West => from.left(distance),
            Self::NorthWest => from.up_left(distance),
        }
    }

    /// Parse an ASCII arrow: `^`, `>`, `v`, `<`, or a two-character
    /// diagonal combining one vertical and one horizontal arrow in either
    /// order (`^>` and `>^` are both north-east).
    pub fn from_arrow(arrow: &str) -> Result<Self, CoreError> {
        let unknown = || CoreError::invalid(format!("unknown arrow '{arrow}'"));
        let mut vertical = None;
        let mut horizontal = None;
        let mut count = 0;
        for ch in arrow.chars() {
            count += 1;
            let slot = match ch {
                '^' | 'v' | 'V' => &mut vertical,
                '<' | '>' => &mut horizontal,
                _ => return Err(unknown()),
            };
            if slot.replace(ch).is_some() {
                return Err(unknown());
            }
        }
        if count == 0 {
            return Err(unknown());
        }
        Ok(match (vertical, horizontal) {
            (Some('^'), None) => Self::North,
            (Some(_), None) => Self::South,
            (None, Some('>')) => Self::East,
            (None, Some(_)) => Self::West,
            (Some('^'), Some('>')) => Self::NorthEast,
            (Some('^'), Some(_)) => Self::NorthWest,
            (Some(_), Some('>')) => Self::SouthEast,
            (Some(_), Some(_)) => Self::SouthWest,
            (None, None) => return Err(unknown()),
        })
    }

    /// Lower-case name, e.g. `"northeast"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "northeast",
            Self::East => "east",
            Self::SouthEast => "southeast",
            Self::South => "south",
            Self::SouthWest => "southwest",
            Self::West => "west",
            Self::NorthWest => "northwest",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::NorthEast => "ne",
            Self::East => "e",
            Self::SouthEast => "se",
            Self::South => "s",
            Self::SouthWest => "sw",
            Self::West => "w",
            Self::NorthWest => "nw",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heading {
    type Err = CoreError;

    /// Parse a heading name (`north`, `north_east`, `northeast`), an
    /// abbreviation (`N`, `NE`, ...) or an arrow (see
    /// [`Heading::from_arrow`]). Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "");
        if let Some(h) = Self::ALL
            .into_iter()
            .find(|h| h.name() == lower || h.abbreviation() == lower)
        {
            return Ok(h);
        }
        Self::from_arrow(s.trim()).map_err(|_| CoreError::invalid(format!("unknown heading '{s}'")))
    }
}
