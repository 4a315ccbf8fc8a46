//! The mutable position + heading automaton.

use indexmap::IndexSet;
use trellis_core::{Coord2, CoreError, Direction, Heading};

/// A walker's position and heading at one moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WalkerState {
    /// Where the walker stands.
    pub position: Coord2,
    /// Which way it faces.
    pub heading: Heading,
}

impl WalkerState {
    /// Create a state from its parts.
    pub fn new(position: impl Into<Coord2>, heading: Heading) -> Self {
        Self {
            position: position.into(),
            heading,
        }
    }
}

/// A point moving across the plane one heading at a time.
///
/// With history tracking enabled, every mutating call first records the
/// state it is about to leave, so `history()` followed by `state()` is the
/// full trajectory. Tracking is opt-in; an untracked walker never
/// allocates.
///
/// `Clone` is a deep copy (history included); [`PointWalker::detached`]
/// copies only the current state.
#[derive(Clone, Debug)]
pub struct PointWalker {
    position: Coord2,
    heading: Heading,
    track_history: bool,
    history: Vec<WalkerState>,
    visited: IndexSet<WalkerState>,
    initial_state: WalkerState,
}

impl PointWalker {
    /// Create a walker at `position` facing `heading`.
    pub fn new(position: impl Into<Coord2>, heading: Heading, track_history: bool) -> Self {
        let initial_state = WalkerState::new(position, heading);
        Self {
            position: initial_state.position,
            heading,
            track_history,
            history: Vec::new(),
            visited: IndexSet::new(),
            initial_state,
        }
    }

    /// Create a walker whose heading is given by name or arrow
    /// (`"north"`, `"NE"`, `"^"`, ...).
    ///
    /// Returns `Err(CoreError::InvalidArgument)` for an unknown heading.
    pub fn from_heading_name(
        position: impl Into<Coord2>,
        heading: &str,
        track_history: bool,
    ) -> Result<Self, CoreError> {
        Ok(Self::new(position, heading.parse()?, track_history))
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Current position.
    pub fn position(&self) -> Coord2 {
        self.position
    }

    /// Current heading.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Current `(position, heading)`.
    pub fn state(&self) -> WalkerState {
        WalkerState {
            position: self.position,
            heading: self.heading,
        }
    }

    /// The state this walker was constructed with.
    pub fn initial_state(&self) -> WalkerState {
        self.initial_state
    }

    /// Whether mutations are being recorded.
    pub fn is_tracking(&self) -> bool {
        self.track_history
    }

    /// States left behind by each recorded mutation, oldest first.
    pub fn history(&self) -> &[WalkerState] {
        &self.history
    }

    /// Distinct states in the history, in first-seen order.
    pub fn visited(&self) -> &IndexSet<WalkerState> {
        &self.visited
    }

    /// Distinct positions in the history plus the current position.
    pub fn visited_points(&self) -> IndexSet<Coord2> {
        self.history
            .iter()
            .map(|s| s.position)
            .chain(std::iter::once(self.position))
            .collect()
    }

    // ── Looking ahead ───────────────────────────────────────────

    /// The point `distance` cells away along `heading.rotate(direction)`.
    /// Does not move the walker.
    pub fn peek(&self, direction: Direction, distance: i64) -> Coord2 {
        self.heading
            .rotate(direction)
            .advance(self.position, distance)
    }

    /// The cell directly ahead.
    pub fn next_position(&self) -> Coord2 {
        self.peek(Direction::Forward, 1)
    }

    // ── Mutation ────────────────────────────────────────────────

    /// Move `distance` cells along `heading.rotate(direction)` without
    /// changing heading.
    pub fn advance(&mut self, distance: i64, direction: Direction) {
        self.record();
        self.position = self.peek(direction, distance);
    }

    /// Move one cell forward.
    pub fn step(&mut self) {
        self.advance(1, Direction::Forward);
    }

    /// Rotate the heading through `direction`.
    pub fn turn(&mut self, direction: Direction) {
        self.record();
        self.heading = self.heading.rotate(direction);
    }

    /// Face an absolute heading.
    pub fn face(&mut self, heading: Heading) {
        self.record();
        self.heading = heading;
    }

    /// Jump straight to `position`, keeping the heading.
    pub fn move_to(&mut self, position: impl Into<Coord2>) {
        self.record();
        self.position = position.into();
    }

    /// Return to the initial state and forget all history.
    pub fn reset(&mut self) {
        self.position = self.initial_state.position;
        self.heading = self.initial_state.heading;
        self.history.clear();
        self.visited.clear();
    }

    /// A copy holding only the current state; history is dropped and the
    /// current state becomes the copy's initial state.
    pub fn detached(&self) -> Self {
        Self::new(self.position, self.heading, self.track_history)
    }

    fn record(&mut self) {
        if self.track_history {
            let state = self.state();
            self.history.push(state);
            self.visited.insert(state);
        }
    }
}
