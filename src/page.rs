//! Page model the game renders into.
//!
//! A [`Page`] is a set of named mount points. Querying a selector yields a
//! [`Container`]: an ordered list of cells, at most one of which holds the
//! target, plus an outbox of signals dispatched on the container.

/// Selector the board is mounted under by default.
pub const DEFAULT_BOARD_SELECTOR: &str = ".board";

/// Named mount points available to the game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    mounts: Vec<String>,
}

impl Page {
    /// Create an empty page with no mount points.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the standard layout with the board mounted at
    /// [`DEFAULT_BOARD_SELECTOR`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new().with_mount(DEFAULT_BOARD_SELECTOR)
    }

    /// Builder form of [`Page::mount`].
    #[must_use]
    pub fn with_mount(mut self, selector: impl Into<String>) -> Self {
        self.mount(selector);
        self
    }

    /// Register a mount point. Registering the same selector twice is a no-op.
    pub fn mount(&mut self, selector: impl Into<String>) {
        let selector = selector.into();
        if !self.contains(&selector) {
            self.mounts.push(selector);
        }
    }

    /// Check whether a mount point exists.
    #[must_use]
    pub fn contains(&self, selector: &str) -> bool {
        self.mounts.iter().any(|m| m == selector)
    }

    /// Resolve a selector to a fresh, empty container.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<Container> {
        self.contains(selector).then(|| Container::new(selector))
    }
}

/// One grid slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    has_target: bool,
}

impl Cell {
    /// Whether the target currently sits in this cell.
    #[must_use]
    pub const fn has_target(&self) -> bool {
        self.has_target
    }
}

/// Classification of a clicked element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// The target, sitting in the given cell.
    Target(usize),
    /// An empty cell.
    Cell(usize),
    /// Anything that is neither a cell nor the target.
    Outside,
}

/// Signals dispatched on a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// The session ended.
    GameOver {
        /// Miss count at the moment the game ended.
        missed: u32,
    },
}

/// A mounted container holding the board cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    selector: String,
    cells: Vec<Cell>,
    events: Vec<BoardEvent>,
}

impl Container {
    /// Create an empty container bound to a selector.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            cells: Vec::new(),
            events: Vec::new(),
        }
    }

    /// The selector this container was resolved from.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Append an empty cell.
    pub fn append_cell(&mut self) {
        self.cells.push(Cell::default());
    }

    /// Remove every cell.
    pub fn clear_cells(&mut self) {
        self.cells.clear();
    }

    /// All cells in index order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Put the target into a cell. Returns `false` if the cell does not exist.
    pub fn place_target(&mut self, index: usize) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                cell.has_target = true;
                true
            }
            None => false,
        }
    }

    /// Take the target out of a cell. Returns `true` if a target was removed.
    pub fn remove_target(&mut self, index: usize) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if cell.has_target => {
                cell.has_target = false;
                true
            }
            _ => false,
        }
    }

    /// Index of the first cell holding the target.
    #[must_use]
    pub fn target_position(&self) -> Option<usize> {
        self.cells.iter().position(Cell::has_target)
    }

    /// Number of cells holding a target.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.cells.iter().filter(|c| c.has_target).count()
    }

    /// Classify the element found at a cell index.
    #[must_use]
    pub fn element_at(&self, index: usize) -> Element {
        match self.cells.get(index) {
            Some(cell) if cell.has_target => Element::Target(index),
            Some(_) => Element::Cell(index),
            None => Element::Outside,
        }
    }

    /// Queue a signal for subscribers.
    pub fn dispatch(&mut self, event: BoardEvent) {
        self.events.push(event);
    }

    /// Drain queued signals in dispatch order.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_missing_selector() {
        let page = Page::new();
        assert!(page.query(".board").is_none());

        let page = Page::standard();
        let container = page.query(DEFAULT_BOARD_SELECTOR).unwrap();
        assert_eq!(container.selector(), ".board");
        assert_eq!(container.cell_count(), 0);
    }

    #[test]
    fn test_mount_is_idempotent() {
        let mut page = Page::new();
        page.mount(".board");
        page.mount(".board");
        assert_eq!(page, Page::standard());
    }

    #[test]
    fn test_place_and_remove_target() {
        let mut container = Container::new(".board");
        for _ in 0..4 {
            container.append_cell();
        }

        assert!(container.place_target(2));
        assert_eq!(container.target_position(), Some(2));
        assert_eq!(container.element_at(2), Element::Target(2));
        assert_eq!(container.element_at(1), Element::Cell(1));

        assert!(container.remove_target(2));
        assert!(!container.remove_target(2));
        assert_eq!(container.target_count(), 0);
    }

    #[test]
    fn test_clear_cells() {
        let mut container = Container::new(".board");
        container.append_cell();
        container.place_target(0);

        container.clear_cells();
        assert_eq!(container.cell_count(), 0);
        assert_eq!(container.target_position(), None);
    }

    #[test]
    fn test_out_of_range_cells() {
        let mut container = Container::new(".board");
        container.append_cell();

        assert!(!container.place_target(5));
        assert!(!container.remove_target(5));
        assert_eq!(container.element_at(5), Element::Outside);
    }

    #[test]
    fn test_events_drain_in_order() {
        let mut container = Container::new(".board");
        container.dispatch(BoardEvent::GameOver { missed: 5 });
        container.dispatch(BoardEvent::GameOver { missed: 6 });

        assert_eq!(
            container.take_events(),
            vec![
                BoardEvent::GameOver { missed: 5 },
                BoardEvent::GameOver { missed: 6 }
            ]
        );
        assert!(container.take_events().is_empty());
    }
}
