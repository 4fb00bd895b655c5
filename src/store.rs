use crate::model::brick::Brick;

/// Smallest number of rows added by a single resize.
pub const MIN_GROWTH_ROWS: usize = 100;

/// Upper bound on rows reserved up front by `new` or a single resize. The
/// logical capacity may run far past it; `Vec::push` amortizes the rest.
pub const MAX_RESERVED_ROWS: usize = 1 << 16;

/// Append-only brick table with explicit capacity management.
///
/// Capacity grows by `max(capacity * growth_pct, MIN_GROWTH_ROWS)` rows
/// whenever an append would overflow. Rows are never dropped or rewritten by
/// the store; the owner mutates the open (last) row through [`BrickStore::last_mut`].
#[derive(Debug, Clone)]
pub struct BrickStore {
    rows: Vec<Brick>,
    capacity: usize,
    growth_pct: f64,
}

impl BrickStore {
    pub fn new(initial_capacity: usize, growth_pct: f64) -> Self {
        Self {
            rows: Vec::with_capacity(initial_capacity.min(MAX_RESERVED_ROWS)),
            capacity: initial_capacity,
            growth_pct,
        }
    }

    /// Append a row and return its index.
    pub fn append(&mut self, brick: Brick) -> usize {
        if self.rows.len() >= self.capacity {
            self.grow();
        }
        self.rows.push(brick);
        self.rows.len() - 1
    }

    fn grow(&mut self) {
        let extra = growth_rows(self.capacity, self.growth_pct);
        self.capacity = self.capacity.saturating_add(extra);
        self.rows
            .reserve((self.capacity - self.rows.len()).min(MAX_RESERVED_ROWS));
        tracing::debug!(
            rows = self.rows.len(),
            added = extra,
            capacity = self.capacity,
            "Brick store resized"
        );
    }

    /// Rows `0..=last_index`.
    pub fn active_slice(&self) -> &[Brick] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Brick> {
        self.rows.get(index)
    }

    pub fn last(&self) -> Option<&Brick> {
        self.rows.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Brick> {
        self.rows.last_mut()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Rows added by one resize. Non-positive (or NaN) growth falls back to the
/// minimum bump so that appends always make room; huge or infinite growth
/// saturates at `usize::MAX`.
pub fn growth_rows(capacity: usize, growth_pct: f64) -> usize {
    if !(growth_pct > 0.0) {
        return MIN_GROWTH_ROWS;
    }
    let scaled = (capacity as f64 * growth_pct).floor() as usize;
    scaled.max(MIN_GROWTH_ROWS)
}
