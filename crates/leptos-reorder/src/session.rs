//! Drag Session
//!
//! Framework-free state of one drag gesture: which Item is floating,
//! where the placeholder sits and what order a drop would produce.

use std::cmp::Ordering;

/// Vertical extent of an Item, captured when the drag starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// One entry of a list while it is rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Row {
    /// Item at its drag-start index
    Item(usize),
    /// Spacer marking where the dragged Item would land
    Placeholder,
}

/// State of an in-progress drag.
///
/// Sibling spans are frozen at `begin`; every `update` compares the
/// floating Item's centre against those recorded centres.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    dragged: usize,
    spans: Vec<Span>,
    start_y: f64,
    offset_y: f64,
    slot: usize,
}

impl DragSession {
    /// Start dragging `dragged`. Returns `None` when the index is not part of the list.
    pub fn begin(dragged: usize, spans: Vec<Span>, start_y: f64) -> Option<Self> {
        if dragged >= spans.len() {
            return None;
        }
        Some(Self {
            dragged,
            spans,
            start_y,
            offset_y: 0.0,
            slot: dragged,
        })
    }

    pub fn dragged(&self) -> usize {
        self.dragged
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Position of the placeholder among the non-dragged Items
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Cumulative pointer delta since `begin`
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub fn dragged_span(&self) -> Span {
        self.spans[self.dragged]
    }

    /// Move the pointer to `pointer_y`. Returns true when the placeholder changed slot.
    pub fn update(&mut self, pointer_y: f64) -> bool {
        self.offset_y = pointer_y - self.start_y;
        let center = self.spans[self.dragged].center() + self.offset_y;

        // Siblings that stay ahead of the floating Item. Crossing needs the centre
        // strictly past a midpoint in either direction; touching it changes nothing.
        let slot = self
            .spans
            .iter()
            .enumerate()
            .filter(|(i, span)| match i.cmp(&self.dragged) {
                Ordering::Less => center >= span.center(),
                Ordering::Greater => center > span.center(),
                Ordering::Equal => false,
            })
            .count();

        let changed = slot != self.slot;
        self.slot = slot;
        changed
    }

    /// Order a drop right now would produce, as drag-start indices
    pub fn order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.spans.len())
            .filter(|i| *i != self.dragged)
            .collect();
        order.insert(self.slot, self.dragged);
        order
    }

    /// End the drag and return the final order
    pub fn finish(self) -> Vec<usize> {
        self.order()
    }

    /// Rows to render: the dragged Item followed by the placeholder, the rest in order
    pub fn rows(&self) -> Vec<Row> {
        let mut rows: Vec<Row> = self.order().into_iter().map(Row::Item).collect();
        rows.insert(self.slot + 1, Row::Placeholder);
        rows
    }
}

/// Rows for a list of `len` Items, with or without an active drag
pub fn layout(len: usize, session: Option<&DragSession>) -> Vec<Row> {
    match session {
        Some(session) if session.len() == len => session.rows(),
        _ => (0..len).map(Row::Item).collect(),
    }
}

/// Permute `items` so that `items[k]` becomes the old `items[order[k]]`.
///
/// Leaves `items` untouched and returns false unless `order` is a
/// permutation of `0..items.len()`.
pub fn apply_order<T>(items: &mut Vec<T>, order: &[usize]) -> bool {
    if order.len() != items.len() {
        return false;
    }
    let mut seen = vec![false; items.len()];
    for &i in order {
        if i >= seen.len() || seen[i] {
            return false;
        }
        seen[i] = true;
    }

    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(order.iter().filter_map(|&i| slots[i].take()));
    true
}
