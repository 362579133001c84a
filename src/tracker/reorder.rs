//! Reorder engine: splice-style moves plus the drag gestures that drive them.

/// Remove the element at `from` and re-insert it at `to`, where `to` indexes
/// the vector *after* removal. Returns `false` (and leaves `order` untouched)
/// when `from == to` or either index is outside the current bounds.
pub fn move_item<T>(order: &mut Vec<T>, from: usize, to: usize) -> bool {
    let len = order.len();
    if from == to || from >= len || to >= len {
        return false;
    }
    let moved = order.remove(from);
    order.insert(to, moved);
    true
}

/// Mouse drag-and-drop: one move per drop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseDrag {
    source: Option<usize>,
}

impl MouseDrag {
    pub fn start(&mut self, index: usize) {
        self.source = Some(index);
    }

    /// Finish the drag on `target`. Yields the `(from, to)` move to perform,
    /// or `None` when nothing was being dragged or it was dropped on itself.
    pub fn drop_on(&mut self, target: usize) -> Option<(usize, usize)> {
        let from = self.source.take()?;
        (from != target).then_some((from, target))
    }

    #[cfg(test)]
    pub fn source(&self) -> Option<usize> {
        self.source
    }
}

/// Single-pointer touch drag: the roster reorders continuously as the touch
/// point enters each card, and the dragged card's index follows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchDrag {
    source: Option<usize>,
}

impl TouchDrag {
    pub fn pointer_down(&mut self, index: usize) {
        self.source = Some(index);
    }

    /// The pointer entered card `target`. Yields the move to perform now.
    pub fn pointer_enter(&mut self, target: usize) -> Option<(usize, usize)> {
        let from = self.source?;
        if from == target {
            return None;
        }
        self.source = Some(target);
        Some((from, target))
    }

    pub fn pointer_up(&mut self) {
        self.source = None;
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }
}
