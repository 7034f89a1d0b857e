//! Index-based list reordering.
//!
//! # Responsibility
//! - Compute a new ordering from a drag gesture or a one-step nudge.
//!
//! # Invariants
//! - Inputs are never mutated; a new sequence is returned.
//! - Output is a permutation of the input (same length, same members).
//! - A drag destination is an index into the list after the moved element
//!   has been removed.
//! - Cancelled drags and nudges past either end return the input unchanged.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Direction of a one-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

/// Requested order change for one section list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderChange {
    /// Drag gesture; `destination == None` means dropped outside the list.
    Drag {
        source: usize,
        destination: Option<usize>,
    },
    /// Move up/down button.
    Step {
        index: usize,
        direction: StepDirection,
    },
}

/// Index outside the list the gesture was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderError {
    pub index: usize,
    pub len: usize,
}

impl Display for ReorderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "reorder index {} out of bounds for list of {} entries",
            self.index, self.len
        )
    }
}

impl Error for ReorderError {}

/// Applies `change` to `items`.
pub fn apply_change<T: Clone>(items: &[T], change: ReorderChange) -> Result<Vec<T>, ReorderError> {
    match change {
        ReorderChange::Drag {
            source,
            destination,
        } => reorder_by_drag(items, source, destination),
        ReorderChange::Step { index, direction } => reorder_by_step(items, index, direction),
    }
}

/// Moves the element at `source` so it ends up at `destination`.
pub fn reorder_by_drag<T: Clone>(
    items: &[T],
    source: usize,
    destination: Option<usize>,
) -> Result<Vec<T>, ReorderError> {
    let Some(destination) = destination else {
        return Ok(items.to_vec());
    };
    ensure_in_bounds(source, items.len())?;
    ensure_in_bounds(destination, items.len())?;

    let mut updated = items.to_vec();
    let moved = updated.remove(source);
    updated.insert(destination, moved);
    Ok(updated)
}

/// Swaps the element at `index` with its neighbor in `direction`.
pub fn reorder_by_step<T: Clone>(
    items: &[T],
    index: usize,
    direction: StepDirection,
) -> Result<Vec<T>, ReorderError> {
    ensure_in_bounds(index, items.len())?;
    let destination = match direction {
        StepDirection::Up if index == 0 => None,
        StepDirection::Up => Some(index - 1),
        StepDirection::Down if index + 1 == items.len() => None,
        StepDirection::Down => Some(index + 1),
    };
    reorder_by_drag(items, index, destination)
}

fn ensure_in_bounds(index: usize, len: usize) -> Result<(), ReorderError> {
    if index >= len {
        return Err(ReorderError { index, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        apply_change, reorder_by_drag, reorder_by_step, ReorderChange, ReorderError,
        StepDirection,
    };

    fn sorted(mut values: Vec<char>) -> Vec<char> {
        values.sort_unstable();
        values
    }

    #[test]
    fn drag_interprets_destination_after_removal() {
        let items = ['a', 'b', 'c', 'd'];
        assert_eq!(reorder_by_drag(&items, 0, Some(2)).unwrap(), vec!['b', 'c', 'a', 'd']);
        assert_eq!(reorder_by_drag(&items, 3, Some(0)).unwrap(), vec!['d', 'a', 'b', 'c']);
        assert_eq!(reorder_by_drag(&items, 1, Some(3)).unwrap(), vec!['a', 'c', 'd', 'b']);
    }

    #[test]
    fn drag_preserves_membership_for_every_valid_pair() {
        let items = vec!['a', 'b', 'c', 'd', 'e'];
        for source in 0..items.len() {
            for destination in 0..items.len() {
                let reordered = reorder_by_drag(&items, source, Some(destination)).unwrap();
                assert_eq!(reordered.len(), items.len());
                assert_eq!(sorted(reordered.clone()), items);
                assert_eq!(reordered[destination], items[source]);
            }
        }
    }

    #[test]
    fn cancelled_drag_is_identity() {
        let items = ['a', 'b', 'c'];
        assert_eq!(reorder_by_drag(&items, 1, None).unwrap(), items.to_vec());
    }

    #[test]
    fn step_past_either_end_is_identity() {
        let items = ['a', 'b', 'c'];
        assert_eq!(
            reorder_by_step(&items, 0, StepDirection::Up).unwrap(),
            items.to_vec()
        );
        assert_eq!(
            reorder_by_step(&items, 2, StepDirection::Down).unwrap(),
            items.to_vec()
        );
    }

    #[test]
    fn step_up_then_down_restores_order() {
        let items = vec!['a', 'b', 'c', 'd'];
        for index in 1..items.len() {
            let up = reorder_by_step(&items, index, StepDirection::Up).unwrap();
            assert_eq!(up[index - 1], items[index]);
            let restored = reorder_by_step(&up, index - 1, StepDirection::Down).unwrap();
            assert_eq!(restored, items);
        }
    }

    #[test]
    fn out_of_bounds_indices_are_rejected() {
        let items = ['a', 'b'];
        assert_eq!(
            reorder_by_drag(&items, 2, Some(0)).unwrap_err(),
            ReorderError { index: 2, len: 2 }
        );
        assert_eq!(
            reorder_by_drag(&items, 0, Some(2)).unwrap_err(),
            ReorderError { index: 2, len: 2 }
        );
        let empty: [char; 0] = [];
        assert!(reorder_by_step(&empty, 0, StepDirection::Down).is_err());
    }

    #[test]
    fn apply_change_dispatches_both_gestures() {
        let items = ['a', 'b', 'c'];
        let dragged = apply_change(
            &items,
            ReorderChange::Drag {
                source: 2,
                destination: Some(0),
            },
        )
        .unwrap();
        assert_eq!(dragged, vec!['c', 'a', 'b']);

        let stepped = apply_change(
            &items,
            ReorderChange::Step {
                index: 0,
                direction: StepDirection::Down,
            },
        )
        .unwrap();
        assert_eq!(stepped, vec!['b', 'a', 'c']);
    }
}
