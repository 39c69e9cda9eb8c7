use std::sync::mpsc::Sender;

use super::Cell;

/// Mutation notifications pushed to observers of a [`GridGraph`](super::GridGraph).
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent<T> {
    /// The content of a single cell changed.
    CellChanged { cell: Cell, old: T, new: T },
    /// A passage between two adjacent cells was added.
    EdgeAdded { a: Cell, b: Cell },
    /// A passage between two adjacent cells was removed.
    EdgeRemoved { a: Cell, b: Cell },
    /// Many cells or edges changed at once; observers should redraw everything.
    GraphChanged,
}

/// Handle returned by [`GridGraph::subscribe`](super::GridGraph::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback<T> = Box<dyn FnMut(&GridEvent<T>)>;

/// Registry of observer callbacks, invoked synchronously in registration order.
pub(crate) struct Observers<T> {
    next_id: u64,
    callbacks: Vec<(ObserverId, Callback<T>)>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }
}

impl<T> Observers<T> {
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn subscribe(&mut self, callback: Callback<T>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(other, _)| *other != id);
        self.callbacks.len() != before
    }

    pub fn notify(&mut self, event: &GridEvent<T>) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(event);
        }
    }
}

impl<T: Clone + 'static> Observers<T> {
    /// Forwards every event into a channel. A closed receiver is ignored, the
    /// same way a dropped renderer must not disturb generation.
    pub fn subscribe_channel(&mut self, sender: Sender<GridEvent<T>>) -> ObserverId {
        self.subscribe(Box::new(move |event: &GridEvent<T>| {
            let _ = sender.send(event.clone());
        }))
    }
}
