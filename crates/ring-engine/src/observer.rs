//! Active-index observers

use ring_layout::IndexChange;
use std::fmt;

/// Handle returned by a subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Handler = Box<dyn FnMut(IndexChange)>;

/// Ordered list of index-change handlers
#[derive(Default)]
pub struct ObserverList {
    next_id: u64,
    handlers: Vec<(ObserverId, Handler)>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(IndexChange) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Call every handler in subscription order
    pub fn notify(&mut self, change: IndexChange) {
        for (_, handler) in &mut self.handlers {
            handler(change);
        }
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_order_and_unsubscribe() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut list = ObserverList::new();

        let first = {
            let seen = Rc::clone(&seen);
            list.subscribe(move |change| seen.borrow_mut().push(("first", change.current)))
        };
        {
            let seen = Rc::clone(&seen);
            list.subscribe(move |change| seen.borrow_mut().push(("second", change.current)));
        }

        list.notify(IndexChange { previous: 0, current: 1 });
        assert!(list.unsubscribe(first));
        assert!(!list.unsubscribe(first));
        list.notify(IndexChange { previous: 1, current: 2 });

        assert_eq!(
            *seen.borrow(),
            vec![("first", 1), ("second", 1), ("second", 2)]
        );
        assert_eq!(list.len(), 1);
    }
}
