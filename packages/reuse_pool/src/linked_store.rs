use crate::BackingStore;

/// One link in the chain of available instances.
///
/// Also used as the overflow tier of [`TieredStore`][crate::TieredStore].
#[derive(Debug)]
pub(crate) struct Node<E> {
    pub(crate) instance: E,
    pub(crate) next: Option<Box<Node<E>>>,
}

/// A backing store that keeps available instances in a singly linked node chain.
///
/// This is the simplest growth strategy: when the chain is empty, `take()` invokes the
/// factory for exactly one new instance, and every `put()` allocates exactly one new
/// node. There is no batch growth and no free-slot bookkeeping - a node is always
/// createable, so `put()` never needs a capacity check.
///
/// The tradeoff is the worst cache locality of the five stores (every instance sits
/// behind its own heap allocation) and one allocation per `put()`. In exchange, the
/// logic is trivial and growth is perfectly incremental.
///
/// Capacity for this store is the high-water mark of instances the store has had in
/// circulation; there is no such thing as an allocated-but-empty node.
#[derive(Debug)]
pub struct LinkedStore<E> {
    head: Option<Box<Node<E>>>,
    available: usize,
    capacity: usize,
}

impl<E> LinkedStore<E> {
    pub(crate) fn new() -> Self {
        Self {
            head: None,
            available: 0,
            capacity: 0,
        }
    }
}

impl<E> Drop for LinkedStore<E> {
    fn drop(&mut self) {
        // The default drop would recurse once per node and could overflow the
        // stack on a long chain, so we unlink iteratively instead.
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl<E> BackingStore<E> for LinkedStore<E> {
    fn take(&mut self, factory: &mut dyn FnMut() -> E) -> E {
        match self.head.take() {
            Some(node) => {
                let Node { instance, next } = *node;
                self.head = next;
                self.available = self
                    .available
                    .checked_sub(1)
                    .expect("a node was popped, so at least one instance was available");
                instance
            }
            None => {
                // Grow-by-one: the chain is empty, so materialize a fresh instance.
                // It is handed out immediately and never passes through a node.
                self.capacity = self
                    .capacity
                    .checked_add(1)
                    .expect("capacity overflow: more instances than virtual memory can fit");
                factory()
            }
        }
    }

    fn put(&mut self, instance: E) {
        let node = Box::new(Node {
            instance,
            next: self.head.take(),
        });
        self.head = Some(node);
        self.available = self
            .available
            .checked_add(1)
            .expect("available count overflow: more instances than virtual memory can fit");

        // Externally donated instances push the high-water mark up through this path.
        self.capacity = self.capacity.max(self.available);
    }

    fn available(&self) -> usize {
        self.available
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
