/// Holds superseded backing buffers until they are explicitly released.
///
/// The reallocating stores ([`ArrayStore`][crate::ArrayStore] and
/// [`StackStore`][crate::StackStore]) do not free an outgrown buffer at the moment it
/// is replaced. The old buffer is parked here instead, so a burst of growth does not
/// immediately pay the deallocation cost on the hot path.
///
/// In the original formulation of this design the old buffers were kept behind
/// references that a garbage collector could reclaim under memory pressure. Rust has
/// no memory-pressure-aware reclaimer, so retention is an explicit list with manual
/// release: buffers stay alive until [`release()`][Self::release] is called or the
/// owning store is dropped.
#[derive(Debug)]
pub(crate) struct RetainedBuffers<B> {
    buffers: Vec<B>,
}

impl<B> RetainedBuffers<B> {
    pub(crate) fn new() -> Self {
        Self {
            buffers: Vec::new(),
        }
    }

    /// Parks a superseded buffer.
    pub(crate) fn retain(&mut self, buffer: B) {
        self.buffers.push(buffer);
    }

    /// Drops every retained buffer, including the registry's own spine.
    ///
    /// Idempotent: releasing an already-empty registry does nothing.
    pub(crate) fn release(&mut self) {
        self.buffers = Vec::new();
    }

    pub(crate) fn len(&self) -> usize {
        self.buffers.len()
    }
}
