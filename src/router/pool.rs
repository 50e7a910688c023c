use std::sync::{Mutex, PoisonError};

/// Buffers kept around for reuse; more than this are dropped on release.
const MAX_POOLED_BUFFERS: usize = 16;

/// Pool of scratch `String` buffers for URL generation.
///
/// Acquire-use-release; safe to share between threads. A poisoned lock is
/// recovered since the list stays consistent.
#[derive(Debug, Default)]
pub(crate) struct BufferPool {
    buffers: Mutex<Vec<String>>,
}

impl BufferPool {
    pub(crate) fn acquire(&self) -> String {
        self.buffers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default()
    }

    pub(crate) fn release(&self, mut buffer: String) {
        buffer.clear();
        let mut buffers = self.buffers.lock().unwrap_or_else(PoisonError::into_inner);
        if buffers.len() < MAX_POOLED_BUFFERS {
            buffers.push(buffer);
        }
    }

    #[cfg(test)]
    fn pooled(&self) -> usize {
        self.buffers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
