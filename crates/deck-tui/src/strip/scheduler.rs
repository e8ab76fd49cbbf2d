//! Two-phase frame scheduling: geometry reads run synchronously during the
//! read phase, tree writes are queued and applied as one batch before the
//! next draw. A write can register a follow-up that runs after the batch
//! containing it — how a forced non-animated relayout re-enables animations
//! for the frames after it.

pub type WriteOp<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Handle for sequencing a follow-up after a queued write has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteToken(u64);

struct QueuedWrite<T> {
    token: WriteToken,
    op: WriteOp<T>,
}

pub struct FrameScheduler<T> {
    writes: Vec<QueuedWrite<T>>,
    follow_ups: Vec<(WriteToken, WriteOp<T>)>,
    next_token: u64,
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            follow_ups: Vec::new(),
            next_token: 0,
        }
    }

    /// Read phase: runs immediately, before any queued write lands.
    pub fn measure<R>(&self, read: impl FnOnce() -> R) -> R {
        read()
    }

    /// Queue a write for the next flush. Writes apply in queue order.
    pub fn mutate(&mut self, op: WriteOp<T>) -> WriteToken {
        let token = WriteToken(self.next_token);
        self.next_token += 1;
        self.writes.push(QueuedWrite { token, op });
        token
    }

    /// Run `op` after the flush that applies `token`'s write.
    pub fn after_flush(&mut self, token: WriteToken, op: WriteOp<T>) {
        self.follow_ups.push((token, op));
    }

    /// Drop everything queued. Used when the segment list is rebuilt and
    /// pending writes would target stale indices.
    pub fn clear(&mut self) {
        self.writes.clear();
        self.follow_ups.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.writes.is_empty()
    }

    /// Write phase: apply queued writes in order, then any follow-ups whose
    /// write was part of this batch. Returns true if anything ran.
    pub fn flush(&mut self, tree: &mut T) -> bool {
        if self.writes.is_empty() {
            return false;
        }
        let writes = std::mem::take(&mut self.writes);
        let applied: Vec<WriteToken> = writes.iter().map(|w| w.token).collect();
        for w in writes {
            (w.op)(tree);
        }
        let follow_ups = std::mem::take(&mut self.follow_ups);
        for (token, op) in follow_ups {
            if applied.contains(&token) {
                op(tree);
            } else {
                self.follow_ups.push((token, op));
            }
        }
        true
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
