//! Deferred work that runs once the next frame has been painted.
//!
//! Components request a [`FrameTask`] and keep the returned [`FrameHandle`].
//! The runtime drains due tasks right after `terminal.draw`, so a task never
//! runs in the same pass that scheduled it. Cancelling a handle (before
//! rescheduling, or when the owner unmounts) guarantees the task is dropped.

use navkit_types::SectionId;
use tracing::trace;

/// Opaque ticket for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Work that can be deferred to the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// Collapse the rollup of a section.
    CollapseSection(SectionId),
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_handle: u64,
    queued: Vec<(FrameHandle, FrameTask)>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` for the next frame.
    pub fn request(&mut self, task: FrameTask) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        trace!(?handle, ?task, "frame task requested");
        self.queued.push((handle, task));
        handle
    }

    /// Drops a queued task. Returns false when it already ran or was
    /// cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        let before = self.queued.len();
        self.queued.retain(|(queued, _)| *queued != handle);
        let removed = self.queued.len() != before;
        if removed {
            trace!(?handle, "frame task cancelled");
        }
        removed
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.queued.iter().any(|(queued, _)| *queued == handle)
    }

    pub fn has_pending(&self) -> bool {
        !self.queued.is_empty()
    }

    /// Removes and returns every task queued so far, in request order, with
    /// the handle it was issued under.
    pub fn take_due(&mut self) -> Vec<(FrameHandle, FrameTask)> {
        std::mem::take(&mut self.queued)
    }
}
