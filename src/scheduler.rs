//! Frame scheduler
//!
//! The host calls `FrameLoop::frame` once per display refresh (from
//! `requestAnimationFrame` on the web, a plain loop natively). Each call runs
//! one simulation tick, hands the frozen snapshot to the renderer, and says
//! whether another frame should be scheduled. The loop stops for good once the
//! run is over or its `LoopHandle` has been cancelled (view unmounted).

use std::cell::Cell;
use std::rc::Rc;

use crate::renderer::Renderer;
use crate::session::Session;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// Schedule the next frame
    Running,
    /// Run ended (lives reached zero)
    Halted,
    /// Torn down by the host
    Cancelled,
}

impl LoopStatus {
    pub fn is_running(self) -> bool {
        self == LoopStatus::Running
    }
}

/// Cancellation token shared between the loop and whoever owns the view
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    cancelled: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Undo a cancel, e.g. when a suspended page is restored
    pub fn resume(&self) {
        self.cancelled.set(false);
    }
}

/// Drives one tick per frame
#[derive(Debug, Default)]
pub struct FrameLoop {
    handle: LoopHandle,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that stops this loop when cancelled
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Frames that actually ticked
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame: tick, then draw
    pub fn frame<R: Renderer + ?Sized>(
        &mut self,
        session: &mut Session,
        renderer: &mut R,
    ) -> LoopStatus {
        if self.handle.is_cancelled() {
            return LoopStatus::Cancelled;
        }
        if session.is_over() {
            return LoopStatus::Halted;
        }

        session.advance();
        renderer.draw(&session.snapshot());
        self.frames += 1;

        if session.is_over() {
            LoopStatus::Halted
        } else {
            LoopStatus::Running
        }
    }

    /// Headless driver: run frames until the loop stops or `max_frames` elapse,
    /// calling `before_frame` ahead of each one to feed input.
    pub fn run_for<R, F>(
        &mut self,
        session: &mut Session,
        renderer: &mut R,
        max_frames: u64,
        mut before_frame: F,
    ) -> LoopStatus
    where
        R: Renderer + ?Sized,
        F: FnMut(&mut Session),
    {
        let mut status = LoopStatus::Running;
        for _ in 0..max_frames {
            before_frame(session);
            status = self.frame(session, renderer);
            if !status.is_running() {
                break;
            }
        }
        status
    }
}
