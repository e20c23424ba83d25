// Frame execution
//
// FRAME TIMELINE (one frame in flight):
// ┌───────────────────────────────────────────────────────────────────┐
// │ wait fence ─> acquire ─> record ─> submit ─> present               │
// │ (CPU blocks   (blocks     (single   (waits on    (waits on          │
// │  on GPU)       on image)   buffer)   image sem)   render sem)       │
// └───────────────────────────────────────────────────────────────────┘
//
// The fence is the only thing standing between the GPU reading the command
// buffer and the CPU rewriting it.

use super::error::Result;
use ash::vk;

/// How a present request went. None of these stop the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    Presented,
    Suboptimal,
    OutOfDate,
    Failed(vk::Result),
}

impl PresentOutcome {
    pub fn from_result(result: std::result::Result<bool, vk::Result>) -> Self {
        match result {
            Ok(false) => Self::Presented,
            Ok(true) => Self::Suboptimal,
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => Self::OutOfDate,
            Err(e) => Self::Failed(e),
        }
    }
}

/// The five steps of a frame, as the executor sees them
pub trait FrameBackend {
    /// Wait for the in-flight fence, then reset it
    fn wait_for_previous_frame(&mut self) -> Result<()>;
    /// Index of the next presentable image; signals image-available
    fn acquire_next_image(&mut self) -> Result<u32>;
    /// Re-record the command buffer against the image's framebuffer
    fn record(&mut self, image_index: u32) -> Result<()>;
    /// Submit: wait image-available, signal render-finished + fence
    fn submit(&mut self) -> Result<()>;
    /// Present once render-finished signals
    fn present(&mut self, image_index: u32) -> PresentOutcome;
}

/// What one call to `draw_frame` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub image_index: u32,
    pub present: PresentOutcome,
}

/// Run one frame, strictly in order. Any failure before present aborts the
/// frame; present problems are only logged.
pub fn draw_frame<B: FrameBackend + ?Sized>(backend: &mut B) -> Result<FrameReport> {
    backend.wait_for_previous_frame()?;
    let image_index = backend.acquire_next_image()?;
    backend.record(image_index)?;
    backend.submit()?;

    let present = backend.present(image_index);
    match present {
        PresentOutcome::Presented => {}
        PresentOutcome::Suboptimal | PresentOutcome::OutOfDate => {
            log::debug!("Present of image {} reported {:?}", image_index, present);
        }
        PresentOutcome::Failed(e) => {
            log::warn!("Present of image {} failed: {:?}", image_index, e);
        }
    }

    Ok(FrameReport { image_index, present })
}
