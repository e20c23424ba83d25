// Synchronization primitives
//
// One set for the single frame in flight:
// - image_available: acquire → submit (GPU side)
// - render_finished: submit → present (GPU side)
// - in_flight_fence: GPU done with the command buffer → CPU may re-record

use super::error::{RendererError, Result};
use ash::vk;

#[derive(Debug, Clone, Copy)]
pub struct FrameSync {
    pub image_available: vk::Semaphore,
    pub render_finished: vk::Semaphore,
    pub in_flight_fence: vk::Fence,
}

impl FrameSync {
    pub fn new(device: &ash::Device) -> Result<Self> {
        let semaphore_info = vk::SemaphoreCreateInfo::builder();
        // Start signaled so the very first wait returns at once
        let fence_info = vk::FenceCreateInfo::builder().flags(vk::FenceCreateFlags::SIGNALED);

        unsafe {
            let image_available = device
                .create_semaphore(&semaphore_info, None)
                .map_err(RendererError::SyncObjectCreationFailed)?;

            let render_finished = match device.create_semaphore(&semaphore_info, None) {
                Ok(semaphore) => semaphore,
                Err(e) => {
                    device.destroy_semaphore(image_available, None);
                    return Err(RendererError::SyncObjectCreationFailed(e));
                }
            };

            let in_flight_fence = match device.create_fence(&fence_info, None) {
                Ok(fence) => fence,
                Err(e) => {
                    device.destroy_semaphore(render_finished, None);
                    device.destroy_semaphore(image_available, None);
                    return Err(RendererError::SyncObjectCreationFailed(e));
                }
            };

            Ok(Self {
                image_available,
                render_finished,
                in_flight_fence,
            })
        }
    }

    pub fn destroy(&self, device: &ash::Device) {
        unsafe {
            device.destroy_fence(self.in_flight_fence, None);
            device.destroy_semaphore(self.render_finished, None);
            device.destroy_semaphore(self.image_available, None);
        }
    }

    /// Block until the previous submission is done, then re-arm the fence
    pub fn wait_and_reset(&self, device: &ash::Device) -> Result<()> {
        unsafe {
            device
                .wait_for_fences(&[self.in_flight_fence], true, u64::MAX)
                .map_err(RendererError::FrameWaitFailed)?;
            device
                .reset_fences(&[self.in_flight_fence])
                .map_err(RendererError::FrameWaitFailed)?;
        }
        Ok(())
    }
}
