// Renderer - owns every Vulkan object and drives frames
//
// Construction order (teardown runs the exact reverse):
//   instance → debug messenger → surface → device → swapchain → image views
//   → render pass → pipeline layout → pipeline → framebuffers
//   → command pool → sync objects

use super::commands::{self, DrawTarget};
use super::device::{DeviceRequirements, VulkanDevice};
use super::error::{RendererError, Result};
use super::frame::{self, FrameBackend, FrameReport, PresentOutcome};
use super::pipeline;
use super::swapchain::Swapchain;
use super::sync::FrameSync;
use super::teardown::{ResourceKind, TeardownStack};
use ash::{vk, Entry};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
use std::path::PathBuf;

/// Everything the renderer needs besides the window
#[derive(Debug, Clone)]
pub struct RendererSettings {
    pub app_name: String,
    pub requirements: DeviceRequirements,
    pub vert_shader: PathBuf,
    pub frag_shader: PathBuf,
    pub clear_color: [f32; 4],
}

/// Native window pieces the renderer consumes
#[derive(Debug, Clone, Copy)]
pub struct WindowTarget {
    pub display_handle: RawDisplayHandle,
    pub window_handle: RawWindowHandle,
    /// Drawable size in pixels
    pub drawable: vk::Extent2D,
}

pub struct Renderer {
    device: VulkanDevice,
    swapchain: Swapchain,

    render_pass: vk::RenderPass,
    pipeline: vk::Pipeline,
    framebuffers: Vec<vk::Framebuffer>,

    command_buffer: vk::CommandBuffer,
    sync: FrameSync,

    clear_color: [f32; 4],
    frame_count: u64,

    teardown: TeardownStack,
    // Dropped last
    _entry: Entry,
}

impl Renderer {
    /// Build the whole presentation pipeline. On failure everything created
    /// so far is destroyed again, newest first.
    pub fn new(target: WindowTarget, settings: &RendererSettings) -> Result<Self> {
        log::info!("Initializing Vulkan...");

        let entry = unsafe { Entry::load() }?;
        let mut teardown = TeardownStack::new();

        // ─────────────────────────────────────────────────────────────────
        // Device negotiation
        // ─────────────────────────────────────────────────────────────────
        let device = VulkanDevice::new(
            &entry,
            &settings.app_name,
            target.display_handle,
            target.window_handle,
            &settings.requirements,
            &mut teardown,
        )?;

        // ─────────────────────────────────────────────────────────────────
        // Swap chain + image views
        // ─────────────────────────────────────────────────────────────────
        let swapchain = Swapchain::new(&device, target.drawable, &mut teardown)?;

        // ─────────────────────────────────────────────────────────────────
        // Render pass, pipeline, framebuffers
        // ─────────────────────────────────────────────────────────────────
        let vk_device = &device.device;

        log::info!("Creating render pass...");
        let render_pass = pipeline::create_render_pass(vk_device, swapchain.format())?;
        {
            let d = vk_device.clone();
            teardown.push(ResourceKind::RenderPass, move || unsafe {
                d.destroy_render_pass(render_pass, None);
            });
        }

        log::info!("Creating graphics pipeline...");
        let pipeline_layout = pipeline::create_pipeline_layout(vk_device)?;
        {
            let d = vk_device.clone();
            teardown.push(ResourceKind::PipelineLayout, move || unsafe {
                d.destroy_pipeline_layout(pipeline_layout, None);
            });
        }

        let graphics_pipeline = pipeline::create_graphics_pipeline(
            vk_device,
            pipeline_layout,
            render_pass,
            &settings.vert_shader,
            &settings.frag_shader,
        )?;
        {
            let d = vk_device.clone();
            teardown.push(ResourceKind::Pipeline, move || unsafe {
                d.destroy_pipeline(graphics_pipeline, None);
            });
        }

        log::info!("Creating {} framebuffers...", swapchain.image_views.len());
        let framebuffers =
            pipeline::create_framebuffers(vk_device, &swapchain.image_views, render_pass, swapchain.extent())?;
        {
            let d = vk_device.clone();
            let framebuffers = framebuffers.clone();
            teardown.push(ResourceKind::Framebuffers, move || unsafe {
                for framebuffer in framebuffers {
                    d.destroy_framebuffer(framebuffer, None);
                }
            });
        }

        // ─────────────────────────────────────────────────────────────────
        // Commands + synchronization
        // ─────────────────────────────────────────────────────────────────
        log::info!("Creating command pool and buffer...");
        let command_pool = commands::create_command_pool(vk_device, device.graphics_queue_family)?;
        {
            // Also frees the command buffer
            let d = vk_device.clone();
            teardown.push(ResourceKind::CommandPool, move || unsafe {
                d.destroy_command_pool(command_pool, None);
            });
        }
        let command_buffer = commands::allocate_command_buffer(vk_device, command_pool)?;

        log::info!("Creating synchronization objects...");
        let sync = FrameSync::new(vk_device)?;
        {
            let d = vk_device.clone();
            teardown.push(ResourceKind::SyncObjects, move || sync.destroy(&d));
        }

        log::info!("Vulkan initialized successfully!");

        Ok(Self {
            device,
            swapchain,
            render_pass,
            pipeline: graphics_pipeline,
            framebuffers,
            command_buffer,
            sync,
            clear_color: settings.clear_color,
            frame_count: 0,
            teardown,
            _entry: entry,
        })
    }

    /// Wait, acquire, record, submit, present
    pub fn render_frame(&mut self) -> Result<FrameReport> {
        let report = frame::draw_frame(self)?;

        self.frame_count += 1;
        if self.frame_count % 1000 == 0 {
            log::debug!("Rendered {} frames", self.frame_count);
        }

        Ok(report)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Let the GPU drain. Nothing may be destroyed before this returns.
    pub fn wait_idle(&self) {
        if let Err(e) = self.device.wait_idle() {
            log::error!("Waiting for device idle failed: {:?}", e);
        }
    }
}

impl FrameBackend for Renderer {
    fn wait_for_previous_frame(&mut self) -> Result<()> {
        self.sync.wait_and_reset(&self.device.device)
    }

    fn acquire_next_image(&mut self) -> Result<u32> {
        let (image_index, suboptimal) = self
            .swapchain
            .acquire_next_image(self.sync.image_available)
            .map_err(RendererError::ImageAcquireFailed)?;
        if suboptimal {
            log::debug!("Acquired image {} from a suboptimal swapchain", image_index);
        }
        Ok(image_index)
    }

    fn record(&mut self, image_index: u32) -> Result<()> {
        let framebuffer = self
            .framebuffers
            .get(image_index as usize)
            .copied()
            .ok_or(RendererError::CommandBufferRecordFailed(vk::Result::ERROR_UNKNOWN))?;

        let target = DrawTarget {
            render_pass: self.render_pass,
            framebuffer,
            pipeline: self.pipeline,
            extent: self.swapchain.extent(),
            clear_color: self.clear_color,
        };
        commands::record_command_buffer(&self.device.device, self.command_buffer, &target)
    }

    fn submit(&mut self) -> Result<()> {
        let wait_semaphores = [self.sync.image_available];
        let wait_stages = [vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
        let command_buffers = [self.command_buffer];
        let signal_semaphores = [self.sync.render_finished];

        let submit_info = vk::SubmitInfo::builder()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores)
            .build();

        unsafe {
            self.device
                .device
                .queue_submit(self.device.graphics_queue, &[submit_info], self.sync.in_flight_fence)
        }
        .map_err(RendererError::QueueSubmitFailed)
    }

    fn present(&mut self, image_index: u32) -> PresentOutcome {
        PresentOutcome::from_result(self.swapchain.present(
            self.device.present_queue,
            image_index,
            &[self.sync.render_finished],
        ))
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        log::info!("Cleaning up Vulkan resources...");

        // Wait for GPU to finish before destroying anything
        self.wait_idle();

        let destroyed = self.teardown.unwind();
        log::debug!("Teardown order: {:?}", destroyed);
        log::info!("Cleanup complete ({} frames rendered)", self.frame_count);
    }
}
