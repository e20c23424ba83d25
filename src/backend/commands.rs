// Command pool, the single command buffer, and per-frame recording

use super::error::{RendererError, Result};
use super::pipeline::{full_scissor, full_viewport};
use ash::vk;

/// Pool on the graphics family whose buffers can be reset one by one
pub fn create_command_pool(device: &ash::Device, graphics_queue_family: u32) -> Result<vk::CommandPool> {
    let pool_info = vk::CommandPoolCreateInfo::builder()
        .queue_family_index(graphics_queue_family)
        .flags(vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER);

    unsafe { device.create_command_pool(&pool_info, None) }.map_err(RendererError::CommandPoolCreationFailed)
}

/// One primary command buffer, freed together with its pool
pub fn allocate_command_buffer(device: &ash::Device, command_pool: vk::CommandPool) -> Result<vk::CommandBuffer> {
    let alloc_info = vk::CommandBufferAllocateInfo::builder()
        .command_pool(command_pool)
        .level(vk::CommandBufferLevel::PRIMARY)
        .command_buffer_count(1);

    let buffers = unsafe { device.allocate_command_buffers(&alloc_info) }
        .map_err(RendererError::CommandBufferAllocationFailed)?;

    buffers
        .into_iter()
        .next()
        .ok_or(RendererError::CommandBufferAllocationFailed(vk::Result::ERROR_UNKNOWN))
}

/// What one frame's recording draws into
#[derive(Debug, Clone, Copy)]
pub struct DrawTarget {
    pub render_pass: vk::RenderPass,
    pub framebuffer: vk::Framebuffer,
    pub pipeline: vk::Pipeline,
    pub extent: vk::Extent2D,
    pub clear_color: [f32; 4],
}

/// Vertex count of the triangle generated by the vertex shader
pub const TRIANGLE_VERTEX_COUNT: u32 = 3;

/// Reset `command_buffer` and record one render pass drawing the triangle.
///
/// The caller must know the GPU is done with the previous recording.
pub fn record_command_buffer(
    device: &ash::Device,
    command_buffer: vk::CommandBuffer,
    target: &DrawTarget,
) -> Result<()> {
    unsafe {
        device
            .reset_command_buffer(command_buffer, vk::CommandBufferResetFlags::empty())
            .map_err(RendererError::CommandBufferRecordFailed)?;

        let begin_info = vk::CommandBufferBeginInfo::builder();
        device
            .begin_command_buffer(command_buffer, &begin_info)
            .map_err(RendererError::CommandBufferRecordFailed)?;

        let clear_values = [vk::ClearValue {
            color: vk::ClearColorValue {
                float32: target.clear_color,
            },
        }];

        let render_pass_info = vk::RenderPassBeginInfo::builder()
            .render_pass(target.render_pass)
            .framebuffer(target.framebuffer)
            .render_area(full_scissor(target.extent))
            .clear_values(&clear_values);

        device.cmd_begin_render_pass(command_buffer, &render_pass_info, vk::SubpassContents::INLINE);
        device.cmd_bind_pipeline(command_buffer, vk::PipelineBindPoint::GRAPHICS, target.pipeline);
        device.cmd_set_viewport(command_buffer, 0, &[full_viewport(target.extent)]);
        device.cmd_set_scissor(command_buffer, 0, &[full_scissor(target.extent)]);
        device.cmd_draw(command_buffer, TRIANGLE_VERTEX_COUNT, 1, 0, 0);
        device.cmd_end_render_pass(command_buffer);

        device
            .end_command_buffer(command_buffer)
            .map_err(RendererError::CommandBufferRecordFailed)?;
    }

    Ok(())
}
