// Renderer errors
//
// Every creation/recording step checks its result and surfaces one of these
// to the application driver. Nothing here is retried.

use ash::vk;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for everything in the backend
pub type Result<T> = std::result::Result<T, RendererError>;

#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Failed to load the Vulkan library: {0}")]
    LibraryLoadFailed(#[from] ash::LoadingError),

    #[error("Validation layers not available: {missing:?}")]
    LayersUnavailable { missing: Vec<String> },

    #[error("Failed to create a Vulkan instance: {0:?}")]
    InstanceCreationFailed(vk::Result),

    #[error("Failed to create the window surface: {0:?}")]
    SurfaceCreationFailed(vk::Result),

    #[error("Failed to find a GPU with Vulkan support")]
    NoGraphicsCapableDevice,

    #[error("Failed to find a suitable GPU")]
    NoSuitableDevice,

    #[error("Failed to create the logical device: {0:?}")]
    DeviceCreationFailed(vk::Result),

    #[error("Failed to create the swap chain: {0:?}")]
    SwapchainCreationFailed(vk::Result),

    #[error("Failed to create image view {index}: {result:?}")]
    ImageViewCreationFailed { index: usize, result: vk::Result },

    #[error("Failed to open file {path:?}: {source}")]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create shader module: {0}")]
    ShaderModuleCreationFailed(String),

    #[error("Failed to create the render pass: {0:?}")]
    RenderPassCreationFailed(vk::Result),

    #[error("Failed to create the pipeline layout: {0:?}")]
    PipelineLayoutCreationFailed(vk::Result),

    #[error("Failed to create the graphics pipeline: {0:?}")]
    PipelineCreationFailed(vk::Result),

    #[error("Failed to create framebuffer {index}: {result:?}")]
    FramebufferCreationFailed { index: usize, result: vk::Result },

    #[error("Failed to create the command pool: {0:?}")]
    CommandPoolCreationFailed(vk::Result),

    #[error("Failed to allocate the command buffer: {0:?}")]
    CommandBufferAllocationFailed(vk::Result),

    #[error("Failed to record the command buffer: {0:?}")]
    CommandBufferRecordFailed(vk::Result),

    #[error("Failed to create synchronization objects: {0:?}")]
    SyncObjectCreationFailed(vk::Result),

    #[error("Failed waiting for the in-flight fence: {0:?}")]
    FrameWaitFailed(vk::Result),

    #[error("Failed to acquire a swap chain image: {0:?}")]
    ImageAcquireFailed(vk::Result),

    #[error("Failed to submit the draw command buffer: {0:?}")]
    QueueSubmitFailed(vk::Result),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = RendererError::LayersUnavailable {
            missing: vec!["VK_LAYER_KHRONOS_validation".to_string()],
        };
        assert!(err.to_string().contains("VK_LAYER_KHRONOS_validation"));

        let err = RendererError::FramebufferCreationFailed {
            index: 2,
            result: vk::Result::ERROR_OUT_OF_HOST_MEMORY,
        };
        let msg = err.to_string();
        assert!(msg.contains("framebuffer 2"));
        assert!(msg.contains("ERROR_OUT_OF_HOST_MEMORY"));
    }

    #[test]
    fn file_open_keeps_io_source() {
        use std::error::Error as _;
        let err = RendererError::FileOpenFailed {
            path: PathBuf::from("shaders/missing.spv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.spv"));
    }
}
