// Backend module - Vulkan layer
//
// Design: thin wrapper around ash, every object registered on an ordered
// teardown stack the moment it exists.

pub mod commands;
pub mod device;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod renderer;
pub mod shader;
pub mod swapchain;
pub mod sync;
pub mod teardown;

pub use device::{DeviceRequirements, VulkanDevice};
pub use error::{RendererError, Result};
pub use renderer::{Renderer, RendererSettings, WindowTarget};
pub use swapchain::Swapchain;
