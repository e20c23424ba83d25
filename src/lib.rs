// Vulkan triangle renderer
//
// backend/  device negotiation, swapchain, pipeline, frame execution
// config    config.toml loading
// console   colored log output

pub mod backend;
pub mod config;
pub mod console;
