// Swapchain - Window presentation
//
// Reconciles what the surface supports with what we want (BGRA8 sRGB,
// mailbox, one image above the minimum) and builds the image chain plus one
// view per image.

use super::device::VulkanDevice;
use super::error::{RendererError, Result};
use super::teardown::{ResourceKind, TeardownStack};
use ash::extensions::khr;
use ash::vk;

/// Everything the surface reports for one (physical device, surface) pair
#[derive(Debug, Clone, Default)]
pub struct SurfaceSupport {
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    pub formats: Vec<vk::SurfaceFormatKHR>,
    pub present_modes: Vec<vk::PresentModeKHR>,
}

impl SurfaceSupport {
    pub fn query(
        surface_loader: &khr::Surface,
        physical_device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
    ) -> std::result::Result<Self, vk::Result> {
        unsafe {
            Ok(Self {
                capabilities: surface_loader
                    .get_physical_device_surface_capabilities(physical_device, surface)?,
                formats: surface_loader.get_physical_device_surface_formats(physical_device, surface)?,
                present_modes: surface_loader
                    .get_physical_device_surface_present_modes(physical_device, surface)?,
            })
        }
    }
}

/// Choices fixed for the lifetime of one swap chain
#[derive(Debug, Clone, Copy)]
pub struct SwapSurfaceConfig {
    pub format: vk::SurfaceFormatKHR,
    pub present_mode: vk::PresentModeKHR,
    pub extent: vk::Extent2D,
    pub image_count: u32,
}

impl SwapSurfaceConfig {
    /// Negotiate against the surface. `None` only when the surface lists no
    /// formats at all.
    pub fn negotiate(support: &SurfaceSupport, drawable: vk::Extent2D) -> Option<Self> {
        Some(Self {
            format: choose_surface_format(&support.formats)?,
            present_mode: choose_present_mode(&support.present_modes),
            extent: choose_extent(&support.capabilities, drawable),
            image_count: choose_image_count(&support.capabilities),
        })
    }
}

/// BGRA8 sRGB with the sRGB non-linear color space if offered, otherwise the
/// first listed format.
pub fn choose_surface_format(formats: &[vk::SurfaceFormatKHR]) -> Option<vk::SurfaceFormatKHR> {
    formats
        .iter()
        .find(|f| {
            f.format == vk::Format::B8G8R8A8_SRGB && f.color_space == vk::ColorSpaceKHR::SRGB_NONLINEAR
        })
        .or_else(|| formats.first())
        .copied()
}

/// MAILBOX: no vsync stall, newest image replaces the queued one
/// FIFO: vsync, always supported
pub fn choose_present_mode(present_modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    present_modes
        .iter()
        .copied()
        .find(|&mode| mode == vk::PresentModeKHR::MAILBOX)
        .unwrap_or(vk::PresentModeKHR::FIFO)
}

/// Surface's current extent, unless it reports the `u32::MAX` "you pick"
/// sentinel, in which case the drawable size clamped into the surface bounds.
pub fn choose_extent(capabilities: &vk::SurfaceCapabilitiesKHR, drawable: vk::Extent2D) -> vk::Extent2D {
    if capabilities.current_extent.width != u32::MAX {
        return capabilities.current_extent;
    }

    let min = capabilities.min_image_extent;
    let max = capabilities.max_image_extent;
    // max/min rather than clamp(): a misreporting driver must not panic us
    vk::Extent2D {
        width: drawable.width.max(min.width).min(max.width),
        height: drawable.height.max(min.height).min(max.height),
    }
}

/// One above the minimum, capped by the maximum (0 means no maximum)
pub fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let count = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 && count > capabilities.max_image_count {
        capabilities.max_image_count
    } else {
        count
    }
}

/// Exclusive when one family does both jobs, concurrent across the two
/// families otherwise.
pub fn image_sharing(graphics_family: u32, present_family: u32) -> (vk::SharingMode, Vec<u32>) {
    if graphics_family == present_family {
        (vk::SharingMode::EXCLUSIVE, Vec::new())
    } else {
        (vk::SharingMode::CONCURRENT, vec![graphics_family, present_family])
    }
}

pub struct Swapchain {
    pub swapchain: vk::SwapchainKHR,
    pub swapchain_loader: khr::Swapchain,
    pub images: Vec<vk::Image>,
    pub image_views: Vec<vk::ImageView>,
    pub config: SwapSurfaceConfig,
}

impl Swapchain {
    pub fn new(device: &VulkanDevice, drawable: vk::Extent2D, teardown: &mut TeardownStack) -> Result<Self> {
        log::info!("Creating swapchain for a {}x{} window", drawable.width, drawable.height);

        let support = SurfaceSupport::query(&device.surface_loader, device.physical_device, device.surface)
            .map_err(RendererError::SwapchainCreationFailed)?;
        let config = SwapSurfaceConfig::negotiate(&support, drawable)
            .ok_or(RendererError::SwapchainCreationFailed(vk::Result::ERROR_FORMAT_NOT_SUPPORTED))?;

        log::info!(
            "Swapchain config: {:?} / {:?}, {:?}, {}x{}, {} image(s) requested",
            config.format.format,
            config.format.color_space,
            config.present_mode,
            config.extent.width,
            config.extent.height,
            config.image_count
        );

        let (sharing_mode, queue_family_indices) =
            image_sharing(device.graphics_queue_family, device.present_queue_family);

        let create_info = vk::SwapchainCreateInfoKHR::builder()
            .surface(device.surface)
            .min_image_count(config.image_count)
            .image_format(config.format.format)
            .image_color_space(config.format.color_space)
            .image_extent(config.extent)
            .image_array_layers(1)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT)
            .image_sharing_mode(sharing_mode)
            .queue_family_indices(&queue_family_indices)
            .pre_transform(support.capabilities.current_transform)
            .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
            .present_mode(config.present_mode)
            .clipped(true)
            .old_swapchain(vk::SwapchainKHR::null());

        let swapchain_loader = khr::Swapchain::new(&device.instance, &device.device);
        let swapchain = unsafe { swapchain_loader.create_swapchain(&create_info, None) }
            .map_err(RendererError::SwapchainCreationFailed)?;
        {
            let loader = swapchain_loader.clone();
            teardown.push(ResourceKind::Swapchain, move || unsafe {
                loader.destroy_swapchain(swapchain, None);
            });
        }

        // The runtime may hand back more images than we asked for
        let images = unsafe { swapchain_loader.get_swapchain_images(swapchain) }
            .map_err(RendererError::SwapchainCreationFailed)?;
        log::info!("Created swapchain with {} images", images.len());

        let image_views = create_image_views(&device.device, &images, config.format.format)?;
        {
            let device = device.device.clone();
            let views = image_views.clone();
            teardown.push(ResourceKind::ImageViews, move || unsafe {
                for view in views {
                    device.destroy_image_view(view, None);
                }
            });
        }

        Ok(Self {
            swapchain,
            swapchain_loader,
            images,
            image_views,
            config,
        })
    }

    pub fn format(&self) -> vk::Format {
        self.config.format.format
    }

    pub fn extent(&self) -> vk::Extent2D {
        self.config.extent
    }

    /// Next presentable image, signalling `semaphore` when it is ready.
    /// Blocks without a timeout.
    pub fn acquire_next_image(&self, semaphore: vk::Semaphore) -> std::result::Result<(u32, bool), vk::Result> {
        unsafe {
            self.swapchain_loader
                .acquire_next_image(self.swapchain, u64::MAX, semaphore, vk::Fence::null())
        }
    }

    /// Queue `image_index` for display once `wait_semaphores` signal
    pub fn present(
        &self,
        queue: vk::Queue,
        image_index: u32,
        wait_semaphores: &[vk::Semaphore],
    ) -> std::result::Result<bool, vk::Result> {
        let swapchains = [self.swapchain];
        let image_indices = [image_index];

        let present_info = vk::PresentInfoKHR::builder()
            .wait_semaphores(wait_semaphores)
            .swapchains(&swapchains)
            .image_indices(&image_indices);

        unsafe { self.swapchain_loader.queue_present(queue, &present_info) }
    }
}

/// One 2D color view per image. Stops at the first failure and releases the
/// views made so far.
fn create_image_views(device: &ash::Device, images: &[vk::Image], format: vk::Format) -> Result<Vec<vk::ImageView>> {
    let mut views = Vec::with_capacity(images.len());

    for (index, &image) in images.iter().enumerate() {
        let create_info = vk::ImageViewCreateInfo::builder()
            .image(image)
            .view_type(vk::ImageViewType::TYPE_2D)
            .format(format)
            .components(vk::ComponentMapping {
                r: vk::ComponentSwizzle::IDENTITY,
                g: vk::ComponentSwizzle::IDENTITY,
                b: vk::ComponentSwizzle::IDENTITY,
                a: vk::ComponentSwizzle::IDENTITY,
            })
            .subresource_range(vk::ImageSubresourceRange {
                aspect_mask: vk::ImageAspectFlags::COLOR,
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: 0,
                layer_count: 1,
            });

        match unsafe { device.create_image_view(&create_info, None) } {
            Ok(view) => views.push(view),
            Err(result) => {
                for view in views.into_iter().rev() {
                    unsafe { device.destroy_image_view(view, None) };
                }
                return Err(RendererError::ImageViewCreationFailed { index, result });
            }
        }
    }

    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(format: vk::Format, color_space: vk::ColorSpaceKHR) -> vk::SurfaceFormatKHR {
        vk::SurfaceFormatKHR { format, color_space }
    }

    fn caps(min_extent: (u32, u32), max_extent: (u32, u32), current: (u32, u32)) -> vk::SurfaceCapabilitiesKHR {
        vk::SurfaceCapabilitiesKHR {
            min_image_count: 2,
            max_image_count: 0,
            current_extent: vk::Extent2D { width: current.0, height: current.1 },
            min_image_extent: vk::Extent2D { width: min_extent.0, height: min_extent.1 },
            max_image_extent: vk::Extent2D { width: max_extent.0, height: max_extent.1 },
            ..Default::default()
        }
    }

    fn extent(width: u32, height: u32) -> vk::Extent2D {
        vk::Extent2D { width, height }
    }

    fn key(f: Option<vk::SurfaceFormatKHR>) -> Option<(vk::Format, vk::ColorSpaceKHR)> {
        f.map(|f| (f.format, f.color_space))
    }

    const PREFERRED: vk::SurfaceFormatKHR = vk::SurfaceFormatKHR {
        format: vk::Format::B8G8R8A8_SRGB,
        color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
    };

    #[test]
    fn preferred_format_wins_anywhere_in_list() {
        let formats = [
            format(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            format(vk::Format::B8G8R8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            PREFERRED,
        ];
        assert_eq!(key(choose_surface_format(&formats)), key(Some(PREFERRED)));
    }

    #[test]
    fn falls_back_to_first_format() {
        let first = format(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR);
        // Right format, wrong color space does not count
        let formats = [
            first,
            format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::DISPLAY_P3_NONLINEAR_EXT),
        ];
        assert_eq!(key(choose_surface_format(&formats)), key(Some(first)));
        assert!(choose_surface_format(&[]).is_none());
    }

    #[test]
    fn mailbox_preferred_fifo_fallback() {
        let with_mailbox = [
            vk::PresentModeKHR::FIFO,
            vk::PresentModeKHR::IMMEDIATE,
            vk::PresentModeKHR::MAILBOX,
        ];
        assert_eq!(choose_present_mode(&with_mailbox), vk::PresentModeKHR::MAILBOX);

        let without = [vk::PresentModeKHR::IMMEDIATE, vk::PresentModeKHR::FIFO_RELAXED];
        assert_eq!(choose_present_mode(&without), vk::PresentModeKHR::FIFO);
        assert_eq!(choose_present_mode(&[]), vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn fixed_current_extent_is_used_verbatim() {
        let caps = caps((1, 1), (4096, 4096), (1024, 768));
        assert_eq!(choose_extent(&caps, extent(800, 600)), extent(1024, 768));
        assert_eq!(choose_extent(&caps, extent(10_000, 1)), extent(1024, 768));
    }

    #[test]
    fn sentinel_extent_clamps_each_axis() {
        let caps = caps((200, 100), (1920, 1080), (u32::MAX, u32::MAX));

        assert_eq!(choose_extent(&caps, extent(800, 600)), extent(800, 600));
        assert_eq!(choose_extent(&caps, extent(50, 5000)), extent(200, 1080));
        assert_eq!(choose_extent(&caps, extent(4000, 20)), extent(1920, 100));
    }

    #[test]
    fn clamped_extent_stays_in_bounds() {
        let caps = caps((64, 32), (640, 480), (u32::MAX, u32::MAX));
        let sizes = [0, 1, 31, 32, 33, 63, 64, 65, 479, 480, 481, 639, 640, 641, u32::MAX - 1, u32::MAX];

        for &w in &sizes {
            for &h in &sizes {
                let chosen = choose_extent(&caps, extent(w, h));
                assert!((64..=640).contains(&chosen.width), "{w}x{h} -> {chosen:?}");
                assert!((32..=480).contains(&chosen.height), "{w}x{h} -> {chosen:?}");
            }
        }
    }

    #[test]
    fn image_count_is_min_plus_one_capped() {
        let mut c = caps((1, 1), (1, 1), (1, 1));

        c.min_image_count = 2;
        c.max_image_count = 0;
        assert_eq!(choose_image_count(&c), 3);

        c.max_image_count = 2;
        assert_eq!(choose_image_count(&c), 2);

        c.max_image_count = 8;
        assert_eq!(choose_image_count(&c), 3);

        c.min_image_count = 1;
        c.max_image_count = 3;
        assert_eq!(choose_image_count(&c), 2);
    }

    #[test]
    fn sharing_follows_family_layout() {
        assert_eq!(image_sharing(0, 0), (vk::SharingMode::EXCLUSIVE, vec![]));
        assert_eq!(image_sharing(0, 2), (vk::SharingMode::CONCURRENT, vec![0, 2]));
    }

    #[test]
    fn negotiate_combines_choices() {
        let mut capabilities = caps((1, 1), (2000, 2000), (u32::MAX, u32::MAX));
        capabilities.min_image_count = 3;
        capabilities.max_image_count = 3;
        let support = SurfaceSupport {
            capabilities,
            formats: vec![
                format(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
                PREFERRED,
            ],
            present_modes: vec![vk::PresentModeKHR::FIFO],
        };

        let config = SwapSurfaceConfig::negotiate(&support, extent(800, 600)).unwrap();
        assert_eq!(key(Some(config.format)), key(Some(PREFERRED)));
        assert_eq!(config.present_mode, vk::PresentModeKHR::FIFO);
        assert_eq!(config.extent, extent(800, 600));
        assert_eq!(config.image_count, 3);

        let empty = SurfaceSupport {
            formats: Vec::new(),
            ..support
        };
        assert!(SwapSurfaceConfig::negotiate(&empty, extent(800, 600)).is_none());
    }
}
