// Vulkan Device - instance, surface, GPU selection, logical device
//
// Responsibilities:
// - Instance creation (window-system extensions, optional validation layers)
// - Debug messenger routing validation output into `log`
// - Surface creation for the window
// - Physical device selection (first suitable device, in enumeration order)
// - Logical device + graphics/present queues

use super::error::{RendererError, Result};
use super::teardown::{ResourceKind, TeardownStack};
use ash::extensions::{ext::DebugUtils, khr};
use ash::{vk, Entry};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
use std::collections::BTreeSet;
use std::ffi::{c_char, CStr, CString};

/// Layers and extensions the device negotiator asks for.
///
/// Passed in rather than hard-coded so alternative sets can be substituted.
#[derive(Debug, Clone)]
pub struct DeviceRequirements {
    pub enable_validation: bool,
    pub validation_layers: Vec<CString>,
    pub device_extensions: Vec<CString>,
}

impl Default for DeviceRequirements {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            validation_layers: vec![CString::from(c"VK_LAYER_KHRONOS_validation")],
            device_extensions: vec![CString::from(khr::Swapchain::name())],
        }
    }
}

impl DeviceRequirements {
    pub fn with_validation(mut self, enable: bool) -> Self {
        self.enable_validation = enable;
        self
    }
}

/// Graphics and present queue family indices of one physical device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    pub graphics: Option<u32>,
    pub present: Option<u32>,
}

impl QueueFamilyIndices {
    /// Scan a queue family table.
    ///
    /// `graphics` is the first family with the GRAPHICS bit, `present` the
    /// first family for which `supports_present` answers true. The scan
    /// stops as soon as both are known.
    pub fn find(
        families: &[vk::QueueFamilyProperties],
        mut supports_present: impl FnMut(u32) -> bool,
    ) -> Self {
        let mut indices = Self::default();

        for (index, family) in families.iter().enumerate() {
            let index = index as u32;

            if indices.graphics.is_none() && family.queue_flags.contains(vk::QueueFlags::GRAPHICS) {
                indices.graphics = Some(index);
            }
            if indices.present.is_none() && supports_present(index) {
                indices.present = Some(index);
            }
            if indices.is_complete() {
                break;
            }
        }

        indices
    }

    pub fn is_complete(&self) -> bool {
        self.graphics.is_some() && self.present.is_some()
    }

    /// `(graphics, present)` when both were found
    pub fn complete(&self) -> Option<(u32, u32)> {
        Some((self.graphics?, self.present?))
    }

    /// Distinct family indices, ascending. A combined graphics+present
    /// family yields a single entry.
    pub fn unique_families(&self) -> Vec<u32> {
        [self.graphics, self.present]
            .into_iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// What a candidate GPU offers for a given surface
#[derive(Debug, Clone, Default)]
pub struct DeviceSuitability {
    pub queue_families: QueueFamilyIndices,
    pub missing_extensions: Vec<String>,
    pub format_count: usize,
    pub present_mode_count: usize,
}

impl DeviceSuitability {
    pub fn is_suitable(&self) -> bool {
        self.queue_families.is_complete()
            && self.missing_extensions.is_empty()
            && self.format_count > 0
            && self.present_mode_count > 0
    }
}

/// Names in `wanted` that do not appear in `available`
fn missing_names<T>(wanted: &[CString], available: &[T], name_of: impl Fn(&T) -> &CStr) -> Vec<String> {
    wanted
        .iter()
        .filter(|name| !available.iter().any(|item| name_of(item) == name.as_c_str()))
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

/// Requested layers the runtime does not provide
pub fn missing_layers(requested: &[CString], available: &[vk::LayerProperties]) -> Vec<String> {
    missing_names(requested, available, |layer| unsafe {
        CStr::from_ptr(layer.layer_name.as_ptr())
    })
}

/// Required extensions a device does not provide
pub fn missing_extensions(required: &[CString], available: &[vk::ExtensionProperties]) -> Vec<String> {
    missing_names(required, available, |ext| unsafe {
        CStr::from_ptr(ext.extension_name.as_ptr())
    })
}

/// First candidate, in the given order, that `is_suitable` accepts.
///
/// No ranking: the earliest suitable entry wins.
pub fn select_first_suitable<T: Copy>(candidates: &[T], mut is_suitable: impl FnMut(T) -> bool) -> Result<T> {
    if candidates.is_empty() {
        return Err(RendererError::NoGraphicsCapableDevice);
    }

    candidates
        .iter()
        .copied()
        .find(|&candidate| is_suitable(candidate))
        .ok_or(RendererError::NoSuitableDevice)
}

/// Vulkan foundation: instance, surface, chosen GPU, logical device, queues.
///
/// Destruction is owned by the `TeardownStack` passed to `new`, not by this
/// struct.
pub struct VulkanDevice {
    pub instance: ash::Instance,
    pub surface_loader: khr::Surface,
    pub surface: vk::SurfaceKHR,
    pub physical_device: vk::PhysicalDevice,
    pub device: ash::Device,

    // Queue handles belong to the device, nothing to destroy
    pub graphics_queue: vk::Queue,
    pub graphics_queue_family: u32,
    pub present_queue: vk::Queue,
    pub present_queue_family: u32,

    pub properties: vk::PhysicalDeviceProperties,
}

impl VulkanDevice {
    /// Create instance → surface → physical device → logical device.
    ///
    /// Each object is registered on `teardown` as soon as it exists.
    pub fn new(
        entry: &Entry,
        app_name: &str,
        display_handle: RawDisplayHandle,
        window_handle: RawWindowHandle,
        requirements: &DeviceRequirements,
        teardown: &mut TeardownStack,
    ) -> Result<Self> {
        log::info!("Creating Vulkan device: {}", app_name);

        // Step 1: Instance
        let instance = Self::create_instance(entry, app_name, display_handle, requirements)?;
        {
            // The entry clone keeps the loader library alive until the
            // instance is gone
            let entry = entry.clone();
            let instance = instance.clone();
            teardown.push(ResourceKind::Instance, move || unsafe {
                instance.destroy_instance(None);
                drop(entry);
            });
        }

        // Step 2: Debug messenger
        if requirements.enable_validation {
            let (debug_utils, messenger) = Self::setup_debug_messenger(entry, &instance)?;
            teardown.push(ResourceKind::DebugMessenger, move || unsafe {
                debug_utils.destroy_debug_utils_messenger(messenger, None);
            });
        }

        // Step 3: Surface
        log::info!("Creating window surface...");
        let surface = unsafe {
            ash_window::create_surface(entry, &instance, display_handle, window_handle, None)
        }
        .map_err(RendererError::SurfaceCreationFailed)?;
        let surface_loader = khr::Surface::new(entry, &instance);
        {
            let surface_loader = surface_loader.clone();
            teardown.push(ResourceKind::Surface, move || unsafe {
                surface_loader.destroy_surface(surface, None);
            });
        }

        // Step 4: Physical device
        let (physical_device, queue_families) =
            Self::pick_physical_device(&instance, &surface_loader, surface, requirements)?;
        let (graphics_queue_family, present_queue_family) = queue_families
            .complete()
            .ok_or(RendererError::NoSuitableDevice)?;

        let properties = unsafe { instance.get_physical_device_properties(physical_device) };
        log::info!("Selected GPU: {}", device_name(&properties));
        log::info!(
            "Queue families: graphics={}, present={}",
            graphics_queue_family,
            present_queue_family
        );

        // Step 5: Logical device
        let device = Self::create_logical_device(&instance, physical_device, &queue_families, requirements)?;
        {
            let device = device.clone();
            teardown.push(ResourceKind::Device, move || unsafe {
                device.destroy_device(None);
            });
        }

        let graphics_queue = unsafe { device.get_device_queue(graphics_queue_family, 0) };
        let present_queue = unsafe { device.get_device_queue(present_queue_family, 0) };

        Ok(Self {
            instance,
            surface_loader,
            surface,
            physical_device,
            device,
            graphics_queue,
            graphics_queue_family,
            present_queue,
            present_queue_family,
            properties,
        })
    }

    fn create_instance(
        entry: &Entry,
        app_name: &str,
        display_handle: RawDisplayHandle,
        requirements: &DeviceRequirements,
    ) -> Result<ash::Instance> {
        log::info!("Creating Vulkan instance...");

        let app_name_cstr = CString::new(app_name).unwrap_or_else(|_| CString::from(c"Hello Triangle"));
        let engine_name = CString::from(c"No Engine");

        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name_cstr)
            .application_version(vk::make_api_version(0, 1, 0, 0))
            .engine_name(&engine_name)
            .engine_version(vk::make_api_version(0, 1, 0, 0))
            .api_version(vk::API_VERSION_1_3);

        // Extensions the window system needs for a surface
        let mut extensions: Vec<*const c_char> = ash_window::enumerate_required_extensions(display_handle)
            .map_err(RendererError::InstanceCreationFailed)?
            .to_vec();
        if requirements.enable_validation {
            extensions.push(DebugUtils::name().as_ptr());
        }

        if log::log_enabled!(log::Level::Debug) {
            if let Ok(available) = unsafe { entry.enumerate_instance_extension_properties(None) } {
                log::debug!("Available instance extensions: {}", available.len());
                for ext in &available {
                    let name = unsafe { CStr::from_ptr(ext.extension_name.as_ptr()) };
                    log::debug!("    {} | v.{}", name.to_string_lossy(), ext.spec_version);
                }
            }
        }

        // Validation layers must all exist before we try to create anything
        let layer_names: Vec<*const c_char> = if requirements.enable_validation {
            let available = unsafe { entry.enumerate_instance_layer_properties() }
                .map_err(RendererError::InstanceCreationFailed)?;
            let missing = missing_layers(&requirements.validation_layers, &available);
            if !missing.is_empty() {
                return Err(RendererError::LayersUnavailable { missing });
            }
            for layer in &requirements.validation_layers {
                log::debug!("Enabling layer {}", layer.to_string_lossy());
            }
            requirements.validation_layers.iter().map(|l| l.as_ptr()).collect()
        } else {
            Vec::new()
        };

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extensions)
            .enabled_layer_names(&layer_names);

        let instance = unsafe { entry.create_instance(&create_info, None) }
            .map_err(RendererError::InstanceCreationFailed)?;

        log::info!("Vulkan instance created");
        Ok(instance)
    }

    fn setup_debug_messenger(
        entry: &Entry,
        instance: &ash::Instance,
    ) -> Result<(DebugUtils, vk::DebugUtilsMessengerEXT)> {
        let debug_utils = DebugUtils::new(entry, instance);

        let create_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(
                vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE
                    | vk::DebugUtilsMessageSeverityFlagsEXT::INFO
                    | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            )
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            )
            .pfn_user_callback(Some(debug_callback));

        let messenger = unsafe { debug_utils.create_debug_utils_messenger(&create_info, None) }
            .map_err(RendererError::InstanceCreationFailed)?;

        Ok((debug_utils, messenger))
    }

    fn pick_physical_device(
        instance: &ash::Instance,
        surface_loader: &khr::Surface,
        surface: vk::SurfaceKHR,
        requirements: &DeviceRequirements,
    ) -> Result<(vk::PhysicalDevice, QueueFamilyIndices)> {
        let devices = unsafe { instance.enumerate_physical_devices() }.unwrap_or_else(|e| {
            log::warn!("Physical device enumeration failed: {:?}", e);
            Vec::new()
        });

        log::info!("Found {} Vulkan device(s)", devices.len());
        for &device in &devices {
            let props = unsafe { instance.get_physical_device_properties(device) };
            let memory = unsafe { instance.get_physical_device_memory_properties(device) };
            log::info!(
                "    {} ({:?}) API {}.{}.{} driver {:#x}, {} heap(s)",
                device_name(&props),
                props.device_type,
                vk::api_version_major(props.api_version),
                vk::api_version_minor(props.api_version),
                vk::api_version_patch(props.api_version),
                props.driver_version,
                memory.memory_heap_count,
            );
        }

        let mut chosen_families = QueueFamilyIndices::default();
        let chosen = select_first_suitable(&devices, |device| {
            let suitability = probe_device(instance, surface_loader, surface, device, requirements);
            let name = device_name(&unsafe { instance.get_physical_device_properties(device) });
            log::debug!("{}: {:?}", name, suitability);
            if suitability.is_suitable() {
                chosen_families = suitability.queue_families;
                true
            } else {
                log::info!("Skipping {}: not suitable", name);
                false
            }
        })?;

        Ok((chosen, chosen_families))
    }

    fn create_logical_device(
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        queue_families: &QueueFamilyIndices,
        requirements: &DeviceRequirements,
    ) -> Result<ash::Device> {
        log::info!("Creating logical device...");

        let queue_priorities = [1.0];
        let queue_create_infos: Vec<vk::DeviceQueueCreateInfo> = queue_families
            .unique_families()
            .into_iter()
            .map(|family| {
                vk::DeviceQueueCreateInfo::builder()
                    .queue_family_index(family)
                    .queue_priorities(&queue_priorities)
                    .build()
            })
            .collect();

        let extensions: Vec<*const c_char> = requirements
            .device_extensions
            .iter()
            .map(|ext| ext.as_ptr())
            .collect();

        // Device layers are ignored by current loaders but still requested
        // for older implementations
        let layer_names: Vec<*const c_char> = if requirements.enable_validation {
            requirements.validation_layers.iter().map(|l| l.as_ptr()).collect()
        } else {
            Vec::new()
        };

        let features = vk::PhysicalDeviceFeatures::default();

        #[allow(deprecated)]
        let create_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_create_infos)
            .enabled_extension_names(&extensions)
            .enabled_layer_names(&layer_names)
            .enabled_features(&features);

        let device = unsafe { instance.create_device(physical_device, &create_info, None) }
            .map_err(RendererError::DeviceCreationFailed)?;

        log::info!(
            "Logical device created with {} queue create info(s)",
            queue_create_infos.len()
        );
        Ok(device)
    }

    /// Wait for device to be idle (e.g., before cleanup)
    pub fn wait_idle(&self) -> std::result::Result<(), vk::Result> {
        unsafe { self.device.device_wait_idle() }
    }
}

/// Check one GPU against the surface and the required extensions.
///
/// Query failures count as "not offered".
pub fn probe_device(
    instance: &ash::Instance,
    surface_loader: &khr::Surface,
    surface: vk::SurfaceKHR,
    device: vk::PhysicalDevice,
    requirements: &DeviceRequirements,
) -> DeviceSuitability {
    let families = unsafe { instance.get_physical_device_queue_family_properties(device) };
    let queue_families = QueueFamilyIndices::find(&families, |index| {
        unsafe { surface_loader.get_physical_device_surface_support(device, index, surface) }
            .unwrap_or(false)
    });

    let available = unsafe { instance.enumerate_device_extension_properties(device) }.unwrap_or_default();
    let missing_extensions = missing_extensions(&requirements.device_extensions, &available);

    // Surface formats/modes only make sense once the swap chain extension is there
    let (format_count, present_mode_count) = if missing_extensions.is_empty() {
        let formats = unsafe { surface_loader.get_physical_device_surface_formats(device, surface) }
            .unwrap_or_default();
        let modes = unsafe { surface_loader.get_physical_device_surface_present_modes(device, surface) }
            .unwrap_or_default();
        (formats.len(), modes.len())
    } else {
        (0, 0)
    };

    DeviceSuitability {
        queue_families,
        missing_extensions,
        format_count,
        present_mode_count,
    }
}

fn device_name(properties: &vk::PhysicalDeviceProperties) -> String {
    unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

// Debug callback for validation layers
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    _message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _p_user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    if p_callback_data.is_null() || (*p_callback_data).p_message.is_null() {
        return vk::FALSE;
    }
    let message = CStr::from_ptr((*p_callback_data).p_message);

    match message_severity {
        vk::DebugUtilsMessageSeverityFlagsEXT::ERROR => {
            log::error!("[Vulkan] {}", message.to_string_lossy());
        }
        vk::DebugUtilsMessageSeverityFlagsEXT::WARNING => {
            log::warn!("[Vulkan] {}", message.to_string_lossy());
        }
        vk::DebugUtilsMessageSeverityFlagsEXT::INFO => {
            log::info!("[Vulkan] {}", message.to_string_lossy());
        }
        _ => {
            log::debug!("[Vulkan] {}", message.to_string_lossy());
        }
    }

    vk::FALSE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(flags: vk::QueueFlags) -> vk::QueueFamilyProperties {
        vk::QueueFamilyProperties {
            queue_flags: flags,
            queue_count: 1,
            ..Default::default()
        }
    }

    fn fill_name(dst: &mut [c_char], name: &str) {
        for (d, s) in dst.iter_mut().zip(name.bytes()) {
            *d = s as c_char;
        }
    }

    fn layer(name: &str) -> vk::LayerProperties {
        let mut props = vk::LayerProperties::default();
        fill_name(&mut props.layer_name, name);
        props
    }

    fn extension(name: &str) -> vk::ExtensionProperties {
        let mut props = vk::ExtensionProperties::default();
        fill_name(&mut props.extension_name, name);
        props
    }

    #[test]
    fn combined_family_is_found_once() {
        let families = [family(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE)];
        let indices = QueueFamilyIndices::find(&families, |_| true);

        assert_eq!(indices.graphics, Some(0));
        assert_eq!(indices.present, Some(0));
        assert!(indices.is_complete());
        assert_eq!(indices.unique_families(), vec![0]);
    }

    #[test]
    fn separate_families_are_both_requested() {
        let families = [
            family(vk::QueueFlags::TRANSFER),
            family(vk::QueueFlags::GRAPHICS),
            family(vk::QueueFlags::COMPUTE),
        ];
        let indices = QueueFamilyIndices::find(&families, |index| index == 2);

        assert_eq!(indices.complete(), Some((1, 2)));
        assert_eq!(indices.unique_families(), vec![1, 2]);
    }

    #[test]
    fn found_indices_satisfy_their_capability() {
        let families = [
            family(vk::QueueFlags::COMPUTE),
            family(vk::QueueFlags::TRANSFER),
            family(vk::QueueFlags::GRAPHICS | vk::QueueFlags::TRANSFER),
            family(vk::QueueFlags::GRAPHICS),
        ];
        let presentable = [false, true, false, true];
        let indices = QueueFamilyIndices::find(&families, |i| presentable[i as usize]);

        let graphics = indices.graphics.unwrap();
        assert!(families[graphics as usize].queue_flags.contains(vk::QueueFlags::GRAPHICS));
        let present = indices.present.unwrap();
        assert!(presentable[present as usize]);
        assert_eq!((graphics, present), (2, 1));
    }

    #[test]
    fn scan_stops_once_complete() {
        let families = vec![family(vk::QueueFlags::GRAPHICS); 5];
        let mut queried = Vec::new();
        let indices = QueueFamilyIndices::find(&families, |index| {
            queried.push(index);
            index == 1
        });

        assert_eq!(indices.complete(), Some((0, 1)));
        assert_eq!(queried, vec![0, 1]);
    }

    #[test]
    fn incomplete_without_presentation() {
        let families = [family(vk::QueueFlags::GRAPHICS)];
        let indices = QueueFamilyIndices::find(&families, |_| false);

        assert_eq!(indices.graphics, Some(0));
        assert_eq!(indices.present, None);
        assert!(!indices.is_complete());
        assert_eq!(indices.complete(), None);
    }

    #[test]
    fn no_families_means_nothing_found() {
        let indices = QueueFamilyIndices::find(&[], |_| true);
        assert_eq!(indices, QueueFamilyIndices::default());
        assert!(indices.unique_families().is_empty());
    }

    #[test]
    fn reports_missing_layers() {
        let requested = vec![
            CString::new("VK_LAYER_KHRONOS_validation").unwrap(),
            CString::new("VK_LAYER_LUNARG_monitor").unwrap(),
        ];
        let available = [layer("VK_LAYER_KHRONOS_validation"), layer("VK_LAYER_MESA_overlay")];

        assert_eq!(missing_layers(&requested, &available), vec!["VK_LAYER_LUNARG_monitor"]);
        assert!(missing_layers(&requested[..1], &available).is_empty());
        assert_eq!(missing_layers(&requested[..1], &[]).len(), 1);
    }

    #[test]
    fn layer_match_is_exact() {
        let requested = vec![CString::new("VK_LAYER_KHRONOS_validation").unwrap()];
        let available = [layer("VK_LAYER_KHRONOS_validation_extra")];
        assert_eq!(missing_layers(&requested, &available).len(), 1);
    }

    #[test]
    fn reports_missing_device_extensions() {
        let required = DeviceRequirements::default().device_extensions;
        assert_eq!(missing_extensions(&required, &[extension("VK_KHR_maintenance1")]), vec![
            "VK_KHR_swapchain"
        ]);
        assert!(missing_extensions(&required, &[extension("VK_KHR_swapchain")]).is_empty());
    }

    #[test]
    fn default_requirements() {
        let reqs = DeviceRequirements::default().with_validation(true);
        assert!(reqs.enable_validation);
        assert_eq!(reqs.validation_layers[0].to_str().unwrap(), "VK_LAYER_KHRONOS_validation");
        assert_eq!(reqs.device_extensions[0].to_str().unwrap(), "VK_KHR_swapchain");
    }

    #[test]
    fn empty_enumeration_has_no_graphics_device() {
        let result = select_first_suitable::<u32>(&[], |_| true);
        assert!(matches!(result, Err(RendererError::NoGraphicsCapableDevice)));
    }

    #[test]
    fn nothing_suitable() {
        let result = select_first_suitable(&[1, 2, 3], |_| false);
        assert!(matches!(result, Err(RendererError::NoSuitableDevice)));
    }

    #[test]
    fn first_match_wins_not_best() {
        // 20 and 30 both qualify; 20 comes first
        let chosen = select_first_suitable(&[10, 20, 30], |d| d >= 20).unwrap();
        assert_eq!(chosen, 20);
    }

    #[test]
    fn moving_unsuitable_candidates_does_not_change_choice() {
        let suitable = |d: u32| d % 7 == 0;
        let orders: [&[u32]; 4] = [
            &[14, 1, 2, 3, 21],
            &[1, 2, 3, 14, 21],
            &[3, 14, 1, 21, 2],
            &[1, 14, 21, 2, 3],
        ];
        for order in orders {
            assert_eq!(select_first_suitable(order, suitable).unwrap(), 14, "order {:?}", order);
        }
    }

    #[test]
    fn selection_stops_probing_after_match() {
        let mut probed = Vec::new();
        let chosen = select_first_suitable(&[5, 6, 7, 8], |d| {
            probed.push(d);
            d == 6
        })
        .unwrap();
        assert_eq!(chosen, 6);
        assert_eq!(probed, vec![5, 6]);
    }

    #[test]
    fn suitability_needs_every_criterion() {
        let good = DeviceSuitability {
            queue_families: QueueFamilyIndices {
                graphics: Some(0),
                present: Some(1),
            },
            missing_extensions: Vec::new(),
            format_count: 2,
            present_mode_count: 1,
        };
        assert!(good.is_suitable());

        let mut no_present = good.clone();
        no_present.queue_families.present = None;
        assert!(!no_present.is_suitable());

        let mut no_swapchain = good.clone();
        no_swapchain.missing_extensions = vec!["VK_KHR_swapchain".into()];
        assert!(!no_swapchain.is_suitable());

        let mut no_formats = good.clone();
        no_formats.format_count = 0;
        assert!(!no_formats.is_suitable());

        let mut no_modes = good;
        no_modes.present_mode_count = 0;
        assert!(!no_modes.is_suitable());
    }
}
