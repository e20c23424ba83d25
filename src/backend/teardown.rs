// Ordered teardown
//
// Every Vulkan object is registered here right after it is created, together
// with the closure that destroys it. Unwinding runs those closures in exact
// reverse order of registration, so the success path (renderer drop) and
// the error path (a half-built renderer going out of scope) share one
// destruction sequence.

use std::fmt;

/// What a teardown entry releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Instance,
    DebugMessenger,
    Surface,
    Device,
    Swapchain,
    ImageViews,
    RenderPass,
    PipelineLayout,
    Pipeline,
    Framebuffers,
    CommandPool,
    SyncObjects,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instance => "instance",
            Self::DebugMessenger => "debug messenger",
            Self::Surface => "surface",
            Self::Device => "logical device",
            Self::Swapchain => "swap chain",
            Self::ImageViews => "image views",
            Self::RenderPass => "render pass",
            Self::PipelineLayout => "pipeline layout",
            Self::Pipeline => "graphics pipeline",
            Self::Framebuffers => "framebuffers",
            Self::CommandPool => "command pool",
            Self::SyncObjects => "sync objects",
        };
        f.write_str(name)
    }
}

type Destroy = Box<dyn FnOnce()>;

/// Stack of pending destroy calls, newest on top
#[derive(Default)]
pub struct TeardownStack {
    entries: Vec<(ResourceKind, Destroy)>,
}

impl TeardownStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly created object. `destroy` must not be called by
    /// anyone else.
    pub fn push(&mut self, kind: ResourceKind, destroy: impl FnOnce() + 'static) {
        log::debug!("Registered {} for teardown", kind);
        self.entries.push((kind, Box::new(destroy)));
    }

    /// Kinds still alive, in creation order
    pub fn created(&self) -> Vec<ResourceKind> {
        self.entries.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Destroy everything, newest first. Returns the kinds in the order they
    /// were destroyed.
    ///
    /// The caller is responsible for making sure the GPU no longer uses any
    /// of these objects (device idle).
    pub fn unwind(&mut self) -> Vec<ResourceKind> {
        let mut destroyed = Vec::with_capacity(self.entries.len());
        while let Some((kind, destroy)) = self.entries.pop() {
            log::debug!("Destroying {}...", kind);
            destroy();
            destroyed.push(kind);
        }
        destroyed
    }
}

impl Drop for TeardownStack {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            log::warn!(
                "Releasing {} partially initialized Vulkan object(s)",
                self.entries.len()
            );
            self.unwind();
        }
    }
}

impl fmt::Debug for TeardownStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeardownStack")
            .field("entries", &self.created())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const CREATION_ORDER: [ResourceKind; 12] = [
        ResourceKind::Instance,
        ResourceKind::DebugMessenger,
        ResourceKind::Surface,
        ResourceKind::Device,
        ResourceKind::Swapchain,
        ResourceKind::ImageViews,
        ResourceKind::RenderPass,
        ResourceKind::PipelineLayout,
        ResourceKind::Pipeline,
        ResourceKind::Framebuffers,
        ResourceKind::CommandPool,
        ResourceKind::SyncObjects,
    ];

    fn recording_stack(kinds: &[ResourceKind]) -> (TeardownStack, Rc<RefCell<Vec<ResourceKind>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut stack = TeardownStack::new();
        for &kind in kinds {
            let log = Rc::clone(&log);
            stack.push(kind, move || log.borrow_mut().push(kind));
        }
        (stack, log)
    }

    #[test]
    fn unwind_is_exact_reverse_of_creation() {
        let (mut stack, log) = recording_stack(&CREATION_ORDER);
        assert_eq!(stack.created(), CREATION_ORDER.to_vec());

        let destroyed = stack.unwind();
        let mut expected = CREATION_ORDER.to_vec();
        expected.reverse();

        assert_eq!(destroyed, expected);
        assert_eq!(*log.borrow(), expected);
        assert_eq!(expected.first(), Some(&ResourceKind::SyncObjects));
        assert_eq!(expected.last(), Some(&ResourceKind::Instance));
        assert!(stack.is_empty());
    }

    #[test]
    fn dropping_a_partial_stack_releases_what_was_created() {
        let (stack, log) = recording_stack(&CREATION_ORDER[..4]);
        assert_eq!(stack.len(), 4);
        drop(stack);

        assert_eq!(
            *log.borrow(),
            vec![
                ResourceKind::Device,
                ResourceKind::Surface,
                ResourceKind::DebugMessenger,
                ResourceKind::Instance,
            ]
        );
    }

    #[test]
    fn unwind_runs_each_destroy_once() {
        let (mut stack, log) = recording_stack(&[ResourceKind::Instance, ResourceKind::Surface]);
        stack.unwind();
        stack.unwind();
        drop(stack);
        assert_eq!(log.borrow().len(), 2);
    }
}
