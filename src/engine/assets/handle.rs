// Type-safe clip handle system

/// Opaque reference to an animation clip owned by a [`ClipLibrary`].
///
/// Handles are cheap to copy and compare. They never carry clip data, so a
/// catalog or playback track can hold one without duplicating the clip.
///
/// [`ClipLibrary`]: super::ClipLibrary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipHandle(pub(crate) u32);

impl ClipHandle {
    /// Create a handle from its slot index in the library
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Slot index of the clip in the owning library
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ClipHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "clip#{}", self.0)
    }
}
