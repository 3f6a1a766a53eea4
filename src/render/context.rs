use rustc_hash::{FxHashMap, FxHashSet};

/// Frame-scoped bone-slot index.
///
/// Shaders expose a fixed-size bone matrix array; only a configured
/// subset of imported bones (the allowlist) is ever uploaded. During
/// the render traversal each allowlisted bone name gets a dense slot
/// (`0, 1, 2, ...`) the first time a mesh referencing it is visited.
///
/// The mapping is rebuilt from scratch every frame by
/// [`begin_frame`](Self::begin_frame), so slot assignment is
/// traversal-order-dependent and must be treated as unstable across
/// frames unless the allowlist and traversal order are both fixed.
/// This object is owned and passed explicitly by the frame loop;
/// there is no process-wide state.
#[derive(Debug, Default)]
pub struct FrameContext {
    allowlist: FxHashSet<String>,
    slot_names: Vec<String>,
    slots: FxHashMap<String, usize>,
}

impl FrameContext {
    /// A context that uploads the named bones and ignores all others.
    #[must_use]
    pub fn new(allowlist: impl IntoIterator<Item = String>) -> Self {
        Self {
            allowlist: allowlist.into_iter().collect(),
            slot_names: Vec::new(),
            slots: FxHashMap::default(),
        }
    }

    /// Clears the slot mapping. Call once at the start of every frame,
    /// before any scene is rendered.
    pub fn begin_frame(&mut self) {
        self.slot_names.clear();
        self.slots.clear();
    }

    /// Resolves a bone name to its uniform slot for this frame.
    ///
    /// Returns `None` for names outside the allowlist. Allowlisted
    /// names are assigned the next dense slot on first sight and keep
    /// it for the rest of the frame.
    pub fn slot_for(&mut self, name: &str) -> Option<usize> {
        if !self.allowlist.contains(name) {
            return None;
        }
        if let Some(&slot) = self.slots.get(name) {
            return Some(slot);
        }
        let slot = self.slot_names.len();
        self.slot_names.push(name.to_owned());
        self.slots.insert(name.to_owned(), slot);
        Some(slot)
    }

    /// Number of slots assigned so far this frame.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_names.len()
    }

    /// Assigned bone names in slot order.
    #[must_use]
    pub fn slot_names(&self) -> &[String] {
        &self.slot_names
    }
}
