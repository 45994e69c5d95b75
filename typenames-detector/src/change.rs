use typenames_core::NameSet;

/// Remembers the names last written and compares new scans against them.
#[derive(Debug, Default, Clone)]
pub struct ChangeDetector {
    cached: NameSet,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True unless `names`, taken as a set, equals the cached set.
    pub fn has_changed(&self, names: &[String]) -> bool {
        let current: NameSet = names.iter().cloned().collect();
        if current.len() != self.cached.len() {
            return true;
        }
        current.iter().any(|name| !self.cached.contains(name))
    }

    /// Replace the cached set. Call only once the matching file is on disk.
    pub fn accept(&mut self, names: &[String]) {
        self.cached = names.iter().cloned().collect();
    }

    pub fn cached(&self) -> &NameSet {
        &self.cached
    }
}
