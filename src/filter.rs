//! Registration with the host's frame filter machinery.
//!
//! There is no global registry: [`ColourFilter::register`] hands back a
//! filter value, and the host keeps it in whatever structure it composes
//! filters with, e.g. a [`FilterSet`].

use crate::backtrace::BacktraceEmitter;
use crate::config::DisplayPrefs;
use crate::format::FrameRenderer;
use crate::symbolize::SymbolLookup;
use crate::types::FrameAttributes;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::io::Write;

/// Name the colour filter registers under by default.
pub const DEFAULT_NAME: &str = "backtrace-filter";

/// What the host needs to know to compose frame filters.
pub trait FrameFilter {
    /// Name the host displays and addresses the filter by.
    fn name(&self) -> &str;

    /// Filters with a higher priority run first.
    fn priority(&self) -> i32;

    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}

/// Frame filter that consumes every frame and prints it coloured.
///
/// It sits at the lowest priority by default so every other filter gets to
/// see the frames first.
#[derive(Debug, Clone)]
pub struct ColourFilter {
    name: String,
    priority: i32,
    enabled: bool,
    prefs: DisplayPrefs,
}

impl Default for ColourFilter {
    fn default() -> ColourFilter {
        ColourFilter::register(DEFAULT_NAME, 0, true)
    }
}

impl ColourFilter {
    pub fn register(name: impl Into<String>, priority: i32, enabled: bool) -> ColourFilter {
        let name = name.into();
        log::debug!(
            "registering frame filter {:?} (priority {}, enabled {})",
            name,
            priority,
            enabled
        );
        ColourFilter {
            name,
            priority,
            enabled,
            prefs: DisplayPrefs::default(),
        }
    }

    /// Controls how frames are rendered.
    ///
    /// Defaults to `DisplayPrefs::default()`.
    pub fn prefs(mut self, prefs: DisplayPrefs) -> ColourFilter {
        self.prefs = prefs;
        self
    }

    /// Takes over the host's frames for one backtrace request.
    pub fn filter<'a, F, W>(
        &self,
        frames: F,
        lookup: &'a dyn SymbolLookup,
        out: W,
    ) -> BacktraceEmitter<'a, F::IntoIter, W>
    where
        F: IntoIterator,
        F::Item: FrameAttributes,
        W: Write,
    {
        BacktraceEmitter::new(frames, FrameRenderer::new(self.prefs, lookup), out)
    }
}

impl FrameFilter for ColourFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// A host side collection of frame filters, keyed by name.
#[derive(Default)]
pub struct FilterSet {
    filters: BTreeMap<String, Box<dyn FrameFilter>>,
}

impl FilterSet {
    pub fn new() -> FilterSet {
        FilterSet::default()
    }

    /// Adds `filter`, replacing and returning any filter of the same name.
    pub fn insert(&mut self, filter: Box<dyn FrameFilter>) -> Option<Box<dyn FrameFilter>> {
        self.filters.insert(filter.name().to_string(), filter)
    }

    pub fn remove(&mut self, name: &str) -> Option<Box<dyn FrameFilter>> {
        self.filters.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn FrameFilter> {
        self.filters.get(name).map(|f| &**f)
    }

    /// Returns `false` if no filter is called `name`.
    pub fn enable(&mut self, name: &str) -> bool {
        self.set_enabled(name, true)
    }

    /// Returns `false` if no filter is called `name`.
    pub fn disable(&mut self, name: &str) -> bool {
        self.set_enabled(name, false)
    }

    fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.filters.get_mut(name) {
            Some(filter) => {
                filter.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    /// All filters in the order the host runs them: highest priority first,
    /// ties by name.
    pub fn iter(&self) -> impl Iterator<Item = &dyn FrameFilter> {
        let mut filters = self.filters.values().map(|f| &**f).collect::<Vec<_>>();
        filters.sort_by_key(|f| Reverse(f.priority()));
        filters.into_iter()
    }

    /// Like [`iter`](FilterSet::iter), skipping disabled filters.
    pub fn enabled(&self) -> impl Iterator<Item = &dyn FrameFilter> {
        self.iter().filter(|f| f.enabled())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Elider(i32);

    impl FrameFilter for Elider {
        fn name(&self) -> &str {
            "elider"
        }

        fn priority(&self) -> i32 {
            self.0
        }

        fn enabled(&self) -> bool {
            true
        }

        fn set_enabled(&mut self, _: bool) {}
    }

    fn names<'a>(filters: impl Iterator<Item = &'a dyn FrameFilter>) -> Vec<&'a str> {
        filters.map(|f| f.name()).collect()
    }

    #[test]
    fn defaults() {
        let filter = ColourFilter::default();
        assert_eq!(filter.name(), "backtrace-filter");
        assert_eq!(filter.priority(), 0);
        assert!(filter.enabled());
    }

    #[test]
    fn ordered_by_priority() {
        let mut set = FilterSet::new();
        set.insert(Box::new(ColourFilter::default()));
        set.insert(Box::new(Elider(100)));
        set.insert(Box::new(ColourFilter::register("another", 0, true)));
        assert_eq!(names(set.iter()), ["elider", "another", "backtrace-filter"]);
    }

    #[test]
    fn enable_and_disable() {
        let mut set = FilterSet::new();
        set.insert(Box::new(ColourFilter::default()));
        assert!(set.disable(DEFAULT_NAME));
        assert!(!set.get(DEFAULT_NAME).unwrap().enabled());
        assert_eq!(set.enabled().count(), 0);
        assert!(set.enable(DEFAULT_NAME));
        assert_eq!(set.enabled().count(), 1);
        assert!(!set.enable("missing"));
    }

    #[test]
    fn insert_replaces_by_name() {
        let mut set = FilterSet::new();
        assert!(set.insert(Box::new(ColourFilter::default())).is_none());
        let old = set.insert(Box::new(ColourFilter::register(DEFAULT_NAME, 5, false)));
        assert_eq!(old.unwrap().priority(), 0);
        assert_eq!(set.len(), 1);
        assert!(set.remove(DEFAULT_NAME).is_some());
        assert!(set.is_empty());
    }
}
