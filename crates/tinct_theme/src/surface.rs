//! The rendering surface resolved tokens are pushed to

use indexmap::IndexMap;

use crate::theme::ColorScheme;

/// Where resolved tokens end up, e.g. a document's root style scope.
///
/// Writes are one-way: the engine never reads back from the surface.
pub trait StyleSurface {
    /// Set a custom property, e.g. `--primary`
    fn set_property(&mut self, name: &str, value: &str);

    /// Remove a custom property previously set
    fn remove_property(&mut self, name: &str);

    /// Select which mode's rules apply
    fn set_scheme(&mut self, scheme: ColorScheme);
}

impl<T: StyleSurface + ?Sized> StyleSurface for &mut T {
    fn set_property(&mut self, name: &str, value: &str) {
        (**self).set_property(name, value);
    }

    fn remove_property(&mut self, name: &str) {
        (**self).remove_property(name);
    }

    fn set_scheme(&mut self, scheme: ColorScheme) {
        (**self).set_scheme(scheme);
    }
}

/// Headless surface that records the latest value of every property
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    properties: IndexMap<String, String>,
    scheme: Option<ColorScheme>,
    writes: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The last scheme set, if any
    pub fn scheme(&self) -> Option<ColorScheme> {
        self.scheme
    }

    /// Total property writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StyleSurface for RecordingSurface {
    fn set_property(&mut self, name: &str, value: &str) {
        self.writes += 1;
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn remove_property(&mut self, name: &str) {
        self.writes += 1;
        self.properties.shift_remove(name);
    }

    fn set_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = Some(scheme);
    }
}
