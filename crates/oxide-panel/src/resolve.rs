//! Data that is either declared up front or computed from the current values.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::value::Values;

/// A producer of `T` computed from the value source being rendered.
pub type Producer<T> = Arc<dyn Fn(&Values) -> T + Send + Sync>;

/// Static data or a function producing it from the current [`Values`].
///
/// Field trees, tab lists, select options and control-group items all accept
/// either form and are resolved through [`Resolvable::resolve`].
pub enum Resolvable<T> {
    /// Declared data.
    Static(T),
    /// Data produced per render.
    Computed(Producer<T>),
}

impl<T> Resolvable<T> {
    /// Wraps a function computing the data per render.
    pub fn computed(f: impl Fn(&Values) -> T + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Returns the static data, if any.
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Self::Static(data) => Some(data),
            Self::Computed(_) => None,
        }
    }
}

impl<T: Clone> Resolvable<T> {
    /// Resolves to concrete data, invoking the producer with `values`.
    pub fn resolve(&self, values: &Values) -> Cow<'_, T> {
        match self {
            Self::Static(data) => Cow::Borrowed(data),
            Self::Computed(f) => Cow::Owned(f(values)),
        }
    }
}

impl<T> From<T> for Resolvable<T> {
    fn from(data: T) -> Self {
        Self::Static(data)
    }
}

impl<T: Clone> Clone for Resolvable<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(data) => Self::Static(data.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(data) => f.debug_tuple("Static").field(data).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T: Default> Default for Resolvable<T> {
    fn default() -> Self {
        Self::Static(T::default())
    }
}

// Declarative sources can only carry data.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Resolvable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::Static)
    }
}
