//! Rendering-safety layer.
//!
//! Initialisers that seed state before the first frame must be pure. In debug builds
//! [`StrictScope::initialize`] runs them twice and rejects differing results.

use std::fmt::Debug;

use crate::error::{Result, WidgetError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictScope {
    double_invoke: bool,
}

impl StrictScope {
    pub fn new() -> Self {
        Self {
            double_invoke: cfg!(debug_assertions),
        }
    }

    pub fn with_double_invoke(double_invoke: bool) -> Self {
        Self { double_invoke }
    }

    pub fn is_checking(&self) -> bool {
        self.double_invoke
    }

    pub fn initialize<T: PartialEq + Debug>(&self, what: &str, init: impl Fn() -> T) -> Result<T> {
        let first = init();
        if self.double_invoke {
            let second = init();
            if first != second {
                return Err(WidgetError::Render(format!(
                    "{} initializer is not pure: {:?} then {:?}",
                    what, first, second
                )));
            }
        }
        Ok(first)
    }
}

impl Default for StrictScope {
    fn default() -> Self {
        Self::new()
    }
}
