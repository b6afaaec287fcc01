//! # Fault Boundary
//!
//! Supervises everything composed below it. A fault raised inside [`FaultBoundary::guard`]
//! (an `Err` or a panic) is converted into exactly one call of the host's `on_error`
//! callback, the boundary switches to its fallback, and the fault goes no further.
//!
//! Panics are only recoverable where unwinding is available. On `wasm32-unknown-unknown`
//! panics abort, so there the boundary covers `Err` faults and the panic hook reports the
//! rest to the console.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use leptos::prelude::{ArcRwSignal, Get, Set, Update, WithUntracked};
use serde::Serialize;

use crate::config::handlers::Handler;
use crate::error::{Result, WidgetError};

/// A fault as handed to the host's `on_error` callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fault {
    pub code: &'static str,
    pub message: String,
    /// Part of the widget that raised it
    pub scope: String,
    #[serde(skip)]
    pub error: WidgetError,
}

impl Fault {
    pub fn new(scope: &str, error: WidgetError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            scope: scope.to_string(),
            error,
        }
    }
}

pub type OnError = Handler<Fault>;

pub struct FaultBoundary {
    on_error: Option<OnError>,
    current: ArcRwSignal<Option<Fault>>,
    /// Keys already reported through `capture_once`
    seen: RefCell<HashSet<String>>,
    reported: Cell<usize>,
}

impl FaultBoundary {
    pub fn new(on_error: Option<OnError>) -> Self {
        Self {
            on_error,
            current: ArcRwSignal::new(None),
            seen: RefCell::new(HashSet::new()),
            reported: Cell::new(0),
        }
    }

    /// Run `f` under supervision. Returns `None` when it faulted or when the boundary is
    /// already showing its fallback.
    pub fn guard<T>(&self, scope: &str, f: impl FnOnce() -> Result<T>) -> Option<T> {
        if self.is_faulted() {
            return None;
        }
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(value)) => Some(value),
            Ok(Err(err)) => {
                self.capture(scope, err);
                None
            }
            Err(payload) => {
                self.capture(scope, WidgetError::Panic(panic_message(payload.as_ref())));
                None
            }
        }
    }

    /// Record a fault and notify the host.
    pub fn capture(&self, scope: &str, error: WidgetError) {
        let fault = Fault::new(scope, error);
        log::error!("widget fault in {}: {}", fault.scope, fault.message);
        self.reported.set(self.reported.get() + 1);
        self.current.set(Some(fault.clone()));
        match &self.on_error {
            Some(on_error) => on_error.call(&fault),
            None => log::warn!("no on_error handler registered, fault kept inside the widget"),
        }
    }

    /// Like [`capture`](Self::capture), but a fault already seen under `key` is not
    /// reported again. Returns whether it was reported.
    pub fn capture_once(&self, key: &str, scope: &str, error: WidgetError) -> bool {
        if !self.seen.borrow_mut().insert(key.to_string()) {
            return false;
        }
        self.capture(scope, error);
        true
    }

    /// Current fault; tracks changes when read inside a reactive scope.
    pub fn fault(&self) -> Option<Fault> {
        self.current.get()
    }

    pub fn is_faulted(&self) -> bool {
        self.current.with_untracked(Option::is_some)
    }

    pub fn reported(&self) -> usize {
        self.reported.get()
    }

    /// Leave the fallback and render the subtree again.
    pub fn reset(&self) {
        self.current.update(|current| {
            current.take();
        });
        self.seen.borrow_mut().clear();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn counting_boundary() -> (FaultBoundary, Rc<Cell<usize>>, Rc<RefCell<Vec<Fault>>>) {
        let calls = Rc::new(Cell::new(0));
        let faults = Rc::new(RefCell::new(Vec::new()));
        let (c, f) = (calls.clone(), faults.clone());
        let boundary = FaultBoundary::new(Some(Handler::new(move |fault: &Fault| {
            c.set(c.get() + 1);
            f.borrow_mut().push(fault.clone());
        })));
        (boundary, calls, faults)
    }

    #[test]
    fn test_ok_passes_through() {
        let (boundary, calls, _) = counting_boundary();
        assert_eq!(boundary.guard("panel", || Ok(7)), Some(7));
        assert_eq!(calls.get(), 0);
        assert!(!boundary.is_faulted());
    }

    #[test]
    fn test_error_reported_exactly_once() {
        let (boundary, calls, faults) = counting_boundary();
        let out: Option<()> = boundary.guard("panel", || Err(WidgetError::Render("boom".into())));
        assert_eq!(out, None);
        assert_eq!(calls.get(), 1);
        assert_eq!(faults.borrow()[0].scope, "panel");
        assert_eq!(faults.borrow()[0].code, "Render");

        // Subtree stays on its fallback, nothing runs or reports again
        let ran = Cell::new(false);
        let again = boundary.guard("panel", || {
            ran.set(true);
            Ok(())
        });
        assert_eq!(again, None);
        assert!(!ran.get());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_panic_contained() {
        let (boundary, calls, faults) = counting_boundary();
        let out: Option<u8> = boundary.guard("token list", || panic!("descendant exploded"));
        assert_eq!(out, None);
        assert_eq!(calls.get(), 1);
        assert_eq!(faults.borrow()[0].error, WidgetError::Panic("descendant exploded".into()));
    }

    #[test]
    fn test_capture_once_dedupes_by_key() {
        let (boundary, calls, _) = counting_boundary();
        assert!(boundary.capture_once("e1", "view", WidgetError::Render("x".into())));
        assert!(!boundary.capture_once("e1", "view", WidgetError::Render("x".into())));
        assert_eq!(calls.get(), 1);
        assert_eq!(boundary.reported(), 1);
    }

    #[test]
    fn test_reset_renders_again() {
        let (boundary, _, _) = counting_boundary();
        boundary.capture("view", WidgetError::Render("x".into()));
        assert!(boundary.fault().is_some());
        boundary.reset();
        assert_eq!(boundary.guard("view", || Ok(1)), Some(1));
    }

    #[test]
    fn test_without_handler() {
        let boundary = FaultBoundary::new(None);
        assert_eq!(boundary.guard::<()>("view", || Err(WidgetError::Provider("down".into()))), None);
        assert!(boundary.is_faulted());
    }
}
