//! # Dialog Layer
//!
//! Modals (token selector, settings) render into a single anchor element owned by the
//! mounted widget. [`DialogAnchor`] is the shared handle to that element: the widget
//! attaches the rendered wrapper `<div>` to it and the [`DialogScope`] positions every
//! modal relative to it. A host page may supply its own anchor node instead; modals are
//! then portalled into that node.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::{ArcRwSignal, Set, Update, With, WithUntracked};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::atoms::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogAnimation {
    #[default]
    Fade,
    Slide,
    None,
}

impl DialogAnimation {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "fade" => Some(DialogAnimation::Fade),
            "slide" => Some(DialogAnimation::Slide),
            "none" => Some(DialogAnimation::None),
            _ => None,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            DialogAnimation::Fade => "dialog-animate-fade",
            DialogAnimation::Slide => "dialog-animate-slide",
            DialogAnimation::None => "dialog-animate-none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialogOptions {
    pub animation_type: DialogAnimation,
    /// Center modals in the page viewport instead of inside the widget box
    pub page_centered: bool,
}

/// Shared reference to the node modals are positioned against.
///
/// Cloning shares the same slot; a new anchor is created for every mount.
#[derive(Debug, Clone)]
pub struct DialogAnchor {
    id: Uuid,
    host_supplied: bool,
    node: Rc<RefCell<Option<web_sys::Element>>>,
}

impl DialogAnchor {
    pub fn new(initial: Option<web_sys::Element>) -> Self {
        Self {
            id: Uuid::new_v4(),
            host_supplied: initial.is_some(),
            node: Rc::new(RefCell::new(initial)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Attach the rendered anchor element unless the host supplied one already.
    pub fn attach(&self, element: web_sys::Element) {
        let mut node = self.node.borrow_mut();
        if node.is_none() {
            *node = Some(element);
        }
    }

    pub fn node(&self) -> Option<web_sys::Element> {
        self.node.borrow().clone()
    }

    pub fn with_node<R>(&self, f: impl FnOnce(Option<&web_sys::Element>) -> R) -> R {
        f(self.node.borrow().as_ref())
    }

    pub fn is_attached(&self) -> bool {
        self.node.borrow().is_some()
    }

    /// The node came from the host page rather than the widget's own wrapper.
    pub fn is_host_supplied(&self) -> bool {
        self.host_supplied
    }

    pub fn same_as(&self, other: &DialogAnchor) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

/// Modals the widget chrome knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    TokenSelector(Field),
    Settings,
}

pub struct DialogScope {
    anchor: DialogAnchor,
    options: DialogOptions,
    open: ArcRwSignal<Vec<DialogKind>>,
}

impl DialogScope {
    pub fn new(anchor: DialogAnchor, options: DialogOptions) -> Self {
        Self {
            anchor,
            options,
            open: ArcRwSignal::new(Vec::new()),
        }
    }

    pub fn anchor(&self) -> &DialogAnchor {
        &self.anchor
    }

    pub fn options(&self) -> DialogOptions {
        self.options
    }

    /// Host node modals are portalled into. `None` renders them inline, inside the
    /// widget's own anchor.
    pub fn portal_target(&self) -> Option<web_sys::Element> {
        if self.anchor.is_host_supplied() {
            self.anchor.node()
        } else {
            None
        }
    }

    /// Opening the same kind twice keeps a single entry, moved to the top.
    pub fn open(&self, kind: DialogKind) {
        self.open.update(|open| {
            open.retain(|k| *k != kind);
            open.push(kind);
        });
        log::debug!("dialog opened: {:?}", kind);
    }

    pub fn close(&self) -> Option<DialogKind> {
        self.open
            .try_maybe_update(|open| {
                let closed = open.pop();
                (closed.is_some(), closed)
            })
            .flatten()
    }

    pub fn close_all(&self) {
        self.open.set(Vec::new());
    }

    /// Topmost open dialog; tracks changes when read inside a reactive scope.
    pub fn active(&self) -> Option<DialogKind> {
        self.open.with(|open| open.last().copied())
    }

    pub fn depth(&self) -> usize {
        self.open.with_untracked(Vec::len)
    }

    pub fn container_class(&self) -> String {
        format!("swap-dialog {}", self.options.animation_type.class())
    }

    pub fn container_style(&self) -> &'static str {
        if self.options.page_centered {
            "position: fixed; top: 50%; left: 50%; transform: translate(-50%, -50%); pointer-events: auto;"
        } else {
            "position: absolute; inset: 0; pointer-events: auto;"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_clone_shares_slot() {
        let anchor = DialogAnchor::new(None);
        let shared = anchor.clone();
        assert!(anchor.same_as(&shared));
        assert_eq!(anchor.id(), shared.id());
        assert!(!shared.is_attached());

        let other = DialogAnchor::new(None);
        assert!(!anchor.same_as(&other));
        assert_ne!(anchor.id(), other.id());
    }

    fn host_element() -> web_sys::Element {
        use wasm_bindgen::JsCast;
        wasm_bindgen::JsValue::NULL.unchecked_into()
    }

    #[test]
    fn test_host_anchor_is_kept_and_used() {
        let anchor = DialogAnchor::new(Some(host_element()));
        assert!(anchor.is_host_supplied());
        assert!(anchor.is_attached());

        // The rendered wrapper does not replace the host's node
        anchor.attach(host_element());
        assert!(anchor.is_host_supplied());

        let scope = DialogScope::new(anchor.clone(), DialogOptions::default());
        assert!(scope.anchor().same_as(&anchor));
        assert!(scope.anchor().is_host_supplied());
        assert!(scope.anchor().with_node(|node| node.is_some()));
    }

    #[test]
    fn test_local_anchor_renders_inline() {
        let scope = DialogScope::new(DialogAnchor::new(None), DialogOptions::default());
        assert!(!scope.anchor().is_host_supplied());
        assert!(scope.portal_target().is_none());
    }

    #[test]
    fn test_dialog_stack() {
        let scope = DialogScope::new(DialogAnchor::new(None), DialogOptions::default());
        assert_eq!(scope.active(), None);

        scope.open(DialogKind::Settings);
        scope.open(DialogKind::TokenSelector(Field::Input));
        scope.open(DialogKind::Settings);
        assert_eq!(scope.depth(), 2);
        assert_eq!(scope.active(), Some(DialogKind::Settings));

        assert_eq!(scope.close(), Some(DialogKind::Settings));
        assert_eq!(scope.active(), Some(DialogKind::TokenSelector(Field::Input)));
        scope.close_all();
        assert_eq!(scope.close(), None);
    }

    #[test]
    fn test_options() {
        let options: DialogOptions =
            serde_json::from_str(r#"{"animationType":"slide","pageCentered":true}"#).unwrap();
        let scope = DialogScope::new(DialogAnchor::new(None), options);
        assert_eq!(scope.container_class(), "swap-dialog dialog-animate-slide");
        assert!(scope.container_style().starts_with("position: fixed"));
        assert_eq!(DialogAnimation::parse("NONE"), Some(DialogAnimation::None));
    }
}
