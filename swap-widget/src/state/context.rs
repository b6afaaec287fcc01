//! Widget context handle

use std::rc::Rc;

use leptos::prelude::*;

use crate::composition::WidgetContext;

/// Copyable handle to the composed widget. The context itself is single-threaded,
/// so it lives in local arena storage.
pub type WidgetHandle = StoredValue<Rc<WidgetContext>, LocalStorage>;

pub fn provide_widget_context(context: Rc<WidgetContext>) -> WidgetHandle {
    let handle = StoredValue::new_local(context);
    provide_context(handle);
    handle
}

pub fn use_widget_context() -> WidgetHandle {
    expect_context::<WidgetHandle>()
}
