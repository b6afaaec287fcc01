//! Per-instance widget state: the application store, the atom scope, and the Leptos
//! context handle that threads both through the component tree.

pub mod atoms;
pub mod context;
pub mod store;
