//! Self-contained pieces of the interface, each with its own state, messages and view.

pub mod name_form;
