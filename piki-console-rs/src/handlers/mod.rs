//! Menu actions
//!
//! Each submodule adds the methods behind one menu entry to `App`.

mod chat;
mod local;
mod share;
mod status;
