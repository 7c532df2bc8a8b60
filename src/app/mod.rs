//! Application runtime composition modules.

pub(crate) mod config_manager;
pub(crate) mod config_runtime;
pub(crate) mod runtime;
pub(crate) mod show_groups;
pub(crate) mod terminal;
