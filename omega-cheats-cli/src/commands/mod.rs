pub(crate) mod config;
pub(crate) mod expand;
pub(crate) mod patch;
