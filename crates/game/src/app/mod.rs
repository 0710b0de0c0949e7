pub(crate) mod bootstrap;
mod chrome;
mod config;
mod games;
pub(crate) mod loop_runner;
mod shell;
