//! EasyType fonts CLI library.

pub mod cli;
pub mod commands;
