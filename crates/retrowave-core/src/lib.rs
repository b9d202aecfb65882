pub mod config;
pub mod logging;

pub mod catalog;
pub mod control;
pub mod descriptor;
pub mod engine;
pub mod export;
pub mod naming;
pub mod retry;
pub mod transfer;
