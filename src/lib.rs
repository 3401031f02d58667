// Library exports for the binary and tests
pub mod accordion;
pub mod app;
pub mod async_tasks;
pub mod cli;
pub mod config;
pub mod constants;
pub mod contact;
pub mod download;
pub mod error;
pub mod navigation;
pub mod observer;
pub mod page;
pub mod perf;
pub mod reveal;
pub mod scheduler;
pub mod smoke;
pub mod splash;
pub mod toast;
pub mod types;
pub mod ui;
