//! EnvEye Collector - one-shot diagnostic snapshot of an application folder and its host.

pub mod collector;
pub mod environment;
pub mod executor;
pub mod files;
pub mod naming;
pub mod services;
pub mod upload;
pub mod writer;
