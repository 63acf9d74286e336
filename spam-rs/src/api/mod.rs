//! HTTP surface for spam-rs
//!
//! Serves the single-page prediction form and a small JSON API

pub mod handlers;
pub mod server;
pub mod web;

pub use server::ApiServer;
