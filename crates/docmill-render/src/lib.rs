//! docmill-render
//!
//! Invoice and tabular-report PDF generation: Tera templating with a
//! compiled-template cache, data-URI image embedding, headless-Chromium
//! pagination, and scratch-directory persistence.

pub mod assets;
pub mod engine;
pub mod error;
pub mod html;
pub mod models;
pub mod persist;
pub mod pipeline;
pub mod template;
