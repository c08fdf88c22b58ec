//! subreport-render — plain-text rendering of submission reports.

pub mod text;

pub use text::{render, render_with, RenderOptions};
