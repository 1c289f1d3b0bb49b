// src/render/mod.rs
use anyhow::Result;

use crate::dashboard::DashboardView;

pub mod json;
pub mod text;

pub use json::JsonPresenter;
pub use text::TextPresenter;

/// Receives each freshly computed view; owns nothing beyond the call.
pub trait Presenter {
    fn present(&mut self, view: &DashboardView) -> Result<()>;
}
