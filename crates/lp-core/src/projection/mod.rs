//! Projection domain: what a single output surface is showing.
//!
//! 投影领域：单个输出画面当前显示的内容与外观。

mod content;
mod patch;
mod state;

pub use content::{MediaPayload, MediaType, ProjectionContent, SongMeta, TextPayload};
pub use patch::{AppearancePatch, ProjectionPatch};
pub use state::{
    ProjectionMode, ProjectionState, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_TEXT_SCALE,
};
