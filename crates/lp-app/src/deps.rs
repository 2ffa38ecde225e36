//! # Application Dependencies / 应用依赖
//!
//! Plain parameter grouping for [`crate::App`] construction. No defaults,
//! no build steps.
//! 仅用于参数打包，无默认值，无构建步骤。

use std::sync::Arc;

use lp_core::ports::{BibleTextPort, ClockPort, LibraryPort, SurfaceWindowPort};

/// Every collaborator the projection runtime talks to.
/// 投影运行时依赖的全部外部协作者。
pub struct AppDeps {
    // Library / 曲库与节目单
    pub library: Arc<dyn LibraryPort>,
    pub bible: Arc<dyn BibleTextPort>,

    // Windows / 显示窗口
    pub windows: Arc<dyn SurfaceWindowPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
}
