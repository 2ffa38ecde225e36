use std::sync::Arc;

use lp_core::ports::SurfaceWindowPort;
use lp_core::ProjectionState;

use crate::deps::AppDeps;
use crate::navigation::LiveNavigation;
use crate::plan_item::PlanItemProjector;
use crate::runtime::ProjectionRuntime;

/// The application runtime.
/// 应用运行时。
pub struct App {
    pub runtime: Arc<ProjectionRuntime>,
    pub navigation: LiveNavigation,
    pub windows: Arc<dyn SurfaceWindowPort>,
}

impl App {
    /// Create a new App from its dependencies.
    /// 从依赖创建新的 App 实例。
    ///
    /// `initial` seeds all three surfaces (appearance defaults from config).
    pub fn new(deps: AppDeps, initial: ProjectionState) -> Self {
        let runtime = Arc::new(ProjectionRuntime::new(
            initial,
            deps.clock,
            deps.windows.clone(),
        ));
        let projector = PlanItemProjector::new(deps.library.clone(), deps.bible);
        let navigation = LiveNavigation::new(runtime.clone(), deps.library, projector);

        Self {
            runtime,
            navigation,
            windows: deps.windows,
        }
    }
}
