use anyhow::Result;
use async_trait::async_trait;

use crate::surface::SurfaceKey;

/// Display windows backing the three surfaces.
///
/// Creating and destroying real windows is the host's business; the core only
/// asks for a surface window to exist before delivering content to it.
#[async_trait]
pub trait SurfaceWindowPort: Send + Sync {
    async fn open_surface(&self, surface: SurfaceKey) -> Result<()>;

    async fn close_surface(&self, surface: SurfaceKey) -> Result<()>;

    fn is_surface_open(&self, surface: SurfaceKey) -> bool;
}
