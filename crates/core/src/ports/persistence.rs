use crate::domain::course::CourseSheet;
use anyhow::Result;

/// Sheet persistence interface. Adapters decide the format and location;
/// the core only requires that `save` receives the post-mutation snapshot,
/// never a stale one.
pub trait SheetStore: Send + Sync {
    /// Load the persisted sheet, or `None` if nothing was saved yet
    fn load(&self) -> Result<Option<CourseSheet>>;

    /// Persist a sheet snapshot
    fn save(&self, sheet: &CourseSheet) -> Result<()>;
}
