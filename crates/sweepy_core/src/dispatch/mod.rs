//! Output dispatch: visualization policy, persistence and the renderer seam.

mod archive;
mod dispatcher;
mod report;
mod store;
mod visual;

pub use archive::{ARCHIVE_FILE, REPORT_FILE, SweepArchive, load_archive};
pub use dispatcher::{Delivery, Dispatcher};
pub use report::RunReport;
pub use store::{FsStore, Store, atomic_write, sanitize_filename};
pub use visual::{
    Heatmap, LinePlot, MAX_SLICE_GRAPHS, MAX_VISUAL_DIMS, RenderTarget, Renderer, VisualPlan,
    value_range,
};
