pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod notification;
pub mod render;
pub mod session;
pub mod shapes;
pub mod storage;
pub use error::{AppError, AppResult};

use std::path::Path;

use session::CanvasSession;
use storage::LoadReport;

/// Loads a drawing, logs a summary of every shape and optionally rewrites it
/// with simplified freehand paths.
pub fn run(path: &Path, simplify: bool) -> AppResult<LoadReport> {
    logging::init();
    tracing::info!(path = %path.display(), "starting vecdraw");

    let config = config::load_editor_config();
    let mut session = CanvasSession::new(&config);
    let report = session.load(path)?;
    tracing::info!(loaded = report.loaded, skipped = report.skipped, "document loaded");

    for (index, shape) in session.document().shapes().iter().enumerate() {
        let bounds = shape.bounding_rect();
        tracing::info!(
            index,
            shape = shape.name(),
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            "shape"
        );
    }

    if simplify {
        let changed = session.simplify_freehand(config.simplify_tolerance());
        if changed > 0 {
            session.save(path)?;
        }
        tracing::info!(changed, "freehand simplification complete");
    }
    Ok(report)
}
