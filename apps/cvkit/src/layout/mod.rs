// Résumé layout: partitions entries into fixed-capacity pages for one-page-per-sheet export.
// Pure and synchronous; cheap enough to run inline in handlers.

pub mod handlers;
pub mod pagination;

// Re-export the public API consumed by handlers and the export pipeline.
pub use pagination::{paginate_resume, PaginationConfig, ResumePage};
