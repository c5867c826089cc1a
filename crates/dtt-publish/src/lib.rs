//! Story publishing pipeline.
//!
//! Ties the pieces together: locate project assets, cut a preview sample,
//! upload everything through a publish target, insert the catalog row, and
//! clean up uploaded objects when the run fails partway.

pub mod locator;
pub mod pipeline;
pub mod sample;
pub mod target;

pub use locator::{load_project, ProjectBundle};
pub use pipeline::{PublishOutcome, PublishRequest, Publisher};
pub use sample::SampleCutter;
pub use target::{ApiTarget, DirectTarget, PublishTarget, UploadedAsset};
