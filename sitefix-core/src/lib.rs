pub mod batch;
pub mod depth;
pub mod error;
pub mod navigation;
pub mod rewrite;
pub mod template;

pub use batch::{BatchReport, FixOptions, FixOutcome, FixResult, run_batch};
pub use depth::{SiteLocation, compute_depth, relative_prefix};
pub use error::FixError;
pub use navigation::NavigationMap;
pub use rewrite::{Rewrite, rewrite_content};
pub use template::{PageConfig, TemplateGenerator};
