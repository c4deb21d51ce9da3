pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    expand_dir, format_fix_line, format_link_line, generate_fix_summary,
    generate_validation_summary, run_validation,
};

// Re-export the library entry points the handlers drive
pub use sitefix_core::batch::{BatchReport, FixOptions, run_batch};
pub use sitefix_scanner::validator::{LinkValidator, ValidateOptions};
