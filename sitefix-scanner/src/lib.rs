pub mod error;
pub mod extract;
pub mod result;
pub mod validator;

pub use error::ScanError;
pub use result::{LinkOutcome, LinkResult, ValidationReport, ValidationSummary, Verdict};
pub use validator::{
    LinkProgressCallback, LinkValidator, LinksFoundCallback, StyleMarkers, ValidateOptions,
};
