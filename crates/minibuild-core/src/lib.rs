pub mod config;
pub mod detect;
pub mod driver;
pub mod errors;
pub mod invoke;
pub mod marker;

pub use config::{BuildConfig, CliOverrides, CONFIG_FILE_NAME};
pub use detect::{DetectError, SourceFileRecord};
pub use driver::BuildDriver;
pub use errors::BuildError;
pub use invoke::{BuildReport, BuildStatus, InvokeError};
pub use marker::{MARKER_FILE_NAME, MARKER_VERSION};
