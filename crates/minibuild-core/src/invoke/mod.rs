//! Compiler invocation and build reporting
//!
//! The compiler is an opaque external process: it receives the stale file
//! list in one batched invocation, its diagnostic stream is captured to a
//! log artifact, and its exit status alone decides success or failure.

mod compiler;
mod error;
mod report;

pub use compiler::{run_compiler, CompilerOutcome};
pub use error::{InvokeError, Result};
pub use report::{BuildReport, BuildStatus};
