//! CLI driver for tsbindgen.
//!
//! The binary parses the `generate` sub-command, sets up logging, loads a
//! graph through the metadata-loader contract, and runs the pipeline:
//! reserve → shape passes → planners → phase gate → emit.

pub mod args;
pub use args::{Cli, Command, GenerateArgs, TransformArg};

pub mod loader;
pub use loader::GraphJsonLoader;

pub mod logging;

pub mod driver;
pub use driver::{ExitCode, run_generate};
