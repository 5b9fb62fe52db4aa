//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tsbindgen_common::{NameTransform, NameTransformSet};

/// Generate TypeScript declaration packages from .NET assembly metadata.
#[derive(Parser, Debug)]
#[command(name = "tsbindgen", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a declaration package from one or more assemblies.
    Generate(GenerateArgs),
}

/// Name-transform strategy accepted on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TransformArg {
    #[default]
    None,
    CamelCase,
}

impl From<TransformArg> for NameTransform {
    fn from(arg: TransformArg) -> Self {
        match arg {
            TransformArg::None => NameTransform::None,
            TransformArg::CamelCase => NameTransform::CamelCase,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Input assembly metadata file (repeatable).
    #[arg(short = 'a', long = "assembly")]
    pub assemblies: Vec<PathBuf>,

    /// Directory of input assemblies; every metadata file inside is used.
    #[arg(long = "assembly-dir")]
    pub assembly_dir: Option<PathBuf>,

    /// Output directory for the declaration package.
    #[arg(short = 'o', long = "out")]
    pub out: PathBuf,

    /// Namespace include-list (repeatable); empty means all namespaces.
    #[arg(short = 'n', long = "namespace")]
    pub namespaces: Vec<String>,

    /// Name transform for namespaces.
    #[arg(long = "namespace-transform", value_enum, default_value_t = TransformArg::None)]
    pub namespace_transform: TransformArg,

    /// Name transform for classes and structs.
    #[arg(long = "class-transform", value_enum, default_value_t = TransformArg::None)]
    pub class_transform: TransformArg,

    /// Name transform for interfaces.
    #[arg(long = "interface-transform", value_enum, default_value_t = TransformArg::None)]
    pub interface_transform: TransformArg,

    /// Name transform for methods.
    #[arg(long = "method-transform", value_enum, default_value_t = TransformArg::None)]
    pub method_transform: TransformArg,

    /// Name transform for properties, fields, and events.
    #[arg(long = "property-transform", value_enum, default_value_t = TransformArg::None)]
    pub property_transform: TransformArg,

    /// Name transform for enum members.
    #[arg(long = "enum-member-transform", value_enum, default_value_t = TransformArg::None)]
    pub enum_member_transform: TransformArg,

    /// Verbose logging.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log category filter (tracing target prefix, repeatable).
    #[arg(long = "log-category")]
    pub log_categories: Vec<String>,

    /// Treat warnings as fatal per the strict-mode policy.
    #[arg(long)]
    pub strict: bool,

    /// Prior output directory acting as the library contract.
    #[arg(long = "library-contract")]
    pub library_contract: Option<PathBuf>,
}

impl GenerateArgs {
    #[must_use]
    pub fn transforms(&self) -> NameTransformSet {
        NameTransformSet {
            namespaces: self.namespace_transform.into(),
            classes: self.class_transform.into(),
            interfaces: self.interface_transform.into(),
            methods: self.method_transform.into(),
            properties: self.property_transform.into(),
            enum_members: self.enum_member_transform.into(),
        }
    }
}
