//! # jqa-sonar-lang
//!
//! Resource resolvers for the languages jQAssistant reports on.
//!
//! - [`JvmResolver`] maps class files and qualified type names of Java,
//!   Kotlin and other JVM languages back to source files
//! - [`FileResolver`] handles languages that report plain file paths
//! - [`registry_from_config`] assembles a [`ResolverRegistry`] from the
//!   `[languages]` and `[resolver]` configuration sections
//!
//! [`ResolverRegistry`]: jqa_sonar_core::ResolverRegistry

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod file;
pub mod jvm;
pub mod paths;
pub mod registry;

pub use file::FileResolver;
pub use jvm::JvmResolver;
pub use paths::Exclusions;
pub use registry::{registry_from_config, RegistryError, Strategy, BUILTIN_LANGUAGES};
