//! Scanner subsystem (spec.md §4.1): parallel directory walk, language
//! detection, content hashing, and incremental diffing against cached
//! `FILE` metadata.

pub mod cancellation;
pub mod hasher;
pub mod incremental;
pub mod language_detect;
pub mod scanner;
pub mod types;
pub mod walker;

pub use cancellation::ScanCancellation;
pub use language_detect::Language;
pub use scanner::Scanner;
pub use types::{CachedFileMetadata, DiscoveredFile, FileStatus, ScanDiff, ScanStats};
