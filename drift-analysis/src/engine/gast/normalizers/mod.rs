//! Per-language `GASTNormalizer` implementations.

pub mod python;
pub mod ruby;
pub mod typescript;

pub use python::PythonNormalizer;
pub use ruby::RubyNormalizer;
pub use typescript::TypeScriptNormalizer;
