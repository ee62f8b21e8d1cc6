//! Pattern detectors (spec.md §4.2/§4.7): one module per `DetectorCategory`,
//! each a `Detector` impl registered into a `DetectorRegistry`.

pub mod traits;
pub mod registry;

pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod contracts;
pub mod data_access;
pub mod documentation;
pub mod errors;
pub mod logging;
pub mod performance;
pub mod security;
pub mod structural;
pub mod styling;
pub mod testing;

pub use registry::DetectorRegistry;
pub use traits::{Detector, DetectorCategory, DetectorVariant};

use api::ApiDetector;
use auth::AuthDetector;
use components::ComponentsDetector;
use config::ConfigDetector;
use contracts::ContractsDetector;
use data_access::DataAccessDetector;
use documentation::DocumentationDetector;
use errors::ErrorsDetector;
use logging::LoggingDetector;
use performance::PerformanceDetector;
use security::SecurityDetector;
use structural::StructuralDetector;
use styling::StylingDetector;
use testing::TestingDetector;

/// Build a registry with every skeleton detector registered.
pub fn default_registry() -> DetectorRegistry {
    let mut registry = DetectorRegistry::new();
    registry.register(Box::new(ApiDetector));
    registry.register(Box::new(AuthDetector));
    registry.register(Box::new(ComponentsDetector));
    registry.register(Box::new(ConfigDetector));
    registry.register(Box::new(ContractsDetector));
    registry.register(Box::new(DataAccessDetector));
    registry.register(Box::new(DocumentationDetector));
    registry.register(Box::new(ErrorsDetector));
    registry.register(Box::new(LoggingDetector));
    registry.register(Box::new(PerformanceDetector));
    registry.register(Box::new(SecurityDetector));
    registry.register(Box::new(StructuralDetector));
    registry.register(Box::new(StylingDetector));
    registry.register(Box::new(TestingDetector));
    registry
}
