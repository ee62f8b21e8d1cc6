//! N+1 query detection across 9 languages and 8 ORM frameworks plus
//! GraphQL resolvers (spec.md §4.7 `N_PLUS_ONE`).

pub mod framework_matchers;
pub mod n_plus_one;
pub mod normalizers;
pub mod types;

pub use framework_matchers::{MatchedPattern, MatcherRegistry};
pub use n_plus_one::{detect_n_plus_one, NPlusOneDetection, NPlusOneType};
pub use normalizers::{create_all_normalizers, normalizer_for, LanguageNormalizer};
pub use types::{CallArg, ChainCall, DataOperation, UnifiedCallChain};
