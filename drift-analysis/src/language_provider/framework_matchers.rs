//! Maps a `UnifiedCallChain`'s final call to the ORM framework and data
//! operation it belongs to, so `n_plus_one` can reason about it without
//! knowing which of the 9 supported languages it came from.

use super::types::{DataOperation, UnifiedCallChain};

/// A single method-name -> (framework, operation) rule.
struct MatcherRule {
    framework: &'static str,
    methods: &'static [&'static str],
    operation: DataOperation,
}

/// The framework + operation a chain matched against.
#[derive(Debug, Clone)]
pub struct MatchedPattern {
    pub framework: String,
    pub operation: DataOperation,
}

const RULES: &[MatcherRule] = &[
    MatcherRule {
        framework: "active_record",
        methods: &["find", "find_by", "where", "first", "last", "find_each"],
        operation: DataOperation::Select,
    },
    MatcherRule {
        framework: "django",
        methods: &["get", "filter", "exclude", "all", "values", "values_list"],
        operation: DataOperation::Select,
    },
    MatcherRule {
        framework: "sqlalchemy",
        methods: &["query", "filter", "filter_by", "get", "first", "one"],
        operation: DataOperation::Select,
    },
    MatcherRule {
        framework: "hibernate",
        methods: &["find", "get", "load"],
        operation: DataOperation::Select,
    },
    MatcherRule {
        framework: "hibernate",
        methods: &["createQuery", "createNativeQuery"],
        operation: DataOperation::RawQuery,
    },
    MatcherRule {
        framework: "ef_core",
        methods: &["Find", "FindAsync", "FirstOrDefault", "Where", "Single"],
        operation: DataOperation::Select,
    },
    MatcherRule {
        framework: "prisma",
        methods: &["findUnique", "findFirst", "findMany"],
        operation: DataOperation::Select,
    },
    MatcherRule {
        framework: "prisma",
        methods: &["create", "update"],
        operation: DataOperation::Update,
    },
    MatcherRule {
        framework: "sequelize",
        methods: &["findOne", "findAll", "findByPk", "findAndCountAll"],
        operation: DataOperation::Select,
    },
    MatcherRule {
        framework: "sequelize",
        methods: &["create"],
        operation: DataOperation::Insert,
    },
    MatcherRule {
        framework: "typeorm",
        methods: &["findOne", "find", "findOneBy", "findBy"],
        operation: DataOperation::Select,
    },
    MatcherRule {
        framework: "typeorm",
        methods: &["createQueryBuilder"],
        operation: DataOperation::RawQuery,
    },
];

/// Registry of ORM method-name rules, checked in order against a chain's
/// calls until one matches.
pub struct MatcherRegistry {
    rules: &'static [MatcherRule],
}

impl MatcherRegistry {
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    /// Match the chain's last call against the known ORM method rules.
    pub fn match_chain(&self, chain: &UnifiedCallChain) -> Option<MatchedPattern> {
        let call = chain.calls.last()?;
        for rule in self.rules {
            if rule.methods.contains(&call.method.as_str()) {
                return Some(MatchedPattern {
                    framework: rule.framework.to_string(),
                    operation: rule.operation,
                });
            }
        }
        None
    }
}

impl Default for MatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language_provider::types::ChainCall;
    use crate::scanner::language_detect::Language;

    fn chain(method: &str) -> UnifiedCallChain {
        UnifiedCallChain {
            receiver: "User".to_string(),
            calls: vec![ChainCall { method: method.to_string(), args: vec![] }],
            file: "a.ts".to_string(),
            line: 1,
            language: Language::TypeScript,
        }
    }

    #[test]
    fn matches_known_orm_method() {
        let registry = MatcherRegistry::new();
        let matched = registry.match_chain(&chain("findAll")).unwrap();
        assert_eq!(matched.framework, "sequelize");
        assert_eq!(matched.operation, DataOperation::Select);
    }

    #[test]
    fn unmatched_method_returns_none() {
        let registry = MatcherRegistry::new();
        assert!(registry.match_chain(&chain("totallyUnknownMethod")).is_none());
    }
}
