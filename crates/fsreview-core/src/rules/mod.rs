//! Rule engine: exclusion plus ordered rule classification of a DiffSet.

pub mod classify;
pub mod matcher;

pub use classify::{classify, Classification, RuleResult, RuleSet};
pub use matcher::{compile_rules, CompiledMatcher, CompiledRule, RuleCompileError};
