pub mod analysis;
pub mod catalog;
pub mod config_loader;
pub mod domain_utils;
pub mod features;
pub mod normalization;

pub use analysis::{AnalysisResult, Finding, FindingKind, RiskLevel};
pub use config_loader::RuleSetConfig;
pub use features::{analyze, RuleEngine, UrlRule};
pub use normalization::NormalizedUrl;
