//! Validation System - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Errors stop generation, warnings are only reported.

use serde::{Deserialize, Serialize};

use crate::config::IdenticonConfig;
use crate::palette::MIN_COLOR_NIBBLES;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub remediation: Vec<String>,
}

impl ValidationViolation {
    fn error(rule: &str, message: impl Into<String>) -> Self {
        Self::new(rule, ViolationSeverity::Error, message)
    }

    fn warning(rule: &str, message: impl Into<String>) -> Self {
        Self::new(rule, ViolationSeverity::Warning, message)
    }

    fn new(rule: &str, severity: ViolationSeverity, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            severity,
            message: message.into(),
            expected: None,
            actual: None,
            remediation: vec![],
        }
    }

    fn expected(mut self, expected: String, actual: String) -> Self {
        self.expected = Some(expected);
        self.actual = Some(actual);
        self
    }

    fn remediation(mut self, hint: &str) -> Self {
        self.remediation.push(hint.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationViolation> + '_ {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationViolation> + '_ {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Warning)
    }

    /// Error messages joined for a single-line report.
    pub fn error_summary(&self) -> String {
        self.errors()
            .map(|v| format!("{}: {}", v.rule, v.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validation rule trait - produces violations
pub trait ConfigRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, config: &IdenticonConfig) -> Vec<ValidationViolation>;
}

// --- Concrete Rules ---

pub struct DimensionRule;

impl ConfigRule for DimensionRule {
    fn name(&self) -> &'static str { "dimension" }

    fn validate(&self, config: &IdenticonConfig) -> Vec<ValidationViolation> {
        if config.dim == 0 {
            return vec![ValidationViolation::error(self.name(), "Grid dimension must be at least 1")
                .expected(">= 1".to_string(), config.dim.to_string())];
        }
        vec![]
    }
}

pub struct SizeRule;

impl ConfigRule for SizeRule {
    fn name(&self) -> &'static str { "size" }

    fn validate(&self, config: &IdenticonConfig) -> Vec<ValidationViolation> {
        if config.size == 0 {
            return vec![ValidationViolation::error(self.name(), "Image size must be at least 1 pixel")
                .expected(">= 1".to_string(), config.size.to_string())];
        }

        let min_size = config.dim.saturating_add(1);
        if config.size < min_size {
            return vec![ValidationViolation::warning(self.name(), "Image too small, cells collapse to zero pixels")
                .expected(format!(">= {}", min_size), config.size.to_string())
                .remediation("Increase size or reduce dim")];
        }
        vec![]
    }
}

pub struct ColorBudgetRule;

impl ConfigRule for ColorBudgetRule {
    fn name(&self) -> &'static str { "color_budget" }

    fn validate(&self, config: &IdenticonConfig) -> Vec<ValidationViolation> {
        if config.foreground.is_some() || config.dim == 0 {
            return vec![];
        }

        let nibs = config.nib_count();
        if nibs < MIN_COLOR_NIBBLES {
            return vec![ValidationViolation::error(self.name(), "Too few nibbles to derive a foreground color")
                .expected(format!(">= {} nibbles", MIN_COLOR_NIBBLES), format!("{} nibbles", nibs))
                .remediation("Increase dim to 3 or more")
                .remediation("Set an explicit foreground color")];
        }
        vec![]
    }
}

/// Validator runs every rule against a configuration
pub struct Validator {
    rules: Vec<Box<dyn ConfigRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(DimensionRule),
                Box::new(SizeRule),
                Box::new(ColorBudgetRule),
            ],
        }
    }

    pub fn validate(&self, config: &IdenticonConfig) -> ValidationResult {
        let violations = self.rules.iter()
            .flat_map(|rule| rule.validate(config))
            .collect();
        ValidationResult { violations }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
