//! Password complexity policy.
//!
//! [`evaluate`] is a pure scan over the password's characters that reports,
//! per rule, whether the threshold is met. Combining the report into an
//! accept/reject decision is left to the caller; [`PasswordPolicy::check`]
//! does that for signup and names every failed rule in its message.
//!
//! [`PasswordPolicy::check`] also refuses anything longer than bcrypt can
//! read, whatever the configured thresholds.

use serde::{Deserialize, Serialize};

use crate::password::MAX_PASSWORD_BYTES;

/// Characters counted by the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{}|\\;:'\",.<>/?`~";

/// Outcome of evaluating one password against the four complexity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyReport {
    pub has_min_length: bool,
    pub has_digits: bool,
    pub has_special: bool,
    pub has_upper: bool,
}

impl PolicyReport {
    pub fn is_satisfied(&self) -> bool {
        self.has_min_length && self.has_digits && self.has_special && self.has_upper
    }
}

/// Counts character classes in `password` and compares them to the thresholds.
///
/// Length is measured in characters, not bytes.
pub fn evaluate(
    password: &str,
    min_digits: usize,
    min_special: usize,
    min_upper: usize,
    min_length: usize,
) -> PolicyReport {
    let mut length = 0;
    let mut digits = 0;
    let mut special = 0;
    let mut upper = 0;

    for c in password.chars() {
        length += 1;
        if c.is_ascii_digit() {
            digits += 1;
        } else if c.is_uppercase() {
            upper += 1;
        } else if SPECIAL_CHARACTERS.contains(c) {
            special += 1;
        }
    }

    PolicyReport {
        has_min_length: length >= min_length,
        has_digits: digits >= min_digits,
        has_special: special >= min_special,
        has_upper: upper >= min_upper,
    }
}

/// Thresholds applied to new passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub min_digits: usize,
    pub min_special: usize,
    pub min_upper: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_digits: 2,
            min_special: 2,
            min_upper: 2,
        }
    }
}

impl PasswordPolicy {
    pub fn evaluate(&self, password: &str) -> PolicyReport {
        evaluate(
            password,
            self.min_digits,
            self.min_special,
            self.min_upper,
            self.min_length,
        )
    }

    /// Human-readable descriptions of every rule `report` failed.
    pub fn violations(&self, report: &PolicyReport) -> Vec<String> {
        let mut violations = Vec::new();
        if !report.has_min_length {
            violations.push(format!("be at least {} characters long", self.min_length));
        }
        if !report.has_digits {
            violations.push(format!("contain at least {} digits", self.min_digits));
        }
        if !report.has_special {
            violations.push(format!(
                "contain at least {} special characters",
                self.min_special
            ));
        }
        if !report.has_upper {
            violations.push(format!(
                "contain at least {} uppercase letters",
                self.min_upper
            ));
        }
        violations
    }

    /// Returns `Err` with a message listing every failed rule.
    pub fn check(&self, password: &str) -> Result<(), String> {
        let mut violations = self.violations(&self.evaluate(password));
        if password.len() > MAX_PASSWORD_BYTES {
            violations.push(format!("be at most {MAX_PASSWORD_BYTES} bytes long"));
        }
        if violations.is_empty() {
            return Ok(());
        }
        Err(format!("Password must {}", violations.join(", ")))
    }
}
