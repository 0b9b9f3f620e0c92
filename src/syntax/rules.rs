//! Pattern rules for markup highlighting
//!
//! A rule pairs a compiled pattern with the roles to apply to a match: one
//! for the whole match and optionally one per capture group. Rules are
//! declared with [`RuleBuilder`] and compiled when added to a mode.

use regex::Regex;

use super::matcher::{find_matches, Match};
use super::roles::StyleRole;
use crate::error::{MarkupError, Result};

/// A single compiled highlighting rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Role applied to the whole match
    pub role: Option<StyleRole>,
    /// Roles applied to capture groups, applied after the whole-match role
    pub groups: Vec<(usize, StyleRole)>,
    /// Matches of this rule are clickable links
    pub link: bool,
    /// Characters that must not directly follow a match
    pub not_followed_by: &'static [char],
}

impl Rule {
    /// Start declaring a rule
    pub fn build(name: &str, pattern: &str) -> RuleBuilder {
        RuleBuilder {
            name: name.to_string(),
            pattern: pattern.to_string(),
            role: None,
            groups: Vec::new(),
            link: false,
            not_followed_by: &[],
        }
    }

    /// Find all matches of this rule in `text`
    ///
    /// Matches directly followed by one of the rejected characters are
    /// dropped (the regex engine has no lookahead).
    pub fn find(&self, text: &str) -> Vec<Match> {
        let mut matches = find_matches(text, &self.pattern);
        if !self.not_followed_by.is_empty() {
            matches.retain(|m| {
                text[m.end_exclusive()..]
                    .chars()
                    .next()
                    .map_or(true, |c| !self.not_followed_by.contains(&c))
            });
        }
        matches
    }
}

/// Declarative description of a rule, compiled by [`RuleBuilder::compile`]
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    name: String,
    pattern: String,
    role: Option<StyleRole>,
    groups: Vec<(usize, StyleRole)>,
    link: bool,
    not_followed_by: &'static [char],
}

impl RuleBuilder {
    /// Role for the whole match
    pub fn role(mut self, role: StyleRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Role for capture group `index` (1-based)
    pub fn group(mut self, index: usize, role: StyleRole) -> Self {
        self.groups.push((index, role));
        self
    }

    /// Record matches as clickable links
    pub fn link(mut self) -> Self {
        self.link = true;
        self
    }

    /// Reject matches directly followed by any of `chars`
    pub fn not_followed_by(mut self, chars: &'static [char]) -> Self {
        self.not_followed_by = chars;
        self
    }

    /// Name of the rule being built
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compile the pattern and validate the group roles
    pub fn compile(self) -> Result<Rule> {
        let pattern = Regex::new(&self.pattern).map_err(|source| MarkupError::Pattern {
            rule: self.name.clone(),
            source,
        })?;

        let available = pattern.captures_len() - 1;
        if let Some((index, _)) = self.groups.iter().find(|(i, _)| *i == 0 || *i > available) {
            return Err(MarkupError::Configuration(format!(
                "rule '{}' styles group {} but the pattern has {} groups",
                self.name, index, available
            )));
        }

        if self.role.is_none() && self.groups.is_empty() {
            return Err(MarkupError::Configuration(format!(
                "rule '{}' assigns no style role",
                self.name
            )));
        }

        Ok(Rule {
            name: self.name,
            pattern,
            role: self.role,
            groups: self.groups,
            link: self.link,
            not_followed_by: self.not_followed_by,
        })
    }
}
