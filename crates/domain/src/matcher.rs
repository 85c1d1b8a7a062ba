use log::debug;

use crate::{ExerciseDefinition, NicknamePattern, Registry, name::normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MatchKind {
    #[strum(serialize = "canonical name")]
    CanonicalName,
    #[strum(serialize = "nickname pattern")]
    NicknamePattern,
    #[strum(serialize = "alias")]
    Alias,
}

/// A single way of recognizing an exercise name. All rules compare against a
/// normalized name.
#[derive(Debug, Clone, Copy)]
pub enum MatchRule<'a> {
    CanonicalName(&'a ExerciseDefinition),
    NicknamePattern(&'a ExerciseDefinition, &'a NicknamePattern),
    Alias(&'a ExerciseDefinition, &'a str),
}

impl<'a> MatchRule<'a> {
    #[must_use]
    pub fn matches(&self, normalized_name: &str) -> bool {
        match self {
            MatchRule::CanonicalName(definition) => {
                definition.canonical_name.key() == normalized_name
            }
            MatchRule::NicknamePattern(_, pattern) => pattern.is_match(normalized_name),
            MatchRule::Alias(_, alias) => normalize(alias) == normalized_name,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &'a ExerciseDefinition {
        match self {
            MatchRule::CanonicalName(definition)
            | MatchRule::NicknamePattern(definition, _)
            | MatchRule::Alias(definition, _) => definition,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MatchKind {
        match self {
            MatchRule::CanonicalName(_) => MatchKind::CanonicalName,
            MatchRule::NicknamePattern(..) => MatchKind::NicknamePattern,
            MatchRule::Alias(..) => MatchKind::Alias,
        }
    }
}

/// Resolves exercise names against a registry snapshot.
///
/// Rules are tried in a fixed order and the first matching rule wins: all canonical
/// names, then all nickname patterns, then all aliases. Within each kind the registry
/// order decides.
pub struct Matcher<'a> {
    rules: Vec<MatchRule<'a>>,
}

impl<'a> Matcher<'a> {
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        let canonical_names = registry.iter().map(MatchRule::CanonicalName);
        let nickname_patterns = registry.iter().filter_map(|definition| {
            definition
                .nickname_pattern
                .as_ref()
                .map(|pattern| MatchRule::NicknamePattern(definition, pattern))
        });
        let aliases = registry.iter().flat_map(|definition| {
            definition
                .aliases
                .iter()
                .map(move |alias| MatchRule::Alias(definition, alias.as_str()))
        });

        Self {
            rules: canonical_names
                .chain(nickname_patterns)
                .chain(aliases)
                .collect(),
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[MatchRule<'a>] {
        &self.rules
    }

    #[must_use]
    pub fn find(&self, raw_name: &str) -> Option<&MatchRule<'a>> {
        let normalized_name = normalize(raw_name);
        self.rules.iter().find(|rule| rule.matches(&normalized_name))
    }

    pub fn resolve(
        &self,
        raw_name: &str,
    ) -> Result<&'a ExerciseDefinition, UnresolvedExerciseError> {
        match self.find(raw_name) {
            Some(rule) => {
                let definition = rule.definition();
                debug!(
                    "matched \"{}\" to {} by {}",
                    raw_name.trim(),
                    definition.canonical_name,
                    rule.kind()
                );
                Ok(definition)
            }
            None => {
                debug!("no match for \"{}\"", raw_name.trim());
                Err(UnresolvedExerciseError {
                    attempted_name: raw_name.to_string(),
                })
            }
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown exercise \"{attempted_name}\"")]
pub struct UnresolvedExerciseError {
    pub attempted_name: String,
}
