use std::{
    collections::HashMap,
    fmt,
    slice::Iter,
    sync::{Arc, PoisonError, RwLock},
};

use log::debug;
use regex::Regex;

use crate::{Name, NameError, name::normalize};

pub trait RegistryRepository {
    fn read_exercise_definitions(&self) -> Result<Vec<ExerciseDefinition>, RegistryLoadError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExerciseID {
    Number(u64),
    Text(String),
}

impl From<u64> for ExerciseID {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for ExerciseID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExerciseID::Number(id) => write!(f, "{id}"),
            ExerciseID::Text(id) => write!(f, "{id}"),
        }
    }
}

/// Regular expression matching informal spellings of an exercise name.
///
/// The pattern is anchored at the start of the name but not at its end.
#[derive(Debug, Clone)]
pub struct NicknamePattern {
    pattern: String,
    regex: Regex,
}

impl NicknamePattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Regex::new(&format!("^(?:{pattern})"))?,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn is_match(&self, normalized_name: &str) -> bool {
        self.regex.is_match(normalized_name)
    }
}

impl PartialEq for NicknamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDefinition {
    pub id: ExerciseID,
    pub canonical_name: Name,
    pub nickname_pattern: Option<NicknamePattern>,
    pub aliases: Vec<String>,
}

impl ExerciseDefinition {
    /// An empty `nickname_pattern` yields a definition without a pattern, as an empty
    /// regular expression would match every name.
    pub fn new(
        id: ExerciseID,
        canonical_name: &str,
        nickname_pattern: &str,
        aliases: Vec<String>,
    ) -> Result<Self, RegistryLoadError> {
        let canonical_name = match Name::new(canonical_name) {
            Ok(name) => name,
            Err(source) => return Err(RegistryLoadError::InvalidName { id, source }),
        };
        let nickname_pattern = if nickname_pattern.trim().is_empty() {
            None
        } else {
            match NicknamePattern::new(nickname_pattern) {
                Ok(pattern) => Some(pattern),
                Err(source) => {
                    return Err(RegistryLoadError::InvalidPattern {
                        name: canonical_name,
                        pattern: nickname_pattern.to_string(),
                        source,
                    });
                }
            }
        };
        Ok(Self {
            id,
            canonical_name,
            nickname_pattern,
            aliases,
        })
    }
}

/// Immutable snapshot of the exercise catalog in source order.
#[derive(Debug, Default)]
pub struct Registry {
    definitions: Vec<ExerciseDefinition>,
    by_canonical_name: HashMap<String, usize>,
    by_id: HashMap<ExerciseID, usize>,
}

impl Registry {
    pub fn new(definitions: Vec<ExerciseDefinition>) -> Result<Self, RegistryLoadError> {
        let mut by_canonical_name = HashMap::with_capacity(definitions.len());
        let mut by_id = HashMap::with_capacity(definitions.len());

        for (idx, definition) in definitions.iter().enumerate() {
            if by_id.insert(definition.id.clone(), idx).is_some() {
                return Err(RegistryLoadError::DuplicateId(definition.id.clone()));
            }
            if by_canonical_name
                .insert(definition.canonical_name.key(), idx)
                .is_some()
            {
                return Err(RegistryLoadError::DuplicateCanonicalName(
                    definition.canonical_name.clone(),
                ));
            }
        }

        Ok(Self {
            definitions,
            by_canonical_name,
            by_id,
        })
    }

    pub fn load(repository: &impl RegistryRepository) -> Result<Self, RegistryLoadError> {
        let registry = Self::new(repository.read_exercise_definitions()?)?;
        debug!("loaded {} exercise definitions", registry.len());
        Ok(registry)
    }

    #[must_use]
    pub fn lookup_by_canonical_name(&self, normalized_name: &str) -> Option<&ExerciseDefinition> {
        self.by_canonical_name
            .get(&normalize(normalized_name))
            .map(|idx| &self.definitions[*idx])
    }

    #[must_use]
    pub fn get(&self, id: &ExerciseID) -> Option<&ExerciseDefinition> {
        self.by_id.get(id).map(|idx| &self.definitions[*idx])
    }

    pub fn iter(&self) -> Iter<'_, ExerciseDefinition> {
        self.definitions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a ExerciseDefinition;
    type IntoIter = Iter<'a, ExerciseDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Holder of the current registry snapshot.
///
/// Readers get an `Arc` to a complete registry. Reloading builds a new registry and
/// swaps the pointer, so a snapshot obtained earlier is never modified.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    current: RwLock<Arc<Registry>>,
}

impl SharedRegistry {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<Registry> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn replace(&self, registry: Registry) -> Arc<Registry> {
        let registry = Arc::new(registry);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&registry);
        registry
    }

    /// The current snapshot stays installed if loading fails.
    pub fn reload(
        &self,
        repository: &impl RegistryRepository,
    ) -> Result<Arc<Registry>, RegistryLoadError> {
        let registry = Registry::load(repository)?;
        Ok(self.replace(registry))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RegistryLoadError {
    #[error("exercise registry not found: {0}")]
    Missing(String),
    #[error("malformed exercise registry: {0}")]
    Malformed(String),
    #[error("invalid canonical name for exercise {id}: {source}")]
    InvalidName { id: ExerciseID, source: NameError },
    #[error("invalid nickname pattern \"{pattern}\" for {name}: {source}")]
    InvalidPattern {
        name: Name,
        pattern: String,
        source: regex::Error,
    },
    #[error("duplicate exercise id {0}")]
    DuplicateId(ExerciseID),
    #[error("duplicate canonical name \"{0}\"")]
    DuplicateCanonicalName(Name),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data::{REGISTRY, definition};

    use super::*;

    struct StaticRegistry(Vec<ExerciseDefinition>);

    impl RegistryRepository for StaticRegistry {
        fn read_exercise_definitions(
            &self,
        ) -> Result<Vec<ExerciseDefinition>, RegistryLoadError> {
            Ok(self.0.clone())
        }
    }

    struct MissingRegistry;

    impl RegistryRepository for MissingRegistry {
        fn read_exercise_definitions(
            &self,
        ) -> Result<Vec<ExerciseDefinition>, RegistryLoadError> {
            Err(RegistryLoadError::Missing("exercises.json".to_string()))
        }
    }

    #[rstest]
    #[case(ExerciseID::from(7), "7")]
    #[case(ExerciseID::from("ohp"), "ohp")]
    fn test_exercise_id_display(#[case] id: ExerciseID, #[case] expected: &str) {
        assert_eq!(id.to_string(), expected);
    }

    #[rstest]
    #[case("row", "row", true)]
    #[case("row", "rows", true)]
    #[case("row", "machine row", false)]
    #[case("(machine )?rows?$", "machine row", true)]
    #[case("(machine )?rows?$", "machine rowing", false)]
    #[case("ohp|overhead", "overhead press", true)]
    fn test_nickname_pattern_is_match(
        #[case] pattern: &str,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(NicknamePattern::new(pattern).unwrap().is_match(name), expected);
    }

    #[test]
    fn test_exercise_definition_new() {
        let definition = ExerciseDefinition::new(
            1.into(),
            " Machine Row ",
            "rows?",
            vec!["Seated Row".to_string()],
        )
        .unwrap();

        assert_eq!(definition.canonical_name.as_ref(), "Machine Row");
        assert_eq!(
            definition.nickname_pattern.as_ref().map(NicknamePattern::as_str),
            Some("rows?")
        );
        assert_eq!(definition.aliases, vec!["Seated Row".to_string()]);
    }

    #[test]
    fn test_exercise_definition_new_without_pattern() {
        let definition = ExerciseDefinition::new(1.into(), "Machine Row", " ", vec![]).unwrap();

        assert_eq!(definition.nickname_pattern, None);
    }

    #[test]
    fn test_exercise_definition_new_invalid_name() {
        assert!(matches!(
            ExerciseDefinition::new(3.into(), "  ", "row", vec![]),
            Err(RegistryLoadError::InvalidName { id: ExerciseID::Number(3), source: NameError::Empty })
        ));
    }

    #[test]
    fn test_exercise_definition_new_invalid_pattern() {
        assert!(matches!(
            ExerciseDefinition::new(3.into(), "Machine Row", "(row", vec![]),
            Err(RegistryLoadError::InvalidPattern { pattern, .. }) if pattern == "(row"
        ));
    }

    #[test]
    fn test_registry_new_duplicate_id() {
        assert!(matches!(
            Registry::new(vec![
                definition(1, "Machine Row", "", &[]),
                definition(1, "Bench Press", "", &[]),
            ]),
            Err(RegistryLoadError::DuplicateId(ExerciseID::Number(1)))
        ));
    }

    #[test]
    fn test_registry_new_duplicate_canonical_name() {
        assert!(matches!(
            Registry::new(vec![
                definition(1, "Machine Row", "", &[]),
                definition(2, "machine row", "", &[]),
            ]),
            Err(RegistryLoadError::DuplicateCanonicalName(name)) if name.as_ref() == "machine row"
        ));
    }

    #[rstest]
    #[case("machine row", Some(4))]
    #[case("  MACHINE ROW ", Some(4))]
    #[case("row", None)]
    fn test_registry_lookup_by_canonical_name(
        #[case] name: &str,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(
            REGISTRY.lookup_by_canonical_name(name).map(|d| d.id.clone()),
            expected.map(ExerciseID::from)
        );
    }

    #[test]
    fn test_registry_get() {
        assert_eq!(
            REGISTRY
                .get(&ExerciseID::from(2))
                .map(|d| d.canonical_name.to_string()),
            Some("Assisted Pullup".to_string())
        );
        assert_eq!(REGISTRY.get(&ExerciseID::from(99)), None);
    }

    #[test]
    fn test_registry_iter_preserves_order() {
        assert_eq!(
            REGISTRY
                .iter()
                .map(|d| d.canonical_name.to_string())
                .collect::<Vec<_>>(),
            crate::tests::data::DEFINITIONS
                .iter()
                .map(|d| d.canonical_name.to_string())
                .collect::<Vec<_>>()
        );
        assert_eq!(REGISTRY.len(), crate::tests::data::DEFINITIONS.len());
        assert!(!REGISTRY.is_empty());
        assert!(Registry::default().is_empty());
    }

    #[test]
    fn test_shared_registry_reload() {
        let shared = SharedRegistry::default();
        let before = shared.snapshot();

        let after = shared
            .reload(&StaticRegistry(vec![definition(1, "Machine Row", "", &[])]))
            .unwrap();

        assert!(before.is_empty());
        assert_eq!(after.len(), 1);
        assert_eq!(shared.snapshot().len(), 1);
        assert!(Arc::ptr_eq(&after, &shared.snapshot()));
    }

    #[test]
    fn test_shared_registry_reload_failure_keeps_snapshot() {
        let shared =
            SharedRegistry::new(Registry::new(vec![definition(1, "Machine Row", "", &[])]).unwrap());

        assert!(matches!(
            shared.reload(&MissingRegistry),
            Err(RegistryLoadError::Missing(_))
        ));
        assert_eq!(shared.snapshot().len(), 1);
    }

    #[test]
    fn test_shared_registry_reload_duplicate_keeps_snapshot() {
        let shared =
            SharedRegistry::new(Registry::new(vec![definition(1, "Machine Row", "", &[])]).unwrap());

        assert!(matches!(
            shared.reload(&StaticRegistry(vec![
                definition(1, "Machine Row", "", &[]),
                definition(1, "Bench Press", "", &[]),
            ])),
            Err(RegistryLoadError::DuplicateId(_))
        ));
        assert_eq!(
            shared
                .snapshot()
                .iter()
                .map(|d| d.canonical_name.to_string())
                .collect::<Vec<_>>(),
            vec!["Machine Row".to_string()]
        );
    }
}
