// State to clip mapping and transition table

use crate::engine::assets::{ClipHandle, ClipLibrary};
use crate::game::characters::state::{DiscreteState, UnknownStateName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Catalog construction errors. Any of these means the hero must not start.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{entry} refers to unknown clip '{clip}'")]
    UnknownClip { entry: String, clip: String },

    #[error(transparent)]
    UnknownState(#[from] UnknownStateName),

    #[error("state '{0}' is mapped more than once")]
    DuplicateState(DiscreteState),

    #[error("transition '{from}' -> '{to}' is defined more than once")]
    DuplicateTransition { from: String, to: String },
}

/// One row of the state table, by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateClipEntry {
    pub state: String,
    pub clip: String,
}

/// One row of the transition table, by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub from: String,
    pub to: String,
    pub transition: String,
}

/// Serializable animation tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTable {
    pub states: Vec<StateClipEntry>,
    pub transitions: Vec<TransitionEntry>,
}

impl AnimationTable {
    /// Parse the state names into a builder
    pub fn to_builder(&self) -> Result<CatalogBuilder, CatalogError> {
        let mut builder = CatalogBuilder::new();
        for entry in &self.states {
            let state: DiscreteState = entry.state.parse()?;
            builder = builder.state(state, &entry.clip);
        }
        for entry in &self.transitions {
            builder = builder.transition(&entry.from, &entry.to, &entry.transition);
        }
        Ok(builder)
    }
}

/// Collects catalog entries by clip name, validated against the library in
/// [`CatalogBuilder::build`]
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    states: Vec<(DiscreteState, String)>,
    transitions: Vec<(String, String, String)>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a state to a clip
    pub fn state(mut self, state: DiscreteState, clip: &str) -> Self {
        self.states.push((state, clip.to_string()));
        self
    }

    /// Register `via` as the connector played between `from` and `to`
    pub fn transition(mut self, from: &str, to: &str, via: &str) -> Self {
        self.transitions
            .push((from.to_string(), to.to_string(), via.to_string()));
        self
    }

    /// Resolve every entry against `library`
    pub fn build(self, library: &ClipLibrary) -> Result<AnimationCatalog, CatalogError> {
        let lookup = |entry: String, clip: &str| {
            library.handle(clip).ok_or_else(|| CatalogError::UnknownClip {
                entry,
                clip: clip.to_string(),
            })
        };

        let mut states = HashMap::with_capacity(self.states.len());
        for (state, clip) in &self.states {
            let handle = lookup(format!("state '{}'", state), clip.as_str())?;
            if states.insert(*state, handle).is_some() {
                return Err(CatalogError::DuplicateState(*state));
            }
        }

        let mut transitions = HashMap::with_capacity(self.transitions.len());
        for (from, to, via) in &self.transitions {
            let entry = format!("transition '{}' -> '{}'", from, to);
            let from_handle = lookup(entry.clone(), from.as_str())?;
            let to_handle = lookup(entry.clone(), to.as_str())?;
            let via_handle = lookup(entry, via.as_str())?;

            if transitions
                .insert((from_handle, to_handle), via_handle)
                .is_some()
            {
                return Err(CatalogError::DuplicateTransition {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        log::debug!(
            "Animation catalog built: {} states, {} transitions",
            states.len(),
            transitions.len()
        );

        Ok(AnimationCatalog {
            states,
            transitions,
        })
    }
}

/// Which clip each state plays, and which connector clip sits between two
/// clips. Holds handles only; the clips stay in the library.
#[derive(Debug, Clone, Default)]
pub struct AnimationCatalog {
    states: HashMap<DiscreteState, ClipHandle>,
    transitions: HashMap<(ClipHandle, ClipHandle), ClipHandle>,
}

impl AnimationCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Build a catalog from serialized tables
    pub fn from_table(table: &AnimationTable, library: &ClipLibrary) -> Result<Self, CatalogError> {
        table.to_builder()?.build(library)
    }

    /// Clip mapped to `state`, if any
    pub fn resolve(&self, state: DiscreteState) -> Option<ClipHandle> {
        self.states.get(&state).copied()
    }

    /// Connector clip from `from` to `to`, if one is registered
    pub fn resolve_transition(&self, from: ClipHandle, to: ClipHandle) -> Option<ClipHandle> {
        self.transitions.get(&(from, to)).copied()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::AnimationClip;

    fn library() -> ClipLibrary {
        let mut library = ClipLibrary::new();
        for name in ["idle", "run", "idle-to-run", "attack"] {
            library.register(AnimationClip::new(name, 4, 10.0)).unwrap();
        }
        library
    }

    #[test]
    fn test_resolve_states_and_transitions() {
        let library = library();
        let catalog = AnimationCatalog::builder()
            .state(DiscreteState::Idle, "idle")
            .state(DiscreteState::Run, "run")
            .transition("idle", "run", "idle-to-run")
            .build(&library)
            .unwrap();

        let idle = library.handle("idle").unwrap();
        let run = library.handle("run").unwrap();

        assert_eq!(catalog.resolve(DiscreteState::Idle), Some(idle));
        assert_eq!(catalog.resolve(DiscreteState::Run), Some(run));
        assert_eq!(catalog.resolve(DiscreteState::Fall), None);
        assert_eq!(
            catalog.resolve_transition(idle, run),
            library.handle("idle-to-run")
        );
        assert_eq!(catalog.resolve_transition(run, idle), None);
        assert_eq!(catalog.state_count(), 2);
        assert_eq!(catalog.transition_count(), 1);
    }

    #[test]
    fn test_unknown_state_clip_is_fatal() {
        let err = AnimationCatalog::builder()
            .state(DiscreteState::Crouch, "crouch")
            .build(&library())
            .unwrap_err();

        assert!(matches!(err, CatalogError::UnknownClip { ref clip, .. } if clip == "crouch"));
        assert_eq!(
            err.to_string(),
            "state 'crouch' refers to unknown clip 'crouch'"
        );
    }

    #[test]
    fn test_unknown_transition_clip_is_fatal() {
        let err = AnimationCatalog::builder()
            .state(DiscreteState::Idle, "idle")
            .transition("idle", "run", "missing")
            .build(&library())
            .unwrap_err();

        assert!(matches!(err, CatalogError::UnknownClip { ref clip, .. } if clip == "missing"));
    }

    #[test]
    fn test_duplicate_state_rejected() {
        let err = AnimationCatalog::builder()
            .state(DiscreteState::Idle, "idle")
            .state(DiscreteState::Idle, "run")
            .build(&library())
            .unwrap_err();

        assert!(matches!(err, CatalogError::DuplicateState(DiscreteState::Idle)));
    }

    #[test]
    fn test_duplicate_transition_rejected() {
        let err = AnimationCatalog::builder()
            .transition("idle", "run", "idle-to-run")
            .transition("idle", "run", "attack")
            .build(&library())
            .unwrap_err();

        assert!(matches!(err, CatalogError::DuplicateTransition { .. }));
    }

    #[test]
    fn test_table_with_unknown_state_name() {
        let table = AnimationTable {
            states: vec![StateClipEntry {
                state: "Idle".to_string(),
                clip: "idle".to_string(),
            }],
            transitions: Vec::new(),
        };

        let err = AnimationCatalog::from_table(&table, &library()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownState(_)));
    }

    #[test]
    fn test_table_from_json() {
        let table: AnimationTable = serde_json::from_str(
            r#"{
                "states": [
                    { "state": "idle", "clip": "idle" },
                    { "state": "attack", "clip": "attack" }
                ],
                "transitions": [
                    { "from": "idle", "to": "run", "transition": "idle-to-run" }
                ]
            }"#,
        )
        .unwrap();

        let catalog = AnimationCatalog::from_table(&table, &library()).unwrap();
        assert_eq!(catalog.state_count(), 2);
        assert_eq!(catalog.transition_count(), 1);
    }
}
