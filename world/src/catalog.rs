//! Registry of the maze definitions available to a session.

use std::collections::{btree_map::Entry, BTreeMap};

use maze_chase_core::{CatalogError, MazeDefinition, MazeId};

/// Collection of validated maze definitions keyed by their identifiers.
///
/// The catalog is populated once by whichever component loads maze data and
/// is then borrowed immutably by any number of game states. Mutating it while
/// a game state is alive is rejected by the borrow checker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MazeCatalog {
    mazes: BTreeMap<MazeId, MazeDefinition>,
}

impl MazeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from the provided definitions, rejecting duplicate ids.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = MazeDefinition>,
    {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.add(definition)?;
        }
        Ok(catalog)
    }

    /// Looks up the maze registered under `id`.
    pub fn get(&self, id: MazeId) -> Result<&MazeDefinition, CatalogError> {
        self.mazes.get(&id).ok_or(CatalogError::NotFound(id))
    }

    /// Registers a new maze.
    pub fn add(&mut self, maze: MazeDefinition) -> Result<(), CatalogError> {
        match self.mazes.entry(maze.id()) {
            Entry::Occupied(entry) => Err(CatalogError::AlreadyExists(*entry.key())),
            Entry::Vacant(slot) => {
                let _ = slot.insert(maze);
                Ok(())
            }
        }
    }

    /// Removes and returns the maze registered under `id`.
    pub fn remove(&mut self, id: MazeId) -> Result<MazeDefinition, CatalogError> {
        self.mazes.remove(&id).ok_or(CatalogError::NotFound(id))
    }

    /// Reports whether a maze is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: MazeId) -> bool {
        self.mazes.contains_key(&id)
    }

    /// Registered identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = MazeId> + '_ {
        self.mazes.keys().copied()
    }

    /// Registered mazes in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &MazeDefinition> {
        self.mazes.values()
    }

    /// Number of registered mazes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mazes.len()
    }

    /// Reports whether no maze has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mazes.is_empty()
    }
}
