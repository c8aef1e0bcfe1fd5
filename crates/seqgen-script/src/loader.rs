//! RON definition loader

use crate::error::{Error, Result};
use crate::schema::{GeneratorDef, GeneratorDefList};
use indexmap::IndexMap;
use seqgen_core::{SequenceGenerator, TimeSource};
use ron::error::{Error as RonError, SpannedError};
use std::sync::Arc;
use tracing::debug;

/// Loaded generator definitions, in load order
#[derive(Debug, Default)]
pub struct GeneratorDefs {
    generators: IndexMap<String, GeneratorDef>,
}

impl GeneratorDefs {
    /// Create an empty set of definitions
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a definition by ID
    pub fn get(&self, id: &str) -> Option<&GeneratorDef> {
        self.generators.get(id)
    }

    /// IDs of all definitions
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Build a validated generator on the system clock
    pub fn build(&self, id: &str) -> Result<SequenceGenerator> {
        let def = self.require(id)?;
        Ok(SequenceGenerator::try_new(def.to_config())?)
    }

    /// Build a validated generator on the given clock
    pub fn build_with_clock(&self, id: &str, clock: Arc<dyn TimeSource>) -> Result<SequenceGenerator> {
        let def = self.require(id)?;
        Ok(SequenceGenerator::try_with_clock(def.to_config(), clock)?)
    }

    fn require(&self, id: &str) -> Result<&GeneratorDef> {
        self.get(id)
            .ok_or_else(|| Error::UnknownGenerator(id.to_string()))
    }

    fn insert(&mut self, def: GeneratorDef) -> Result<()> {
        if self.generators.contains_key(&def.id) {
            return Err(Error::DuplicateDefinition(def.id));
        }
        debug!(id = %def.id, "generator definition loaded");
        self.generators.insert(def.id.clone(), def);
        Ok(())
    }
}

/// Loader for RON generator definitions
///
/// A document holds either a list, `(generators: [ ... ])`, or a single
/// definition.
#[derive(Debug)]
pub struct Loader {
    defs: GeneratorDefs,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            defs: GeneratorDefs::new(),
        }
    }

    /// Load definitions from a RON string
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        match ron::from_str::<GeneratorDefList>(content) {
            Ok(file) => {
                debug!(count = file.generators.len(), "loading generator list");
                for def in file.generators {
                    self.defs.insert(def)?;
                }
                Ok(())
            }
            Err(list_err) => match ron::from_str::<GeneratorDef>(content) {
                Ok(def) => self.defs.insert(def),
                // Report against whichever shape the document was written in
                Err(def_err) if is_missing_generators(&list_err) => Err(def_err.into()),
                Err(_) => Err(list_err.into()),
            },
        }
    }

    /// Finish loading and return the definitions
    pub fn finish(self) -> GeneratorDefs {
        self.defs
    }

    /// Get the current definitions (for inspection during loading)
    pub fn defs(&self) -> &GeneratorDefs {
        &self.defs
    }
}

fn is_missing_generators(err: &SpannedError) -> bool {
    matches!(&err.code, RonError::MissingStructField { field, .. } if *field == "generators")
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
