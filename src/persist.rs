//! Config persistence capability.
//!
//! The menu calls [`ConfigStore::load`] once when it is created and
//! [`ConfigStore::save`] once per confirmed save. The storage medium and
//! record layout belong to the implementor.

use crate::error::Error;

/// Loads and saves the full controller configuration held by a model store.
pub trait ConfigStore<M> {
    /// Fill `model` from persistent storage.
    ///
    /// On error the model must be left in a usable state (factory
    /// defaults or whatever was already there).
    fn load(&mut self, model: &mut M) -> Result<(), Error>;

    /// Persist every page of `model`.
    fn save(&mut self, model: &M) -> Result<(), Error>;
}

/// Store that never persists anything: `load` keeps the model as it is
/// and `save` succeeds without writing.
#[derive(Clone, Copy, Debug, Default)]
pub struct VolatileConfig;

impl<M> ConfigStore<M> for VolatileConfig {
    fn load(&mut self, _model: &mut M) -> Result<(), Error> {
        Ok(())
    }

    fn save(&mut self, _model: &M) -> Result<(), Error> {
        Ok(())
    }
}
