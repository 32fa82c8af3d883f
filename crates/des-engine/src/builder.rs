//! Builder for constructing an [`Environment`].

use des_core::{ResourceId, StoreId};

use crate::{CountedResource, EngineError, EngineResult, Environment, QuantityStore};

/// Builder for [`Environment<S>`].
///
/// Resources and stores are declared up front; each declaration returns the
/// id processes will use to refer to it.  Parameters are validated in
/// [`build`][Self::build].
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = EnvironmentBuilder::new(MyState::default());
/// let pumps = builder.resource(2);
/// let tank  = builder.store(700_000.0, 700_000.0);
/// let mut env = builder.build()?;
/// env.spawn(Plane::new(pumps, tank));
/// env.run(Some(horizon), &mut NoopObserver)?;
/// ```
pub struct EnvironmentBuilder<S: 'static> {
    state:     S,
    resources: Vec<usize>,
    stores:    Vec<(f64, f64)>,
}

impl<S: 'static> EnvironmentBuilder<S> {
    /// Create a builder around the scenario state.
    pub fn new(state: S) -> Self {
        Self {
            state,
            resources: Vec::new(),
            stores:    Vec::new(),
        }
    }

    /// Declare a counted resource with `capacity` slots.
    pub fn resource(&mut self, capacity: usize) -> ResourceId {
        self.resources.push(capacity);
        ResourceId((self.resources.len() - 1) as u32)
    }

    /// Declare a quantity store holding `initial` out of `capacity`.
    pub fn store(&mut self, capacity: f64, initial: f64) -> StoreId {
        self.stores.push((capacity, initial));
        StoreId((self.stores.len() - 1) as u32)
    }

    /// Validate declarations and return a ready-to-run [`Environment`].
    pub fn build(self) -> EngineResult<Environment<S>> {
        let mut resources = Vec::with_capacity(self.resources.len());
        for (i, &capacity) in self.resources.iter().enumerate() {
            let id = ResourceId(i as u32);
            if capacity == 0 {
                return Err(EngineError::Config(format!("{id}: capacity must be at least 1")));
            }
            resources.push(CountedResource::new(id, capacity));
        }

        let mut stores = Vec::with_capacity(self.stores.len());
        for (i, &(capacity, initial)) in self.stores.iter().enumerate() {
            let id = StoreId(i as u32);
            if !capacity.is_finite() || capacity <= 0.0 {
                return Err(EngineError::Config(format!(
                    "{id}: capacity must be positive, got {capacity}"
                )));
            }
            if !initial.is_finite() || !(0.0..=capacity).contains(&initial) {
                return Err(EngineError::Config(format!(
                    "{id}: initial level {initial} outside [0, {capacity}]"
                )));
            }
            stores.push(QuantityStore::new(id, capacity, initial));
        }

        Ok(Environment::from_parts(self.state, resources, stores))
    }
}
