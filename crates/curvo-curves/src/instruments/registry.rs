//! Instrument pricer registry.

use std::collections::HashMap;

use super::{Bond, Deposit, Instrument, InstrumentDescription, InstrumentKindTag, Swap};
use crate::error::{CurveError, CurveResult};

/// Builder function turning a description into a boxed pricer.
type PricerBuilder =
    Box<dyn Fn(&InstrumentDescription) -> CurveResult<Box<dyn Instrument>> + Send + Sync>;

/// Registry mapping instrument kinds to pricer constructors.
///
/// The registry is an explicit value: construct it once at program start
/// (usually via [`with_defaults`](Self::with_defaults)) and pass it by
/// reference to whatever needs to build pricers. There is no process-wide
/// instance and no static registration.
///
/// # Example
///
/// ```rust,ignore
/// let registry = InstrumentRegistry::with_defaults();
/// let pricer = registry.build(&description)?;
/// let price = pricer.price()?;
/// ```
pub struct InstrumentRegistry {
    builders: HashMap<InstrumentKindTag, PricerBuilder>,
}

impl InstrumentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in pricers registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(InstrumentKindTag::Deposit, |desc| {
            Ok(Box::new(Deposit::new(desc)?))
        });
        registry.register(InstrumentKindTag::Bond, |desc| {
            Ok(Box::new(Bond::new(desc)?))
        });
        registry.register(InstrumentKindTag::Swap, |desc| {
            Ok(Box::new(Swap::new(desc)?))
        });
        registry
    }

    /// Registers (or replaces) the builder for a kind.
    pub fn register<F>(&mut self, tag: InstrumentKindTag, builder: F)
    where
        F: Fn(&InstrumentDescription) -> CurveResult<Box<dyn Instrument>> + Send + Sync + 'static,
    {
        self.builders.insert(tag, Box::new(builder));
    }

    /// Returns true if the kind has a registered builder.
    #[must_use]
    pub fn supports(&self, tag: InstrumentKindTag) -> bool {
        self.builders.contains_key(&tag)
    }

    /// Validates a description and builds its pricer.
    ///
    /// # Errors
    ///
    /// - `UnsupportedInstrument` when the kind has no registered builder
    /// - `Validation` when the description's terms are invalid
    pub fn build(&self, description: &InstrumentDescription) -> CurveResult<Box<dyn Instrument>> {
        let tag = description.kind.tag();
        let builder = self
            .builders
            .get(&tag)
            .ok_or_else(|| CurveError::unsupported_instrument(tag.to_string()))?;

        description.validate()?;
        builder(description)
    }
}

impl Default for InstrumentRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
