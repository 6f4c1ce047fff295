use crate::bucket::TypeBucket;
use crate::ProcessId;
use crate::Rate;

/// Inputs to the string/species-typed rate callback: a process whose match
/// list entries carry plain species codes.
pub struct SpeciesRateContext<'a> {
    /// Flat `(3*n)` coordinates for every site in the process geometry.
    pub geometry: &'a [f64],
    pub species_before: &'a [String],
    pub species_after: &'a [String],
    pub rate_constant: Rate,
    pub process_id: ProcessId,
    pub global: (f64, f64, f64),
}

impl SpeciesRateContext<'_> {
    pub fn len(&self) -> usize {
        self.geometry.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }
}

/// Inputs to the bucket-typed rate callback: a process whose match list
/// entries carry per-species occupation counts.
pub struct BucketRateContext<'a> {
    pub geometry: &'a [f64],
    pub occupation_before: &'a [TypeBucket],
    pub occupation_update: &'a [TypeBucket],
    pub type_map: &'a [String],
    pub rate_constant: Rate,
    pub process_id: ProcessId,
    pub global: (f64, f64, f64),
}

impl BucketRateContext<'_> {
    pub fn len(&self) -> usize {
        self.geometry.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }
}

/// Host-supplied rate evaluator. The default implementation is the identity:
/// every process keeps its declared rate constant, and caching is disabled.
pub trait RateCalculator {
    /// Rate for a process whose pattern uses plain species codes.
    fn rate_from_species(&self, ctx: &SpeciesRateContext) -> Rate {
        ctx.rate_constant
    }

    /// Rate for a process whose pattern uses per-site occupation buckets.
    fn rate_from_buckets(&self, ctx: &BucketRateContext) -> Rate {
        ctx.rate_constant
    }

    /// Interaction radius the host should use to bound the neighborhood
    /// passed into the callbacks above.
    fn cutoff(&self) -> f64 {
        0.0
    }

    /// Whether the engine should cache rates produced by this calculator.
    fn cache_rates(&self) -> bool {
        false
    }

    /// Process ids that must always be recomputed, bypassing the cache even
    /// when `cache_rates` is true.
    fn exclude_from_caching(&self) -> Vec<ProcessId> {
        Vec::new()
    }
}

/// The default, no-op rate calculator: every process keeps its rate
/// constant and nothing is cached.
#[derive(Default)]
pub struct IdentityRateCalculator;

impl RateCalculator for IdentityRateCalculator {}
