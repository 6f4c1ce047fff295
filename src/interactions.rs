use std::rc::Rc;

use rand::Rng;

use crate::lattice::Configuration;
use crate::lattice::LatticeMap;
use crate::match_list::MatchListEntry;
use crate::process::Process;
use crate::rate_calculator::BucketRateContext;
use crate::rate_calculator::RateCalculator;
use crate::rate_calculator::SpeciesRateContext;
use crate::rate_table::RateTable;
use crate::Fingerprint;
use crate::ProcessId;
use crate::Rate;
use crate::SHELL_TIE_BREAK;

/// The inputs to a single custom-rate evaluation, bundling whichever of the
/// two `RateCalculator` callback shapes this process uses.
pub enum RateQuery<'a> {
    Species(SpeciesRateContext<'a>),
    Bucket(BucketRateContext<'a>),
}

impl RateQuery<'_> {
    fn rate_constant(&self) -> Rate {
        match self {
            Self::Species(ctx) => ctx.rate_constant,
            Self::Bucket(ctx) => ctx.rate_constant,
        }
    }
}

/// The process registry, cumulative-rate probability table, and stochastic
/// picker for a kinetic Monte Carlo lattice simulation.
pub struct Interactions {
    processes: Vec<Process>,
    probability_table: Vec<(Rate, usize)>,
    implicit_wildcards: bool,
    use_custom_rates: bool,
    rate_calculator: Option<Rc<dyn RateCalculator>>,
    rate_table: RateTable,
}

impl Interactions {
    /// Construct from plain processes: every site of a process shares its
    /// `rate_constant`.
    pub fn new(processes: Vec<Process>, implicit_wildcards: bool) -> Self {
        let slots = vec![(0.0, 0); processes.len()];
        Self {
            processes,
            probability_table: slots,
            implicit_wildcards,
            use_custom_rates: false,
            rate_calculator: None,
            rate_table: RateTable::new(),
        }
    }

    /// Construct with custom per-site rates, driven by `rate_calculator`.
    pub fn with_rate_calculator(
        processes: Vec<Process>,
        implicit_wildcards: bool,
        rate_calculator: Rc<dyn RateCalculator>,
    ) -> Self {
        let slots = vec![(0.0, 0); processes.len()];
        Self {
            processes,
            probability_table: slots,
            implicit_wildcards,
            use_custom_rates: true,
            rate_calculator: Some(rate_calculator),
            rate_table: RateTable::new(),
        }
    }

    pub fn use_custom_rates(&self) -> bool {
        self.use_custom_rates
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn processes_mut(&mut self) -> &mut [Process] {
        &mut self.processes
    }

    pub fn rate_calculator(&self) -> Option<&Rc<dyn RateCalculator>> {
        self.rate_calculator.as_ref()
    }

    pub fn probability_table(&self) -> &[(Rate, usize)] {
        &self.probability_table
    }

    pub fn total_rate(&self) -> Rate {
        self.probability_table.last().map_or(0.0, |&(rate, _)| rate)
    }

    pub fn total_available_sites(&self) -> usize {
        self.processes.iter().map(Process::n_sites).sum()
    }

    /// The maximum shell radius needed to cover every process's pattern.
    /// Always at least 1.
    pub fn max_range(&self) -> i32 {
        let mut max_range = 1;
        for process in &self.processes {
            for entry in process.pattern() {
                for c in [
                    entry.coordinate.x,
                    entry.coordinate.y,
                    entry.coordinate.z,
                ] {
                    let shell = if c < 0.0 {
                        (-c + SHELL_TIE_BREAK) as i32
                    } else {
                        c as i32
                    };
                    max_range = max_range.max(shell);
                }
            }
        }
        max_range
    }

    /// Pad every single-basis-site process's pattern with wildcard entries
    /// so its positional indices align with the configuration's full
    /// neighborhood. No-op unless `implicit_wildcards` was set at
    /// construction.
    pub fn update_process_match_lists(
        &mut self,
        configuration: &dyn Configuration,
        _lattice_map: &dyn LatticeMap,
    ) {
        if !self.implicit_wildcards {
            return;
        }
        for process in &mut self.processes {
            if process.basis_sites().len() != 1 {
                continue;
            }
            let basis = process.basis_sites()[0];
            let config_list = configuration.minimal_match_list(basis);
            Self::insert_wildcards(process, &config_list);
        }
    }

    /// Walks the process's explicit pattern against the configuration's full
    /// neighborhood in lockstep, both sorted by distance from the basis
    /// site. Every configuration entry the process doesn't already account
    /// for becomes a wildcard, inserted in place. Stops once every
    /// originally-specified entry has been matched; the process is padded
    /// only as far as its own requirements reach, not to the full
    /// neighborhood.
    fn insert_wildcards(process: &mut Process, config_list: &[MatchListEntry]) {
        let original_len = process.pattern().len();
        let mut matched = 0;
        let mut process_index = 0;
        let mut config_index = 0;
        while matched < original_len && config_index < config_list.len() {
            let matches = process.pattern()[process_index]
                .positionally_matches(&config_list[config_index]);
            if matches {
                matched += 1;
            } else {
                let wildcard = MatchListEntry::wildcard(config_list[config_index].coordinate);
                process.pattern_mut().insert(process_index, wildcard);
                for (a, b) in process.id_moves_mut().iter_mut() {
                    if *a >= process_index {
                        *a += 1;
                    }
                    if *b >= process_index {
                        *b += 1;
                    }
                }
                log::trace!("inserted implicit wildcard at position {process_index}");
            }
            process_index += 1;
            config_index += 1;
        }
    }

    /// Recompute the cumulative-rate table from each process's current site
    /// count (and, in custom-rate mode, per-site rates).
    pub fn update_probability_table(&mut self) {
        let mut accumulator = 0.0;
        for (process, slot) in self.processes.iter().zip(self.probability_table.iter_mut()) {
            let n_sites = process.n_sites();
            let total = if self.use_custom_rates {
                process.total_rate()
            } else {
                n_sites as Rate * process.rate_constant()
            };
            accumulator += total;
            *slot = (accumulator, n_sites);
        }
    }

    /// Draw a process index with probability proportional to its
    /// contribution to `total_rate`, skipping processes with no applicable
    /// sites. The caller must ensure `total_rate() > 0`.
    pub fn pick_process_index(&self, rng: &mut impl Rng) -> usize {
        let total = self.total_rate();
        debug_assert!(total > 0.0, "cannot pick from a system with zero total rate");
        let target = rng.random::<f64>() * total;
        self.probability_table
            .iter()
            .position(|&(accumulated, n_sites)| n_sites > 0 && accumulated >= target)
            .unwrap_or_else(|| self.probability_table.len().saturating_sub(1))
    }

    pub fn pick_process(&self, rng: &mut impl Rng) -> &Process {
        &self.processes[self.pick_process_index(rng)]
    }

    /// Remove every applicable-site entry from every process. The
    /// probability table is left stale; callers must re-run
    /// `update_probability_table` before the next pick.
    pub fn clear_matching(&mut self) {
        for process in &mut self.processes {
            process.clear_sites();
        }
    }

    /// Resolve a custom-rate process's per-site rate, composing the rate
    /// cache with the attached `RateCalculator` per §4.5:
    ///
    /// 1. If caching is enabled and this process isn't excluded, a cache hit
    ///    short-circuits evaluation.
    /// 2. Otherwise the calculator is invoked, and the result is stored back
    ///    into the cache when caching applies.
    pub fn resolve_rate(
        &mut self,
        process_id: ProcessId,
        fingerprint: Fingerprint,
        query: RateQuery,
    ) -> Rate {
        let Some(calculator) = self.rate_calculator.clone() else {
            return query.rate_constant();
        };
        let excluded = calculator.exclude_from_caching().contains(&process_id);
        let should_cache = calculator.cache_rates() && !excluded;

        if should_cache && let Ok(cached) = self.rate_table.retrieve(fingerprint) {
            log::trace!("rate cache hit for process {process_id}");
            return cached;
        }

        let rate = match &query {
            RateQuery::Species(ctx) => calculator.rate_from_species(ctx),
            RateQuery::Bucket(ctx) => calculator.rate_from_buckets(ctx),
        };

        if should_cache {
            self.rate_table.store(fingerprint, rate);
        }
        rate
    }
}
