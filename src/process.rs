use crate::match_list::MatchListEntry;
use crate::Rate;
use crate::SiteId;

/// An elementary lattice event: a local pattern, a rate, and the sites it is
/// currently applicable at.
///
/// Per REDESIGN FLAGS §9, plain processes and custom-rate processes are not
/// two parallel types: `site_rates` is `None` for a plain process (total
/// rate is `n_sites * rate_constant`) and `Some` for a custom-rate process
/// (total rate is the sum of its per-site rates).
pub struct Process {
    pattern: Vec<MatchListEntry>,
    rate_constant: Rate,
    sites: Vec<SiteId>,
    site_rates: Option<Vec<Rate>>,
    basis_sites: Vec<SiteId>,
    id_moves: Vec<(usize, usize)>,
}

impl Process {
    /// `pattern[0]` must be the origin entry; enforced in debug builds only,
    /// since validating it is the caller's (`Configuration`'s) job.
    pub fn new(pattern: Vec<MatchListEntry>, rate_constant: Rate, basis_sites: Vec<SiteId>) -> Self {
        debug_assert!(!pattern.is_empty(), "process pattern must include the origin entry");
        Self {
            pattern,
            rate_constant,
            sites: Vec::new(),
            site_rates: None,
            basis_sites,
            id_moves: Vec::new(),
        }
    }

    /// A custom-rate process: identical to `new`, but every applicable site
    /// carries its own rate rather than sharing `rate_constant`.
    pub fn with_custom_rates(
        pattern: Vec<MatchListEntry>,
        rate_constant: Rate,
        basis_sites: Vec<SiteId>,
    ) -> Self {
        let mut process = Self::new(pattern, rate_constant, basis_sites);
        process.site_rates = Some(Vec::new());
        process
    }

    pub fn with_id_moves(mut self, id_moves: Vec<(usize, usize)>) -> Self {
        self.id_moves = id_moves;
        self
    }

    pub fn rate_constant(&self) -> Rate {
        self.rate_constant
    }

    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn sites(&self) -> &[SiteId] {
        &self.sites
    }

    pub fn pattern(&self) -> &[MatchListEntry] {
        &self.pattern
    }

    pub fn pattern_mut(&mut self) -> &mut Vec<MatchListEntry> {
        &mut self.pattern
    }

    pub fn basis_sites(&self) -> &[SiteId] {
        &self.basis_sites
    }

    pub fn id_moves(&self) -> &[(usize, usize)] {
        &self.id_moves
    }

    pub fn id_moves_mut(&mut self) -> &mut Vec<(usize, usize)> {
        &mut self.id_moves
    }

    pub fn uses_custom_rates(&self) -> bool {
        self.site_rates.is_some()
    }

    /// Current per-site rates, for a custom-rate process.
    pub fn site_rates(&self) -> Option<&[Rate]> {
        self.site_rates.as_deref()
    }

    /// `n_sites * rate_constant`, or the sum of per-site rates for a
    /// custom-rate process.
    pub fn total_rate(&self) -> Rate {
        match &self.site_rates {
            Some(rates) => rates.iter().sum(),
            None => self.sites.len() as Rate * self.rate_constant,
        }
    }

    /// Add a plain applicable site.
    pub fn add_site(&mut self, idx: SiteId) {
        self.sites.push(idx);
    }

    /// Add an applicable site with its own rate (custom-rate processes).
    pub fn add_site_with_rate(&mut self, idx: SiteId, rate: Rate) {
        self.sites.push(idx);
        self.site_rates.get_or_insert_with(Vec::new).push(rate);
    }

    /// Add the same site `multiplicity` times (e.g. several equivalent
    /// orientations collapsing onto one lattice index).
    pub fn add_site_with_multiplicity(&mut self, idx: SiteId, multiplicity: usize) {
        for _ in 0..multiplicity {
            self.add_site(idx);
        }
    }

    /// Remove the first applicable-site entry matching `idx`, along with its
    /// cached rate if this is a custom-rate process.
    pub fn remove_site(&mut self, idx: SiteId) {
        if let Some(position) = self.sites.iter().position(|&site| site == idx) {
            self.sites.remove(position);
            if let Some(rates) = &mut self.site_rates {
                rates.remove(position);
            }
        }
    }

    /// Remove every applicable-site entry. Used by `Interactions::clear_matching`.
    pub fn clear_sites(&mut self) {
        self.sites.clear();
        if let Some(rates) = &mut self.site_rates {
            rates.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_list::{Coordinate, MatchKind, UpdateKind};

    fn origin_pattern() -> Vec<MatchListEntry> {
        vec![MatchListEntry::new(
            Coordinate::origin(),
            MatchKind::Species(1),
            UpdateKind::Species(2),
        )]
    }

    #[test]
    fn plain_process_rate_is_sites_times_constant() {
        let mut process = Process::new(origin_pattern(), 2.5, vec![0]);
        process.add_site(10);
        process.add_site(11);
        assert_eq!(process.n_sites(), 2);
        assert_eq!(process.total_rate(), 5.0);
        assert!(!process.uses_custom_rates());
    }

    #[test]
    fn custom_rate_process_sums_site_rates() {
        let mut process = Process::with_custom_rates(origin_pattern(), 1.0, vec![0]);
        process.add_site_with_rate(1, 12.0);
        process.add_site_with_rate(2, 4.0);
        assert_eq!(process.total_rate(), 16.0);
        assert!(process.uses_custom_rates());
    }

    #[test]
    fn remove_site_drops_matching_rate() {
        let mut process = Process::with_custom_rates(origin_pattern(), 1.0, vec![0]);
        process.add_site_with_rate(5, 24.0);
        process.add_site_with_rate(6, 7.0);
        process.remove_site(5);
        assert_eq!(process.sites(), &[6]);
        assert_eq!(process.site_rates(), Some(&[7.0][..]));
    }

    #[test]
    fn clear_sites_empties_sites_and_rates() {
        let mut process = Process::with_custom_rates(origin_pattern(), 1.0, vec![0]);
        process.add_site_with_rate(1, 2.0);
        process.clear_sites();
        assert_eq!(process.n_sites(), 0);
        assert_eq!(process.total_rate(), 0.0);
    }

    #[test]
    fn add_site_with_multiplicity_repeats_the_same_site() {
        let mut process = Process::new(origin_pattern(), 2.0, vec![0]);
        process.add_site_with_multiplicity(3, 4);
        assert_eq!(process.sites(), &[3, 3, 3, 3]);
        assert_eq!(process.n_sites(), 4);
        assert_eq!(process.total_rate(), 8.0);
    }

    #[test]
    fn add_site_with_multiplicity_zero_adds_nothing() {
        let mut process = Process::new(origin_pattern(), 2.0, vec![0]);
        process.add_site_with_multiplicity(3, 0);
        assert!(process.sites().is_empty());
    }
}
