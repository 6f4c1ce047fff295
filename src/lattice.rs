use crate::match_list::Coordinate;
use crate::match_list::MatchKind;
use crate::match_list::MatchListEntry;
use crate::match_list::UpdateKind;
use crate::SiteId;

/// Lattice geometry and periodicity, out of scope beyond what `Configuration`
/// needs to enumerate neighborhoods. The engine only forwards a `LatticeMap`
/// to `Configuration`; it never inspects one directly.
pub trait LatticeMap {
    /// Number of unit cells along each axis.
    fn repetitions(&self) -> (i32, i32, i32);
    /// Whether each axis wraps around (periodic boundary conditions).
    fn periodic(&self) -> (bool, bool, bool);
}

pub struct CubicLatticeMap {
    pub repetitions: (i32, i32, i32),
    pub periodic: (bool, bool, bool),
}

impl LatticeMap for CubicLatticeMap {
    fn repetitions(&self) -> (i32, i32, i32) {
        self.repetitions
    }

    fn periodic(&self) -> (bool, bool, bool) {
        self.periodic
    }
}

/// Site/species configuration and match-list construction, out of scope
/// beyond the narrow interface `Interactions::update_process_match_lists`
/// consumes: the longest enumeration of neighbors around a basis site out to
/// a given range.
pub trait Configuration {
    fn minimal_match_list(&self, basis_position: SiteId) -> Vec<MatchListEntry>;
    fn init_match_lists(&mut self, lattice_map: &dyn LatticeMap, max_range: i32);
}

/// A minimal periodic lattice of repeated unit cells, each containing the
/// same motif of basis sites, sufficient to exercise implicit-wildcard
/// insertion in tests. Real hosts supply a far richer `Configuration`.
pub struct MockLatticeConfiguration {
    motif: Vec<Coordinate>,
    species: Vec<i32>,
    repetitions: (i32, i32, i32),
    periodic: (bool, bool, bool),
    max_range: i32,
}

impl MockLatticeConfiguration {
    /// `species` is laid out in row-major `(i, j, k, motif_index)` order,
    /// one entry per site, length `nx * ny * nz * motif.len()`.
    pub fn new(
        motif: Vec<Coordinate>,
        species: Vec<i32>,
        repetitions: (i32, i32, i32),
        periodic: (bool, bool, bool),
    ) -> Self {
        let (nx, ny, nz) = repetitions;
        assert_eq!(
            species.len(),
            (nx * ny * nz) as usize * motif.len(),
            "species array must cover every site in the lattice"
        );
        Self {
            motif,
            species,
            repetitions,
            periodic,
            max_range: 1,
        }
    }

    fn cell_of(&self, site: SiteId) -> (i32, i32, i32, usize) {
        let motif_len = self.motif.len();
        let (_, ny, nz) = self.repetitions;
        let cell = site / motif_len;
        let m = site % motif_len;
        let i = (cell / (ny * nz) as usize) as i32;
        let j = ((cell / nz as usize) % ny as usize) as i32;
        let k = (cell % nz as usize) as i32;
        (i, j, k, m)
    }

    fn wrap(index: i32, repetitions: i32, periodic: bool) -> Option<i32> {
        if (0..repetitions).contains(&index) {
            Some(index)
        } else if periodic {
            Some(index.rem_euclid(repetitions))
        } else {
            None
        }
    }

    fn species_at(&self, i: i32, j: i32, k: i32, m: usize) -> i32 {
        let (_, ny, nz) = self.repetitions;
        let cell = (i as usize * ny as usize + j as usize) * nz as usize + k as usize;
        self.species[cell * self.motif.len() + m]
    }
}

impl Configuration for MockLatticeConfiguration {
    fn minimal_match_list(&self, basis_position: SiteId) -> Vec<MatchListEntry> {
        let (bi, bj, bk, bm) = self.cell_of(basis_position);
        let basis_offset = self.motif[bm];
        let (nx, ny, nz) = self.repetitions;
        let (px, py, pz) = self.periodic;
        let range = self.max_range;

        let mut entries = Vec::new();
        for di in -range..=range {
            let Some(wi) = Self::wrap(bi + di, nx, px) else {
                continue;
            };
            for dj in -range..=range {
                let Some(wj) = Self::wrap(bj + dj, ny, py) else {
                    continue;
                };
                for dk in -range..=range {
                    let Some(wk) = Self::wrap(bk + dk, nz, pz) else {
                        continue;
                    };
                    for (m, offset) in self.motif.iter().enumerate() {
                        let species = self.species_at(wi, wj, wk, m);
                        let coordinate = Coordinate::new(
                            f64::from(di) + offset.x - basis_offset.x,
                            f64::from(dj) + offset.y - basis_offset.y,
                            f64::from(dk) + offset.z - basis_offset.z,
                        );
                        entries.push(MatchListEntry::new(
                            coordinate,
                            MatchKind::Species(species),
                            UpdateKind::Species(species),
                        ));
                    }
                }
            }
        }
        entries.sort_by_key(MatchListEntry::distance_order_key);
        entries
    }

    fn init_match_lists(&mut self, lattice_map: &dyn LatticeMap, max_range: i32) {
        self.repetitions = lattice_map.repetitions();
        self.periodic = lattice_map.periodic();
        self.max_range = max_range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_site_motif_config() -> MockLatticeConfiguration {
        // 5x5x5 cells, periodic, two basis sites per cell: a "vacancy" site
        // at the cell origin and a "B" site offset by (0.3, 0.3, 0.3),
        // mirroring a typical periodic two-species lattice.
        let motif = vec![Coordinate::origin(), Coordinate::new(0.3, 0.3, 0.3)];
        let cells = 5 * 5 * 5;
        let species = (0..cells).flat_map(|_| [3, 2]).collect();
        MockLatticeConfiguration::new(motif, species, (5, 5, 5), (true, true, true))
    }

    #[test]
    fn minimal_match_list_entry_zero_is_origin() {
        let mut config = two_site_motif_config();
        let lattice = CubicLatticeMap {
            repetitions: (5, 5, 5),
            periodic: (true, true, true),
        };
        config.init_match_lists(&lattice, 2);
        let list = config.minimal_match_list(0);
        assert_eq!(list[0].coordinate, Coordinate::origin());
    }

    #[test]
    fn minimal_match_list_covers_every_site_once() {
        let mut config = two_site_motif_config();
        let lattice = CubicLatticeMap {
            repetitions: (5, 5, 5),
            periodic: (true, true, true),
        };
        config.init_match_lists(&lattice, 2);
        let list = config.minimal_match_list(3);
        assert_eq!(list.len(), 5 * 5 * 5 * 2);
    }
}
