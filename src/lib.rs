pub mod bucket;
pub mod error;
pub mod interactions;
pub mod lattice;
pub mod match_list;
pub mod process;
pub mod rate_calculator;
pub mod rate_table;

/// dimensional analysis types
pub type Rate = f64;
pub type Fingerprint = u64;
pub type SiteId = usize;
pub type ProcessId = usize;

// rate table parameters
const N_TABLES: usize = 8;
const MAX_SIZE: usize = 1024;

// geometric tolerances
const COORDINATE_TOLERANCE: f64 = 1e-10;
const SHELL_TIE_BREAK: f64 = 0.99999;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}
