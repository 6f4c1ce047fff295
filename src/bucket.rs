use crate::error::BucketError;
use crate::error::BucketResult;
use crate::Arbitrary;

/// Fixed-length ordered sequence of per-species occupation counts for one
/// lattice site. Used by bucket-mode processes to express "at least this
/// many of each species" requirements and observed occupations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeBucket(Vec<u32>);

impl TypeBucket {
    /// A bucket of `size` zeroed slots.
    pub fn new(size: usize) -> Self {
        Self(vec![0; size])
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Unchecked index access: out-of-range is a programmer error, not a
    /// condition a caller can recover from.
    pub fn get(&self, i: usize) -> u32 {
        self.0[i]
    }

    pub fn set(&mut self, i: usize, value: u32) {
        self.0[i] = value;
    }

    fn check_size(&self, other: &Self) -> BucketResult<()> {
        if self.size() != other.size() {
            Err(BucketError::SizeMismatch {
                lhs: self.size(),
                rhs: other.size(),
            })
        } else {
            Ok(())
        }
    }

    pub fn identical(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    /// True iff slot `i` holds 1 and every other slot holds 0.
    pub fn equals_one_hot(&self, i: usize) -> BucketResult<bool> {
        if i >= self.size() {
            return Err(BucketError::OutOfRange {
                index: i,
                size: self.size(),
            });
        }
        Ok(self.0.iter().enumerate().all(|(j, &v)| if j == i { v == 1 } else { v == 0 }))
    }

    /// Lexicographic comparison: walk slots left to right, first differing
    /// slot decides. Equal sequences compare greater-or-equal.
    pub fn greater_or_equal(&self, other: &Self) -> BucketResult<bool> {
        self.check_size(other)?;
        for (&lhs, &rhs) in self.0.iter().zip(other.0.iter()) {
            if lhs < rhs {
                return Ok(false);
            } else if lhs > rhs {
                return Ok(true);
            }
        }
        Ok(true)
    }

    pub fn less_than(&self, other: &Self) -> BucketResult<bool> {
        self.greater_or_equal(other).map(|ge| !ge)
    }

    /// Elementwise `self[i] <= other[i]` for all `i`. Used to test whether a
    /// process's required counts are satisfied by an observed occupation.
    pub fn matches(&self, other: &Self) -> BucketResult<bool> {
        self.check_size(other)?;
        Ok(self.0.iter().zip(other.0.iter()).all(|(s, o)| s <= o))
    }

    pub fn add(&self, other: &Self) -> BucketResult<Self> {
        self.check_size(other)?;
        Ok(Self(
            self.0.iter().zip(other.0.iter()).map(|(a, b)| a + b).collect(),
        ))
    }

    /// Zero every slot, then set slot `i` to 1.
    pub fn assign_one_hot(&mut self, i: usize) -> BucketResult<()> {
        if i >= self.size() {
            return Err(BucketError::OutOfRange {
                index: i,
                size: self.size(),
            });
        }
        self.0.iter_mut().for_each(|v| *v = 0);
        self.0[i] = 1;
        Ok(())
    }
}

impl Arbitrary for TypeBucket {
    fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let size = rng.random_range(1..=6);
        Self((0..size).map(|_| rng.random_range(0..4)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_size_zero() {
        assert_eq!(TypeBucket::new(0).size(), 0);
    }

    #[test]
    fn one_hot_assignment() {
        let mut bucket = TypeBucket::new(3);
        bucket.assign_one_hot(1).unwrap();
        assert!(bucket.equals_one_hot(1).unwrap());
        assert!(!bucket.equals_one_hot(0).unwrap());
    }

    #[test]
    fn one_hot_out_of_range() {
        let mut bucket = TypeBucket::new(2);
        assert_eq!(
            bucket.assign_one_hot(5),
            Err(BucketError::OutOfRange { index: 5, size: 2 })
        );
    }

    #[test]
    fn size_mismatch_on_comparison() {
        let a = TypeBucket::new(2);
        let b = TypeBucket::new(3);
        assert_eq!(
            a.greater_or_equal(&b),
            Err(BucketError::SizeMismatch { lhs: 2, rhs: 3 })
        );
    }

    #[test]
    fn greater_or_equal_lexicographic() {
        let a = TypeBucket(vec![1, 2, 3]);
        let b = TypeBucket(vec![1, 2, 2]);
        assert!(a.greater_or_equal(&b).unwrap());
        assert!(!b.greater_or_equal(&a).unwrap());
        assert!(a.less_than(&b).is_ok_and(|lt| !lt));
    }

    #[test]
    fn equal_sequences_are_greater_or_equal() {
        let a = TypeBucket(vec![4, 5]);
        let b = TypeBucket(vec![4, 5]);
        assert!(a.greater_or_equal(&b).unwrap());
        assert!(!a.less_than(&b).unwrap());
    }

    #[test]
    fn match_requires_process_counts_satisfied() {
        let required = TypeBucket(vec![1, 0, 2]);
        let observed = TypeBucket(vec![1, 3, 2]);
        assert!(required.matches(&observed).unwrap());
        assert!(!observed.matches(&required).unwrap());
    }

    #[test]
    fn add_is_elementwise() {
        let a = TypeBucket(vec![1, 2, 3]);
        let b = TypeBucket(vec![3, 2, 1]);
        assert_eq!(a.add(&b).unwrap(), TypeBucket(vec![4, 4, 4]));
    }

    #[test]
    fn identical_requires_equal_size_and_contents() {
        let a = TypeBucket(vec![1, 2]);
        let b = TypeBucket(vec![1, 2]);
        let c = TypeBucket(vec![1, 2, 0]);
        assert!(a.identical(&b));
        assert!(!a.identical(&c));
    }
}
