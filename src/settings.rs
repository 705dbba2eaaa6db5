use std::cmp::Ordering;
use std::fmt::Debug;

/// Sort in natural order, comparing digit runs by value. This is the default collation.
#[derive(Copy, Clone, Debug, Default)]
pub struct Natural;

/// Sort in natural order, ignoring ASCII case.
#[derive(Copy, Clone, Debug, Default)]
pub struct NaturalIgnoreCase;

/// Sort by plain byte comparison, the way `str`'s `Ord` does.
#[derive(Copy, Clone, Debug, Default)]
pub struct Bytewise;

/// The ordering a [`Queue`](crate::Queue) uses when it is sorted.
/// This trait is sealed; pick one of [`Natural`], [`NaturalIgnoreCase`] or [`Bytewise`].
pub trait Collation: seal_collation::Sealed + Debug + Copy + Default {
    fn compare(a: &str, b: &str) -> Ordering;
}

pub(crate) mod seal_collation {
    pub trait Sealed {}
}

impl seal_collation::Sealed for Natural {}
impl Collation for Natural {
    #[inline]
    fn compare(a: &str, b: &str) -> Ordering {
        crate::natural::compare(a, b)
    }
}

impl seal_collation::Sealed for NaturalIgnoreCase {}
impl Collation for NaturalIgnoreCase {
    #[inline]
    fn compare(a: &str, b: &str) -> Ordering {
        crate::natural::compare_ignore_case(a, b)
    }
}

impl seal_collation::Sealed for Bytewise {}
impl Collation for Bytewise {
    #[inline]
    fn compare(a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}
