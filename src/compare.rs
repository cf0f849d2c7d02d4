//! Orderings used to arrange values in an [`AvlTree`](crate::AvlTree).

/// A total order over `T`, expressed as a "less than" predicate.
///
/// `less` must be irreflexive and transitive, and `!less(a, b) && !less(b, a)` must behave as an
/// equivalence. A comparator that breaks these rules does not cause memory unsafety, but the
/// tree's ordering and balance guarantees no longer hold.
///
/// Any `Fn(&T, &T) -> bool` closure is a comparator:
///
/// ```
/// use augmented_avl::AvlTree;
///
/// let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| a > b);
/// tree.extend([1, 3, 2]);
/// assert_eq!(tree.items(), [3, 2, 1]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Returns `true` if `a` orders strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if neither value orders before the other.
    #[inline]
    fn equal(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// The ordering given by `T`'s own `<` operator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: PartialOrd + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
