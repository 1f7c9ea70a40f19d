use core::fmt;
use core::num::NonZero;

/// Identifies one node slot in an [`Arena`](super::Arena).
///
/// Handles are plain indexes: holding one keeps nothing alive, which is what lets a child refer
/// to its parent without an ownership cycle.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<u32>);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        let raw = index.checked_add(1).and_then(|shifted| u32::try_from(shifted).ok()).and_then(NonZero::new);
        match raw {
            Some(raw) => Self(raw),
            None => panic!("`Handle::from_index()` - `index` > `Handle::MAX`!"),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_index())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Parent links are `Option<Handle>`; the niche keeps them the size of a `u32`.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, u32);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn index_past_max_panics() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn debug_shows_index() {
        assert_eq!(format!("{:?}", Handle::from_index(7)), "#7");
        assert_eq!(format!("{:?}", Some(Handle::from_index(0))), "Some(#0)");
    }

    proptest! {
        #[test]
        fn index_survives_conversion(index in 0..=Handle::MAX) {
            prop_assert_eq!(Handle::from_index(index).to_index(), index);
        }
    }
}
