use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::ops::{Deref, DerefMut, Index, IndexMut};

/// A `Vec` that can only be indexed by the typed index `I`.
#[derive(Clone, PartialEq, Eq)]
pub struct IndexedVec<I, T> {
    vec: Vec<T>,
    _marker: PhantomData<I>,
}

impl<I, T> Deref for IndexedVec<I, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.vec
    }
}

impl<I, T> DerefMut for IndexedVec<I, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.vec
    }
}

impl<I: AsIndex, T> IndexedVec<I, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filled(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        vec![value; len].into()
    }

    pub fn push(&mut self, value: T) -> I {
        let index = I::from_usize(self.len());
        self.vec.push(value);
        index
    }

    pub fn get(&self, index: I) -> Option<&T> {
        self.vec.get(index.to_usize())
    }

    pub fn indexes(&self) -> impl Iterator<Item = I> + DoubleEndedIterator + ExactSizeIterator {
        (0..self.len()).map(I::from_usize)
    }

    pub fn enumerate(
        &self,
    ) -> impl Iterator<Item = (I, &T)> + DoubleEndedIterator + ExactSizeIterator {
        self.vec.iter().enumerate().map(|(i, t)| (I::from_usize(i), t))
    }
}

impl<I, T> Default for IndexedVec<I, T> {
    fn default() -> Self {
        Vec::new().into()
    }
}

impl<I: AsIndex, T> Index<I> for IndexedVec<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &Self::Output {
        &self.vec[index.to_usize()]
    }
}

impl<I: AsIndex, T> IndexMut<I> for IndexedVec<I, T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.vec[index.to_usize()]
    }
}

impl<I, T> From<Vec<T>> for IndexedVec<I, T> {
    fn from(value: Vec<T>) -> Self {
        Self { vec: value, _marker: PhantomData }
    }
}

impl<I, T> FromIterator<T> for IndexedVec<I, T> {
    fn from_iter<IT: IntoIterator<Item = T>>(iter: IT) -> Self {
        Vec::from_iter(iter).into()
    }
}

impl<I, T: std::fmt::Debug> std::fmt::Debug for IndexedVec<I, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.vec.fmt(f)
    }
}

pub trait AsIndex: Copy {
    fn to_usize(&self) -> usize;
    fn from_usize(index: usize) -> Self;
}

/// `usize` with a niche, so that `Option<Index>` is pointer sized.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonMaxUsize(NonZeroUsize);

impl NonMaxUsize {
    pub const fn new(n: usize) -> Self {
        match NonZeroUsize::new(n.wrapping_add(1)) {
            Some(n) => Self(n),
            None => panic!("index out of range"),
        }
    }

    pub const fn to_usize(self) -> usize {
        self.0.get() - 1
    }
}

macro_rules! new_index {
    ($(#[$($meta:tt)*])* $vis:vis index $ty:ident = $prefix:literal) => {
        $(#[$($meta)*])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $ty { index: $crate::index::NonMaxUsize }

        #[allow(non_snake_case)]
        $vis const fn $ty(index: usize) -> $ty {
            $ty { index: $crate::index::NonMaxUsize::new(index) }
        }

        impl $crate::index::AsIndex for $ty {
            fn to_usize(&self) -> usize {
                self.index.to_usize()
            }

            fn from_usize(index: usize) -> Self {
                $ty(index)
            }
        }

        impl ::std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.index.to_usize())
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(self, f)
            }
        }
    };
}
pub(crate) use new_index;
