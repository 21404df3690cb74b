//! Source shapes accepted by [`crate::create::from_source`].
//!
//! Range construction does not test the runtime type of its input. Instead, every
//! supported source converts itself into an [`ArraySource`], stating up front whether
//! it can hand over an existing buffer or only yield items.

use crate::ImmutableArray;

/// What a source offers to range construction.
pub enum ArraySource<T, I> {
    /// An already published array whose buffer may be reused as is.
    Shared(ImmutableArray<T>),
    /// An exclusively owned buffer handed over by move.
    Owned(Vec<T>),
    /// Items to be copied into a freshly allocated buffer.
    Items(I),
}

/// Conversion into an [`ArraySource`].
pub trait IntoArraySource<T> {
    type Items: Iterator<Item = T>;

    fn into_array_source(self) -> ArraySource<T, Self::Items>;
}

/// Adapts any [`IntoIterator`] for use with [`crate::create::from_source`].
#[derive(Debug, Clone)]
pub struct FromIter<I>(pub I);

impl<T> IntoArraySource<T> for ImmutableArray<T> {
    type Items = std::iter::Empty<T>;

    fn into_array_source(self) -> ArraySource<T, Self::Items> {
        ArraySource::Shared(self)
    }
}

impl<T> IntoArraySource<T> for &ImmutableArray<T> {
    type Items = std::iter::Empty<T>;

    fn into_array_source(self) -> ArraySource<T, Self::Items> {
        ArraySource::Shared(self.clone())
    }
}

/// `None` stands for an uninitialized array.
impl<T> IntoArraySource<T> for Option<ImmutableArray<T>> {
    type Items = std::iter::Empty<T>;

    fn into_array_source(self) -> ArraySource<T, Self::Items> {
        ArraySource::Shared(self.unwrap_or_default())
    }
}

impl<T> IntoArraySource<T> for Vec<T> {
    type Items = std::iter::Empty<T>;

    fn into_array_source(self) -> ArraySource<T, Self::Items> {
        ArraySource::Owned(self)
    }
}

impl<'a, T: Clone> IntoArraySource<T> for &'a [T] {
    type Items = std::iter::Cloned<std::slice::Iter<'a, T>>;

    fn into_array_source(self) -> ArraySource<T, Self::Items> {
        ArraySource::Items(self.iter().cloned())
    }
}

impl<T, const N: usize> IntoArraySource<T> for [T; N] {
    type Items = std::array::IntoIter<T, N>;

    fn into_array_source(self) -> ArraySource<T, Self::Items> {
        ArraySource::Items(self.into_iter())
    }
}

impl<I: IntoIterator> IntoArraySource<I::Item> for FromIter<I> {
    type Items = I::IntoIter;

    fn into_array_source(self) -> ArraySource<I::Item, Self::Items> {
        ArraySource::Items(self.0.into_iter())
    }
}
