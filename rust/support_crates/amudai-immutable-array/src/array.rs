//! The published immutable array value.

use std::fmt;
use std::sync::Arc;

use amudai_common::{Result, error::Error, verify_range};

/// An immutable, fixed-length array with value semantics.
///
/// Cloning an `ImmutableArray` is cheap: clones share the same backing buffer, which is
/// never mutated once it has been published. An array is always in exactly one of three
/// states:
///
/// - *uninitialized*: there is no backing buffer and every element access fails with an
///   `InvalidState` error. This is the [`Default`] state, convenient for lazily
///   initialized fields.
/// - *empty*: the shared zero-length array. It owns no allocation, so all empty arrays
///   of all element types are the same value (see [`ImmutableArray::ptr_eq`]).
/// - *populated*: a shared buffer holding at least one element.
///
/// # Examples
///
/// ```
/// use amudai_immutable_array::{ImmutableArray, create};
///
/// let mut source = vec![1, 2, 3];
/// let array = create::from_slice(&source);
/// source[0] = 99;
/// assert_eq!(array[0], 1);
/// assert_eq!(array.len(), 3);
///
/// let lazy = ImmutableArray::<u32>::default();
/// assert!(lazy.is_uninitialized());
/// assert!(lazy.get(0).is_err());
/// ```
pub struct ImmutableArray<T> {
    repr: Repr<T>,
}

enum Repr<T> {
    Uninitialized,
    Empty,
    Populated(Arc<Vec<T>>),
}

impl<T> ImmutableArray<T> {
    /// Returns an uninitialized array.
    #[inline]
    pub const fn uninit() -> Self {
        ImmutableArray {
            repr: Repr::Uninitialized,
        }
    }

    /// Returns the shared empty array. Never allocates.
    #[inline]
    pub const fn empty() -> Self {
        ImmutableArray { repr: Repr::Empty }
    }

    /// Wraps an owned vector without copying its elements.
    ///
    /// Taking the vector by value transfers the only path to its storage into the new
    /// array, so no defensive copy is needed. An empty vector yields the shared empty
    /// array and its allocation, if any, is released.
    pub fn from_vec(vec: Vec<T>) -> Self {
        if vec.is_empty() {
            ImmutableArray::empty()
        } else {
            ImmutableArray {
                repr: Repr::Populated(Arc::new(vec)),
            }
        }
    }

    /// Wraps an already shared buffer. Callers must not hold any mutable path to it.
    pub(crate) fn from_shared(buffer: Arc<Vec<T>>) -> Self {
        if buffer.is_empty() {
            ImmutableArray::empty()
        } else {
            ImmutableArray {
                repr: Repr::Populated(buffer),
            }
        }
    }

    /// Returns the backing buffer of a populated array.
    pub(crate) fn shared_buffer(&self) -> Option<&Arc<Vec<T>>> {
        match &self.repr {
            Repr::Populated(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Returns the number of elements in the array.
    ///
    /// The length of an uninitialized array is undefined and reported as zero; use
    /// [`ImmutableArray::is_uninitialized`] to tell it apart from an empty one. Unlike
    /// slices, `len() == 0` therefore does not imply [`ImmutableArray::is_empty`].
    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Populated(buffer) => buffer.len(),
            _ => 0,
        }
    }

    /// Returns `true` if this is the shared empty array.
    ///
    /// An uninitialized array is not empty even though its [`ImmutableArray::len`] is
    /// zero; use [`ImmutableArray::is_uninitialized_or_empty`] to accept both.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.repr, Repr::Empty)
    }

    /// Returns `true` if the array has no backing buffer.
    #[inline]
    pub fn is_uninitialized(&self) -> bool {
        matches!(self.repr, Repr::Uninitialized)
    }

    /// Returns `true` if the array holds at least one element.
    #[inline]
    pub fn is_populated(&self) -> bool {
        matches!(self.repr, Repr::Populated(_))
    }

    #[inline]
    pub fn is_uninitialized_or_empty(&self) -> bool {
        !self.is_populated()
    }

    /// Returns the elements as a slice.
    ///
    /// Fails with `InvalidState` if the array is uninitialized.
    #[inline]
    pub fn as_slice(&self) -> Result<&[T]> {
        match &self.repr {
            Repr::Uninitialized => Err(Error::invalid_state("ImmutableArray")),
            Repr::Empty => Ok(&[]),
            Repr::Populated(buffer) => Ok(buffer.as_slice()),
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Fails with `InvalidState` if the array is uninitialized and with `OutOfRange` if
    /// `index` is not below [`ImmutableArray::len`].
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        let items = self.as_slice()?;
        verify_range!(index, index < items.len());
        Ok(&items[index])
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> Result<std::slice::Iter<'_, T>> {
        Ok(self.as_slice()?.iter())
    }

    /// Returns `true` if both arrays are in the same state and, when populated, share
    /// the same backing buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Uninitialized, Repr::Uninitialized) => true,
            (Repr::Empty, Repr::Empty) => true,
            (Repr::Populated(a), Repr::Populated(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Copies the elements into a new, independently owned vector.
    pub fn to_vec(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        Ok(self.as_slice()?.to_vec())
    }
}

impl<T> Clone for ImmutableArray<T> {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Uninitialized => Repr::Uninitialized,
            Repr::Empty => Repr::Empty,
            Repr::Populated(buffer) => Repr::Populated(Arc::clone(buffer)),
        };
        ImmutableArray { repr }
    }
}

impl<T> Default for ImmutableArray<T> {
    fn default() -> Self {
        ImmutableArray::uninit()
    }
}

impl<T> std::ops::Index<usize> for ImmutableArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the array is uninitialized or `index` is out of bounds.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match &self.repr {
            Repr::Uninitialized => panic!("index into an uninitialized ImmutableArray"),
            Repr::Empty => panic!("index {index} out of bounds for an empty ImmutableArray"),
            Repr::Populated(buffer) => &buffer[index],
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Uninitialized => f.write_str("ImmutableArray(<uninitialized>)"),
            Repr::Empty => f.debug_tuple("ImmutableArray").field(&(&[] as &[T])).finish(),
            Repr::Populated(buffer) => f
                .debug_tuple("ImmutableArray")
                .field(&buffer.as_slice())
                .finish(),
        }
    }
}

impl<T> From<Vec<T>> for ImmutableArray<T> {
    fn from(vec: Vec<T>) -> Self {
        ImmutableArray::from_vec(vec)
    }
}

impl<T, const N: usize> From<[T; N]> for ImmutableArray<T> {
    fn from(items: [T; N]) -> Self {
        crate::create::from_array(items)
    }
}

impl<T: Clone> From<&[T]> for ImmutableArray<T> {
    fn from(items: &[T]) -> Self {
        crate::create::from_slice(items)
    }
}

impl<T> FromIterator<T> for ImmutableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        crate::create::from_source(crate::source::FromIter(iter))
    }
}
