//! Binary search over sorted [`ImmutableArray`] values.
//!
//! All searches return an `isize` with a dual meaning: a non-negative value is the
//! index of a matching element, a negative value is the bitwise complement of the
//! index at which the value would have to be inserted to keep the array sorted.
//! Indices are always relative to the start of the array, also for range searches.

use std::cmp::Ordering;

use amudai_common::{Result, error::Error};

use crate::{ImmutableArray, create::checked_range};

/// Searches the whole array for `value` using the natural order of `T`.
///
/// ```
/// use amudai_immutable_array::{create, search};
///
/// let sorted = create::from_quad(1, 3, 5, 7);
/// assert_eq!(search::binary_search(&sorted, &5).unwrap(), 2);
/// assert_eq!(!search::binary_search(&sorted, &4).unwrap(), 2);
/// ```
pub fn binary_search<T: Ord>(array: &ImmutableArray<T>, value: &T) -> Result<isize> {
    binary_search_by(array, value, T::cmp)
}

/// Searches the whole array for `value`, ordering elements with `compare`.
///
/// `compare` receives an array element first and `value` second.
pub fn binary_search_by<T, F>(array: &ImmutableArray<T>, value: &T, compare: F) -> Result<isize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = array.as_slice()?.len();
    binary_search_range_by(array, 0, len, value, compare)
}

/// Searches the elements `index..index + length` for `value`.
pub fn binary_search_range<T: Ord>(
    array: &ImmutableArray<T>,
    index: usize,
    length: usize,
    value: &T,
) -> Result<isize> {
    binary_search_range_by(array, index, length, value, T::cmp)
}

/// Searches the elements `index..index + length` for `value`, ordering elements with
/// `compare`.
///
/// Fails with `InvalidState` if the array is uninitialized and with `OutOfRange` if the
/// range does not fit within the array.
pub fn binary_search_range_by<T, F>(
    array: &ImmutableArray<T>,
    index: usize,
    length: usize,
    value: &T,
    mut compare: F,
) -> Result<isize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let range = checked_range(array.as_slice()?, index, length)?;
    let found = range
        .binary_search_by(|item| compare(item, value))
        .map(|pos| index + pos)
        .map_err(|pos| index + pos);
    encode_search_result(found)
}

/// Encodes a `slice::binary_search` style result: `Ok(i)` as `i`, `Err(i)` as `!i`.
///
/// Fails with `OutOfRange` if the position does not fit in a non-negative `isize`,
/// which is only possible for arrays of zero-sized elements.
#[inline]
pub fn encode_search_result(result: std::result::Result<usize, usize>) -> Result<isize> {
    let (pos, found) = match result {
        Ok(pos) => (pos, true),
        Err(pos) => (pos, false),
    };
    let pos =
        isize::try_from(pos).map_err(|_| Error::out_of_range("pos", "pos <= isize::MAX"))?;
    Ok(if found { pos } else { !pos })
}

/// Inverse of [`encode_search_result`].
#[inline]
pub fn decode_search_result(encoded: isize) -> std::result::Result<usize, usize> {
    if encoded >= 0 {
        Ok(encoded as usize)
    } else {
        Err(!encoded as usize)
    }
}
