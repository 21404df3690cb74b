//! Construction entry points for [`ImmutableArray`].
//!
//! Each function decides whether the result can reuse an existing buffer or must be
//! backed by a fresh allocation:
//!
//! - Buffers borrowed from the caller (`&[T]`) are always copied, since the caller keeps
//!   a mutable path to them.
//! - Values moved in by the caller (`[T; N]`, `Vec<T>`) become the backing buffer
//!   directly.
//! - Published arrays are reused whenever the result covers the whole array, because
//!   their buffers are never mutated.

use amudai_common::{Result, error::Error, verify_range};

use crate::{
    FixedSizeBuilder, ImmutableArray,
    source::{ArraySource, IntoArraySource},
};

/// Returns the shared empty array. Never allocates.
#[inline]
pub fn empty<T>() -> ImmutableArray<T> {
    ImmutableArray::empty()
}

/// Creates a single-element array.
pub fn from_elem<T>(item: T) -> ImmutableArray<T> {
    ImmutableArray::from_vec(vec![item])
}

pub fn from_pair<T>(item1: T, item2: T) -> ImmutableArray<T> {
    ImmutableArray::from_vec(vec![item1, item2])
}

pub fn from_triple<T>(item1: T, item2: T, item3: T) -> ImmutableArray<T> {
    ImmutableArray::from_vec(vec![item1, item2, item3])
}

pub fn from_quad<T>(item1: T, item2: T, item3: T, item4: T) -> ImmutableArray<T> {
    ImmutableArray::from_vec(vec![item1, item2, item3, item4])
}

/// Creates an array from an inline array of items, moving them into an exactly sized
/// buffer. `[T; 0]` yields the shared empty array.
pub fn from_array<T, const N: usize>(items: [T; N]) -> ImmutableArray<T> {
    if N == 0 {
        return ImmutableArray::empty();
    }
    ImmutableArray::from_vec(Vec::from(items))
}

/// Creates an array holding a copy of `items`.
///
/// The copy is required: the caller still owns `items` and may mutate the storage later.
/// A zero-length slice yields the shared empty array without allocating.
pub fn from_slice<T: Clone>(items: &[T]) -> ImmutableArray<T> {
    if items.is_empty() {
        return ImmutableArray::empty();
    }
    ImmutableArray::from_vec(items.to_vec())
}

/// Like [`from_slice`], mapping an absent buffer to an uninitialized array.
pub fn from_optional_slice<T: Clone>(items: Option<&[T]>) -> ImmutableArray<T> {
    match items {
        Some(items) => from_slice(items),
        None => ImmutableArray::uninit(),
    }
}

/// Creates an array holding a copy of `items[start..start + length]`.
///
/// Fails with `OutOfRange` if the requested range does not fit within `items`.
pub fn from_subslice<T: Clone>(
    items: &[T],
    start: usize,
    length: usize,
) -> Result<ImmutableArray<T>> {
    let range = checked_range(items, start, length)?;
    Ok(from_slice(range))
}

/// Creates an array with the elements `start..start + length` of `source`.
///
/// Requesting the whole of `source` returns `source` itself, sharing its buffer.
/// Any other non-empty range is copied into a new buffer.
///
/// Fails with `InvalidState` if `source` is uninitialized and with `OutOfRange` if the
/// range does not fit within `source`.
pub fn slice_of<T: Clone>(
    source: &ImmutableArray<T>,
    start: usize,
    length: usize,
) -> Result<ImmutableArray<T>> {
    let items = source.as_slice()?;
    let range = checked_range(items, start, length)?;
    if length == 0 {
        return Ok(ImmutableArray::empty());
    }
    if start == 0 && length == items.len() {
        return Ok(source.clone());
    }
    Ok(ImmutableArray::from_vec(range.to_vec()))
}

/// Creates an array from any supported source, allocating as little as possible.
///
/// In order of preference:
/// 1. A published array is returned as is, uninitialized arrays included.
/// 2. An owned vector becomes the backing buffer without copying.
/// 3. Items with an exact size hint are written into a buffer allocated once with
///    that size. Zero items yield the shared empty array.
/// 4. Items of unknown count are collected into a growable buffer that is then
///    trimmed to its exact length.
///
/// ```
/// use amudai_immutable_array::{create, source::FromIter};
///
/// let squares = create::from_source(FromIter((1..=4).map(|i| i * i)));
/// assert_eq!(squares.as_slice().unwrap(), &[1, 4, 9, 16]);
///
/// let same = create::from_source(&squares);
/// assert!(same.ptr_eq(&squares));
///
/// let evens = create::from_source(FromIter((1..10).filter(|i| i % 2 == 0)));
/// assert_eq!(evens.len(), 4);
/// ```
pub fn from_source<T, S>(source: S) -> ImmutableArray<T>
where
    S: IntoArraySource<T>,
{
    match source.into_array_source() {
        ArraySource::Shared(array) => array,
        ArraySource::Owned(vec) => ImmutableArray::from_vec(vec),
        ArraySource::Items(items) => collect_items(items),
    }
}

fn collect_items<T, I>(items: I) -> ImmutableArray<T>
where
    I: Iterator<Item = T>,
{
    match items.size_hint() {
        (0, Some(0)) => ImmutableArray::empty(),
        (lower, Some(upper)) if lower == upper => {
            let mut buffer = Vec::with_capacity(lower);
            buffer.extend(items);
            ImmutableArray::from_vec(buffer)
        }
        _ => {
            let mut buffer = items.collect::<Vec<_>>();
            log::trace!(
                "from_source: collected {} items of unknown count",
                buffer.len()
            );
            buffer.shrink_to_fit();
            ImmutableArray::from_vec(buffer)
        }
    }
}

/// Creates an array by applying `selector` to every element of `source`.
///
/// The result always has its own buffer; `source` is neither modified nor shared.
/// Fails with `InvalidState` if `source` is uninitialized.
pub fn map<T, U, F>(source: &ImmutableArray<T>, selector: F) -> Result<ImmutableArray<U>>
where
    F: FnMut(&T) -> U,
{
    let items = source.as_slice()?;
    Ok(ImmutableArray::from_vec(items.iter().map(selector).collect()))
}

/// Creates an array by applying `selector` to the elements `start..start + length`
/// of `source`.
pub fn map_range<T, U, F>(
    source: &ImmutableArray<T>,
    start: usize,
    length: usize,
    selector: F,
) -> Result<ImmutableArray<U>>
where
    F: FnMut(&T) -> U,
{
    let range = checked_range(source.as_slice()?, start, length)?;
    Ok(ImmutableArray::from_vec(range.iter().map(selector).collect()))
}

/// Like [`map_range`], passing `arg` to every `selector` invocation.
///
/// Lets a plain function stand in for a closure that would otherwise capture `arg`.
///
/// ```
/// use amudai_immutable_array::create;
///
/// fn scale(value: &u32, factor: &u32) -> u32 {
///     value * factor
/// }
///
/// let source = create::from_quad(1u32, 2, 3, 4);
/// let scaled = create::map_range_with(&source, 1, 2, scale, &10).unwrap();
/// assert_eq!(scaled.as_slice().unwrap(), &[20, 30]);
/// ```
pub fn map_range_with<T, U, A, F>(
    source: &ImmutableArray<T>,
    start: usize,
    length: usize,
    mut selector: F,
    arg: &A,
) -> Result<ImmutableArray<U>>
where
    A: ?Sized,
    F: FnMut(&T, &A) -> U,
{
    let range = checked_range(source.as_slice()?, start, length)?;
    Ok(ImmutableArray::from_vec(
        range.iter().map(|item| selector(item, arg)).collect(),
    ))
}

/// Like [`map`], for selectors resolved at runtime.
///
/// Fails with `MissingArgument` if no selector is supplied.
pub fn map_dyn<T, U>(
    source: &ImmutableArray<T>,
    selector: Option<&dyn Fn(&T) -> U>,
) -> Result<ImmutableArray<U>> {
    let selector = selector.ok_or_else(|| Error::missing_arg("selector"))?;
    map(source, selector)
}

/// Creates a staging builder with exactly `capacity` default-initialized slots.
pub fn builder<T: Default>(capacity: usize) -> FixedSizeBuilder<T> {
    FixedSizeBuilder::with_capacity(capacity)
}

/// Validates `start..start + length` against `items` without overflowing.
pub(crate) fn checked_range<T>(items: &[T], start: usize, length: usize) -> Result<&[T]> {
    verify_range!(start, start <= items.len());
    verify_range!(length, length <= items.len() - start);
    Ok(&items[start..start + length])
}

#[cfg(test)]
mod tests {
    use amudai_common::ErrorKind;

    use super::*;
    use crate::source::FromIter;

    #[test]
    fn test_small_arities() {
        assert_eq!(from_elem(1).as_slice().unwrap(), &[1]);
        assert_eq!(from_pair(1, 2).as_slice().unwrap(), &[1, 2]);
        assert_eq!(from_triple(1, 2, 3).as_slice().unwrap(), &[1, 2, 3]);
        assert_eq!(from_quad(1, 2, 3, 4).as_slice().unwrap(), &[1, 2, 3, 4]);
        assert_eq!(from_array(["a", "b"]).len(), 2);
        assert!(from_array::<u8, 0>([]).ptr_eq(&empty()));
    }

    #[test]
    fn test_from_slice_copies() {
        let mut b = vec![1, 2, 3];
        let s = from_slice(&b);
        b[0] = 99;
        assert_eq!(s[0], 1);
        assert_ne!(s.as_slice().unwrap().as_ptr(), b.as_ptr());
    }

    #[test]
    fn test_from_optional_slice() {
        assert!(from_optional_slice::<i32>(None).is_uninitialized());
        assert!(from_optional_slice::<i32>(Some(&[])).is_empty());
        assert_eq!(from_optional_slice(Some(&[7][..])).len(), 1);
    }

    #[test]
    fn test_from_subslice() {
        let b = [1, 2, 3, 4, 5];
        let s = from_subslice(&b, 1, 3).unwrap();
        assert_eq!(s.as_slice().unwrap(), &[2, 3, 4]);

        assert!(from_subslice(&b, 5, 0).unwrap().is_empty());
        assert!(from_subslice(&b, 3, 3).unwrap_err().is_out_of_range());
        assert!(from_subslice(&b, 6, 0).unwrap_err().is_out_of_range());
        assert!(from_subslice(&b, 1, usize::MAX).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_slice_of() {
        let s = from_slice(&[1, 2, 3, 4]);
        let whole = slice_of(&s, 0, 4).unwrap();
        assert!(whole.ptr_eq(&s));

        let part = slice_of(&s, 1, 2).unwrap();
        assert!(!part.ptr_eq(&s));
        assert_eq!(part.as_slice().unwrap(), &[2, 3]);

        assert!(slice_of(&s, 2, 0).unwrap().is_empty());
        assert!(slice_of(&s, 2, 3).unwrap_err().is_out_of_range());
        assert!(
            slice_of(&ImmutableArray::<i32>::uninit(), 0, 0)
                .unwrap_err()
                .is_invalid_state()
        );
        assert!(slice_of(&empty::<i32>(), 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_from_source_ladder() {
        let shared = from_slice(&[1, 2, 3]);
        assert!(from_source(shared.clone()).ptr_eq(&shared));
        assert!(from_source(&shared).ptr_eq(&shared));
        assert!(from_source(ImmutableArray::<i32>::uninit()).is_uninitialized());
        assert!(from_source(None::<ImmutableArray<i32>>).is_uninitialized());

        let v = vec![4, 5, 6];
        let ptr = v.as_ptr();
        let owned = from_source(v);
        assert_eq!(owned.as_slice().unwrap().as_ptr(), ptr);

        assert!(from_source(Vec::<i32>::new()).ptr_eq(&empty()));
        assert!(from_source(FromIter(std::iter::empty::<i32>())).ptr_eq(&empty()));
        assert!(from_source(&[] as &[i32]).ptr_eq(&empty()));

        let counted = from_source(FromIter(0..5));
        assert_eq!(counted.as_slice().unwrap(), &[0, 1, 2, 3, 4]);

        let uncounted = from_source(FromIter((0..10).filter(|i| i % 3 == 0)));
        assert_eq!(uncounted.as_slice().unwrap(), &[0, 3, 6, 9]);
        assert!(
            from_source(FromIter((0..10).filter(|_| false)))
                .ptr_eq(&ImmutableArray::<i32>::empty())
        );
    }

    #[test]
    fn test_map() {
        let source = from_slice(&[1, 2, 3, 4]);
        let doubled = map(&source, |v| v * 2).unwrap();
        assert_eq!(doubled.as_slice().unwrap(), &[2, 4, 6, 8]);
        assert_eq!(source.as_slice().unwrap(), &[1, 2, 3, 4]);

        let names = map_range(&source, 2, 2, |v| format!("#{v}")).unwrap();
        assert_eq!(names.as_slice().unwrap(), &["#3", "#4"]);

        assert!(map_range(&source, 1, 0, |v| *v).unwrap().is_empty());
        assert!(
            map_range(&source, 3, 2, |v| *v)
                .unwrap_err()
                .is_out_of_range()
        );
        assert!(
            map(&ImmutableArray::<i32>::uninit(), |v| *v)
                .unwrap_err()
                .is_invalid_state()
        );

        let offset = map_range_with(&source, 0, 4, |v, base: &i32| v + base, &100).unwrap();
        assert_eq!(offset.as_slice().unwrap(), &[101, 102, 103, 104]);
    }

    #[test]
    fn test_map_dyn() {
        let source = from_pair(1u8, 2);
        let to_u32: &dyn Fn(&u8) -> u32 = &|v: &u8| u32::from(*v) << 8;
        let shifted = map_dyn(&source, Some(to_u32)).unwrap();
        assert_eq!(shifted.as_slice().unwrap(), &[256, 512]);

        let err = map_dyn::<u8, u32>(&source, None).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MissingArgument { name } if name == "selector"
        ));
    }

    #[test]
    fn test_builder() {
        let mut b = builder::<i64>(2);
        assert_eq!(b.capacity(), 2);
        b[1] = -1;
        assert_eq!(b.freeze().unwrap().as_slice().unwrap(), &[0, -1]);
    }
}
