//! Fixed-size staging buffer that is frozen into an [`ImmutableArray`] without copying.

use amudai_common::{Result, error::Error, verify_range};

use crate::ImmutableArray;

/// A single-owner, fixed-capacity mutable buffer used to stage the contents of an
/// [`ImmutableArray`].
///
/// The builder is filled through indexed access and then published with
/// [`FixedSizeBuilder::freeze`], which moves the staged storage into the new array
/// without copying the elements. After a freeze the builder is uninitialized and can be
/// reused by calling [`FixedSizeBuilder::reset`].
///
/// A builder reset to zero capacity is indistinguishable from one that was never
/// initialized.
///
/// # Examples
///
/// ```
/// use amudai_immutable_array::FixedSizeBuilder;
///
/// let mut builder = FixedSizeBuilder::<u32>::with_capacity(3);
/// builder[0] = 10;
/// builder[1] = 20;
/// builder.set(2, 30).unwrap();
///
/// let array = builder.freeze().unwrap();
/// assert_eq!(array.as_slice().unwrap(), &[10, 20, 30]);
/// assert_eq!(builder.capacity(), 0);
/// assert!(builder.get(0).is_err());
/// ```
#[derive(Debug)]
pub struct FixedSizeBuilder<T> {
    /// Staged elements. `None` when uninitialized or frozen.
    buffer: Option<Vec<T>>,
}

impl<T> FixedSizeBuilder<T> {
    /// Creates an uninitialized builder with zero capacity.
    pub const fn new() -> Self {
        FixedSizeBuilder { buffer: None }
    }

    /// Returns the number of slots, or zero when the builder is uninitialized.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().map_or(0, Vec::len)
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.buffer.is_some()
    }

    /// Returns a reference to the slot at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let slots = self.slots()?;
        verify_range!(index, index < slots.len());
        Ok(&slots[index])
    }

    /// Returns a mutable reference to the slot at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let slots = self.slots_mut()?;
        verify_range!(index, index < slots.len());
        Ok(&mut slots[index])
    }

    /// Stores `value` in the slot at `index`, dropping the previous value.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    pub fn as_slice(&self) -> Result<&[T]> {
        Ok(self.slots()?.as_slice())
    }

    /// Returns all staged slots for bulk initialization.
    pub fn as_mut_slice(&mut self) -> Result<&mut [T]> {
        Ok(self.slots_mut()?.as_mut_slice())
    }

    /// Publishes the staged elements as an [`ImmutableArray`].
    ///
    /// The staged buffer is moved into the returned array; no element is copied. The
    /// builder is left uninitialized, so the published buffer is no longer reachable
    /// through it. Fails with `InvalidState` if the builder is uninitialized.
    pub fn freeze(&mut self) -> Result<ImmutableArray<T>> {
        let buffer = self
            .buffer
            .take()
            .ok_or_else(|| Error::invalid_state("FixedSizeBuilder"))?;
        log::trace!("FixedSizeBuilder: freezing {} staged elements", buffer.len());
        Ok(ImmutableArray::from_vec(buffer))
    }

    /// Consumes the builder and publishes its staged elements.
    pub fn into_array(mut self) -> Result<ImmutableArray<T>> {
        self.freeze()
    }

    fn slots(&self) -> Result<&Vec<T>> {
        self.buffer
            .as_ref()
            .ok_or_else(|| Error::invalid_state("FixedSizeBuilder"))
    }

    fn slots_mut(&mut self) -> Result<&mut Vec<T>> {
        self.buffer
            .as_mut()
            .ok_or_else(|| Error::invalid_state("FixedSizeBuilder"))
    }
}

impl<T: Default> FixedSizeBuilder<T> {
    /// Creates a builder with exactly `capacity` default-initialized slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut builder = FixedSizeBuilder::new();
        builder.reset(capacity);
        builder
    }

    /// Reinitializes the builder to `capacity` default-initialized slots.
    ///
    /// When the current buffer already has the requested length, its slots are reset to
    /// `T::default()` in place and no allocation takes place. A zero `capacity` returns
    /// the builder to the uninitialized state.
    pub fn reset(&mut self, capacity: usize) {
        if capacity == 0 {
            self.buffer = None;
            return;
        }

        match &mut self.buffer {
            Some(slots) if slots.len() == capacity => {
                log::trace!("FixedSizeBuilder: clearing {capacity} slots in place");
                slots.fill_with(T::default);
            }
            _ => {
                log::trace!("FixedSizeBuilder: allocating {capacity} slots");
                let mut slots = Vec::with_capacity(capacity);
                slots.resize_with(capacity, T::default);
                self.buffer = Some(slots);
            }
        }
    }
}

impl<T> Default for FixedSizeBuilder<T> {
    fn default() -> Self {
        FixedSizeBuilder::new()
    }
}

impl<T> std::ops::Index<usize> for FixedSizeBuilder<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match &self.buffer {
            Some(slots) => &slots[index],
            None => panic!("index into an uninitialized FixedSizeBuilder"),
        }
    }
}

impl<T> std::ops::IndexMut<usize> for FixedSizeBuilder<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match &mut self.buffer {
            Some(slots) => &mut slots[index],
            None => panic!("index into an uninitialized FixedSizeBuilder"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freeze_round_trip() {
        let mut st = FixedSizeBuilder::<i32>::with_capacity(3);
        assert!(st.is_initialized());
        assert_eq!(st.capacity(), 3);
        st[0] = 10;
        st[1] = 20;
        st[2] = 30;

        let r = st.freeze().unwrap();
        assert_eq!(r.len(), 3);
        assert_eq!(r.as_slice().unwrap(), &[10, 20, 30]);

        assert_eq!(st.capacity(), 0);
        assert!(!st.is_initialized());
        assert!(st.get(0).unwrap_err().is_invalid_state());
        assert!(st.set(0, 1).unwrap_err().is_invalid_state());
        assert!(st.freeze().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_freeze_does_not_copy() {
        let mut st = FixedSizeBuilder::<u64>::with_capacity(8);
        st.as_mut_slice().unwrap().copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let staged = st.as_slice().unwrap().as_ptr();

        let r = st.freeze().unwrap();
        assert_eq!(r.as_slice().unwrap().as_ptr(), staged);
    }

    #[test]
    fn test_reset_same_capacity_clears_in_place() {
        let mut st = FixedSizeBuilder::<i32>::with_capacity(2);
        st[0] = 5;
        st[1] = 6;
        let before = st.as_slice().unwrap().as_ptr();

        st.reset(2);
        assert_eq!(st[0], 0);
        assert_eq!(st[1], 0);
        assert_eq!(st.as_slice().unwrap().as_ptr(), before);
    }

    #[test]
    fn test_reset_new_capacity() {
        let mut st = FixedSizeBuilder::<String>::with_capacity(2);
        st[1] = "x".to_string();
        st.reset(4);
        assert_eq!(st.capacity(), 4);
        assert!(st.as_slice().unwrap().iter().all(String::is_empty));
    }

    #[test]
    fn test_reset_zero_is_uninitialized() {
        let mut st = FixedSizeBuilder::<i32>::with_capacity(3);
        st.reset(0);
        assert_eq!(st.capacity(), 0);
        assert!(!st.is_initialized());
        assert!(st.get(0).unwrap_err().is_invalid_state());
        assert!(st.freeze().unwrap_err().is_invalid_state());

        let never = FixedSizeBuilder::<i32>::with_capacity(0);
        assert_eq!(never.capacity(), st.capacity());
        assert_eq!(never.is_initialized(), st.is_initialized());
    }

    #[test]
    fn test_out_of_range() {
        let mut st = FixedSizeBuilder::<i32>::with_capacity(2);
        assert!(st.get(2).unwrap_err().is_out_of_range());
        assert!(st.get_mut(5).unwrap_err().is_out_of_range());
        assert!(st.set(2, 1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_reuse_after_freeze() {
        let mut st = FixedSizeBuilder::<u8>::new();
        let mut frozen = Vec::new();
        for round in 1..=3u8 {
            st.reset(2);
            st[0] = round;
            st[1] = round * 10;
            frozen.push(st.freeze().unwrap());
        }
        assert_eq!(frozen[0].as_slice().unwrap(), &[1, 10]);
        assert_eq!(frozen[1].as_slice().unwrap(), &[2, 20]);
        assert_eq!(frozen[2].as_slice().unwrap(), &[3, 30]);
    }

    #[test]
    #[should_panic(expected = "uninitialized FixedSizeBuilder")]
    fn test_index_uninitialized_panics() {
        let mut st = FixedSizeBuilder::<i32>::new();
        st[0] = 1;
    }
}
