//! Covariant, zero-copy reinterpretation of [`ImmutableArray`] buffers.
//!
//! Rust expresses element-type covariance in two ways, and both are supported here
//! without copying the backing buffer:
//!
//! - Lifetime covariance: an `ImmutableArray<&'long T>` is usable wherever an
//!   `ImmutableArray<&'short T>` is expected. [`upcast_lifetime`] spells this out.
//! - Trait-object covariance: [`CovariantArray<U>`] views a buffer of `T` elements as a
//!   sequence of `&U`, where `T: Upcast<U>` (typically `U` is a `dyn Trait` that `T`
//!   implements). [`CovariantArray::downcast`] recovers the original array.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use amudai_common::{Result, error::Error, verify_range};

use crate::ImmutableArray;

/// Reference conversion from an element type to a type it may be viewed as.
///
/// Implement it for each concrete element type and the trait object it should be
/// exposed as, usually through [`impl_upcast!`](crate::impl_upcast).
pub trait Upcast<U: ?Sized> {
    fn upcast_ref(&self) -> &U;
}

/// Implements [`Upcast`] for `source => target` pairs where `&source` coerces to
/// `&target`.
///
/// Trait-object targets get the `'static` object bound, matching the default for
/// `dyn Trait` used as a type argument (`Upcast<dyn Trait>`).
///
/// ```
/// use amudai_immutable_array::{create, impl_upcast};
///
/// trait Shape: Send + Sync {
///     fn area(&self) -> f64;
/// }
///
/// struct Square(f64);
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// impl_upcast!(Square => dyn Shape);
///
/// let squares = create::from_pair(Square(1.0), Square(2.0));
/// let shapes = squares.upcast::<dyn Shape>();
/// assert_eq!(shapes.get(1).unwrap().area(), 4.0);
/// ```
#[macro_export]
macro_rules! impl_upcast {
    ($($source:ty => $target:ty),+ $(,)?) => {
        $(
            const _: () = {
                // Object lifetimes in a type alias default to 'static, also behind `&`.
                type Target = $target;

                impl $crate::covariant::Upcast<Target> for $source {
                    #[inline]
                    fn upcast_ref(&self) -> &Target {
                        self
                    }
                }
            };
        )+
    };
}

/// Element access over a type-erased buffer.
trait ElementView<U: ?Sized>: Send + Sync {
    fn len(&self) -> usize;

    fn element(&self, index: usize) -> &U;

    fn element_type_name(&self) -> &'static str;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T, U> ElementView<U> for Vec<T>
where
    T: Upcast<U> + Send + Sync + 'static,
    U: ?Sized,
{
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn element(&self, index: usize) -> &U {
        self[index].upcast_ref()
    }

    fn element_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// An immutable array viewed through a covariant element type `U`.
///
/// Shares the backing buffer of the [`ImmutableArray`] it was created from and keeps
/// its state: uninitialized, empty or populated.
pub struct CovariantArray<U: ?Sized> {
    repr: Repr<U>,
}

enum Repr<U: ?Sized> {
    Uninitialized,
    Empty,
    Populated(Arc<dyn ElementView<U>>),
}

impl<U: ?Sized> CovariantArray<U> {
    /// Returns the number of elements; zero when uninitialized.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Populated(view) => view.len(),
            _ => 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.repr, Repr::Empty)
    }

    #[inline]
    pub fn is_uninitialized(&self) -> bool {
        matches!(self.repr, Repr::Uninitialized)
    }

    /// Returns the element at `index` viewed as `U`.
    ///
    /// Fails with `InvalidState` if uninitialized and `OutOfRange` if `index` is past
    /// the end.
    pub fn get(&self, index: usize) -> Result<&U> {
        match &self.repr {
            Repr::Uninitialized => Err(Error::invalid_state("CovariantArray")),
            Repr::Empty => Err(Error::out_of_range("index", "index < len")),
            Repr::Populated(view) => {
                verify_range!(index, index < view.len());
                Ok(view.element(index))
            }
        }
    }

    /// Returns an iterator over the elements viewed as `U`.
    pub fn iter(&self) -> Result<impl Iterator<Item = &U> + '_> {
        let view = match &self.repr {
            Repr::Uninitialized => return Err(Error::invalid_state("CovariantArray")),
            Repr::Empty => None,
            Repr::Populated(view) => Some(view),
        };
        Ok(view
            .into_iter()
            .flat_map(|view| (0..view.len()).map(move |index| view.element(index))))
    }

    /// Recovers the array of the original element type, sharing the buffer.
    ///
    /// Fails with `IncompatibleType` if the buffer does not hold `T` elements. Empty and
    /// uninitialized views carry no element type and convert to any `T`.
    pub fn downcast<T>(&self) -> Result<ImmutableArray<T>>
    where
        T: Send + Sync + 'static,
    {
        match &self.repr {
            Repr::Uninitialized => Ok(ImmutableArray::uninit()),
            Repr::Empty => Ok(ImmutableArray::empty()),
            Repr::Populated(view) => {
                let source_type = view.element_type_name();
                Arc::clone(view)
                    .into_any()
                    .downcast::<Vec<T>>()
                    .map(ImmutableArray::from_shared)
                    .map_err(|_| {
                        Error::incompatible_type(source_type, std::any::type_name::<T>())
                    })
            }
        }
    }
}

impl<U: ?Sized> Clone for CovariantArray<U> {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Uninitialized => Repr::Uninitialized,
            Repr::Empty => Repr::Empty,
            Repr::Populated(view) => Repr::Populated(Arc::clone(view)),
        };
        CovariantArray { repr }
    }
}

impl<U: ?Sized> fmt::Debug for CovariantArray<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Uninitialized => f.write_str("CovariantArray(<uninitialized>)"),
            Repr::Empty => f.write_str("CovariantArray(len: 0)"),
            Repr::Populated(view) => write!(
                f,
                "CovariantArray(len: {}, element: {})",
                view.len(),
                view.element_type_name()
            ),
        }
    }
}

impl<T> ImmutableArray<T>
where
    T: Send + Sync + 'static,
{
    /// Views this array's elements as `U` without copying. See
    /// [`create_covariant_upcast`].
    pub fn upcast<U>(&self) -> CovariantArray<U>
    where
        T: Upcast<U>,
        U: ?Sized,
    {
        create_covariant_upcast(self)
    }
}

/// Creates a view of `source` whose elements are exposed as `U`, sharing the buffer.
pub fn create_covariant_upcast<T, U>(source: &ImmutableArray<T>) -> CovariantArray<U>
where
    T: Upcast<U> + Send + Sync + 'static,
    U: ?Sized,
{
    let repr = if source.is_uninitialized() {
        Repr::Uninitialized
    } else {
        match source.shared_buffer() {
            Some(buffer) => {
                let view: Arc<dyn ElementView<U>> = buffer.clone();
                Repr::Populated(view)
            }
            None => Repr::Empty,
        }
    };
    CovariantArray { repr }
}

/// Shortens the lifetime of borrowed elements. The buffer is shared, not copied.
#[inline]
pub fn upcast_lifetime<'short, 'long: 'short, T: ?Sized>(
    source: ImmutableArray<&'long T>,
) -> ImmutableArray<&'short T> {
    source
}
