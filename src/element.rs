//! Element types storable in a [`LabeledArray`](crate::LabeledArray).

#[cfg(feature = "num-complex")]
use num_complex::Complex;
use ndarray::{Array, ArrayD, ArrayViewD, Dimension, IxDyn};
use num_traits::ToPrimitive;
use std::fmt;

/// The element type of an array, named after the NumPy dtype it corresponds
/// to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DType {
    /// `i8`
    Int8,
    /// `i16`
    Int16,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `u8`
    UInt8,
    /// `u16`
    UInt16,
    /// `u32`
    UInt32,
    /// `u64`
    UInt64,
    /// `f32`
    Float32,
    /// `f64`
    Float64,
    /// `Complex<f32>`
    #[cfg(feature = "num-complex")]
    Complex64,
    /// `Complex<f64>`
    #[cfg(feature = "num-complex")]
    Complex128,
}

impl DType {
    /// The NumPy name of the type, e.g. `"float64"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            #[cfg(feature = "num-complex")]
            Self::Complex64 => "complex64",
            #[cfg(feature = "num-complex")]
            Self::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An array element type that can be held by [`Values`].
///
/// This is implemented for fixed-size integers up to 64 bits, floating point
/// numbers, and complex floating point numbers (if enabled with the crate
/// feature).
pub trait Element: Clone + fmt::Debug + Send + Sync + 'static {
    /// Returns the dtype of `Self`.
    fn dtype() -> DType;

    /// Wraps an owned array of `Self` into the type-erased [`Values`].
    fn into_values(array: ArrayD<Self>) -> Values;

    /// Borrows the array out of `values` if it holds elements of type `Self`.
    fn view_of(values: &Values) -> Option<ArrayViewD<'_, Self>>;

    /// Wraps a single element into the type-erased [`Scalar`].
    fn into_scalar(self) -> Scalar;
}

/// A dense N-dimensional array of any [`Element`] type.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Values {
    #[allow(missing_docs)]
    Int8(ArrayD<i8>),
    #[allow(missing_docs)]
    Int16(ArrayD<i16>),
    #[allow(missing_docs)]
    Int32(ArrayD<i32>),
    #[allow(missing_docs)]
    Int64(ArrayD<i64>),
    #[allow(missing_docs)]
    UInt8(ArrayD<u8>),
    #[allow(missing_docs)]
    UInt16(ArrayD<u16>),
    #[allow(missing_docs)]
    UInt32(ArrayD<u32>),
    #[allow(missing_docs)]
    UInt64(ArrayD<u64>),
    #[allow(missing_docs)]
    Float32(ArrayD<f32>),
    #[allow(missing_docs)]
    Float64(ArrayD<f64>),
    #[allow(missing_docs)]
    #[cfg(feature = "num-complex")]
    Complex64(ArrayD<Complex<f32>>),
    #[allow(missing_docs)]
    #[cfg(feature = "num-complex")]
    Complex128(ArrayD<Complex<f64>>),
}

/// A single element of any [`Element`] type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Scalar {
    #[allow(missing_docs)]
    Int8(i8),
    #[allow(missing_docs)]
    Int16(i16),
    #[allow(missing_docs)]
    Int32(i32),
    #[allow(missing_docs)]
    Int64(i64),
    #[allow(missing_docs)]
    UInt8(u8),
    #[allow(missing_docs)]
    UInt16(u16),
    #[allow(missing_docs)]
    UInt32(u32),
    #[allow(missing_docs)]
    UInt64(u64),
    #[allow(missing_docs)]
    Float32(f32),
    #[allow(missing_docs)]
    Float64(f64),
    #[allow(missing_docs)]
    #[cfg(feature = "num-complex")]
    Complex64(Complex<f32>),
    #[allow(missing_docs)]
    #[cfg(feature = "num-complex")]
    Complex128(Complex<f64>),
}

/// Runs `$body` with `$arr` bound to the typed array inside `$values`.
macro_rules! with_array {
    ($values:expr, $arr:ident => $body:expr) => {
        match $values {
            Values::Int8($arr) => $body,
            Values::Int16($arr) => $body,
            Values::Int32($arr) => $body,
            Values::Int64($arr) => $body,
            Values::UInt8($arr) => $body,
            Values::UInt16($arr) => $body,
            Values::UInt32($arr) => $body,
            Values::UInt64($arr) => $body,
            Values::Float32($arr) => $body,
            Values::Float64($arr) => $body,
            #[cfg(feature = "num-complex")]
            Values::Complex64($arr) => $body,
            #[cfg(feature = "num-complex")]
            Values::Complex128($arr) => $body,
        }
    };
}

macro_rules! impl_element {
    ($elem:ty, $variant:ident) => {
        impl Element for $elem {
            fn dtype() -> DType {
                DType::$variant
            }

            fn into_values(array: ArrayD<Self>) -> Values {
                Values::$variant(array)
            }

            fn view_of(values: &Values) -> Option<ArrayViewD<'_, Self>> {
                match values {
                    Values::$variant(array) => Some(array.view()),
                    _ => None,
                }
            }

            fn into_scalar(self) -> Scalar {
                Scalar::$variant(self)
            }
        }

        impl From<$elem> for Scalar {
            fn from(value: $elem) -> Self {
                Scalar::$variant(value)
            }
        }
    };
}

impl_element!(i8, Int8);
impl_element!(i16, Int16);
impl_element!(i32, Int32);
impl_element!(i64, Int64);
impl_element!(u8, UInt8);
impl_element!(u16, UInt16);
impl_element!(u32, UInt32);
impl_element!(u64, UInt64);
impl_element!(f32, Float32);
impl_element!(f64, Float64);
#[cfg(feature = "num-complex")]
impl_element!(Complex<f32>, Complex64);
#[cfg(feature = "num-complex")]
impl_element!(Complex<f64>, Complex128);

impl<A, D> From<Array<A, D>> for Values
where
    A: Element,
    D: Dimension,
{
    fn from(array: Array<A, D>) -> Self {
        A::into_values(array.into_dyn())
    }
}

impl Values {
    /// The axis lengths.
    pub fn shape(&self) -> &[usize] {
        with_array!(self, array => array.shape())
    }

    /// The number of axes.
    pub fn ndim(&self) -> usize {
        with_array!(self, array => array.ndim())
    }

    /// The total number of elements.
    pub fn len(&self) -> usize {
        with_array!(self, array => array.len())
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element type.
    pub fn dtype(&self) -> DType {
        with_array!(self, array => element_dtype(array))
    }

    /// Returns the element at `indices`, or `None` if the index is out of
    /// bounds or has the wrong number of axes.
    pub fn get(&self, indices: &[usize]) -> Option<Scalar> {
        if indices.len() != self.ndim() {
            return None;
        }
        with_array!(self, array => array.get(IxDyn(indices)).map(|elem| elem.clone().into_scalar()))
    }

    /// Borrows the values as a typed view, if the element type is `A`.
    pub fn view<A: Element>(&self) -> Option<ArrayViewD<'_, A>> {
        A::view_of(self)
    }

    /// The first `count` elements in logical (row-major) order.
    pub fn head(&self, count: usize) -> Vec<Scalar> {
        with_array!(self, array => array.iter().take(count).map(|elem| elem.clone().into_scalar()).collect())
    }
}

fn element_dtype<A: Element>(_: &ArrayD<A>) -> DType {
    A::dtype()
}

impl Scalar {
    /// The element type.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Int8(_) => DType::Int8,
            Self::Int16(_) => DType::Int16,
            Self::Int32(_) => DType::Int32,
            Self::Int64(_) => DType::Int64,
            Self::UInt8(_) => DType::UInt8,
            Self::UInt16(_) => DType::UInt16,
            Self::UInt32(_) => DType::UInt32,
            Self::UInt64(_) => DType::UInt64,
            Self::Float32(_) => DType::Float32,
            Self::Float64(_) => DType::Float64,
            #[cfg(feature = "num-complex")]
            Self::Complex64(_) => DType::Complex64,
            #[cfg(feature = "num-complex")]
            Self::Complex128(_) => DType::Complex128,
        }
    }

    /// Converts to `f64`.
    ///
    /// Returns `None` for complex values with a nonzero imaginary part.
    pub fn to_f64(&self) -> Option<f64> {
        match *self {
            Self::Int8(v) => v.to_f64(),
            Self::Int16(v) => v.to_f64(),
            Self::Int32(v) => v.to_f64(),
            Self::Int64(v) => v.to_f64(),
            Self::UInt8(v) => v.to_f64(),
            Self::UInt16(v) => v.to_f64(),
            Self::UInt32(v) => v.to_f64(),
            Self::UInt64(v) => v.to_f64(),
            Self::Float32(v) => v.to_f64(),
            Self::Float64(v) => Some(v),
            #[cfg(feature = "num-complex")]
            Self::Complex64(v) => (v.im == 0.).then(|| v.re.to_f64()).flatten(),
            #[cfg(feature = "num-complex")]
            Self::Complex128(v) => (v.im == 0.).then_some(v.re),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::UInt8(v) => write!(f, "{v}"),
            Self::UInt16(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::Float32(v) => f.write_str(&format_float(f64::from(v))),
            Self::Float64(v) => f.write_str(&format_float(v)),
            #[cfg(feature = "num-complex")]
            Self::Complex64(v) => write!(f, "{v}"),
            #[cfg(feature = "num-complex")]
            Self::Complex128(v) => write!(f, "{v}"),
        }
    }
}

/// Formats a float the way NumPy prints it in a repr: `1.0`, `-37.5`, `nan`.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_owned()
    } else if value == f64::INFINITY {
        "inf".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_owned()
    } else {
        format!("{value:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn values_from_static_arrays() {
        let values = Values::from(array![[1, 2, 3], [4, 5, 6]]);
        assert_eq!(values.shape(), &[2, 3]);
        assert_eq!(values.ndim(), 2);
        assert_eq!(values.len(), 6);
        assert_eq!(values.dtype(), DType::Int32);
        assert_eq!(values.get(&[1, 2]), Some(Scalar::Int32(6)));
        assert_eq!(values.get(&[2, 0]), None);
        assert_eq!(values.get(&[0]), None);
    }

    #[test]
    fn typed_view() {
        let values = Values::from(array![1.5f32, 2.5]);
        assert_eq!(values.view::<f32>().unwrap(), array![1.5f32, 2.5].into_dyn());
        assert!(values.view::<f64>().is_none());
    }

    #[test]
    fn head_is_row_major() {
        let values = Values::from(array![[1u8, 2], [3, 4]]);
        assert_eq!(
            values.head(3),
            vec![Scalar::UInt8(1), Scalar::UInt8(2), Scalar::UInt8(3)]
        );
    }

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::Float64(1.).to_string(), "1.0");
        assert_eq!(Scalar::Float64(-37.5).to_string(), "-37.5");
        assert_eq!(Scalar::Float64(f64::NAN).to_string(), "nan");
        assert_eq!(Scalar::Float32(f32::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Scalar::Int64(-3).to_string(), "-3");
    }

    #[test]
    fn scalar_to_f64() {
        assert_eq!(Scalar::UInt16(7).to_f64(), Some(7.));
        assert_eq!(Scalar::Float32(0.5).to_f64(), Some(0.5));
    }

    #[cfg(feature = "num-complex")]
    #[test]
    fn complex_elements() {
        let values = Values::from(array![Complex::new(1., 2.), Complex::new(3., 0.)]);
        assert_eq!(values.dtype().name(), "complex128");
        assert_eq!(values.get(&[0]).unwrap().to_f64(), None);
        assert_eq!(values.get(&[1]).unwrap().to_f64(), Some(3.));
    }
}
