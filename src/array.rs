use crate::{
    attrs::{AttrValue, Attributes},
    coords::{CoordinateLabels, Label},
    element::{DType, Element, Scalar, Values},
    summary::{ArraySummary, SummaryOptions},
    Error, Result,
};
use ndarray::ArrayViewD;
use std::{fmt, sync::Arc};

/// A single N-dimensional array with named dimensions, optional coordinate
/// labels per dimension, and attributes.
///
/// This is the in-memory counterpart of one NetCDF variable, e.g. the `XC`
/// longitude field of an ECCO grid tile with dimensions `(i2, i3)`.
///
/// # Example
///
/// ```
/// use labeled_array::{Label, LabeledArray, Scalar};
/// use ndarray::array;
/// # use labeled_array::Error;
///
/// let xc = LabeledArray::new("XC", ["i2", "i3"], array![[-37.5, -36.5], [-37.7, -37.2]])?
///     .with_coordinate("i2", vec![1., 2.])?
///     .with_attribute("units", "degrees_east");
///
/// assert_eq!(xc.shape(), [2, 2]);
/// assert_eq!(xc.get_value_at(&[1, 0])?, Scalar::Float64(-37.7));
/// assert_eq!(xc.get_coordinate_label("i2", 1)?, Label::Float(2.));
/// assert!(matches!(
///     xc.get_coordinate_label("i3", 0),
///     Err(Error::NoCoordinateDefined(_))
/// ));
/// # Ok::<_, Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    name: String,
    dimension_names: Vec<String>,
    values: Values,
    /// Parallel to `dimension_names`.
    coordinates: Vec<Option<Arc<CoordinateLabels>>>,
    attributes: Attributes,
}

impl LabeledArray {
    /// Creates an array named `name` whose axes are named by
    /// `dimension_names`, in order.
    ///
    /// Fails with [`Error::ShapeMismatch`] if the number of names differs from
    /// the rank of `values`, and with [`Error::DuplicateName`] if a dimension
    /// name repeats.
    pub fn new<N, I, S, V>(name: N, dimension_names: I, values: V) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        V: Into<Values>,
    {
        let name = name.into();
        let dimension_names: Vec<String> = dimension_names.into_iter().map(Into::into).collect();
        let values = values.into();
        if values.ndim() != dimension_names.len() {
            return Err(Error::shape_mismatch(
                &name,
                format!(
                    "{} dimension names for data of shape {:?}",
                    dimension_names.len(),
                    values.shape()
                ),
            ));
        }
        for (axis, dim) in dimension_names.iter().enumerate() {
            if dimension_names[..axis].contains(dim) {
                return Err(Error::DuplicateName(dim.clone()));
            }
        }
        Ok(Self {
            name,
            coordinates: vec![None; dimension_names.len()],
            dimension_names,
            values,
            attributes: Attributes::new(),
        })
    }

    /// Attaches coordinate labels to `dimension`.
    ///
    /// Fails with [`Error::UnknownDimension`] if the array has no such
    /// dimension, and with [`Error::ShapeMismatch`] if the number of labels
    /// differs from the dimension length.
    pub fn with_coordinate<L>(mut self, dimension: &str, labels: L) -> Result<Self>
    where
        L: Into<CoordinateLabels>,
    {
        let axis = self.axis_or_err(dimension)?;
        let labels = labels.into();
        let len = self.values.shape()[axis];
        if labels.len() != len {
            return Err(Error::shape_mismatch(
                dimension,
                format!("{} coordinate labels for length {len}", labels.len()),
            ));
        }
        self.coordinates[axis] = Some(Arc::new(labels));
        Ok(self)
    }

    /// Sets an attribute.
    pub fn with_attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        self.attributes.insert(key, value);
        self
    }

    /// Points the coordinate of `axis` at shared labels. The caller has
    /// checked the length.
    pub(crate) fn share_coordinate(&mut self, axis: usize, labels: Arc<CoordinateLabels>) {
        self.coordinates[axis] = Some(labels);
    }

    /// The variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dimension names in axis order.
    pub fn dimension_names(&self) -> &[String] {
        &self.dimension_names
    }

    /// The number of axes.
    pub fn ndim(&self) -> usize {
        self.dimension_names.len()
    }

    /// The total number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The axis lengths, ordered as [`dimension_names`](Self::dimension_names).
    pub fn shape(&self) -> Vec<usize> {
        self.values.shape().to_vec()
    }

    /// Dimension name and length pairs in axis order.
    pub fn dims(&self) -> impl Iterator<Item = (&str, usize)> {
        self.dimension_names
            .iter()
            .map(String::as_str)
            .zip(self.values.shape().iter().copied())
    }

    /// The length of `dimension`.
    pub fn get_dimension_length(&self, dimension: &str) -> Result<usize> {
        let axis = self.axis_or_err(dimension)?;
        Ok(self.values.shape()[axis])
    }

    /// The element type.
    pub fn dtype(&self) -> DType {
        self.values.dtype()
    }

    /// The type-erased values.
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Borrows the values as a typed `ndarray` view, if the element type is
    /// `A`.
    pub fn values_as<A: Element>(&self) -> Option<ArrayViewD<'_, A>> {
        self.values.view()
    }

    /// The element at `indices`, one index per axis.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if the number of indices differs
    /// from the rank or any index is not below its axis length.
    pub fn get_value_at(&self, indices: &[usize]) -> Result<Scalar> {
        if indices.len() != self.ndim() {
            return Err(Error::out_of_range(
                &format!("({})", self.dimension_names.join(", ")),
                indices.len(),
                self.ndim(),
            ));
        }
        for ((dim, len), &index) in self.dims().zip(indices) {
            if index >= len {
                return Err(Error::out_of_range(dim, index, len));
            }
        }
        self.values
            .get(indices)
            .ok_or_else(|| Error::out_of_range(&self.name, indices.len(), self.ndim()))
    }

    /// The coordinate labels of `dimension`, if any.
    pub fn coordinate(&self, dimension: &str) -> Option<&Arc<CoordinateLabels>> {
        self.axis_of(dimension)
            .and_then(|axis| self.coordinates[axis].as_ref())
    }

    /// Dimensions with coordinate labels, in axis order.
    pub fn coordinates(&self) -> impl Iterator<Item = (&str, &Arc<CoordinateLabels>)> {
        self.dimension_names
            .iter()
            .zip(&self.coordinates)
            .filter_map(|(dim, labels)| labels.as_ref().map(|labels| (dim.as_str(), labels)))
    }

    /// The label at `position` along `dimension`.
    ///
    /// Fails with [`Error::UnknownDimension`] if the array has no such
    /// dimension, [`Error::NoCoordinateDefined`] if the dimension has no
    /// labels, and [`Error::IndexOutOfRange`] if `position` is not below the
    /// dimension length.
    pub fn get_coordinate_label(&self, dimension: &str, position: usize) -> Result<Label> {
        let axis = self.axis_or_err(dimension)?;
        let labels = self.coordinates[axis]
            .as_ref()
            .ok_or_else(|| Error::NoCoordinateDefined(dimension.to_owned()))?;
        labels
            .get(position)
            .ok_or_else(|| Error::out_of_range(dimension, position, labels.len()))
    }

    /// The attribute map.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The attribute under `key`.
    pub fn get_attribute(&self, key: &str) -> Result<&AttrValue> {
        self.attributes
            .get(key)
            .ok_or_else(|| Error::MissingAttribute(key.to_owned()))
    }

    /// Copies the array, including its coordinate labels.
    ///
    /// [`Clone`] shares coordinate labels with the original (and with the
    /// owning collection); the result of this method shares nothing.
    pub fn deep_copy(&self) -> Self {
        log::trace!("deep copy of array `{}`", self.name);
        Self {
            coordinates: self
                .coordinates
                .iter()
                .map(|labels| labels.as_deref().cloned().map(Arc::new))
                .collect(),
            ..self.clone()
        }
    }

    /// Summarizes the array with default [`SummaryOptions`].
    pub fn describe(&self) -> ArraySummary {
        self.describe_with(&SummaryOptions::default())
    }

    /// Summarizes the array.
    pub fn describe_with(&self, options: &SummaryOptions) -> ArraySummary {
        ArraySummary::new(self, options)
    }

    pub(crate) fn axis_of(&self, dimension: &str) -> Option<usize> {
        self.dimension_names.iter().position(|d| d == dimension)
    }

    fn axis_or_err(&self, dimension: &str) -> Result<usize> {
        self.axis_of(dimension)
            .ok_or_else(|| Error::UnknownDimension(dimension.to_owned()))
    }
}

impl fmt::Display for LabeledArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.describe().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    fn t() -> LabeledArray {
        LabeledArray::new("T", ["i1", "i2"], array![[1, 2, 3], [4, 5, 6]]).unwrap()
    }

    #[test]
    fn value_lookup() {
        let t = t();
        assert_eq!(t.shape(), [2, 3]);
        assert_eq!(t.get_value_at(&[1, 2]), Ok(Scalar::Int32(6)));
        assert_eq!(t.get_value_at(&[0, 0]), Ok(Scalar::Int32(1)));
        assert_eq!(
            t.get_value_at(&[2, 0]),
            Err(Error::IndexOutOfRange {
                dimension: "i1".into(),
                index: 2,
                len: 2
            })
        );
        assert_eq!(
            t.get_value_at(&[0, 3]),
            Err(Error::IndexOutOfRange {
                dimension: "i2".into(),
                index: 3,
                len: 3
            })
        );
    }

    #[test]
    fn wrong_number_of_indices() {
        let t = t();
        assert!(matches!(
            t.get_value_at(&[1]),
            Err(Error::IndexOutOfRange { index: 1, len: 2, .. })
        ));
        assert!(matches!(
            t.get_value_at(&[0, 0, 0]),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn rank_must_match_dimension_names() {
        let err = LabeledArray::new("hFacC", ["i1", "i2"], Array3::<f64>::zeros((2, 3, 4)))
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { ref name, .. } if name == "hFacC"));
    }

    #[test]
    fn dimension_names_are_unique() {
        let err = LabeledArray::new("A", ["i2", "i2"], array![[1., 2.], [3., 4.]]).unwrap_err();
        assert_eq!(err, Error::DuplicateName("i2".into()));
    }

    #[test]
    fn coordinate_lookup() {
        let values = array![[0.5, 1.5, 2.5], [0.5, 1.5, 2.5], [0.5, 1.5, 2.5]];
        let xc = LabeledArray::new("XC", ["i2", "i3"], values)
            .unwrap()
            .with_coordinate("i2", vec![1., 2., 3.])
            .unwrap();
        assert_eq!(xc.get_coordinate_label("i2", 1), Ok(Label::Float(2.)));
        assert_eq!(
            xc.get_coordinate_label("i3", 0),
            Err(Error::NoCoordinateDefined("i3".into()))
        );
        assert_eq!(
            xc.get_coordinate_label("i1", 0),
            Err(Error::UnknownDimension("i1".into()))
        );
        assert!(matches!(
            xc.get_coordinate_label("i2", 3),
            Err(Error::IndexOutOfRange { index: 3, len: 3, .. })
        ));
        assert_eq!(xc.coordinates().map(|(d, _)| d).collect::<Vec<_>>(), ["i2"]);
    }

    #[test]
    fn coordinate_length_is_checked() {
        let err = t().with_coordinate("i2", vec![1i64, 2]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
        let err = t().with_coordinate("k", vec![1i64, 2]).unwrap_err();
        assert_eq!(err, Error::UnknownDimension("k".into()));
    }

    #[test]
    fn attributes() {
        let xc = t()
            .with_attribute("long_name", "longitude")
            .with_attribute("units", "degrees_east");
        assert_eq!(
            xc.get_attribute("units").unwrap().as_str(),
            Some("degrees_east")
        );
        assert_eq!(
            xc.get_attribute("missing_value"),
            Err(Error::MissingAttribute("missing_value".into()))
        );
    }

    #[test]
    fn typed_values() {
        let t = t();
        assert_eq!(t.dtype(), DType::Int32);
        let view = t.values_as::<i32>().unwrap();
        assert_eq!(view[[1, 1]], 5);
        assert!(t.values_as::<f64>().is_none());
    }

    #[test]
    fn deep_copy_detaches_coordinates() {
        let t = t().with_coordinate("i1", vec![10i64, 20]).unwrap();
        let shallow = t.clone();
        let deep = t.deep_copy();
        let original = t.coordinate("i1").unwrap();
        assert!(Arc::ptr_eq(original, shallow.coordinate("i1").unwrap()));
        assert!(!Arc::ptr_eq(original, deep.coordinate("i1").unwrap()));
        assert_eq!(t, deep);
    }
}
