use crate::{
    array::LabeledArray,
    attrs::{AttrValue, Attributes},
    coords::CoordinateLabels,
    summary::{Summary, SummaryOptions},
    Error, Result,
};
use std::{fmt, sync::Arc};

/// A set of named [`LabeledArray`]s sharing one dimension-name space, with
/// collection-level coordinates and attributes.
///
/// This is the in-memory counterpart of a NetCDF file. It is assembled once
/// through [`CollectionBuilder`] and is read-only afterwards.
///
/// # Example
///
/// ```
/// use labeled_array::{LabeledArray, LabeledArrayCollection, Scalar};
/// use ndarray::array;
/// # use labeled_array::Error;
///
/// let ds = LabeledArrayCollection::builder()
///     .coordinate("i1", vec![1., 2.])
///     .variable(LabeledArray::new("T", ["i1", "i2"], array![[1, 2, 3], [4, 5, 6]])?)
///     .attribute("Conventions", "CF-1.6")
///     .build()?;
///
/// assert_eq!(ds.get_dimension_length("i2")?, 3);
/// assert_eq!(ds.get_variable("T")?.get_value_at(&[1, 2])?, Scalar::Int32(6));
/// assert_eq!(ds.get_attribute("Conventions")?.as_str(), Some("CF-1.6"));
/// # Ok::<_, Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArrayCollection {
    dimensions: Vec<(String, usize)>,
    coordinates: Vec<(String, Arc<CoordinateLabels>)>,
    variables: Vec<LabeledArray>,
    attributes: Attributes,
}

impl LabeledArrayCollection {
    /// Starts assembling a collection.
    pub fn builder() -> CollectionBuilder {
        CollectionBuilder::default()
    }

    /// The data variable named `name`.
    ///
    /// The result borrows from the collection; use
    /// [`LabeledArray::deep_copy`] for an independent array.
    pub fn get_variable(&self, name: &str) -> Result<&LabeledArray> {
        self.variables
            .iter()
            .find(|var| var.name() == name)
            .ok_or_else(|| Error::UnknownVariable(name.to_owned()))
    }

    /// Returns `true` if a data variable named `name` exists.
    pub fn contains_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|var| var.name() == name)
    }

    /// The data variable names in insertion order.
    pub fn list_variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(LabeledArray::name).collect()
    }

    /// The data variables in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = &LabeledArray> {
        self.variables.iter()
    }

    /// The number of data variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if the collection holds no data variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Dimension name and length pairs in order of first declaration.
    pub fn dimensions(&self) -> impl Iterator<Item = (&str, usize)> {
        self.dimensions.iter().map(|(name, len)| (name.as_str(), *len))
    }

    /// The length of `dimension`.
    pub fn get_dimension_length(&self, dimension: &str) -> Result<usize> {
        self.dimensions
            .iter()
            .find(|(name, _)| name == dimension)
            .map(|(_, len)| *len)
            .ok_or_else(|| Error::UnknownDimension(dimension.to_owned()))
    }

    /// Dimensions with coordinate labels, in order of first declaration.
    pub fn coordinates(&self) -> impl Iterator<Item = (&str, &Arc<CoordinateLabels>)> {
        self.coordinates
            .iter()
            .map(|(name, labels)| (name.as_str(), labels))
    }

    /// The coordinate labels of `dimension`, shared with every member array
    /// using that dimension.
    ///
    /// Fails with [`Error::NoCoordinateDefined`] if the dimension has no
    /// labels, or [`Error::UnknownDimension`] if it is not a dimension of the
    /// collection at all.
    pub fn get_coordinate_labels(&self, dimension: &str) -> Result<&Arc<CoordinateLabels>> {
        if let Some((_, labels)) = self.coordinates.iter().find(|(name, _)| name == dimension) {
            return Ok(labels);
        }
        self.get_dimension_length(dimension)?;
        Err(Error::NoCoordinateDefined(dimension.to_owned()))
    }

    /// The collection-level attribute map.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The collection-level attribute under `key`.
    pub fn get_attribute(&self, key: &str) -> Result<&AttrValue> {
        self.attributes
            .get(key)
            .ok_or_else(|| Error::MissingAttribute(key.to_owned()))
    }

    /// Copies the collection so that nothing is shared with the original.
    ///
    /// Coordinate labels are still shared between the copy and its own
    /// member arrays.
    pub fn deep_copy(&self) -> Self {
        log::trace!("deep copy of collection with {} variables", self.variables.len());
        let coordinates: Vec<_> = self
            .coordinates
            .iter()
            .map(|(name, labels)| (name.clone(), Arc::new(CoordinateLabels::clone(labels))))
            .collect();
        let variables = self
            .variables
            .iter()
            .map(|var| {
                let mut var = var.clone();
                for (name, labels) in &coordinates {
                    if let Some(axis) = var.axis_of(name) {
                        var.share_coordinate(axis, Arc::clone(labels));
                    }
                }
                var
            })
            .collect();
        Self {
            dimensions: self.dimensions.clone(),
            coordinates,
            variables,
            attributes: self.attributes.clone(),
        }
    }

    /// Summarizes the collection with default [`SummaryOptions`].
    pub fn describe(&self) -> Summary {
        self.describe_with(&SummaryOptions::default())
    }

    /// Summarizes the collection: dimensions, coordinates, data variables and
    /// attributes, in that order.
    pub fn describe_with(&self, options: &SummaryOptions) -> Summary {
        Summary::new(self, options)
    }
}

impl fmt::Display for LabeledArrayCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.describe().fmt(f)
    }
}

/// Assembles a [`LabeledArrayCollection`], validating it in
/// [`build`](Self::build).
///
/// This is the surface a file loader targets: declare dimensions, coordinate
/// labels, variables and attributes in any order, then build.
#[derive(Debug, Clone, Default)]
pub struct CollectionBuilder {
    dimensions: Vec<(String, usize)>,
    coordinates: Vec<(String, CoordinateLabels)>,
    variables: Vec<LabeledArray>,
    attributes: Attributes,
}

impl CollectionBuilder {
    /// Declares a dimension. Dimensions used by variables or coordinates are
    /// declared implicitly; this is needed only to fix the order or to add an
    /// unused dimension.
    pub fn dimension<N: Into<String>>(mut self, name: N, len: usize) -> Self {
        self.dimensions.push((name.into(), len));
        self
    }

    /// Declares coordinate labels for a dimension.
    pub fn coordinate<N, L>(mut self, dimension: N, labels: L) -> Self
    where
        N: Into<String>,
        L: Into<CoordinateLabels>,
    {
        self.coordinates.push((dimension.into(), labels.into()));
        self
    }

    /// Adds a data variable.
    pub fn variable(mut self, array: LabeledArray) -> Self {
        self.variables.push(array);
        self
    }

    /// Sets a collection-level attribute.
    pub fn attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        self.attributes.insert(key, value);
        self
    }

    /// Validates and builds the collection.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateName`] if two variables share a name.
    /// - [`Error::ShapeMismatch`] if a dimension is given two different
    ///   lengths, or coordinate labels do not match their dimension length.
    /// - [`Error::CoordinateConflict`] if different labels are declared for
    ///   one dimension.
    pub fn build(self) -> Result<LabeledArrayCollection> {
        let Self {
            dimensions: declared,
            coordinates: declared_coordinates,
            mut variables,
            attributes,
        } = self;

        let mut dimensions: Vec<(String, usize)> = Vec::new();
        for (name, len) in declared {
            declare_dimension(&mut dimensions, "collection", &name, len)?;
        }
        for (i, var) in variables.iter().enumerate() {
            if variables[..i].iter().any(|other| other.name() == var.name()) {
                return Err(Error::DuplicateName(var.name().to_owned()));
            }
            for (dim, len) in var.dims() {
                declare_dimension(&mut dimensions, var.name(), dim, len)?;
            }
        }

        let mut coordinates: Vec<(String, Arc<CoordinateLabels>)> = Vec::new();
        for (dim, labels) in declared_coordinates {
            declare_dimension(&mut dimensions, &dim, &dim, labels.len())?;
            merge_coordinate(&mut coordinates, dim, Arc::new(labels))?;
        }
        for var in &variables {
            for (dim, labels) in var.coordinates() {
                merge_coordinate(&mut coordinates, dim.to_owned(), Arc::clone(labels))?;
            }
        }

        for var in &mut variables {
            for (dim, labels) in &coordinates {
                if let Some(axis) = var.axis_of(dim) {
                    var.share_coordinate(axis, Arc::clone(labels));
                }
            }
        }

        log::debug!(
            "built collection with {} dimensions, {} coordinates and {} variables",
            dimensions.len(),
            coordinates.len(),
            variables.len()
        );
        Ok(LabeledArrayCollection {
            dimensions,
            coordinates,
            variables,
            attributes,
        })
    }
}

fn declare_dimension(
    dimensions: &mut Vec<(String, usize)>,
    owner: &str,
    name: &str,
    len: usize,
) -> Result<()> {
    match dimensions.iter().find(|(n, _)| n == name) {
        Some(&(_, existing)) if existing != len => Err(Error::shape_mismatch(
            owner,
            format!("dimension `{name}` has length {len}, expected {existing}"),
        )),
        Some(_) => Ok(()),
        None => {
            dimensions.push((name.to_owned(), len));
            Ok(())
        }
    }
}

fn merge_coordinate(
    coordinates: &mut Vec<(String, Arc<CoordinateLabels>)>,
    dimension: String,
    labels: Arc<CoordinateLabels>,
) -> Result<()> {
    match coordinates.iter().find(|(name, _)| *name == dimension) {
        Some((_, existing)) if !existing.same_as(&labels) => {
            Err(Error::CoordinateConflict(dimension))
        }
        Some(_) => Ok(()),
        None => {
            log::debug!("promoting coordinate `{dimension}` to the collection");
            coordinates.push((dimension, labels));
            Ok(())
        }
    }
}
