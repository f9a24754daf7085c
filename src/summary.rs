//! Structured, deterministic summaries for inspecting arrays and collections.
//!
//! The [`Display`](fmt::Display) renderings follow the layout of an xarray
//! repr:
//!
//! ```text
//! <Dataset>
//! Dimensions:  (i1: 2, i2: 3)
//! Coordinates:
//!   * i1       (i1) float64 1.0 2.0
//! Data variables:
//!     T        (i1, i2) int32 1 2 3 4 5 6
//! Attributes:
//!     Conventions:  CF-1.6
//! ```

use crate::{array::LabeledArray, collection::LabeledArrayCollection, coords::CoordinateLabels};
use std::fmt;

/// How much of each item a summary shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Coordinate labels shown per dimension.
    pub max_label_items: usize,
    /// Array elements shown per variable.
    pub max_value_items: usize,
    /// Characters shown per attribute value before it is cut with `...`.
    pub max_attr_width: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_label_items: 12,
            max_value_items: 6,
            max_attr_width: 60,
        }
    }
}

/// One dimension coordinate in a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CoordinateSummary {
    /// The dimension the labels belong to.
    pub dimension: String,
    /// The label type name.
    pub dtype: &'static str,
    /// The number of labels.
    pub len: usize,
    /// The leading labels, formatted.
    pub preview: Vec<String>,
}

/// One data variable in a collection summary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VariableSummary {
    /// The variable name.
    pub name: String,
    /// The dimension tuple.
    pub dimensions: Vec<String>,
    /// The element type name.
    pub dtype: &'static str,
    /// The number of elements.
    pub len: usize,
    /// The leading elements, formatted.
    pub preview: Vec<String>,
}

/// The result of [`LabeledArrayCollection::describe`].
///
/// Sections appear in a fixed order (dimensions, coordinates, data
/// variables, attributes), each in declaration order, so that describing the
/// same collection twice yields identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    /// Dimension name and length pairs.
    pub dimensions: Vec<(String, usize)>,
    /// Dimension coordinates.
    pub coordinates: Vec<CoordinateSummary>,
    /// Data variables.
    pub variables: Vec<VariableSummary>,
    /// Attribute keys and formatted values.
    pub attributes: Vec<(String, String)>,
}

/// The result of [`LabeledArray::describe`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArraySummary {
    /// The variable name.
    pub name: String,
    /// Dimension name and length pairs in axis order.
    pub dimensions: Vec<(String, usize)>,
    /// The element type name.
    pub dtype: &'static str,
    /// The number of elements.
    pub len: usize,
    /// The leading elements, formatted.
    pub preview: Vec<String>,
    /// Dimension coordinates in axis order.
    pub coordinates: Vec<CoordinateSummary>,
    /// Attribute keys and formatted values.
    pub attributes: Vec<(String, String)>,
}

impl CoordinateSummary {
    fn new(dimension: &str, labels: &CoordinateLabels, options: &SummaryOptions) -> Self {
        Self {
            dimension: dimension.to_owned(),
            dtype: labels.dtype_name(),
            len: labels.len(),
            preview: labels
                .iter()
                .take(options.max_label_items)
                .map(|label| label.to_string())
                .collect(),
        }
    }
}

impl VariableSummary {
    fn new(var: &LabeledArray, options: &SummaryOptions) -> Self {
        Self {
            name: var.name().to_owned(),
            dimensions: var.dimension_names().to_vec(),
            dtype: var.dtype().name(),
            len: var.len(),
            preview: preview_values(var, options),
        }
    }
}

impl Summary {
    pub(crate) fn new(ds: &LabeledArrayCollection, options: &SummaryOptions) -> Self {
        Self {
            dimensions: ds
                .dimensions()
                .map(|(name, len)| (name.to_owned(), len))
                .collect(),
            coordinates: ds
                .coordinates()
                .map(|(dim, labels)| CoordinateSummary::new(dim, labels, options))
                .collect(),
            variables: ds
                .variables()
                .map(|var| VariableSummary::new(var, options))
                .collect(),
            attributes: summarize_attributes(ds.attributes().iter(), options),
        }
    }

    /// The coordinate dimension names, in order.
    pub fn coordinate_names(&self) -> Vec<&str> {
        self.coordinates
            .iter()
            .map(|coord| coord.dimension.as_str())
            .collect()
    }
}

impl ArraySummary {
    pub(crate) fn new(var: &LabeledArray, options: &SummaryOptions) -> Self {
        Self {
            name: var.name().to_owned(),
            dimensions: var.dims().map(|(name, len)| (name.to_owned(), len)).collect(),
            dtype: var.dtype().name(),
            len: var.len(),
            preview: preview_values(var, options),
            coordinates: var
                .coordinates()
                .map(|(dim, labels)| CoordinateSummary::new(dim, labels, options))
                .collect(),
            attributes: summarize_attributes(var.attributes().iter(), options),
        }
    }
}

fn preview_values(var: &LabeledArray, options: &SummaryOptions) -> Vec<String> {
    var.values()
        .head(options.max_value_items)
        .iter()
        .map(|v| v.to_string())
        .collect()
}

fn summarize_attributes<'a, I, V>(attrs: I, options: &SummaryOptions) -> Vec<(String, String)>
where
    I: Iterator<Item = (&'a str, &'a V)>,
    V: fmt::Display + 'a,
{
    attrs
        .map(|(key, value)| {
            let value = value.to_string().replace('\n', " ");
            (key.to_owned(), truncate(value, options.max_attr_width))
        })
        .collect()
}

fn truncate(value: String, width: usize) -> String {
    if value.chars().count() <= width {
        return value;
    }
    let mut cut: String = value.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

/// Leading items, followed by `...` if there are more.
fn preview_line(preview: &[String], len: usize) -> String {
    let mut line = preview.join(" ");
    if len > preview.len() {
        line.push_str(" ...");
    }
    line
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|name| name.chars().count()).max().unwrap_or(0).max(7) + 2
}

fn write_dims(f: &mut fmt::Formatter, dims: &[(String, usize)]) -> fmt::Result {
    let items: Vec<_> = dims.iter().map(|(name, len)| format!("{name}: {len}")).collect();
    write!(f, "({})", items.join(", "))
}

fn write_coordinates(
    f: &mut fmt::Formatter,
    coordinates: &[CoordinateSummary],
    width: usize,
) -> fmt::Result {
    for coord in coordinates {
        writeln!(
            f,
            "  * {:<width$}({}) {} {}",
            coord.dimension,
            coord.dimension,
            coord.dtype,
            preview_line(&coord.preview, coord.len)
        )?;
    }
    Ok(())
}

fn write_attributes(f: &mut fmt::Formatter, attributes: &[(String, String)]) -> fmt::Result {
    if attributes.is_empty() {
        return Ok(());
    }
    let width = attributes
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0)
        + 3;
    writeln!(f, "Attributes:")?;
    for (key, value) in attributes {
        writeln!(f, "    {:<width$}{value}", format!("{key}:"))?;
    }
    Ok(())
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = name_width(
            self.coordinates
                .iter()
                .map(|coord| coord.dimension.as_str())
                .chain(self.variables.iter().map(|var| var.name.as_str())),
        );
        writeln!(f, "<Dataset>")?;
        write!(f, "Dimensions:  ")?;
        write_dims(f, &self.dimensions)?;
        writeln!(f)?;
        writeln!(f, "Coordinates:")?;
        if self.coordinates.is_empty() {
            writeln!(f, "    *empty*")?;
        }
        write_coordinates(f, &self.coordinates, width)?;
        writeln!(f, "Data variables:")?;
        if self.variables.is_empty() {
            writeln!(f, "    *empty*")?;
        }
        for var in &self.variables {
            writeln!(
                f,
                "    {:<width$}({}) {} {}",
                var.name,
                var.dimensions.join(", "),
                var.dtype,
                preview_line(&var.preview, var.len)
            )?;
        }
        write_attributes(f, &self.attributes)
    }
}

impl fmt::Display for ArraySummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<DataArray '{}' ", self.name)?;
        write_dims(f, &self.dimensions)?;
        writeln!(f, ">")?;
        writeln!(f, "{} {}", self.dtype, preview_line(&self.preview, self.len))?;
        if !self.coordinates.is_empty() {
            let width = name_width(self.coordinates.iter().map(|c| c.dimension.as_str()));
            writeln!(f, "Coordinates:")?;
            write_coordinates(f, &self.coordinates, width)?;
        }
        write_attributes(f, &self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn grid() -> LabeledArrayCollection {
        LabeledArrayCollection::builder()
            .coordinate("i1", vec![1., 2.])
            .variable(LabeledArray::new("T", ["i1", "i2"], array![[1, 2, 3], [4, 5, 6]]).unwrap())
            .variable(LabeledArray::new("RC", ["i1"], array![-5., -15.]).unwrap())
            .attribute("Conventions", "CF-1.6")
            .build()
            .unwrap()
    }

    #[test]
    fn collection_sections_in_order() {
        let summary = grid().describe();
        assert_eq!(
            summary.dimensions,
            vec![("i1".to_owned(), 2), ("i2".to_owned(), 3)]
        );
        assert_eq!(summary.coordinate_names(), ["i1"]);
        assert_eq!(summary.variables[0].dimensions, ["i1", "i2"]);
        assert_eq!(summary.variables[0].dtype, "int32");
        assert_eq!(summary.variables[1].dtype, "float64");
        assert_eq!(
            summary.attributes,
            vec![("Conventions".to_owned(), "CF-1.6".to_owned())]
        );
    }

    #[test]
    fn collection_repr() {
        let expected = "\
<Dataset>
Dimensions:  (i1: 2, i2: 3)
Coordinates:
  * i1       (i1) float64 1.0 2.0
Data variables:
    T        (i1, i2) int32 1 2 3 4 5 6
    RC       (i1) float64 -5.0 -15.0
Attributes:
    Conventions:  CF-1.6
";
        pretty_assertions::assert_eq!(grid().to_string(), expected);
    }

    #[test]
    fn array_repr() {
        let xc = LabeledArray::new("XC", ["i2", "i3"], array![[-37.5, -36.5], [-37.5, -36.5]])
            .unwrap()
            .with_coordinate("i2", vec![1., 2.])
            .unwrap()
            .with_attribute("long_name", "longitude")
            .with_attribute("units", "degrees_east");
        let expected = "\
<DataArray 'XC' (i2: 2, i3: 2)>
float64 -37.5 -36.5 -37.5 -36.5
Coordinates:
  * i2       (i2) float64 1.0 2.0
Attributes:
    long_name:  longitude
    units:      degrees_east
";
        pretty_assertions::assert_eq!(xc.to_string(), expected);
    }

    #[test]
    fn previews_are_cut() {
        let options = SummaryOptions {
            max_label_items: 2,
            max_value_items: 3,
            max_attr_width: 10,
        };
        let ds = LabeledArrayCollection::builder()
            .coordinate("i1", vec![1i64, 2, 3, 4])
            .variable(LabeledArray::new("RF", ["i1"], array![0u8, 1, 2, 3]).unwrap())
            .attribute("description", "C-grid parameters (see MITgcm documentation)")
            .build()
            .unwrap();
        let summary = ds.describe_with(&options);
        assert_eq!(summary.coordinates[0].preview, ["1", "2"]);
        assert_eq!(summary.variables[0].preview, ["0", "1", "2"]);
        assert_eq!(summary.attributes[0].1, "C-grid ...");
        let text = summary.to_string();
        assert!(text.contains("  * i1       (i1) int64 1 2 ...\n"));
        assert!(text.contains("    RF       (i1) uint8 0 1 2 ...\n"));
    }

    #[test]
    fn empty_collection_repr() {
        let ds = LabeledArrayCollection::builder().build().unwrap();
        let expected = "\
<Dataset>
Dimensions:  ()
Coordinates:
    *empty*
Data variables:
    *empty*
";
        pretty_assertions::assert_eq!(ds.to_string(), expected);
    }

    #[test]
    fn describe_is_deterministic() {
        let ds = grid();
        assert_eq!(ds.describe(), ds.describe());
        assert_eq!(ds.to_string(), ds.to_string());
    }
}
