use crate::element::format_float;
use std::fmt;

/// A single coordinate label.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    #[allow(missing_docs)]
    Int(i64),
    #[allow(missing_docs)]
    Float(f64),
    #[allow(missing_docs)]
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Label {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// The ordered labels of every position along one dimension, e.g. depth
/// levels or grid indices.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateLabels {
    #[allow(missing_docs)]
    Int(Vec<i64>),
    #[allow(missing_docs)]
    Float(Vec<f64>),
    #[allow(missing_docs)]
    Text(Vec<String>),
}

impl CoordinateLabels {
    /// The number of labels.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(labels) => labels.len(),
            Self::Float(labels) => labels.len(),
            Self::Text(labels) => labels.len(),
        }
    }

    /// Returns `true` if there are no labels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The NumPy name of the label type.
    pub fn dtype_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int64",
            Self::Float(_) => "float64",
            Self::Text(_) => "object",
        }
    }

    /// The label at `position`.
    pub fn get(&self, position: usize) -> Option<Label> {
        match self {
            Self::Int(labels) => labels.get(position).copied().map(Label::Int),
            Self::Float(labels) => labels.get(position).copied().map(Label::Float),
            Self::Text(labels) => labels.get(position).cloned().map(Label::Text),
        }
    }

    /// The first position carrying `label`.
    ///
    /// A float label `nan` matches a `nan` label; labels of a different kind
    /// never match.
    pub fn position_of(&self, label: &Label) -> Option<usize> {
        match (self, label) {
            (Self::Int(labels), Label::Int(v)) => labels.iter().position(|l| l == v),
            (Self::Float(labels), Label::Float(v)) => {
                labels.iter().position(|l| same_float(*l, *v))
            }
            (Self::Text(labels), Label::Text(v)) => labels.iter().position(|l| l == v),
            _ => None,
        }
    }

    /// Iterates over the labels in order.
    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        (0..self.len()).filter_map(|position| self.get(position))
    }

    /// Like `==`, but `nan` labels compare equal to each other.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_float(*x, *y))
            }
            _ => self == other,
        }
    }
}

fn same_float(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl From<Vec<i64>> for CoordinateLabels {
    fn from(labels: Vec<i64>) -> Self {
        Self::Int(labels)
    }
}

impl From<Vec<f64>> for CoordinateLabels {
    fn from(labels: Vec<f64>) -> Self {
        Self::Float(labels)
    }
}

impl From<Vec<String>> for CoordinateLabels {
    fn from(labels: Vec<String>) -> Self {
        Self::Text(labels)
    }
}

impl From<Vec<&str>> for CoordinateLabels {
    fn from(labels: Vec<&str>) -> Self {
        Self::Text(labels.into_iter().map(str::to_owned).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_and_label_lookup() {
        let labels = CoordinateLabels::from(vec![1., 2., 3.]);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(1), Some(Label::Float(2.)));
        assert_eq!(labels.get(3), None);
        assert_eq!(labels.position_of(&Label::Float(3.)), Some(2));
        assert_eq!(labels.position_of(&Label::Int(3)), None);
    }

    #[test]
    fn text_labels() {
        let labels = CoordinateLabels::from(vec!["surface", "bottom"]);
        assert_eq!(labels.dtype_name(), "object");
        assert_eq!(labels.position_of(&Label::from("bottom")), Some(1));
        assert_eq!(labels.get(0).unwrap().to_string(), "\"surface\"");
    }

    #[test]
    fn nan_labels_are_the_same() {
        let a = CoordinateLabels::from(vec![1., f64::NAN]);
        let b = CoordinateLabels::from(vec![1., f64::NAN]);
        assert_ne!(a, b);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&CoordinateLabels::from(vec![1., 2.])));
        assert_eq!(a.position_of(&Label::Float(f64::NAN)), Some(1));
    }
}
