#![doc = include_str!("../README.md")]
//! ## Arrays
//!
//! - [`LabeledArray`]: one N-dimensional array with named dimensions,
//!   coordinate labels and attributes
//!   - [`get_value_at`](LabeledArray::get_value_at) for single elements
//!   - [`values_as`](LabeledArray::values_as) for a typed `ndarray` view
//!   - [`get_coordinate_label`](LabeledArray::get_coordinate_label) for labels
//!
//! ## Collections
//!
//! - [`LabeledArrayCollection`]: named arrays sharing a dimension space
//! - [`CollectionBuilder`]: validated construction, the target of a loader
//!
//! ## Inspection
//!
//! - [`LabeledArrayCollection::describe`] and [`LabeledArray::describe`]
//!   return a [`Summary`] / [`ArraySummary`], whose `Display` follows the
//!   xarray repr layout
//! - [`SummaryOptions`] controls how much is shown
//!
//! ## Sharing
//!
//! Coordinate labels are held in an [`Arc`](std::sync::Arc) shared by a
//! collection and every member array using that dimension.
//! [`get_variable`](LabeledArrayCollection::get_variable) borrows, [`Clone`]
//! shares labels, and `deep_copy` shares nothing.
//!
//! ## Limitations
//!
//! - Element types ([`Element`]) are fixed-size integers up to 64 bits,
//!   floating point numbers, and complex floating point numbers (if enabled
//!   with the crate feature).
//! - Reading and writing files is left to loaders built on
//!   [`CollectionBuilder`].
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]

mod array;
mod attrs;
mod collection;
mod coords;
mod element;
mod error;
pub mod summary;

pub use crate::{
    array::LabeledArray,
    attrs::{AttrValue, Attributes},
    collection::{CollectionBuilder, LabeledArrayCollection},
    coords::{CoordinateLabels, Label},
    element::{DType, Element, Scalar, Values},
    error::{Error, Result},
    summary::{ArraySummary, Summary, SummaryOptions},
};
