//! The series container.

use std::collections::{BTreeMap, btree_map};
use std::fmt;

use chrono::NaiveDateTime;

use crate::error::SeriesError;
use crate::interpretation::Interpretation;
use crate::timestamp::IntoTimestamp;

/// An irregular time series with station metadata.
///
/// Metadata is plain public data. Nodes are private so that insertion can
/// enforce key uniqueness: [`add_node`](Self::add_node) rejects an existing
/// timestamp, [`set`](Self::set) replaces it.
#[derive(Debug, Clone)]
pub struct Series {
    /// Display name.
    pub title: String,
    /// Station identifier.
    pub station_id: String,
    /// Station name.
    pub station_name: String,
    /// Parameter the values represent (e.g. `Q`, `P`).
    pub param: String,
    /// Unit of the values.
    pub unit: String,
    /// Location name.
    pub location: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Altitude.
    pub z: f64,
    /// How values are distributed within their timestep.
    pub interpretation: Interpretation,
    nodes: BTreeMap<NaiveDateTime, f64>,
}

impl Default for Series {
    fn default() -> Self {
        Self::new("")
    }
}

impl Series {
    /// Creates an empty series with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            station_id: "0".to_string(),
            station_name: String::new(),
            param: String::new(),
            unit: String::new(),
            location: String::new(),
            lat: 0.0,
            lon: 0.0,
            z: 0.0,
            interpretation: Interpretation::Undefined,
            nodes: BTreeMap::new(),
        }
    }

    /// Inserts a new node.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DuplicateTimestamp`] if the timestamp is already
    /// present. Use [`set`](Self::set) to update an existing node.
    pub fn add_node(&mut self, timestamp: impl IntoTimestamp, value: f64) -> Result<(), SeriesError> {
        let timestamp = timestamp.into_timestamp();
        if self.nodes.contains_key(&timestamp) {
            return Err(SeriesError::DuplicateTimestamp { timestamp });
        }
        self.nodes.insert(timestamp, value);
        Ok(())
    }

    /// Inserts or replaces a node, returning the previous value if any.
    pub fn set(&mut self, timestamp: impl IntoTimestamp, value: f64) -> Option<f64> {
        self.nodes.insert(timestamp.into_timestamp(), value)
    }

    /// Value at `timestamp`, if present.
    pub fn get(&self, timestamp: &NaiveDateTime) -> Option<f64> {
        self.nodes.get(timestamp).copied()
    }

    /// Returns `true` if a node exists at `timestamp`.
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        self.nodes.contains_key(timestamp)
    }

    /// Removes the node at `timestamp`, returning its value.
    pub fn remove(&mut self, timestamp: &NaiveDateTime) -> Option<f64> {
        self.nodes.remove(timestamp)
    }

    /// Keeps only the nodes for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&NaiveDateTime, f64) -> bool) {
        self.nodes.retain(|ts, value| keep(ts, *value));
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the series has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates `(timestamp, value)` pairs in timestamp order.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            inner: self.nodes.iter(),
        }
    }

    /// Timestamps in ascending order.
    pub fn dates(&self) -> Vec<NaiveDateTime> {
        self.nodes.keys().copied().collect()
    }

    /// Values ordered by timestamp, aligned with [`dates`](Self::dates).
    pub fn values(&self) -> Vec<f64> {
        self.nodes.values().copied().collect()
    }

    /// Earliest timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Empty`] if the series has no nodes.
    pub fn start(&self) -> Result<NaiveDateTime, SeriesError> {
        self.nodes
            .keys()
            .next()
            .copied()
            .ok_or_else(|| self.empty_error())
    }

    /// Latest timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Empty`] if the series has no nodes.
    pub fn end(&self) -> Result<NaiveDateTime, SeriesError> {
        self.nodes
            .keys()
            .next_back()
            .copied()
            .ok_or_else(|| self.empty_error())
    }

    /// Cuts the series to `start <= t <= end` with a linear scan.
    pub fn cut(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.nodes.retain(|ts, _| start <= *ts && *ts <= end);
    }

    /// Cuts the series to `start <= t <= end` by searching the bounds.
    ///
    /// Produces the same nodes as [`cut`](Self::cut).
    pub fn cut_bisect(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        if start > end {
            self.nodes.clear();
            return;
        }
        self.nodes = self
            .nodes
            .range(start..=end)
            .map(|(ts, value)| (*ts, *value))
            .collect();
    }

    /// Returns a full copy of metadata and nodes.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Copies all metadata (not the nodes) from `other`.
    pub fn copy_metadata(&mut self, other: &Series) {
        self.title.clone_from(&other.title);
        self.station_id.clone_from(&other.station_id);
        self.station_name.clone_from(&other.station_name);
        self.param.clone_from(&other.param);
        self.unit.clone_from(&other.unit);
        self.location.clone_from(&other.location);
        self.lat = other.lat;
        self.lon = other.lon;
        self.z = other.z;
        self.interpretation = other.interpretation;
    }

    fn empty_error(&self) -> SeriesError {
        SeriesError::Empty {
            title: self.title.clone(),
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timeseries {} [{}], ", self.title, self.unit)?;
        match (self.start(), self.end()) {
            (Ok(start), Ok(end)) => write!(
                f,
                "{} - {}",
                start.format("%d.%m.%Y %H:%M"),
                end.format("%d.%m.%Y %H:%M")
            )?,
            _ => f.write_str("empty")?,
        }
        write!(f, " (length: {})", self.len())
    }
}

/// Iterator over the nodes of a [`Series`] in timestamp order.
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    inner: btree_map::Iter<'a, NaiveDateTime, f64>,
}

impl Iterator for Nodes<'_> {
    type Item = (NaiveDateTime, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(ts, value)| (*ts, *value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Nodes<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(ts, value)| (*ts, *value))
    }
}

impl ExactSizeIterator for Nodes<'_> {}

impl<'a> IntoIterator for &'a Series {
    type Item = (NaiveDateTime, f64);
    type IntoIter = Nodes<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
