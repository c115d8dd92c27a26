use crate::network::Coordinate;

/// Flat semantic record handed over by the geospatial file reader: a display
/// name, a semi-structured description block of `Key: Value` lines, and the
/// placemark geometry reduced to an ordered coordinate list (one point for
/// markers, two or more for cable runs, empty when the placemark had no
/// usable geometry).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawPlacemark {
    pub name: String,
    pub description: String,
    pub coordinates: Vec<Coordinate>,
}

impl RawPlacemark {
    /// Point-geometry record (poles, distribution points).
    pub fn point(name: impl Into<String>, description: impl Into<String>, at: Coordinate) -> Self {
        Self { name: name.into(), description: description.into(), coordinates: vec![at] }
    }

    /// Path-geometry record (cable runs).
    pub fn path(
        name: impl Into<String>,
        description: impl Into<String>,
        route: Vec<Coordinate>,
    ) -> Self {
        Self { name: name.into(), description: description.into(), coordinates: route }
    }
}
