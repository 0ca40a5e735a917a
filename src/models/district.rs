//! District polygons loaded from the boundary shapefile.

use geo::MultiPolygon;

/// A school-district attendance area with its grade bounds.
#[derive(Debug, Clone)]
pub struct District {
    pub name: String,
    pub geometry: MultiPolygon<f64>,

    /// Lowest grade the district serves
    pub lo_grade: i32,

    /// Highest grade the district serves
    pub hi_grade: i32,
}

impl District {
    /// Get the bounding box of this district's geometry
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        use geo::BoundingRect;
        self.geometry
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}
