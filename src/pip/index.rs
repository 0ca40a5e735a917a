//! Spatial index for fast district lookups.

use geo::{Contains, Point};
use rstar::{RTree, RTreeObject, AABB};
use std::sync::Arc;
use tracing::info;

use crate::models::District;

/// Wrapper for R-tree indexing of districts
#[derive(Clone)]
pub struct IndexedDistrict {
    pub district: Arc<District>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedDistrict {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedDistrict {
    pub fn new(district: District) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = district.bbox()?;
        Some(Self {
            district: Arc::new(district),
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// Spatial index over district polygons using an R-tree
pub struct DistrictIndex {
    tree: RTree<IndexedDistrict>,
}

impl DistrictIndex {
    /// Build the spatial index from loaded districts
    pub fn build(districts: Vec<District>) -> Self {
        info!("Building spatial index for {} districts...", districts.len());

        let indexed: Vec<IndexedDistrict> = districts
            .into_iter()
            .filter_map(IndexedDistrict::new)
            .collect();

        let tree = RTree::bulk_load(indexed);

        info!("Spatial index built with {} entries", tree.size());

        Self { tree }
    }

    /// Find all districts whose polygon contains a point
    pub fn lookup(&self, lon: f64, lat: f64) -> Vec<Arc<District>> {
        let point = Point::new(lon, lat);
        let query_envelope = AABB::from_point([lon, lat]);

        // Use R-tree to get candidates via envelope intersection, then filter with exact containment
        self.tree
            .locate_in_envelope_intersecting(&query_envelope)
            .filter(|id| id.district.geometry.contains(&point))
            .map(|id| Arc::clone(&id.district))
            .collect()
    }

    /// Get total number of indexed districts
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
