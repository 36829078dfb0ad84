//! Region identifiers and the set of regions awaiting retriangulation.

use std::collections::BTreeSet;

/// Identifies a region (chunk): a batch of cells triangulated into one buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

/// Regions whose geometry is stale.
///
/// Mutations mark regions here; an external scheduler decides when to drain
/// the set and rebuild. Marking the same region repeatedly between drains
/// costs nothing extra, so a whole brush stroke collapses into one rebuild per
/// region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyRegions {
    regions: BTreeSet<RegionId>,
}

impl DirtyRegions {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a region stale. Returns `true` if it was not already marked.
    pub fn mark(&mut self, region: RegionId) -> bool {
        self.regions.insert(region)
    }

    /// Returns `true` if the region is awaiting a rebuild.
    pub fn is_dirty(&self, region: RegionId) -> bool {
        self.regions.contains(&region)
    }

    /// Number of stale regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if nothing needs rebuilding.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterates the stale regions in ascending order without clearing them.
    pub fn iter(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions.iter().copied()
    }

    /// Removes and returns every stale region in ascending order.
    pub fn take(&mut self) -> Vec<RegionId> {
        std::mem::take(&mut self.regions).into_iter().collect()
    }

    /// Forgets all marks.
    pub fn clear(&mut self) {
        self.regions.clear();
    }
}
