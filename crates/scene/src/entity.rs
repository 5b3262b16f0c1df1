/// Stable index of a region inside the `RegionRegistry`.
///
/// Ids are dense and assigned in registration order; they double as the
/// deterministic tie-breaker for picking.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct RegionId(pub u32);

impl RegionId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "region#{}", self.0)
    }
}
