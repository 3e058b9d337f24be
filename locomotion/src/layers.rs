//! Collision layers used to filter probes and tag colliders.

use crate::bitmask_flags::{BitmaskFlags, FlagBitmask};
use crate::define_bitmask_flags;

define_bitmask_flags!(CollisionLayer, u32, {
    Ground,
    Character,
    Prop,
    Water,
});

/// Set of [`CollisionLayer`]s. Bit `i` maps to Rapier collision group `i`.
pub type LayerMask = BitmaskFlags<u32>;

impl CollisionLayer {
    #[inline]
    pub fn as_mask(self) -> LayerMask {
        LayerMask::new(self.mask())
    }
}

impl From<CollisionLayer> for LayerMask {
    fn from(layer: CollisionLayer) -> Self {
        layer.as_mask()
    }
}

/// Layers the ground probe accepts unless configured otherwise.
pub fn default_ground_layers() -> LayerMask {
    CollisionLayer::Ground.as_mask()
}
