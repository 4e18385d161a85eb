mod bvh;

pub use bvh::{Bvh, BvhNode, NodeKind};
