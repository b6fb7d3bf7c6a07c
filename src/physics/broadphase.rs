//! Broadphase pair enumeration.

use super::rigid_body::RigidBodyType;

/// All-pairs broadphase.
///
/// Every unordered pair is emitted once, as `(i, j)` with `i < j`, in
/// row-major order. Pairs of two static bodies are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllPairs;

impl AllPairs {
    pub fn new() -> Self {
        Self
    }

    /// Candidate pairs as indices into `body_types`.
    pub fn find_pairs(&self, body_types: &[RigidBodyType]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();

        for i in 0..body_types.len() {
            for j in (i + 1)..body_types.len() {
                if body_types[i] == RigidBodyType::Static && body_types[j] == RigidBodyType::Static
                {
                    continue;
                }
                pairs.push((i, j));
            }
        }

        pairs
    }
}
