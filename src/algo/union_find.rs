use std::collections::HashMap;
use std::hash::Hash;

/// Disjoint-set forest with path compression and union by rank.
///
/// Elements are registered lazily: an unseen key is its own root with rank 0.
#[derive(Clone, Debug, Default)]
pub struct UnionFind<K> {
	parent: HashMap<K, K>,
	rank: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> UnionFind<K> {
	pub fn new() -> Self {
		Self {
			parent: HashMap::new(),
			rank: HashMap::new(),
		}
	}

	/// Representative of the set containing `x`.
	pub fn find(&mut self, x: &K) -> K {
		let mut root = x.clone();
		while let Some(p) = self.parent.get(&root) {
			if *p == root {
				break;
			}
			root = p.clone();
		}

		// compress
		let mut current = x.clone();
		while current != root {
			let next = match self.parent.insert(current, root.clone()) {
				Some(next) => next,
				None => break,
			};
			current = next;
		}
		root
	}

	/// Merges the sets of `a` and `b`. Returns `false` if they already shared one.
	///
	/// On equal ranks the root of `a` becomes the parent.
	pub fn union(&mut self, a: &K, b: &K) -> bool {
		let (ra, rb) = (self.find(a), self.find(b));
		if ra == rb {
			return false;
		}
		let (rank_a, rank_b) = (self.rank_of(&ra), self.rank_of(&rb));
		if rank_a < rank_b {
			self.parent.insert(ra, rb);
		} else {
			if rank_a == rank_b {
				self.rank.insert(ra.clone(), rank_a + 1);
			}
			self.parent.insert(rb, ra);
		}
		true
	}

	pub fn connected(&mut self, a: &K, b: &K) -> bool {
		self.find(a) == self.find(b)
	}

	fn rank_of(&self, x: &K) -> usize {
		self.rank.get(x).copied().unwrap_or(0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_lazy_singletons() {
		let mut uf: UnionFind<&str> = UnionFind::new();
		assert_eq!(uf.find(&"a"), "a");
		assert!(!uf.connected(&"a", &"b"));
	}

	#[test]
	fn test_union_merges_once() {
		let mut uf = UnionFind::new();
		assert!(uf.union(&1, &2));
		assert!(uf.union(&3, &4));
		assert!(!uf.union(&2, &1));
		assert!(uf.union(&2, &4));
		assert!(uf.connected(&1, &3));
		assert!(!uf.connected(&1, &5));
	}

	#[test]
	fn test_union_by_rank_keeps_taller_root() {
		let mut uf = UnionFind::new();
		uf.union(&"a", &"b");
		// rank(a) = 1 beats rank(c) = 0 even though c is passed first
		uf.union(&"c", &"a");
		assert_eq!(uf.find(&"c"), "a");
		assert_eq!(uf.find(&"b"), "a");
	}

	#[test]
	fn test_path_compression() {
		let mut uf = UnionFind::new();
		uf.union(&0, &1);
		uf.union(&2, &3);
		uf.union(&0, &2);
		// 3 -> 2 -> 0 before compression
		assert_eq!(uf.find(&3), 0);
		assert_eq!(uf.parent.get(&3), Some(&0));
	}
}
