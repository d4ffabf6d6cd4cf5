/// Union find over node indices with path halving and union by size.
#[derive(Debug, Clone)]
pub(crate) struct DisjointSet {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl DisjointSet {
    pub fn new(count: usize) -> Self {
        Self {
            parent: (0..count as u32).collect(),
            size: vec![1; count],
        }
    }

    pub fn find(&mut self, mut node: u32) -> u32 {
        while self.parent[node as usize] != node {
            let grand_parent = self.parent[self.parent[node as usize] as usize];
            self.parent[node as usize] = grand_parent;
            node = grand_parent;
        }
        node
    }

    /// Joins the sets of `a` and `b`. False if they already were one.
    pub fn union(&mut self, a: u32, b: u32) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a as usize] < self.size[b as usize] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b as usize] = a;
        self.size[a as usize] += self.size[b as usize];
        true
    }
}

#[test]
fn union_joins_sets() {
    let mut set = DisjointSet::new(4);
    assert!(set.union(0, 1));
    assert!(set.union(2, 3));
    assert!(!set.union(1, 0));
    assert_ne!(set.find(0), set.find(2));
    assert!(set.union(1, 3));
    assert_eq!(set.find(0), set.find(2));
}
