//! Least Recently Used (LRU) Replacement Set.
//!
//! One set of one cache level. Blocks are indexed by tag, and a second ordered map
//! keyed by recency stamp gives the eviction order: the smallest stamp is the least
//! recently used block. Moving a block to a new stamp removes its old entry and
//! inserts a fresh one, so both maps always describe the same blocks.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `lookup()`: O(1)
//!   - `touch()`: O(log W) where W is the number of ways (associativity)
//!   - `evict_lru_if_full()`: O(log W)
//! - **Space Complexity:** O(W) per set that has been touched
//! - **Best Case:** Working sets that fit within the associativity
//! - **Worst Case:** Cyclic scans one block larger than the set (every access misses)

use std::collections::{BTreeMap, HashMap};

/// A cached block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Tag identifying the block within its set.
    pub tag: u64,
    /// Address of the access that installed the block; used for write-backs.
    pub original_addr: u64,
    /// Modified since it was filled.
    pub dirty: bool,
    /// Installed by the prefetcher and not yet touched by a demand access.
    pub prefetched: bool,
    recency: i64,
}

impl Block {
    /// Creates a block. Its recency stamp is assigned when it is inserted into a set.
    pub const fn new(tag: u64, original_addr: u64, dirty: bool, prefetched: bool) -> Self {
        Self {
            tag,
            original_addr,
            dirty,
            prefetched,
            recency: 0,
        }
    }

    /// Recency stamp; smaller means less recently used.
    pub const fn recency(&self) -> i64 {
        self.recency
    }
}

/// LRU replacement set.
#[derive(Clone, Debug)]
pub struct LruSet {
    blocks: HashMap<u64, Block>,
    /// Recency stamp to tag. The first entry is the LRU victim.
    order: BTreeMap<i64, u64>,
    capacity: usize,
}

impl LruSet {
    /// Creates an empty set holding at most `capacity` blocks.
    pub fn new(capacity: usize) -> Self {
        Self {
            blocks: HashMap::new(),
            order: BTreeMap::new(),
            capacity,
        }
    }

    /// Returns the block with `tag`, if present.
    pub fn lookup(&self, tag: u64) -> Option<&Block> {
        self.blocks.get(&tag)
    }

    /// Returns the block with `tag` for updating its flags.
    pub(super) fn lookup_mut(&mut self, tag: u64) -> Option<&mut Block> {
        self.blocks.get_mut(&tag)
    }

    /// Returns `true` if a block with `tag` is present.
    pub fn contains(&self, tag: u64) -> bool {
        self.blocks.contains_key(&tag)
    }

    /// Moves the block with `tag` to recency stamp `clock`.
    ///
    /// `clock` must not be in use by another block of this set. Returns `false`
    /// if the tag is not present.
    pub fn touch(&mut self, tag: u64, clock: i64) -> bool {
        let Some(block) = self.blocks.get_mut(&tag) else {
            return false;
        };
        let _ = self.order.remove(&block.recency);
        block.recency = clock;
        let _ = self.order.insert(clock, tag);
        true
    }

    /// Removes and returns the least recently used block when the set is full.
    ///
    /// Does nothing while there is still a free way.
    pub fn evict_lru_if_full(&mut self) -> Option<Block> {
        if !self.is_full() {
            return None;
        }
        let (_, tag) = self.order.pop_first()?;
        self.blocks.remove(&tag)
    }

    /// Inserts `block` with recency stamp `clock`, making it the most recently used.
    ///
    /// The caller must make room first (see [`LruSet::evict_lru_if_full`]) and must
    /// not insert a tag that is already present.
    pub fn insert(&mut self, mut block: Block, clock: i64) {
        debug_assert!(!self.is_full(), "insert into a full set");
        debug_assert!(!self.contains(block.tag), "duplicate tag {:#x}", block.tag);
        block.recency = clock;
        let _ = self.order.insert(clock, block.tag);
        let _ = self.blocks.insert(block.tag, block);
    }

    /// Inserts `block` below every block already present, making it the next victim.
    ///
    /// Existing blocks keep their stamps. An empty set stamps the block with
    /// `fallback`. The same preconditions as [`LruSet::insert`] apply.
    pub fn insert_least_recent(&mut self, block: Block, fallback: i64) {
        let stamp = self
            .order
            .first_key_value()
            .map_or(fallback, |(&oldest, _)| oldest - 1);
        self.insert(block, stamp);
    }

    /// Tag of the block that would be evicted next.
    pub fn lru_tag(&self) -> Option<u64> {
        self.order.first_key_value().map(|(_, &tag)| tag)
    }

    /// Tags ordered from least to most recently used.
    pub fn tags_by_recency(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.values().copied()
    }

    /// Iterates over the blocks in no particular order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Number of blocks currently held.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the set holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Maximum number of blocks (the associativity).
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` when every way is occupied.
    pub fn is_full(&self) -> bool {
        self.blocks.len() >= self.capacity
    }
}
