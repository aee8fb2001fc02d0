//! Cache lines, sets, and the single-pass lookup.
//!
//! A lookup walks the set once, from way 0 upward, and produces everything the
//! access path needs: the hit way if there is one, otherwise the first free way,
//! otherwise the way holding the smallest recency stamp.
//!
//! # Victim selection
//!
//! The minimum is tracked with a strict `<`, so among equal stamps the lowest way
//! wins. Victim selection never looks at the eviction policy; LRU and FIFO differ
//! only in whether hits rewrite the stamp (see
//! [`EvictionPolicy::refreshes_on_hit`](crate::config::EvictionPolicy::refreshes_on_hit)).

/// One cache line: validity, dirty bit, tag, and recency stamp.
///
/// Lines start invalid with stamp 0. They are overwritten on eviction,
/// never removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Whether the block was modified since it was fetched.
    pub dirty: bool,
    /// Tag of the resident block.
    pub tag: u64,
    /// Access-counter value at install, or at the last hit under LRU.
    pub recency: u64,
}

impl CacheLine {
    /// Returns `true` if this line holds the block with `tag`.
    #[inline(always)]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}

/// Result of looking a tag up in one set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The tag is resident in this way.
    Hit(usize),
    /// Miss; this way is free and should receive the block.
    Fill(usize),
    /// Miss with the set full; this way holds the victim.
    Evict(usize),
}

impl Lookup {
    /// The way this lookup points at: the hit line or the insertion target.
    #[inline]
    pub const fn way(self) -> usize {
        match self {
            Self::Hit(way) | Self::Fill(way) | Self::Evict(way) => way,
        }
    }

    /// Returns `true` for [`Lookup::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// A fixed-size group of lines sharing one set index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid lines.
    pub fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
        }
    }

    /// The lines of this set in way order.
    #[inline]
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Returns the line in `way`, if `way` is in range.
    #[inline]
    pub fn line(&self, way: usize) -> Option<&CacheLine> {
        self.lines.get(way)
    }

    /// Number of valid lines.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    /// Looks up `tag` and pre-computes the insertion target in the same pass.
    ///
    /// # Arguments
    ///
    /// * `tag` - Tag of the block being accessed.
    ///
    /// # Returns
    ///
    /// [`Lookup::Hit`] at the first matching way, else [`Lookup::Fill`] at the
    /// first invalid way, else [`Lookup::Evict`] at the minimum-recency way.
    pub fn lookup(&self, tag: u64) -> Lookup {
        let mut first_free = None;
        let mut victim = 0;
        let mut oldest = u64::MAX;

        for (way, line) in self.lines.iter().enumerate() {
            if line.matches(tag) {
                return Lookup::Hit(way);
            }
            if !line.valid && first_free.is_none() {
                first_free = Some(way);
            }
            if line.recency < oldest {
                oldest = line.recency;
                victim = way;
            }
        }

        first_free.map_or(Lookup::Evict(victim), Lookup::Fill)
    }

    /// Rewrites the recency stamp of `way`.
    #[inline]
    pub(crate) fn touch(&mut self, way: usize, stamp: u64) {
        self.lines[way].recency = stamp;
    }

    /// Sets the dirty bit of `way`.
    #[inline]
    pub(crate) fn mark_dirty(&mut self, way: usize) {
        self.lines[way].dirty = true;
    }

    /// Installs a block in `way`, returning the line it replaced.
    pub(crate) fn install(&mut self, way: usize, tag: u64, stamp: u64, dirty: bool) -> CacheLine {
        let fresh = CacheLine {
            valid: true,
            dirty,
            tag,
            recency: stamp,
        };
        std::mem::replace(&mut self.lines[way], fresh)
    }
}
