//! Tripled tile sequence.
//!
//! The carousel loops by laying three copies of the original list side by
//! side: `[clones | originals | clones]`. With `N` originals the bands cover
//! `[0, N)`, `[N, 2N)` and `[2N, 3N)`. Only the middle band keeps the
//! `INITIAL` marker; clones are otherwise identical to their originals.

use bitflags::bitflags;
use std::ops::Range;

bitflags! {
    /// Per-tile markers the host turns into classes / attributes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TileFlags: u8 {
        /// Preferred focus target at initialization.
        const INITIAL = 1 << 0;
        /// The single centred tile.
        const ACTIVE  = 1 << 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    Before,
    Middle,
    After,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile<T> {
    pub content: T,
    /// Index into the original list.
    pub origin: usize,
    pub band: Band,
    pub flags: TileFlags,
}

impl<T> Tile<T> {
    pub fn is_active(&self) -> bool {
        self.flags.contains(TileFlags::ACTIVE)
    }
}

#[derive(Clone, Debug)]
pub struct TileSequence<T> {
    tiles: Vec<Tile<T>>,
    original_len: usize,
    initial: Option<usize>,
    active: Option<usize>,
}

impl<T: Clone> TileSequence<T> {
    /// Triples `originals`. `initial` is an index into `originals`; an
    /// out-of-range value is treated as absent.
    pub fn tripled(originals: Vec<T>, initial: Option<usize>) -> Self {
        let n = originals.len();
        let initial = initial.filter(|&i| i < n);
        let mut tiles = Vec::with_capacity(n * 3);
        for band in [Band::Before, Band::Middle, Band::After] {
            for (origin, content) in originals.iter().enumerate() {
                let mut flags = TileFlags::empty();
                if band == Band::Middle && initial == Some(origin) {
                    flags |= TileFlags::INITIAL;
                }
                tiles.push(Tile {
                    content: content.clone(),
                    origin,
                    band,
                    flags,
                });
            }
        }
        Self {
            tiles,
            original_len: n,
            initial,
            active: None,
        }
    }
}

impl<T> TileSequence<T> {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn original_len(&self) -> usize {
        self.original_len
    }

    pub fn middle(&self) -> Range<usize> {
        self.original_len..self.original_len * 2
    }

    pub fn get(&self, index: usize) -> Option<&Tile<T>> {
        self.tiles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile<T>> {
        self.tiles.iter()
    }

    pub fn initial(&self) -> Option<usize> {
        self.initial
    }

    /// Sequence index of the tile to center at startup: the marked initial
    /// original, else the `floor(N / 2)`-th one, always in the middle band.
    pub fn start_index(&self) -> Option<usize> {
        if self.original_len == 0 {
            return None;
        }
        let origin = self.initial.unwrap_or(self.original_len / 2);
        Some(self.original_len + origin)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Moves the `ACTIVE` marker to `index`. Returns the previous active
    /// index when something changed, `None` when `index` was already active
    /// or is out of range.
    pub fn set_active(&mut self, index: usize) -> Option<Option<usize>> {
        if self.active == Some(index) || index >= self.tiles.len() {
            return None;
        }
        let prev = self.active.replace(index);
        if let Some(p) = prev {
            self.tiles[p].flags.remove(TileFlags::ACTIVE);
        }
        self.tiles[index].flags.insert(TileFlags::ACTIVE);
        Some(prev)
    }

    /// Clamps `index + step` into the sequence bounds.
    pub fn step_from(&self, index: usize, step: isize) -> usize {
        let last = self.tiles.len().saturating_sub(1);
        index.saturating_add_signed(step).min(last)
    }
}
