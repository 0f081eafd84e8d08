//! # Loop scroll model
//!
//! `LoopScroll` is the horizontal scroll state of the carousel viewport. It
//! mirrors what the platform's scroll container holds (offset, viewport width,
//! content width) plus the cached *set width*: the outer width of one full
//! copy of the original tiles.
//!
//! Because the tile list is tripled, any offset can be moved by exactly one
//! set width without changing what is on screen. `normalize` uses that to keep
//! the offset inside `[0.5 * set, 1.5 * set]`, so the user can scroll forever
//! in either direction without reaching a real edge. An offset that drifted
//! further than one set is folded by as many whole sets as it takes.

/// Horizontal scroll state with wraparound correction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoopScroll {
    offset: f32,
    viewport_width: f32,
    content_width: f32,
    set_width: f32,
}

impl LoopScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_viewport_width(&mut self, w: f32) {
        self.viewport_width = w.max(0.0);
        self.clamp();
    }

    pub fn set_content_width(&mut self, w: f32) {
        self.content_width = w.max(0.0);
        self.clamp();
    }

    pub fn set_set_width(&mut self, w: f32) {
        self.set_width = if w.is_finite() { w.max(0.0) } else { 0.0 };
    }

    pub fn set_offset(&mut self, off: f32) {
        self.offset = off.clamp(0.0, self.max_offset());
    }

    fn max_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub fn get(&self) -> f32 {
        self.offset
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn set_width(&self) -> f32 {
        self.set_width
    }

    pub fn overflows(&self) -> bool {
        self.content_width > self.viewport_width
    }

    /// Whole-set shift that brings the offset back into the band.
    ///
    /// Returns `None` when no correction is needed or the set width is zero
    /// (hidden or not yet measured).
    pub fn fold_shift(&self) -> Option<f32> {
        let set = self.set_width;
        if set <= 0.0 {
            return None;
        }
        if (set * 0.5..=set * 1.5).contains(&self.offset) {
            return None;
        }
        // a large viewport drift can need more than one set
        let sets = ((self.offset - set * 0.5) / set).floor();
        Some(-sets * set)
    }

    /// Offset after wraparound correction, without applying it.
    pub fn normalized(&self) -> Option<f32> {
        self.fold_shift().map(|shift| self.offset + shift)
    }

    /// Applies wraparound correction. Returns the new offset if it moved.
    pub fn normalize(&mut self) -> Option<f32> {
        let next = self.normalized()?;
        self.offset = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(offset: f32, set: f32) -> LoopScroll {
        let mut s = LoopScroll::new();
        s.set_viewport_width(400.0);
        s.set_content_width(set * 3.0);
        s.set_set_width(set);
        s.set_offset(offset);
        s
    }

    #[test]
    fn normalize_folds_into_middle_band() {
        let mut s = state(100.0, 1000.0);
        assert_eq!(s.normalize(), Some(1100.0));

        let mut s = state(1600.0, 1000.0);
        assert_eq!(s.normalize(), Some(600.0));

        let mut s = state(1000.0, 1000.0);
        assert_eq!(s.normalize(), None);
        assert_eq!(s.get(), 1000.0);
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(state(500.0, 1000.0).normalized(), None);
        assert_eq!(state(1500.0, 1000.0).normalized(), None);
    }

    #[test]
    fn fold_shift_is_a_whole_number_of_sets() {
        assert_eq!(state(1660.37, 1100.0).fold_shift(), Some(-1100.0));
        assert_eq!(state(100.0, 1000.0).fold_shift(), Some(1000.0));
        assert_eq!(state(1900.0, 800.0).fold_shift(), Some(-800.0));
        assert_eq!(state(0.0, 300.0).fold_shift(), Some(300.0));
        assert_eq!(state(900.0, 1000.0).fold_shift(), None);
    }

    #[test]
    fn zero_set_width_is_noop() {
        let mut s = state(10.0, 0.0);
        assert_eq!(s.normalize(), None);
    }

    #[test]
    fn normalized_offsets_stay_in_band_and_shift_by_whole_sets() {
        let set = 900.0;
        for i in 0..=54 {
            let before = i as f32 * 50.0;
            let mut s = state(before, set);
            let before = s.get();
            let after = s.normalize().unwrap_or(before);
            assert!(after >= set * 0.5 && after <= set * 1.5, "{before} -> {after}");
            let shift = (after - before) / set;
            assert_eq!(shift, shift.round());
        }
    }

    #[test]
    fn offset_clamped_to_scrollable_range() {
        let mut s = state(0.0, 100.0);
        s.set_offset(-5.0);
        assert_eq!(s.get(), 0.0);
        s.set_offset(10_000.0);
        assert_eq!(s.get(), 0.0);
    }
}
