/// Horizontal box of one tile in content coordinates (px).
///
/// `left` is the border-box left edge relative to the start of the scroll
/// content, the way `offsetLeft` reports it. Margins sit outside the box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TileBox {
    pub left: f32,
    pub width: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl TileBox {
    pub fn new(left: f32, width: f32) -> Self {
        Self {
            left,
            width,
            margin_left: 0.0,
            margin_right: 0.0,
        }
    }

    pub fn with_margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    pub fn center(&self) -> f32 {
        self.left + self.width / 2.0
    }

    /// Width including both margins; what one tile contributes to a set.
    pub fn outer_width(&self) -> f32 {
        self.margin_left + self.width + self.margin_right
    }
}

/// Measured geometry of the whole strip for one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub viewport_width: f32,
    pub content_width: f32,
    pub tiles: Vec<TileBox>,
}

impl Layout {
    /// Lays `widths.len()` tiles out left to right, each with the same
    /// horizontal margins, the way a flex row with `margin: 0 m` would.
    pub fn strip(viewport_width: f32, widths: &[f32], margin: f32) -> Self {
        let mut x = 0.0;
        let mut tiles = Vec::with_capacity(widths.len());
        for &w in widths {
            x += margin;
            tiles.push(TileBox::new(x, w).with_margins(margin, margin));
            x += w + margin;
        }
        Self {
            viewport_width,
            content_width: x,
            tiles,
        }
    }

    /// Summed outer width of `range`; tiles outside the layout count as zero.
    pub fn span_width(&self, range: std::ops::Range<usize>) -> f32 {
        self.tiles
            .get(range)
            .map(|ts| ts.iter().map(TileBox::outer_width).sum())
            .unwrap_or(0.0)
    }

    pub fn overflows(&self) -> bool {
        self.content_width > self.viewport_width
    }

    /// Offset that puts the center of `tile` on the viewport center.
    pub fn center_offset(&self, tile: &TileBox) -> f32 {
        tile.center() - self.viewport_width / 2.0
    }

    /// Index of the tile whose center is closest to the viewport center at
    /// `offset`. Exact ties keep the lower index.
    pub fn nearest_to_center(&self, offset: f32) -> Option<usize> {
        let center = offset + self.viewport_width / 2.0;
        let mut best: Option<(usize, f32)> = None;
        for (i, t) in self.tiles.iter().enumerate() {
            let d = (center - t.center()).abs();
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Signed distance of each tile center from the viewport center at `offset`.
    pub fn distances_from_center(&self, offset: f32) -> impl Iterator<Item = f32> + '_ {
        let center = offset + self.viewport_width / 2.0;
        self.tiles.iter().map(move |t| t.center() - center)
    }
}

/// Center-weighted emphasis: `1 + gain * (1 - clamp(|d| / half, 0, 1))^2`.
///
/// Returns the baseline `1.0` when `half_width` is not positive.
pub fn emphasis_scale(distance: f32, half_width: f32, gain: f32) -> f32 {
    if half_width <= 0.0 {
        return 1.0;
    }
    let t = 1.0 - (distance.abs() / half_width).clamp(0.0, 1.0);
    1.0 + gain * t * t
}
