#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// Modifier keys held during a wheel event.
#[derive(Clone, Copy, Debug, Default)]
pub struct Modifiers {
    pub ctrl: bool,
}

/// Unit of a wheel delta, as browsers report it in `deltaMode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WheelInput {
    pub delta_x: f32,
    pub delta_y: f32,
    pub mode: DeltaMode,
    pub modifiers: Modifiers,
}

impl WheelInput {
    pub fn vertical(delta_y: f32) -> Self {
        Self {
            delta_y,
            ..Self::default()
        }
    }

    pub fn horizontal(delta_x: f32) -> Self {
        Self {
            delta_x,
            ..Self::default()
        }
    }

    /// Larger-magnitude axis in pixels; vertical wins ties.
    pub fn dominant_px(&self, line_px: f32, page_px: f32) -> f32 {
        let to_px = |d: f32| match self.mode {
            DeltaMode::Pixel => d,
            DeltaMode::Line => d * line_px,
            DeltaMode::Page => d * page_px,
        };
        let dx = to_px(self.delta_x);
        let dy = to_px(self.delta_y);
        if dx.abs() > dy.abs() { dx } else { dy }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug)]
pub struct PointerInput {
    pub id: PointerId,
    pub event: PointerEventKind,
    /// Client-space x in px.
    pub x: f32,
}

impl PointerInput {
    pub fn down(x: f32) -> Self {
        Self::new(PointerEventKind::Down, x)
    }
    pub fn moved(x: f32) -> Self {
        Self::new(PointerEventKind::Move, x)
    }
    pub fn up(x: f32) -> Self {
        Self::new(PointerEventKind::Up, x)
    }
    pub fn cancel(x: f32) -> Self {
        Self::new(PointerEventKind::Cancel, x)
    }
    fn new(event: PointerEventKind, x: f32) -> Self {
        Self {
            id: PointerId(1),
            event,
            x,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}
