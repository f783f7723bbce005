/// An axis-aligned rectangle in playfield units.
///
/// The coordinate system has its origin at the top-left corner of the playfield,
/// with `x` growing to the right and `y` growing downward.
///
/// # Example
///
/// ```
/// use dodger_engine::Rect;
///
/// let a = Rect::new(0.0, 0.0, 10.0, 10.0);
/// let b = Rect::new(5.0, 5.0, 10.0, 10.0);
/// assert!(a.intersects(&b));
///
/// // Touching edges do not count as an intersection.
/// let c = Rect::new(10.0, 0.0, 10.0, 10.0);
/// assert!(!a.intersects(&c));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size centered on `(cx, cy)`.
    #[must_use]
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns `true` if the two rectangles overlap by a non-zero area.
    ///
    /// Rectangles that only share an edge do not intersect, and an empty
    /// rectangle never intersects anything.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Returns a copy moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns a copy pushed back inside `[0, width] x [0, height]`.
    ///
    /// Each wall is applied independently, so a rectangle larger than the
    /// bounds ends up aligned with the left or top wall.
    #[must_use]
    pub fn clamped_within(&self, width: f32, height: f32) -> Self {
        let mut x = self.x;
        let mut y = self.y;
        if x + self.width > width {
            x = width - self.width;
        }
        if x < 0.0 {
            x = 0.0;
        }
        if y + self.height > height {
            y = height - self.height;
        }
        if y < 0.0 {
            y = 0.0;
        }
        Self::new(x, y, self.width, self.height)
    }

    /// Returns a copy pushed back inside `[0, width]` horizontally only.
    #[must_use]
    pub fn clamped_horizontally(&self, width: f32) -> Self {
        let x = self.x.min(width - self.width).max(0.0);
        Self::new(x, self.y, self.width, self.height)
    }
}
