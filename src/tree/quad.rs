use crate::models::{Body, Vec2};

/// An axis-aligned square region of the plane.
///
/// `size` is the full edge length, not the half size.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::models::Vec2;
/// use rs_barnes_hut::tree::Quad;
///
/// let quad = Quad::new(Vec2::zero(), 2.0);
///
/// // Bit 0 is set right of centre, bit 1 above it.
/// assert_eq!(quad.find_quadrant(Vec2::new(-0.5, -0.5)), 0);
/// assert_eq!(quad.find_quadrant(Vec2::new(0.5, 0.5)), 3);
///
/// let child = quad.into_quadrant(1);
/// assert_eq!(child.center, Vec2::new(0.5, -0.5));
/// assert_eq!(child.size, 1.0);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub center: Vec2,
    pub size: f64,
}

impl Quad {
    pub fn new(center: Vec2, size: f64) -> Self {
        Self { center, size }
    }

    /// Returns the smallest square centred on the bounding box of the bodies.
    ///
    /// Bodies with a non-finite position are ignored. Returns `None` when no body
    /// has a finite position. A single body gives a square of size zero.
    pub fn new_containing(bodies: &[Body]) -> Option<Self> {
        let mut min = Vec2::broadcast(f64::MAX);
        let mut max = Vec2::broadcast(f64::MIN);
        let mut any = false;

        for body in bodies.iter().filter(|b| b.pos.is_finite()) {
            min.x = min.x.min(body.pos.x);
            min.y = min.y.min(body.pos.y);
            max.x = max.x.max(body.pos.x);
            max.y = max.y.max(body.pos.y);
            any = true;
        }

        if !any {
            return None;
        }

        let center = (min + max) * 0.5;
        let size = (max.x - min.x).max(max.y - min.y);
        Some(Self { center, size })
    }

    /// Index 0..=3 of the quadrant holding `pos`.
    ///
    /// Points on a centre line fall on the lower side of that axis.
    #[inline]
    pub fn find_quadrant(&self, pos: Vec2) -> usize {
        ((pos.y > self.center.y) as usize) << 1 | (pos.x > self.center.x) as usize
    }

    /// The child square for `quadrant`: half the size, centre moved by a quarter
    /// of the parent size along each axis.
    #[inline]
    pub fn into_quadrant(mut self, quadrant: usize) -> Self {
        self.size *= 0.5;
        self.center.x += ((quadrant & 1) as f64 - 0.5) * self.size;
        self.center.y += ((quadrant >> 1) as f64 - 0.5) * self.size;
        self
    }

    /// All four children in quadrant order.
    pub fn subdivide(&self) -> [Quad; 4] {
        [0, 1, 2, 3].map(|i| self.into_quadrant(i))
    }

    pub fn min(&self) -> Vec2 {
        self.center - Vec2::broadcast(self.size * 0.5)
    }

    pub fn max(&self) -> Vec2 {
        self.center + Vec2::broadcast(self.size * 0.5)
    }

    /// Whether this square touches the box `[min, max]`. Shared edges count.
    #[inline]
    pub fn overlaps(&self, min: Vec2, max: Vec2) -> bool {
        let (q_min, q_max) = (self.min(), self.max());
        max.x >= q_min.x && min.x <= q_max.x && max.y >= q_min.y && min.y <= q_max.y
    }
}
