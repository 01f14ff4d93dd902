use crate::kernel::select::VerticalSpace;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub x: u16,
    pub y: u16,
}

impl Pos {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Insets {
    pub const fn all(v: u16) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    pub const fn xy(x: u16, y: u16) -> Self {
        Self {
            left: x,
            right: x,
            top: y,
            bottom: y,
        }
    }
}

/// A cell rectangle. All arithmetic saturates, so degenerate inputs yield empty rects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, p: Pos) -> bool {
        if self.is_empty() {
            return false;
        }
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn inset(self, insets: Insets) -> Self {
        Rect::new(
            self.x.saturating_add(insets.left),
            self.y.saturating_add(insets.top),
            self.w
                .saturating_sub(insets.left.saturating_add(insets.right)),
            self.h
                .saturating_sub(insets.top.saturating_add(insets.bottom)),
        )
    }

    pub fn intersect(self, other: Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        Rect::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    pub fn split_top(self, h: u16) -> (Rect, Rect) {
        let top_h = h.min(self.h);
        (
            Rect::new(self.x, self.y, self.w, top_h),
            Rect::new(
                self.x,
                self.y.saturating_add(top_h),
                self.w,
                self.h - top_h,
            ),
        )
    }

    pub fn split_left(self, w: u16) -> (Rect, Rect) {
        let left_w = w.min(self.w);
        (
            Rect::new(self.x, self.y, left_w, self.h),
            Rect::new(
                self.x.saturating_add(left_w),
                self.y,
                self.w - left_w,
                self.h,
            ),
        )
    }

    /// Splits into `n` columns of equal width; the last column absorbs the remainder.
    pub fn columns(self, n: u16, gap: u16) -> Vec<Rect> {
        if n == 0 {
            return Vec::new();
        }
        let gaps = gap.saturating_mul(n - 1);
        let col_w = self.w.saturating_sub(gaps) / n;
        let mut out = Vec::with_capacity(n as usize);
        let mut x = self.x;
        for i in 0..n {
            let w = if i + 1 == n {
                self.right().saturating_sub(x)
            } else {
                col_w
            };
            out.push(Rect::new(x, self.y, w, self.h));
            x = x.saturating_add(col_w).saturating_add(gap);
        }
        out
    }

    /// Rows free above and below `self` inside `viewport`, used to pick a drop direction.
    pub fn vertical_space_in(&self, viewport: Rect) -> VerticalSpace {
        VerticalSpace {
            above: self.y.saturating_sub(viewport.y),
            below: viewport.bottom().saturating_sub(self.bottom()),
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/geom.rs"]
mod tests;
