//! Bounding-box geometry and the conversions between its representations.
//!
//! Boxes are stored canonically as absolute pixel corners. Every other
//! representation (relative corners, center/size in either space) is derived
//! on demand from the canonical form and a [`Resolution`]. No clamping is
//! performed anywhere: an out-of-frame or negative-size box passes through
//! unchanged, which matches the behavior annotation consumers already rely
//! on.

/// Frame width and height in pixels.
///
/// Source formats do not self-describe their resolution, so the caller has
/// to obtain it externally (typically by probing the source video) and pass
/// it into any conversion that crosses between relative and absolute
/// coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A bounding box as absolute pixel corners, with `xmin <= xmax` and
/// `ymin <= ymax` for well-formed input. Malformed corners are not reordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn from_corners(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Build from a center point and size, in the same (absolute) space.
    pub fn from_center_size(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        let xmin = center_x - width / 2.0;
        let ymin = center_y - height / 2.0;
        Self {
            xmin,
            ymin,
            xmax: xmin + width,
            ymax: ymin + height,
        }
    }

    /// Build from the min corner and size, in the same (absolute) space.
    pub fn from_min_size(xmin: f64, ymin: f64, width: f64, height: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax: xmin + width,
            ymax: ymin + height,
        }
    }

    /// Build from relative center/size coordinates by scaling up to pixels
    /// first, then deriving the corners. The scale-then-combine order matters
    /// for bit reproducibility against existing tool output.
    pub fn from_relative_center_size(
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
        resolution: &Resolution,
    ) -> Self {
        let w = f64::from(resolution.width);
        let h = f64::from(resolution.height);
        Self::from_center_size(center_x * w, center_y * h, width * w, height * h)
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Corner representation -> center/size representation, in whatever space
    /// the corners are currently expressed in.
    pub fn center_size(&self) -> (f64, f64, f64, f64) {
        let width = self.width();
        let height = self.height();
        (
            self.xmin + width / 2.0,
            self.ymin + height / 2.0,
            width,
            height,
        )
    }

    /// Divide the corners down into relative [0, 1] space. Out-of-frame
    /// corners produce values outside [0, 1] and are kept as-is.
    pub fn to_relative(&self, resolution: &Resolution) -> Self {
        let w = f64::from(resolution.width);
        let h = f64::from(resolution.height);
        Self {
            xmin: self.xmin / w,
            ymin: self.ymin / h,
            xmax: self.xmax / w,
            ymax: self.ymax / h,
        }
    }

    /// Relative center/size representation: divide the corners first, then
    /// derive center and size in relative space (matching the original tool's
    /// arithmetic order).
    pub fn relative_center_size(&self, resolution: &Resolution) -> (f64, f64, f64, f64) {
        self.to_relative(resolution).center_size()
    }
}
