use serde::Deserialize;

// ── Boxes ───────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in canvas coordinates with a text label.
///
/// The corners are kept exactly as the user or the service produced them;
/// `x0 <= x1` and `y0 <= y1` are not enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub label: String,
}

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32, label: impl Into<String>) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            label: label.into(),
        }
    }

    /// A zero-sized box anchored at a single point, the start of a draw gesture.
    pub fn degenerate(x: f32, y: f32, label: impl Into<String>) -> Self {
        Self::new(x, y, x, y, label)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

// ── Detection service wire format ───────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
pub struct Detection {
    pub rect: [f32; 4],
    pub label: String,
}

impl From<Detection> for BoundingBox {
    fn from(d: Detection) -> Self {
        let [x0, y0, x1, y1] = d.rect;
        BoundingBox::new(x0, y0, x1, y1, d.label)
    }
}

/// Body of a successful `POST /detect`.
#[derive(Clone, Debug, Deserialize)]
pub struct DetectResponse {
    pub annotated_image_path: String,
    pub detections: Vec<Detection>,
}

/// Body of a failed `POST /detect`.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_converts_corner_order() {
        let d: Detection =
            serde_json::from_str(r#"{"rect": [12, 20, 140, 96], "label": "dog"}"#).unwrap();
        let b = BoundingBox::from(d);
        assert_eq!(b, BoundingBox::new(12.0, 20.0, 140.0, 96.0, "dog"));
        assert_eq!(b.width(), 128.0);
        assert_eq!(b.height(), 76.0);
    }

    #[test]
    fn degenerate_box_has_no_extent() {
        let b = BoundingBox::degenerate(3.5, 7.0, "cat");
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (3.5, 7.0, 3.5, 7.0));
        assert_eq!(b.width(), 0.0);
    }
}
