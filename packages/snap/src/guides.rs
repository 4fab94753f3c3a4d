use drawboard_document::{Position, Viewport};
use serde::{Deserialize, Serialize};

/// Orientation of an alignment guide line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    /// A line of constant x
    Vertical,
    /// A line of constant y
    Horizontal,
}

/// An alignment guide, in document space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub axis: GuideAxis,
    pub coordinate: f64,

    /// Node whose edge or center produced the guide
    pub node_id: String,
}

impl Guide {
    /// Project onto the screen with `coordinate * zoom + pan`
    pub fn to_screen(&self, viewport: &Viewport) -> f64 {
        let point = match self.axis {
            GuideAxis::Vertical => Position::new(self.coordinate, 0.0),
            GuideAxis::Horizontal => Position::new(0.0, self.coordinate),
        };
        let screen = viewport.to_screen(point);

        match self.axis {
            GuideAxis::Vertical => screen.x,
            GuideAxis::Horizontal => screen.y,
        }
    }
}

/// At most one guide per axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guides {
    pub vertical: Option<Guide>,
    pub horizontal: Option<Guide>,
}

impl Guides {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Guide> {
        self.vertical.iter().chain(self.horizontal.iter())
    }
}
