use crate::stroke::StrokeRef;

/// The drawing at one point in time: strokes in paint order
///
/// Cloning is cheap since strokes are shared, which is what lets the
/// history keep whole snapshots instead of diffs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    strokes: Vec<StrokeRef>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    /// Copy of this collection with `stroke` painted last
    pub fn with_stroke(&self, stroke: StrokeRef) -> Self {
        let mut strokes = Vec::with_capacity(self.strokes.len() + 1);
        strokes.extend(self.strokes.iter().cloned());
        strokes.push(stroke);
        Self { strokes }
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn last_stroke(&self) -> Option<&StrokeRef> {
        self.strokes.last()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

impl FromIterator<StrokeRef> for Document {
    fn from_iter<I: IntoIterator<Item = StrokeRef>>(iter: I) -> Self {
        Self {
            strokes: iter.into_iter().collect(),
        }
    }
}
