/// Drawing instruction consumed only by the annotator: corner rectangle plus
/// a pre-formatted label.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub label: String,
}

impl DrawBox {
    /// Label anchor: 10px above the top edge, unless that would leave the
    /// visible area, in which case 10px below the top edge.
    pub fn label_position(&self) -> (i32, i32) {
        let y = if self.y1 - 10 > 10 {
            self.y1 - 10
        } else {
            self.y1 + 10
        };
        (self.x1, y)
    }
}
