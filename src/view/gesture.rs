//! Drop-position math for note drags.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

/// Half of the fixed rendered note width, in board pixels.
pub const NOTE_HALF_WIDTH: f64 = 75.0;
/// Half of the fixed rendered note height, in board pixels.
pub const NOTE_HALF_HEIGHT: f64 = 50.0;

/// A position in page or board pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Top-left of a note dropped at `pointer`, relative to the board at `board_origin`.
///
/// The pointer is taken as the note's center.
#[must_use]
pub fn drop_position(pointer: Point, board_origin: Point) -> Point {
    Point::new(pointer.x - board_origin.x - NOTE_HALF_WIDTH, pointer.y - board_origin.y - NOTE_HALF_HEIGHT)
}

/// Integer coordinate as sent on the wire. Truncates toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn wire_coordinate(value: f64) -> i64 {
    value.trunc() as i64
}
