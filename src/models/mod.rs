pub mod bar;
pub mod digits;
pub mod matrix;

pub use bar::Bar;
pub use digits::{DIGIT_COUNT, DigitString, REFERENCE_POSITIONS, REFERENCE_VALUES};
pub use matrix::BitMatrix;
