pub mod view;

pub use view::draw;

pub const NOTCH_WIDTH: f64 = 0.66;
pub const LABEL_FONT: &str = "Sans";
