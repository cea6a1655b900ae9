use crate::config::Modifier;
use gdk4::ModifierType;
use gtk::prelude::*;
use gtk4 as gtk;
use wheel::Bounds;

pub const DEFAULT_SIZE: i32 = 480;

pub fn init_window(window: &gtk::ApplicationWindow) {
    window.set_default_size(DEFAULT_SIZE, DEFAULT_SIZE);
    window.set_size_request(DEFAULT_SIZE / 4, DEFAULT_SIZE / 4);
}

/// Square the wheel occupies inside the drawing area.
pub fn diagram_bounds(area: &gtk::DrawingArea) -> Bounds {
    Bounds::centered_square(area.width() as f64, area.height() as f64)
}

pub fn modifier_mask(modifier: Modifier) -> ModifierType {
    match modifier {
        Modifier::Alt => ModifierType::ALT_MASK,
        Modifier::Shift => ModifierType::SHIFT_MASK,
        Modifier::Control => ModifierType::CONTROL_MASK,
        Modifier::Super => ModifierType::SUPER_MASK,
    }
}

pub fn is_alternate(state: ModifierType, modifier: Modifier) -> bool {
    state.contains(modifier_mask(modifier))
}
