use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors of the wheel. Each one is a named GTK color, so a user stylesheet
/// can override it with `@define-color`.
pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub notes: Srgba<f64>,
    pub dissonance: Srgba<f64>,
    pub consonance: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "fifths_background_color",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
            ),
            notes: Self::lookup_color(context, "fifths_notes_color", Srgba::new(1.0, 1.0, 1.0, 1.0)),
            dissonance: Self::lookup_color(
                context,
                "fifths_dissonance_color",
                Srgba::new(0.667, 0.667, 0.667, 1.0),
            ),
            consonance: Self::lookup_color(
                context,
                "fifths_consonance_color",
                Srgba::new(0.333, 0.333, 0.333, 1.0),
            ),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color fifths_background_color black;
@define-color fifths_notes_color white;
@define-color fifths_dissonance_color #aaa;
@define-color fifths_consonance_color #555;

.fifths-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
