use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::circle;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gdk4::ModifierType;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use wheel::{Diagram, Point, PointerEvent};

pub struct AppModel {
    pub diagram: Rc<RefCell<Diagram>>,
    pub config: Config,
    pub config_path: PathBuf,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Press(Point, ModifierType),
    Motion(Point),
    /// Button released or gesture cancelled.
    Release,
    ConfigReload,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        PathBuf,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Fifths"),
            add_css_class: "fifths-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "fifths-drawing-area",

                add_controller = gtk::GestureDrag {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_drag_begin[sender] => move |gesture, x, y| {
                        sender.input(AppMsg::Press(Point::new(x, y), gesture.current_event_state()));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Motion(Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::Release);
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::Release);
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, config_path, rx) = init;

        theme::load_css();
        window::init_window(&root);

        let diagram = Diagram::new(config.wheel.ring_thickness, config.animation());

        let model = AppModel {
            diagram: Rc::new(RefCell::new(diagram)),
            config,
            config_path,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let diagram_draw = model.diagram.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let bounds = wheel::Bounds::centered_square(width as f64, height as f64);
                if let Err(e) = circle::draw(cr, &diagram_draw.borrow(), bounds, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Press(point, state) => {
                let alternate = window::is_alternate(state, self.config.input.alternate_modifier);
                let event = self.pointer_event(point, alternate);
                self.diagram.borrow_mut().pointer_down(&event);
            }
            AppMsg::Motion(point) => {
                let event = self.pointer_event(point, false);
                self.diagram.borrow_mut().pointer_move(&event);
                self.drawing_area.queue_draw();
            }
            AppMsg::Release => {
                self.diagram.borrow_mut().pointer_up();
                self.start_snap_animation();
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    self.diagram
                        .borrow_mut()
                        .reconfigure(new_config.wheel.ring_thickness, new_config.animation());
                    self.config = new_config;
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Close => self.root.close(),
        }
    }
}

impl AppModel {
    fn pointer_event(&self, point: Point, alternate: bool) -> PointerEvent {
        PointerEvent::new(point, window::diagram_bounds(&self.drawing_area), alternate)
    }

    /// Drives snap animations from the frame clock until every group rests.
    fn start_snap_animation(&self) {
        if !self.diagram.borrow().is_animating() || self.ticking.replace(true) {
            return;
        }

        let diagram = self.diagram.clone();
        let ticking = self.ticking.clone();
        let last_frame = Cell::new(None::<i64>);

        self.drawing_area.add_tick_callback(move |area, clock| {
            let now = clock.frame_time();
            let dt = last_frame
                .replace(Some(now))
                .map_or(Duration::ZERO, |prev| {
                    Duration::from_micros(now.saturating_sub(prev).max(0) as u64)
                });

            let running = diagram.borrow_mut().tick(dt);
            area.queue_draw();

            if running {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }
}
