use crate::config;
use crate::events::AppEvent;
use crate::gui::theme::Theme;
use crate::gui::view;
use armillary::{Point, Scene, TokenKind, ZodiacSign};
use gdk4::FrameClock;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

pub const WINDOW_SIZE: i32 = 700;

pub struct AppModel {
    pub scene: Rc<RefCell<Scene>>,
    pub theme: Rc<RefCell<Theme>>,
    pub dark_mode: Rc<Cell<bool>>,
    pub config_path: Option<PathBuf>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    CursorMove(Point),
    CursorLeave,
    Click,
    ToggleDark,
    Resize(i32, i32),
    Quit,
    ConfigReload,
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
        Scene,
        Theme,
        bool,
        Option<PathBuf>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orrery"),
            set_default_size: (WINDOW_SIZE, WINDOW_SIZE),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::d {
                        sender.input(AppMsg::ToggleDark);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::CursorLeave);
                    },
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Click);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (scene, theme, dark_mode, config_path, rx) = init;

        let scene = Rc::new(RefCell::new(scene));
        let theme = Rc::new(RefCell::new(theme));
        let dark_mode = Rc::new(Cell::new(dark_mode));

        let model = AppModel {
            scene: scene.clone(),
            theme: theme.clone(),
            dark_mode: dark_mode.clone(),
            config_path,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let scene_draw = scene.clone();
        let theme_draw = theme.clone();
        let dark_draw = dark_mode.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = view::draw(
                cr,
                &scene_draw.borrow(),
                &theme_draw.borrow(),
                dark_draw.get(),
            ) {
                log::error!("Drawing error: {}", e);
            }
        });

        // The frame clock is the scene's only tick source; the scene sees
        // elapsed milliseconds and nothing else about scheduling.
        let scene_tick = scene.clone();
        let last_frame = Cell::new(None::<i64>);
        widgets.drawing_area.add_tick_callback(move |area, clock: &FrameClock| {
            let now = clock.frame_time();
            if let Some(prev) = last_frame.get() {
                let elapsed_ms = (now - prev) as f64 / 1000.0;
                if scene_tick.borrow_mut().advance_frame(elapsed_ms) {
                    area.queue_draw();
                }
            }
            last_frame.set(Some(now));
            glib::ControlFlow::Continue
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
            AppMsg::CursorMove(point) => {
                if self.scene.borrow_mut().update_cursor(point) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::CursorLeave => {
                if self.scene.borrow_mut().clear_hover() {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Click => {
                let mut scene = self.scene.borrow_mut();
                scene.pass_month();
                if let Some(sign) = scene
                    .bodies()
                    .iter()
                    .find(|b| matches!(b.token(), TokenKind::Disc { .. }))
                    .and_then(|b| ZodiacSign::from_index(b.destination_division() as usize))
                {
                    log::info!("The sun turns toward {}", sign);
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::ToggleDark => {
                self.dark_mode.set(!self.dark_mode.get());
                self.drawing_area.queue_draw();
            }
            AppMsg::Resize(width, height) => {
                self.scene
                    .borrow_mut()
                    .set_center(Point::new(width as f64 / 2.0, height as f64 / 2.0));
                self.drawing_area.queue_draw();
            }
            AppMsg::Quit => self.root.close(),
            AppMsg::ConfigReload => {
                let center = self.scene.borrow().center();
                let rebuilt =
                    config::load_config(self.config_path.as_deref()).and_then(|config| {
                        let scene = config.build_scene(center)?;
                        let theme = Theme::from_config(&config)?;
                        Ok((scene, theme))
                    });
                match rebuilt {
                    Ok((scene, theme)) => {
                        *self.scene.borrow_mut() = scene;
                        *self.theme.borrow_mut() = theme;
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
            }
        }
    }
}
