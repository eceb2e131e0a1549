use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Application, ApplicationWindow, Box as GtkBox, DrawingArea, Fixed, Orientation, Overlay};

use crate::error::{AppError, AppResult};
use crate::picker::PickerSession;
use crate::surface::Surface;
use crate::ui::{self, StyleTokens, PICKER_TOKENS};
use crate::worker::RenderWorker;

mod bootstrap;
mod canvas;
mod cursor;
mod picker_runtime;
mod runtime_css;

use self::bootstrap::*;
use self::canvas::*;
use self::cursor::*;
use self::picker_runtime::*;
use self::runtime_css::*;

const APP_ID: &str = "com.github.pixlens.pixlens";

pub struct App {
    session: PickerSession,
}

impl App {
    pub fn new() -> Self {
        Self {
            session: PickerSession::new(PICKER_TOKENS),
        }
    }

    pub fn start(&mut self) -> AppResult<()> {
        let bootstrap = bootstrap_app_runtime()?;
        let style_tokens = bootstrap.style_tokens;
        let surface = Rc::new(bootstrap.surface);

        // Both failure modes here are fatal at startup: no drawing
        // context, or no worker thread.
        let canvas_image = surface_to_cairo_image(&surface).ok_or(AppError::CanvasContext)?;
        let worker = Rc::new(RenderWorker::spawn(PICKER_TOKENS)?);

        let session = Rc::new(RefCell::new(std::mem::take(&mut self.session)));
        let session_for_activate = session.clone();

        tracing::info!("starting gtk runtime");
        let application = Application::new(Some(APP_ID), gtk4::gio::ApplicationFlags::NON_UNIQUE);

        let activate_once = Rc::new(Cell::new(false));
        let canvas_image = RefCell::new(Some(canvas_image));
        application.connect_activate(move |app| {
            if activate_once.replace(true) {
                tracing::debug!("ignoring duplicate gtk activate signal");
                return;
            }
            let Some(canvas_image) = canvas_image.borrow_mut().take() else {
                return;
            };
            build_ui(
                app,
                style_tokens,
                canvas_image,
                surface.clone(),
                worker.clone(),
                session_for_activate.clone(),
            );
        });

        // Pass only argv[0] to GTK so app-specific flags do not fail GTK parsing.
        let gtk_args: Vec<String> = std::env::args().take(1).collect();
        application.run_with_args(&gtk_args);

        self.session = std::mem::take(&mut *session.borrow_mut());
        Ok(())
    }

    pub fn session(&self) -> &PickerSession {
        &self.session
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn build_ui(
    app: &Application,
    tokens: StyleTokens,
    canvas_image: gtk4::cairo::ImageSurface,
    surface: Rc<Surface>,
    worker: Rc<RenderWorker>,
    session: Rc<RefCell<PickerSession>>,
) {
    install_runtime_css(tokens);

    let window = ApplicationWindow::new(app);
    window.add_css_class("pixlens-root");
    window.set_title(Some("Pixlens"));
    window.set_default_size(tokens.window_default_width, tokens.window_default_height);

    let toggle = ui::picker_toggle_button("Toggle the color picker");
    let output = ui::picked_color_output();
    let header = GtkBox::new(Orientation::Horizontal, tokens.spacing_8);
    header.append(&toggle);
    header.append(&output);

    let canvas = DrawingArea::new();
    canvas.add_css_class("picker-canvas");
    canvas.set_content_width(tokens.canvas_width);
    canvas.set_content_height(tokens.canvas_height);
    install_canvas_draw(&canvas, canvas_image);

    // The cursor layer sits above the canvas and never targets pointer
    // events, so surface coordinates match widget coordinates 1:1.
    let cursor_layer = Fixed::new();
    cursor_layer.set_can_target(false);

    let overlay = Overlay::new();
    overlay.set_child(Some(&canvas));
    overlay.add_overlay(&cursor_layer);
    overlay.set_halign(Align::Start);
    overlay.set_valign(Align::Start);

    let root = GtkBox::new(Orientation::Vertical, tokens.spacing_12);
    root.set_margin_top(tokens.spacing_12);
    root.set_margin_bottom(tokens.spacing_12);
    root.set_margin_start(tokens.spacing_12);
    root.set_margin_end(tokens.spacing_12);
    root.append(&header);
    root.append(&overlay);
    window.set_child(Some(&root));

    let cursor = Rc::new(CursorRuntime::new(cursor_layer, PICKER_TOKENS));

    let context = PickerRuntimeContext {
        window: window.clone(),
        canvas,
        session,
        surface,
        worker,
        cursor,
        output,
    };
    connect_picker_toggle(&toggle, context.clone());
    install_zoom_response_pump(context);

    tracing::info!("presenting picker window");
    window.present();
}
