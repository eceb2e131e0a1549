use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::{
    ApplicationWindow, DrawingArea, EventControllerMotion, GestureClick, Label, ToggleButton,
};

use crate::clipboard;
use crate::geometry::SurfacePoint;
use crate::notification;
use crate::picker::PickerSession;
use crate::state::PickerState;
use crate::surface::Surface;
use crate::worker::{RenderResponse, RenderWorker};

use super::cursor::CursorRuntime;

pub(super) const ZOOM_RESPONSE_POLL_INTERVAL: Duration = Duration::from_millis(24);
const PICKER_ACTIVE_CLASS: &str = "picker-active";

#[derive(Clone)]
pub(super) struct PickerRuntimeContext {
    pub(super) window: ApplicationWindow,
    pub(super) canvas: DrawingArea,
    pub(super) session: Rc<RefCell<PickerSession>>,
    pub(super) surface: Rc<Surface>,
    pub(super) worker: Rc<RenderWorker>,
    pub(super) cursor: Rc<CursorRuntime>,
    pub(super) output: Label,
}

/// The two GTK controllers realizing the four pointer listeners
/// (move/enter/leave on the motion controller, click on the gesture).
struct PointerControllers {
    motion: EventControllerMotion,
    click: GestureClick,
}

pub(super) fn connect_picker_toggle(toggle: &ToggleButton, context: PickerRuntimeContext) {
    let controllers: Rc<RefCell<Option<PointerControllers>>> = Rc::new(RefCell::new(None));
    toggle.connect_toggled(move |_| {
        let result = context.session.borrow_mut().toggle();
        match result {
            Ok(PickerState::Enabled) => enable_picker(&context, &controllers),
            Ok(PickerState::Disabled) => disable_picker(&context, &controllers),
            Err(err) => tracing::warn!(?err, "picker toggle rejected"),
        }
    });
}

fn enable_picker(
    context: &PickerRuntimeContext,
    controllers: &Rc<RefCell<Option<PointerControllers>>>,
) {
    if controllers.borrow().is_some() {
        tracing::warn!("pointer controllers already attached; skipping");
        return;
    }

    let motion = EventControllerMotion::new();
    {
        let context = context.clone();
        motion.connect_motion(move |_, x, y| handle_pointer_moved(&context, x, y));
    }
    {
        let context = context.clone();
        motion.connect_enter(move |_, _, _| {
            context.session.borrow_mut().pointer_entered();
            context
                .cursor
                .set_visible(context.session.borrow().cursor_visible());
        });
    }
    {
        let context = context.clone();
        motion.connect_leave(move |_| {
            context.session.borrow_mut().pointer_left();
            context.cursor.set_visible(false);
        });
    }

    let click = GestureClick::new();
    click.set_button(gtk4::gdk::BUTTON_PRIMARY);
    {
        let context = context.clone();
        click.connect_pressed(move |_, _, x, y| handle_pointer_clicked(&context, x, y));
    }

    context.canvas.add_controller(motion.clone());
    context.canvas.add_controller(click.clone());
    *controllers.borrow_mut() = Some(PointerControllers { motion, click });

    context.window.add_css_class(PICKER_ACTIVE_CLASS);
    context.canvas.set_cursor_from_name(Some("crosshair"));
    tracing::debug!("pointer listeners attached");
}

fn disable_picker(
    context: &PickerRuntimeContext,
    controllers: &Rc<RefCell<Option<PointerControllers>>>,
) {
    if let Some(PointerControllers { motion, click }) = controllers.borrow_mut().take() {
        context.canvas.remove_controller(&motion);
        context.canvas.remove_controller(&click);
        tracing::debug!("pointer listeners detached");
    }
    context.cursor.set_visible(false);
    context.window.remove_css_class(PICKER_ACTIVE_CLASS);
    context.canvas.set_cursor_from_name(None::<&str>);
}

fn handle_pointer_moved(context: &PickerRuntimeContext, x: f64, y: f64) {
    let point = SurfacePoint::new(x.floor() as i32, y.floor() as i32);
    let update = context
        .session
        .borrow_mut()
        .pointer_moved(&context.surface, point);
    let Some(update) = update else {
        return;
    };

    context.cursor.set_color(update.color);
    context.cursor.move_to(update.cursor_origin);
    context.cursor.set_visible(true);

    // Fire-and-forget; the response pump displays whatever comes back.
    if let Err(err) = context.worker.submit(update.request) {
        tracing::error!(?err, "failed to submit zoom render request");
    }
}

fn handle_pointer_clicked(context: &PickerRuntimeContext, x: f64, y: f64) {
    let point = SurfacePoint::new(x.floor() as i32, y.floor() as i32);
    let picked = context
        .session
        .borrow_mut()
        .pointer_clicked(&context.surface, point);
    let Some(color) = picked else {
        return;
    };

    let hex = color.to_hex();
    context.output.set_text(&hex);
    if let Err(err) = clipboard::copy_text(&hex) {
        tracing::warn!(?err, "failed to copy picked color to clipboard");
    }
}

/// Pumps worker responses onto the UI. Registered once for the
/// controller's lifetime, independent of Enabled/Disabled transitions.
pub(super) fn install_zoom_response_pump(context: PickerRuntimeContext) {
    gtk4::glib::timeout_add_local(ZOOM_RESPONSE_POLL_INTERVAL, move || loop {
        match context.worker.try_recv() {
            Ok(Some(RenderResponse::Image { seq, png })) => {
                if context.session.borrow_mut().accept_zoom_image(seq) {
                    context.cursor.set_zoom_png(png);
                }
            }
            Ok(Some(RenderResponse::Failed { seq, reason })) => {
                tracing::error!(seq, reason = reason.as_str(), "zoom render failed");
                notification::send(format!("Zoom preview failed: {reason}"));
            }
            Ok(None) => break gtk4::glib::ControlFlow::Continue,
            Err(err) => {
                tracing::error!(?err, "render worker channel closed; stopping response pump");
                break gtk4::glib::ControlFlow::Break;
            }
        }
    });
}
