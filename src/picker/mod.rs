use std::collections::BTreeSet;

use crate::geometry::{Color, SurfacePoint};
use crate::state::{PickerState, StateMachine, StateResult};
use crate::surface::Surface;
use crate::ui::PickerTokens;
use crate::worker::RenderRequest;

/// The four pointer listeners the controller attaches while enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PointerListener {
    Move,
    Click,
    Enter,
    Leave,
}

const ALL_LISTENERS: [PointerListener; 4] = [
    PointerListener::Move,
    PointerListener::Click,
    PointerListener::Enter,
    PointerListener::Leave,
];

/// Everything a pointer-move produces: the sampled color, where the cursor
/// indicator goes, and the render request to dispatch.
#[derive(Debug, PartialEq, Eq)]
pub struct HoverUpdate {
    pub color: Color,
    pub cursor_origin: SurfacePoint,
    pub request: RenderRequest,
}

/// The picker controller's core, free of toolkit types: activation state,
/// listener bookkeeping, cursor visibility, sampling, and zoom
/// request/response sequencing. The GTK layer mirrors this state onto
/// widgets and event controllers.
#[derive(Debug)]
pub struct PickerSession {
    tokens: PickerTokens,
    machine: StateMachine,
    listeners: BTreeSet<PointerListener>,
    cursor_visible: bool,
    last_picked: Option<Color>,
    next_seq: u64,
    last_displayed_seq: Option<u64>,
}

impl PickerSession {
    pub fn new(tokens: PickerTokens) -> Self {
        Self {
            tokens,
            machine: StateMachine::new(),
            listeners: BTreeSet::new(),
            cursor_visible: false,
            last_picked: None,
            next_seq: 1,
            last_displayed_seq: None,
        }
    }

    pub fn state(&self) -> PickerState {
        self.machine.state()
    }

    pub fn is_enabled(&self) -> bool {
        self.machine.is_enabled()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn last_picked(&self) -> Option<Color> {
        self.last_picked
    }

    pub fn active_listeners(&self) -> &BTreeSet<PointerListener> {
        &self.listeners
    }

    /// Toggle between Disabled and Enabled. Enabling attaches the four
    /// pointer listeners; disabling detaches them and hides the cursor.
    pub fn toggle(&mut self) -> StateResult<PickerState> {
        let state = self.machine.toggle()?;
        match state {
            PickerState::Enabled => {
                self.listeners.extend(ALL_LISTENERS);
            }
            PickerState::Disabled => {
                self.listeners.clear();
                self.cursor_visible = false;
            }
        }
        tracing::info!(state = ?state, "picker toggled");
        Ok(state)
    }

    pub fn pointer_entered(&mut self) {
        if self.is_enabled() {
            self.cursor_visible = true;
        }
    }

    /// Visual only; the listeners stay attached.
    pub fn pointer_left(&mut self) {
        self.cursor_visible = false;
    }

    /// Samples the color under the pointer, extracts the neighborhood, and
    /// allocates the next render request. Returns `None` while disabled.
    pub fn pointer_moved(&mut self, surface: &Surface, point: SurfacePoint) -> Option<HoverUpdate> {
        if !self.is_enabled() {
            return None;
        }
        self.cursor_visible = true;

        let color = surface.color_at(point);
        let pixels = surface.neighborhood(point, self.tokens.zoom_view_radius);
        let seq = self.next_seq;
        self.next_seq += 1;

        Some(HoverUpdate {
            color,
            cursor_origin: SurfacePoint::new(
                point.x - self.tokens.cursor_radius,
                point.y - self.tokens.cursor_radius,
            ),
            request: RenderRequest::Zoom { seq, pixels },
        })
    }

    /// Samples and publishes the picked color. Side effect only; the
    /// activation state does not change.
    pub fn pointer_clicked(&mut self, surface: &Surface, point: SurfacePoint) -> Option<Color> {
        if !self.is_enabled() {
            return None;
        }
        let color = surface.color_at(point);
        self.last_picked = Some(color);
        tracing::info!(color = %color, x = point.x, y = point.y, "color picked");
        Some(color)
    }

    /// Stale-response filter: a zoom image older than one already shown is
    /// dropped; anything else is displayed on arrival.
    pub fn accept_zoom_image(&mut self, seq: u64) -> bool {
        if let Some(displayed) = self.last_displayed_seq {
            if seq < displayed {
                tracing::debug!(seq, displayed, "dropping stale zoom response");
                return false;
            }
        }
        self.last_displayed_seq = Some(seq);
        true
    }
}

impl Default for PickerSession {
    fn default() -> Self {
        Self::new(crate::ui::PICKER_TOKENS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PICKER_TOKENS;

    fn red_dot_surface() -> Surface {
        let mut image = image::RgbaImage::from_pixel(32, 32, image::Rgba([0, 0, 0, 255]));
        image.put_pixel(10, 10, image::Rgba([255, 0, 0, 255]));
        Surface::from_rgba_image(image).expect("surface")
    }

    fn enabled_session() -> PickerSession {
        let mut session = PickerSession::new(PICKER_TOKENS);
        session.toggle().expect("enable");
        session
    }

    #[test]
    fn toggle_cycle_leaves_the_listener_set_of_a_single_activation() {
        let mut once = PickerSession::new(PICKER_TOKENS);
        once.toggle().expect("enable");
        let single_activation = once.active_listeners().clone();
        assert_eq!(single_activation.len(), 4);

        let mut cycled = PickerSession::new(PICKER_TOKENS);
        cycled.toggle().expect("enable");
        cycled.toggle().expect("disable");
        assert!(cycled.active_listeners().is_empty());
        cycled.toggle().expect("re-enable");

        assert_eq!(cycled.active_listeners(), &single_activation);
    }

    #[test]
    fn disabling_hides_the_cursor_indicator() {
        let mut session = enabled_session();
        session.pointer_entered();
        assert!(session.cursor_visible());

        session.toggle().expect("disable");
        assert!(!session.cursor_visible());
    }

    #[test]
    fn pointer_moves_are_ignored_while_disabled() {
        let mut session = PickerSession::new(PICKER_TOKENS);
        let surface = red_dot_surface();
        assert!(session
            .pointer_moved(&surface, SurfacePoint::new(10, 10))
            .is_none());
        assert!(session
            .pointer_clicked(&surface, SurfacePoint::new(10, 10))
            .is_none());
    }

    #[test]
    fn pointer_move_samples_color_and_builds_a_sequenced_request() {
        let mut session = enabled_session();
        let surface = red_dot_surface();

        let update = session
            .pointer_moved(&surface, SurfacePoint::new(10, 10))
            .expect("enabled session should sample");
        assert_eq!(update.color.to_hex(), "#ff0000");
        assert_eq!(
            update.cursor_origin,
            SurfacePoint::new(10 - PICKER_TOKENS.cursor_radius, 10 - PICKER_TOKENS.cursor_radius)
        );
        let RenderRequest::Zoom { seq, pixels } = update.request;
        assert_eq!(seq, 1);
        assert_eq!(pixels.len(), PICKER_TOKENS.neighborhood_byte_len());

        let update = session
            .pointer_moved(&surface, SurfacePoint::new(0, 0))
            .expect("second move");
        let RenderRequest::Zoom { seq, .. } = update.request;
        assert_eq!(seq, 2);
    }

    #[test]
    fn pointer_click_publishes_the_picked_color() {
        let mut session = enabled_session();
        let surface = red_dot_surface();

        let picked = session
            .pointer_clicked(&surface, SurfacePoint::new(10, 10))
            .expect("click while enabled");
        assert_eq!(picked.to_hex(), "#ff0000");
        assert_eq!(session.last_picked(), Some(picked));
        assert!(session.is_enabled());
    }

    #[test]
    fn pointer_leave_hides_the_cursor_but_keeps_listeners() {
        let mut session = enabled_session();
        session.pointer_entered();
        session.pointer_left();

        assert!(!session.cursor_visible());
        assert_eq!(session.active_listeners().len(), 4);
    }

    #[test]
    fn hover_request_round_trips_through_the_render_worker() {
        use crate::worker::{RenderResponse, RenderWorker};
        use image::GenericImageView;
        use std::time::Duration;

        let mut session = enabled_session();
        let surface = red_dot_surface();
        let worker = RenderWorker::spawn(PICKER_TOKENS).expect("worker should spawn");

        let update = session
            .pointer_moved(&surface, SurfacePoint::new(10, 10))
            .expect("hover update");
        worker.submit(update.request).expect("submit");

        let mut response = None;
        for _ in 0..500 {
            if let Some(delivered) = worker.try_recv().expect("poll") {
                response = Some(delivered);
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        match response.expect("worker should respond") {
            RenderResponse::Image { seq, png } => {
                assert!(session.accept_zoom_image(seq));
                let decoded = image::load_from_memory(&png).expect("png should decode");
                assert_eq!(decoded.width(), PICKER_TOKENS.zoom_canvas_side());
            }
            RenderResponse::Failed { reason, .. } => {
                panic!("well-formed hover payload should render, got: {reason}")
            }
        }
    }

    #[test]
    fn zoom_responses_display_in_arrival_order_and_drop_stale_ones() {
        let mut session = enabled_session();

        // In-order arrival: everything displays.
        assert!(session.accept_zoom_image(1));
        assert!(session.accept_zoom_image(2));

        // A response older than one already displayed is stale.
        assert!(!session.accept_zoom_image(1));
        assert!(session.accept_zoom_image(2));
        assert!(session.accept_zoom_image(5));
    }
}
