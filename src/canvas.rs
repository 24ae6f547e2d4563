//! The canvas - one design surface with its view state and input handling.
//!
//! [`Canvas`] owns the document, the view state, the active mouse-handler
//! session and the drag auto-scroll driver. The host feeds it pointer, wheel
//! and animation-frame events and draws the overlays it returns.
//!
//! Pointer handling lives in [`crate::input`] as further `impl Canvas`
//! blocks; this file holds construction, lifecycle and view-level actions.

use tracing::{debug, info, warn};

use crate::autoscroll::DragScroll;
use crate::config::CanvasConfig;
use crate::document::{Document, ObjectId};
use crate::error::CanvasResult;
use crate::geometry::{BoundingRectBuilder, Point, Rect};
use crate::hit_test::HitTester;
use crate::input::{DoubleClickTracker, HandlerKind, HandlerSession, NewTargetRequest, ResizeHandle};
use crate::input::resize::resize_handles;
use crate::overlay::Overlay;
use crate::perf::ScopedTimer;
use crate::view_state::{MoveDirection, ViewState};

/// Everything a mouse handler may read or change.
pub struct EditorContext {
    pub document: Document,
    pub view: ViewState,
    pub config: CanvasConfig,
    pub(crate) hits: HitTester,
}

/// Follow-up actions the host performs after a pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Double click on the only selected object
    Open(ObjectId),
    /// Double click on empty canvas reset the view
    ViewReset,
    /// Secondary click; the selection already reflects what the menu targets
    ContextMenu { client: Point, page: Point },
    /// Connection dropped on empty canvas
    ConnectToNewTarget(NewTargetRequest),
}

pub struct Canvas {
    pub(crate) ctx: EditorContext,
    pub(crate) handler: Option<HandlerSession>,
    pub(crate) drag_scroll: DragScroll,
    pub(crate) clicks: DoubleClickTracker,
    /// Last pointer position in client space
    pub(crate) last_pointer: Point,
    /// Last non-zero pointer movement
    pub(crate) last_movement: Point,
    pub(crate) wheel_accumulator: f64,
    pub(crate) pan_tool: bool,
    mounted: bool,
}

impl Canvas {
    pub fn new(document: Document, config: CanvasConfig) -> CanvasResult<Self> {
        config.validate()?;

        Ok(Self {
            drag_scroll: DragScroll::from_config(&config),
            clicks: DoubleClickTracker::from_config(&config),
            ctx: EditorContext {
                document,
                view: ViewState::new(),
                hits: HitTester::new(config.port_hit_radius),
                config,
            },
            handler: None,
            last_pointer: Point::ZERO,
            last_movement: Point::ZERO,
            wheel_accumulator: 0.0,
            pan_tool: false,
            mounted: false,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn document(&self) -> &Document {
        &self.ctx.document
    }

    /// Direct document access. Changing objects while a gesture is active
    /// leaves that gesture working from stale positions.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.ctx.document
    }

    pub fn view(&self) -> &ViewState {
        &self.ctx.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.ctx.view
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.ctx.config
    }

    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    pub fn active_handler(&self) -> Option<HandlerKind> {
        self.handler.as_ref().map(HandlerSession::kind)
    }

    pub fn cursor(&self) -> &'static str {
        match &self.handler {
            Some(session) => session.cursor(),
            None if self.pan_tool => "grab",
            None => "default",
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub fn mount(&mut self, client_rect: Rect) {
        self.mounted = true;
        self.set_client_rect(client_rect);
        info!(?client_rect, "Canvas mounted");
    }

    /// Finishes any gesture, stops auto-scroll and closes open transactions.
    pub fn unmount(&mut self) {
        if let Some(mut session) = self.handler.take() {
            debug!(handler = ?session.kind(), "Cancelling handler on unmount");
            session.up(&mut self.ctx, true);
        }
        self.drag_scroll.stop();
        self.clicks.reset();

        if self.ctx.document.in_transaction() {
            warn!("Closing undo transaction left open at unmount");
            self.ctx.document.close_transactions();
        }

        self.mounted = false;
        info!("Canvas unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn set_client_rect(&mut self, client_rect: Rect) {
        let transform = self.ctx.view.transform().with_client_rect(client_rect);
        self.ctx.view.set_transform(transform);
    }

    pub fn set_pan_tool(&mut self, enabled: bool) {
        self.pan_tool = enabled;
    }

    // ========================================================================
    // Animation frames
    // ========================================================================

    /// The host should keep calling [`Canvas::animation_frame`] while this
    /// is true.
    pub fn wants_animation_frames(&self) -> bool {
        self.mounted && self.handler.is_some() && self.drag_scroll.is_active()
    }

    /// Runs one auto-scroll step. Returns `true` when the view moved.
    pub fn animation_frame(&mut self, now_ms: f64) -> bool {
        if !self.wants_animation_frames() {
            return false;
        }

        let _timer = ScopedTimer::frame("animation_frame");
        let old = self.ctx.view.transform();
        let delta = self
            .drag_scroll
            .tick(now_ms, self.last_pointer, self.last_movement, &old.client_rect);
        if delta == Point::ZERO {
            return false;
        }

        self.ctx.view.set_transform(old.translated(delta));
        if let Some(session) = self.handler.as_mut() {
            session.on_transform_changed(&mut self.ctx, &old, now_ms);
        }
        true
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    /// Feedback to draw this frame, in offset space.
    pub fn overlays(&self) -> Vec<Overlay> {
        let mut overlays = match &self.handler {
            Some(session) => session.overlays(&self.ctx),
            None => Vec::new(),
        };

        let show_handles = self
            .active_handler()
            .is_none_or(|kind| kind == HandlerKind::Resize);
        if show_handles {
            let handles: Vec<Rect> = self.resize_handle_rects().into_iter().map(|(_, rect)| rect).collect();
            if !handles.is_empty() {
                overlays.push(Overlay::ResizeHandles(handles));
            }
        }

        overlays
    }

    /// Offset-space rect of the object that shows resize handles: the only
    /// selected object, when it can move.
    pub(crate) fn resize_target_rect(&self) -> Option<Rect> {
        let [id] = self.ctx.view.selected_objects() else {
            return None;
        };
        let object = self.ctx.document.object(*id)?;
        if !object.is_moveable() {
            return None;
        }
        let rect = self.ctx.document.absolute_rect(*id)?;
        Some(self.ctx.view.transform().page_to_offset_rect(rect))
    }

    pub fn resize_handle_rects(&self) -> Vec<(ResizeHandle, Rect)> {
        self.resize_target_rect()
            .map(|target| resize_handles(&target, self.ctx.config.resize_handle_size))
            .unwrap_or_default()
    }

    // ========================================================================
    // View actions
    // ========================================================================

    /// Bounding rect of the top-level objects, or an empty rect at the origin.
    pub fn page_rect(&self) -> Rect {
        let mut builder = BoundingRectBuilder::new();
        for object in self.ctx.document.children(None) {
            builder.add_rect(&object.rect);
        }
        builder.rect().unwrap_or_default()
    }

    pub fn reset_transform(&mut self) {
        let page_rect = self.page_rect();
        self.ctx.view.reset_transform(&page_rect);
    }

    pub fn move_selection(&mut self, direction: MoveDirection) -> CanvasResult<()> {
        let ctx = &mut self.ctx;
        ctx.view.move_selection(&mut ctx.document, direction)
    }

    /// Ignored while a gesture is active.
    pub fn undo(&mut self) -> bool {
        if self.handler.is_some() {
            return false;
        }
        let undone = self.ctx.document.undo();
        self.ctx.view.prune_selection(&self.ctx.document);
        undone
    }

    /// Ignored while a gesture is active.
    pub fn redo(&mut self) -> bool {
        if self.handler.is_some() {
            return false;
        }
        let redone = self.ctx.document.redo();
        self.ctx.view.prune_selection(&self.ctx.document);
        redone
    }
}
