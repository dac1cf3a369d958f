//! Annotator - Mode controller and public API
//!
//! One `Annotator` owns one dispatcher plus the mode state for pen and rect
//! capture. Enabling a mode attaches its handlers and stashes the removal
//! tokens; disabling removes exactly those tokens. Enabling twice without an
//! intervening disable is a logged no-op, so handlers are never attached
//! twice; disabling a mode that is not enabled does nothing.
//!
//! # Example
//!
//! ```ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use pagemark::{Annotator, MemoryStore, NoSelection, PointerEvent, Rect, SvgRenderer, ViewTree};
//!
//! let view = Rc::new(RefCell::new(ViewTree::new()));
//! let page = view.borrow_mut().push_surface(None, Rect::new(0.0, 0.0, 600.0, 800.0), "doc", 1);
//!
//! let mut annotator = Annotator::new(
//!     view,
//!     Rc::new(RefCell::new(MemoryStore::new())),
//!     Rc::new(SvgRenderer),
//!     Rc::new(NoSelection),
//! );
//! annotator.set_pen(2.0, "FF0000");
//! annotator.enable_pen();
//!
//! // Host event loop:
//! annotator.dispatch(&PointerEvent::press(10.0, 10.0));
//! annotator.dispatch(&PointerEvent::moved(20.0, 25.0));
//! annotator.dispatch(&PointerEvent::release(20.0, 25.0));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;

use crate::annotation::MarkupKind;
use crate::capture::markup::MarkupBinding;
use crate::capture::pen::{PenBinding, PenSettings};
use crate::capture::{self, EngineCtx};
use crate::events::{Dispatcher, PointerEvent};
use crate::render::ElementRenderer;
use crate::selection::SelectionSource;
use crate::store::AnnotationStore;
use crate::types::{PEN_COLOR, is_color_token, normalize_color};
use crate::view::ViewTree;

/// The engine's public surface: mode toggles plus the host event feed.
pub struct Annotator {
    ctx: EngineCtx,
    pen_settings: Rc<RefCell<PenSettings>>,
    markup_kind: Rc<Cell<MarkupKind>>,
    markup_color: Rc<RefCell<Option<String>>>,
    pen: Option<PenBinding>,
    markup: Option<MarkupBinding>,
}

impl Annotator {
    /// Build an engine over the host's view tree and collaborators.
    pub fn new(
        view: Rc<RefCell<ViewTree>>,
        store: Rc<RefCell<dyn AnnotationStore>>,
        renderer: Rc<dyn ElementRenderer>,
        selection: Rc<dyn SelectionSource>,
    ) -> Self {
        Self {
            ctx: EngineCtx {
                events: Rc::new(Dispatcher::new()),
                view,
                store,
                renderer,
                selection,
            },
            pen_settings: Rc::new(RefCell::new(PenSettings::default())),
            markup_kind: Rc::new(Cell::new(MarkupKind::Highlight)),
            markup_color: Rc::new(RefCell::new(None)),
            pen: None,
            markup: None,
        }
    }

    /// The shared view tree, for hosts that keep only the annotator around.
    pub fn view(&self) -> Rc<RefCell<ViewTree>> {
        Rc::clone(&self.ctx.view)
    }

    /// Feed one host pointer event through the engine.
    pub fn dispatch(&self, event: &PointerEvent) {
        self.ctx.events.dispatch(event);
    }

    // -------------------------------------------------------------------------
    // Pen mode
    // -------------------------------------------------------------------------

    /// Configure the pen for subsequent gestures.
    ///
    /// Non-positive widths and invalid color tokens fall back to the
    /// defaults (1.0, `"000000"`). A gesture already in flight keeps the
    /// settings it started with.
    pub fn set_pen(&self, width: f32, color: &str) {
        let mut pen = self.pen_settings.borrow_mut();
        pen.width = if width > 0.0 { width } else { 1.0 };
        pen.color = normalize_color(color, PEN_COLOR);
    }

    /// Arm pen mode. Safe to call repeatedly.
    pub fn enable_pen(&mut self) {
        if self.pen.is_some() {
            debug!("pen mode already enabled");
            return;
        }
        self.pen = Some(capture::pen::arm(&self.ctx, Rc::clone(&self.pen_settings)));
    }

    /// Disarm pen mode. A no-op when pen mode is not enabled.
    pub fn disable_pen(&mut self) {
        if let Some(binding) = self.pen.take() {
            capture::pen::disarm(&self.ctx, binding);
        }
    }

    pub fn pen_enabled(&self) -> bool {
        self.pen.is_some()
    }

    /// Whether the host should suppress native text selection right now.
    ///
    /// True while pen mode is armed, so native selection cannot fight the
    /// freehand capture.
    pub fn selection_suppressed(&self) -> bool {
        self.ctx.events.selection_suppressed()
    }

    // -------------------------------------------------------------------------
    // Rect (markup) mode
    // -------------------------------------------------------------------------

    /// Override the markup color, or `None` to use the per-kind default
    /// (highlight `"FFFF00"`, strikeout `"FF0000"`). Invalid tokens are
    /// ignored and leave the default in effect.
    pub fn set_markup_color(&self, color: Option<&str>) {
        *self.markup_color.borrow_mut() = match color {
            Some(token) if is_color_token(token) => {
                Some(token.trim().trim_start_matches('#').to_owned())
            }
            Some(token) => {
                debug!("ignoring invalid markup color token {token:?}");
                None
            }
            None => None,
        };
    }

    /// Arm rect mode for the given annotation kind. Safe to call repeatedly;
    /// re-enabling while armed switches the kind without re-attaching.
    pub fn enable_markup(&mut self, kind: MarkupKind) {
        self.markup_kind.set(kind);
        if self.markup.is_some() {
            debug!("markup mode already enabled, kind switched to {}", kind.as_str());
            return;
        }
        self.markup = Some(capture::markup::arm(
            &self.ctx,
            Rc::clone(&self.markup_kind),
            Rc::clone(&self.markup_color),
        ));
    }

    /// Disarm rect mode. A no-op when rect mode is not enabled.
    pub fn disable_markup(&mut self) {
        if let Some(binding) = self.markup.take() {
            capture::markup::disarm(&self.ctx, binding);
        }
    }

    pub fn markup_enabled(&self) -> bool {
        self.markup.is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================
