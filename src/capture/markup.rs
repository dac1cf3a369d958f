//! Markup Capture - Selection-driven highlight/strikeout machine
//!
//! Armed is the steady state: one release handler stays registered while the
//! mode is enabled. Every release checks the host selection; anything short
//! of a committable selection (no selection, a failed query, only degenerate
//! rectangles, no surface under the anchor) is a silent no-op and the machine
//! stays armed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, trace};

use crate::annotation::{Markup, MarkupKind};
use crate::events::HandlerId;
use crate::types::{Offset, Rect};

use super::EngineCtx;

/// Handler attached by [`arm`]; [`disarm`] removes exactly this.
pub(crate) struct MarkupBinding {
    release: HandlerId,
}

/// Attach the release handler for rect mode.
///
/// `kind` and `color` stay shared with the mode controller so switching the
/// armed kind or the color override never re-attaches the handler.
pub(crate) fn arm(
    ctx: &EngineCtx,
    kind: Rc<Cell<MarkupKind>>,
    color: Rc<RefCell<Option<String>>>,
) -> MarkupBinding {
    debug!("markup mode armed ({})", kind.get().as_str());

    let release = {
        let ctx = ctx.clone();
        ctx.events.clone().on_release(move |_event| {
            capture_selection(&ctx, kind.get(), color.borrow().as_deref());
        })
    };

    MarkupBinding { release }
}

/// Detach what [`arm`] attached.
pub(crate) fn disarm(ctx: &EngineCtx, binding: MarkupBinding) {
    ctx.events.remove(binding.release);
    debug!("markup mode disarmed");
}

fn capture_selection(ctx: &EngineCtx, kind: MarkupKind, explicit_color: Option<&str>) {
    let snapshot = match ctx.selection.current() {
        Ok(Some(snapshot)) if !snapshot.is_empty() => snapshot,
        Ok(_) => {
            trace!("release with no active selection");
            return;
        }
        Err(err) => {
            // Hosts throw on empty/invalid ranges; same outcome as no selection.
            debug!("selection query failed: {err}");
            return;
        }
    };

    let mut view = ctx.view.borrow_mut();
    let Some(surface) = view.surface_at(snapshot.anchor.x, snapshot.anchor.y) else {
        debug!("selection anchor outside any surface");
        return;
    };

    let offset = view.resolve_offset(surface);
    let rectangles = selection_rectangles(kind, &snapshot.rects, offset);
    if rectangles.is_empty() {
        debug!("selection produced no usable rectangles");
        return;
    }

    let color = explicit_color
        .map(str::to_owned)
        .unwrap_or_else(|| kind.default_color().to_owned());
    let markup = Markup { color, rectangles };

    let Some(info) = view.surface_info(surface).cloned() else {
        return;
    };
    ctx.store
        .borrow_mut()
        .add_annotation(&info.document, info.page, kind.annotation(markup.clone()));

    let elements = match kind {
        MarkupKind::Strikeout => ctx.renderer.render_line(&markup),
        MarkupKind::Highlight => ctx.renderer.render_rect(&markup),
    };
    debug!(
        "committed {} with {} rectangles to page {} of {}",
        kind.as_str(),
        markup.rectangles.len(),
        info.page,
        info.document
    );
    for element in elements {
        view.append_graphic(surface, element);
    }
}

/// Convert raw viewport-space line-fragment rects into surface-local
/// annotation rectangles.
///
/// Strikeout drops each rectangle by half its height so the line sits
/// mid-text; highlight keeps the raw top. Degenerate rectangles are dropped.
pub(crate) fn selection_rectangles(kind: MarkupKind, rects: &[Rect], offset: Offset) -> Vec<Rect> {
    rects
        .iter()
        .filter_map(|rect| {
            let shift = match kind {
                MarkupKind::Strikeout => rect.height / 2.0,
                MarkupKind::Highlight => 0.0,
            };
            let local = Rect::new(
                rect.x - offset.left,
                rect.y + shift - offset.top,
                rect.width,
                rect.height,
            );
            local.is_positive().then_some(local)
        })
        .collect()
}
