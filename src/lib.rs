//! # pagemark
//!
//! Headless annotation capture engine for document viewers.
//!
//! The host renders pages, owns input and layout, and mirrors its element
//! tree into a [`ViewTree`]; pagemark turns the host's pointer and
//! text-selection interactions into persisted annotation records and their
//! live SVG previews:
//!
//! ```text
//! host events → Annotator::dispatch → capture machines
//!                                       ├─ locate surface (ViewTree)
//!                                       ├─ resolve offset (ancestor walk)
//!                                       ├─ commit record  (AnnotationStore)
//!                                       └─ insert graphic (ElementRenderer)
//! ```
//!
//! Everything is single-threaded and event-driven: each handler completes
//! synchronously inside one `dispatch` call, and the engine holds no state
//! between events beyond the in-flight gesture.
//!
//! ## Modules
//!
//! - [`types`] - Geometry primitives (Point, Rect, Offset) and color tokens
//! - [`annotation`] - Persisted annotation records and their wire format
//! - [`view`] - Surface lookup, offset resolution, overlay graphics
//! - [`events`] - Pointer events and the handler registry
//! - [`selection`] - Reading the host's text selection
//! - [`capture`] - The pen and markup state machines
//! - [`render`] - Renderer collaborators (stock SVG renderer included)
//! - [`store`] - Persistence collaborators (in-memory store included)
//! - [`annotator`] - Mode controller and public API

pub mod annotation;
pub mod annotator;
pub mod capture;
pub mod events;
pub mod render;
pub mod selection;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used items
pub use annotation::{Annotation, Drawing, Markup, MarkupKind};
pub use annotator::Annotator;
pub use capture::PenSettings;
pub use events::{Dispatcher, HandlerId, Modifiers, PointerEvent, PointerPhase};
pub use render::{ElementRenderer, SvgRenderer};
pub use selection::{NoSelection, SelectionError, SelectionSnapshot, SelectionSource};
pub use store::{AnnotationStore, MemoryStore, StoredAnnotation};
pub use types::{HIGHLIGHT_COLOR, Offset, PEN_COLOR, Point, Rect, STRIKEOUT_COLOR};
pub use view::{GraphicId, NodeId, SurfaceInfo, ViewTree};
