//! Leptos Reorder
//!
//! Drag-to-reorder for vertical lists using pointer events.
//! The placeholder follows the floating Item by continuous midpoint
//! comparison; the owning view applies the reported order to its data
//! and re-renders, so the DOM is never permuted behind Leptos' back.

mod session;

pub use session::{apply_order, layout, DragSession, Row, Span};

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Attribute marking the direct children of a container that take part in reordering
pub const ITEM_ATTR: &str = "data-reorder-item";

/// Class carried by the dropped Item for `animation_ms` after a drop
pub const SETTLING_CLASS: &str = "reorder-settling";

/// Form controls that keep their own pointer behaviour outside of a handle
const INTERACTIVE_SELECTOR: &str = "input, textarea, select, button, a";

/// Reorder configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ReorderOptions {
    /// Only presses inside an element matching this selector start a drag
    pub handle_selector: Option<String>,
    pub animation_ms: u32,
    /// Class added to the floating Item
    pub dragging_class: String,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self {
            handle_selector: None,
            animation_ms: 150,
            dragging_class: "dragging".to_string(),
        }
    }
}

/// Where the floating Item sits inside its container when detached
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Detached {
    top: f64,
    left: f64,
    width: f64,
    height: f64,
}

/// Reactive reorder state for one list
#[derive(Clone, Copy)]
pub struct Reorder {
    session: StoredValue<Option<DragSession>>,
    options: StoredValue<ReorderOptions>,
    on_reordered: Callback<Vec<usize>>,
    /// Index of the Item being dragged
    pub dragging_read: ReadSignal<Option<usize>>,
    dragging_write: WriteSignal<Option<usize>>,
    /// Placeholder slot among the non-dragged Items
    slot_read: ReadSignal<usize>,
    slot_write: WriteSignal<usize>,
    offset_read: ReadSignal<f64>,
    offset_write: WriteSignal<f64>,
    detached_read: ReadSignal<Detached>,
    detached_write: WriteSignal<Detached>,
    /// Index (in the new order) of the Item that was just dropped
    pub settling_read: ReadSignal<Option<usize>>,
    settling_write: WriteSignal<Option<usize>>,
}

/// Create reorder state and bind the window pointer listeners.
///
/// `on_reordered` receives the final order as drag-start indices after
/// every completed drag, including drops that changed nothing.
pub fn use_reorder(options: ReorderOptions, on_reordered: Callback<Vec<usize>>) -> Reorder {
    let (dragging_read, dragging_write) = signal(None::<usize>);
    let (slot_read, slot_write) = signal(0usize);
    let (offset_read, offset_write) = signal(0f64);
    let (detached_read, detached_write) = signal(Detached::default());
    let (settling_read, settling_write) = signal(None::<usize>);

    let reorder = Reorder {
        session: StoredValue::new(None),
        options: StoredValue::new(options),
        on_reordered,
        dragging_read,
        dragging_write,
        slot_read,
        slot_write,
        offset_read,
        offset_write,
        detached_read,
        detached_write,
        settling_read,
        settling_write,
    };

    let on_move = window_event_listener(ev::pointermove, move |ev: web_sys::PointerEvent| {
        reorder.drag_move(ev.client_y() as f64);
    });
    let on_up = window_event_listener(ev::pointerup, move |_ev: web_sys::PointerEvent| {
        reorder.drag_end();
    });
    let on_cancel = window_event_listener(ev::pointercancel, move |_ev: web_sys::PointerEvent| {
        reorder.drag_end();
    });
    on_cleanup(move || {
        on_move.remove();
        on_up.remove();
        on_cancel.remove();
    });

    reorder
}

impl Reorder {
    pub fn is_dragging(&self) -> bool {
        self.session.try_with_value(|s| s.is_some()).unwrap_or(false)
    }

    /// Rows to render for a list of `len` Items (tracks drag state)
    pub fn rows(&self, len: usize) -> Vec<Row> {
        self.dragging_read.track();
        self.slot_read.track();
        self.session
            .try_with_value(|s| layout(len, s.as_ref()))
            .unwrap_or_else(|| layout(len, None))
    }

    /// Pointer-down handler for each Item element
    pub fn on_pointerdown(self) -> impl Fn(web_sys::PointerEvent) + Copy + 'static {
        move |ev: web_sys::PointerEvent| self.drag_start(&ev)
    }

    /// Class list for the Item at drag-start index `index`
    pub fn item_class(&self, index: usize) -> String {
        let mut c = String::from("reorder-item");
        if self.dragging_read.get() == Some(index) {
            c.push(' ');
            self.options.with_value(|o| c.push_str(&o.dragging_class));
        }
        if self.settling_read.get() == Some(index) {
            c.push(' ');
            c.push_str(SETTLING_CLASS);
        }
        c
    }

    /// Inline style for the Item at `index`; only the floating Item gets one
    pub fn item_style(&self, index: usize) -> String {
        if self.dragging_read.get() != Some(index) {
            return String::new();
        }
        let d = self.detached_read.get();
        format!(
            "position:absolute;top:{}px;left:{}px;width:{}px;transform:translateY({}px);z-index:10;pointer-events:none;",
            d.top,
            d.left,
            d.width,
            self.offset_read.get()
        )
    }

    pub fn placeholder_style(&self) -> String {
        let ms = self.options.with_value(|o| o.animation_ms);
        format!(
            "height:{}px;transition:height {}ms ease;",
            self.detached_read.get().height,
            ms
        )
    }

    fn drag_start(&self, ev: &web_sys::PointerEvent) {
        if ev.button() != 0 || self.is_dragging() {
            return;
        }
        let Some(item) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            return;
        };
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };
        if !self.pressed_on_handle(&item, &target) {
            return;
        }
        let Some(container) = item.parent_element() else {
            return;
        };

        // Measure every sibling now; the DOM index is the backing-array index.
        let item_el: &web_sys::Element = item.as_ref();
        let children = container.children();
        let mut spans = Vec::new();
        let mut index = None;
        for i in 0..children.length() {
            let Some(child) = children.item(i) else { continue };
            if !child.has_attribute(ITEM_ATTR) {
                continue;
            }
            if child == *item_el {
                index = Some(spans.len());
            }
            let rect = child.get_bounding_client_rect();
            spans.push(Span::new(rect.top(), rect.height()));
        }
        let Some(index) = index else { return };
        let Some(session) = DragSession::begin(index, spans, ev.client_y() as f64) else {
            return;
        };

        ev.prevent_default();
        let span = session.dragged_span();
        log::debug!("reorder: start index={} of {}", index, session.len());

        self.detached_write.set(Detached {
            top: item.offset_top() as f64,
            left: item.offset_left() as f64,
            width: item.offset_width() as f64,
            height: span.height,
        });
        self.offset_write.set(0.0);
        self.slot_write.set(session.slot());
        self.settling_write.set(None);
        self.session.set_value(Some(session));
        self.dragging_write.set(Some(index));
    }

    fn pressed_on_handle(&self, item: &web_sys::HtmlElement, target: &web_sys::Element) -> bool {
        let handle_selector = self.options.with_value(|o| o.handle_selector.clone());
        match handle_selector {
            Some(selector) => match target.closest(&selector) {
                Ok(Some(handle)) => item.contains(Some(handle.as_ref())),
                _ => false,
            },
            None => match target.closest(INTERACTIVE_SELECTOR) {
                Ok(Some(control)) => !item.contains(Some(control.as_ref())),
                _ => true,
            },
        }
    }

    fn drag_move(&self, pointer_y: f64) {
        let Some(moved) = self.session.try_update_value(|s| {
            s.as_mut().map(|session| {
                let changed = session.update(pointer_y);
                (changed, session.slot(), session.offset_y())
            })
        }) else {
            return;
        };
        let Some((changed, slot, offset)) = moved else {
            return;
        };
        self.offset_write.set(offset);
        if changed {
            self.slot_write.set(slot);
        }
    }

    fn drag_end(&self) {
        let Some(Some(session)) = self.session.try_update_value(|s| s.take()) else {
            return;
        };
        let slot = session.slot();
        let order = session.finish();
        log::debug!("reorder: drop at slot {} -> {:?}", slot, order);

        self.dragging_write.set(None);
        self.offset_write.set(0.0);
        self.settling_write.set(Some(slot));
        self.clear_settling_later();
        self.on_reordered.run(order);
    }

    fn clear_settling_later(&self) {
        let ms = self.options.with_value(|o| o.animation_ms);
        if let Some(win) = web_sys::window() {
            let clear = self.settling_write;
            let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
                clear.try_set(None);
            });
            let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                ms as i32,
            );
        }
    }
}
