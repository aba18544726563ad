//! Frame-clock driven animation ticking.
//!
//! Animated widgets register a tick closure that advances their animation
//! state and reports whether a redraw is needed. All closures are driven
//! from a single GTK frame-clock callback attached to the first live
//! registered widget, so state updates and `queue_draw()` calls line up
//! with the display's refresh rate instead of a free-running timer.
//!
//! GTK removes a tick callback silently when its widget is destroyed; a
//! dead clock source is re-attached on the next registration.

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::DrawingArea;
use std::cell::{Cell, RefCell};

thread_local! {
    // GTK work happens on the main thread only, so the registry is
    // thread-local rather than a global static.
    static ANIMATION_MANAGER: AnimationManager = AnimationManager::new();
}

/// Register an animated widget with its tick callback.
///
/// The tick function runs once per display frame while the widget is
/// mapped and returns `true` when the widget needs a redraw. The entry is
/// dropped automatically once the widget is destroyed.
pub fn register_animation<F>(widget_weak: glib::WeakRef<DrawingArea>, tick_fn: F)
where
    F: Fn() -> bool + 'static,
{
    ANIMATION_MANAGER.with(|manager| manager.register(widget_weak, tick_fn));
}

struct AnimationEntry {
    widget_weak: glib::WeakRef<DrawingArea>,
    /// Animation tick function. Returns true if the widget needs a redraw.
    tick_fn: Box<dyn Fn() -> bool>,
}

struct AnimationManager {
    entries: RefCell<Vec<AnimationEntry>>,
    /// Generation of the currently attached frame-clock callback. Bumped
    /// on every attach; a stale callback sees the mismatch and stops.
    clock_generation: Cell<u64>,
    clock_attached: Cell<bool>,
    clock_source: RefCell<Option<glib::WeakRef<DrawingArea>>>,
}

impl AnimationManager {
    fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            clock_generation: Cell::new(0),
            clock_attached: Cell::new(false),
            clock_source: RefCell::new(None),
        }
    }

    fn register<F>(&self, widget_weak: glib::WeakRef<DrawingArea>, tick_fn: F)
    where
        F: Fn() -> bool + 'static,
    {
        self.entries.borrow_mut().push(AnimationEntry {
            widget_weak,
            tick_fn: Box::new(tick_fn),
        });
        self.ensure_clock();
    }

    fn clock_source_alive(&self) -> bool {
        self.clock_source
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade())
            .is_some()
    }

    /// Attach the frame-clock callback to a live registered widget.
    fn ensure_clock(&self) {
        if self.clock_attached.get() && self.clock_source_alive() {
            return;
        }

        let widget = {
            let entries = self.entries.borrow();
            let Some(widget) = entries.iter().find_map(|entry| entry.widget_weak.upgrade())
            else {
                return;
            };
            widget
        };

        let generation = self.clock_generation.get() + 1;
        self.clock_generation.set(generation);
        *self.clock_source.borrow_mut() = Some(widget.downgrade());
        self.clock_attached.set(true);
        log::debug!("animation manager: attached to frame clock (gen {generation})");

        widget.add_tick_callback(move |_widget, _frame_clock| {
            ANIMATION_MANAGER.with(|manager| {
                if manager.clock_generation.get() != generation {
                    return glib::ControlFlow::Break;
                }
                manager.tick();
                if manager.entries.borrow().is_empty() {
                    manager.clock_attached.set(false);
                    glib::ControlFlow::Break
                } else {
                    glib::ControlFlow::Continue
                }
            })
        });
    }

    /// Process one frame for every registered widget, dropping entries
    /// whose widget is gone.
    fn tick(&self) {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|entry| {
            let Some(widget) = entry.widget_weak.upgrade() else {
                return false;
            };
            // Invisible widgets keep their entry but skip the frame.
            if !widget.is_mapped() {
                return true;
            }
            if (entry.tick_fn)() {
                widget.queue_draw();
            }
            true
        });
    }
}
