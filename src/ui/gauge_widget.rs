//! The speedometer gauge widget: GTK adapter around the pure gauge model.

use gtk4::prelude::*;
use gtk4::DrawingArea;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use speedo_types::{
    resolve_square, Gauge, GaugeAnimation, GaugeConfig, GaugeError, GaugeSnapshot, SizeSpec,
    SpeedZone,
};

use crate::core::register_animation;
use crate::ui::dial_display::render_dial;

/// Minimum size request for the drawing area (gauges look best square).
const MIN_SIZE: i32 = 200;

/// An animation plan pinned to the wall-clock instant it started.
struct RunningAnimation {
    plan: GaugeAnimation,
    started: Instant,
}

impl RunningAnimation {
    /// Normalized progress; 1.0 or more means both tweens are done.
    fn progress(&self) -> f64 {
        self.started.elapsed().as_secs_f64() / self.plan.duration().as_secs_f64()
    }
}

struct GaugeData {
    gauge: Gauge,
    animation: Option<RunningAnimation>,
}

/// A speedometer gauge widget.
///
/// Owns a `DrawingArea` that renders the dial squared and centered inside
/// whatever the host allocates. Speed changes go through the three public
/// operations: two immediate, one animated. Animated changes are mutually
/// exclusive; a request made while one is in flight is dropped.
pub struct GaugeWidget {
    area: DrawingArea,
    data: Rc<RefCell<GaugeData>>,
}

impl GaugeWidget {
    /// Build a widget from gauge configuration.
    ///
    /// Fails when the configured speed does not fit the dial; the error is
    /// the host's to handle, a gauge never exists in an invalid state.
    pub fn new(config: &GaugeConfig) -> Result<Self, GaugeError> {
        let gauge = Gauge::new(config)?;
        let data = Rc::new(RefCell::new(GaugeData {
            gauge,
            animation: None,
        }));

        let area = DrawingArea::new();
        area.set_size_request(MIN_SIZE, MIN_SIZE);
        area.set_hexpand(true);
        area.set_vexpand(true);

        let draw_data = data.clone();
        area.set_draw_func(move |_, cr, width, height| {
            let data = draw_data.borrow();
            let side = resolve_square(SizeSpec::Exactly(width), SizeSpec::Exactly(height)) as f64;
            cr.save().ok();
            cr.translate((width as f64 - side) / 2.0, (height as f64 - side) / 2.0);
            if let Err(e) = render_dial(cr, &data.gauge, side) {
                log::warn!("dial render failed: {e}");
            }
            cr.restore().ok();
        });

        // Per-frame animation tick: sample both tweens, write the frame
        // back into the gauge, finish once progress passes 1.
        let tick_data = data.clone();
        register_animation(area.downgrade(), move || {
            let mut data = tick_data.borrow_mut();
            let data = &mut *data;
            let Some(running) = data.animation.as_ref() else {
                return false;
            };
            let t = running.progress();
            let (speed, color) = running.plan.sample(t);
            data.gauge.apply_frame(speed, color);
            if t >= 1.0 {
                data.animation = None;
            }
            true
        });

        Ok(Self { area, data })
    }

    /// The underlying GTK widget, for packing into a container.
    pub fn widget(&self) -> &DrawingArea {
        &self.area
    }

    pub fn speed(&self) -> f64 {
        self.data.borrow().gauge.speed()
    }

    pub fn zone(&self) -> SpeedZone {
        self.data.borrow().gauge.zone()
    }

    /// True while a needle/color tween is in flight.
    pub fn animation_active(&self) -> bool {
        self.data.borrow().animation.is_some()
    }

    /// Set the speed immediately. Out-of-range values are ignored; zone
    /// and color stay as they are.
    pub fn set_speed(&self, value: f64) {
        self.data.borrow_mut().gauge.set_speed(value);
        self.area.queue_draw();
    }

    /// Change the speed by a delta immediately. Same policy as
    /// [`GaugeWidget::set_speed`].
    pub fn adjust_by_delta(&self, delta: f64) {
        self.data.borrow_mut().gauge.adjust_by_delta(delta);
        self.area.queue_draw();
    }

    /// Change the speed by a delta with the combined needle/color tween.
    ///
    /// Dropped outright while an animation is active; a silent no-op when
    /// the target would leave the dial.
    pub fn adjust_by_delta_animated(&self, delta: f64) {
        let mut data = self.data.borrow_mut();
        if data.animation.is_some() {
            log::debug!("animated adjust dropped: animation already running");
            return;
        }
        if let Some(plan) = data.gauge.animate_by_delta(delta) {
            log::debug!(
                "animating to {} over {:?}",
                plan.target_speed(),
                plan.duration()
            );
            data.animation = Some(RunningAnimation {
                plan,
                started: Instant::now(),
            });
        }
    }

    /// Snapshot current state, folding in the host's opaque blob.
    pub fn save_state(&self, super_state: Value) -> GaugeSnapshot {
        self.data.borrow().gauge.save_state(super_state)
    }

    /// Restore from a snapshot value. Returns the host's opaque blob, or
    /// the input unchanged when it is not a snapshot.
    pub fn restore_state(&self, state: Value) -> Value {
        let out = self.data.borrow_mut().gauge.restore_state(state);
        self.area.queue_draw();
        out
    }
}
