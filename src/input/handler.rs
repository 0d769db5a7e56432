use crate::{
    core::{
        bounds::Bounds, config::ZoomConfig, constants::SCALE_EPSILON, geo::Point,
        transform::{Transform, ViewportTransform},
    },
    input::{
        events::{Cursor, EventHandled, InputEvent, TouchPoint},
        gestures::{self, GestureState, PanSource},
    },
    Result,
};

/// Receives the transform whenever it changes
///
/// The controller never touches a rendering host directly; the DOM binding
/// writes `style.transform`, tests record the calls.
pub trait TransformSink {
    fn render(&mut self, transform: &Transform);

    fn set_cursor(&mut self, _cursor: Cursor) {}
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TransformSink for NullSink {
    fn render(&mut self, _transform: &Transform) {}
}

/// Zoom-and-pan controller for one preview element
///
/// Owns the viewport transform and the gesture in progress. Every event that
/// changes the visible transform produces exactly one `render` call.
pub struct TransformController<S: TransformSink = NullSink> {
    config: ZoomConfig,
    viewport: ViewportTransform,
    gesture: GestureState,
    sink: S,
}

impl TransformController<NullSink> {
    pub fn headless() -> Self {
        Self::new(NullSink)
    }
}

impl<S: TransformSink> TransformController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            config: ZoomConfig::default(),
            viewport: ViewportTransform::new(),
            gesture: GestureState::Idle,
            sink,
        }
    }

    pub fn with_config(config: ZoomConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let mut viewport = ViewportTransform::new();
        viewport.scale = config.min_scale;
        viewport.commit();
        Ok(Self {
            config,
            viewport,
            gesture: GestureState::Idle,
            sink,
        })
    }

    /// Feeds one input event through the controller
    pub fn handle_event(&mut self, event: &InputEvent) -> EventHandled {
        let before = self.viewport.current();

        let handled = match event {
            InputEvent::TouchStart { touches } if self.config.touch_enabled => {
                self.touch_start(touches)
            }
            InputEvent::TouchMove { touches } if self.config.touch_enabled => {
                self.touch_move(touches)
            }
            InputEvent::TouchEnd { touches } if self.config.touch_enabled => {
                self.touch_end(touches)
            }
            InputEvent::Wheel {
                delta_y,
                position,
                bounds,
            } if self.config.wheel_enabled => self.wheel(*delta_y, *position, bounds),
            InputEvent::MouseDown { position } if self.config.mouse_drag_enabled => {
                self.mouse_down(*position)
            }
            InputEvent::MouseMove { position } if self.config.mouse_drag_enabled => {
                self.pointer_move(*position)
            }
            InputEvent::MouseUp { .. } if self.config.mouse_drag_enabled => self.mouse_up(),
            _ => EventHandled::NotHandled,
        };

        self.render_if_changed(before);
        handled
    }

    /// Zooms by `delta` around `anchor`, an offset from the element center.
    /// This is what one wheel tick does; hosts use it for zoom buttons.
    pub fn zoom_by(&mut self, delta: f64, anchor: Point) -> bool {
        let before = self.viewport.current();
        let changed = self.zoom_around(self.viewport.scale + delta, anchor);
        self.render_if_changed(before);
        changed
    }

    /// Returns to the identity transform and abandons any gesture
    pub fn reset(&mut self) {
        let before = self.viewport.current();
        let was_mouse_pan = self.is_mouse_panning();
        self.viewport.reset();
        self.viewport.scale = self.config.min_scale;
        self.viewport.commit();
        self.gesture = GestureState::Idle;
        if was_mouse_pan {
            self.sink.set_cursor(Cursor::Grab);
        }
        log::debug!("preview transform reset");
        self.render_if_changed(before);
    }

    /// Replaces the configuration and re-clamps the current scale into the
    /// new limits
    pub fn set_config(&mut self, config: ZoomConfig) -> Result<()> {
        config.validate()?;
        let before = self.viewport.current();
        self.config = config;
        self.viewport.scale = self.config.clamp_scale(self.viewport.scale);
        self.viewport.last_scale = self.config.clamp_scale(self.viewport.last_scale);
        self.snap_pan_if_min_scale();
        self.render_if_changed(before);
        Ok(())
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// The transform currently shown
    pub fn transform(&self) -> Transform {
        self.viewport.current()
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Panning is only possible while zoomed in past the minimum
    pub fn can_pan(&self) -> bool {
        !self.config.is_min_scale(self.viewport.scale)
    }

    fn is_mouse_panning(&self) -> bool {
        matches!(
            self.gesture,
            GestureState::Panning {
                source: PanSource::Mouse,
                ..
            }
        )
    }

    fn touch_start(&mut self, touches: &[TouchPoint]) -> EventHandled {
        match touches.len() {
            2 => {
                self.begin_pinch(touches);
                EventHandled::Handled
            }
            1 if self.can_pan() => {
                self.gesture = GestureState::pan_from(
                    touches[0].position,
                    self.viewport.last_pan,
                    PanSource::Touch,
                );
                log::debug!("touch pan started at {:?}", touches[0].position);
                EventHandled::NotHandled
            }
            _ => EventHandled::NotHandled,
        }
    }

    fn begin_pinch(&mut self, touches: &[TouchPoint]) {
        let start_distance = gestures::touch_spread(touches).unwrap_or(0.0);
        self.viewport.last_scale = self.viewport.scale;
        self.gesture = GestureState::Pinching { start_distance };
        log::debug!(
            "pinch started: spread {:.1}px at scale {:.2}",
            start_distance,
            self.viewport.scale
        );
    }

    fn touch_move(&mut self, touches: &[TouchPoint]) -> EventHandled {
        match touches.len() {
            2 => {
                let GestureState::Pinching { start_distance } = self.gesture else {
                    // Two fingers arrived without a two-finger start (e.g. a
                    // third finger lifted): this sample becomes the baseline.
                    self.begin_pinch(touches);
                    return EventHandled::Handled;
                };
                let distance = gestures::touch_spread(touches).unwrap_or(0.0);
                match gestures::pinch_scale(self.viewport.last_scale, start_distance, distance) {
                    Some(scale) => {
                        self.viewport.scale = self.config.clamp_scale(scale);
                        self.snap_pan_if_min_scale();
                    }
                    None if gestures::is_usable_baseline(distance) => {
                        self.gesture = GestureState::Pinching {
                            start_distance: distance,
                        };
                    }
                    None => {}
                }
                EventHandled::Handled
            }
            1 if self.gesture.is_panning() && self.can_pan() => {
                self.pan_to(touches[0].position);
                EventHandled::Handled
            }
            _ => EventHandled::NotHandled,
        }
    }

    fn touch_end(&mut self, remaining: &[TouchPoint]) -> EventHandled {
        if remaining.len() >= 2 {
            return EventHandled::NotHandled;
        }
        if self.viewport.is_dirty() {
            log::debug!(
                "touch gesture committed: scale {:.2}, pan {:?}",
                self.viewport.scale,
                self.viewport.pan
            );
        }
        self.viewport.commit();
        self.gesture = GestureState::Idle;
        EventHandled::NotHandled
    }

    fn wheel(&mut self, delta_y: f64, position: Point, bounds: &Bounds) -> EventHandled {
        let step = if delta_y < 0.0 {
            self.config.wheel_step
        } else {
            -self.config.wheel_step
        };
        let anchor = bounds.offset_from_center(&position);
        self.zoom_around(self.viewport.scale + step, anchor);
        EventHandled::Handled
    }

    fn zoom_around(&mut self, target: f64, anchor: Point) -> bool {
        if !target.is_finite() || !anchor.is_finite() {
            return false;
        }
        let old_scale = self.viewport.scale;
        let new_scale = self.config.clamp_scale(target);
        if (new_scale - old_scale).abs() <= SCALE_EPSILON {
            return false;
        }

        self.viewport.pan = gestures::anchored_pan(self.viewport.pan, anchor, old_scale, new_scale);
        self.viewport.scale = new_scale;
        self.snap_pan_if_min_scale();
        self.viewport.commit();
        log::debug!(
            "wheel zoom {:.2} -> {:.2} anchored at {:?}",
            old_scale,
            new_scale,
            anchor
        );
        true
    }

    fn mouse_down(&mut self, position: Point) -> EventHandled {
        if !self.can_pan() {
            return EventHandled::NotHandled;
        }
        self.gesture = GestureState::pan_from(position, self.viewport.last_pan, PanSource::Mouse);
        self.sink.set_cursor(Cursor::Grabbing);
        log::debug!("mouse pan started at {:?}", position);
        EventHandled::Handled
    }

    fn pointer_move(&mut self, position: Point) -> EventHandled {
        if self.gesture.is_panning() && self.can_pan() {
            self.pan_to(position);
            EventHandled::Handled
        } else {
            EventHandled::NotHandled
        }
    }

    fn mouse_up(&mut self) -> EventHandled {
        if !self.gesture.is_panning() {
            return EventHandled::NotHandled;
        }
        let was_mouse_pan = self.is_mouse_panning();
        self.gesture = GestureState::Idle;
        self.viewport.commit_pan();
        if was_mouse_pan {
            self.sink.set_cursor(Cursor::Grab);
        }
        log::debug!("pan ended at {:?}", self.viewport.pan);
        EventHandled::Handled
    }

    fn pan_to(&mut self, pointer: Point) {
        if let GestureState::Panning { drag_start, .. } = self.gesture {
            self.viewport.pan = pointer.subtract(&drag_start);
        }
    }

    fn snap_pan_if_min_scale(&mut self) {
        if self.config.reset_pan_at_min_scale && self.config.is_min_scale(self.viewport.scale) {
            self.viewport.clear_pan();
        }
    }

    fn render_if_changed(&mut self, before: Transform) {
        let after = self.viewport.current();
        if after != before {
            self.sink.render(&after);
        }
    }
}

impl Default for TransformController<NullSink> {
    fn default() -> Self {
        Self::headless()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        renders: Vec<Transform>,
        cursors: Vec<Cursor>,
    }

    impl TransformSink for RecordingSink {
        fn render(&mut self, transform: &Transform) {
            self.renders.push(*transform);
        }

        fn set_cursor(&mut self, cursor: Cursor) {
            self.cursors.push(cursor);
        }
    }

    fn controller() -> TransformController<RecordingSink> {
        TransformController::new(RecordingSink::default())
    }

    fn touches(points: &[(f64, f64)]) -> Vec<TouchPoint> {
        points
            .iter()
            .enumerate()
            .map(|(id, (x, y))| TouchPoint::new(id as u64, Point::new(*x, *y)))
            .collect()
    }

    fn pinch(ctl: &mut TransformController<RecordingSink>, from: f64, to: f64) {
        ctl.handle_event(&InputEvent::TouchStart {
            touches: touches(&[(0.0, 0.0), (from, 0.0)]),
        });
        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(0.0, 0.0), (to, 0.0)]),
        });
        ctl.handle_event(&InputEvent::TouchEnd { touches: vec![] });
    }

    fn wheel(delta_y: f64, x: f64, y: f64) -> InputEvent {
        InputEvent::Wheel {
            delta_y,
            position: Point::new(x, y),
            bounds: Bounds::from_rect(0.0, 0.0, 200.0, 100.0),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_initial_state() {
        let ctl = TransformController::headless();
        assert_eq!(ctl.transform(), Transform::identity());
        assert!(ctl.gesture().is_idle());
        assert!(!ctl.can_pan());
    }

    #[test]
    fn test_pinch_doubles_scale() {
        let mut ctl = controller();
        ctl.handle_event(&InputEvent::TouchStart {
            touches: touches(&[(0.0, 0.0), (100.0, 0.0)]),
        });
        assert!(ctl.sink().renders.is_empty(), "pinch start must not render");

        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(0.0, 0.0), (200.0, 0.0)]),
        });
        assert!(approx(ctl.transform().scale, 2.0));
        assert_eq!(ctl.sink().renders.len(), 1);
    }

    #[test]
    fn test_pinch_is_clamped() {
        let mut ctl = controller();
        pinch(&mut ctl, 10.0, 1000.0);
        assert_eq!(ctl.transform().scale, 4.0);
        pinch(&mut ctl, 1000.0, 1.0);
        assert_eq!(ctl.transform().scale, 1.0);
    }

    #[test]
    fn test_pinch_from_zero_spread_is_guarded() {
        let mut ctl = controller();
        ctl.handle_event(&InputEvent::TouchStart {
            touches: touches(&[(40.0, 40.0), (40.0, 40.0)]),
        });
        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(40.0, 40.0), (140.0, 40.0)]),
        });
        assert_eq!(ctl.transform().scale, 1.0);
        assert!(ctl.sink().renders.is_empty());

        // The first non-zero spread became the baseline.
        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(40.0, 40.0), (240.0, 40.0)]),
        });
        assert!(approx(ctl.transform().scale, 2.0));
        assert!(ctl.transform().scale.is_finite());
    }

    #[test]
    fn test_pinch_without_start_uses_first_sample() {
        let mut ctl = controller();
        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(0.0, 0.0), (50.0, 0.0)]),
        });
        assert!(ctl.gesture().is_pinching());
        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(0.0, 0.0), (75.0, 0.0)]),
        });
        assert!(approx(ctl.transform().scale, 1.5));
    }

    #[test]
    fn test_wheel_up_at_center() {
        let mut ctl = controller();
        let handled = ctl.handle_event(&wheel(-100.0, 100.0, 50.0));
        assert!(handled.is_handled());
        assert!(approx(ctl.transform().scale, 1.1));
        assert_eq!(ctl.transform().pan, Point::origin());
        assert_eq!(ctl.sink().renders.len(), 1);
    }

    #[test]
    fn test_wheel_down_at_floor_is_noop() {
        let mut ctl = controller();
        let handled = ctl.handle_event(&wheel(100.0, 10.0, 10.0));
        assert!(handled.is_handled());
        assert_eq!(ctl.transform(), Transform::identity());
        assert!(ctl.sink().renders.is_empty());
    }

    #[test]
    fn test_wheel_stops_at_ceiling() {
        let mut ctl = controller();
        for _ in 0..40 {
            ctl.handle_event(&wheel(-1.0, 100.0, 50.0));
        }
        assert!(approx(ctl.transform().scale, 4.0));
        let renders = ctl.sink().renders.len();
        ctl.handle_event(&wheel(-1.0, 100.0, 50.0));
        assert_eq!(ctl.sink().renders.len(), renders);
    }

    #[test]
    fn test_wheel_commits_scale_and_pan() {
        let mut ctl = controller();
        ctl.handle_event(&wheel(-1.0, 180.0, 90.0));
        assert!(!ctl.viewport().is_dirty());
        assert_ne!(ctl.transform().pan, Point::origin());
    }

    #[test]
    fn test_touch_drag_gated_at_min_scale() {
        let mut ctl = controller();
        ctl.handle_event(&InputEvent::TouchStart {
            touches: touches(&[(50.0, 50.0)]),
        });
        assert!(!ctl.gesture().is_panning());
        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(90.0, 90.0)]),
        });
        assert_eq!(ctl.transform().pan, Point::origin());
        assert!(ctl.sink().renders.is_empty());
    }

    #[test]
    fn test_touch_drag_tracks_absolute_pan() {
        let mut ctl = controller();
        pinch(&mut ctl, 100.0, 200.0);
        ctl.viewport.pan = Point::new(10.0, 5.0);
        ctl.viewport.commit();

        ctl.handle_event(&InputEvent::TouchStart {
            touches: touches(&[(50.0, 50.0)]),
        });
        assert!(ctl.gesture().is_panning());
        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(70.0, 60.0)]),
        });
        assert_eq!(ctl.transform().pan, Point::new(30.0, 15.0));

        ctl.handle_event(&InputEvent::TouchEnd { touches: vec![] });
        assert!(ctl.gesture().is_idle());
        assert_eq!(ctl.viewport().last_pan, Point::new(30.0, 15.0));
    }

    #[test]
    fn test_lifting_one_pinch_finger_does_not_pan() {
        let mut ctl = controller();
        ctl.handle_event(&InputEvent::TouchStart {
            touches: touches(&[(0.0, 0.0), (100.0, 0.0)]),
        });
        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(0.0, 0.0), (300.0, 0.0)]),
        });
        ctl.handle_event(&InputEvent::TouchEnd {
            touches: touches(&[(0.0, 0.0)]),
        });
        assert!(approx(ctl.viewport().last_scale, 3.0));

        ctl.handle_event(&InputEvent::TouchMove {
            touches: touches(&[(25.0, 25.0)]),
        });
        assert_eq!(ctl.transform().pan, Point::origin());
    }

    #[test]
    fn test_mouse_drag_and_cursor() {
        let mut ctl = controller();
        ctl.handle_event(&wheel(-1.0, 100.0, 50.0));

        let down = ctl.handle_event(&InputEvent::MouseDown {
            position: Point::new(10.0, 10.0),
        });
        assert!(down.is_handled());
        ctl.handle_event(&InputEvent::MouseMove {
            position: Point::new(-500.0, 40.0),
        });
        assert_eq!(ctl.transform().pan, Point::new(-510.0, 30.0));

        ctl.handle_event(&InputEvent::MouseUp {
            position: Point::new(-500.0, 40.0),
        });
        assert!(ctl.gesture().is_idle());
        assert_eq!(ctl.viewport().last_pan, Point::new(-510.0, 30.0));
        assert_eq!(ctl.sink().cursors, vec![Cursor::Grabbing, Cursor::Grab]);

        let renders = ctl.sink().renders.len();
        ctl.handle_event(&InputEvent::MouseMove {
            position: Point::new(0.0, 0.0),
        });
        assert_eq!(ctl.sink().renders.len(), renders);
    }

    #[test]
    fn test_mouse_down_ignored_at_min_scale() {
        let mut ctl = controller();
        let handled = ctl.handle_event(&InputEvent::MouseDown {
            position: Point::new(10.0, 10.0),
        });
        assert!(!handled.is_handled());
        assert!(ctl.sink().cursors.is_empty());
        assert!(!ctl
            .handle_event(&InputEvent::MouseUp {
                position: Point::new(10.0, 10.0)
            })
            .is_handled());
    }

    #[test]
    fn test_pan_survives_zoom_out_by_default() {
        let mut ctl = controller();
        ctl.handle_event(&wheel(-1.0, 190.0, 90.0));
        let pan = ctl.transform().pan;
        assert_ne!(pan, Point::origin());

        ctl.handle_event(&wheel(1.0, 100.0, 50.0));
        assert!(approx(ctl.transform().scale, 1.0));
        assert_ne!(ctl.transform().pan, Point::origin());
    }

    #[test]
    fn test_pan_snaps_when_configured() {
        let config = ZoomConfig {
            reset_pan_at_min_scale: true,
            ..Default::default()
        };
        let mut ctl = TransformController::with_config(config, RecordingSink::default())
            .expect("valid config");
        ctl.handle_event(&wheel(-1.0, 190.0, 90.0));
        ctl.handle_event(&wheel(1.0, 100.0, 50.0));
        assert_eq!(ctl.transform(), Transform::identity());
        assert_eq!(ctl.viewport().last_pan, Point::origin());
    }

    #[test]
    fn test_disabled_inputs_pass_through() {
        let config = ZoomConfig {
            wheel_enabled: false,
            touch_enabled: false,
            ..Default::default()
        };
        let mut ctl = TransformController::with_config(config, NullSink).expect("valid config");
        assert!(!ctl.handle_event(&wheel(-1.0, 0.0, 0.0)).is_handled());
        assert!(!ctl
            .handle_event(&InputEvent::TouchStart {
                touches: touches(&[(0.0, 0.0), (10.0, 0.0)]),
            })
            .is_handled());
        assert_eq!(ctl.transform(), Transform::identity());
    }

    #[test]
    fn test_zoom_by_and_reset() {
        let mut ctl = controller();
        assert!(ctl.zoom_by(1.0, Point::new(20.0, 0.0)));
        assert!(approx(ctl.transform().scale, 2.0));
        assert!(approx(ctl.transform().pan.x, -20.0));
        assert!(!ctl.zoom_by(f64::NAN, Point::origin()));

        ctl.reset();
        assert_eq!(ctl.transform(), Transform::identity());
        assert_eq!(ctl.sink().renders.len(), 2);

        ctl.reset();
        assert_eq!(ctl.sink().renders.len(), 2, "reset at identity must not render");
    }

    #[test]
    fn test_set_config_reclamps() {
        let mut ctl = controller();
        pinch(&mut ctl, 100.0, 400.0);
        assert_eq!(ctl.transform().scale, 4.0);

        let config = ZoomConfig {
            max_scale: 2.0,
            ..Default::default()
        };
        ctl.set_config(config).expect("valid config");
        assert_eq!(ctl.transform().scale, 2.0);
        assert_eq!(ctl.viewport().last_scale, 2.0);

        let bad = ZoomConfig {
            max_scale: 0.5,
            ..Default::default()
        };
        assert!(ctl.set_config(bad).is_err());
        assert_eq!(ctl.config().max_scale, 2.0);
    }
}
