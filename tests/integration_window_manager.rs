use faux_desk::config::WindowConfig;
use faux_desk::geometry::{Offset, Point, Size};
use faux_desk::window::{
    ControlAction, FullscreenError, FullscreenMode, FullscreenPlatform, Panel, PanelEvent,
    PanelEventKind, PanelId, PanelSpec, PointerTarget, Visibility, WindowManager,
};

fn desk() -> WindowManager {
    let mut wm = WindowManager::with_config(WindowConfig::terminal());
    wm.set_viewport(Size::new(80, 23));
    wm.register(PanelSpec::new("cameras", "Cameras").with_size(46, 14));
    wm.register(PanelSpec::new("help", "Help").with_anchor(12, 1).with_size(58, 18));
    wm.register(
        PanelSpec::new("access-modal", "Access")
            .with_size(48, 9)
            .without_header()
            .overlay(),
    );
    wm.bind_trigger("cameras-app-trigger", "cameras");
    wm.bind_control("close-cameras", "cameras", ControlAction::Close);
    wm.bind_control("minimize-cameras", "cameras", ControlAction::Minimize);
    wm.bind_control("fullscreen-cameras", "cameras", ControlAction::ToggleFullscreen);
    wm
}

fn target_header(id: &str) -> PointerTarget {
    PointerTarget::Header(PanelId::from(id))
}

fn kinds(events: Vec<PanelEvent>) -> Vec<(String, PanelEventKind)> {
    events
        .into_iter()
        .map(|e| (e.id.to_string(), e.kind))
        .collect()
}

/// Denies fullscreen for one panel and grants it for the rest.
#[derive(Debug, Default)]
struct PickyPlatform {
    granted: Vec<PanelId>,
}

impl FullscreenPlatform for PickyPlatform {
    fn request(&mut self, id: &PanelId) -> Result<(), FullscreenError> {
        if id.as_str() == "help" {
            return Err(FullscreenError::Denied(id.clone()));
        }
        self.granted.push(id.clone());
        Ok(())
    }

    fn exit(&mut self, _id: &PanelId) {}
}

#[test]
fn trigger_open_drag_and_close_control() {
    let mut wm = desk();
    assert!(wm.pointer_down(
        &PointerTarget::Trigger("cameras-app-trigger".into()),
        Point::new(2, 1)
    ));
    assert_eq!(wm.focused().map(PanelId::as_str), Some("cameras"));

    assert!(wm.pointer_down(&target_header("cameras"), Point::new(10, 0)));
    wm.pointer_move(Point::new(13, 2));
    wm.pointer_move(Point::new(16, 4));
    wm.pointer_up();
    assert_eq!(
        wm.panel("cameras").map(Panel::offset),
        Some(Offset::new(6, 4))
    );
    assert!(!wm.is_gesture_active());

    assert!(wm.activate("close-cameras"));
    assert_eq!(
        kinds(wm.take_events()),
        vec![
            ("cameras".to_string(), PanelEventKind::Opened),
            ("cameras".to_string(), PanelEventKind::Closed),
        ]
    );
    assert!(!wm.activate("no-such-element"));
}

#[test]
fn minimize_and_restore_keeps_position() {
    let mut wm = desk();
    wm.open("cameras");
    wm.pointer_down(&target_header("cameras"), Point::new(0, 0));
    wm.pointer_move(Point::new(4, 2));
    wm.pointer_up();

    assert!(wm.activate("minimize-cameras"));
    assert_eq!(
        wm.panel("cameras").map(Panel::visibility),
        Some(Visibility::Minimized)
    );
    // minimizing twice is a no-op
    assert!(!wm.minimize("cameras"));
    assert_eq!(wm.focused(), None);

    wm.open("cameras");
    let panel = wm.panel("cameras").expect("cameras");
    assert!(panel.is_open());
    assert_eq!(panel.offset(), Offset::ZERO);
}

#[test]
fn resize_clamps_between_minimum_and_viewport() {
    let mut wm = desk();
    wm.open("help");
    let grip = PointerTarget::ResizeHandle("help".into());
    assert!(wm.pointer_down(&grip, Point::new(70, 18)));
    wm.pointer_move(Point::new(500, 500));
    assert_eq!(
        wm.panel("help").map(Panel::rendered_size),
        Some(Size::new(78, 21))
    );
    wm.pointer_move(Point::new(-500, -500));
    assert_eq!(
        wm.panel("help").map(Panel::rendered_size),
        Some(Size::new(22, 5))
    );
    wm.pointer_up();
}

#[test]
fn grabbing_the_grip_on_a_small_screen_clamps_at_once() {
    let mut wm = desk();
    wm.set_viewport(Size::new(40, 12));
    wm.open("help");
    wm.take_events();
    let grip = PointerTarget::ResizeHandle("help".into());
    assert!(wm.pointer_down(&grip, Point::new(69, 18)));
    wm.pointer_up();
    assert_eq!(
        wm.panel("help").map(Panel::rendered_size),
        Some(Size::new(38, 10))
    );
    assert_eq!(
        kinds(wm.take_events()),
        vec![("help".to_string(), PanelEventKind::Resized(Size::new(38, 10)))]
    );
}

#[test]
fn viewport_shrink_clamps_pinned_sizes() {
    let mut wm = desk();
    wm.open("help");
    wm.pointer_down(&PointerTarget::ResizeHandle("help".into()), Point::new(0, 0));
    wm.pointer_move(Point::new(10, 2));
    wm.pointer_up();
    wm.take_events();

    wm.set_viewport(Size::new(40, 12));
    wm.clamp_to_viewport();
    assert_eq!(
        kinds(wm.take_events()),
        vec![("help".to_string(), PanelEventKind::Resized(Size::new(38, 10)))]
    );
}

#[test]
fn refused_fullscreen_falls_back_to_inset() {
    let mut wm = desk();
    wm.set_fullscreen_platform(Box::new(PickyPlatform::default()));
    wm.open("cameras");
    wm.open("help");

    assert!(wm.toggle_fullscreen("help"));
    assert_eq!(
        wm.panel("help").map(Panel::fullscreen),
        Some(FullscreenMode::Inset)
    );
    assert_eq!(
        wm.rendered_rect("help").map(|r| r.size()),
        Some(Size::new(80, 23))
    );

    assert!(wm.activate("fullscreen-cameras"));
    assert_eq!(
        wm.panel("cameras").map(Panel::fullscreen),
        Some(FullscreenMode::Native)
    );
    // fullscreen panels ignore header drags
    assert!(!wm.pointer_down(&target_header("cameras"), Point::new(1, 0)));

    wm.close("cameras");
    assert_eq!(
        wm.panel("cameras").map(Panel::fullscreen),
        Some(FullscreenMode::Windowed)
    );
}

#[test]
fn overlay_has_no_header_or_grip() {
    let mut wm = desk();
    wm.open("access-modal");
    let gate = wm.panel("access-modal").expect("gate");
    assert!(!gate.has_header());
    assert!(!gate.has_resize_handle());
    assert!(!wm.pointer_down(&target_header("access-modal"), Point::new(0, 0)));
    assert!(!wm.pointer_down(
        &PointerTarget::ResizeHandle("access-modal".into()),
        Point::new(0, 0)
    ));
}

#[test]
fn body_click_raises_and_cycle_rotates_focus() {
    let mut wm = desk();
    wm.open("cameras");
    wm.open("help");
    assert_eq!(wm.focused().map(PanelId::as_str), Some("help"));

    wm.pointer_down(&PointerTarget::Body("cameras".into()), Point::new(5, 5));
    assert_eq!(wm.focused().map(PanelId::as_str), Some("cameras"));

    wm.cycle_focus(true);
    assert_eq!(wm.focused().map(PanelId::as_str), Some("help"));
    wm.cycle_focus(false);
    assert_eq!(wm.focused().map(PanelId::as_str), Some("cameras"));

    assert!(!wm.pointer_down(&PointerTarget::Desktop, Point::new(70, 20)));
}

#[test]
fn spawned_panels_are_open_and_resizable() {
    let mut wm = desk();
    assert!(wm.spawn(PanelSpec::new("note-1", "Note 1").with_size(30, 8)));
    let note = wm.panel("note-1").expect("note");
    assert!(note.is_open());
    assert!(note.has_resize_handle());
    assert!(!wm.spawn(PanelSpec::new("note-1", "Duplicate")));
    assert_eq!(wm.panel("note-1").map(Panel::title), Some("Note 1"));
}
