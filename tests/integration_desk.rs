use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use faux_desk::desk::content::{MediaView, NoteView, WalkieView};
use faux_desk::desk::{CAMERAS, DeskApp, DeskOptions, HELP, WALKIE};
use faux_desk::geometry::Size;
use faux_desk::settings::{DesktopSettings, MemoryStore, save_settings};
use faux_desk::ui::UiFrame;
use faux_desk::window::{Panel, PanelEventKind};

const WIDTH: u16 = 80;
const HEIGHT: u16 = 24;

fn unlocked_desk() -> DeskApp {
    let mut store = MemoryStore::new();
    save_settings(
        &mut store,
        &DesktopSettings {
            require_access: false,
            sound: false,
            ..DesktopSettings::default()
        },
    );
    DeskApp::new(Box::new(store), DeskOptions::default())
}

fn frame(app: &mut DeskApp, width: u16, height: u16) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    app.render(UiFrame::from_parts(area, &mut buf));
    buf
}

fn row(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
        .collect()
}

fn screen(buf: &Buffer) -> String {
    (0..buf.area.height)
        .map(|y| row(buf, y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn press(app: &mut DeskApp, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_event(&Event::Key(KeyEvent::new(code, modifiers)));
}

fn mouse(app: &mut DeskApp, kind: MouseEventKind, column: u16, row: u16) {
    app.handle_event(&Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }));
}

fn drag(app: &mut DeskApp, from: (u16, u16), to: (u16, u16)) {
    mouse(app, MouseEventKind::Down(MouseButton::Left), from.0, from.1);
    mouse(app, MouseEventKind::Drag(MouseButton::Left), to.0, to.1);
    mouse(app, MouseEventKind::Up(MouseButton::Left), to.0, to.1);
}

#[test]
fn empty_desk_shows_icons_and_taskbar() {
    let mut app = unlocked_desk();
    let buf = frame(&mut app, WIDTH, HEIGHT);
    let text = screen(&buf);
    for label in ["Cameras", "Movies", "Walkie", "Settings", "Help", "Log"] {
        assert!(text.contains(label), "missing icon {label}");
    }
    assert!(row(&buf, HEIGHT - 1).starts_with("≡ desk"));
}

#[test]
fn opened_panel_draws_title_controls_and_grip() {
    let mut app = unlocked_desk();
    press(&mut app, KeyCode::Char('1'), KeyModifiers::ALT);
    app.tick();
    let buf = frame(&mut app, WIDTH, HEIGHT);

    let rect = app
        .window_manager()
        .panel(CAMERAS)
        .map(Panel::rect)
        .expect("cameras");
    let header = row(&buf, rect.y as u16);
    assert!(header.contains("Cameras"));
    assert!(header.contains("[_][□][x]"));
    let bottom = row(&buf, (rect.bottom() - 1) as u16);
    assert!(bottom.contains('◢'));
    assert!(row(&buf, HEIGHT - 1).contains(" Cameras "));
}

#[test]
fn resize_grip_drag_resizes_and_notifies_content() {
    let mut app = unlocked_desk();
    press(&mut app, KeyCode::Char('3'), KeyModifiers::ALT);
    app.tick();
    frame(&mut app, WIDTH, HEIGHT);

    let rect = app
        .window_manager()
        .panel(WALKIE)
        .map(Panel::rect)
        .expect("walkie");
    let grip = ((rect.right() - 1) as u16, (rect.bottom() - 1) as u16);
    drag(&mut app, grip, (grip.0 + 6, grip.1 + 2));

    assert_eq!(
        app.window_manager().panel(WALKIE).map(Panel::rendered_size),
        Some(Size::new(rect.width + 6, rect.height + 2))
    );
    assert!(app.content::<WalkieView>(WALKIE).is_some());
}

#[test]
fn dragged_panel_can_leave_the_screen_without_panicking() {
    let mut app = unlocked_desk();
    press(&mut app, KeyCode::Char('1'), KeyModifiers::ALT);
    frame(&mut app, WIDTH, HEIGHT);
    let rect = app
        .window_manager()
        .panel(CAMERAS)
        .map(Panel::rect)
        .expect("cameras");
    let start = (rect.x as u16 + 2, rect.y as u16);
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), start.0, start.1);
    // terminals report positions on screen only; move far past the edge
    app.window_manager_mut()
        .pointer_move(faux_desk::geometry::Point::new(-200, 60));
    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 0, 0);
    frame(&mut app, WIDTH, HEIGHT);
    frame(&mut app, 20, 6);
}

#[test]
fn minimize_control_moves_panel_to_taskbar() {
    let mut app = unlocked_desk();
    press(&mut app, KeyCode::F(1), KeyModifiers::NONE);
    app.tick();
    frame(&mut app, WIDTH, HEIGHT);
    let rect = app
        .window_manager()
        .panel(HELP)
        .map(Panel::rect)
        .expect("help");
    // "[_]" starts nine cells from the right edge
    let minimize_x = (rect.right() - 9) as u16;
    mouse(
        &mut app,
        MouseEventKind::Down(MouseButton::Left),
        minimize_x,
        rect.y as u16,
    );
    app.tick();
    assert!(app.window_manager().panel(HELP).is_some_and(Panel::is_minimized));

    let buf = frame(&mut app, WIDTH, HEIGHT);
    assert!(row(&buf, HEIGHT - 1).contains(" Help "));
    assert!(!row(&buf, rect.y as u16).contains("[_][□][x]"));
}

#[test]
fn camera_feed_restarts_on_every_open() {
    let mut app = unlocked_desk();
    press(&mut app, KeyCode::Char('1'), KeyModifiers::ALT);
    app.tick();
    app.tick();
    app.tick();
    let played = app.content::<MediaView>(CAMERAS).map(MediaView::position);
    assert!(played.is_some_and(|p| p > 0));

    press(&mut app, KeyCode::Char('w'), KeyModifiers::CONTROL);
    app.tick();
    let paused = app.content::<MediaView>(CAMERAS).expect("media");
    assert!(!paused.is_playing());

    press(&mut app, KeyCode::Char('1'), KeyModifiers::ALT);
    app.tick();
    let media = app.content::<MediaView>(CAMERAS).expect("media");
    assert!(media.is_playing());
    assert!(media.position() <= 1);
}

#[test]
fn typed_text_lands_in_the_focused_note() {
    let mut app = unlocked_desk();
    let id = app.spawn_note().expect("note");
    for c in "hi".chars() {
        press(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
    }
    assert_eq!(
        app.content::<NoteView>(id.as_str()).map(NoteView::text),
        Some("hi")
    );
    let second = app.spawn_note().expect("second note");
    assert_ne!(second, id);
    press(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
    assert_eq!(
        app.content::<NoteView>(id.as_str()).map(NoteView::text),
        Some("hi")
    );
}

#[test]
fn shrinking_terminal_clamps_resized_panels() {
    let mut app = unlocked_desk();
    press(&mut app, KeyCode::F(1), KeyModifiers::NONE);
    press(&mut app, KeyCode::Right, KeyModifiers::ALT | KeyModifiers::SHIFT);
    app.tick();
    frame(&mut app, 40, 12);
    let size = app
        .window_manager()
        .panel(HELP)
        .map(Panel::rendered_size)
        .expect("help");
    assert!(size.width <= 38 && size.height <= 10, "{size:?}");
    let events = app.window_manager_mut().take_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e.kind, PanelEventKind::Resized(_)))
    );
}
