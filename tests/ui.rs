use cairo::ImageSurface;
use mintcanvas::config::KeybindingsConfig;
use mintcanvas::draw::{Background, BackgroundPreset, Color, Surface};
use mintcanvas::input::{Key, TouchPoint};
use mintcanvas::{CanvasEngine, EngineSettings, InputEvent, InputRouter, MountOptions, ToolKind};

fn make_engine(width: u32, height: u32) -> CanvasEngine {
    let options = MountOptions {
        width,
        height,
        color: Color::from_rgb8(255, 0, 0),
        brush_size: 4.0,
        ..MountOptions::default()
    };
    CanvasEngine::mount(options, EngineSettings::default())
}

fn make_router() -> InputRouter {
    InputRouter::from_config(&KeybindingsConfig::default()).unwrap()
}

fn surface_has_pixels(surface: &mut ImageSurface) -> bool {
    surface
        .data()
        .map(|data| data.iter().any(|byte| *byte != 0))
        .unwrap_or(false)
}

fn committed_has_pixels(engine: &CanvasEngine) -> bool {
    engine
        .surfaces()
        .unwrap()
        .committed()
        .read_rgba()
        .unwrap()
        .iter()
        .any(|px| px[3] > 0)
}

fn key(router: &mut InputRouter, engine: &mut CanvasEngine, name: &str) {
    router.handle(engine, &InputEvent::KeyDown { key: Key::from_name(name) });
    router.handle(engine, &InputEvent::KeyUp { key: Key::from_name(name) });
}

#[test]
fn compose_draws_every_background_preset() {
    let engine = make_engine(16, 16);
    for preset in BackgroundPreset::ALL {
        let mut engine = make_engine(16, 16);
        engine.set_background(Background::Preset(preset));
        let mut view = engine.compose().unwrap();
        let expect_pixels = preset != BackgroundPreset::Transparent;
        assert_eq!(
            surface_has_pixels(&mut view),
            expect_pixels,
            "preset {}",
            preset.name()
        );
    }
    // Background never leaks into the committed pixels
    assert!(!committed_has_pixels(&engine));
}

#[test]
fn gradient_background_runs_top_to_bottom() {
    let mut engine = make_engine(4, 100);
    engine.set_background("#000000..#ffffff".parse().unwrap());
    let view = Surface::from_image(engine.compose().unwrap());
    let top = view.pixel(0, 0).unwrap();
    let bottom = view.pixel(0, 99).unwrap();
    assert!(top[0] < 10);
    assert!(bottom[0] > 245);
}

#[test]
fn preview_shows_in_composed_view_before_commit() {
    let mut engine = make_engine(40, 40);
    let mut router = make_router();
    key(&mut router, &mut engine, "r");
    router.handle(&mut engine, &InputEvent::PointerDown { x: 5.0, y: 5.0 });
    router.handle(&mut engine, &InputEvent::PointerMove { x: 30.0, y: 30.0 });

    assert!(!committed_has_pixels(&engine));
    engine.set_background(Background::Preset(BackgroundPreset::Transparent));
    let mut view = engine.compose().unwrap();
    assert!(surface_has_pixels(&mut view));

    router.handle(&mut engine, &InputEvent::PointerUp { x: 30.0, y: 30.0 });
    assert!(committed_has_pixels(&engine));
}

#[test]
fn touch_uses_first_point_in_local_coordinates() {
    let mut engine = make_engine(40, 40);
    let mut router = make_router();
    router.handle(&mut engine, &InputEvent::Bounds { left: 200.0, top: 100.0 });

    let touches = |x, y| {
        vec![
            TouchPoint { x, y },
            TouchPoint { x: 0.0, y: 0.0 },
        ]
    };
    router.handle(&mut engine, &InputEvent::TouchStart { touches: touches(205.0, 120.0) });
    router.handle(&mut engine, &InputEvent::TouchMove { touches: touches(235.0, 120.0) });
    router.handle(&mut engine, &InputEvent::TouchEnd { touches: Vec::new() });

    let committed = engine.surfaces().unwrap().committed();
    assert_eq!(committed.pixel(20, 20), Some([255, 0, 0, 255]));
    assert_eq!(committed.pixel(20, 5), Some([0, 0, 0, 0]));
    assert_eq!(engine.history().undo_len(), 2);
}

#[test]
fn shortcuts_need_focus_but_escape_does_not() {
    let mut engine = make_engine(40, 40);
    let mut router = make_router();

    router.handle(&mut engine, &InputEvent::Focus { focused: false });
    key(&mut router, &mut engine, "l");
    assert_eq!(engine.tool(), ToolKind::Brush);

    router.handle(&mut engine, &InputEvent::Focus { focused: true });
    key(&mut router, &mut engine, "p");
    assert_eq!(engine.tool(), ToolKind::Polygon);

    router.handle(&mut engine, &InputEvent::PointerDown { x: 5.0, y: 5.0 });
    router.handle(&mut engine, &InputEvent::PointerUp { x: 5.0, y: 5.0 });
    router.handle(&mut engine, &InputEvent::Focus { focused: false });
    key(&mut router, &mut engine, "Escape");
    assert!(engine.session().is_idle());
}

#[test]
fn shift_key_events_snap_active_line() {
    let mut engine = make_engine(60, 60);
    let mut router = make_router();
    key(&mut router, &mut engine, "l");
    router.handle(&mut engine, &InputEvent::PointerDown { x: 0.0, y: 0.0 });
    router.handle(&mut engine, &InputEvent::PointerMove { x: 5.0, y: 30.0 });

    router.handle(&mut engine, &InputEvent::KeyDown { key: Key::Shift });
    assert_eq!(
        engine.session().line_end(),
        Some(mintcanvas::util::Point::new(0.0, 30.0))
    );
    router.handle(&mut engine, &InputEvent::KeyUp { key: Key::Shift });
    assert_eq!(
        engine.session().line_end(),
        Some(mintcanvas::util::Point::new(5.0, 30.0))
    );
}

#[test]
fn typed_keys_edit_text_instead_of_switching_tools() {
    let mut engine = make_engine(200, 60);
    let mut router = make_router();
    key(&mut router, &mut engine, "t");
    router.handle(&mut engine, &InputEvent::PointerDown { x: 10.0, y: 10.0 });
    router.handle(&mut engine, &InputEvent::PointerUp { x: 10.0, y: 10.0 });

    key(&mut router, &mut engine, "b");
    router.handle(&mut engine, &InputEvent::TypeText { text: "ee".into() });
    key(&mut router, &mut engine, "Backspace");
    assert_eq!(engine.text_buffer(), Some("be"));
    assert_eq!(engine.tool(), ToolKind::Text);

    key(&mut router, &mut engine, "Return");
    assert!(!engine.text_entry_open());
    assert!(committed_has_pixels(&engine));
}

#[test]
fn keyboard_history_shortcuts() {
    let mut engine = make_engine(20, 20);
    let mut router = make_router();
    key(&mut router, &mut engine, "f");
    router.handle(&mut engine, &InputEvent::PointerDown { x: 5.0, y: 5.0 });
    router.handle(&mut engine, &InputEvent::PointerUp { x: 5.0, y: 5.0 });
    assert!(committed_has_pixels(&engine));

    router.handle(&mut engine, &InputEvent::KeyDown { key: Key::Ctrl });
    key(&mut router, &mut engine, "z");
    assert!(!committed_has_pixels(&engine));
    key(&mut router, &mut engine, "y");
    assert!(committed_has_pixels(&engine));

    key(&mut router, &mut engine, "z");
    router.handle(&mut engine, &InputEvent::KeyDown { key: Key::Shift });
    key(&mut router, &mut engine, "Z");
    assert!(committed_has_pixels(&engine));
}

#[test]
fn shifted_plus_grows_brush() {
    let mut engine = make_engine(20, 20);
    let mut router = make_router();
    router.handle(&mut engine, &InputEvent::KeyDown { key: Key::Shift });
    key(&mut router, &mut engine, "+");
    assert_eq!(engine.style().size, 5.0);
}

#[test]
fn export_doubles_800_by_600() {
    let mut engine = CanvasEngine::mount(MountOptions::default(), EngineSettings::default());
    let mut router = make_router();
    key(&mut router, &mut engine, "f");
    router.handle(&mut engine, &InputEvent::PointerDown { x: 1.0, y: 1.0 });
    router.handle(&mut engine, &InputEvent::PointerUp { x: 1.0, y: 1.0 });

    let (file, _url) = engine.export_image(2.0).unwrap();
    let decoded = ImageSurface::create_from_png(&mut &file.bytes[..]).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1600, 1200));
    let view = Surface::from_image(decoded);
    assert_eq!(view.pixel(1599, 1199), Some([0x00, 0xf5, 0xff, 0xff]));
}

#[test]
fn resize_event_keeps_artwork() {
    let mut engine = make_engine(20, 20);
    let mut router = make_router();
    key(&mut router, &mut engine, "f");
    router.handle(&mut engine, &InputEvent::PointerDown { x: 1.0, y: 1.0 });
    router.handle(&mut engine, &InputEvent::PointerUp { x: 1.0, y: 1.0 });
    router.handle(&mut engine, &InputEvent::Resize { width: 30, height: 30 });

    assert_eq!(engine.size(), Some((30, 30)));
    let committed = engine.surfaces().unwrap().committed();
    assert_eq!(committed.pixel(19, 19), Some([255, 0, 0, 255]));
    assert_eq!(committed.pixel(25, 25), Some([0, 0, 0, 0]));
}
