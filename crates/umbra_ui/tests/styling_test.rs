//! # Styling Tests
//!
//! Style resolution, brush validation and theming as seen through a surface.

use umbra_ui::{
    BrushKind, Button, Color, CommandRecorder, Element, GpuResource, GradientDirection, LinearGradientBrush, RenderCommand,
    Panel, ShapeMode, SolidBrush, Style, StyleMap, StyleSlot, Surface, SurfaceConfig, TextureHandle, Theme,
    Toggle, UiError, Vec2i,
};

/// A rounded style map whose normal fill is a linear gradient.
fn gradient_map() -> StyleMap {
    let normal = Style::new(
        SolidBrush::shared(Color::BLACK),
        LinearGradientBrush::shared(Color::RED, Color::BLACK, GradientDirection::Vertical),
        SolidBrush::shared(Color::WHITE),
    );
    StyleMap::builder(normal).shape_mode(ShapeMode::Rounded).build()
}

/// One distinct fill color per slot, so the resolved slot can be read back.
fn slot_color(slot: StyleSlot) -> Color {
    let index = StyleSlot::ALL.iter().position(|s| *s == slot).unwrap_or_default();
    let shade = u8::try_from(index * 30).unwrap_or(u8::MAX);
    Color::rgb(shade, 0, 0)
}

fn slot_map() -> StyleMap {
    let style = |slot| {
        Style::new(
            SolidBrush::shared(Color::BLACK),
            SolidBrush::shared(slot_color(slot)),
            SolidBrush::shared(Color::WHITE),
        )
    };
    StyleSlot::ALL
        .into_iter()
        .fold(StyleMap::builder(style(StyleSlot::Normal)), |builder, slot| {
            builder.slot(slot, style(slot))
        })
        .build()
}

fn resolved(surface: &Surface<CommandRecorder>, name: &str) -> Color {
    surface
        .get_element(name)
        .map_or(Color::BLANK, |e| e.current_style().fill.fallback_color())
}

/// Test: Disabled beats activated beats clicked beats hovered.
#[test]
fn test_style_precedence_through_frames() {
    let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
    surface.add_element(Box::new(Button::new("OK", Vec2i::ZERO, None).named("b").styled(slot_map())));
    surface.add_element(Box::new(
        Toggle::new(Vec2i::new(300, 0), Vec2i::splat(20), true, "").named("t").styled(slot_map()),
    ));

    let far = Vec2i::new(500, 500);
    let on_button = Vec2i::new(10, 10);
    let on_toggle = Vec2i::new(305, 5);
    surface.rasterizer_mut().script_pointer([
        (far, false),
        (on_button, false),
        (on_button, true),
        (on_toggle, false),
        (on_toggle, true),
        (on_toggle, false),
        (on_toggle, true),
    ]);

    surface.draw_frame().unwrap();
    assert_eq!(resolved(&surface, "b"), slot_color(StyleSlot::Normal));
    assert_eq!(resolved(&surface, "t"), slot_color(StyleSlot::Activated));

    surface.draw_frame().unwrap();
    assert_eq!(resolved(&surface, "b"), slot_color(StyleSlot::Hovered));

    surface.draw_frame().unwrap();
    assert_eq!(resolved(&surface, "b"), slot_color(StyleSlot::Clicked));

    surface.draw_frame().unwrap();
    assert_eq!(resolved(&surface, "b"), slot_color(StyleSlot::Normal));
    assert_eq!(resolved(&surface, "t"), slot_color(StyleSlot::HoveredActivated));

    // Held over the toggle: still on until the button is released.
    surface.draw_frame().unwrap();
    assert_eq!(resolved(&surface, "t"), slot_color(StyleSlot::HoveredActivated));

    surface.draw_frame().unwrap();
    assert_eq!(resolved(&surface, "t"), slot_color(StyleSlot::Hovered));

    // Switched off, so a new press resolves as plain clicked.
    surface.draw_frame().unwrap();
    assert_eq!(resolved(&surface, "t"), slot_color(StyleSlot::Clicked));

    surface.get_element_mut("t").unwrap().state_mut().disable();
    surface.draw_frame().unwrap();
    assert_eq!(resolved(&surface, "t"), slot_color(StyleSlot::HoveredDisabled));

    surface.rasterizer_mut().set_pointer(far, false);
    surface.draw_frame().unwrap();
    assert_eq!(resolved(&surface, "t"), slot_color(StyleSlot::Disabled));
}

/// Test: An unsupported brush is reported before the element paints anything.
#[test]
fn test_unsupported_brush_fails_before_paint() {
    let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
    surface.add_element(Box::new(Button::new("OK", Vec2i::ZERO, None).named("grad").styled(gradient_map())));

    let err = surface.draw_frame().unwrap_err();
    assert_eq!(
        err,
        UiError::UnsupportedBrush {
            kind: BrushKind::LinearGradient,
            widget: "Button",
            element: "grad".to_owned(),
            shape: ShapeMode::Rounded,
        }
    );
    assert_eq!(surface.rasterizer().commands(), &[RenderCommand::Clear(Color::WHITE)]);
    assert_eq!(surface.rasterizer().frames_presented(), 1);
}

/// Test: With fallback on, the same element paints its gradient as a flat color.
#[test]
fn test_unsupported_brush_fallback() {
    let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
    let mut button = Button::new("OK", Vec2i::ZERO, None).styled(gradient_map());
    button.state_mut().use_fallback_for_unsupported = true;
    surface.add_element(Box::new(button));
    surface.rasterizer_mut().set_pointer(Vec2i::splat(500), false);

    surface.draw_frame().unwrap();
    let flat = surface.rasterizer().commands().iter().any(|c| {
        matches!(
            c,
            RenderCommand::RoundedRect { segments: 1, color, .. } if *color == Color::RED
        )
    });
    assert!(flat);
    assert_eq!(surface.rasterizer().textures_loaded(), 0);
}

/// Test: A bad child stops the frame even if its parent is fine.
#[test]
fn test_unsupported_brush_in_child() {
    let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
    let mut panel = Panel::new(Vec2i::ZERO, Vec2i::splat(200), None).named("root");
    panel
        .state_mut()
        .add_child(Box::new(Button::new("x", Vec2i::ZERO, None).named("child").styled(gradient_map())));
    surface.add_element(Box::new(panel));

    let err = surface.draw_frame().unwrap_err();
    assert!(matches!(err, UiError::UnsupportedBrush { ref element, .. } if element == "child"));
}

/// Test: The loop stops on an unsupported brush, after releasing resources.
#[test]
fn test_run_aborts_after_release() {
    let mut recorder = CommandRecorder::new();
    recorder.close_after(10);
    {
        let mut surface = Surface::new(&mut recorder, SurfaceConfig::default());
        surface.register_resource(GpuResource::Texture(TextureHandle(3)));
        surface.add_element(Box::new(Button::new("OK", Vec2i::ZERO, None).styled(gradient_map())));

        assert!(matches!(surface.run(), Err(UiError::UnsupportedBrush { .. })));
        assert!(surface.resources().is_empty());
    }
    assert_eq!(recorder.frames_presented(), 1);
    assert_eq!(recorder.released().len(), 1);
}

/// Test: Same base color, same theme.
#[test]
fn test_theme_generation_is_deterministic() {
    let a = Theme::from_base(Color::rgb(245, 101, 101), Color::WHITE);
    let b = Theme::from_base(Color::rgb(245, 101, 101), Color::WHITE);
    assert_eq!((a.core, a.layer, a.accent, a.text), (b.core, b.layer, b.accent, b.text));
    assert_eq!(a.layer, Color::rgb(81, 33, 33));
    assert_eq!(a.core, Color::rgb(49, 20, 20));

    for slot in StyleSlot::ALL {
        let (sa, sb) = (a.style_map().get(slot), b.style_map().get(slot));
        assert_eq!(sa.fill.fallback_color(), sb.fill.fallback_color());
        assert_eq!(sa.border.fallback_color(), sb.border.fallback_color());
        assert_eq!(sa.border_weight, sb.border_weight);
    }
}

/// Test: Switching the theme restyles themed elements only.
#[test]
fn test_theme_switch_restyles_themed_elements() {
    let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
    let themed = {
        let theme = surface.theme().clone();
        Button::new("a", Vec2i::ZERO, None).named("themed").themed(&theme)
    };
    surface.add_element(Box::new(themed));
    surface.add_element(Box::new(Button::new("b", Vec2i::ZERO, None).named("plain")));

    let next = Theme::from_base(Color::SKY_BLUE, Color::BLACK).with_shape(ShapeMode::Sharp);
    surface.set_theme(next.clone());

    let themed = surface.get_element("themed").unwrap().state();
    assert_eq!(themed.style_map.normal().fill.fallback_color(), next.layer);
    assert_eq!(themed.style_map.shape_mode(), ShapeMode::Sharp);

    let plain = surface.get_element("plain").unwrap().state();
    assert_eq!(plain.style_map.normal().fill.fallback_color(), Color::GRAY);
}

/// Test: A config file sets the title, clear color and theme.
#[test]
fn test_surface_from_config_file() {
    let path = std::env::temp_dir().join(format!("umbra_ui_config_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
        title = "settings"
        background = [18, 18, 24]

        [theme]
        accent = [102, 191, 255]
        shape = "sharp"
        "#,
    )
    .unwrap();
    let config = SurfaceConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let mut surface = Surface::new(CommandRecorder::new(), config);
    surface.draw_frame().unwrap();

    assert_eq!(surface.rasterizer().title(), "settings");
    assert_eq!(surface.rasterizer().commands(), &[RenderCommand::Clear(Color::rgb(18, 18, 24))]);
    assert_eq!(surface.theme().accent, Color::SKY_BLUE);
    assert_eq!(surface.style_map().shape_mode(), ShapeMode::Sharp);
}
