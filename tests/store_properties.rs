use egui::{Pos2, pos2};
use paint_store::{Canvas, PaintStore, Tool, ToolKind};

fn busy_tool() -> Tool {
    let canvas = Canvas::new(4, 4);
    Tool {
        name: ToolKind::Shape,
        color: "#12abff".to_owned(),
        size: 13.5,
        drawing: true,
        last_pos: pos2(40.0, 12.0),
        shape_start: Some(pos2(3.0, 4.0)),
        snapshot: Some(canvas.snapshot()),
    }
}

#[test]
fn test_initial_state() {
    let store = PaintStore::new();
    let tool = store.tool();

    assert_eq!(tool.name, ToolKind::Brush);
    assert_eq!(tool.color, "#0000ff");
    assert_eq!(tool.size, 8.0);
    assert!(!tool.drawing);
    assert_eq!(tool.last_pos, Pos2::ZERO);
    assert_eq!(tool.shape_start, None);
    assert!(tool.snapshot.is_none());

    assert_eq!(store.brush_size(), 8.0);
    assert_eq!(store.pencil_size(), 2.0);
    assert_eq!(store.shape_size(), 4.0);
    assert_eq!(store.eraser_size(), 24.0);
}

#[test]
fn test_set_tool_round_trip() {
    let mut store = PaintStore::new();
    let tool = busy_tool();

    store.set_tool(tool.clone());

    // Deep equality on all seven fields
    assert_eq!(store.tool(), &tool);
}

#[test]
fn test_set_tool_twice_is_idempotent() {
    let mut store = PaintStore::new();
    let tool = busy_tool();

    store.set_tool(tool.clone());
    store.set_tool(tool.clone());

    assert_eq!(store.tool(), &tool);
}

#[test]
fn test_sizes_are_independent() {
    let mut store = PaintStore::new();
    let tool_before = store.tool().clone();

    store.set_brush_size(30.0);

    assert_eq!(store.brush_size(), 30.0);
    assert_eq!(store.pencil_size(), 2.0);
    assert_eq!(store.shape_size(), 4.0);
    assert_eq!(store.eraser_size(), 24.0);
    assert_eq!(store.tool(), &tool_before);
}

#[test]
fn test_shape_start_resets_to_none() {
    let mut store = PaintStore::new();

    store.update_tool(|tool| tool.shape_start = Some(pos2(5.0, 5.0)));
    assert_eq!(store.tool().shape_start, Some(pos2(5.0, 5.0)));

    store.update_tool(|tool| tool.shape_start = None);
    assert_eq!(store.tool().shape_start, None);
}

#[test]
fn test_switch_to_eraser_size() {
    let mut store = PaintStore::new();
    let eraser_size = store.eraser_size();

    store.update_tool(|tool| {
        tool.name = ToolKind::Eraser;
        tool.size = eraser_size;
    });

    assert_eq!(store.tool().size, 24.0);
    assert_eq!(store.eraser_size(), 24.0);
    assert_eq!(store.brush_size(), 8.0);
}

#[test]
fn test_sizes_accept_any_value() {
    // No validation beyond the type
    let mut store = PaintStore::new();
    store.set_pencil_size(0.0);
    store.set_size_for(ToolKind::Shape, 1000.0);

    assert_eq!(store.pencil_size(), 0.0);
    assert_eq!(store.size_for(ToolKind::Shape), 1000.0);
}
