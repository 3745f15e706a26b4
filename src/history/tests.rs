use super::*;
use crate::draw::Rgba;

fn surface_with(px: Rgba) -> Surface {
    let mut surface = Surface::new(8, 6).unwrap();
    surface.write_rgba(&vec![px; 48]).unwrap();
    surface
}

fn paint(surface: &mut Surface, px: Rgba) {
    surface.write_rgba(&vec![px; 48]).unwrap();
}

fn fresh(depth: usize) -> (Surface, History) {
    let surface = Surface::new(8, 6).unwrap();
    let mut history = History::new(depth);
    history.reset(&surface).unwrap();
    (surface, history)
}

#[test]
fn undo_all_returns_to_blank_and_redo_all_to_final() {
    let (mut surface, mut history) = fresh(DEFAULT_MAX_DEPTH);
    let blank = surface.read_rgba().unwrap();

    let colors: [Rgba; 4] = [
        [255, 0, 0, 255],
        [0, 255, 0, 128],
        [10, 20, 30, 255],
        [0, 0, 255, 1],
    ];
    for px in colors {
        paint(&mut surface, px);
        history.snapshot(&surface).unwrap();
    }
    let (_, final_raw) = surface.raw_bytes().unwrap();

    for _ in 0..colors.len() {
        assert!(history.undo(&surface).unwrap());
    }
    assert_eq!(surface.read_rgba().unwrap(), blank);
    assert!(!history.undo(&surface).unwrap());

    for _ in 0..colors.len() {
        assert!(history.redo(&surface).unwrap());
    }
    assert_eq!(surface.raw_bytes().unwrap().1, final_raw);
    assert!(!history.redo(&surface).unwrap());
}

#[test]
fn new_action_after_undo_invalidates_redo() {
    let (mut surface, mut history) = fresh(DEFAULT_MAX_DEPTH);
    paint(&mut surface, [1, 2, 3, 255]);
    history.snapshot(&surface).unwrap();
    history.undo(&surface).unwrap();
    assert!(history.can_redo());

    paint(&mut surface, [9, 9, 9, 255]);
    history.snapshot(&surface).unwrap();
    assert_eq!(history.redo_len(), 0);

    let before = surface.read_rgba().unwrap();
    assert!(!history.redo(&surface).unwrap());
    assert_eq!(surface.read_rgba().unwrap(), before);
}

#[test]
fn history_depth_is_bounded_with_fifo_eviction() {
    let (mut surface, mut history) = fresh(DEFAULT_MAX_DEPTH);
    for i in 1..=25u8 {
        paint(&mut surface, [i, 0, 0, 255]);
        history.snapshot(&surface).unwrap();
        assert!(history.undo_len() <= DEFAULT_MAX_DEPTH);
    }
    assert_eq!(history.undo_len(), DEFAULT_MAX_DEPTH);

    // Entries 0 (blank) through 5 were evicted, the oldest left is action 6.
    let oldest = history.oldest().unwrap().decode().unwrap();
    let oldest = Surface::from_image(oldest);
    assert_eq!(oldest.pixel(0, 0), Some([6, 0, 0, 255]));

    let mut undone = 0;
    while history.undo(&surface).unwrap() {
        undone += 1;
    }
    assert_eq!(undone, DEFAULT_MAX_DEPTH - 1);
    assert_eq!(surface.pixel(0, 0), Some([6, 0, 0, 255]));
}

#[test]
fn undo_with_only_initial_state_is_noop() {
    let (surface, mut history) = fresh(DEFAULT_MAX_DEPTH);
    assert!(!history.can_undo());
    assert!(!history.undo(&surface).unwrap());
    assert_eq!(history.undo_len(), 1);
}

#[test]
fn failed_decode_leaves_surface_and_stacks_untouched() {
    let (mut surface, mut history) = fresh(DEFAULT_MAX_DEPTH);
    paint(&mut surface, [50, 60, 70, 255]);
    history.snapshot(&surface).unwrap();
    history.entry_mut(0).unwrap().corrupt();

    let before = surface.read_rgba().unwrap();
    assert!(matches!(
        history.undo(&surface),
        Err(CanvasError::SnapshotDecode(_))
    ));
    assert_eq!(surface.read_rgba().unwrap(), before);
    assert_eq!(history.undo_len(), 2);
    assert_eq!(history.redo_len(), 0);
}

#[test]
fn restore_clears_before_drawing() {
    let transparent = surface_with([0, 0, 0, 0]);
    let snapshot = Snapshot::capture(&transparent).unwrap();
    let opaque = surface_with([200, 100, 50, 255]);
    snapshot.restore_into(&opaque).unwrap();
    assert!(opaque.read_rgba().unwrap().iter().all(|px| px[3] == 0));
}

#[test]
fn zero_depth_still_keeps_current_state() {
    let (mut surface, mut history) = fresh(0);
    assert_eq!(history.max_depth(), 1);
    paint(&mut surface, [1, 1, 1, 255]);
    history.snapshot(&surface).unwrap();
    assert_eq!(history.undo_len(), 1);
    assert!(!history.can_undo());
}
