use std::cell::RefCell;
use std::rc::Rc;

use easel_wm::layout::{Point, Size};
use easel_wm::window::{FixedClock, NoJitter, WindowConfig, WindowRegistry, WmConfig};
use easel_wm::{WmError, z_order::ZSequence};

const VIEWPORT: Size = Size::new(1200, 800);

fn registry() -> WindowRegistry<&'static str> {
    WindowRegistry::new(WmConfig::default(), VIEWPORT)
        .with_clock(FixedClock::new(1_700_000_000_000))
        .with_jitter(NoJitter)
}

fn panel(id: &str) -> WindowConfig<&'static str> {
    WindowConfig::new(id, id, "content")
}

#[test]
fn reopening_keeps_one_instance() {
    let mut reg = registry();
    let first = reg.open(panel("layers")).unwrap();
    let second = reg.open(panel("layers")).unwrap();
    assert_eq!(first, second);
    assert_eq!(reg.list_ids_of_type("layers"), vec![first]);
}

#[test]
fn new_instances_have_distinct_prefixed_ids() {
    let mut reg = registry();
    let ids: Vec<String> = (0..5)
        .map(|_| reg.open_new_instance(panel("brushes")).unwrap())
        .collect();
    for (i, id) in ids.iter().enumerate() {
        assert!(id.starts_with("brushes-"), "{id}");
        assert!(!ids[..i].contains(id), "duplicate {id}");
    }
    let titles: Vec<String> = ids
        .iter()
        .map(|id| reg.get(id).unwrap().title.clone())
        .collect();
    assert_eq!(
        titles,
        ["brushes 1", "brushes 2", "brushes 3", "brushes 4", "brushes 5"]
    );
}

#[test]
fn close_all_of_type_leaves_other_types_alone() {
    let mut reg = registry();
    reg.open(panel("layers")).unwrap();
    reg.open_new_instance(panel("layers")).unwrap();
    reg.open(panel("color")).unwrap();
    reg.open_new_instance(panel("history")).unwrap();
    reg.open_new_instance(panel("history")).unwrap();

    let closed = reg.close_all_of_type("layers");
    assert_eq!(closed.len(), 2);
    assert_eq!(reg.count_of_type("layers"), 0);
    assert_eq!(reg.count_of_type("color"), 1);
    assert_eq!(reg.count_of_type("history"), 2);

    assert_eq!(reg.close_all().len(), 3);
    assert!(reg.is_empty());
}

#[test]
fn color_panel_near_right_edge_is_placed_on_screen() {
    // Real jitter: the bound must hold for any draw.
    for _ in 0..50 {
        let mut reg: WindowRegistry<()> = WindowRegistry::new(WmConfig::default(), VIEWPORT);
        let id = reg
            .open(
                WindowConfig::new("color", "Color", ())
                    .initial_position(900, 100)
                    .size(280, 400),
            )
            .unwrap();
        let rect = reg.get(&id).unwrap().state.rect();
        assert!(rect.x <= 920 && rect.y <= 400, "{rect:?}");
        assert!(rect.x >= 8 && rect.y >= 8, "{rect:?}");
        assert!(rect.fits_within(VIEWPORT));
    }
}

#[test]
fn maximize_then_restore_is_exact() {
    let mut reg = registry();
    let id = reg
        .open(panel("properties").initial_position(333, 211).size(417, 309))
        .unwrap();
    let before = reg.get(&id).unwrap().state.rect();
    reg.toggle_maximize(&id).unwrap();
    let maximized = reg.get(&id).unwrap().state.rect();
    assert_eq!((maximized.x, maximized.y), (0, 0));
    assert_eq!(maximized.size(), VIEWPORT);
    reg.toggle_maximize(&id).unwrap();
    assert_eq!(reg.get(&id).unwrap().state.rect(), before);
}

#[test]
fn every_mutation_replaces_the_snapshot() {
    let mut reg = registry();
    let empty = reg.snapshot();
    let id = reg.open(panel("color")).unwrap();
    let opened = reg.snapshot();
    assert!(!Rc::ptr_eq(&empty, &opened));
    assert!(empty.is_empty());

    let revision = reg.revision();
    reg.bring_to_front(&id);
    assert!(reg.revision() > revision);
    assert_eq!(opened[0].state.z_index + 1, reg.get(&id).unwrap().state.z_index);

    // Closing something that is not open changes nothing.
    let revision = reg.revision();
    assert!(!reg.close("nope"));
    assert_eq!(reg.revision(), revision);
}

#[test]
fn shared_sequence_orders_windows_across_registries() {
    let sequence = ZSequence::new(1000);
    let mut left = registry().with_sequence(sequence.clone());
    let mut right = registry().with_sequence(sequence.clone());
    let a = left.open(panel("color")).unwrap();
    let b = right.open(panel("layers")).unwrap();
    left.bring_to_front(&a);
    let za = left.get(&a).unwrap().state.z_index;
    let zb = right.get(&b).unwrap().state.z_index;
    assert!(za > zb);
    assert_eq!(sequence.current(), za);
}

#[test]
fn position_observer_sees_committed_values() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut reg = registry();
    let id = reg
        .open(panel("color").on_position_change(move |p| sink.borrow_mut().push(p)))
        .unwrap();
    reg.set_position(&id, Point::new(10, 20)).unwrap();
    reg.set_position(&id, Point::new(10, 20)).unwrap();
    assert_eq!(seen.borrow().as_slice(), &[Point::new(10, 20)]);
    assert_eq!(
        reg.set_position("missing", Point::new(0, 0)),
        Err(WmError::UnknownWindow("missing".into()))
    );
}

#[test]
fn restoring_after_viewport_shrink_stays_on_screen() {
    let mut reg = registry();
    let id = reg
        .open(panel("layers").initial_position(880, 580).size(300, 200))
        .unwrap();
    reg.toggle_maximize(&id).unwrap();
    let small = Size::new(640, 480);
    reg.set_viewport(small);
    assert_eq!(reg.get(&id).unwrap().state.size, small);
    reg.toggle_maximize(&id).unwrap();
    let rect = reg.get(&id).unwrap().state.rect();
    assert!(rect.fits_within(small), "{rect:?}");
    assert_eq!(rect.size(), Size::new(300, 200));
}
