// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Handler declarations converge onto engine subscriptions.

use std::cell::Cell;
use std::rc::Rc;

use mapsync_app_core::color_scheme::ColorSchemeMonitor;
use mapsync_dry_tests::{streets_catalog, FakeMap, MapCall};
use mapsync_port::{Listener, MapEvent};
use mapsync_style::StyleCatalog;
use mapsync_view::{Handler, HandlerSet, MapProps, MapView};

fn counter() -> (Rc<Cell<u32>>, Listener) {
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    (hits, Rc::new(move |_| h.set(h.get() + 1)))
}

fn mount(handlers: HandlerSet) -> (MapView<FakeMap>, FakeMap) {
    let props = MapProps {
        handlers,
        ..MapProps::default()
    };
    let mut view = MapView::mount(
        props,
        ColorSchemeMonitor::default(),
        StyleCatalog::default(),
        |opts| Ok(FakeMap::new(opts)),
    )
    .unwrap();
    view.handle_event(&MapEvent::Load);
    let map = view.map().unwrap().clone();
    (view, map)
}

#[test]
fn adding_a_handler_resubscribes_everything() {
    let (clicks, on_click) = counter();
    let (moves, on_move) = counter();
    let first = HandlerSet::new()
        .with("onClick", Handler::Global(Rc::clone(&on_click)))
        .unwrap();
    let (mut view, map) = mount(first);
    let original_id = match map.calls().as_slice() {
        [MapCall::On { event, id, .. }] if event == "click" => *id,
        other => panic!("unexpected mount calls: {other:?}"),
    };
    map.clear_calls();

    let second = HandlerSet::new()
        .with("onClick", Handler::Global(on_click))
        .unwrap()
        .with("onMouseMove", Handler::Global(on_move))
        .unwrap();
    view.set_handlers(second);

    let calls = map.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], MapCall::Off(original_id));
    assert!(matches!(&calls[1], MapCall::On { event, layer_id: None, .. } if event == "click"));
    assert!(
        matches!(&calls[2], MapCall::On { event, layer_id: None, .. } if event == "mousemove")
    );

    assert_eq!(map.emit("click", None), 1);
    assert_eq!(map.emit("mousemove", None), 1);
    assert_eq!((clicks.get(), moves.get()), (1, 1));
}

#[test]
fn unchanged_handler_set_is_left_alone() {
    let (_, on_click) = counter();
    let set = HandlerSet::new()
        .with("onClick", Handler::Global(on_click))
        .unwrap();
    let (mut view, map) = mount(set.clone());
    map.clear_calls();
    view.update(MapProps {
        handlers: set,
        ..MapProps::default()
    });
    assert!(map.calls().is_empty());
}

#[test]
fn layer_handlers_only_fire_for_their_layer() {
    let (pin_hits, on_pin) = counter();
    let set = HandlerSet::new()
        .with("onClick", Handler::layered([("cl-pins", on_pin)]))
        .unwrap();
    let (_view, map) = mount(set);
    assert_eq!(map.emit("click", Some("roads")), 0);
    assert_eq!(map.emit("click", Some("cl-pins")), 1);
    assert_eq!(pin_hits.get(), 1);
}

#[test]
fn unmount_removes_every_subscription() {
    let (_, a) = counter();
    let (_, b) = counter();
    let set = HandlerSet::new()
        .with("onClick", Handler::Global(a))
        .unwrap()
        .with("onMouseEnter", Handler::layered([("cl-pins", b)]))
        .unwrap();
    let (view, map) = mount(set);
    assert_eq!(map.subscriptions().len(), 2);
    let _ = view.unmount();
    assert!(map.subscriptions().is_empty());
}

#[test]
fn catalog_styles_mount_without_handlers() {
    let props = MapProps {
        style: Some("streets:dark".into()),
        ..MapProps::default()
    };
    let view = MapView::mount(
        props,
        ColorSchemeMonitor::default(),
        streets_catalog(),
        |opts| Ok(FakeMap::new(opts)),
    )
    .unwrap();
    assert!(view.unmount().subscriptions().is_empty());
}
