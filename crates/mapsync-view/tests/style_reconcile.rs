// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Style resolution and foreign-layer preservation through `MapView`.

use mapsync_app_core::color_scheme::ColorSchemeMonitor;
use mapsync_dry_tests::{base_style, init_tracing, streets_catalog, FakeMap, StyleBuilder};
use mapsync_port::{MapEvent, MapPort};
use mapsync_style::{StyleDocument, StyleRef};
use mapsync_view::{MapProps, MapView};

fn mount(scheme: &ColorSchemeMonitor) -> (MapView<FakeMap>, FakeMap) {
    init_tracing();
    let props = MapProps {
        style: Some("streets:light".into()),
        dark_style: Some("streets:dark".into()),
        ..MapProps::default()
    };
    let mut view = MapView::mount(props, scheme.clone(), streets_catalog(), |opts| {
        Ok(FakeMap::new(opts))
    })
    .unwrap();
    view.handle_event(&MapEvent::Load);
    let map = view.map().unwrap().clone();
    (view, map)
}

/// Caller injects its own layers into the live style.
fn inject_foreign(map: &FakeMap, base: &StyleDocument) {
    let mut doc = base.clone();
    let extra = StyleBuilder::new("overlay")
        .source("cl-pins", "geojson")
        .source("cl-route", "geojson")
        .layer("cl-pins", "circle", "cl-pins")
        .layer("cl-route", "line", "cl-route")
        .build();
    doc.sources.extend(extra.sources);
    doc.layers.extend(extra.layers);
    map.clone().set_style(&doc);
    map.finish_style_load();
    map.clear_calls();
}

#[test]
fn dark_to_light_keeps_foreign_layers_on_top() {
    let scheme = ColorSchemeMonitor::new(true, false);
    let (mut view, map) = mount(&scheme);
    let dark = base_style("dark", &["background", "roads"]);
    assert_eq!(map.style(), dark);
    inject_foreign(&map, &dark);

    scheme.on_media_change(false);
    view.sync_color_scheme();
    let light = base_style("light", &["background", "roads"]);
    assert_eq!(map.styles_set(), vec![light.clone()]);

    map.finish_style_load();
    view.handle_event(&MapEvent::StyleData);
    let applied = map.styles_set();
    assert_eq!(applied.len(), 2);
    let final_doc = &applied[1];
    assert_eq!(
        final_doc.layer_ids(),
        vec!["background", "roads", "cl-pins", "cl-route"]
    );
    assert!(final_doc.sources.contains_key("light-base"));
    assert!(final_doc.sources.contains_key("cl-pins"));
    assert!(final_doc.sources.contains_key("cl-route"));
    assert!(!final_doc.sources.contains_key("dark-base"));
    assert_eq!(final_doc.extra, light.extra);
}

#[test]
fn scheme_flip_is_picked_up_by_next_event() {
    let scheme = ColorSchemeMonitor::new(false, false);
    let (mut view, map) = mount(&scheme);
    map.clear_calls();
    scheme.on_root_attributes_changed(true);
    view.handle_event(&MapEvent::ContainerResized);
    assert_eq!(
        map.styles_set(),
        vec![base_style("dark", &["background", "roads"])]
    );
}

#[test]
fn style_data_without_foreign_content_sets_once() {
    let scheme = ColorSchemeMonitor::default();
    let (mut view, map) = mount(&scheme);
    map.clear_calls();
    view.set_style(Some(StyleRef::Document(base_style("custom", &["land"]))));
    map.finish_style_load();
    view.handle_event(&MapEvent::StyleData);
    assert_eq!(map.styles_set().len(), 1);
}

#[test]
fn unknown_catalog_path_applies_empty_style() {
    let scheme = ColorSchemeMonitor::default();
    let (mut view, map) = mount(&scheme);
    map.clear_calls();
    view.set_style(Some("streets:sepia".into()));
    assert_eq!(map.styles_set(), vec![StyleDocument::empty()]);
}

#[test]
fn equal_style_is_not_reapplied() {
    let scheme = ColorSchemeMonitor::default();
    let (mut view, map) = mount(&scheme);
    map.clear_calls();
    view.set_style(Some("streets:light".into()));
    view.set_dark_style(None);
    assert!(map.styles_set().is_empty());
}

#[test]
fn redefined_foreign_layer_takes_new_definition() {
    let scheme = ColorSchemeMonitor::default();
    let (mut view, map) = mount(&scheme);
    inject_foreign(&map, &base_style("light", &["background", "roads"]));

    let next = StyleBuilder::new("next")
        .source("next-base", "vector")
        .layer("land", "fill", "next-base")
        .layer("cl-route", "symbol", "next-base")
        .build();
    view.set_style(Some(StyleRef::Document(next)));
    map.finish_style_load();
    view.handle_event(&MapEvent::StyleData);

    let final_doc = map.styles_set().pop().unwrap();
    assert_eq!(final_doc.layer_ids(), vec!["land", "cl-pins", "cl-route"]);
    let route = final_doc.layer("cl-route").unwrap();
    assert_eq!(route.spec["type"], "symbol");
}
