mod common;

use std::cell::Cell;
use std::rc::Rc;

use config_edit::{
    Collection, CollectionRegistry, ConfigEdit, DiagnosticKind, EditEngine, EngineConfig, Overlay,
    OverlayContext, Report,
};

use common::fixtures::{engine, preset, preset_of, registry, Preset, Slot};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn lines(report: &Report) -> Vec<String> {
    report.diagnostics().iter().map(ToString::to_string).collect()
}

#[test]
fn test_edit_report_lines() {
    init_tracing();
    let overlay = Overlay::new("better-mechs")
        .with_edit(ConfigEdit::new("Preset", "mech_a").with_directive("count", "5"));
    let mut registry = registry();
    let report = engine().apply_overlays(&mut registry, vec![overlay]);

    assert_eq!(
        lines(&report),
        vec![
            "Overlay 0 (better-mechs) applying edit script 1 of 1: <key=mech_a;type=Preset;source=->",
            "Overlay 0 (better-mechs) edits config mech_a of type Preset",
            "Overlay 0 (better-mechs) applying edit 1 of 1 to config mech_a",
            "Overlay 0 (better-mechs) edits config mech_a of type Preset, field count | Integer field modified with value 5",
        ]
    );
    assert_eq!(preset_of(&registry, "mech_a").map(|p| p.count), Some(5));
}

#[test]
fn test_failures_are_reported_and_batch_continues() {
    init_tracing();
    let overlay = Overlay::new("broken").with_edit(
        ConfigEdit::new("Preset", "mech_a")
            .with_directive("armor", "5")
            .with_directive("position", "(1,2)")
            .with_directive("", "ignored")
            .with_directive("weight", "4"),
    );
    let mut registry = registry();
    let report = engine().apply_overlays(&mut registry, vec![overlay]);

    let attempts: Vec<String> = report.attempts().map(ToString::to_string).collect();
    assert_eq!(
        attempts,
        vec![
            "Overlay 0 (broken) attempts to edit config mech_a of type Preset, field armor | field armor (step 0) could not be found on type Preset",
            "Overlay 0 (broken) attempts to edit config mech_a of type Preset, field position | can't parse raw value (1,2) as Vector3: expected 3 elements, found 2",
        ]
    );
    assert!(report
        .notices()
        .any(|d| d.message == "directive has an empty path or value"));
    let mech = preset_of(&registry, "mech_a").unwrap();
    assert_eq!(mech.weight, 4.0);
    assert_eq!(mech.position, preset().position);
    assert!(!report.is_clean());
}

#[test]
fn test_missing_key_and_unknown_collection() {
    let overlay = Overlay::new("o")
        .with_edit(ConfigEdit::new("Preset", "mech_z").with_directive("count", "1"))
        .with_edit(ConfigEdit::new("Weapon", "gun").with_directive("count", "1"));
    let mut registry = registry();
    let report = engine().apply_overlays(&mut registry, vec![overlay]);
    let attempts: Vec<String> = report.attempts().map(ToString::to_string).collect();
    assert_eq!(
        attempts,
        vec![
            "Overlay 0 (o) attempts to edit config mech_z of type Preset, which doesn't exist",
            "Overlay 0 (o) attempts to edit config gun of unknown type Weapon",
        ]
    );
}

#[test]
fn test_removal_short_circuits_directives() {
    let overlay = Overlay::new("o").with_edit(
        ConfigEdit::new("Preset", "mech_b")
            .removing()
            .with_directive("count", "1"),
    );
    let mut registry = registry();
    let report = engine().apply_overlays(&mut registry, vec![overlay]);
    assert!(preset_of(&registry, "mech_b").is_none());
    assert_eq!(report.edits().count(), 1);
    assert_eq!(
        report.edits().next().map(|d| d.message.as_str()),
        Some("removes config mech_b of type Preset")
    );
}

#[test]
fn test_overrides_run_before_edits() {
    let replacement = Preset {
        count: 40,
        ..Preset::default()
    };
    let overlay = Overlay::new("o")
        .with_edit(ConfigEdit::new("Preset", "mech_c").with_directive("count", "41"))
        .with_override("Preset", "mech_a", replacement)
        .with_override("Preset", "mech_c", Preset::default());
    let mut registry = registry();
    let report = engine().apply_overlays(&mut registry, vec![overlay]);

    let edits: Vec<&str> = report
        .edits()
        .filter(|d| d.path.is_none())
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        edits,
        vec![
            "replaces config mech_a of type Preset",
            "injects additional config mech_c of type Preset",
            "edits config mech_c of type Preset",
        ]
    );
    assert_eq!(preset_of(&registry, "mech_a").map(|p| p.count), Some(40));
    assert_eq!(preset_of(&registry, "mech_c").map(|p| p.count), Some(41));
}

#[test]
fn test_later_overlays_observe_earlier_ones() {
    let first = Overlay::new("first")
        .with_edit(ConfigEdit::new("Preset", "mech_a").with_directive("slots.c", "!+"));
    let second = Overlay::new("second").with_edit(
        ConfigEdit::new("Preset", "mech_a")
            .with_directive("slots.c.ammo", "7")
            .with_directive("count", "9"),
    );
    let third = Overlay::new("third")
        .with_edit(ConfigEdit::new("Preset", "mech_a").with_directive("count", "10"));
    let mut registry = registry();
    let report = engine().apply_overlays(&mut registry, vec![first, second, third]);
    assert!(report.is_clean());

    let mech = preset_of(&registry, "mech_a").unwrap();
    assert_eq!(mech.slots.get("c"), Some(&Slot { enabled: false, ammo: 7 }));
    assert_eq!(mech.count, 10);
    assert_eq!(
        report.diagnostics().last().map(|d| (d.overlay.as_str(), d.overlay_index)),
        Some(("third", 2))
    );
}

#[test]
fn test_hooks_run_for_touched_collections() {
    let preset_runs = Rc::new(Cell::new(0));
    let slot_runs = Rc::new(Cell::new(0));

    let mut presets = Collection::new("Preset").with_entry("mech_a", preset());
    let counter = Rc::clone(&preset_runs);
    presets.on_after_edit(move |_, preset: &mut Preset| {
        counter.set(counter.get() + 1);
        preset.name = preset.name.to_uppercase();
    });
    let mut slots = Collection::new("Slot").with_entry("spare", Slot::default());
    let counter = Rc::clone(&slot_runs);
    slots.on_after_edit(move |_, _: &mut Slot| counter.set(counter.get() + 1));

    let mut registry = CollectionRegistry::new();
    registry.register(presets);
    registry.register(slots);

    let overlay = Overlay::new("o")
        .with_edit(ConfigEdit::new("Preset", "mech_a").with_directive("count", "3"))
        .with_edit(ConfigEdit::new("Preset", "mech_a").with_directive("weight", "3"));
    engine().apply_overlays(&mut registry, vec![overlay]);

    assert_eq!(preset_runs.get(), 1);
    assert_eq!(slot_runs.get(), 0);
    assert_eq!(preset_of(&registry, "mech_a").map(|p| p.name.as_str()), Some("MECH_A"));
}

#[test]
fn test_overlay_documents() {
    let toml = Overlay::from_toml_str(
        "toml-overlay",
        r#"
        [[edits]]
        collection = "Preset"
        key = "mech_a"
        source = "mech_a.toml"

        [[edits.edits]]
        path = "tags"
        value = "heavy !+"

        [[edits.edits]]
        path = "hardpoints.0.offset"
        value = "(1, 1, 1)"
        "#,
    )
    .unwrap();
    let json = Overlay::from_json_str(
        "json-overlay",
        r#"{"edits": [{"collection": "Preset", "key": "mech_a", "edits": [{"path": "tags", "value": "light !-"}]}]}"#,
    )
    .unwrap();

    let mut registry = registry();
    let report = engine().apply_overlays(&mut registry, vec![toml, json]);
    assert!(report.is_clean());
    assert!(report
        .notices()
        .any(|d| d.message.ends_with("<key=mech_a;type=Preset;source=mech_a.toml>")));

    let mech = preset_of(&registry, "mech_a").unwrap();
    assert_eq!(mech.tags.iter().collect::<Vec<_>>(), vec!["heavy"]);
    assert_eq!(mech.hardpoints[0].offset.to_array(), [1.0, 1.0, 1.0]);
}

#[test]
fn test_engine_config_from_toml() {
    let config = EngineConfig::from_toml_str(
        r#"
        tag_marker = "@"

        [operators]
        insert = "+"
        remove = "-"
        "#,
    )
    .unwrap();
    let engine = EditEngine::new(config).with_tag::<Slot>("Slot");
    let mut root = preset();
    engine.apply(&mut root, "tags", "heavy +");
    engine.apply(&mut root, "tags", "light -");
    assert_eq!(root.tags.iter().collect::<Vec<_>>(), vec!["heavy"]);

    let outcome = engine.apply(&mut root, "resolver", "@Slot !d");
    assert!(outcome.is_edited());
    assert!(root.resolver.as_ref().and_then(|r| r.downcast_ref::<Slot>()).is_some());
}

#[test]
fn test_disabled_config_is_a_no_op() {
    let config = EngineConfig::from_json_str(r#"{"enabled": false}"#).unwrap();
    let overlay = Overlay::new("o")
        .with_edit(ConfigEdit::new("Preset", "mech_a").with_directive("count", "99"));
    let mut registry = registry();
    let report = EditEngine::new(config).apply_overlays(&mut registry, vec![overlay]);
    assert!(report.is_empty());
    assert_eq!(preset_of(&registry, "mech_a").map(|p| p.count), Some(2));
}

#[test]
fn test_direct_host_calls() {
    let engine = engine();
    let mut registry = registry();
    let mut report = Report::new();
    let ctx = OverlayContext::new("direct", 7);
    let edit = ConfigEdit::new("Slot", "spare")
        .with_directive("ammo", "12")
        .with_directive("enabled", "true");
    assert!(engine.apply_edit(&ctx, &mut registry, &edit, &mut report));
    let spare = registry.get::<Slot>("Slot").and_then(|c| c.get("spare")).cloned();
    assert_eq!(spare, Some(Slot { enabled: true, ammo: 12 }));
    assert!(report
        .diagnostics()
        .iter()
        .all(|d| d.overlay_index == 7 && d.collection == "Slot"));
    assert_eq!(report.edits().count(), 3);
    assert!(report.diagnostics().iter().any(|d| d.kind == DiagnosticKind::Notice));
}
