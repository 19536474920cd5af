#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use config_edit::{Collection, CollectionRegistry, EditEngine};
use config_edit_reflect::{reflect_record, Dynamic, Vector2, Vector3, Vector4};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Slot {
    pub enabled: bool,
    pub ammo: i32,
}

reflect_record!(Slot { enabled, ammo });

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Hardpoint {
    pub name: String,
    pub offset: Vector3,
}

reflect_record!(Hardpoint { name, offset });

/// Clears every tag of the part it resolves.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PartResolverClear {
    pub tags: BTreeSet<String>,
}

reflect_record!(PartResolverClear { tags });

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PartResolverKeep {
    pub priority: i32,
}

reflect_record!(PartResolverKeep { priority });

#[derive(Debug, Default)]
pub struct Preset {
    pub name: String,
    pub description: Option<String>,
    pub enabled: bool,
    pub count: i32,
    pub weight: f32,
    pub offset: Vector2,
    pub position: Vector3,
    pub color: Vector4,
    pub tags: BTreeSet<String>,
    pub slots: BTreeMap<String, Slot>,
    pub ranks: BTreeMap<i32, Slot>,
    pub levels: BTreeMap<String, i32>,
    pub hardpoints: Vec<Hardpoint>,
    pub values: Vec<i32>,
    pub resolver: Option<Dynamic>,
    pub backup: Option<Slot>,
}

reflect_record!(Preset {
    name,
    description,
    enabled,
    count,
    weight,
    offset,
    position,
    color,
    tags,
    slots,
    ranks,
    levels,
    hardpoints,
    values,
    resolver,
    backup,
});

pub fn preset() -> Preset {
    let mut slots = BTreeMap::new();
    slots.insert("a".to_string(), Slot { enabled: false, ammo: 3 });
    let mut ranks = BTreeMap::new();
    ranks.insert(1, Slot { enabled: true, ammo: 10 });
    Preset {
        name: "mech_a".to_string(),
        description: Some("light frame".to_string()),
        count: 2,
        weight: 1.5,
        position: Vector3::new(1.0, 2.0, 3.0),
        tags: ["light".to_string()].into_iter().collect(),
        slots,
        ranks,
        hardpoints: vec![Hardpoint {
            name: "front".to_string(),
            offset: Vector3::new(0.0, 1.0, 0.0),
        }],
        values: vec![1, 2, 3],
        ..Preset::default()
    }
}

pub fn engine() -> EditEngine {
    EditEngine::default()
        .with_tag::<PartResolverClear>("PartResolverClear")
        .with_tag::<PartResolverKeep>("PartResolverKeep")
}

pub fn registry() -> CollectionRegistry {
    let mut registry = CollectionRegistry::new();
    registry.register(
        Collection::new("Preset")
            .with_entry("mech_a", preset())
            .with_entry("mech_b", Preset::default()),
    );
    registry.register(Collection::<Slot>::new("Slot").with_entry("spare", Slot::default()));
    registry
}

pub fn preset_of<'r>(registry: &'r CollectionRegistry, key: &str) -> Option<&'r Preset> {
    registry.get::<Preset>("Preset")?.get(key)
}
