// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod common;

use common::{catalogs, init_logging, world, ARMOR_OFFSET, CRATE, PLAYER};
use entattr_core::{
    AttributeError, AttributeType, CapabilitySet, EntityIndex, NativeError, Pointer,
    PropertyDescriptor, Value, Vec3,
};
use entattr_data::{AttributeEngine, CatalogRegistry};

fn player_caps() -> CapabilitySet {
    CapabilitySet::new(["player"])
}

#[test]
fn test_health_write_reaches_the_networked_property() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    let mut engine = AttributeEngine::new(&mut backend, &registry);

    let mut player = engine.resolve(PLAYER, player_caps()).unwrap();
    assert_eq!(engine.get(&player, "health").unwrap(), Value::Int(100));

    engine.set(&mut player, "health", 75).unwrap();

    assert_eq!(engine.get(&player, "health").unwrap(), Value::Int(75));
    let stored = engine.backend().edict(PLAYER).unwrap().property("m_iHealth");
    assert_eq!(stored, Some(&Value::Int(75)));
}

#[test]
fn test_invalid_indices_are_rejected() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    backend.free(CRATE);
    let engine = AttributeEngine::new(&mut backend, &registry);

    assert_eq!(
        engine.resolve(9u32, CapabilitySet::universal()).unwrap_err(),
        AttributeError::InvalidIndex(EntityIndex(9))
    );
    assert_eq!(
        engine.resolve(CRATE, CapabilitySet::universal()).unwrap_err(),
        AttributeError::InvalidIndex(EntityIndex(CRATE))
    );
    assert_eq!(
        engine.resolve(500u32, CapabilitySet::universal()).unwrap_err().to_string(),
        "Index \"500\" is not a proper entity index"
    );
}

#[test]
fn test_boolean_translation() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    let mut engine = AttributeEngine::new(&mut backend, &registry);
    let mut player = engine.resolve(PLAYER, player_caps()).unwrap();

    assert_eq!(engine.get(&player, "alive").unwrap(), Value::Bool(true));

    engine.set(&mut player, "alive", false).unwrap();
    assert_eq!(engine.get(&player, "alive").unwrap(), Value::Bool(false));
    assert_eq!(
        engine.backend().edict(PLAYER).unwrap().property("m_lifeState"),
        Some(&Value::Int(2))
    );

    let err = engine.set(&mut player, "alive", 5).unwrap_err();
    assert_eq!(
        err,
        AttributeError::InvalidPropertyValue {
            name: "alive".to_owned(),
            key: "5".to_owned(),
        }
    );
}

#[test]
fn test_keyvalues() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    let mut engine = AttributeEngine::new(&mut backend, &registry);
    let mut crate_ = engine.resolve(CRATE, CapabilitySet::universal()).unwrap();

    assert_eq!(
        engine.get(&crate_, "targetname").unwrap(),
        Value::String("crate_01".into())
    );
    engine.set(&mut crate_, "targetname", "crate_02").unwrap();
    assert_eq!(
        engine.get(&crate_, "targetname").unwrap(),
        Value::String("crate_02".into())
    );

    let err = engine.set(&mut crate_, "targetname", 3).unwrap_err();
    assert!(matches!(err, AttributeError::TypeMismatch { found: "int", .. }));
}

#[test]
fn test_offsets_are_idempotent() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    let mut engine = AttributeEngine::new(&mut backend, &registry);
    let mut player = engine.resolve(PLAYER, player_caps()).unwrap();

    engine.set(&mut player, "armor", 50).unwrap();
    engine.set(&mut player, "armor", 50).unwrap();
    assert_eq!(engine.get(&player, "armor").unwrap(), Value::Int(50));

    let base = engine.backend().edict(PLAYER).unwrap().base();
    let raw = engine
        .backend()
        .memory()
        .read_pod::<i32>(Pointer(base.0 + ARMOR_OFFSET as usize))
        .unwrap();
    assert_eq!(raw, 50);

    let velocity = Vec3::new(1.0, 2.0, 3.0);
    engine.set(&mut player, "velocity", velocity).unwrap();
    assert_eq!(engine.get(&player, "velocity").unwrap(), Value::Vector(velocity));
}

#[test]
fn test_capabilities_gate_catalogs() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    let engine = AttributeEngine::new(&mut backend, &registry);

    let crate_ = engine.resolve(CRATE, CapabilitySet::universal()).unwrap();
    assert_eq!(engine.get(&crate_, "health").unwrap(), Value::Int(30));
    assert_eq!(
        engine.get(&crate_, "armor").unwrap_err(),
        AttributeError::AttributeNotFound("armor".to_owned())
    );
}

#[test]
fn test_delegates_shadow_catalogs() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    {
        let player = backend.edict_mut(PLAYER).unwrap();
        player.entity_vars_mut().insert("health", 1);
        player.entity_vars_mut().insert("frags", 12);
        player.edict_fields_mut().insert("frags", 3);
    }
    let mut engine = AttributeEngine::new(&mut backend, &registry);
    let mut player = engine.resolve(PLAYER, player_caps()).unwrap();

    assert_eq!(engine.get(&player, "health").unwrap(), Value::Int(1));
    assert_eq!(engine.get(&player, "frags").unwrap(), Value::Int(3));

    // Delegates are read-only: the write goes to the property.
    engine.set(&mut player, "health", 40).unwrap();
    assert_eq!(
        engine.backend().edict(PLAYER).unwrap().property("m_iHealth"),
        Some(&Value::Int(40))
    );
    assert_eq!(engine.get(&player, "health").unwrap(), Value::Int(1));
}

#[test]
fn test_computed_attributes() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    let mut engine = AttributeEngine::new(&mut backend, &registry);
    let mut player = engine.resolve(PLAYER, player_caps()).unwrap();
    let base = engine.backend().edict(PLAYER).unwrap().base();

    assert_eq!(engine.get(&player, "index").unwrap(), Value::UInt(1));
    assert_eq!(engine.get(&player, "classname").unwrap(), Value::String("player".into()));
    assert_eq!(engine.get(&player, "inthandle").unwrap(), Value::Handle(1));
    assert_eq!(engine.get(&player, "pointer").unwrap(), Value::Pointer(base));
    assert_eq!(
        engine.get(&player, "capabilities").unwrap(),
        Value::String("entity,player".into())
    );

    assert_eq!(
        engine.set(&mut player, "classname", "npc").unwrap_err(),
        AttributeError::ReadOnlyAttribute("classname".to_owned())
    );
}

#[test]
fn test_private_attributes() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    let mut engine = AttributeEngine::new(&mut backend, &registry);
    let mut player = engine.resolve(PLAYER, player_caps()).unwrap();

    engine.set(&mut player, "_classname", "worldspawn").unwrap();
    assert_eq!(
        engine.get(&player, "classname").unwrap(),
        Value::String("worldspawn".into())
    );
    assert_eq!(engine.get(&player, "_index").unwrap(), Value::UInt(1));

    assert_eq!(
        engine.set(&mut player, "_secret", 1).unwrap_err(),
        AttributeError::InvalidPrivateAttribute("_secret".to_owned())
    );
}

#[test]
fn test_unknown_names() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    let mut engine = AttributeEngine::new(&mut backend, &registry);
    let mut player = engine.resolve(PLAYER, player_caps()).unwrap();

    let err = engine.get(&player, "nickname").unwrap_err();
    assert_eq!(err.to_string(), "Attribute \"nickname\" not found");

    engine.set(&mut player, "nickname", "ace").unwrap();
    assert_eq!(engine.get(&player, "nickname").unwrap(), Value::String("ace".into()));
    assert_eq!(player.local("nickname"), Some(&Value::String("ace".into())));
}

#[test]
fn test_backend_errors_name_the_attribute() {
    init_logging();
    let registry = CatalogRegistry::with_catalogs(catalogs());
    let mut backend = world();
    let engine = AttributeEngine::new(&mut backend, &registry);
    // The crate declares no life state.
    let crate_ = engine.resolve(CRATE, player_caps()).unwrap();

    assert_eq!(
        engine.get(&crate_, "alive").unwrap_err(),
        AttributeError::Native {
            name: "alive".to_owned(),
            source: NativeError::UnknownProperty("m_lifeState".to_owned()),
        }
    );
}

#[test]
fn test_property_round_trip_per_type() {
    init_logging();
    let set = catalogs()
        .with_property(
            "player",
            "speed",
            PropertyDescriptor::new("m_flMaxspeed", AttributeType::Float),
        )
        .with_property(
            "player",
            "origin",
            PropertyDescriptor::new("m_vecOrigin", AttributeType::Vector),
        )
        .with_property(
            "player",
            "model",
            PropertyDescriptor::new("m_ModelName", AttributeType::StringPointer),
        )
        .with_property(
            "player",
            "owner",
            PropertyDescriptor::new("m_hOwnerEntity", AttributeType::EHandle),
        )
        .with_property(
            "player",
            "account",
            PropertyDescriptor::new("m_iAccount", AttributeType::UInt),
        );
    let registry = CatalogRegistry::with_catalogs(set);
    let mut backend = world();
    backend
        .edict_mut(PLAYER)
        .unwrap()
        .declare_property("m_flMaxspeed", 0.0)
        .declare_property("m_vecOrigin", Vec3::ZERO)
        .declare_property("m_ModelName", "")
        .declare_property("m_hOwnerEntity", Value::Handle(0))
        .declare_property("m_iAccount", Value::UInt(0));
    let mut engine = AttributeEngine::new(&mut backend, &registry);
    let mut player = engine.resolve(PLAYER, player_caps()).unwrap();

    let cases = [
        ("speed", Value::Float(320.5)),
        ("origin", Value::Vector(Vec3::new(-128.0, 64.25, 0.5))),
        ("model", Value::String("models/player.mdl".into())),
        ("owner", Value::Handle(0x1003)),
        ("account", Value::UInt(4_000_000_000)),
        ("health", Value::Int(-5)),
    ];
    for (name, value) in cases {
        engine.set(&mut player, name, value.clone()).unwrap();
        assert_eq!(engine.get(&player, name).unwrap(), value, "round trip of '{name}'");
    }

    // Integers are accepted where a float is declared.
    engine.set(&mut player, "speed", 250).unwrap();
    assert_eq!(engine.get(&player, "speed").unwrap(), Value::Float(250.0));
}
