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

#![allow(dead_code)]

use entattr_core::{
    AttributeType, BoolTranslation, FunctionBinding, KeyValueDescriptor, OffsetDescriptor,
    PropertyDescriptor, Value,
};
use entattr_data::CatalogSet;
use entattr_infra::SimulatedEngine;

pub const PLAYER: u32 = 1;
pub const CRATE: u32 = 2;
pub const ARMOR_OFFSET: i32 = 0x1F4;
pub const TELEPORT: &str = "CBaseEntity::Teleport";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Catalogs shared by the engine tests: render state and health for every
/// entity, player-only life state, armor and teleport.
pub fn catalogs() -> CatalogSet {
    CatalogSet::new()
        .with_property(
            "entity",
            "health",
            PropertyDescriptor::new("m_iHealth", AttributeType::Int),
        )
        .with_property(
            "entity",
            "render",
            PropertyDescriptor::new("m_clrRender", AttributeType::Int),
        )
        .with_property(
            "entity",
            "rendermode",
            PropertyDescriptor::new("m_nRenderMode", AttributeType::Int),
        )
        .with_property(
            "entity",
            "renderfx",
            PropertyDescriptor::new("m_nRenderFX", AttributeType::Int),
        )
        .with_property(
            "player",
            "alive",
            PropertyDescriptor::new("m_lifeState", AttributeType::Int)
                .with_translation(BoolTranslation::boolean(0, 2)),
        )
        .with_keyvalue(
            "entity",
            "targetname",
            KeyValueDescriptor {
                ty: AttributeType::StringPointer,
            },
        )
        .with_offset(
            "player",
            "armor",
            OffsetDescriptor {
                offset: ARMOR_OFFSET,
                ty: AttributeType::Int,
            },
        )
        .with_offset(
            "player",
            "velocity",
            OffsetDescriptor {
                offset: 0x40,
                ty: AttributeType::Vector,
            },
        )
        .with_function(
            "entity",
            "teleport",
            FunctionBinding {
                symbol: TELEPORT.to_owned(),
                params: vec![AttributeType::Pointer, AttributeType::Vector],
                return_type: Some(AttributeType::Bool),
                receiver_index: Some(0),
            },
        )
}

/// A player in slot 1 and a crate in slot 2, both white and fully opaque.
pub fn world() -> SimulatedEngine {
    let mut engine = SimulatedEngine::new(16);

    engine
        .spawn(PLAYER, "player")
        .declare_property("m_iHealth", 100)
        .declare_property("m_clrRender", Value::Int(-1))
        .declare_property("m_nRenderMode", 0)
        .declare_property("m_nRenderFX", 0)
        .declare_property("m_lifeState", 0)
        .declare_keyvalue("targetname", "hero");

    engine
        .spawn(CRATE, "prop_physics")
        .declare_property("m_iHealth", 30)
        .declare_property("m_clrRender", Value::Int(-1))
        .declare_property("m_nRenderMode", 0)
        .declare_property("m_nRenderFX", 0)
        .declare_keyvalue("targetname", "crate_01");

    engine.register_native(TELEPORT, |args| Ok(Some(Value::Int(args.len() as i64 - 1))));
    engine
}
