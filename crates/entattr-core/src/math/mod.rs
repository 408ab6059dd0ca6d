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

//! Small fixed-layout math types exchanged with engine memory.
//!
//! Only the shapes that cross the attribute boundary live here: a three
//! component float vector and an 8-bit-per-channel color.

mod color;
mod vector;

pub use color::Rgba8;
pub use vector::Vec3;
