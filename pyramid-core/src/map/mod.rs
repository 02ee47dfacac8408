//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod component;
pub mod event;
pub mod state;

pub use self::component::{Axis, AxisPosition, BaseLayer, Component, ComponentId, Layer};
pub use self::event::{MapEvent, TileFocus};
pub use self::state::MapState;
