//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Map components

use std::fmt;
use std::str::FromStr;

/// Axis placement around the map
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub enum AxisPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisPosition {
    /// Top and bottom axes label the x range
    pub fn is_horizontal(&self) -> bool {
        matches!(self, AxisPosition::Top | AxisPosition::Bottom)
    }
}

impl FromStr for AxisPosition {
    type Err = String;

    fn from_str(position: &str) -> Result<AxisPosition, String> {
        match position.to_lowercase().as_str() {
            "top" => Ok(AxisPosition::Top),
            "bottom" => Ok(AxisPosition::Bottom),
            "left" => Ok(AxisPosition::Left),
            "right" => Ok(AxisPosition::Right),
            _ => Err(format!("Unexpected axis position '{}'", position)),
        }
    }
}

impl fmt::Display for AxisPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AxisPosition::Top => "top",
            AxisPosition::Bottom => "bottom",
            AxisPosition::Left => "left",
            AxisPosition::Right => "right",
        };
        f.write_str(name)
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct BaseLayer {
    pub name: String,
    active: bool,
}

impl BaseLayer {
    pub fn new(name: &str) -> BaseLayer {
        BaseLayer {
            name: name.to_string(),
            active: false,
        }
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct Layer {
    pub id: String,
    active: bool,
}

impl Layer {
    pub fn new(id: &str) -> Layer {
        Layer {
            id: id.to_string(),
            active: false,
        }
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct Axis {
    pub position: AxisPosition,
    /// Value range, taken from the pyramid extent on activation
    pub min: f64,
    pub max: f64,
    active: bool,
}

impl Axis {
    pub fn new(position: AxisPosition) -> Axis {
        Axis {
            position,
            min: 0.0,
            max: 0.0,
            active: false,
        }
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Everything which can be attached to a map
#[derive(PartialEq, Clone, Debug)]
pub enum Component {
    BaseLayer(BaseLayer),
    Layer(Layer),
    Axis(Axis),
}

/// Key of an attached component
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum ComponentId {
    BaseLayer(String),
    Layer(String),
    Axis(AxisPosition),
}

impl Component {
    pub fn id(&self) -> ComponentId {
        match self {
            Component::BaseLayer(layer) => ComponentId::BaseLayer(layer.name.clone()),
            Component::Layer(layer) => ComponentId::Layer(layer.id.clone()),
            Component::Axis(axis) => ComponentId::Axis(axis.position),
        }
    }
    pub fn is_active(&self) -> bool {
        match self {
            Component::BaseLayer(layer) => layer.is_active(),
            Component::Layer(layer) => layer.is_active(),
            Component::Axis(axis) => axis.is_active(),
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ComponentId::BaseLayer(name) => write!(f, "baselayer '{}'", name),
            ComponentId::Layer(id) => write!(f, "layer '{}'", id),
            ComponentId::Axis(position) => write!(f, "{} axis", position),
        }
    }
}
