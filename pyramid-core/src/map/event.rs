//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Map change notifications

use serde_json::Value;
use tile_pyramid::TileIndex;

/// Change of observable map state
#[derive(PartialEq, Clone, Debug)]
pub enum MapEvent {
    BaseLayerIndex(usize),
    Zoom(u8),
    TileFocus {
        previous: Option<String>,
        current: String,
    },
}

impl MapEvent {
    /// Name of the changed field
    pub fn field(&self) -> &'static str {
        match self {
            MapEvent::BaseLayerIndex(_) => "baseLayerIndex",
            MapEvent::Zoom(_) => "zoom",
            MapEvent::TileFocus { .. } => "tileFocus",
        }
    }

    /// Notification payload `{"field": .., "value": ..}`
    pub fn to_json(&self) -> Value {
        let value = match self {
            MapEvent::BaseLayerIndex(index) => json!(index),
            MapEvent::Zoom(zoom) => json!(zoom),
            MapEvent::TileFocus { current, .. } => json!(current),
        };
        json!({ "field": self.field(), "value": value })
    }
}

/// Tile currently under the mouse
#[derive(Default, Clone, Debug)]
pub struct TileFocus {
    current: Option<TileIndex>,
    previous: Option<TileIndex>,
}

impl TileFocus {
    pub fn current(&self) -> Option<&TileIndex> {
        self.current.as_ref()
    }
    pub fn previous(&self) -> Option<&TileIndex> {
        self.previous.as_ref()
    }
    /// Move the focus to `tile`. Returns an event only if the focus changed.
    pub fn update(&mut self, tile: TileIndex) -> Option<MapEvent> {
        if self.current == Some(tile) {
            return None;
        }
        self.previous = self.current.replace(tile);
        Some(MapEvent::TileFocus {
            previous: self.previous.map(|t| t.key()),
            current: tile.key(),
        })
    }
}

#[test]
fn test_focus_changes() {
    let mut focus = TileFocus::default();
    assert!(focus.current().is_none());

    let tile = TileIndex { level: 1, x: 0, y: 1 };
    assert_eq!(
        focus.update(tile),
        Some(MapEvent::TileFocus {
            previous: None,
            current: "1,0,1".to_string(),
        })
    );
    assert_eq!(focus.update(tile), None);

    let next = TileIndex { level: 1, x: 1, y: 1 };
    assert_eq!(
        focus.update(next),
        Some(MapEvent::TileFocus {
            previous: Some("1,0,1".to_string()),
            current: "1,1,1".to_string(),
        })
    );
    assert_eq!(focus.current(), Some(&next));
    assert_eq!(focus.previous(), Some(&tile));
}

#[test]
fn test_event_json() {
    let event = MapEvent::TileFocus {
        previous: None,
        current: "2,1,3".to_string(),
    };
    assert_eq!(
        event.to_json().to_string(),
        r#"{"field":"tileFocus","value":"2,1,3"}"#
    );
    assert_eq!(
        MapEvent::BaseLayerIndex(1).to_json().to_string(),
        r#"{"field":"baseLayerIndex","value":1}"#
    );
}
