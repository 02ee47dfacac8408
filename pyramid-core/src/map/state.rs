//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Map state owned by a map view

use crate::core::config::{default_bins, default_zoom_levels, ApplicationCfg};
use crate::core::Config;
use crate::map::component::{Axis, AxisPosition, BaseLayer, Component, ComponentId, Layer};
use crate::map::event::{MapEvent, TileFocus};
use std::collections::BTreeMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use tile_pyramid::{Pyramid, TileIndex, ViewportTransform, MAX_LEVEL};

pub struct MapState {
    pyramid: Pyramid,
    view: ViewportTransform,
    max_zoom: u8,
    /// Bins per tile dimension for pixel resolutions
    bins: u32,
    base_layers: Vec<BaseLayer>,
    /// `None` until the first base layer is added
    base_layer_index: Option<usize>,
    layers: BTreeMap<String, Layer>,
    axes: BTreeMap<AxisPosition, Axis>,
    /// Components added before the map was activated
    deferred: Vec<Component>,
    focus: TileFocus,
    last_mouse: Option<(f64, f64)>,
    subscribers: Vec<Sender<MapEvent>>,
}

impl MapState {
    pub fn new(pyramid: Pyramid, view: ViewportTransform, zoom_levels: u8) -> MapState {
        let max_zoom = zoom_levels.saturating_sub(1).min(MAX_LEVEL);
        let view = if view.zoom() > max_zoom {
            warn!(
                "Initial zoom level {} clamped to {}",
                view.zoom(),
                max_zoom
            );
            let (cx, cy) = view.visible_extent(&pyramid).center();
            match ViewportTransform::centered_on(&pyramid, cx, cy, max_zoom, view.size()) {
                Ok(clamped) => clamped,
                Err(e) => {
                    warn!("Cannot clamp initial view: {}", e);
                    ViewportTransform::new(max_zoom, (0.0, 0.0), view.size()).unwrap_or(view)
                }
            }
        } else {
            view
        };
        MapState {
            pyramid,
            view,
            max_zoom,
            bins: default_bins(),
            base_layers: Vec::new(),
            base_layer_index: None,
            layers: BTreeMap::new(),
            axes: BTreeMap::new(),
            deferred: Vec::new(),
            focus: TileFocus::default(),
            last_mouse: None,
            subscribers: Vec::new(),
        }
    }

    pub fn from_config(config: &ApplicationCfg) -> Result<MapState, String> {
        let pyramid = Pyramid::from_config(&config.pyramid)?;
        let viewport_cfg = config
            .viewport
            .as_ref()
            .ok_or("Missing configuration entry [viewport]".to_string())?;
        let view = ViewportTransform::from_config(viewport_cfg)?;
        let zoom_levels = config
            .map
            .as_ref()
            .map_or(default_zoom_levels(), |map| map.zoom_levels);
        if viewport_cfg.bins == 0 {
            return Err("Bins per tile dimension must be at least 1".to_string());
        }
        let mut state = MapState::new(pyramid, view, zoom_levels);
        state.bins = viewport_cfg.bins;
        Ok(state)
    }

    pub fn pyramid(&self) -> &Pyramid {
        &self.pyramid
    }
    pub fn view(&self) -> &ViewportTransform {
        &self.view
    }
    pub fn zoom(&self) -> u8 {
        self.view.zoom()
    }
    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
    pub fn bins(&self) -> u32 {
        self.bins
    }
    /// Width of the whole map at the current zoom level, in pixels
    pub fn map_width(&self) -> u64 {
        self.pyramid.map_pixel_size(self.zoom())
    }
    /// Height of the whole map at the current zoom level, in pixels
    pub fn map_height(&self) -> u64 {
        self.pyramid.map_pixel_size(self.zoom())
    }
    /// A map is active as soon as it has a base layer
    pub fn is_active(&self) -> bool {
        self.base_layer_index.is_some()
    }
    pub fn base_layer_index(&self) -> Option<usize> {
        self.base_layer_index
    }
    pub fn base_layers(&self) -> &[BaseLayer] {
        &self.base_layers
    }
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.get(id)
    }
    pub fn axis(&self, position: AxisPosition) -> Option<&Axis> {
        self.axes.get(&position)
    }
    pub fn deferred(&self) -> &[Component] {
        &self.deferred
    }

    /// Register for change notifications
    pub fn subscribe(&mut self) -> Receiver<MapEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, event: MapEvent) {
        // drop subscribers whose receiver is gone
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    /// Attach a component.
    /// Layers and axes added before the first base layer are activated with it.
    pub fn add(&mut self, component: Component) {
        match component {
            Component::BaseLayer(baselayer) => self.add_base_layer(baselayer),
            component if !self.is_active() => {
                debug!("Deferring activation of {}", component.id());
                self.deferred.push(component);
            }
            component => self.activate(component),
        }
    }

    fn add_base_layer(&mut self, baselayer: BaseLayer) {
        info!("Adding baselayer '{}'", baselayer.name);
        self.base_layers.push(baselayer);
        if self.base_layer_index.is_none() {
            // first base layer activates the map
            if let Err(e) = self.set_base_layer_index(0) {
                warn!("Activating map failed: {}", e);
            }
            let deferred: Vec<Component> = self.deferred.drain(..).collect();
            for component in deferred {
                self.activate(component);
            }
        }
    }

    fn activate(&mut self, component: Component) {
        debug!("Activating {}", component.id());
        match component {
            Component::BaseLayer(baselayer) => self.add_base_layer(baselayer),
            Component::Layer(mut layer) => {
                layer.set_active(true);
                if let Some(replaced) = self.layers.insert(layer.id.clone(), layer) {
                    warn!("Replacing layer '{}'", replaced.id);
                }
            }
            Component::Axis(mut axis) => {
                let extent = self.pyramid.extent();
                if axis.position.is_horizontal() {
                    axis.min = extent.minx;
                    axis.max = extent.maxx;
                } else {
                    axis.min = extent.miny;
                    axis.max = extent.maxy;
                }
                axis.set_active(true);
                self.axes.insert(axis.position, axis);
            }
        }
    }

    /// Detach a component and return it deactivated
    pub fn remove(&mut self, id: &ComponentId) -> Result<Component, String> {
        if !self.is_active() {
            let pos = self
                .deferred
                .iter()
                .position(|component| component.id() == *id)
                .ok_or(format!("Unknown {}", id))?;
            return Ok(self.deferred.remove(pos));
        }
        debug!("Deactivating {}", id);
        match id {
            ComponentId::BaseLayer(name) => self.remove_base_layer(name),
            ComponentId::Layer(layer_id) => {
                let mut layer = self
                    .layers
                    .remove(layer_id)
                    .ok_or(format!("Unknown {}", id))?;
                layer.set_active(false);
                Ok(Component::Layer(layer))
            }
            ComponentId::Axis(position) => {
                let mut axis = self
                    .axes
                    .remove(position)
                    .ok_or(format!("Unknown {}", id))?;
                axis.set_active(false);
                Ok(Component::Axis(axis))
            }
        }
    }

    fn remove_base_layer(&mut self, name: &str) -> Result<Component, String> {
        let index = self
            .base_layers
            .iter()
            .position(|layer| layer.name == name)
            .ok_or(format!("Unknown baselayer '{}'", name))?;
        if self.base_layers.len() == 1 {
            warn!("Attempting to remove the only baselayer '{}' from map", name);
            return Err("Cannot remove the only baselayer of a map".to_string());
        }
        let active = self.base_layer_index;
        let mut removed = self.base_layers.remove(index);
        removed.set_active(false);
        match active {
            Some(active) if active == index => {
                // replace with the following layer, or the preceding one if it was the last
                let replacement = if index < self.base_layers.len() {
                    index
                } else {
                    index - 1
                };
                self.base_layer_index = None;
                self.set_base_layer_index(replacement)?;
            }
            Some(active) if active > index => {
                self.base_layer_index = Some(active - 1);
            }
            _ => {}
        }
        Ok(Component::BaseLayer(removed))
    }

    /// Switch the active base layer
    pub fn set_base_layer_index(&mut self, index: usize) -> Result<(), String> {
        if index >= self.base_layers.len() {
            warn!("No baselayer for supplied index {}", index);
            return Err(format!("No baselayer for supplied index {}", index));
        }
        if let Some(old) = self.base_layer_index {
            if let Some(baselayer) = self.base_layers.get_mut(old) {
                baselayer.set_active(false);
            }
        }
        self.base_layers[index].set_active(true);
        self.base_layer_index = Some(index);
        info!("Active baselayer: '{}'", self.base_layers[index].name);
        self.publish(MapEvent::BaseLayerIndex(index));
        Ok(())
    }

    /// Tile currently under the mouse
    pub fn tile_focus(&self) -> Option<&TileIndex> {
        self.focus.current()
    }
    pub fn previous_tile_focus(&self) -> Option<&TileIndex> {
        self.focus.previous()
    }

    /// Track the mouse at viewport pixel `(px, py)`.
    /// Returns the change event if the tile under the mouse changed.
    pub fn update_tile_focus(&mut self, px: f64, py: f64) -> Option<MapEvent> {
        self.last_mouse = Some((px, py));
        match self
            .view
            .tile_and_bin_for_pixel(&self.pyramid, px, py, self.bins)
        {
            Ok(resolved) => {
                let event = self.focus.update(resolved.tile)?;
                self.publish(event.clone());
                Some(event)
            }
            Err(e) => {
                trace!("No tile under ({}, {}): {}", px, py, e);
                None
            }
        }
    }

    /// Keys of all tiles in the current view
    pub fn tiles_in_view(&self) -> Vec<String> {
        match self.view.tiles_in_view(&self.pyramid) {
            Ok(mut tiles) => tiles.tile_keys(),
            Err(e) => {
                warn!("Cannot determine tiles in view: {}", e);
                Vec::new()
            }
        }
    }

    fn set_view(&mut self, view: ViewportTransform) {
        let zoom_changed = view.zoom() != self.view.zoom();
        self.view = view;
        if zoom_changed {
            self.publish(MapEvent::Zoom(self.view.zoom()));
            // refresh focus for the tile now under the mouse
            if let Some((px, py)) = self.last_mouse {
                self.update_tile_focus(px, py);
            }
        }
    }

    fn clamp_zoom(&self, zoom: u8) -> u8 {
        if zoom > self.max_zoom {
            debug!("Zoom level {} clamped to {}", zoom, self.max_zoom);
            self.max_zoom
        } else {
            zoom
        }
    }

    /// Change the zoom level, keeping the view center
    pub fn set_zoom(&mut self, zoom: u8) -> Result<(), String> {
        let zoom = self.clamp_zoom(zoom);
        let (cx, cy) = self.view.visible_extent(&self.pyramid).center();
        let view = ViewportTransform::centered_on(&self.pyramid, cx, cy, zoom, self.view.size())
            .map_err(|e| e.to_string())?;
        self.set_view(view);
        Ok(())
    }

    /// Center the view on `(x, y)` at `zoom`.
    /// For geographic pyramids `x` and `y` are longitude and latitude.
    pub fn zoom_to(&mut self, x: f64, y: f64, zoom: u8) -> Result<(), String> {
        let zoom = self.clamp_zoom(zoom);
        let (wx, wy) = self.pyramid.lonlat_to_world(x, y).unwrap_or((x, y));
        let view = ViewportTransform::centered_on(&self.pyramid, wx, wy, zoom, self.view.size())
            .map_err(|e| e.to_string())?;
        self.set_view(view);
        Ok(())
    }

    /// Center the view on `(x, y)` at the current zoom level
    pub fn pan_to(&mut self, x: f64, y: f64) -> Result<(), String> {
        let zoom = self.zoom();
        self.zoom_to(x, y, zoom)
    }

    /// Viewport size changed
    pub fn resize(&mut self, size: (u32, u32)) -> Result<(), String> {
        let view = ViewportTransform::new(self.view.zoom(), self.view.origin(), size)
            .map_err(|e| e.to_string())?;
        self.set_view(view);
        Ok(())
    }
}
