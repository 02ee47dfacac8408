//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::PyramidError;
use crate::pyramid::{Extent, Pyramid};
use crate::tile_index::TileIndex;
use crate::viewport::ViewportTransform;

fn unit_pyramid() -> Pyramid {
    Pyramid::area_of_interest(Extent {
        minx: 0.0,
        miny: 0.0,
        maxx: 100.0,
        maxy: 100.0,
    })
    .unwrap()
}

#[test]
fn test_invalid_viewport() {
    assert!(matches!(
        ViewportTransform::new(2, (0.0, 0.0), (0, 600)),
        Err(PyramidError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ViewportTransform::new(31, (0.0, 0.0), (800, 600)),
        Err(PyramidError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ViewportTransform::new(2, (f64::INFINITY, 0.0), (800, 600)),
        Err(PyramidError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_pixel_to_world() {
    let pyramid = unit_pyramid();
    // whole map (512x512 pixels at level 1) in view
    let view = ViewportTransform::new(1, (0.0, 0.0), (512, 512)).unwrap();
    assert_eq!(view.viewport_pixel_to_world(&pyramid, 0.0, 0.0), (0.0, 100.0));
    assert_eq!(view.viewport_pixel_to_world(&pyramid, 256.0, 256.0), (50.0, 50.0));
    assert_eq!(view.viewport_pixel_to_world(&pyramid, 512.0, 512.0), (100.0, 0.0));
    assert_eq!(view.visible_extent(&pyramid), *pyramid.extent());

    // panned
    let view = ViewportTransform::new(2, (256.0, 512.0), (256, 256)).unwrap();
    assert_eq!(
        view.visible_extent(&pyramid),
        Extent {
            minx: 25.0,
            miny: 25.0,
            maxx: 50.0,
            maxy: 50.0,
        }
    );
    assert_eq!(view.world_to_viewport_pixel(&pyramid, 25.0, 50.0), (0.0, 0.0));
    assert_eq!(view.world_to_viewport_pixel(&pyramid, 37.5, 37.5), (128.0, 128.0));
    for &(px, py) in &[(0.0, 0.0), (17.0, 230.0), (255.0, 1.0)] {
        let (x, y) = view.viewport_pixel_to_world(&pyramid, px, py);
        assert_eq!(view.world_to_viewport_pixel(&pyramid, x, y), (px, py));
    }
}

#[test]
fn test_tile_and_bin_for_pixel() {
    let pyramid = unit_pyramid();
    let view = ViewportTransform::new(1, (0.0, 0.0), (512, 512)).unwrap();

    // top-left pixel is in the top row of tiles
    let resolved = view.tile_and_bin_for_pixel(&pyramid, 0.0, 0.0, 1).unwrap();
    assert_eq!(resolved.tile, TileIndex { level: 1, x: 0, y: 1 });
    let resolved = view.tile_and_bin_for_pixel(&pyramid, 511.0, 511.0, 1).unwrap();
    assert_eq!(resolved.tile, TileIndex { level: 1, x: 1, y: 0 });
    let resolved = view.tile_and_bin_for_pixel(&pyramid, 256.0, 256.0, 1).unwrap();
    assert_eq!(resolved.tile, TileIndex { level: 1, x: 1, y: 1 });

    // one bin per tile pixel, bins counted from the bottom
    let resolved = view.tile_and_bin_for_pixel(&pyramid, 10.5, 10.5, 256).unwrap();
    assert_eq!(resolved.tile.key(), "1,0,1");
    assert_eq!((resolved.bin.x, resolved.bin.y), (10, 245));

    assert!(view
        .tile_and_bin_for_pixel(&pyramid, 600.0, 10.0, 1)
        .unwrap_err()
        .is_out_of_bounds());
    assert!(view
        .tile_and_bin_for_pixel(&pyramid, 10.0, -1.0, 1)
        .unwrap_err()
        .is_out_of_bounds());
}

#[test]
fn test_idempotence() {
    let pyramid = Pyramid::web_mercator();
    let view = ViewportTransform::new(5, (3000.0, 2500.0), (1024, 768)).unwrap();
    let first = view.tile_and_bin_for_pixel(&pyramid, 123.0, 456.0, 8);
    let second = view.tile_and_bin_for_pixel(&pyramid, 123.0, 456.0, 8);
    assert_eq!(first, second);
    assert_eq!(first.unwrap().tile.key(), second.unwrap().tile.key());
}

#[test]
fn test_centered_on() {
    let pyramid = unit_pyramid();
    let view = ViewportTransform::centered_on(&pyramid, 50.0, 50.0, 1, (200, 100)).unwrap();
    assert_eq!(view.origin(), (156.0, 206.0));
    assert_eq!(view.size(), (200, 100));
    assert_eq!(view.zoom(), 1);
    assert_eq!(view.viewport_pixel_to_world(&pyramid, 100.0, 50.0), (50.0, 50.0));

    let grid = Pyramid::web_mercator();
    let view = ViewportTransform::centered_on(&grid, 0.0, 0.0, 3, (256, 256)).unwrap();
    assert_eq!(view.origin(), (896.0, 896.0));
}

#[test]
fn test_tiles_in_view() {
    let pyramid = unit_pyramid();
    let view = ViewportTransform::new(2, (300.0, 300.0), (200, 200)).unwrap();
    // x: 29.3..48.8, y: 51.2..70.7
    let tiles = view.tiles_in_view(&pyramid).unwrap().tile_keys();
    assert_eq!(tiles, vec!["2,1,2"]);

    // partly outside of the map
    let view = ViewportTransform::new(1, (-100.0, -100.0), (300, 300)).unwrap();
    let tiles = view.tiles_in_view(&pyramid).unwrap().tile_keys();
    assert_eq!(tiles, vec!["1,0,1"]);

    // aligned to the borders of a single tile
    let view = ViewportTransform::new(2, (256.0, 512.0), (256, 256)).unwrap();
    let tiles = view.tiles_in_view(&pyramid).unwrap().tile_keys();
    assert_eq!(tiles, vec!["2,1,1"]);

    // whole map
    let view = ViewportTransform::new(1, (0.0, 0.0), (512, 512)).unwrap();
    assert_eq!(view.tiles_in_view(&pyramid).unwrap().count(), 4);

    // completely outside of the map
    let view = ViewportTransform::new(1, (1000.0, 1000.0), (300, 300)).unwrap();
    assert_eq!(view.tiles_in_view(&pyramid).unwrap().count(), 0);
}
