//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use pyramid_core::core::{gen_config, read_config, ApplicationCfg, Config};
use pyramid_core::map::MapState;
use std::env;
use std::io::Write;
use std::process;
use std::str::FromStr;
use tile_pyramid::{
    lonlat_to_merc, parse_level, Extent, Pyramid, PyramidError, TileIterator, ViewportTransform,
};
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => loglevel.unwrap_or("info").to_string(),
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn parse_arg<T: FromStr>(args: &ArgMatches<'_>, name: &str) -> Result<Option<T>, String> {
    match args.value_of(name) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("Error parsing '{}' value '{}'", name, value)),
        None => Ok(None),
    }
}

fn parse_numlist(
    args: &ArgMatches<'_>,
    name: &str,
    len: usize,
) -> Result<Option<Vec<f64>>, String> {
    let numlist = match args.value_of(name) {
        Some(numlist) => numlist,
        None => return Ok(None),
    };
    let values = numlist
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| format!("Error parsing '{}' as list of float values", name))?;
    if values.len() != len {
        return Err(format!(
            "Expected {} comma separated values for '{}', got {}",
            len,
            name,
            values.len()
        ));
    }
    Ok(Some(values))
}

fn config_from_args(args: &ArgMatches<'_>) -> Result<ApplicationCfg, String> {
    let path = args
        .value_of("config")
        .ok_or("Missing argument --config".to_string())?;
    info!("Reading configuration from '{}'", path);
    read_config(path)
}

fn viewport_from_config(config: &ApplicationCfg) -> Result<ViewportTransform, String> {
    let viewport_cfg = config
        .viewport
        .as_ref()
        .ok_or("Missing configuration entry [viewport]".to_string())?;
    ViewportTransform::from_config(viewport_cfg)
}

fn tiles(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = config_from_args(args)?;
    let pyramid = Pyramid::from_config(&config.pyramid)?;
    let level = args
        .value_of("level")
        .ok_or("Missing argument --level".to_string())
        .and_then(|level| parse_level(level).map_err(|e| e.to_string()))?;
    let limit = parse_arg::<usize>(args, "limit")?;
    let extent = parse_numlist(args, "extent", 4)?.map(|arr| Extent {
        minx: arr[0],
        miny: arr[1],
        maxx: arr[2],
        maxy: arr[3],
    });
    let tiles = match extent {
        Some(ref extent) => TileIterator::new(&pyramid, level, extent),
        None => TileIterator::full(&pyramid, level),
    }
    .map_err(|e| e.to_string())?;
    info!("{} tiles at level {}", tiles.remaining(), level);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for tile in tiles.take(limit.unwrap_or(usize::MAX)) {
        writeln!(out, "{}", tile).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn resolve(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = config_from_args(args)?;
    let pyramid = Pyramid::from_config(&config.pyramid)?;
    let view = viewport_from_config(&config)?;
    let pixel = parse_numlist(args, "pixel", 2)?.ok_or("Missing argument --pixel".to_string())?;
    let bins = match parse_arg::<u32>(args, "bins")? {
        Some(bins) => bins,
        None => config.viewport.as_ref().map_or(1, |viewport| viewport.bins),
    };
    debug!(
        "Resolving pixel ({}, {}) at zoom level {}",
        pixel[0],
        pixel[1],
        view.zoom()
    );
    match view.tile_and_bin_for_pixel(&pyramid, pixel[0], pixel[1], bins) {
        Ok(resolved) => {
            println!(
                "tile={} bin={},{}",
                resolved.tile, resolved.bin.x, resolved.bin.y
            );
            Ok(())
        }
        Err(PyramidError::OutOfBounds { .. }) => {
            println!("no tile under cursor");
            Ok(())
        }
        Err(e) => Err(e.to_string()),
    }
}

fn inview(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = config_from_args(args)?;
    let map = MapState::from_config(&config)?;
    for key in map.tiles_in_view() {
        println!("{}", key);
    }
    Ok(())
}

fn lonlat(args: &ArgMatches<'_>) -> Result<(), String> {
    let lon = parse_arg::<f64>(args, "lon")?.ok_or("Missing argument --lon".to_string())?;
    let lat = parse_arg::<f64>(args, "lat")?.ok_or("Missing argument --lat".to_string())?;
    let (x, y) = lonlat_to_merc(lon, lat);
    println!("{},{}", x, y);
    Ok(())
}

fn main() {
    dotenv().ok();
    // http://kbknapp.github.io/clap-rs/clap/
    let mut app = App::new("pyramid_view")
        .version(crate_version!())
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("tile pyramid and viewport tile resolution")
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"))
        .subcommand(SubCommand::with_name("tiles")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=<FILE> 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --level=<LEVEL> 'Pyramid level'
                                              --extent=[minx,miny,maxx,maxy] 'Extent of tiles (Default: whole pyramid)'
                                              --limit=[NUM] 'Maximum number of tiles'")
                        .about("List tiles covering an extent"))
        .subcommand(SubCommand::with_name("resolve")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=<FILE> 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --pixel=<x,y> 'Viewport pixel'
                                              --bins=[NUM] 'Bins per tile dimension'")
                        .about("Resolve tile and bin under a viewport pixel"))
        .subcommand(SubCommand::with_name("inview")
                        .args_from_usage("-c, --config=<FILE> 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("List tiles in the configured viewport"))
        .subcommand(SubCommand::with_name("lonlat")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --lon=<LON> 'Longitude'
                                              --lat=<LAT> 'Latitude'")
                        .about("Project WGS84 coordinates to web mercator"));

    let result = match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
            Ok(())
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", gen_config());
                Ok(())
            }
            ("tiles", Some(sub_m)) => {
                init_logger(sub_m);
                tiles(sub_m)
            }
            ("resolve", Some(sub_m)) => {
                init_logger(sub_m);
                resolve(sub_m)
            }
            ("inview", Some(sub_m)) => {
                init_logger(sub_m);
                inview(sub_m)
            }
            ("lonlat", Some(sub_m)) => {
                init_logger(sub_m);
                lonlat(sub_m)
            }
            _ => {
                let _ = app.print_help();
                println!("");
                Ok(())
            }
        },
    };
    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}
