//! Configuration validation
//!
//! Walks the generic JSON tree of a `config.json` and produces a
//! [`DashboardConfig`], or the first [`ConfigError`] found. Every field is
//! checked before anything is handed to the registry, so a failed load never
//! leaves a half-built dashboard behind.

use heapless::{String, Vec};
use serde_json::{Map, Value};

use livedash_protocol::truncated;

use super::color::Color;
use super::error::ConfigError;
use super::types::*;
use crate::layout;

type Object = Map<alloc::string::String, Value>;

/// Parse, validate, and lay out a configuration document
pub fn load(text: &str) -> Result<DashboardModel, ConfigError> {
    let root: Value = serde_json::from_str(text).map_err(|e| ConfigError::Syntax {
        line: e.line(),
        column: e.column(),
    })?;
    let config = validate(&root)?;

    let tiles = layout::resolve(config.layout.cols, config.layout.rows, &config.layout.cells)?;
    let model = DashboardModel { config, tiles };
    check_tile_references(&model)?;

    Ok(model)
}

/// Validate a parsed document tree
pub fn validate(root: &Value) -> Result<DashboardConfig, ConfigError> {
    let root = root.as_object().ok_or(ConfigError::WrongType { field: "<root>" })?;

    let robot_name = truncated(req_str(root, "robot_name", "robot_name")?);
    let ui = parse_ui(root)?;
    let layout = parse_layout(root)?;
    let gauges = parse_gauges(root, ui.stale_timeout_ms)?;
    let buttons = parse_buttons(root)?;
    let rate_lists = parse_rate_lists(root)?;
    let text_tiles = parse_text_tiles(root)?;

    let config = DashboardConfig {
        robot_name,
        ui,
        layout,
        gauges,
        buttons,
        rate_lists,
        text_tiles,
    };
    check_unique_ids(&config)?;

    Ok(config)
}

fn parse_ui(root: &Object) -> Result<UiOptions, ConfigError> {
    let ui = req_object(root, "ui", "ui")?;
    let dark_theme = req_bool(ui, "dark_theme", "ui.dark_theme")?;
    let stale_timeout_ms = req_u32(ui, "stale_timeout_ms", "ui.stale_timeout_ms")?;

    let background = match opt_str(ui, "background", "ui.background")? {
        Some(text) => parse_color(text, "ui.background")?,
        None => Color::BACKGROUND,
    };

    let splash = match opt_object(ui, "splash", "ui.splash")? {
        Some(splash) => {
            let duration_ms =
                opt_u32(splash, "duration_ms", "ui.splash.duration_ms")?.unwrap_or(0);
            // No image, no intro
            match opt_str(splash, "path", "ui.splash.path")?.filter(|p| !p.is_empty()) {
                Some(path) => Some(Splash {
                    path: String::try_from(path)
                        .map_err(|_| ConfigError::OutOfRange { field: "ui.splash.path" })?,
                    duration_ms,
                }),
                None => None,
            }
        }
        None => None,
    };

    Ok(UiOptions {
        dark_theme,
        stale_timeout_ms,
        background,
        splash,
    })
}

fn parse_layout(root: &Object) -> Result<LayoutConfig, ConfigError> {
    let layout = req_object(root, "layout", "layout")?;
    let cols = req_grid_dim(layout, "cols", "layout.cols")?;
    let rows = req_grid_dim(layout, "rows", "layout.rows")?;

    let cell_count = usize::from(cols) * usize::from(rows);
    if cell_count > MAX_TILES {
        return Err(ConfigError::CapacityExceeded {
            field: "layout",
            max: MAX_TILES,
        });
    }

    let tiles = req_array(layout, "tiles", "layout.tiles")?;
    if tiles.len() != cell_count {
        return Err(ConfigError::CapacityExceeded {
            field: "layout.tiles",
            max: cell_count,
        });
    }

    let mut cells = Vec::new();
    for cell in tiles {
        let cell = cell
            .as_object()
            .ok_or(ConfigError::WrongType { field: "layout.tiles[]" })?;
        let id = parse_id(req_str(cell, "id", "layout.tiles[].id")?, "layout.tiles[].id")?;
        // cell_count <= MAX_TILES
        let _ = cells.push(id);
    }

    Ok(LayoutConfig { cols, rows, cells })
}

fn parse_gauges(
    root: &Object,
    default_timeout_ms: u32,
) -> Result<Vec<GaugeConfig, MAX_GAUGES>, ConfigError> {
    let mut gauges = Vec::new();
    let Some(entries) = opt_array(root, "gauges", "gauges")? else {
        return Ok(gauges);
    };
    if entries.len() > MAX_GAUGES {
        return Err(ConfigError::CapacityExceeded {
            field: "gauges",
            max: MAX_GAUGES,
        });
    }

    for entry in entries {
        let g = entry.as_object().ok_or(ConfigError::WrongType { field: "gauges[]" })?;
        let id = parse_id(req_str(g, "id", "gauges[].id")?, "gauges[].id")?;
        let tile_id = parse_id(req_str(g, "tile_id", "gauges[].tile_id")?, "gauges[].tile_id")?;
        let title = truncated(req_str(g, "title", "gauges[].title")?);
        let min = req_i32(g, "min", "gauges[].min")?;
        let max = req_i32(g, "max", "gauges[].max")?;
        if min > max {
            return Err(ConfigError::OutOfRange { field: "gauges[].min" });
        }
        let accent = parse_color(req_str(g, "accent", "gauges[].accent")?, "gauges[].accent")?;

        let stale_timeout_ms = opt_u32(g, "stale_timeout_ms", "gauges[].stale_timeout_ms")?
            .unwrap_or(default_timeout_ms);
        let stale_text = opt_str(g, "stale_text", "gauges[].stale_text")?
            .filter(|text| !text.is_empty())
            .map(truncated)
            .unwrap_or_else(|| truncated(DEFAULT_STALE_TEXT));

        let config = GaugeConfig {
            id,
            tile_id,
            title,
            min,
            max,
            accent,
            initial: opt_i32(g, "initial", "gauges[].initial")?,
            initial_text: opt_str(g, "initial_text", "gauges[].initial_text")?.map(truncated),
            min_label: opt_str(g, "min_label", "gauges[].min_label")?.map(truncated),
            max_label: opt_str(g, "max_label", "gauges[].max_label")?.map(truncated),
            stale_text,
            stale_timeout_ms,
            stages: parse_stages(g),
        };
        let _ = gauges.push(config);
    }

    Ok(gauges)
}

/// Collect colour stages, skipping malformed entries, sorted descending
fn parse_stages(gauge: &Object) -> Vec<Stage, MAX_STAGES> {
    let mut stages: Vec<Stage, MAX_STAGES> = Vec::new();
    let Some(entries) = gauge.get("stages").and_then(Value::as_array) else {
        return stages;
    };

    for entry in entries {
        if stages.is_full() {
            break;
        }
        let Some(stage) = entry.as_object() else {
            continue;
        };
        let threshold = ["t", "threshold"]
            .iter()
            .find_map(|key| stage.get(*key).and_then(as_i32));
        let color = ["c", "color"]
            .iter()
            .find_map(|key| stage.get(*key).and_then(Value::as_str));

        let (Some(threshold), Some(color)) = (threshold, color) else {
            continue;
        };
        let Some(color) = Color::parse(color) else {
            continue;
        };
        let _ = stages.push(Stage { threshold, color });
    }

    stages.sort_unstable_by(|a, b| b.threshold.cmp(&a.threshold));
    stages
}

fn parse_buttons(root: &Object) -> Result<Vec<ButtonConfig, MAX_BUTTONS>, ConfigError> {
    let mut buttons = Vec::new();
    let Some(entries) = opt_array(root, "buttons", "buttons")? else {
        return Ok(buttons);
    };
    if entries.len() > MAX_BUTTONS {
        return Err(ConfigError::CapacityExceeded {
            field: "buttons",
            max: MAX_BUTTONS,
        });
    }

    for entry in entries {
        let b = entry.as_object().ok_or(ConfigError::WrongType { field: "buttons[]" })?;
        let tile_id = parse_id(req_str(b, "tile_id", "buttons[].tile_id")?, "buttons[].tile_id")?;
        let tile_title = truncated(req_str(b, "tile_title", "buttons[].tile_title")?);
        let label = truncated(req_str(b, "label", "buttons[].label")?);
        let color = parse_color(req_str(b, "color", "buttons[].color")?, "buttons[].color")?;
        let action_id = parse_id(
            req_str(b, "action_id", "buttons[].action_id")?,
            "buttons[].action_id",
        )?;
        let height = match opt_u32(b, "height", "buttons[].height")? {
            Some(h) => {
                u16::try_from(h).map_err(|_| ConfigError::OutOfRange { field: "buttons[].height" })?
            }
            None => DEFAULT_BUTTON_HEIGHT,
        };

        let _ = buttons.push(ButtonConfig {
            tile_id,
            tile_title,
            label,
            color,
            action_id,
            height,
        });
    }

    Ok(buttons)
}

fn parse_rate_lists(root: &Object) -> Result<Vec<RateListConfig, MAX_TILES>, ConfigError> {
    let mut lists = Vec::new();
    let Some(entries) = opt_array(root, "hz_lists", "hz_lists")? else {
        return Ok(lists);
    };

    let mut total_rows = 0usize;
    for entry in entries {
        let list = entry.as_object().ok_or(ConfigError::WrongType { field: "hz_lists[]" })?;
        let tile_id = parse_id(req_str(list, "tile_id", "hz_lists[].tile_id")?, "hz_lists[].tile_id")?;
        let title = truncated(req_str(list, "title", "hz_lists[].title")?);
        let row_entries = req_array(list, "rows", "hz_lists[].rows")?;
        if row_entries.len() > MAX_RATE_ROWS_PER_LIST {
            return Err(ConfigError::CapacityExceeded {
                field: "hz_lists[].rows",
                max: MAX_RATE_ROWS_PER_LIST,
            });
        }

        let mut rows = Vec::new();
        for row in row_entries {
            total_rows += 1;
            if total_rows > MAX_RATE_ROWS {
                return Err(ConfigError::CapacityExceeded {
                    field: "hz_lists",
                    max: MAX_RATE_ROWS,
                });
            }
            let row = row
                .as_object()
                .ok_or(ConfigError::WrongType { field: "hz_lists[].rows[]" })?;
            let id = parse_id(req_str(row, "id", "hz_lists[].rows[].id")?, "hz_lists[].rows[].id")?;
            let label = truncated(req_str(row, "label", "hz_lists[].rows[].label")?);
            let target = req_i32(row, "target", "hz_lists[].rows[].target")?;
            if target <= 0 {
                return Err(ConfigError::OutOfRange {
                    field: "hz_lists[].rows[].target",
                });
            }
            let _ = rows.push(RateRowConfig { id, label, target });
        }

        lists
            .push(RateListConfig {
                tile_id,
                title,
                rows,
            })
            .map_err(|_| ConfigError::CapacityExceeded {
                field: "hz_lists",
                max: MAX_TILES,
            })?;
    }

    Ok(lists)
}

fn parse_text_tiles(root: &Object) -> Result<Vec<TextTileConfig, MAX_TILES>, ConfigError> {
    let mut tiles = Vec::new();
    let Some(entries) = opt_array(root, "text_tiles", "text_tiles")? else {
        return Ok(tiles);
    };
    if entries.len() > MAX_TILES {
        return Err(ConfigError::CapacityExceeded {
            field: "text_tiles",
            max: MAX_TILES,
        });
    }

    for entry in entries {
        let t = entry.as_object().ok_or(ConfigError::WrongType { field: "text_tiles[]" })?;
        let tile_id = parse_id(req_str(t, "tile_id", "text_tiles[].tile_id")?, "text_tiles[].tile_id")?;
        let _ = tiles.push(TextTileConfig {
            tile_id,
            title: truncated(req_str(t, "title", "text_tiles[].title")?),
            subtitle: opt_str(t, "subtitle", "text_tiles[].subtitle")?.map(truncated),
            body: truncated(req_str(t, "body", "text_tiles[].body")?),
        });
    }

    Ok(tiles)
}

/// Gauge and rate row ids share one namespace
fn check_unique_ids(config: &DashboardConfig) -> Result<(), ConfigError> {
    let mut seen: Vec<&Id, { MAX_GAUGES + MAX_RATE_ROWS }> = Vec::new();
    let ids = config
        .gauges
        .iter()
        .map(|g| &g.id)
        .chain(config.rate_lists.iter().flat_map(|l| l.rows.iter().map(|r| &r.id)));

    for id in ids {
        if seen.contains(&id) {
            return Err(ConfigError::DuplicateIdentifier { id: id.clone() });
        }
        let _ = seen.push(id);
    }
    Ok(())
}

fn check_tile_references(model: &DashboardModel) -> Result<(), ConfigError> {
    let config = &model.config;
    let refs = config
        .gauges
        .iter()
        .map(|g| ("gauges[].tile_id", &g.tile_id))
        .chain(config.buttons.iter().map(|b| ("buttons[].tile_id", &b.tile_id)))
        .chain(config.rate_lists.iter().map(|l| ("hz_lists[].tile_id", &l.tile_id)))
        .chain(config.text_tiles.iter().map(|t| ("text_tiles[].tile_id", &t.tile_id)));

    for (field, tile_id) in refs {
        if model.tile(tile_id).is_none() {
            return Err(ConfigError::UnresolvedTileReference {
                field,
                tile_id: tile_id.clone(),
            });
        }
    }
    Ok(())
}

// Field accessors

fn parse_id(text: &str, field: &'static str) -> Result<Id, ConfigError> {
    if text.is_empty() {
        return Err(ConfigError::OutOfRange { field });
    }
    Id::try_from(text).map_err(|_| ConfigError::OutOfRange { field })
}

fn parse_color(text: &str, field: &'static str) -> Result<Color, ConfigError> {
    Color::parse(text).ok_or(ConfigError::WrongType { field })
}

fn as_i32(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|v| i32::try_from(v).ok())
}

fn present<'a>(obj: &'a Object, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn req<'a>(obj: &'a Object, key: &str, field: &'static str) -> Result<&'a Value, ConfigError> {
    present(obj, key).ok_or(ConfigError::MissingField { field })
}

fn req_str<'a>(obj: &'a Object, key: &str, field: &'static str) -> Result<&'a str, ConfigError> {
    req(obj, key, field)?
        .as_str()
        .ok_or(ConfigError::WrongType { field })
}

fn opt_str<'a>(
    obj: &'a Object,
    key: &str,
    field: &'static str,
) -> Result<Option<&'a str>, ConfigError> {
    present(obj, key)
        .map(|v| v.as_str().ok_or(ConfigError::WrongType { field }))
        .transpose()
}

fn req_bool(obj: &Object, key: &str, field: &'static str) -> Result<bool, ConfigError> {
    req(obj, key, field)?
        .as_bool()
        .ok_or(ConfigError::WrongType { field })
}

fn integer(value: &Value, field: &'static str) -> Result<i64, ConfigError> {
    match value.as_i64() {
        Some(v) => Ok(v),
        // Integers beyond i64 are still integers, just out of range
        None if value.is_u64() => Err(ConfigError::OutOfRange { field }),
        None => Err(ConfigError::WrongType { field }),
    }
}

fn req_i32(obj: &Object, key: &str, field: &'static str) -> Result<i32, ConfigError> {
    let v = integer(req(obj, key, field)?, field)?;
    i32::try_from(v).map_err(|_| ConfigError::OutOfRange { field })
}

fn opt_i32(obj: &Object, key: &str, field: &'static str) -> Result<Option<i32>, ConfigError> {
    match present(obj, key) {
        Some(_) => req_i32(obj, key, field).map(Some),
        None => Ok(None),
    }
}

fn req_u32(obj: &Object, key: &str, field: &'static str) -> Result<u32, ConfigError> {
    let v = integer(req(obj, key, field)?, field)?;
    u32::try_from(v).map_err(|_| ConfigError::OutOfRange { field })
}

fn opt_u32(obj: &Object, key: &str, field: &'static str) -> Result<Option<u32>, ConfigError> {
    match present(obj, key) {
        Some(_) => req_u32(obj, key, field).map(Some),
        None => Ok(None),
    }
}

fn req_grid_dim(obj: &Object, key: &str, field: &'static str) -> Result<u8, ConfigError> {
    let v = integer(req(obj, key, field)?, field)?;
    match u8::try_from(v) {
        Ok(dim) if dim > 0 => Ok(dim),
        _ => Err(ConfigError::OutOfRange { field }),
    }
}

fn req_object<'a>(
    obj: &'a Object,
    key: &str,
    field: &'static str,
) -> Result<&'a Object, ConfigError> {
    req(obj, key, field)?
        .as_object()
        .ok_or(ConfigError::WrongType { field })
}

fn opt_object<'a>(
    obj: &'a Object,
    key: &str,
    field: &'static str,
) -> Result<Option<&'a Object>, ConfigError> {
    present(obj, key)
        .map(|v| v.as_object().ok_or(ConfigError::WrongType { field }))
        .transpose()
}

fn req_array<'a>(
    obj: &'a Object,
    key: &str,
    field: &'static str,
) -> Result<&'a alloc::vec::Vec<Value>, ConfigError> {
    req(obj, key, field)?
        .as_array()
        .ok_or(ConfigError::WrongType { field })
}

fn opt_array<'a>(
    obj: &'a Object,
    key: &str,
    field: &'static str,
) -> Result<Option<&'a alloc::vec::Vec<Value>>, ConfigError> {
    present(obj, key)
        .map(|v| v.as_array().ok_or(ConfigError::WrongType { field }))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "robot_name": "Rover-7",
        "ui": { "dark_theme": true, "stale_timeout_ms": 1500,
                "splash": { "path": "/splash.bmp", "duration_ms": 2000 } },
        "layout": { "cols": 3, "rows": 2, "tiles": [
            {"id": "temp"}, {"id": "batt"}, {"id": "rates"},
            {"id": "ctl"},  {"id": "ctl"},  {"id": "rates"} ] },
        "gauges": [
            { "id": "temp", "tile_id": "temp", "title": "CPU Temp", "min": 0, "max": 100,
              "accent": "blue", "stale_text": "n/a",
              "stages": [ {"t": 40, "c": "green"}, {"threshold": 80, "color": "#F44336"},
                          {"t": 60, "c": "amber"}, {"t": "bad", "c": "red"}, {"t": 90, "c": "nope"} ] },
            { "id": "batt", "tile_id": "batt", "title": "Battery", "min": 0, "max": 100,
              "accent": "0x4caf50", "initial": 100, "stale_timeout_ms": 0 }
        ],
        "buttons": [
            { "tile_id": "ctl", "tile_title": "Control", "label": "Stop", "color": "red",
              "action_id": "shutdown" },
            { "tile_id": "ctl", "tile_title": "Control", "label": "Restart", "color": "Amber",
              "action_id": "restart", "height": 60 }
        ],
        "hz_lists": [
            { "tile_id": "rates", "title": "Rates", "rows": [
                {"id": "lidar", "label": "Lidar", "target": 10},
                {"id": "imu", "label": "IMU", "target": 200} ] }
        ],
        "text_tiles": []
    }"##;

    fn sample() -> Value {
        serde_json::from_str(SAMPLE).unwrap()
    }

    fn with(mut root: Value, path: &[&str], value: Value) -> Value {
        let mut node = &mut root;
        for key in &path[..path.len() - 1] {
            node = node.get_mut(*key).unwrap();
        }
        node.as_object_mut()
            .unwrap()
            .insert(path[path.len() - 1].into(), value);
        root
    }

    fn without(mut root: Value, path: &[&str]) -> Value {
        let mut node = &mut root;
        for key in &path[..path.len() - 1] {
            node = node.get_mut(*key).unwrap();
        }
        node.as_object_mut().unwrap().remove(path[path.len() - 1]);
        root
    }

    #[test]
    fn test_load_sample() {
        let model = load(SAMPLE).unwrap();
        let config = &model.config;
        assert_eq!(config.robot_name.as_str(), "Rover-7");
        assert!(config.ui.dark_theme);
        assert_eq!(config.ui.stale_timeout_ms, 1500);
        assert_eq!(config.ui.background, Color::BACKGROUND);
        assert_eq!(config.ui.splash.as_ref().unwrap().duration_ms, 2000);
        assert_eq!(model.tiles.len(), 4);
        assert_eq!(config.gauges.len(), 2);
        assert_eq!(config.buttons.len(), 2);
        assert_eq!(config.rate_row_count(), 2);
    }

    #[test]
    fn test_stages_sorted_and_malformed_skipped() {
        let config = validate(&sample()).unwrap();
        let temp = &config.gauges[0];
        let thresholds: std::vec::Vec<i32> = temp.stages.iter().map(|s| s.threshold).collect();
        assert_eq!(thresholds, [80, 60, 40]);
        assert_eq!(temp.stages[0].color, Color::RED);
        assert_eq!(temp.stages[1].color, Color::AMBER);
        assert_eq!(temp.stale_text.as_str(), "n/a");
    }

    #[test]
    fn test_defaults() {
        let config = validate(&sample()).unwrap();
        let batt = &config.gauges[1];
        assert_eq!(batt.stale_text.as_str(), DEFAULT_STALE_TEXT);
        assert_eq!(batt.initial, Some(100));
        assert!(batt.publishes_initial());
        assert_eq!(batt.stale_timeout_ms, 0);
        assert_eq!(config.gauges[0].stale_timeout_ms, 1500);
        assert!(!config.gauges[0].publishes_initial());
        assert_eq!(config.buttons[0].height, DEFAULT_BUTTON_HEIGHT);
        assert_eq!(config.buttons[1].height, 60);
    }

    #[test]
    fn test_stage_list_capped() {
        let mut root = sample();
        let stages: std::vec::Vec<Value> = (1..=9)
            .map(|n| serde_json::json!({ "t": n * 10, "c": "green" }))
            .collect();
        root["gauges"][0]["stages"] = Value::from(stages);

        let config = validate(&root).unwrap();
        let thresholds: std::vec::Vec<i32> =
            config.gauges[0].stages.iter().map(|s| s.threshold).collect();
        assert_eq!(thresholds, [80, 70, 60, 50, 40, 30, 20, 10]);
    }

    #[test]
    fn test_empty_stale_text_uses_default() {
        let mut root = sample();
        root["gauges"][0]["stale_text"] = Value::from("");
        let config = validate(&root).unwrap();
        assert_eq!(config.gauges[0].stale_text.as_str(), DEFAULT_STALE_TEXT);
    }

    #[test]
    fn test_splash_without_path_skips_intro() {
        let root = without(sample(), &["ui", "splash", "path"]);
        let config = validate(&root).unwrap();
        assert_eq!(config.ui.splash, None);

        let root = with(sample(), &["ui", "splash", "path"], Value::from(""));
        assert_eq!(validate(&root).unwrap().ui.splash, None);
    }

    #[test]
    fn test_missing_required_fields() {
        let cases: &[(&[&str], &str)] = &[
            (&["robot_name"], "robot_name"),
            (&["ui", "dark_theme"], "ui.dark_theme"),
            (&["ui", "stale_timeout_ms"], "ui.stale_timeout_ms"),
            (&["layout", "cols"], "layout.cols"),
            (&["layout", "tiles"], "layout.tiles"),
        ];
        for (path, field) in cases {
            assert_eq!(
                validate(&without(sample(), path)),
                Err(ConfigError::MissingField { field: *field })
            );
        }
    }

    #[test]
    fn test_wrong_types() {
        let root = with(sample(), &["ui", "dark_theme"], Value::from("yes"));
        assert_eq!(
            validate(&root),
            Err(ConfigError::WrongType { field: "ui.dark_theme" })
        );

        let root = with(sample(), &["ui", "background"], Value::from("mauve"));
        assert_eq!(
            validate(&root),
            Err(ConfigError::WrongType { field: "ui.background" })
        );

        assert_eq!(
            validate(&Value::from(3)),
            Err(ConfigError::WrongType { field: "<root>" })
        );
    }

    #[test]
    fn test_gauge_field_errors() {
        let mut root = sample();
        root["gauges"][0].as_object_mut().unwrap().remove("accent");
        assert_eq!(
            validate(&root),
            Err(ConfigError::MissingField { field: "gauges[].accent" })
        );

        let mut root = sample();
        root["gauges"][0]["accent"] = Value::from("#12345");
        assert_eq!(
            validate(&root),
            Err(ConfigError::WrongType { field: "gauges[].accent" })
        );

        let mut root = sample();
        root["gauges"][0]["min"] = Value::from(200);
        assert_eq!(
            validate(&root),
            Err(ConfigError::OutOfRange { field: "gauges[].min" })
        );

        let mut root = sample();
        root["gauges"][0]["id"] = Value::from("");
        assert_eq!(
            validate(&root),
            Err(ConfigError::OutOfRange { field: "gauges[].id" })
        );
    }

    #[test]
    fn test_tile_count_mismatch() {
        let root = with(sample(), &["layout", "cols"], Value::from(2));
        assert!(matches!(
            validate(&root),
            Err(ConfigError::CapacityExceeded { field: "layout.tiles", .. })
        ));
    }

    #[test]
    fn test_grid_limits() {
        let root = with(sample(), &["layout", "rows"], Value::from(0));
        assert_eq!(
            validate(&root),
            Err(ConfigError::OutOfRange { field: "layout.rows" })
        );

        let root = with(sample(), &["layout", "rows"], Value::from(9));
        assert!(matches!(
            validate(&root),
            Err(ConfigError::CapacityExceeded { field: "layout", .. })
        ));
    }

    #[test]
    fn test_rate_row_limits() {
        let mut root = sample();
        root["hz_lists"][0]["rows"][0]["target"] = Value::from(0);
        assert_eq!(
            validate(&root),
            Err(ConfigError::OutOfRange { field: "hz_lists[].rows[].target" })
        );

        let mut root = sample();
        let row = root["hz_lists"][0]["rows"][0].clone();
        let rows: std::vec::Vec<Value> = (0..7)
            .map(|i| {
                let mut r = row.clone();
                r["id"] = Value::from(std::format!("r{}", i));
                r
            })
            .collect();
        root["hz_lists"][0]["rows"] = Value::from(rows);
        assert_eq!(
            validate(&root),
            Err(ConfigError::CapacityExceeded {
                field: "hz_lists[].rows",
                max: MAX_RATE_ROWS_PER_LIST
            })
        );
    }

    #[test]
    fn test_duplicate_widget_id() {
        let mut root = sample();
        root["hz_lists"][0]["rows"][1]["id"] = Value::from("temp");
        assert_eq!(
            validate(&root),
            Err(ConfigError::DuplicateIdentifier {
                id: Id::try_from("temp").unwrap()
            })
        );
    }

    #[test]
    fn test_unresolved_tile() {
        let mut root = sample();
        root["buttons"][0]["tile_id"] = Value::from("nowhere");
        let text = root.to_string();
        assert_eq!(
            load(&text).unwrap_err(),
            ConfigError::UnresolvedTileReference {
                field: "buttons[].tile_id",
                tile_id: Id::try_from("nowhere").unwrap()
            }
        );
    }

    #[test]
    fn test_non_rectangular_layout() {
        let mut root = sample();
        root["layout"]["tiles"][4]["id"] = Value::from("temp");
        let text = root.to_string();
        assert!(matches!(
            load(&text),
            Err(ConfigError::DuplicateOrNonRectangularTile { .. })
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            load("{\"robot_name\": "),
            Err(ConfigError::Syntax { line: 1, .. })
        ));
    }
}
