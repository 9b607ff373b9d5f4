//! Choropleth map view: one styled `GeoJSON` layer per indicator.
//!
//! A layer contains every department that survived the join. Departments
//! with a row in the selection are filled from the layer's color ramp
//! according to their case count; the others are drawn with a transparent
//! fill so the outline stays visible without suggesting a value.

use std::collections::BTreeMap;
use std::sync::Arc;

use crime_dash_crime_models::Indicator;
use crime_dash_dataset::{Dataset, JoinedRecord};
use crime_dash_geography::extent::compute_extent;
use crime_dash_geography_models::{DepartmentBoundary, DepartmentCode, MapExtent};
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue, feature::Id};
use serde::{Deserialize, Serialize};

use crate::color::{ColorScale, RampName};
use crate::format::{format_decimal, format_integer};
use crate::map_header;

const BORDER_COLOR: &str = "black";
const BORDER_WEIGHT: f64 = 0.7;
const FILL_OPACITY: f64 = 0.75;

const HIGHLIGHT_COLOR: &str = "blue";
const HIGHLIGHT_WEIGHT: f64 = 3.0;
const HIGHLIGHT_FILL_OPACITY: f64 = 0.9;

/// Decimal places shown for rates in tooltips.
const RATE_DECIMALS: usize = 3;

/// Map defaults and per-indicator ramps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MapSettings {
    /// Initial center as `[latitude, longitude]`.
    pub center: [f64; 2],
    pub zoom: u8,
    /// Tile layer name understood by the frontend.
    pub tiles: String,
    /// Whether to send the boundary extent so the frontend fits to it.
    pub fit_bounds: bool,
    /// Ramp used for indicators absent from `ramps`.
    pub default_ramp: RampName,
    pub ramps: BTreeMap<Indicator, RampName>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: [48.85, 2.35],
            zoom: 9,
            tiles: "OpenStreetMap".to_string(),
            fit_bounds: true,
            default_ramp: RampName::default(),
            ramps: BTreeMap::new(),
        }
    }
}

impl MapSettings {
    /// Ramp configured for `indicator`.
    #[must_use]
    pub fn ramp_for(&self, indicator: Indicator) -> RampName {
        self.ramps
            .get(&indicator)
            .copied()
            .unwrap_or(self.default_ramp)
    }

    /// One layer configuration per indicator, in the given order.
    #[must_use]
    pub fn layer_configs(&self, indicators: &[Indicator], year: u16) -> Vec<LayerConfig> {
        indicators
            .iter()
            .map(|&indicator| LayerConfig {
                indicator,
                ramp: self.ramp_for(indicator),
                caption: format!("{indicator} - Nombre ({year})"),
            })
            .collect()
    }
}

/// What a single layer draws and how it is colored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerConfig {
    pub indicator: Indicator,
    pub ramp: RampName,
    /// Legend caption.
    pub caption: String,
}

/// Leaflet path style of a feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub fill_opacity: f64,
}

impl FeatureStyle {
    /// Style of a department without data.
    #[must_use]
    pub const fn transparent() -> Self {
        Self {
            fill_color: None,
            color: None,
            weight: None,
            fill_opacity: 0.0,
        }
    }

    /// Style applied on hover.
    #[must_use]
    pub fn highlight() -> Self {
        Self {
            fill_color: None,
            color: Some(HIGHLIGHT_COLOR.to_string()),
            weight: Some(HIGHLIGHT_WEIGHT),
            fill_opacity: HIGHLIGHT_FILL_OPACITY,
        }
    }

    fn filled(fill_color: String) -> Self {
        Self {
            fill_color: Some(fill_color),
            color: Some(BORDER_COLOR.to_string()),
            weight: Some(BORDER_WEIGHT),
            fill_opacity: FILL_OPACITY,
        }
    }

    fn to_json(&self) -> JsonValue {
        let mut object = JsonObject::new();
        if let Some(fill_color) = &self.fill_color {
            object.insert("fillColor".to_string(), fill_color.clone().into());
        }
        if let Some(color) = &self.color {
            object.insert("color".to_string(), color.clone().into());
        }
        if let Some(weight) = self.weight {
            object.insert("weight".to_string(), weight.into());
        }
        object.insert("fillOpacity".to_string(), self.fill_opacity.into());
        JsonValue::Object(object)
    }
}

/// One labelled tooltip line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipField {
    pub alias: String,
    pub value: String,
}

/// Tooltip lines of a department that has data.
#[must_use]
pub fn tooltip(row: &JoinedRecord) -> Vec<TooltipField> {
    let field = |alias: String, value: String| TooltipField { alias, value };
    vec![
        field(
            "Département :".to_string(),
            row.department_code().to_string(),
        ),
        field("Nom :".to_string(), row.department_name().to_string()),
        field(format!("{} :", row.indicator), format_integer(row.count)),
        field(
            "Taux pour 1 000 hab. :".to_string(),
            format_decimal(row.rate_per_thousand, RATE_DECIMALS),
        ),
        field("Population :".to_string(), format_integer(row.population)),
    ]
}

/// Legend of a layer with data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub caption: String,
    pub scale: ColorScale,
    /// Ramp stops, lightest first.
    pub colors: Vec<String>,
}

/// A toggleable map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayer {
    /// Layer control label.
    pub name: String,
    pub indicator: Indicator,
    /// `None` when no department has data for this layer.
    pub legend: Option<Legend>,
    pub features: FeatureCollection,
}

/// Everything the map tab shows for a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub header: String,
    pub year: u16,
    pub center: [f64; 2],
    pub zoom: u8,
    pub tiles: String,
    pub bounds: Option<MapExtent>,
    pub highlight: FeatureStyle,
    pub layers: Vec<MapLayer>,
}

/// Builds one layer from the exact-match rows of its indicator.
///
/// Only the first row of a department is used when several share the
/// same year (distinct population values).
#[must_use]
pub fn build_layer(
    config: &LayerConfig,
    rows: &[&JoinedRecord],
    boundaries: &[Arc<DepartmentBoundary>],
) -> MapLayer {
    let mut by_department: BTreeMap<&DepartmentCode, &JoinedRecord> = BTreeMap::new();
    for row in rows
        .iter()
        .copied()
        .filter(|row| row.indicator == config.indicator)
    {
        by_department.entry(row.department_code()).or_insert(row);
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = ColorScale::from_values(by_department.values().map(|row| row.count as f64));
    let ramp = config.ramp.ramp();

    let features = boundaries
        .iter()
        .map(|boundary| {
            let mut properties = JsonObject::new();
            properties.insert("code".to_string(), boundary.code.to_string().into());
            properties.insert("nom".to_string(), boundary.name.clone().into());

            let row = by_department.get(&boundary.code);
            let style = match (row, scale) {
                (Some(row), Some(scale)) => {
                    properties.insert("indicateur".to_string(), row.indicator.label().into());
                    properties.insert("nombre".to_string(), row.count.into());
                    properties.insert("taux_pour_mille".to_string(), row.rate_per_thousand.into());
                    properties.insert("insee_pop".to_string(), row.population.into());
                    properties.insert(
                        "tooltip".to_string(),
                        JsonValue::Array(
                            tooltip(row)
                                .into_iter()
                                .map(|field| {
                                    let mut line = JsonObject::new();
                                    line.insert("alias".to_string(), field.alias.into());
                                    line.insert("value".to_string(), field.value.into());
                                    JsonValue::Object(line)
                                })
                                .collect(),
                        ),
                    );

                    #[allow(clippy::cast_precision_loss)]
                    let position = scale.position(row.count as f64);
                    FeatureStyle::filled(ramp.color_at(position).to_string())
                }
                _ => FeatureStyle::transparent(),
            };
            properties.insert("style".to_string(), style.to_json());

            Feature {
                bbox: None,
                geometry: Some(boundary.geometry.clone()),
                id: Some(Id::String(boundary.code.to_string())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let legend = scale.map(|scale| Legend {
        caption: config.caption.clone(),
        scale,
        colors: config
            .ramp
            .stops()
            .iter()
            .map(ToString::to_string)
            .collect(),
    });

    if legend.is_none() {
        log::debug!(
            "No data for {} in this selection, layer left transparent",
            config.indicator
        );
    }

    MapLayer {
        name: config.indicator.label().to_string(),
        indicator: config.indicator,
        legend,
        features: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
    }
}

/// Builds the map tab for `year` with one layer per entry of `indicators`.
///
/// Only departments present in the joined table are drawn, and the fit
/// bounds cover those departments only.
#[must_use]
pub fn build_map_view(
    dataset: &Dataset,
    year: u16,
    indicators: &[Indicator],
    settings: &MapSettings,
) -> MapView {
    let boundaries = dataset.joined_boundaries();

    let layers = settings
        .layer_configs(indicators, year)
        .iter()
        .map(|config| {
            let selection = dataset.select(year, config.indicator);
            build_layer(config, &selection.exact, &boundaries)
        })
        .collect();

    let bounds = if settings.fit_bounds {
        compute_extent(boundaries.iter().map(|boundary| &**boundary))
    } else {
        None
    };

    MapView {
        header: map_header(year),
        year,
        center: settings.center,
        zoom: settings.zoom,
        tiles: settings.tiles.clone(),
        bounds,
        highlight: FeatureStyle::highlight(),
        layers,
    }
}
