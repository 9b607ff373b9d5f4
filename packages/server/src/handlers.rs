//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use crime_dash_render::charts::build_charts;
use crime_dash_render::map::build_map_view;
use crime_dash_server_models::{
    ApiCategoryGroup, ApiHealth, ApiIndicator, ApiOptions, ChartsQueryParams, MapQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/options`
///
/// Returns the years and indicators the sidebar offers, defaulting to the
/// earliest year and the first indicator.
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    let years = state.dataset.years();
    let indicators = state.dataset.indicators();

    HttpResponse::Ok().json(ApiOptions {
        default_year: years.first().copied(),
        default_indicator: indicators.first().copied(),
        categories: ApiCategoryGroup::group(&indicators),
        years,
        indicators: indicators.into_iter().map(ApiIndicator::from).collect(),
        row_count: state.dataset.len(),
    })
}

/// `GET /api/charts?year=&indicator=`
///
/// Returns the time-series and bar views for a (year, indicator) choice.
pub async fn charts(
    state: web::Data<AppState>,
    params: web::Query<ChartsQueryParams>,
) -> HttpResponse {
    let selection = state.dataset.select(params.year, params.indicator);
    log::debug!(
        "Charts for {} ({}): {} rows, {} in series",
        params.indicator,
        params.year,
        selection.exact.len(),
        selection.by_indicator.len()
    );

    HttpResponse::Ok().json(build_charts(&selection, params.year, params.indicator))
}

/// `GET /api/map?year=`
///
/// Returns one choropleth layer per configured indicator for the year.
pub async fn map(state: web::Data<AppState>, params: web::Query<MapQueryParams>) -> HttpResponse {
    HttpResponse::Ok().json(build_map_view(
        &state.dataset,
        params.year,
        &state.indicators,
        &state.map,
    ))
}
