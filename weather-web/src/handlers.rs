//! Search page handlers
//!
//! `GET /` shows the empty form. `POST /` validates the submitted city, runs one
//! lookup and renders either the report or a notice.

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::Html,
};
use tracing::{debug, info};
use weather_core::{SearchRequest, WeatherResult};

use crate::{
    error::AppError,
    render::{Notice, PAGE_NOT_FOUND, PageView},
    state::AppState,
};

pub const EMPTY_CITY: &str = "Please enter a city name.";
pub const NOT_CONFIGURED: &str =
    "Weather service not configured. Please add your API key to .env file.";
pub const CITY_NOT_FOUND: &str = "City not found. Please check the spelling and try again.";
pub const TIMED_OUT: &str = "Request timed out. Please try again.";
pub const CANNOT_CONNECT: &str =
    "Cannot connect to weather service. Check your internet connection.";
pub const UNEXPECTED: &str = "An unexpected error occurred. Please try again.";

/// User-facing text for a lookup outcome; `None` for a success.
pub fn notice_for(result: &WeatherResult) -> Option<String> {
    let text = match result {
        WeatherResult::Success(_) => return None,
        WeatherResult::NotFound => CITY_NOT_FOUND.to_string(),
        WeatherResult::ProviderError { code } => format!("Weather service error (Code: {code})"),
        WeatherResult::Timeout => TIMED_OUT.to_string(),
        WeatherResult::ConnectionFailure => CANNOT_CONNECT.to_string(),
        WeatherResult::Unconfigured => NOT_CONFIGURED.to_string(),
        WeatherResult::UnknownFailure => UNEXPECTED.to_string(),
    };
    Some(text)
}

/// Build the page for a submitted city.
pub async fn search_view(state: &AppState, request: &SearchRequest) -> PageView {
    let Some(city) = request.normalized_city() else {
        return PageView::with_notice(Notice::error(EMPTY_CITY));
    };

    let mut view = PageView { city_searched: Some(city.to_string()), ..Default::default() };

    if !state.credential.is_configured() {
        view.notices.push(Notice::error(NOT_CONFIGURED));
        return view;
    }

    let result = state.provider.lookup(city).await;
    match notice_for(&result) {
        None => {
            info!(city, "Weather lookup succeeded");
            view.weather = result.into_report();
        }
        Some(text) => {
            info!(city, outcome = ?result, "Weather lookup did not succeed");
            view.notices.push(Notice::error(text));
        }
    }
    view
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.render(&PageView::default())?))
}

/// A missing `city` field or an unreadable body counts as an empty submission.
pub async fn search(
    State(state): State<AppState>,
    form: Result<Form<SearchRequest>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            debug!(%rejection, "Unreadable search form");
            SearchRequest::default()
        }
    };

    let view = search_view(&state, &request).await;
    Ok(Html(state.pages.render(&view)?))
}

pub async fn not_found(State(state): State<AppState>) -> Result<(StatusCode, Html<String>), AppError> {
    let html = state.pages.render(&PageView::error_page(PAGE_NOT_FOUND))?;
    Ok((StatusCode::NOT_FOUND, Html(html)))
}
