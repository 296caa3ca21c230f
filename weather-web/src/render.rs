//! Page rendering
//!
//! A page is a pure function of [`PageView`]; handlers only decide which view to build.

use serde::Serialize;
use tera::{Context, Tera};
use weather_core::WeatherReport;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const INDEX_NAME: &str = "index.html";

/// Error marker shown by the 404 page.
pub const PAGE_NOT_FOUND: &str = "Page not found";
/// Error marker shown by the 500 page.
pub const SERVER_ERROR: &str = "Server error occurred";

/// A message shown on the rendered page only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub category: &'static str,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self { category: "error", message: message.into() }
    }
}

/// Everything the index template needs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageView {
    pub weather: Option<WeatherReport>,
    pub city_searched: Option<String>,
    pub notices: Vec<Notice>,
    pub error: Option<&'static str>,
}

impl PageView {
    pub fn with_notice(notice: Notice) -> Self {
        Self { notices: vec![notice], ..Default::default() }
    }

    pub fn error_page(marker: &'static str) -> Self {
        Self { error: Some(marker), ..Default::default() }
    }
}

#[derive(Debug)]
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        // Default suffixes keep autoescaping on for `.html`.
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_NAME, INDEX_TEMPLATE)?;
        Ok(Self { tera })
    }

    pub fn render(&self, view: &PageView) -> Result<String, tera::Error> {
        let context = Context::from_serialize(view)?;
        self.tera.render(INDEX_NAME, &context)
    }
}

/// Static 500 page, usable even when the template engine is what failed.
pub fn server_error_page() -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"UTF-8\"><title>Weather App</title></head>\n\
         <body>\n<h1>Weather App</h1>\n<p class=\"page-error\" data-error=\"{SERVER_ERROR}\">{SERVER_ERROR}</p>\n\
         <p><a href=\"/\">Back to search</a></p>\n</body>\n</html>\n"
    )
}
