//! Static demo pages.

use axum::{http::header, response::Html, response::IntoResponse};

const LOGIN_PAGE: &str = include_str!("../assets/login.html");
const SETTINGS_PAGE: &str = include_str!("../assets/settings.html");
const RECOMMENDATIONS_PAGE: &str = include_str!("../assets/recommendations.html");
const STYLESHEET: &str = include_str!("../assets/style.css");

pub(crate) async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

pub(crate) async fn settings_page() -> Html<&'static str> {
    Html(SETTINGS_PAGE)
}

pub(crate) async fn recommendations_page() -> Html<&'static str> {
    Html(RECOMMENDATIONS_PAGE)
}

pub(crate) async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}
