use super::AppState;
use super::sessions::SharedSession;
use crate::constants::server::SESSION_COOKIE;
use crate::presentation::{DashboardView, render_page};
use crate::selection::{Dispatched, SelectionEvent, Session};
use axum::Json;
use axum::extract::{Form, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Body of the selector forms
#[derive(Debug, Deserialize)]
pub struct SelectForm {
    #[serde(default)]
    pub value: String,
}

/// The caller's session plus the cookie to set when it was just created.
struct Resolved {
    id: String,
    session: SharedSession,
    new_cookie: Option<String>,
}

fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

async fn resolve_session(state: &AppState, headers: &HeaderMap) -> Resolved {
    if let Some(id) = session_id_from(headers)
        && let Some(session) = state.sessions.get(&id).await
    {
        {
            let mut guard = session.lock().await;
            if guard.needs_divisions() && guard.refresh_divisions(&state.database).await {
                info!(session = %id, "Division list recovered");
            }
        }
        return Resolved {
            id,
            session,
            new_cookie: None,
        };
    }

    let (id, session) = state.sessions.insert(Session::open(&state.database).await).await;
    debug!(session = %id, "Opened new session");
    Resolved {
        new_cookie: Some(format!(
            "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax"
        )),
        id,
        session,
    }
}

fn with_cookie(mut response: Response, cookie: Option<String>) -> Response {
    if let Some(cookie) = cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            Err(e) => warn!("Could not encode session cookie: {e}"),
        }
    }
    response
}

/// Runs `event` on the caller's session and returns the resulting view.
async fn interact(state: &AppState, headers: &HeaderMap, event: SelectionEvent) -> (Resolved, DashboardView) {
    let resolved = resolve_session(state, headers).await;
    let mut session = resolved.session.lock().await;

    let label = format!("{event:?}");
    let outcome = session.dispatch(event, &state.database).await;
    match outcome {
        Dispatched::Failed => warn!(session = %resolved.id, event = %label, "Interaction failed"),
        _ => info!(session = %resolved.id, event = %label, outcome = ?outcome, "Interaction handled"),
    }

    let view = DashboardView::from_session(&session);
    drop(session);
    (resolved, view)
}

async fn redirect_after(state: &AppState, headers: &HeaderMap, event: SelectionEvent) -> Response {
    let (resolved, _) = interact(state, headers, event).await;
    with_cookie(Redirect::to("/").into_response(), resolved.new_cookie)
}

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let resolved = resolve_session(&state, &headers).await;
    let view = DashboardView::from_session(&*resolved.session.lock().await);
    with_cookie(Html(render_page(&view)).into_response(), resolved.new_cookie)
}

pub async fn select_division(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SelectForm>,
) -> Response {
    redirect_after(&state, &headers, SelectionEvent::ChooseDivision(form.value)).await
}

pub async fn select_season(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SelectForm>,
) -> Response {
    redirect_after(&state, &headers, SelectionEvent::ChooseSeason(form.value)).await
}

pub async fn select_team(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SelectForm>,
) -> Response {
    redirect_after(&state, &headers, SelectionEvent::ChooseTeam(form.value)).await
}

pub async fn load(State(state): State<AppState>, headers: HeaderMap) -> Response {
    redirect_after(&state, &headers, SelectionEvent::Load).await
}

pub async fn api_view(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let resolved = resolve_session(&state, &headers).await;
    let view = DashboardView::from_session(&*resolved.session.lock().await);
    with_cookie(Json(view).into_response(), resolved.new_cookie)
}

pub async fn api_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<SelectionEvent>,
) -> Response {
    let (resolved, view) = interact(&state, &headers, event).await;
    with_cookie(Json(view).into_response(), resolved.new_cookie)
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; soccer_session=abc123; other=1"),
        );
        assert_eq!(session_id_from(&headers), Some("abc123".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_id_from(&headers), None);
        assert_eq!(session_id_from(&HeaderMap::new()), None);
    }

    #[test]
    fn test_with_cookie_sets_header() {
        let response = with_cookie(
            Redirect::to("/").into_response(),
            Some("soccer_session=abc; Path=/".to_string()),
        );
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(SET_COOKIE).unwrap(),
            "soccer_session=abc; Path=/"
        );
    }
}
