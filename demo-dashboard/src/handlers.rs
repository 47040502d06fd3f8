use askama::Template;
use axum::{
    Form,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use xero_light::{
    AuthResponse, InvoiceRow, SessionState, Tenant, TokenSet, User, UserStore, build_consent_url,
    clear_session_headers, decode_id_token, exchange_code, get_organisation, invoice_rows,
    list_connections, list_invoices, new_session_correlator, new_session_headers,
    refresh_token_set, resolve_session,
};

use crate::errors::AppError;

#[derive(Template)]
#[template(path = "home.j2")]
struct HomeTemplate<'a> {
    consent_url: &'a str,
}

#[derive(Template)]
#[template(path = "dashboard.j2")]
struct DashboardTemplate<'a> {
    first_name: &'a str,
    last_name: &'a str,
    tenant_name: &'a str,
    tenants: &'a [Tenant],
    rows: &'a [InvoiceRow],
}

#[derive(Template)]
#[template(path = "error.j2")]
struct ErrorTemplate {
    error: String,
}

/// Shared error view; all handler failures land here.
fn render_error(err: AppError) -> Response {
    tracing::error!("Request failed: {}", err);
    let template = ErrorTemplate {
        error: err.to_string(),
    };
    match template.render() {
        Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// `GET /`: login page with a fresh consent URL; authenticated sessions
/// go straight to the dashboard, stale cookies get cleared via logout.
pub(crate) async fn index(headers: HeaderMap) -> Response {
    match resolve_session(&headers).await {
        Ok(SessionState::Authenticated(_)) => Redirect::to("/dashboard").into_response(),
        Ok(SessionState::Stale) => Redirect::to("/logout").into_response(),
        Ok(SessionState::Anonymous) => match build_consent_url() {
            Ok(consent_url) => {
                let template = HomeTemplate {
                    consent_url: &consent_url,
                };
                match template.render() {
                    Ok(html) => Html(html).into_response(),
                    Err(e) => render_error(AppError::Template(e.to_string())),
                }
            }
            Err(e) => render_error(e.into()),
        },
        Err(e) => render_error(e.into()),
    }
}

/// `GET /callback`: OAuth redirect target.
pub(crate) async fn callback(Query(auth): Query<AuthResponse>) -> Response {
    match handle_callback(&auth).await {
        Ok(cookie_headers) => (cookie_headers, Redirect::to("/dashboard")).into_response(),
        Err(e) => render_error(e),
    }
}

/// Exchange the code, snapshot the identity and tenant data, and upsert the
/// user row. The session cookie is issued only after persistence succeeds,
/// so a mid-flow failure leaves the browser anonymous and the row untouched.
async fn handle_callback(auth: &AuthResponse) -> Result<HeaderMap, AppError> {
    tracing::debug!("Callback received, state: {}", auth.state);
    let token_set = exchange_code(&auth.code).await?;

    let id_token = token_set
        .id_token
        .as_deref()
        .ok_or_else(|| AppError::Callback("No id_token in token response".to_string()))?;
    let claims = decode_id_token(id_token)?;

    let tenants = list_connections(&token_set).await?;
    let active_tenant = tenants
        .first()
        .ok_or_else(|| AppError::Callback("No organisation connections for user".to_string()))?;
    let organisation = get_organisation(&token_set, &active_tenant.tenant_id).await?;

    let correlator = new_session_correlator();
    let user = User::new(
        claims.given_name.clone(),
        claims.family_name.clone(),
        organisation.postal_address(),
        claims.email.clone(),
        claims.xero_userid.clone(),
        claims.to_value()?,
        token_set.to_value()?,
        active_tenant.to_value()?,
        correlator.clone(),
    );

    let stored = UserStore::upsert_user(user).await?;
    tracing::info!("Upserted user record for {}", stored.email);

    Ok(new_session_headers(&correlator)?)
}

/// `GET /dashboard`: protected invoice listing for the active tenant.
pub(crate) async fn dashboard(headers: HeaderMap) -> Response {
    match resolve_session(&headers).await {
        Ok(SessionState::Anonymous) => Redirect::to("/").into_response(),
        Ok(SessionState::Stale) => Redirect::to("/logout").into_response(),
        Ok(SessionState::Authenticated(user)) => match render_dashboard(&user).await {
            Ok(html) => Html(html).into_response(),
            Err(e) => render_error(e),
        },
        Err(e) => render_error(e.into()),
    }
}

async fn render_dashboard(user: &User) -> Result<String, AppError> {
    let stored = TokenSet::from_value(&user.token_set)?;

    // The provider rotates refresh tokens, so the refreshed set must be
    // written back before anything else can fail.
    let token_set = refresh_token_set(&stored).await?;
    UserStore::update_token_set(&user.email, &token_set.to_value()?).await?;

    let tenants = list_connections(&token_set).await?;
    let active_tenant = select_active_tenant(&tenants, &user.active_tenant)
        .ok_or_else(|| AppError::Callback("No organisation connections for user".to_string()))?;

    let organisation = get_organisation(&token_set, &active_tenant.tenant_id).await?;
    let invoices = list_invoices(&token_set, &active_tenant.tenant_id).await?;
    let rows = invoice_rows(&invoices, &organisation.short_code);

    let template = DashboardTemplate {
        first_name: &user.first_name,
        last_name: &user.last_name,
        tenant_name: &active_tenant.tenant_name,
        tenants: &tenants,
        rows: &rows,
    };
    template
        .render()
        .map_err(|e| AppError::Template(e.to_string()))
}

/// The stored tenant if it is still accessible, otherwise the first one.
fn select_active_tenant<'a>(
    tenants: &'a [Tenant],
    stored: &serde_json::Value,
) -> Option<&'a Tenant> {
    let stored_id = stored.get("tenantId").and_then(|v| v.as_str());
    match stored_id {
        Some(id) => tenants
            .iter()
            .find(|t| t.tenant_id == id)
            .or_else(|| tenants.first()),
        None => tenants.first(),
    }
}

#[derive(Deserialize)]
pub(crate) struct ChangeOrganisationForm {
    active_org_id: String,
}

/// `POST /change_organisation`: switch the session's active tenant.
pub(crate) async fn change_organisation(
    headers: HeaderMap,
    Form(form): Form<ChangeOrganisationForm>,
) -> Response {
    match resolve_session(&headers).await {
        Ok(SessionState::Anonymous) => Redirect::to("/").into_response(),
        Ok(SessionState::Stale) => Redirect::to("/logout").into_response(),
        Ok(SessionState::Authenticated(user)) => {
            match switch_tenant(&user, &form.active_org_id).await {
                Ok(()) => Redirect::to("/dashboard").into_response(),
                Err(e) => render_error(e),
            }
        }
        Err(e) => render_error(e.into()),
    }
}

async fn switch_tenant(user: &User, active_org_id: &str) -> Result<(), AppError> {
    let stored = TokenSet::from_value(&user.token_set)?;
    let token_set = refresh_token_set(&stored).await?;
    UserStore::update_token_set(&user.email, &token_set.to_value()?).await?;

    let tenants = list_connections(&token_set).await?;
    let Some(tenant) = tenants.iter().find(|t| t.tenant_id == active_org_id) else {
        return Err(AppError::UnknownTenant(active_org_id.to_string()));
    };

    UserStore::update_active_tenant(&user.email, &tenant.to_value()?).await?;
    tracing::info!("User {} switched to tenant {}", user.email, tenant.tenant_id);
    Ok(())
}

/// `GET /logout`: clear the cookie and return home. The user row and its
/// token material stay in the store.
pub(crate) async fn logout() -> Response {
    match clear_session_headers() {
        Ok(headers) => (headers, Redirect::to("/")).into_response(),
        Err(e) => render_error(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tenant(id: &str, name: &str) -> Tenant {
        serde_json::from_value(json!({
            "tenantId": id,
            "tenantName": name,
            "tenantType": "ORGANISATION"
        }))
        .expect("tenant fixture must deserialize")
    }

    #[test]
    fn test_select_active_tenant_prefers_stored_selection() {
        let tenants = vec![tenant("t1", "First"), tenant("t2", "Second")];
        let stored = json!({"tenantId": "t2", "tenantName": "Second"});

        let selected = select_active_tenant(&tenants, &stored).expect("a tenant is selected");
        assert_eq!(selected.tenant_id, "t2");
    }

    #[test]
    fn test_select_active_tenant_falls_back_to_first() {
        let tenants = vec![tenant("t1", "First"), tenant("t2", "Second")];

        // Stored tenant no longer accessible
        let stale = json!({"tenantId": "gone"});
        let selected = select_active_tenant(&tenants, &stale).expect("a tenant is selected");
        assert_eq!(selected.tenant_id, "t1");

        // No stored selection at all
        let empty = json!({});
        let selected = select_active_tenant(&tenants, &empty).expect("a tenant is selected");
        assert_eq!(selected.tenant_id, "t1");
    }

    #[test]
    fn test_select_active_tenant_with_no_connections() {
        let stored = json!({"tenantId": "t1"});
        assert!(select_active_tenant(&[], &stored).is_none());
    }

    mod routing {
        use super::super::*;
        use axum::{
            Router,
            body::Body,
            http::{Request, header},
            routing::get,
        };
        use std::sync::Once;
        use tower::ServiceExt;
        use xero_light::{new_session_correlator, new_session_headers};

        static INIT_ENV: Once = Once::new();

        // The config statics read the environment on first touch, so it
        // has to be populated before any handler runs in this process.
        fn init_test_env() {
            INIT_ENV.call_once(|| {
                let db_path = std::env::temp_dir().join(format!(
                    "demo_dashboard_test_{}.sqlite3",
                    std::process::id()
                ));
                unsafe {
                    std::env::set_var("GENERIC_DATA_STORE_TYPE", "sqlite");
                    std::env::set_var(
                        "GENERIC_DATA_STORE_URL",
                        format!("sqlite://{}", db_path.display()),
                    );
                    std::env::set_var("XERO_CLIENT_ID", "client-1");
                    std::env::set_var("XERO_CLIENT_SECRET", "secret-1");
                    std::env::set_var("XERO_REDIRECT_URI", "http://localhost:3000/callback");
                }
            });
        }

        fn app() -> Router {
            Router::new()
                .route("/", get(index))
                .route("/dashboard", get(dashboard))
                .route("/logout", get(logout))
        }

        #[tokio::test]
        async fn dashboard_without_cookie_redirects_home() {
            init_test_env();

            let request = Request::builder()
                .uri("/dashboard")
                .body(Body::empty())
                .unwrap();
            let response = app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        }

        #[tokio::test]
        async fn index_without_cookie_serves_login_page() {
            init_test_env();

            let request = Request::builder().uri("/").body(Body::empty()).unwrap();
            let response = app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
        }

        #[tokio::test]
        async fn index_with_stale_cookie_redirects_to_logout() {
            init_test_env();
            xero_light::init().await.expect("store init must succeed");

            // Properly signed cookie whose correlator matches no user row
            let set_headers = new_session_headers(&new_session_correlator())
                .expect("signing must succeed");
            let set_cookie = set_headers
                .get(header::SET_COOKIE)
                .unwrap()
                .to_str()
                .unwrap();
            let cookie_pair = set_cookie.split(';').next().unwrap();

            let request = Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie_pair)
                .body(Body::empty())
                .unwrap();
            let response = app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(
                response.headers().get(header::LOCATION).unwrap(),
                "/logout"
            );
        }
    }
}
