use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::{from_fn, Next},
    web::{self, resource, scope, Data, Query, ServiceConfig},
    App, HttpResponse, HttpServer,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    core::{
        about::AboutView,
        data::{load_content, ContentOrigin, SiteContent},
        gallery::{find_by_slug, project_card, CategoryFilter},
        lightbox::Lightbox,
        settings::Settings,
        state::{update, Command, GalleryState},
    },
    error::FolioResult,
    static_files::{SiteRoot, StaticError},
    types::ProjectCard,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared, read-only state behind every handler.
pub struct SiteState {
    pub site: SiteRoot,
    pub content: SiteContent,
    pub started_at: String,
}

impl SiteState {
    pub fn new(site: SiteRoot, content: SiteContent) -> Self {
        SiteState {
            site,
            content,
            started_at: Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        }
    }

    fn gallery(&self) -> GalleryState {
        GalleryState::new(self.content.projects.clone())
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct GalleryQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Serialize)]
struct Status<'a> {
    status: &'static str,
    started_at: &'a str,
    content: ContentOrigin,
    projects: usize,
}

pub async fn start_server(settings: Settings) -> FolioResult<()> {
    let site = SiteRoot::new(
        &settings.site_root(),
        &settings.resources_dir.value,
        settings.cache_max_age.value,
    )?;
    let content = load_content(settings.projects_source()?, settings.about_source()?).await;
    let state = Data::new(SiteState::new(site, content));
    let addr = settings.socket_addr();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(from_fn(request_tracing))
            .configure(routes)
    })
    .bind(addr)?;
    tracing::info!(%addr, root = %settings.site_root().display(), "static server running");
    server.run().await?;
    Ok(())
}

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/v1")
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allow_any_method(),
            )
            .service(resource("/projects").route(web::get().to(projects_handler)))
            .service(resource("/projects/{slug}").route(web::get().to(project_handler)))
            .service(resource("/about").route(web::get().to(about_handler)))
            .service(resource("/lightbox").route(web::get().to(lightbox_handler)))
            .service(resource("/folio").route(web::get().to(status_handler))),
    )
    .service(
        resource("/{tail:.*}")
            .route(web::get().to(static_handler))
            .route(web::head().to(static_handler)),
    );
}

/// Runs each request inside an `http.request` span tagged with a fresh id.
pub async fn request_tracing(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let request_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.path(),
    );

    let mut response = next.call(req).instrument(span.clone()).await?;
    span.in_scope(|| tracing::info!(status = response.status().as_u16(), "request served"));
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    Ok(response)
}

async fn static_handler(
    state: Data<SiteState>,
    tail: web::Path<String>,
) -> Result<HttpResponse, StaticError> {
    let tail = tail.into_inner();
    match state.site.serve(&tail).await {
        Ok(response) => Ok(response),
        Err(error) => {
            match &error {
                StaticError::BadRequest => tracing::warn!(path = %tail, "rejected path outside root"),
                StaticError::Read(source) => tracing::error!(path = %tail, %source, "read failed"),
                _ => tracing::debug!(path = %tail, %error, "static miss"),
            }
            Err(error)
        }
    }
}

async fn projects_handler(state: Data<SiteState>, query: Query<GalleryQuery>) -> HttpResponse {
    let query = query.into_inner();
    let mut gallery = state.gallery();
    if let Some(category) = query.category.as_deref() {
        gallery = update(gallery, Command::SetFilter(CategoryFilter::parse(category)));
    }
    if let Some(q) = query.q {
        gallery = update(gallery, Command::Search(q));
    }
    let cards: Vec<ProjectCard> = gallery.visible().map(project_card).collect();
    HttpResponse::Ok().json(cards)
}

async fn project_handler(state: Data<SiteState>, slug: web::Path<String>) -> HttpResponse {
    match find_by_slug(&state.content.projects, &slug) {
        Some(project) => HttpResponse::Ok().json(project),
        None => HttpResponse::NotFound().body(format!("No project \"{}\"", slug)),
    }
}

async fn about_handler(state: Data<SiteState>) -> HttpResponse {
    HttpResponse::Ok().json(AboutView::from_about(&state.content.about))
}

async fn lightbox_handler(state: Data<SiteState>) -> HttpResponse {
    let lightbox = Lightbox::from_projects(&state.content.projects);
    HttpResponse::Ok().json(lightbox.entries())
}

async fn status_handler(state: Data<SiteState>) -> HttpResponse {
    HttpResponse::Ok().json(Status {
        status: "folio is running",
        started_at: &state.started_at,
        content: state.content.origin,
        projects: state.content.projects.len(),
    })
}
