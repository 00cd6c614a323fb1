use std::fs;

use actix_web::{http::StatusCode, test, web::Data, App};
use serde_json::Value;
use studio_folio::{
    core::{
        data::{load_content, ContentOrigin},
        settings::ContentSource,
    },
    server::{routes, SiteState},
    static_files::SiteRoot,
    types::{LightboxEntry, Project, ProjectCard},
};
use tempfile::TempDir;

const PROJECTS_JSON: &str = r###"[
    {
        "id": "proj_001",
        "title": "Барон Мюнхгаузен",
        "slug": "1-baron",
        "description": "Памятник барону у станции метро",
        "images": ["resources/projects/1-baron-01.jpg", "resources/projects/1-baron-02.jpg"],
        "category": "monuments",
        "year": 2004
    },
    {
        "id": "proj_020",
        "title": "Fountain of Seasons",
        "slug": "20-fountain",
        "description": "Decorative bronze fountain",
        "markdown": "## Fountain\n\nFour **bronze** figures. See [photos](http://x).",
        "images": ["resources/projects/20-fountain-01.jpg"],
        "category": "decorative"
    }
]"###;

const ABOUT_JSON: &str = r####"{"title":"Скульптор","markdown":"##Биография\r\nТекст---конец"}"####;

fn site(with_about: bool) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
    fs::write(dir.path().join("projects.json"), PROJECTS_JSON).unwrap();
    if with_about {
        fs::write(dir.path().join("about.json"), ABOUT_JSON).unwrap();
    }
    dir
}

async fn state(dir: &TempDir) -> Data<SiteState> {
    let content = load_content(
        ContentSource::parse("projects.json", dir.path()).unwrap(),
        ContentSource::parse("about.json", dir.path()).unwrap(),
    )
    .await;
    let site = SiteRoot::new(dir.path(), "resources", 3600).unwrap();
    Data::new(SiteState::new(site, content))
}

#[actix_web::test]
async fn filtering_by_category_yields_matching_cards() {
    let dir = site(true);
    let app = test::init_service(App::new().app_data(state(&dir).await).configure(routes)).await;

    let req = test::TestRequest::get()
        .uri("/v1/projects?category=decorative")
        .to_request();
    let cards: Vec<ProjectCard> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, "proj_020");
    assert_eq!(cards[0].year, "2000");
    assert_eq!(cards[0].category_label, "Декоративная");
    assert_eq!(cards[0].preview, "Fountain Four bronze figures. See .");

    let req = test::TestRequest::get().uri("/v1/projects?category=all").to_request();
    let cards: Vec<ProjectCard> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cards.len(), 2);
}

#[actix_web::test]
async fn search_matches_title_or_description() {
    let dir = site(true);
    let app = test::init_service(App::new().app_data(state(&dir).await).configure(routes)).await;

    let req = test::TestRequest::get().uri("/v1/projects?q=BRONZE").to_request();
    let cards: Vec<ProjectCard> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cards.iter().map(|c| c.slug.as_str()).collect::<Vec<_>>(), vec!["20-fountain"]);

    let req = test::TestRequest::get()
        .uri("/v1/projects?category=monuments&q=bronze")
        .to_request();
    let cards: Vec<ProjectCard> = test::call_and_read_body_json(&app, req).await;
    assert!(cards.is_empty());
}

#[actix_web::test]
async fn project_lookup_by_slug() {
    let dir = site(true);
    let app = test::init_service(App::new().app_data(state(&dir).await).configure(routes)).await;

    let req = test::TestRequest::get().uri("/v1/projects/1-baron").to_request();
    let project: Project = test::call_and_read_body_json(&app, req).await;
    assert_eq!(project.title, "Барон Мюнхгаузен");
    assert_eq!(project.year, "2004");

    let req = test::TestRequest::get().uri("/v1/projects/unknown").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn about_is_normalized_with_timeline() {
    let dir = site(true);
    let app = test::init_service(App::new().app_data(state(&dir).await).configure(routes)).await;

    let req = test::TestRequest::get().uri("/v1/about").to_request();
    let about: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(about["title"], "Скульптор");
    assert_eq!(about["markdown"], "## Биография\nТекст\n---\nконец");
    assert_eq!(about["timeline"].as_array().map(Vec::len), Some(6));
}

#[actix_web::test]
async fn lightbox_lists_every_image() {
    let dir = site(true);
    let app = test::init_service(App::new().app_data(state(&dir).await).configure(routes)).await;

    let req = test::TestRequest::get().uri("/v1/lightbox").to_request();
    let entries: Vec<LightboxEntry> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].title, "Fountain of Seasons");
}

#[actix_web::test]
async fn missing_about_serves_fallback_everywhere() {
    let dir = site(false);
    let data = state(&dir).await;
    assert_eq!(data.content.origin, ContentOrigin::Fallback);
    let app = test::init_service(App::new().app_data(data).configure(routes)).await;

    let req = test::TestRequest::get().uri("/v1/projects").to_request();
    let cards: Vec<ProjectCard> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        cards.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        vec!["proj_001", "proj_012"]
    );

    let req = test::TestRequest::get().uri("/v1/folio").to_request();
    let status: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(status["status"], "folio is running");
    assert_eq!(status["content"], "fallback");
    assert_eq!(status["projects"], 2);
}
