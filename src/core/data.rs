use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use actix_web::rt;
use awc::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    core::settings::ContentSource,
    error::{FolioError, FolioResult},
    types::{About, Project},
};

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentOrigin {
    Sources,
    Fallback,
}

/// Records held for the lifetime of the server.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteContent {
    pub projects: Vec<Project>,
    pub about: About,
    pub origin: ContentOrigin,
}

impl SiteContent {
    pub fn fallback() -> Self {
        SiteContent {
            projects: fallback_projects(),
            about: fallback_about(),
            origin: ContentOrigin::Fallback,
        }
    }
}

pub fn load_from_storage<T: DeserializeOwned>(path: &Path) -> FolioResult<T> {
    let file = File::open(path)?;
    let mut buffer: Vec<u8> = Vec::new();
    let size = BufReader::new(file).read_to_end(&mut buffer)?;
    tracing::debug!(path = %path.display(), size, "read local content");
    Ok(serde_json::from_slice::<T>(&buffer)?)
}

pub async fn load_from_cdn<T: DeserializeOwned>(url: &str) -> FolioResult<T> {
    let client = Client::default();
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|error| FolioError::remote(format!("request to {} failed: {}", url, error)))?;
    if !response.status().is_success() {
        return Err(FolioError::remote(format!(
            "{} answered {}",
            url,
            response.status()
        )));
    }
    let body = response
        .body()
        .await
        .map_err(|error| FolioError::remote(format!("reading {} failed: {}", url, error)))?;
    tracing::debug!(url, size = body.len(), "read remote content");
    Ok(serde_json::from_slice::<T>(&body)?)
}

pub async fn load_source<T: DeserializeOwned>(source: &ContentSource) -> FolioResult<T> {
    match source {
        ContentSource::Local(path) => load_from_storage(path),
        ContentSource::Remote(url) => load_from_cdn(url).await,
    }
}

/// Loads both documents concurrently; any failure swaps in the fallback set.
///
/// Must run inside an actix system.
pub async fn load_content(projects: ContentSource, about: ContentSource) -> SiteContent {
    let projects_task = rt::spawn({
        let source = projects.clone();
        async move { load_source::<Vec<Project>>(&source).await }
    });
    let about_task = rt::spawn({
        let source = about.clone();
        async move { load_source::<About>(&source).await }
    });

    let projects_result = projects_task
        .await
        .unwrap_or_else(|error| Err(FolioError::remote(format!("projects task: {}", error))));
    let about_result = about_task
        .await
        .unwrap_or_else(|error| Err(FolioError::remote(format!("about task: {}", error))));

    match (projects_result, about_result) {
        (Ok(projects), Ok(about)) => {
            tracing::info!(projects = projects.len(), "content loaded");
            SiteContent {
                projects,
                about,
                origin: ContentOrigin::Sources,
            }
        }
        (projects_result, about_result) => {
            if let Err(error) = projects_result {
                tracing::error!(source = ?projects, %error, "failed to load projects");
            }
            if let Err(error) = about_result {
                tracing::error!(source = ?about, %error, "failed to load about");
            }
            tracing::warn!("serving fallback content");
            SiteContent::fallback()
        }
    }
}

pub fn fallback_projects() -> Vec<Project> {
    vec![
        Project {
            id: "proj_001".to_string(),
            title: "Барон Мюнхгаузен".to_string(),
            slug: "1-baron".to_string(),
            description: "Памятник барону Мюнхгаузену у станции метро Молодежная".to_string(),
            markdown: None,
            images: vec!["resources/projects/1-baron-01.jpg".to_string()],
            category: "monuments".to_string(),
            year: "2004".to_string(),
        },
        Project {
            id: "proj_012".to_string(),
            title: "Шерлок Холмс и доктор Ватсон".to_string(),
            slug: "5-sherlock".to_string(),
            description: "Памятник знаменитым литературным героям".to_string(),
            markdown: None,
            images: vec!["resources/projects/5-sherlock-01.jpeg".to_string()],
            category: "monuments".to_string(),
            year: "2007".to_string(),
        },
    ]
}

pub fn fallback_about() -> About {
    About {
        title: "Андрей Орлов — скульптор".to_string(),
        markdown: "Советский и российский скульптор. Наиболее известен как создатель памятников Шерлоку Холмсу и доктору Ватсону, а также барону Мюнхгаузену в Москве.".to_string(),
    }
}
