use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use actix_web::{
    http::{header, StatusCode},
    web, HttpResponse, ResponseError,
};

pub const INDEX_FILE: &str = "index.html";
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=UTF-8"),
    ("js", "application/javascript; charset=UTF-8"),
    ("mjs", "application/javascript; charset=UTF-8"),
    ("css", "text/css; charset=UTF-8"),
    ("json", "application/json; charset=UTF-8"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("ico", "image/x-icon"),
    ("mp4", "video/mp4"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
];

#[derive(thiserror::Error, Debug)]
pub enum StaticError {
    #[error("Bad Request")]
    BadRequest,
    #[error("Not Found")]
    NotFound,
    #[error("Directory listing forbidden")]
    Forbidden,
    #[error("Read Error")]
    Read(#[source] io::Error),
}

impl ResponseError for StaticError {
    fn status_code(&self) -> StatusCode {
        match self {
            StaticError::BadRequest => StatusCode::BAD_REQUEST,
            StaticError::NotFound => StatusCode::NOT_FOUND,
            StaticError::Forbidden => StatusCode::FORBIDDEN,
            StaticError::Read(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((header::CONTENT_TYPE, "text/plain; charset=UTF-8"))
            .body(self.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub content_type: &'static str,
    pub cacheable: bool,
}

#[derive(Clone, Debug)]
pub struct SiteRoot {
    root: PathBuf,
    resources_dir: String,
    cache_max_age: u64,
}

impl SiteRoot {
    pub fn new(root: &Path, resources_dir: &str, cache_max_age: u64) -> io::Result<Self> {
        Ok(SiteRoot {
            root: root.canonicalize()?,
            resources_dir: resources_dir.to_string(),
            cache_max_age,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age)
    }

    /// Maps a decoded request path to a file under the root.
    pub fn resolve(&self, request_path: &str) -> Result<ResolvedFile, StaticError> {
        let relative = normalize(request_path)?;
        let candidate = self.root.join(&relative);

        let metadata = fs::metadata(&candidate).map_err(|_| StaticError::NotFound)?;
        let file = if metadata.is_dir() {
            let index = candidate.join(INDEX_FILE);
            match fs::metadata(&index) {
                Ok(meta) if meta.is_file() => index,
                // the bare root has no listing to refuse
                _ if relative.as_os_str().is_empty() => return Err(StaticError::NotFound),
                _ => return Err(StaticError::Forbidden),
            }
        } else if metadata.is_file() {
            candidate
        } else {
            return Err(StaticError::NotFound);
        };

        let canonical = file.canonicalize().map_err(|_| StaticError::NotFound)?;
        let inside = canonical
            .strip_prefix(&self.root)
            .map_err(|_| StaticError::BadRequest)?;
        let cacheable = matches!(
            inside.components().next(),
            Some(Component::Normal(first)) if first == self.resources_dir.as_str()
        );

        Ok(ResolvedFile {
            content_type: content_type_for(&canonical),
            path: canonical,
            cacheable,
        })
    }

    pub async fn serve(&self, request_path: &str) -> Result<HttpResponse, StaticError> {
        let site = self.clone();
        let request_path = request_path.to_string();
        let (resolved, bytes) = web::block(move || -> Result<_, StaticError> {
            let resolved = site.resolve(&request_path)?;
            let bytes = fs::read(&resolved.path).map_err(StaticError::Read)?;
            Ok((resolved, bytes))
        })
        .await
        .map_err(|error| StaticError::Read(io::Error::other(error.to_string())))??;

        let mut response = HttpResponse::Ok();
        response.insert_header((header::CONTENT_TYPE, resolved.content_type));
        if resolved.cacheable {
            response.insert_header((header::CACHE_CONTROL, self.cache_control()));
        }
        Ok(response.body(bytes))
    }
}

/// Relative path inside the root, with `.` and `..` folded away.
fn normalize(request_path: &str) -> Result<PathBuf, StaticError> {
    if request_path.contains('\0') || request_path.contains('\\') {
        return Err(StaticError::BadRequest);
    }
    let mut parts: Vec<&str> = Vec::new();
    for segment in request_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop().ok_or(StaticError::BadRequest)?;
            }
            segment => {
                if Path::new(segment)
                    .components()
                    .any(|component| !matches!(component, Component::Normal(_)))
                {
                    return Err(StaticError::BadRequest);
                }
                parts.push(segment);
            }
        }
    }
    Ok(parts.iter().collect())
}

pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase());
    extension
        .and_then(|extension| {
            CONTENT_TYPES
                .iter()
                .find(|(known, _)| *known == extension)
                .map(|(_, content_type)| *content_type)
        })
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}
