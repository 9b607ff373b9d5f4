//! Boundary document retrieval.
//!
//! The document is read once at startup. There is no retry: a failure here
//! aborts the load.

use crime_dash_geography_models::DepartmentBoundary;

use crate::parse::parse_boundaries;
use crate::{BoundaryFields, BoundarySource, GeoError};

/// User-Agent sent when fetching remote boundary documents.
const USER_AGENT: &str = concat!("crime-dash/", env!("CARGO_PKG_VERSION"));

/// Loads and parses all department boundaries from `source`.
///
/// # Errors
///
/// Returns [`GeoError`] if the source is unreachable, the response is not
/// successful, or the document cannot be converted into boundaries.
pub async fn load_boundaries(
    source: &BoundarySource,
    fields: &BoundaryFields,
) -> Result<Vec<DepartmentBoundary>, GeoError> {
    let body = match source {
        BoundarySource::Url(url) => fetch_url(url).await?,
        BoundarySource::Path(path) => {
            log::debug!("Reading boundaries from {}", path.display());
            tokio::fs::read_to_string(path).await?
        }
    };

    let boundaries = parse_boundaries(&body, fields)?;
    log::info!("Loaded {} department boundaries from {source}", boundaries.len());

    Ok(boundaries)
}

/// Downloads a `GeoJSON` document, failing on any non-2xx status.
async fn fetch_url(url: &str) -> Result<String, GeoError> {
    log::info!("Fetching boundaries from {url}");

    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let resp = client.get(url).send().await?.error_for_status()?;
    let body = resp.text().await?;
    log::debug!("Downloaded {} bytes from {url}", body.len());

    Ok(body)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "crime_dash_geography_{}_{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn loads_boundaries_from_path() {
        let path = temp_file(
            "ok.geojson",
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"code":"75","nom":"Paris"},
                 "geometry":{"type":"Polygon","coordinates":[[[2.2,48.8],[2.4,48.8],[2.4,48.9],[2.2,48.8]]]}}
            ]}"#,
        );

        let boundaries = load_boundaries(&BoundarySource::Path(path.clone()), &BoundaryFields::default())
            .await
            .unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].code.as_str(), "75");
        assert_eq!(boundaries[0].name, "Paris");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = BoundarySource::Path(PathBuf::from("/nonexistent/departements.geojson"));
        let err = load_boundaries(&source, &BoundaryFields::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GeoError::Io(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn malformed_file_is_rejected() {
        let path = temp_file("bad.geojson", "{ not geojson");
        let result = load_boundaries(&BoundarySource::Path(path.clone()), &BoundaryFields::default()).await;
        std::fs::remove_file(path).ok();
        assert!(matches!(result, Err(GeoError::GeoJson(_))));
    }

    #[tokio::test]
    async fn error_status_is_an_http_error() {
        use std::io::{Read as _, Write as _};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0_u8; 1024];
            let _ = stream.read(&mut request).unwrap();
            stream
                .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .unwrap();
        });

        let source = BoundarySource::Url(format!("http://{addr}/departements.geojson"));
        let err = load_boundaries(&source, &BoundaryFields::default())
            .await
            .unwrap_err();
        server.join().unwrap();

        match err {
            GeoError::Http(e) => assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
