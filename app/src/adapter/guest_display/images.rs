use std::path::{Component, Path, PathBuf};

use actix_web::{HttpResponse, http::header, web};

use crate::sustainability::GreenChampion;

use super::{DisplaySettings, GuestDisplayError, GuestDisplayResponse, GuestDisplayState};

const CHAMPIONS_DIR: &str = "champions";

/// URL of the champion photo, or of the placeholder if the photo file is missing
pub(super) fn photo_url(display: &DisplaySettings, champion: &GreenChampion) -> String {
    let photo = format!("{}/{}", CHAMPIONS_DIR, champion.photo);

    if display.images_dir.join(&photo).is_file() {
        format!("/images/{}", photo)
    } else {
        tracing::debug!("No photo for {} found, using placeholder", champion.name);
        format!("/images/{}", display.placeholder_image)
    }
}

pub(super) async fn image(state: web::Data<GuestDisplayState>, file: web::Path<String>) -> GuestDisplayResponse {
    let path = resolve(&state.display.images_dir, &file).ok_or(GuestDisplayError::NotFound)?;

    let content = tokio::fs::read(&path).await.map_err(|e| {
        tracing::debug!("Error reading image {:?}: {}", path, e);
        GuestDisplayError::NotFound
    })?;

    Ok(HttpResponse::Ok()
        .append_header(header::ContentType(content_type(&path)))
        .body(content))
}

//only plain relative paths below the image directory
fn resolve(images_dir: &Path, file: &str) -> Option<PathBuf> {
    let relative = Path::new(file);

    if file.is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }

    Some(images_dir.join(relative))
}

fn content_type(path: &Path) -> mime::Mime {
    mime_guess::from_path(path).first_or_octet_stream()
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test as actix_test};

    use super::*;
    use crate::adapter::guest_display::new_routes;
    use crate::sustainability::DataSources;

    #[test]
    fn resolves_plain_relative_paths_only() {
        let dir = Path::new("images");

        assert_eq!(resolve(dir, "champions/a.jpg"), Some(PathBuf::from("images/champions/a.jpg")));
        assert_eq!(resolve(dir, "../config.toml"), None);
        assert_eq!(resolve(dir, "/etc/passwd"), None);
        assert_eq!(resolve(dir, ""), None);
    }

    #[test]
    fn photo_falls_back_to_placeholder() {
        let display = DisplaySettings::testdata();

        let camden = GreenChampion::of(&"Camden".into()).unwrap();
        let westin = GreenChampion::of(&"Westin".into()).unwrap();

        assert_eq!(photo_url(&display, &camden), "/images/champions/chinmay.jpg");
        assert_eq!(photo_url(&display, &westin), "/images/placeholder.jpg");
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type(Path::new("a.JPG")), mime::IMAGE_JPEG);
        assert_eq!(content_type(Path::new("a.png")), mime::IMAGE_PNG);
        assert_eq!(content_type(Path::new("placeholder.svg")), mime::IMAGE_SVG);
        assert_eq!(content_type(Path::new("a")), mime::APPLICATION_OCTET_STREAM);
    }

    #[actix_web::test]
    async fn serves_champion_photo() {
        let app = actix_test::init_service(
            App::new().service(new_routes(DataSources::testdata(), DisplaySettings::testdata())),
        )
        .await;

        let resp = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/images/champions/chinmay.jpg").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap(),
            "image/jpeg"
        );

        let resp = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/images/champions/missing.jpg").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
