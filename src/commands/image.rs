//! Person Image Commands

use web_sys::{File, FormData};

use super::{post, Body};
use crate::error::ApiError;

pub const DEFAULT_SAVE_URL: &str = "/save_image_to_person";
pub const DEFAULT_REMOVE_URL: &str = "/remove_image_from_person";

/// Extensions the server takes, without the dot
pub const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// `accept` attribute of the file picker
pub fn image_accept() -> String {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

/// Only jpg and png files are accepted by the server; the text after the
/// last dot decides, so `.jpg` alone passes.
pub fn allowed_image(filename: &str) -> bool {
    filename.rsplit_once('.').is_some_and(|(_, ext)| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    })
}

/// Upload `image` for person `person_id` (`id` + `image` multipart fields)
pub async fn upload_person_image(url: &str, person_id: i64, image: &File) -> Result<(), ApiError> {
    let form = FormData::new().map_err(ApiError::js)?;
    form.append_with_str("id", &person_id.to_string())
        .map_err(ApiError::js)?;
    form.append_with_blob_and_filename("image", image, &image.name())
        .map_err(ApiError::js)?;
    post(url, Body::Multipart(form)).await?;
    Ok(())
}

/// Clear the image of person `person_id`
pub async fn remove_person_image(url: &str, person_id: i64) -> Result<(), ApiError> {
    let fields = vec![("itemId".to_string(), serde_json::to_string(&person_id)?)];
    post(url, Body::Form(fields)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_image() {
        assert!(allowed_image("kuva.jpg"));
        assert!(allowed_image("KUVA.PNG"));
        assert!(allowed_image("my.photo.Png"));
        assert!(!allowed_image("kuva.gif"));
        assert!(allowed_image(".jpg"));
        assert!(!allowed_image("kuva.jpeg"));
        assert!(!allowed_image("jpg"));
        assert!(!allowed_image(""));
    }

    #[test]
    fn test_picker_offers_only_allowed_images() {
        assert_eq!(image_accept(), ".jpg,.png");
        for ext in image_accept().split(',') {
            assert!(allowed_image(&format!("kuva{}", ext)));
        }
    }
}
