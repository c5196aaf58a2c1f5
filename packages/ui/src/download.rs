//! Hand downloaded bytes to the user, per platform.
//!
//! The bytes arrive through the authorized API client (the browser cannot
//! attach the auth headers to a plain link), so saving is a separate local
//! step: an object-URL anchor click on the web, a write into the downloads
//! directory on native targets.

use api::ApiError;

fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "download".to_string()
    } else {
        cleaned
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_file(filename: &str, bytes: &[u8], mime: &str) -> Result<(), ApiError> {
    use wasm_bindgen::JsCast;

    let fail = |msg: &str| ApiError::Download(msg.to_string());
    let window = web_sys::window().ok_or_else(|| fail("no window"))?;
    let document = window.document().ok_or_else(|| fail("no document"))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_buffer_source_sequence_and_options(&parts, &options)
        .map_err(|_| fail("could not assemble the file"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| fail("could not stage the file"))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| fail("could not create the download link"))?
        .dyn_into()
        .map_err(|_| fail("could not create the download link"))?;
    anchor.set_href(&url);
    anchor.set_download(&sanitize_filename(filename));
    anchor.click();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_file(filename: &str, bytes: &[u8], _mime: &str) -> Result<(), ApiError> {
    let dir = dirs::download_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| ApiError::Download("no writable downloads directory".to_string()))?;
    let path = dir.join(sanitize_filename(filename));
    std::fs::write(&path, bytes).map_err(|err| ApiError::Download(err.to_string()))?;
    tracing::info!("saved download to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_cannot_escape_the_target_directory() {
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("call\\2024.mp3"), "call_2024.mp3");
        assert_eq!(sanitize_filename(""), "download");
        assert_eq!(sanitize_filename("call-2024.mp3"), "call-2024.mp3");
    }
}
