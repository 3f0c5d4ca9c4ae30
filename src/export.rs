use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tiny_skia::Pixmap;

use crate::error::ExportError;

/// Name offered to the user for the downloaded drawing
pub const EXPORT_FILE_NAME: &str = "drawing.png";

/// Encode a pixmap as PNG with straight (unpremultiplied) alpha
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        &rgba,
        pixmap.width(),
        pixmap.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Write encoded bytes as `drawing.png` inside `dir`
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(dir: &std::path::Path, bytes: &[u8]) -> Result<std::path::PathBuf, ExportError> {
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, bytes)?;
    log::info!("Saved drawing to {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Offer encoded bytes to the browser as a `drawing.png` download
#[cfg(target_arch = "wasm32")]
pub fn download_png(bytes: &[u8]) -> Result<(), String> {
    use eframe::wasm_bindgen::JsCast as _;

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("{e:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{e:?}"))?;

    let link = document
        .create_element("a")
        .map_err(|e| format!("{e:?}"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "not an anchor element")?;
    link.set_href(&url);
    link.set_download(EXPORT_FILE_NAME);
    link.click();

    web_sys::Url::revoke_object_url(&url).map_err(|e| format!("{e:?}"))?;
    Ok(())
}
