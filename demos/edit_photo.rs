//! Localized edit of a photo.
//!
//! Run with:
//! ```bash
//! export GEMINI_API_KEY="your-api-key"
//! cargo run --example edit_photo -- photo.jpg 320 180 "remove the coffee mug"
//! ```

use base64::Engine;
use integrations_photo_editor::{
    create_client_from_env, EditRequest, EditorError, Hotspot, ImageSource,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=integrations_photo_editor=debug shows request ids and timings
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [path, x, y, prompt] = args.as_slice() else {
        eprintln!("usage: edit_photo <image> <x> <y> <prompt>");
        std::process::exit(2);
    };

    let client = create_client_from_env()?;
    println!("Using model {}", client.config().model);

    let request = EditRequest {
        image: ImageSource::path(path),
        prompt: prompt.clone(),
        hotspot: Hotspot::new(x.parse()?, y.parse()?),
    };

    match client.editing().edit(request).await {
        Ok(url) => {
            let (header, payload) = url.split_once(',').unwrap_or_default();
            let extension = if header.contains("jpeg") { "jpg" } else { "png" };
            let out = format!("edited.{extension}");
            let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
            std::fs::write(&out, bytes)?;
            println!("Wrote {out}");
        }
        Err(e @ EditorError::BlockedByPolicy { .. }) => {
            println!("The request was refused: {e}");
        }
        Err(e) => {
            println!("Edit failed ({}): {e}", e.kind());
            if e.is_retryable() {
                println!("This looks temporary; try again in a moment.");
            }
        }
    }

    Ok(())
}
