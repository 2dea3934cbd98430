//! Expands a photo to a new aspect ratio with generative fill.
//!
//! Run with:
//! ```bash
//! export GEMINI_API_KEY="your-api-key"
//! cargo run --example expand_canvas -- photo.jpg 16:9 "more of the beach"
//! ```

use base64::Engine;
use integrations_photo_editor::{
    create_client_from_env, AspectRatio, ExpandCanvas, ExpandRequest, ImageSource,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=integrations_photo_editor=debug shows request ids and timings
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(path), Some(ratio)) = (args.next(), args.next()) else {
        eprintln!("usage: expand_canvas <image> <ratio> [prompt]");
        std::process::exit(2);
    };
    let prompt = args.next().unwrap_or_default();

    let aspect: AspectRatio = ratio.parse()?;
    let original = tokio::fs::read(&path).await?;
    let canvas = ExpandCanvas::prepare(&original, aspect)?;
    println!(
        "Canvas {}x{}, original placed at ({}, {})",
        canvas.width, canvas.height, canvas.offset_x, canvas.offset_y
    );

    let client = create_client_from_env()?;
    let url = client
        .editing()
        .expand(ExpandRequest {
            image: ImageSource::bytes_with_mime(canvas.image, "image/png"),
            mask: Some(ImageSource::bytes_with_mime(canvas.mask, "image/png")),
            prompt,
        })
        .await?;

    let payload = url.split_once(',').map(|(_, data)| data).unwrap_or_default();
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
    std::fs::write("expanded.png", bytes)?;
    println!("Wrote expanded.png");

    Ok(())
}
