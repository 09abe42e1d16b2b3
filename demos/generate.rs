use emberlight::{AspectRatio, GenerationRequest, ImagenClient};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Initialize the client from environment variable
    let client = ImagenClient::new(None)?;

    let prompt = env::args()
        .nth(1)
        .unwrap_or_else(|| "a red fox in a neon forest".to_string());
    let request = GenerationRequest::new(prompt)
        .with_negative_prompt("blurry, text, watermark")
        .with_aspect_ratio(AspectRatio::Wide);

    println!("Submitting prompt: '{}'", request.composed_prompt());

    match client
        .generate(&request.composed_prompt(), request.aspect_ratio)
        .await
    {
        Ok(images) => {
            println!("Received {} image(s).", images.len());
            tokio::fs::create_dir_all("output").await?;
            for (index, image) in images.iter().enumerate() {
                let path = format!("output/emberlight-creation-{}.jpeg", index + 1);
                image.save(&path).await?;
                println!("  Exported {}", path);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}
