use emberlight::{App, FileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let store = FileStore::new(".emberlight")?;
    let mut app = App::from_env(Box::new(store))?;

    println!("Gallery holds {} image(s).", app.gallery().len());

    app.request_mut().prompt = "a lighthouse at dusk, oil painting".to_string();
    app.generate().await;

    match app.session().error_message() {
        Some(message) => eprintln!("Generation failed: {}", message),
        None => {
            // Keep the first variation; duplicates are ignored.
            if let Some(url) = app.session().results().first() {
                let url = url.clone();
                app.save_to_gallery(url);
            }
            println!("Gallery now holds {} image(s).", app.gallery().len());
        }
    }

    Ok(())
}
