use anyhow::Result;
use botr::{default_context, Args, Client, Config};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Credentials come from BOTR_API_KEY and BOTR_API_SECRET.
    let ctx = default_context();
    let config = Config::from_env(&ctx)?;
    let client = Client::new(ctx, config)?;

    // Inspect what would be sent before sending it.
    let args = Args::new()
        .with("result_limit", 5)
        .with("tags", vec!["news", "sports"]);
    println!("Signed url: {}", client.call_url("/videos/list", &args)?);

    let resp = client.call("/videos/list", &args).await?;
    match resp.as_decoded() {
        Some(value) => println!("Decoded response: {value:#}"),
        None => println!("Undecodable response: {resp:?}"),
    }

    Ok(())
}
