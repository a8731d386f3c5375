use anyhow::Result;
use botr::{default_context, Args, Client, Config, Format};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut argv = std::env::args().skip(1);
    let (Some(video_key), Some(path)) = (argv.next(), argv.next()) else {
        eprintln!("usage: upload_thumbnail <video_key> <file>");
        std::process::exit(2);
    };

    let ctx = default_context();
    let client = Client::new(ctx.clone(), Config::from_env(&ctx)?.with_format(Format::Json))?;

    // Phase one: ask for an upload link bound to this video.
    let link = client
        .request_upload_link(
            "/videos/thumbnails/update",
            &Args::new().with("video_key", video_key),
        )
        .await?;

    // Phase two: post the file. The link is consumed here.
    let resp = client.upload(link, &path, None).await?;
    println!("Upload status: {:?}", resp.status());

    Ok(())
}
