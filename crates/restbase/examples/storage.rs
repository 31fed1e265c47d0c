//! Object storage walkthrough: upload, download, public URL.
//!
//! cargo run --example storage

use restbase::prelude::*;

#[tokio::main]
async fn main() -> Result<(), RestbaseError> {
    tracing_subscriber::fmt::init();

    let url = std::env::var("RESTBASE_URL").unwrap_or_else(|_| "http://127.0.0.1:54321".into());
    let key = std::env::var("RESTBASE_ANON_KEY").unwrap_or_default();
    let client = RestbaseClient::new(RestbaseConfig::new(url, key))?;

    let receipts = client.storage().from("receipts");

    let uploaded = receipts
        .upload(
            "2026/08/pump4.txt",
            b"42.7L @ 1.89".to_vec(),
            FileOptions::new().content_type("text/plain").upsert(true),
        )
        .await;
    match uploaded.data {
        Some(resp) => println!("uploaded: {:?}", resp.key),
        None => println!("upload failed: {:?}", uploaded.error),
    }

    let downloaded = receipts.download("2026/08/pump4.txt").await;
    match downloaded.data {
        Some(bytes) => println!("downloaded {} bytes", bytes.len()),
        None => println!("download failed: {:?}", downloaded.error),
    }

    // No network: pure string construction.
    println!("public url: {}", receipts.get_public_url("2026/08/pump4.txt"));

    Ok(())
}
