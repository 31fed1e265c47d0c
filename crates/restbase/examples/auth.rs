//! Password auth lifecycle: sign in, inspect the session, sign out.
//!
//! Point RESTBASE_URL / RESTBASE_ANON_KEY at a deployment before running:
//! cargo run --example auth

use restbase::prelude::*;

#[tokio::main]
async fn main() -> Result<(), RestbaseError> {
    tracing_subscriber::fmt::init();

    let url = std::env::var("RESTBASE_URL").unwrap_or_else(|_| "http://127.0.0.1:54321".into());
    let key = std::env::var("RESTBASE_ANON_KEY").unwrap_or_default();

    let client = RestbaseClient::new(RestbaseConfig::new(url, key))?;
    let auth = client.auth();

    let signed_in = auth
        .sign_in_with_password("ops@example.com", "password123")
        .await;
    match signed_in.data {
        Some(data) => println!("signed in as {}", data.user.email),
        None => {
            println!("sign-in failed: {:?}", signed_in.error);
            return Ok(());
        }
    }

    // The session survives in the store; any clone of the client sees it.
    let current = auth.get_session().await;
    let present = current.data.map(|d| d.session.is_some()).unwrap_or(false);
    println!("session present: {present}");

    let out = auth.sign_out().await;
    match out.error {
        Some(error) => println!("revoke failed ({error}); local session cleared anyway"),
        None => println!("signed out"),
    }

    Ok(())
}
