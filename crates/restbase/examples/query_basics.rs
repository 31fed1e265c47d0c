//! Query builder walkthrough: select, filter, order, paginate, and the
//! write paths.
//!
//! cargo run --example query_basics

use restbase::prelude::*;
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<(), RestbaseError> {
    tracing_subscriber::fmt::init();

    let url = std::env::var("RESTBASE_URL").unwrap_or_else(|_| "http://127.0.0.1:54321".into());
    let key = std::env::var("RESTBASE_ANON_KEY").unwrap_or_default();
    let client = RestbaseClient::new(RestbaseConfig::new(url, key))?;

    // Read: filters apply in call order.
    let products: ApiResponse<Vec<Value>> = client
        .from("products")
        .select("*")
        .eq("category", "fuel")
        .order("name", OrderDirection::Ascending)
        .limit(5)
        .execute()
        .await;
    match products.data {
        Some(rows) => println!("{} fuel products", rows.len()),
        None => println!("read failed: {:?}", products.error),
    }

    // Paginated window: rows 10..=19.
    let page: ApiResponse<Vec<Value>> = client.from("products").range(10, 19).execute().await;
    println!("page rows: {:?}", page.data.map(|r| r.len()));

    // Single row; an empty match is data: None, not an error.
    let one: ApiResponse<Value> = client
        .from("products")
        .select("id,name")
        .eq("sku", "DSL-001")
        .single()
        .execute()
        .await;
    println!("lookup: {:?}", one.data);

    // Insert wraps a bare object into a one-element array on the wire.
    let created: ApiResponse<Vec<Value>> = client
        .from("products")
        .insert(json!({"name": "Diesel", "category": "fuel", "sku": "DSL-001"}))
        .await;
    println!("created: {:?}", created.data);

    // Update and delete reuse the same compiled filters as a read would.
    let updated: ApiResponse<Vec<Value>> = client
        .from("products")
        .eq("sku", "DSL-001")
        .update(json!({"name": "Diesel B7"}))
        .await;
    println!("updated: {:?}", updated.data);

    let deleted = client.from("products").eq("sku", "DSL-001").delete().await;
    println!("delete ok: {}", deleted.is_ok());

    Ok(())
}
