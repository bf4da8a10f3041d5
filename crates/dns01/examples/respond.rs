//! Publish a DNS-01 validation record and wait for it to propagate.
//!
//! Run with: cargo run --example respond
//!
//! Set CLOUDFLARE_EMAIL, CLOUDFLARE_API_KEY, DNS01_ZONE, DNS01_DOMAIN and
//! DNS01_CONTENT before running.

use dns01::{
    CloudflareDns, ConsistencyChecker, Dns01Challenge, RecordResponder, Responder, Result,
    WaitingResponder,
};

#[tokio::main]
async fn main() -> Result<()> {
    let email = std::env::var("CLOUDFLARE_EMAIL")
        .expect("CLOUDFLARE_EMAIL environment variable is required");
    let api_key = std::env::var("CLOUDFLARE_API_KEY")
        .expect("CLOUDFLARE_API_KEY environment variable is required");
    let zone = std::env::var("DNS01_ZONE")
        .expect("DNS01_ZONE environment variable is required");
    let domain = std::env::var("DNS01_DOMAIN")
        .expect("DNS01_DOMAIN environment variable is required");
    let content = std::env::var("DNS01_CONTENT")
        .expect("DNS01_CONTENT environment variable is required");

    // Publisher for the zone, wrapped so completion waits for every
    // public resolver to agree
    let publisher = CloudflareDns::new(&email, &api_key, &zone);
    let responder = WaitingResponder::new(
        RecordResponder::new(publisher),
        ConsistencyChecker::default_public(),
    );

    let challenge = Dns01Challenge::new(&domain, "manual", &content);

    println!("=== Publishing ===");
    println!("Record: {}", challenge.validation_domain_name());
    println!("Content: {}", challenge.validation_content());

    responder.start_responding(&challenge).await?;
    println!("All resolvers agree; the CA can validate now.");

    println!("=== Releasing ===");
    responder.stop_responding(&challenge).await?;
    println!("Done. The record will age out via its TTL.");

    Ok(())
}
