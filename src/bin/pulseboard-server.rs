//! Dashboard API Server Binary
//!
//! Run with: `cargo run --bin pulseboard-server`

use pulseboard::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Note: Tracing is initialized in run_server()
    // Set RUST_LOG to control log level:
    //   RUST_LOG=debug cargo run --bin pulseboard-server

    // Create configuration from environment variables or defaults
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

    let config = ServerConfig::new(host, port, data_dir);

    println!("🚀 Starting PulseBoard API Server...");
    println!("   Host: {}", config.host);
    println!("   Port: {}", config.port);
    println!("   Data dir: {}", config.data_dir);
    println!();
    println!(
        "Server will be available at: http://{}:{}",
        config.host, config.port
    );
    println!();
    println!("Available endpoints:");
    println!("  GET /health                 - Health check");
    println!("  GET /summary                - Latest-row snapshot");
    println!("  GET /kpis                   - All KPIs for an interval");
    println!("  GET /kpis/growth            - Growth for one metric");
    println!("  GET /activity               - Filtered activity rows");
    println!("  GET /feedback               - Filtered NPS responses");
    println!("  GET /features               - Filtered adoption rows");
    println!("  GET /export/:dataset        - CSV download");
    println!();

    // Run server
    run_server(config).await?;

    Ok(())
}
