// Example demonstrating the foxlog logging facility
//
// Run with: cargo run --example logging_demo

use foxlog::{log_debug, log_error, log_info, log_warn, ColorMode, Severity};

fn accept_connection(net: &foxlog::Logger, peer: &str) {
    log_info!(logger: net, "accepted connection from {}", peer);
    log_debug!(logger: net, "socket options applied for {}", peer);
}

fn main() {
    println!("=== foxlog Demo ===\n");

    println!("1. Default handle (threshold WARN):");
    log_info!("filtered out, INFO is below WARN");
    log_warn!("disk usage at {}%", 91);
    log_error!("failed to open {}", "/etc/app.conf");

    println!("\n2. Named handles with their own thresholds:");
    let net = foxlog::create(Some("net")).expect("create net logger");
    let storage = foxlog::create(Some("storage-engine-v2")).expect("create storage logger");
    foxlog::set_level(Some(&net), Severity::Debug);

    accept_connection(&net, "10.0.0.1:5000");
    log_info!(logger: &storage, "filtered out, storage still at WARN");
    log_warn!(logger: &storage, "compaction behind by {} segments", 3);
    println!(
        "   storage label stored as {:?} (truncated: {})",
        storage.module_name(),
        storage.label_truncated()
    );

    println!("\n3. Plain output:");
    foxlog::set_color_mode(ColorMode::Never);
    log_error!(logger: &net, "peer {} reset the connection", "10.0.0.2:5001");

    println!("\n4. Bounded lines:");
    foxlog::set_max_line_bytes(Some(96));
    if let Some(emitted) = log_warn!("{}", "x".repeat(200)) {
        println!("   wrote {} bytes, truncated: {}", emitted.bytes, emitted.truncated);
    }
    foxlog::set_max_line_bytes(None);

    foxlog::destroy(Some(net));
    foxlog::destroy(Some(storage));
    foxlog::destroy(None);

    println!(
        "\n5. log_fatal! would write its line and exit with status {}.",
        foxlog::FATAL_EXIT_CODE
    );
}
