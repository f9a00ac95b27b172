//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start (with the restored collection size) and shutdown
//! - **Entity operations**: Create, Get, List, Update, Delete, Action; journal
//!   failures as warnings
//! - **Checkout**: rejected carts, appended orders, the cart clear that follows
//! - **Status engine**: every advance of a tracked order
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! RUST_LOG=foodsaas::status=debug,info cargo run
//! ```
//!
//! A checkout at `info` level reads:
//!
//! ```text
//! INFO place_order: Action ok entity_type="Cart" id=cart mutating=false
//! INFO place_order: Created entity_type="Order" id=order-1718000123456 size=1
//! INFO place_order: Order appended order_id=order-1718000123456
//! INFO place_order: Action ok entity_type="Cart" id=cart mutating=true
//! INFO place_order: Order placed order_id=order-1718000123456 total=56.90
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says which actor logged
        .compact()
        .init();
}
