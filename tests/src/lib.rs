//! # Sustaina Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── ledger_benchmarks.rs   # log_action / unlock evaluation throughput
//! └── src/integration/
//!     ├── persistence.rs         # file-backed hydration across restarts
//!     ├── streaks.rs             # multi-day challenge and streak flows
//!     ├── actors.rs              # per-user actors and the registry
//!     └── runtime.rs             # scanner + map + ledger through the runtime
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p su-tests
//! cargo test -p su-tests integration::streaks
//! cargo bench -p su-tests
//! ```

pub mod integration;
