// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that no business layer owns:
//
//   model_store.rs — locating Marian model files, either in a local
//                    directory or through the Hugging Face Hub cache
//
//   device.rs      — picking CUDA or CPU for candle
//
//   logging.rs     — tracing subscriber with console + log file output
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model file resolution (local / hf-hub)
pub mod model_store;

/// candle device selection
pub mod device;

/// tracing subscriber setup
pub mod logging;
