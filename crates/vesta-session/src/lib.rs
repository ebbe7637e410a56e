//! # vesta-session: POS Session Orchestration
//!
//! The layer the SPA frontend talks to. It owns session state and wires the
//! pure checkout core to the backend collaborators.
//!
//! ## Module Organization
//! ```text
//! vesta_session/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── session.rs      ◄─── PosSession: cart ops, checkout flow, views
//! ├── stepper.rs      ◄─── Hold-to-repeat timer driver
//! ├── config.rs       ◄─── TOML + env configuration
//! └── error.rs        ◄─── Session error envelope
//! ```
//!
//! ## Dependency Injection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Wiring                                       │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │   PosConfig      │ │  Collaborators   │ │    PosSession        │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • sales profile │ │  • Arc<dyn ...>  │ │  • Cart              │   │
//! │  │  • tolerance     │ │    five traits   │ │  • CheckoutGate      │   │
//! │  │  • stepper ms    │ │                  │ │  • TenderSession     │   │
//! │  └────────┬─────────┘ └────────┬─────────┘ └──────────▲───────────┘   │
//! │           │                    │                       │               │
//! │           └────────────────────┴───────────────────────┘               │
//! │                        PosSession::new(config, collaborators)          │
//! │                                                                         │
//! │  WHY: no ambient context or global query cache - a session unit test   │
//! │       builds everything it needs from in-memory fakes.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod stepper;

pub use config::{ConfigError, PosConfig, SalesSettings, StepperSettings, StoreConfig};
pub use error::{ErrorCode, SessionError};
pub use session::{
    CartView, CheckoutOutcome, Collaborators, PaymentEntry, PosSession, SessionResult,
    SubmissionView, TenderView,
};
pub use stepper::{HoldRepeater, Step};
