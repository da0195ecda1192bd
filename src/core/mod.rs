//! # Core Application Logic
//!
//! SmartShop's business logic. It knows nothing about any specific UI
//! technology and performs no I/O of its own.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Vec<Effect>
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐           ┌──────────────┐
//!             │  Runtime   │           │     TUI      │
//!             │ (timers,   │           │  (ratatui)   │
//!             │  requests) │           │              │
//!             └────────────┘           └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`transcript`]: Append-only chat history plus the typing indicator
//! - [`typing`]: Typing indicator identity and label animation
//! - [`product`]: Raw product records and their card rendering
//! - [`results`]: The recommendations pane
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod product;
pub mod results;
pub mod state;
pub mod transcript;
pub mod typing;
