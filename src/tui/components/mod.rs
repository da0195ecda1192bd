//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar with endpoint and status
//! - `Message`: One transcript entry
//! - `ProductCard`: One recommendation
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: Multi-line text entry, locked while a request is pending
//! - `MessageList`: Scrollable transcript with height caching
//! - `ResultsPanel`: Placeholder or revealed product cards
//!
//! Components receive external data as props (struct fields), not by reading
//! `App` directly, which keeps them testable against a `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single transcript entry)
//! ├── message_list.rs  (Scrollable transcript)
//! ├── product_card.rs  (Single recommendation)
//! ├── results_panel.rs (Recommendations pane)
//! └── input_box/       (Text entry + wrapping helpers)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod product_card;
pub mod results_panel;
pub use results_panel::{ResultsPanel, ResultsPanelState};
