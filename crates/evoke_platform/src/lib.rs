//! Evoke Platform Abstraction
//!
//! The theming engine never talks to a browser directly. Instead it works
//! against a small set of host capability traits, bundled in an
//! [`Environment`]:
//!
//! - [`StyleRoot`]: the element that receives CSS custom properties
//! - [`KeyValueStore`]: persistent preference storage
//! - [`MediaQueries`]: system preference queries with change watching
//! - [`CssSupport`]: CSS feature detection
//! - [`Scheduler`] and [`Clock`]: deferred tasks and wall-clock time
//!
//! Every capability is optional, and an environment without a style root is
//! a non-interactive (server) context. In-memory implementations back
//! headless use and tests; the `web` feature adds browser implementations
//! over `web-sys` on `wasm32`.
//!
//! All types are single-threaded (`Rc`, no `Send`), matching the UI-thread
//! callback model of the hosts they wrap.

pub mod css;
pub mod env;
pub mod error;
pub mod media;
pub mod root;
pub mod storage;
pub mod timer;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use css::{supports_oklch, CssSupport, StaticCssSupport, OKLCH_PROBE};
pub use env::Environment;
pub use error::{PlatformError, Result};
pub use media::{MediaListener, MediaQueries, MediaWatch, MemoryMediaQueries};
pub use root::{MemoryRoot, StyleRoot};
pub use storage::{KeyValueStore, MemoryStore};
pub use timer::{Clock, ManualClock, ManualScheduler, Scheduler, SystemClock, Task, TimerId};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::{
    BrowserCssSupport, BrowserMediaQueries, BrowserScheduler, BrowserStorage, ElementRoot,
};
