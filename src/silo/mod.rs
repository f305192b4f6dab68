//! Single-process grain host.
//!
//! # Data Flow
//! ```text
//! Silo::get_grain::<G>(key)
//!     → directory lookup by GrainId (DashMap)
//!     → miss: spawn activation task (activation.rs), store its GrainRef
//!     → GrainRef::call(request)
//!         → bounded mailbox (mpsc)
//!         → activation handles one message per turn
//!         → reply on oneshot
//! ```
//!
//! # Design Decisions
//! - One activation per GrainId, created lazily on first reference
//! - Turn-based: an activation never handles two requests at once
//! - Shutdown flips a watch flag; activations finish their current turn,
//!   deactivate and exit

pub mod activation;
pub mod reference;
pub mod runtime;

pub use reference::GrainRef;
pub use runtime::Silo;
