//! Editing and bulk mutation of event-ticket pass records.
//!
//! Records travel between the store and this crate in *wire* form (colors
//! as `rgb(r,g,b)`, dates as ISO-8601 UTC). People edit them in *editable*
//! form (`#RRGGBB`, `YYYY-MM-DDTHH:MM`). A [`RecordEditSession`] converts
//! one record between the two; the [`BulkMutationEngine`] applies one
//! [`OverrideSet`] to many records through sessions.
//!
//! ```
//! use passdesk_core::{RecordEditSession, Seating};
//! use serde_json::json;
//!
//! let pass = passdesk_core::PassData::from_value(json!({
//!     "backgroundColor": "rgb(216,189,90)",
//!     "foregroundColor": "rgb(0,0,0)",
//!     "labelColor": "rgb(0,0,0)",
//!     "eventTicket": {"auxiliaryFields": [{"key": "standing", "label": "STANDING", "value": "42"}]}
//! })).unwrap();
//!
//! let mut session = RecordEditSession::open("LTN-1", pass).unwrap();
//! assert_eq!(session.get("backgroundColor").unwrap(), Some(&json!("#D8BD5A")));
//!
//! session.mutate("backgroundColor", "#FFFFFF").unwrap();
//! let wire = session.to_wire_payload(&Seating::Standing("42".into())).unwrap();
//! assert_eq!(wire.background_color(), "rgb(255,255,255)");
//! ```

pub mod bulk;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod overrides;
pub mod selection;
pub mod session;
pub mod store;

pub use bulk::{plan_assets, AssetPlan, BulkFailure, BulkMutationEngine, BulkResult};
pub use config::{BulkConfig, EngineConfig};
pub use error::{PassError, Result, StoreError};
pub use layout::{detect_standing, to_seated, to_standing, Seating, TicketLayout};
pub use model::{PassData, PassField, PassRecord};
pub use overrides::OverrideSet;
pub use selection::{PassFilter, Selection};
pub use session::{EditableSnapshot, RecordEditSession};
pub use store::{
    AssetEncoder, AssetStore, Base64AssetEncoder, EncodedAssets, MemoryPassStore, PassStore,
};

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
