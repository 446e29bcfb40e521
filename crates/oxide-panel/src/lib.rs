//! # oxide-panel
//!
//! Back-office form rendering from declarative field trees.
//!
//! A form is a [`FieldTree`]: either an ordered map of field name to
//! [`FieldSpec`], or an ordered map of tab id to [`TabSpec`] whose controls
//! are field trees themselves. [`FormRenderer`] walks the tree and emits the
//! admin panel markup: a two-column table per field list, tab chrome for tab
//! lists, and a success or error banner for the preceding operation.
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_panel::{FieldSpec, FieldTree, FormRenderer, SelectOptions, Values};
//!
//! let fields = FieldTree::new()
//!     .field("ID", FieldSpec::hidden())
//!     .field("NAME", FieldSpec::input("Name").attr("size", 40))
//!     .field(
//!         "STATUS",
//!         FieldSpec::select(
//!             "Status",
//!             SelectOptions::new().option("draft", "Draft").option("live", "Live"),
//!         ),
//!     );
//!
//! let html = FormRenderer::new("page", "/admin/page.php", fields)
//!     .values(Values::new().with("ID", 3).with("STATUS", "live"))
//!     .render(None, None)
//!     .unwrap();
//!
//! assert!(html.contains(r#"<input id="page_ID" name="page[ID]" value="3" type="hidden">"#));
//! assert!(html.contains(r#"<option value="live" selected="selected">Live</option>"#));
//! ```
//!
//! ## Tabs
//!
//! ```rust
//! use oxide_panel::{FieldSpec, FieldTree, FormRenderer, TabSpec};
//!
//! let fields = FieldTree::new()
//!     .tab("main", TabSpec::new("Main").controls(
//!         FieldTree::new().field("TITLE", FieldSpec::input("Title")),
//!     ))
//!     .tab("seo", TabSpec::new("SEO").help("Search engine settings"));
//!
//! let html = FormRenderer::new("page", "/save", fields)
//!     .show_buttons(true)
//!     .render(None, None)
//!     .unwrap();
//!
//! assert!(html.contains("adm-detail-tab-active"));
//! assert!(html.contains(r#"name="save""#));
//! ```
//!
//! ## Computed sources
//!
//! Field trees, tab controls and select options may be computed from the
//! values in effect for the render call:
//!
//! ```rust
//! use oxide_panel::{FieldSpec, FieldTree, FormRenderer, Resolvable, SelectOptions, Values};
//!
//! let cities = Resolvable::computed(|values: &Values| {
//!     match values.get("COUNTRY").map(|v| v.as_text().into_owned()).as_deref() {
//!         Some("fr") => SelectOptions::new().option("paris", "Paris"),
//!         _ => SelectOptions::new(),
//!     }
//! });
//! let fields = FieldTree::new().field("CITY", FieldSpec::select("City", SelectOptions::new()).options(cities));
//!
//! let html = FormRenderer::new("addr", "/save", fields)
//!     .render(None, Some(&Values::new().with("COUNTRY", "fr")))
//!     .unwrap();
//! assert!(html.contains("Paris"));
//! ```

mod config;
mod definition;
mod error;
pub mod fields;
mod host;
mod message;
mod renderer;
mod resolve;
pub mod validation;
mod value;
pub mod widgets;

pub use config::{Messages, RendererConfig, ADMIN_PUBLIC_CSS, HINT_ICON};
pub use definition::FormDefinition;
pub use error::{PanelError, Result};
pub use fields::{
    CustomRender, FieldKind, FieldSpec, FieldTree, FieldType, SelectOption, SelectOptions, TabSpec,
};
pub use host::{DatePicker, Host, MessageKey, StaticHost};
pub use message::{render_banner, render_result_message, MessageType, OperationResult};
pub use renderer::{ButtonSpec, FormRenderer};
pub use resolve::{Producer, Resolvable};
pub use validation::{Constraint, Validator, ValidatorSet};
pub use value::{FieldValue, Values};
pub use widgets::{AttrValue, WidgetAttrs};
