// Rich-text content model for free-text sections (résumé summary, post bodies).
// Everything here is pure except `EditorSession`, which only records history.

pub mod codec;
pub mod edit;
pub mod handlers;
pub mod model;
pub mod selection;
pub mod session;

pub use codec::{decode, encode};
pub use model::{BlockKind, RichTextDocument};
pub use selection::Selection;
pub use session::EditorSession;
