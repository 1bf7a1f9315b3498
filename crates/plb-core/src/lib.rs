pub mod buffer;
pub mod choices;
pub mod error;
pub mod line;
pub mod params;
pub mod store;

pub use buffer::LineBuffer;
pub use choices::{ChoiceList, NOT_SELECTED};
pub use error::{ParamError, StoreError};
pub use line::build_line;
pub use params::{JobParams, ParamKind, ParamName, ParamValue};
pub use store::{LineStore, LoadedFile, SaveOutcome, SavedFile};
