pub mod asset;
pub mod journal;
pub mod operation;

pub use asset::{Asset, AssetType};
pub use journal::{
    note_views, resolve_entries, EmotionalState, EmotionalTone, JournalEntry, JournalEntryPatch,
    NoteView,
};
pub use operation::{Operation, OperationPatch, OperationType};
